// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::{
    DesktopNotifyAdapter, EmailNotifyAdapter, NotifyAdapter, NotifyError, SlackNotifyAdapter,
    TelegramNotifyAdapter,
};
use async_trait::async_trait;
use r4e_core::{JobDefinition, NotifyMethod};

/// The one channel a job notifies through.
///
/// Built once from the job's method name and credentials. An unknown method
/// is `Disabled` and sends nothing. A known method missing a required
/// credential is `Misconfigured` and fails every send, which the supervisor
/// logs and ignores.
#[derive(Clone, Debug)]
pub enum ChannelNotifier {
    Desktop(DesktopNotifyAdapter),
    Telegram(TelegramNotifyAdapter),
    Slack(SlackNotifyAdapter),
    Email(EmailNotifyAdapter),
    Misconfigured { channel: &'static str, field: &'static str },
    Disabled,
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

impl ChannelNotifier {
    pub fn from_definition(def: &JobDefinition) -> Self {
        let Some(method) = NotifyMethod::parse(&def.notify_method) else {
            return ChannelNotifier::Disabled;
        };

        match method {
            NotifyMethod::Desktop => ChannelNotifier::Desktop(DesktopNotifyAdapter::new()),
            NotifyMethod::Telegram => {
                match (present(&def.telegram_token), present(&def.telegram_chat_id)) {
                    (Some(token), Some(chat_id)) => ChannelNotifier::Telegram(
                        TelegramNotifyAdapter::new(
                            token,
                            chat_id,
                            def.telegram_custom_api.as_deref(),
                        ),
                    ),
                    (None, _) => missing("telegram", "--telegram-token"),
                    (_, None) => missing("telegram", "--telegram-chat-id"),
                }
            }
            NotifyMethod::Slack => match present(&def.slack_webhook_url) {
                Some(url) => ChannelNotifier::Slack(SlackNotifyAdapter::new(
                    url,
                    def.slack_channel.clone(),
                )),
                None => missing("slack", "--slack-webhook-url"),
            },
            NotifyMethod::Email => {
                let required = [
                    ("--email-to", present(&def.email_to)),
                    ("--email-from", present(&def.email_from)),
                    ("--email-password", present(&def.email_password)),
                    ("--email-smtp", present(&def.email_smtp)),
                ];
                if let Some((field, _)) = required.iter().find(|(_, v)| v.is_none()) {
                    return missing("email", *field);
                }
                ChannelNotifier::Email(EmailNotifyAdapter::new(
                    present(&def.email_to).unwrap_or_default(),
                    present(&def.email_from).unwrap_or_default(),
                    present(&def.email_password).unwrap_or_default(),
                    present(&def.email_smtp).unwrap_or_default(),
                    def.email_port,
                ))
            }
        }
    }

    /// Channel name for logging.
    pub fn name(&self) -> &'static str {
        match self {
            ChannelNotifier::Desktop(_) => "desktop",
            ChannelNotifier::Telegram(_) => "telegram",
            ChannelNotifier::Slack(_) => "slack",
            ChannelNotifier::Email(_) => "email",
            ChannelNotifier::Misconfigured { channel, .. } => *channel,
            ChannelNotifier::Disabled => "none",
        }
    }
}

fn missing(channel: &'static str, field: &'static str) -> ChannelNotifier {
    ChannelNotifier::Misconfigured { channel, field }
}

#[async_trait]
impl NotifyAdapter for ChannelNotifier {
    async fn notify(&self, title: &str, message: &str) -> Result<(), NotifyError> {
        match self {
            ChannelNotifier::Desktop(a) => a.notify(title, message).await,
            ChannelNotifier::Telegram(a) => a.notify(title, message).await,
            ChannelNotifier::Slack(a) => a.notify(title, message).await,
            ChannelNotifier::Email(a) => a.notify(title, message).await,
            ChannelNotifier::Misconfigured { channel, field } => {
                Err(NotifyError::MissingCredential { channel: *channel, field: *field })
            }
            ChannelNotifier::Disabled => Ok(()),
        }
    }
}

#[cfg(test)]
#[path = "channel_tests.rs"]
mod tests;
