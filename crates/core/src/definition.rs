// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Persisted job definitions.
//!
//! A definition is the declared intent to supervise a command. It is written
//! once on `--persist` and turned back into a command line on `--restore`.

use crate::notify::NotifyOn;
use serde::{Deserialize, Serialize};

pub const DEFAULT_DELAY_SECS: u64 = 10;
pub const UNLIMITED_RETRIES: i64 = -1;
pub const DEFAULT_NOTIFY_METHOD: &str = "desktop";

fn default_delay() -> u64 {
    DEFAULT_DELAY_SECS
}

fn default_max_retries() -> i64 {
    UNLIMITED_RETRIES
}

/// Everything needed to relaunch a supervised job.
///
/// Credentials are stored verbatim; the file holding these is written 0600.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobDefinition {
    /// argv[0] followed by the arguments.
    pub command: Vec<String>,
    #[serde(default = "default_delay")]
    pub delay: u64,
    /// `-1` means unlimited.
    #[serde(default = "default_max_retries")]
    pub max_retries: i64,
    /// Seconds; `0` disables the timeout.
    #[serde(default)]
    pub timeout: u64,
    #[serde(default)]
    pub notify_on: NotifyOn,
    #[serde(default)]
    pub notify_method: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub telegram_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub telegram_chat_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub telegram_custom_api: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slack_webhook_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slack_channel: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email_to: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email_from: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email_password: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email_smtp: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email_port: Option<u16>,
    #[serde(default)]
    pub exit_on_success: bool,
}

impl JobDefinition {
    /// A definition with default options for `command`.
    pub fn new(command: Vec<String>) -> Self {
        Self {
            command,
            delay: DEFAULT_DELAY_SECS,
            max_retries: UNLIMITED_RETRIES,
            timeout: 0,
            notify_on: NotifyOn::Off,
            notify_method: DEFAULT_NOTIFY_METHOD.to_string(),
            telegram_token: None,
            telegram_chat_id: None,
            telegram_custom_api: None,
            slack_webhook_url: None,
            slack_channel: None,
            email_to: None,
            email_from: None,
            email_password: None,
            email_smtp: None,
            email_port: None,
            exit_on_success: false,
        }
    }

    /// Executable name, or the empty string for an empty command.
    pub fn program(&self) -> &str {
        self.command.first().map(String::as_str).unwrap_or_default()
    }

    /// Arguments after argv[0].
    pub fn args(&self) -> &[String] {
        self.command.get(1..).unwrap_or_default()
    }

    /// Reconstruct the command-line flags for this definition.
    ///
    /// Loop flags at their defaults are omitted. The notification policy is
    /// always written so config or environment at relaunch time cannot change
    /// it. The command follows a `--` separator so arguments starting with `-`
    /// reach the child untouched.
    pub fn to_cli_args(&self) -> Vec<String> {
        let mut args = vec!["-d".to_string(), self.delay.to_string()];

        if self.max_retries != UNLIMITED_RETRIES {
            args.extend(["-m".to_string(), self.max_retries.to_string()]);
        }
        if self.timeout > 0 {
            args.extend(["-t".to_string(), self.timeout.to_string()]);
        }
        args.extend(["--notify-on".to_string(), self.notify_on.to_string()]);
        if !self.notify_method.is_empty() {
            args.extend(["--notify-method".to_string(), self.notify_method.clone()]);
        }

        let optional = [
            ("--telegram-token", &self.telegram_token),
            ("--telegram-chat-id", &self.telegram_chat_id),
            ("--telegram-custom-api", &self.telegram_custom_api),
            ("--slack-webhook-url", &self.slack_webhook_url),
            ("--slack-channel", &self.slack_channel),
            ("--email-to", &self.email_to),
            ("--email-from", &self.email_from),
            ("--email-password", &self.email_password),
            ("--email-smtp", &self.email_smtp),
        ];
        for (flag, value) in optional {
            if let Some(value) = value.as_deref().filter(|v| !v.is_empty()) {
                args.extend([flag.to_string(), value.to_string()]);
            }
        }
        if let Some(port) = self.email_port {
            args.extend(["--email-port".to_string(), port.to_string()]);
        }

        if self.exit_on_success {
            args.push("--exit-on-success".to_string());
        }

        args.push("--".to_string());
        args.extend(self.command.iter().cloned());
        args
    }

    /// Flags used to relaunch this definition on restore: always backgrounded.
    pub fn restore_args(&self) -> Vec<String> {
        let mut args = vec!["-g".to_string()];
        args.extend(self.to_cli_args());
        args
    }
}

#[cfg(test)]
#[path = "definition_tests.rs"]
mod tests;
