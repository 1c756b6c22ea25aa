// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Notification settings layered from files, environment, and flags.
//!
//! Precedence, highest first: flags, `RUN4EVER_*` environment, user file,
//! system file. Config problems are logged and never abort a run.

use r4e_core::{JobDefinition, NotifyOn, DEFAULT_NOTIFY_METHOD};
use serde::Deserialize;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors from loading a config file
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// One layer of notification settings. `None` defers to lower layers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct NotifySettings {
    pub notify_on: Option<String>,
    pub notify_method: Option<String>,
    pub telegram_token: Option<String>,
    pub telegram_chat_id: Option<String>,
    pub telegram_custom_api: Option<String>,
    pub slack_webhook_url: Option<String>,
    pub slack_channel: Option<String>,
    pub email_to: Option<String>,
    pub email_from: Option<String>,
    pub email_password: Option<String>,
    pub email_smtp: Option<String>,
    pub email_port: Option<u16>,
}

impl NotifySettings {
    /// Field-wise merge where set fields of `higher` win.
    pub fn overlay(self, higher: NotifySettings) -> NotifySettings {
        NotifySettings {
            notify_on: higher.notify_on.or(self.notify_on),
            notify_method: higher.notify_method.or(self.notify_method),
            telegram_token: higher.telegram_token.or(self.telegram_token),
            telegram_chat_id: higher.telegram_chat_id.or(self.telegram_chat_id),
            telegram_custom_api: higher.telegram_custom_api.or(self.telegram_custom_api),
            slack_webhook_url: higher.slack_webhook_url.or(self.slack_webhook_url),
            slack_channel: higher.slack_channel.or(self.slack_channel),
            email_to: higher.email_to.or(self.email_to),
            email_from: higher.email_from.or(self.email_from),
            email_password: higher.email_password.or(self.email_password),
            email_smtp: higher.email_smtp.or(self.email_smtp),
            email_port: higher.email_port.or(self.email_port),
        }
    }

    /// Read `RUN4EVER_<KEY>` values through `lookup`. Empty values are unset.
    pub fn from_env_with<F>(lookup: F) -> NotifySettings
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(&format!("RUN4EVER_{key}")).filter(|v| !v.is_empty());
        let email_port = get("EMAIL_PORT").and_then(|raw| match raw.parse::<u16>() {
            Ok(port) => Some(port),
            Err(e) => {
                tracing::warn!(value = %raw, error = %e, "ignoring invalid RUN4EVER_EMAIL_PORT");
                None
            }
        });
        NotifySettings {
            notify_on: get("NOTIFY_ON"),
            notify_method: get("NOTIFY_METHOD"),
            telegram_token: get("TELEGRAM_TOKEN"),
            telegram_chat_id: get("TELEGRAM_CHAT_ID"),
            telegram_custom_api: get("TELEGRAM_CUSTOM_API"),
            slack_webhook_url: get("SLACK_WEBHOOK_URL"),
            slack_channel: get("SLACK_CHANNEL"),
            email_to: get("EMAIL_TO"),
            email_from: get("EMAIL_FROM"),
            email_password: get("EMAIL_PASSWORD"),
            email_smtp: get("EMAIL_SMTP"),
            email_port,
        }
    }

    pub fn from_env() -> NotifySettings {
        Self::from_env_with(|key| std::env::var(key).ok())
    }

    /// Parse a TOML config file. `Ok(None)` when it does not exist.
    pub fn load_file(path: &Path) -> Result<Option<NotifySettings>, ConfigError> {
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(source) => return Err(ConfigError::Read { path: path.to_path_buf(), source }),
        };
        warn_if_insecure(path);
        toml::from_str(&text)
            .map(Some)
            .map_err(|source| ConfigError::Parse { path: path.to_path_buf(), source })
    }

    /// The set fields as command-line flags.
    pub fn to_cli_args(&self) -> Vec<String> {
        let fields = [
            ("--notify-on", self.notify_on.clone()),
            ("--notify-method", self.notify_method.clone()),
            ("--telegram-token", self.telegram_token.clone()),
            ("--telegram-chat-id", self.telegram_chat_id.clone()),
            ("--telegram-custom-api", self.telegram_custom_api.clone()),
            ("--slack-webhook-url", self.slack_webhook_url.clone()),
            ("--slack-channel", self.slack_channel.clone()),
            ("--email-to", self.email_to.clone()),
            ("--email-from", self.email_from.clone()),
            ("--email-password", self.email_password.clone()),
            ("--email-smtp", self.email_smtp.clone()),
            ("--email-port", self.email_port.map(|port| port.to_string())),
        ];
        fields
            .into_iter()
            .filter_map(|(flag, value)| value.map(|value| [flag.to_string(), value]))
            .flatten()
            .collect()
    }

    /// Copy the resolved values onto `def`, applying built-in defaults.
    pub fn apply(self, def: &mut JobDefinition) {
        def.notify_on = self.notify_on.as_deref().map(NotifyOn::parse).unwrap_or_default();
        def.notify_method = self.notify_method.unwrap_or_else(|| DEFAULT_NOTIFY_METHOD.to_string());
        def.telegram_token = self.telegram_token;
        def.telegram_chat_id = self.telegram_chat_id;
        def.telegram_custom_api = self.telegram_custom_api;
        def.slack_webhook_url = self.slack_webhook_url;
        def.slack_channel = self.slack_channel;
        def.email_to = self.email_to;
        def.email_from = self.email_from;
        def.email_password = self.email_password;
        def.email_smtp = self.email_smtp;
        def.email_port = self.email_port;
    }
}

/// Merge `files` (lowest precedence first), the environment, then `flags`.
pub fn resolve(files: &[PathBuf], flags: NotifySettings) -> NotifySettings {
    resolve_with(files, NotifySettings::from_env(), flags)
}

pub fn resolve_with(
    files: &[PathBuf],
    env: NotifySettings,
    flags: NotifySettings,
) -> NotifySettings {
    let mut merged = NotifySettings::default();
    for path in files {
        match NotifySettings::load_file(path) {
            Ok(Some(layer)) => {
                tracing::info!(path = %path.display(), "loaded config");
                merged = merged.overlay(layer);
            }
            Ok(None) => {}
            Err(e) => tracing::warn!(error = %e, "skipping config file"),
        }
    }
    merged.overlay(env).overlay(flags)
}

fn warn_if_insecure(path: &Path) {
    let Ok(meta) = std::fs::metadata(path) else {
        return;
    };
    let mode = meta.permissions().mode() & 0o777;
    if mode & 0o077 != 0 {
        tracing::warn!(
            path = %path.display(),
            mode = %format!("{mode:o}"),
            "config file is readable by others, should be 0600"
        );
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
