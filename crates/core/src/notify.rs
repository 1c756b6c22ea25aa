// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Notification policy, channel names and message composition.

use crate::redact::redact_args;
use serde::{Deserialize, Serialize};

/// When a finished attempt should produce a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum NotifyOn {
    #[default]
    Off,
    Success,
    Failure,
    Always,
}

impl NotifyOn {
    /// Lenient parse: empty or unrecognized input is `Off`.
    pub fn parse(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "success" => NotifyOn::Success,
            "failure" => NotifyOn::Failure,
            "always" => NotifyOn::Always,
            _ => NotifyOn::Off,
        }
    }

    pub fn should_notify(self, exit_status: i32) -> bool {
        match self {
            NotifyOn::Always => true,
            NotifyOn::Success => exit_status == 0,
            NotifyOn::Failure => exit_status != 0,
            NotifyOn::Off => false,
        }
    }
}

impl From<String> for NotifyOn {
    fn from(s: String) -> Self {
        NotifyOn::parse(&s)
    }
}

crate::simple_display! {
    NotifyOn {
        Off => "off",
        Success => "success",
        Failure => "failure",
        Always => "always",
    }
}

/// Policy check on the raw policy string. Fails closed.
pub fn should_notify(policy: &str, exit_status: i32) -> bool {
    NotifyOn::parse(policy).should_notify(exit_status)
}

/// Delivery channel selected by `--notify-method`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotifyMethod {
    Desktop,
    Telegram,
    Slack,
    Email,
}

impl NotifyMethod {
    /// Returns `None` for unknown names; callers treat that as a no-op channel.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "desktop" => Some(NotifyMethod::Desktop),
            "telegram" => Some(NotifyMethod::Telegram),
            "slack" => Some(NotifyMethod::Slack),
            "email" => Some(NotifyMethod::Email),
            _ => None,
        }
    }
}

crate::simple_display! {
    NotifyMethod {
        Desktop => "desktop",
        Telegram => "telegram",
        Slack => "slack",
        Email => "email",
    }
}

/// Title and body of one notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub title: String,
    pub message: String,
}

impl Notification {
    /// Compose the notification for a finished attempt.
    ///
    /// `argv` is the live argument vector; it is redacted here, before the
    /// message is built.
    pub fn for_exit<S: AsRef<str>>(argv: &[S], exit_status: i32) -> Self {
        let outcome = if exit_status == 0 { "Success" } else { "Failure" };
        let command = redact_args(argv).join(" ");
        Self {
            title: format!("run4ever: Task {outcome}"),
            message: format!("Command: {command}\nExit status: {exit_status}"),
        }
    }
}

#[cfg(test)]
#[path = "notify_tests.rs"]
mod tests;
