// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[yare::parameterized(
    always_ok       = { "always", 0, true },
    always_fail     = { "always", 3, true },
    success_ok      = { "success", 0, true },
    success_fail    = { "success", 1, false },
    failure_ok      = { "failure", 0, false },
    failure_fail    = { "failure", 124, true },
    failure_neg     = { "failure", -1, true },
    off             = { "off", 1, false },
    empty           = { "", 1, false },
    unknown         = { "sometimes", 1, false },
    mixed_case      = { "Always", 0, true },
)]
fn policy(policy: &str, status: i32, expected: bool) {
    assert_eq!(should_notify(policy, status), expected);
}

#[test]
fn notify_on_deserializes_leniently() {
    let on: NotifyOn = serde_json::from_str("\"failure\"").unwrap();
    assert_eq!(on, NotifyOn::Failure);
    let on: NotifyOn = serde_json::from_str("\"\"").unwrap();
    assert_eq!(on, NotifyOn::Off);
    let on: NotifyOn = serde_json::from_str("\"bogus\"").unwrap();
    assert_eq!(on, NotifyOn::Off);
}

#[test]
fn notify_on_serializes_lowercase() {
    assert_eq!(serde_json::to_string(&NotifyOn::Always).unwrap(), "\"always\"");
    assert_eq!(NotifyOn::Success.to_string(), "success");
}

#[yare::parameterized(
    desktop  = { "desktop", Some(NotifyMethod::Desktop) },
    telegram = { "Telegram", Some(NotifyMethod::Telegram) },
    slack    = { "slack", Some(NotifyMethod::Slack) },
    email    = { "email", Some(NotifyMethod::Email) },
    pager    = { "pager", None },
    empty    = { "", None },
)]
fn method_parse(input: &str, expected: Option<NotifyMethod>) {
    assert_eq!(NotifyMethod::parse(input), expected);
}

#[test]
fn notification_titles() {
    assert_eq!(Notification::for_exit(&["true"], 0).title, "run4ever: Task Success");
    assert_eq!(Notification::for_exit(&["false"], 1).title, "run4ever: Task Failure");
}

#[test]
fn notification_message_is_redacted() {
    let n = Notification::for_exit(&["psql", "--password", "hunter2"], 2);
    assert!(!n.message.contains("hunter2"));
    assert!(n.message.contains("psql --password ******"));
    assert!(n.message.contains("Exit status: 2"));
}
