// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[yare::parameterized(
    default       = { None, "https://api.telegram.org" },
    blank         = { Some("  "), "https://api.telegram.org" },
    bare_host     = { Some("tg.example.com"), "https://tg.example.com" },
    http_scheme   = { Some("http://localhost:8081"), "http://localhost:8081" },
    https_slash   = { Some("https://tg.example.com/"), "https://tg.example.com" },
)]
fn resolves_base_url(custom: Option<&str>, expected: &str) {
    let adapter = TelegramNotifyAdapter::new("123:abc", "42", custom);
    assert_eq!(adapter.base_url(), expected);
}

#[test]
fn send_url_embeds_token() {
    let adapter = TelegramNotifyAdapter::new("123:abc", "42", None);
    assert_eq!(adapter.send_url(), "https://api.telegram.org/bot123:abc/sendMessage");
}

#[tokio::test]
async fn unreachable_endpoint_is_an_error() {
    let adapter = TelegramNotifyAdapter::new("123:abc", "42", Some("http://127.0.0.1:9"));
    let result = adapter.notify("t", "m").await;
    assert!(matches!(result, Err(NotifyError::SendFailed(_))));
}
