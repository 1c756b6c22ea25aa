// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::{NotifyAdapter, NotifyError};
use async_trait::async_trait;
use std::time::Duration;

const TELEGRAM_API: &str = "https://api.telegram.org";
const SEND_TIMEOUT: Duration = Duration::from_secs(15);

/// Bot API sender (`sendMessage`).
#[derive(Clone, Debug)]
pub struct TelegramNotifyAdapter {
    client: reqwest::Client,
    token: String,
    chat_id: String,
    base_url: String,
}

impl TelegramNotifyAdapter {
    /// `custom_api` replaces the public endpoint, e.g. for a self-hosted
    /// bot API server. A bare host gets an `https://` scheme.
    pub fn new(token: impl Into<String>, chat_id: impl Into<String>, custom_api: Option<&str>) -> Self {
        Self {
            client: reqwest::Client::builder().timeout(SEND_TIMEOUT).build().unwrap_or_default(),
            token: token.into(),
            chat_id: chat_id.into(),
            base_url: base_url(custom_api),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn send_url(&self) -> String {
        format!("{}/bot{}/sendMessage", self.base_url, self.token)
    }
}

fn base_url(custom_api: Option<&str>) -> String {
    match custom_api.map(str::trim).filter(|s| !s.is_empty()) {
        None => TELEGRAM_API.to_string(),
        Some(api) if api.starts_with("http://") || api.starts_with("https://") => {
            api.trim_end_matches('/').to_string()
        }
        Some(api) => format!("https://{}", api.trim_end_matches('/')),
    }
}

#[async_trait]
impl NotifyAdapter for TelegramNotifyAdapter {
    async fn notify(&self, title: &str, message: &str) -> Result<(), NotifyError> {
        tracing::info!(chat_id = %self.chat_id, base_url = %self.base_url, "sending telegram notification");
        let text = format!("{title}\n{message}");
        let response = self
            .client
            .post(self.send_url())
            .form(&[("chat_id", self.chat_id.as_str()), ("text", text.as_str())])
            .send()
            .await
            .map_err(|e| NotifyError::SendFailed(format!("telegram request failed: {}", e.without_url())))?;

        let status = response.status();
        tracing::info!(%status, "telegram response");
        if status != reqwest::StatusCode::OK {
            return Err(NotifyError::SendFailed(format!("telegram response: {status}")));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "telegram_tests.rs"]
mod tests;
