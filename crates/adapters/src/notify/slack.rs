// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::{NotifyAdapter, NotifyError};
use async_trait::async_trait;
use std::time::Duration;

const SEND_TIMEOUT: Duration = Duration::from_secs(15);

/// Incoming-webhook sender.
#[derive(Clone, Debug)]
pub struct SlackNotifyAdapter {
    client: reqwest::Client,
    webhook_url: String,
    channel: Option<String>,
}

impl SlackNotifyAdapter {
    pub fn new(webhook_url: impl Into<String>, channel: Option<String>) -> Self {
        Self {
            client: reqwest::Client::builder().timeout(SEND_TIMEOUT).build().unwrap_or_default(),
            webhook_url: webhook_url.into(),
            channel: channel.filter(|c| !c.is_empty()),
        }
    }

    fn payload(&self, title: &str, message: &str) -> serde_json::Value {
        let mut payload = serde_json::json!({ "text": format!("*{title}*\n{message}") });
        if let Some(channel) = &self.channel {
            payload["channel"] = serde_json::Value::String(channel.clone());
        }
        payload
    }
}

#[async_trait]
impl NotifyAdapter for SlackNotifyAdapter {
    async fn notify(&self, title: &str, message: &str) -> Result<(), NotifyError> {
        tracing::info!(channel = ?self.channel, "sending slack notification");
        let response = self
            .client
            .post(&self.webhook_url)
            .json(&self.payload(title, message))
            .send()
            .await
            .map_err(|e| NotifyError::SendFailed(format!("slack request failed: {}", e.without_url())))?;

        let status = response.status();
        tracing::info!(%status, "slack response");
        if status != reqwest::StatusCode::OK {
            return Err(NotifyError::SendFailed(format!("slack response: {status}")));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "slack_tests.rs"]
mod tests;
