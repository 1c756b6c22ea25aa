// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::{NotifyAdapter, NotifyError};
use async_trait::async_trait;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

pub const DEFAULT_SMTP_PORT: u16 = 587;

/// SMTP sender using STARTTLS and the sender's address as login.
#[derive(Clone, Debug)]
pub struct EmailNotifyAdapter {
    to: String,
    from: String,
    password: String,
    smtp_host: String,
    smtp_port: u16,
}

impl EmailNotifyAdapter {
    pub fn new(
        to: impl Into<String>,
        from: impl Into<String>,
        password: impl Into<String>,
        smtp_host: impl Into<String>,
        smtp_port: Option<u16>,
    ) -> Self {
        Self {
            to: to.into(),
            from: from.into(),
            password: password.into(),
            smtp_host: smtp_host.into(),
            smtp_port: smtp_port.unwrap_or(DEFAULT_SMTP_PORT),
        }
    }

    fn build_message(&self, title: &str, message: &str) -> Result<Message, NotifyError> {
        let from: Mailbox = self
            .from
            .parse()
            .map_err(|e| NotifyError::SendFailed(format!("invalid sender address: {e}")))?;
        let to: Mailbox = self
            .to
            .parse()
            .map_err(|e| NotifyError::SendFailed(format!("invalid recipient address: {e}")))?;

        Message::builder()
            .from(from)
            .to(to)
            .subject(title)
            .body(message.to_string())
            .map_err(|e| NotifyError::SendFailed(format!("failed to build email: {e}")))
    }
}

#[async_trait]
impl NotifyAdapter for EmailNotifyAdapter {
    async fn notify(&self, title: &str, message: &str) -> Result<(), NotifyError> {
        tracing::info!(
            to = %self.to,
            from = %self.from,
            smtp = %format!("{}:{}", self.smtp_host, self.smtp_port),
            "sending email notification"
        );
        let email = self.build_message(title, message)?;

        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&self.smtp_host)
            .map_err(|e| NotifyError::SendFailed(format!("invalid smtp relay: {e}")))?
            .port(self.smtp_port)
            .credentials(Credentials::new(self.from.clone(), self.password.clone()))
            .build();

        transport
            .send(email)
            .await
            .map_err(|e| NotifyError::SendFailed(format!("failed to send email: {e}")))?;

        tracing::info!("email sent");
        Ok(())
    }
}

#[cfg(test)]
#[path = "email_tests.rs"]
mod tests;
