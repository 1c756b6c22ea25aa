// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Notification senders.
//!
//! Each channel implements [`NotifyAdapter`]. [`ChannelNotifier`] picks one
//! channel from the job's `notify_method` and forwards to it.

mod channel;
mod desktop;
mod email;
mod slack;
mod telegram;

pub use channel::ChannelNotifier;
pub use desktop::DesktopNotifyAdapter;
pub use email::EmailNotifyAdapter;
pub use slack::SlackNotifyAdapter;
pub use telegram::TelegramNotifyAdapter;

use async_trait::async_trait;
use thiserror::Error;

/// Errors from notify operations
#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("send failed: {0}")]
    SendFailed(String),
    #[error("{channel} notifications require {field}")]
    MissingCredential { channel: &'static str, field: &'static str },
}

/// Adapter for sending notifications
#[async_trait]
pub trait NotifyAdapter: Clone + Send + Sync + 'static {
    /// Send a notification with a title and message body
    async fn notify(&self, title: &str, message: &str) -> Result<(), NotifyError>;
}

#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(coverage_nightly, coverage(off))]
mod fake {
    use super::{NotifyAdapter, NotifyError};
    use async_trait::async_trait;
    use parking_lot::Mutex;
    use std::sync::Arc;

    /// Recorded notification
    #[derive(Debug, Clone)]
    pub struct NotifyCall {
        pub title: String,
        pub message: String,
    }

    #[derive(Default)]
    struct FakeNotifyState {
        calls: Vec<NotifyCall>,
        fail: bool,
    }

    /// Fake notification adapter for testing
    #[derive(Clone, Default)]
    pub struct FakeNotifyAdapter {
        inner: Arc<Mutex<FakeNotifyState>>,
    }

    impl FakeNotifyAdapter {
        pub fn new() -> Self {
            Self::default()
        }

        /// An adapter whose sends are recorded and then fail.
        pub fn failing() -> Self {
            let fake = Self::default();
            fake.inner.lock().fail = true;
            fake
        }

        /// Get all recorded notifications
        pub fn calls(&self) -> Vec<NotifyCall> {
            self.inner.lock().calls.clone()
        }
    }

    #[async_trait]
    impl NotifyAdapter for FakeNotifyAdapter {
        async fn notify(&self, title: &str, message: &str) -> Result<(), NotifyError> {
            let mut inner = self.inner.lock();
            inner.calls.push(NotifyCall { title: title.to_string(), message: message.to_string() });
            if inner.fail {
                return Err(NotifyError::SendFailed("fake failure".to_string()));
            }
            Ok(())
        }
    }
}

#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakeNotifyAdapter, NotifyCall};
