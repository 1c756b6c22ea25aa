// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! r4e-adapters: side-effecting collaborators of the supervisor

pub mod notify;
pub mod process;

pub use notify::{
    ChannelNotifier, DesktopNotifyAdapter, EmailNotifyAdapter, NotifyAdapter, NotifyError,
    SlackNotifyAdapter, TelegramNotifyAdapter,
};
pub use process::{DetachedSpawner, ProcessSpawner, SpawnError};

#[cfg(any(test, feature = "test-support"))]
pub use notify::{FakeNotifyAdapter, NotifyCall};
#[cfg(any(test, feature = "test-support"))]
pub use process::{FakeSpawner, SpawnCall};
