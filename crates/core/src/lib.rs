// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! r4e-core: shared types for the run4ever supervisor

pub mod macros;

pub mod definition;
pub mod job;
pub mod notify;
pub mod redact;

pub use definition::{JobDefinition, DEFAULT_DELAY_SECS, DEFAULT_NOTIFY_METHOD, UNLIMITED_RETRIES};
pub use job::{JobId, JobRecord, JobStatus};
pub use notify::{should_notify, Notification, NotifyMethod, NotifyOn};
pub use redact::{redact_args, redacted_line, MASK};
