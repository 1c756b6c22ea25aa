// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! r4e-engine: the supervision loop and restore fan-out

mod context;
mod restore;
mod supervisor;

pub use context::SupervisorContext;
pub use restore::{restore, RestoreSummary};
pub use supervisor::{
    SupervisionReport, Supervisor, SupervisorConfig, SupervisorError, Termination,
    TIMEOUT_EXIT_STATUS,
};
