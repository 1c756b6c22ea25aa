// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use r4e_storage::Ledger;
use std::sync::Arc;

/// Shared handles for supervisors started by one invocation.
///
/// Passed explicitly instead of living in globals. The ledger carries the
/// process-wide mutex; cloning the context shares it.
#[derive(Clone, Debug)]
pub struct SupervisorContext<N> {
    pub ledger: Arc<Ledger>,
    pub notifier: N,
    /// PID recorded in the ledger for this process.
    pub pid: i32,
}

impl<N> SupervisorContext<N> {
    pub fn new(ledger: Arc<Ledger>, notifier: N) -> Self {
        Self { ledger, notifier, pid: std::process::id() as i32 }
    }
}
