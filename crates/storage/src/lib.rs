// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! r4e-storage: durable state for run4ever
//!
//! Two files live in the state directory: the ledger of running jobs and the
//! store of persisted job definitions. Both are rewritten whole through a
//! temporary sibling and an atomic rename.

mod atomic;
mod definitions;
mod ledger;
mod process;

pub use atomic::write_atomic;
pub use definitions::{DefinitionStore, DefinitionStoreError, DEFINITIONS_FILE_MODE};
pub use ledger::{render_records, Ledger, LedgerError, LEDGER_FILE_MODE, LEDGER_HEADER};
pub use process::is_process_alive;
