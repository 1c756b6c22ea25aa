// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Stderr tracing subscriber.

use crate::env::LOG_ENV;
use tracing_subscriber::EnvFilter;

/// `RUN4EVER_LOG` wins; otherwise `info` when verbose and `error` when quiet.
pub fn init(verbose: bool) {
    let default_level = if verbose { "info" } else { "error" };
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_new(default_level))
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    // A second init (tests) keeps the first subscriber.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
