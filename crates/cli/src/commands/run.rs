// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Foreground supervision of one job.

use crate::env::StatePaths;
use crate::exit_error::ExitError;
use anyhow::{Context, Result};
use r4e_adapters::ChannelNotifier;
use r4e_core::JobDefinition;
use r4e_engine::{Supervisor, SupervisorContext};
use r4e_storage::{DefinitionStore, Ledger};
use std::sync::Arc;
use tokio::signal::unix::{signal, SignalKind};
use tokio_util::sync::CancellationToken;

pub async fn handle(
    paths: &StatePaths,
    def: JobDefinition,
    name: Option<String>,
    persist: bool,
) -> Result<()> {
    if persist {
        DefinitionStore::new(paths.jobs()).save(&def).context("failed to save job definition")?;
    }

    let notifier = ChannelNotifier::from_definition(&def);
    tracing::info!(channel = notifier.name(), notify_on = %def.notify_on, "notifications configured");

    let ledger = Arc::new(Ledger::new(paths.ledger()));
    let ctx = SupervisorContext::new(ledger, notifier);
    let supervisor = Supervisor::from_definition(ctx, &def).with_name(name);

    let shutdown = CancellationToken::new();
    watch_signals(shutdown.clone())?;

    let report = supervisor.run(shutdown).await?;
    match report.termination.exit_code() {
        0 => Ok(()),
        code => Err(ExitError::silent(code).into()),
    }
}

/// Cancel `shutdown` on the first SIGINT or SIGTERM.
fn watch_signals(shutdown: CancellationToken) -> Result<()> {
    let mut interrupt = signal(SignalKind::interrupt()).context("failed to install SIGINT handler")?;
    let mut terminate = signal(SignalKind::terminate()).context("failed to install SIGTERM handler")?;
    tokio::spawn(async move {
        tokio::select! {
            _ = interrupt.recv() => tracing::info!("received SIGINT"),
            _ = terminate.recv() => tracing::info!("received SIGTERM"),
        }
        shutdown.cancel();
    });
    Ok(())
}
