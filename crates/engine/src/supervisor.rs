// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Execution loop: run, wait, notify, retry.
//!
//! One [`Supervisor`] owns one job for the lifetime of the process. The job
//! is registered in the ledger before the first attempt and removed after the
//! loop ends, whichever way it ends.

use crate::context::SupervisorContext;
use r4e_adapters::NotifyAdapter;
use r4e_core::{JobDefinition, JobId, Notification, NotifyOn, UNLIMITED_RETRIES};
use r4e_storage::LedgerError;
use std::io;
use std::os::unix::process::ExitStatusExt;
use std::process::ExitStatus;
use std::time::Duration;
use thiserror::Error;
use tokio::process::Command;
use tokio_util::sync::CancellationToken;

/// Exit status recorded for an attempt killed by the timeout.
pub const TIMEOUT_EXIT_STATUS: i32 = 124;

/// Errors that stop supervision outright
#[derive(Debug, Error)]
pub enum SupervisorError {
    #[error("no command to supervise")]
    EmptyCommand,
    #[error(transparent)]
    Ledger(#[from] LedgerError),
}

/// Loop settings derived from a job definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SupervisorConfig {
    pub delay: Duration,
    /// `None` lets attempts run unbounded.
    pub timeout: Option<Duration>,
    /// `-1` means retry forever.
    pub max_retries: i64,
    pub notify_on: NotifyOn,
    pub exit_on_success: bool,
}

impl Default for SupervisorConfig {
    fn default() -> Self {
        Self {
            delay: Duration::from_secs(r4e_core::DEFAULT_DELAY_SECS),
            timeout: None,
            max_retries: UNLIMITED_RETRIES,
            notify_on: NotifyOn::Off,
            exit_on_success: false,
        }
    }
}

impl From<&JobDefinition> for SupervisorConfig {
    fn from(def: &JobDefinition) -> Self {
        Self {
            delay: Duration::from_secs(def.delay),
            timeout: (def.timeout > 0).then(|| Duration::from_secs(def.timeout)),
            max_retries: def.max_retries,
            notify_on: def.notify_on,
            exit_on_success: def.exit_on_success,
        }
    }
}

/// Why the loop stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// An attempt exited 0 with exit-on-success set.
    Succeeded,
    /// Failures exceeded the retry cap.
    RetriesExhausted,
    /// The supervisor itself was asked to stop.
    Interrupted,
}

r4e_core::simple_display! {
    Termination {
        Succeeded => "succeeded",
        RetriesExhausted => "retries exhausted",
        Interrupted => "interrupted",
    }
}

impl Termination {
    /// Exit code of the supervisor process.
    pub fn exit_code(self) -> i32 {
        match self {
            Termination::Succeeded => 0,
            Termination::RetriesExhausted | Termination::Interrupted => 1,
        }
    }
}

/// Outcome of a full supervision run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SupervisionReport {
    pub termination: Termination,
    pub attempts: u64,
    /// Failed attempts; never reset by a success.
    pub failures: u64,
    pub last_exit_status: Option<i32>,
}

#[derive(Debug, Default)]
struct LoopState {
    attempts: u64,
    failures: u64,
    last_exit_status: Option<i32>,
}

/// Supervises one command until a terminal condition.
pub struct Supervisor<N> {
    ctx: SupervisorContext<N>,
    job_id: JobId,
    name: Option<String>,
    argv: Vec<String>,
    config: SupervisorConfig,
}

impl<N: NotifyAdapter> Supervisor<N> {
    pub fn new(ctx: SupervisorContext<N>, argv: Vec<String>, config: SupervisorConfig) -> Self {
        Self { ctx, job_id: JobId::new(), name: None, argv, config }
    }

    pub fn from_definition(ctx: SupervisorContext<N>, def: &JobDefinition) -> Self {
        Self::new(ctx, def.command.clone(), SupervisorConfig::from(def))
    }

    pub fn with_name(mut self, name: Option<String>) -> Self {
        self.name = name;
        self
    }

    pub fn job_id(&self) -> &JobId {
        &self.job_id
    }

    /// Run until success (with exit-on-success), retry cap, or `shutdown`.
    ///
    /// Ledger I/O failures are fatal. Notification failures are logged and
    /// never change the outcome.
    pub async fn run(
        &self,
        shutdown: CancellationToken,
    ) -> Result<SupervisionReport, SupervisorError> {
        let Some((program, args)) = self.argv.split_first() else {
            return Err(SupervisorError::EmptyCommand);
        };

        self.ctx.ledger.register(&self.job_id, self.name.clone(), self.ctx.pid, program, args)?;
        tracing::info!(job_id = %self.job_id, pid = self.ctx.pid, "registered job");

        let mut state = LoopState::default();
        let termination = tokio::select! {
            termination = self.run_loop(&mut state) => termination,
            _ = shutdown.cancelled() => {
                tracing::info!(job_id = %self.job_id, "supervisor interrupted");
                Termination::Interrupted
            }
        };

        self.ctx.ledger.unregister(&self.job_id, self.ctx.pid)?;
        tracing::info!(
            job_id = %self.job_id,
            %termination,
            attempts = state.attempts,
            failures = state.failures,
            "unregistered job"
        );

        Ok(SupervisionReport {
            termination,
            attempts: state.attempts,
            failures: state.failures,
            last_exit_status: state.last_exit_status,
        })
    }

    async fn run_loop(&self, state: &mut LoopState) -> Termination {
        loop {
            state.attempts += 1;
            tracing::info!(
                attempt = state.attempts,
                command = %r4e_core::redacted_line(&self.argv[..]),
                "starting attempt"
            );

            let status = self.run_attempt().await;
            state.last_exit_status = Some(status);

            if status == 0 {
                tracing::info!(attempt = state.attempts, "command exited successfully");
            } else {
                state.failures += 1;
                tracing::warn!(
                    attempt = state.attempts,
                    exit_status = status,
                    failures = state.failures,
                    "command failed"
                );
            }

            self.dispatch_notification(status).await;

            if status == 0 && self.config.exit_on_success {
                return Termination::Succeeded;
            }
            if self.retries_exhausted(state.failures) {
                tracing::warn!(
                    max_retries = self.config.max_retries,
                    "maximum retries reached, giving up"
                );
                return Termination::RetriesExhausted;
            }

            tracing::info!(delay_secs = self.config.delay.as_secs(), "waiting before restart");
            tokio::time::sleep(self.config.delay).await;
        }
    }

    /// The first run is not a retry, so a cap of N allows N + 1 attempts.
    /// Only `-1` is unlimited; other negative caps behave as zero.
    fn retries_exhausted(&self, failures: u64) -> bool {
        if self.config.max_retries == UNLIMITED_RETRIES {
            return false;
        }
        failures > u64::try_from(self.config.max_retries).unwrap_or(0)
    }

    /// Run one attempt and reduce it to an exit status.
    async fn run_attempt(&self) -> i32 {
        let Some((program, args)) = self.argv.split_first() else {
            return 1;
        };

        let mut child = match Command::new(program).args(args).kill_on_drop(true).spawn() {
            Ok(child) => child,
            Err(e) => {
                tracing::warn!(%program, error = %e, "failed to launch command");
                return launch_failure_status(&e);
            }
        };

        let waited = match self.config.timeout {
            Some(limit) => match tokio::time::timeout(limit, child.wait()).await {
                Ok(waited) => waited,
                Err(_) => {
                    tracing::warn!(timeout_secs = limit.as_secs(), "attempt timed out, killing");
                    if let Err(e) = child.kill().await {
                        tracing::warn!(error = %e, "failed to kill timed out command");
                    }
                    return TIMEOUT_EXIT_STATUS;
                }
            },
            None => child.wait().await,
        };

        match waited {
            Ok(status) => exit_status_code(status),
            Err(e) => {
                tracing::warn!(error = %e, "failed to wait for command");
                1
            }
        }
    }

    async fn dispatch_notification(&self, exit_status: i32) {
        if !self.config.notify_on.should_notify(exit_status) {
            return;
        }
        let notification = Notification::for_exit(&self.argv[..], exit_status);
        if let Err(e) = self.ctx.notifier.notify(&notification.title, &notification.message).await
        {
            tracing::warn!(title = %notification.title, error = %e, "notification send failed");
        }
    }
}

/// Shell conventions: 127 for not found, 126 for not executable.
fn launch_failure_status(err: &io::Error) -> i32 {
    match err.kind() {
        io::ErrorKind::NotFound => 127,
        io::ErrorKind::PermissionDenied => 126,
        _ => 1,
    }
}

fn exit_status_code(status: ExitStatus) -> i32 {
    match (status.code(), status.signal()) {
        (Some(code), _) => code,
        (None, Some(signal)) => 128 + signal,
        (None, None) => 1,
    }
}

#[cfg(test)]
#[path = "supervisor_tests.rs"]
mod tests;
