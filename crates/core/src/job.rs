// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Job identity and ledger records.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// Unique identifier for one supervised job.
///
/// 128 random bits, hex-encoded. Stable for the lifetime of the supervising
/// process. Legacy ledger rows may carry an empty id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobId(String);

impl JobId {
    /// Generate a new random ID
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4().simple().to_string())
    }

    /// Create ID from existing string (for parsing)
    pub fn from_string(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true for legacy rows that were written without an ID.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for JobId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for JobId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for JobId {
    fn from(s: &str) -> Self {
        Self::from_string(s)
    }
}

impl From<String> for JobId {
    fn from(s: String) -> Self {
        Self::from_string(s)
    }
}

impl PartialEq<str> for JobId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for JobId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Liveness of a ledger row.
///
/// Derived on read by probing the PID. `Stale` is persisted once observed so
/// later reads agree until the row is removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum JobStatus {
    #[default]
    Running,
    Stale,
}

impl JobStatus {
    pub fn is_stale(&self) -> bool {
        matches!(self, JobStatus::Stale)
    }

    /// Parse the persisted column. Anything other than `STALE` reads as running
    /// and is re-probed.
    pub fn from_column(s: &str) -> Self {
        if s.trim() == "STALE" {
            JobStatus::Stale
        } else {
            JobStatus::Running
        }
    }
}

crate::simple_display! {
    JobStatus {
        Running => "RUNNING",
        Stale => "STALE",
    }
}

/// One row of the state ledger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobRecord {
    pub job_id: JobId,
    /// Human label. Held in memory only; the ledger file has no column for it.
    pub name: Option<String>,
    /// PID of the supervising process, not of the child command.
    pub pid: i32,
    pub command: String,
    /// Space-joined, redacted argument list.
    pub args: String,
    pub start_time: DateTime<Local>,
    pub status: JobStatus,
}

impl JobRecord {
    /// Build a fresh running record. `args` must already be redacted.
    pub fn new(
        job_id: JobId,
        name: Option<String>,
        pid: i32,
        command: impl Into<String>,
        args: impl Into<String>,
    ) -> Self {
        Self {
            job_id,
            name,
            pid,
            command: command.into(),
            args: args.into(),
            start_time: Local::now(),
            status: JobStatus::Running,
        }
    }
}

#[cfg(test)]
#[path = "job_tests.rs"]
mod tests;
