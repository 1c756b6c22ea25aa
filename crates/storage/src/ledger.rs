// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! State ledger: the file listing currently supervised jobs.
//!
//! The ledger is observational. Supervisors add a row when they start and
//! remove it when they stop; `--list` and `--ps` read it. Every mutation is a
//! read-modify-write of the whole file under an in-process mutex, finished
//! with an atomic rename. Separate processes are not locked against each
//! other, so concurrent registrations from different processes are
//! last-writer-wins.
//!
//! Liveness is re-derived on every read: a row whose PID no longer exists is
//! reported `STALE`. The correction is written back only when some other
//! mutation rewrites the file.

use crate::atomic::write_atomic;
use crate::process::is_process_alive;
use chrono::{DateTime, Local, NaiveDateTime};
use parking_lot::Mutex;
use r4e_core::{redacted_line, JobId, JobRecord, JobStatus};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const LEDGER_HEADER: &str = "Time \t\t\t | Job-ID \t\t | PID \t\t | Command \t | Args \t\t | Status";
pub const LEDGER_FILE_MODE: u32 = 0o644;

const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
const SEPARATOR: char = '|';
const COLUMNS: usize = 6;

/// Errors from ledger operations
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("failed to read ledger {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write ledger {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Handle to one ledger file.
///
/// Share one `Ledger` (behind an `Arc`) per process; its mutex serializes all
/// operations issued from that process.
#[derive(Debug)]
pub struct Ledger {
    path: PathBuf,
    lock: Mutex<()>,
}

impl Ledger {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into(), lock: Mutex::new(()) }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Add a running record for a supervisor.
    ///
    /// `args` is the live argument list; it is redacted before it is stored.
    /// Control characters in `command` and `args` are flattened to spaces so
    /// the row stays on one line. A row with the same job ID is replaced,
    /// keeping IDs unique.
    pub fn register<S: AsRef<str>>(
        &self,
        job_id: &JobId,
        name: Option<String>,
        pid: i32,
        command: &str,
        args: &[S],
    ) -> Result<JobRecord, LedgerError> {
        let _guard = self.lock.lock();
        let mut records = self.read_unlocked()?;

        let record = JobRecord::new(
            job_id.clone(),
            name,
            pid,
            single_line(command),
            single_line(&redacted_line(args)),
        );
        records.retain(|r| r.job_id != *job_id);
        records.push(record.clone());

        self.write_unlocked(&records)?;
        tracing::debug!(%job_id, pid, command, "registered job in ledger");
        Ok(record)
    }

    /// Remove the row for `job_id`.
    ///
    /// An empty ID falls back to removing rows by `pid`, for rows written
    /// before job IDs existed. Returns the number of rows removed.
    pub fn unregister(&self, job_id: &JobId, pid: i32) -> Result<usize, LedgerError> {
        if job_id.is_empty() {
            return self.unregister_by_pid(pid);
        }
        self.remove_where(|r| r.job_id == *job_id)
    }

    /// Remove every row owned by `pid`. Compatibility path for legacy rows.
    pub fn unregister_by_pid(&self, pid: i32) -> Result<usize, LedgerError> {
        self.remove_where(|r| r.pid == pid)
    }

    /// Read all rows with liveness reconciled.
    pub fn read(&self) -> Result<Vec<JobRecord>, LedgerError> {
        let _guard = self.lock.lock();
        self.read_unlocked()
    }

    /// Render the current rows for a one-shot listing.
    pub fn list_once(&self) -> Result<String, LedgerError> {
        let records = self.read()?;
        if records.is_empty() {
            return Ok("No running jobs found.\n".to_string());
        }
        Ok(render_records(&records))
    }

    fn remove_where(&self, pred: impl Fn(&JobRecord) -> bool) -> Result<usize, LedgerError> {
        let _guard = self.lock.lock();
        let mut records = match std::fs::metadata(&self.path) {
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(0),
            _ => self.read_unlocked()?,
        };

        let before = records.len();
        records.retain(|r| !pred(r));
        let removed = before - records.len();

        self.write_unlocked(&records)?;
        Ok(removed)
    }

    fn read_unlocked(&self) -> Result<Vec<JobRecord>, LedgerError> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(source) => return Err(LedgerError::Read { path: self.path.clone(), source }),
        };
        let mut records = parse_ledger(&content);
        reconcile(&mut records);
        Ok(records)
    }

    fn write_unlocked(&self, records: &[JobRecord]) -> Result<(), LedgerError> {
        let content = format_ledger(records);
        write_atomic(&self.path, content.as_bytes(), LEDGER_FILE_MODE)
            .map_err(|source| LedgerError::Write { path: self.path.clone(), source })
    }
}

/// Mark rows whose supervisor is gone as stale. Rows already stale are not
/// probed again.
fn reconcile(records: &mut [JobRecord]) {
    for record in records.iter_mut().filter(|r| !r.status.is_stale()) {
        if !is_process_alive(record.pid) {
            tracing::debug!(job_id = %record.job_id, pid = record.pid, "ledger row is stale");
            record.status = JobStatus::Stale;
        }
    }
}

fn single_line(s: &str) -> String {
    s.chars().map(|c| if c.is_control() { ' ' } else { c }).collect()
}

fn format_row(record: &JobRecord) -> String {
    format!(
        "{} \t | {} \t | {} \t | {} \t\t | {} \t\t | {}",
        record.start_time.format(TIME_FORMAT),
        record.job_id,
        record.pid,
        record.command,
        record.args,
        record.status,
    )
}

fn format_ledger(records: &[JobRecord]) -> String {
    let mut out = String::with_capacity(LEDGER_HEADER.len() + 1 + records.len() * 96);
    out.push_str(LEDGER_HEADER);
    out.push('\n');
    for record in records {
        out.push_str(&format_row(record));
        out.push('\n');
    }
    out
}

/// Render rows for display: header, rule, one line per row.
pub fn render_records(records: &[JobRecord]) -> String {
    let mut out = String::new();
    out.push_str(LEDGER_HEADER);
    out.push('\n');
    out.push_str(&"-".repeat(120));
    out.push('\n');
    for record in records {
        out.push_str(&format_row(record));
        out.push('\n');
    }
    out
}

fn parse_time(s: &str) -> DateTime<Local> {
    NaiveDateTime::parse_from_str(s, TIME_FORMAT)
        .ok()
        .and_then(|t| t.and_local_timezone(Local).earliest())
        .unwrap_or_else(Local::now)
}

/// Parse one data line. Lines with fewer than six columns are rejected.
///
/// The first four columns and the last are positional; anything in between
/// is the args column, which may itself contain the separator.
fn parse_row(line: &str) -> Option<JobRecord> {
    let parts: Vec<&str> = line.split(SEPARATOR).collect();
    if parts.len() < COLUMNS {
        return None;
    }
    let last = parts.len() - 1;
    let args = parts[4..last].join("|");

    Some(JobRecord {
        job_id: JobId::from_string(parts[1].trim()),
        name: None,
        pid: parts[2].trim().parse().unwrap_or(0),
        command: parts[3].trim().to_string(),
        args: args.trim().to_string(),
        start_time: parse_time(parts[0].trim()),
        status: JobStatus::from_column(parts[last]),
    })
}

fn parse_ledger(content: &str) -> Vec<JobRecord> {
    content
        .lines()
        .enumerate()
        .filter(|(i, line)| !(*i == 0 && line.trim_start().starts_with("Time")))
        .map(|(_, line)| line.trim())
        .filter(|line| !line.is_empty())
        .filter_map(|line| {
            let row = parse_row(line);
            if row.is_none() {
                tracing::debug!(line, "skipping malformed ledger line");
            }
            row
        })
        .collect()
}

#[cfg(test)]
#[path = "ledger_tests.rs"]
mod tests;
