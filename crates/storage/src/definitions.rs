// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Store of persisted job definitions (`jobs.json`).
//!
//! A JSON array, appended to on `--persist` and read in full on `--restore`.
//! Entries are never edited or removed by the tool itself.

use crate::atomic::write_atomic;
use parking_lot::Mutex;
use r4e_core::JobDefinition;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Definitions may embed channel credentials.
pub const DEFINITIONS_FILE_MODE: u32 = 0o600;

/// Errors from the definition store
#[derive(Debug, Error)]
pub enum DefinitionStoreError {
    #[error("failed to read job definitions {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse job definitions {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to serialize job definitions: {0}")]
    Serialize(#[source] serde_json::Error),
    #[error("failed to write job definitions {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug)]
pub struct DefinitionStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl DefinitionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into(), lock: Mutex::new(()) }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append `definition` to the store.
    ///
    /// Fails without writing if the existing file does not parse, so a
    /// corrupt store is never silently replaced.
    pub fn save(&self, definition: &JobDefinition) -> Result<(), DefinitionStoreError> {
        let _guard = self.lock.lock();
        let mut definitions = self.load_unlocked()?.unwrap_or_default();
        definitions.push(definition.clone());

        let data =
            serde_json::to_vec_pretty(&definitions).map_err(DefinitionStoreError::Serialize)?;
        write_atomic(&self.path, &data, DEFINITIONS_FILE_MODE)
            .map_err(|source| DefinitionStoreError::Write { path: self.path.clone(), source })?;

        tracing::info!(
            path = %self.path.display(),
            count = definitions.len(),
            "saved job definition"
        );
        Ok(())
    }

    /// Load every stored definition.
    ///
    /// `Ok(None)` when the file does not exist; an empty file is an empty
    /// list. Any parse error fails the whole load.
    pub fn load(&self) -> Result<Option<Vec<JobDefinition>>, DefinitionStoreError> {
        let _guard = self.lock.lock();
        self.load_unlocked()
    }

    fn load_unlocked(&self) -> Result<Option<Vec<JobDefinition>>, DefinitionStoreError> {
        let data = match std::fs::read(&self.path) {
            Ok(data) => data,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(DefinitionStoreError::Read { path: self.path.clone(), source })
            }
        };
        if data.iter().all(u8::is_ascii_whitespace) {
            return Ok(Some(Vec::new()));
        }
        serde_json::from_slice(&data)
            .map(Some)
            .map_err(|source| DefinitionStoreError::Parse { path: self.path.clone(), source })
    }
}

#[cfg(test)]
#[path = "definitions_tests.rs"]
mod tests;
