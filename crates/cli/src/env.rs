// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment access for state and config locations.

use anyhow::{Context, Result};
use std::path::PathBuf;

pub const STATE_DIR_ENV: &str = "RUN4EVER_STATE_DIR";
pub const LOG_ENV: &str = "RUN4EVER_LOG";

const LEDGER_FILE: &str = "run4ever.state";
const JOBS_FILE: &str = "jobs.json";
const SYSTEM_CONFIG: &str = "/etc/run4ever/config.toml";

/// Files under the state directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatePaths {
    pub dir: PathBuf,
}

impl StatePaths {
    /// Resolve state directory: RUN4EVER_STATE_DIR > ~/.run4ever
    pub fn resolve() -> Result<Self> {
        if let Some(dir) = std::env::var_os(STATE_DIR_ENV).filter(|v| !v.is_empty()) {
            return Ok(Self { dir: PathBuf::from(dir) });
        }
        let home = dirs::home_dir().context("cannot resolve home directory")?;
        Ok(Self { dir: home.join(".run4ever") })
    }

    pub fn ensure(&self) -> Result<()> {
        std::fs::create_dir_all(&self.dir)
            .with_context(|| format!("failed to create {}", self.dir.display()))
    }

    pub fn ledger(&self) -> PathBuf {
        self.dir.join(LEDGER_FILE)
    }

    pub fn jobs(&self) -> PathBuf {
        self.dir.join(JOBS_FILE)
    }
}

/// Config files, lowest precedence first.
pub fn config_files() -> Vec<PathBuf> {
    let mut files = vec![PathBuf::from(SYSTEM_CONFIG)];
    if let Some(user) = user_config_dir() {
        files.push(user.join("run4ever").join("config.toml"));
    }
    files
}

/// $XDG_CONFIG_HOME, else ~/.config
fn user_config_dir() -> Option<PathBuf> {
    if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME").filter(|v| !v.is_empty()) {
        return Some(PathBuf::from(xdg));
    }
    dirs::home_dir().map(|home| home.join(".config"))
}

#[cfg(test)]
#[path = "env_tests.rs"]
mod tests;
