// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `--list` and `--ps`.

use crate::env::StatePaths;
use anyhow::Result;
use r4e_storage::Ledger;
use std::io::Write;
use std::time::Duration;

const WATCH_INTERVAL: Duration = Duration::from_secs(3);
const CLEAR_SCREEN: &str = "\x1b[H\x1b[2J";

pub fn once(paths: &StatePaths) -> Result<()> {
    let ledger = Ledger::new(paths.ledger());
    print!("{}", ledger.list_once()?);
    Ok(())
}

/// Redraw the listing until Ctrl-C.
pub async fn watch(paths: &StatePaths) -> Result<()> {
    let ledger = Ledger::new(paths.ledger());
    let mut ticker = tokio::time::interval(WATCH_INTERVAL);

    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let listing = ledger.list_once()?;
                print!("{CLEAR_SCREEN}{listing}\nRefreshing every {}s, Ctrl-C to exit\n", WATCH_INTERVAL.as_secs());
                let _ = std::io::stdout().flush();
            }
            _ = &mut ctrl_c => break,
        }
    }
    Ok(())
}
