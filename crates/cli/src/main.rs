// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! run4ever: run a command forever, restarting it whenever it exits

mod args;
mod commands;
mod config;
mod env;
mod exit_error;
mod logging;

use anyhow::Result;
use args::Cli;
use clap::Parser;
use env::StatePaths;
use exit_error::ExitError;
use r4e_adapters::DetachedSpawner;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if let Err(err) = run(cli).await {
        if let Some(exit) = err.downcast_ref::<ExitError>() {
            if !exit.message.is_empty() {
                eprintln!("Error: {}", exit.message);
            }
            std::process::exit(exit.code);
        }
        eprintln!("Error: {err:#}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let paths = StatePaths::resolve()?;
    paths.ensure()?;

    if cli.restore {
        return commands::restore::handle(&paths, &DetachedSpawner);
    }
    if cli.list {
        return commands::list::once(&paths);
    }
    if cli.ps {
        return commands::list::watch(&paths).await;
    }
    if cli.command.is_empty() {
        return Err(ExitError::new(1, "No command provided").into());
    }

    if cli.detach() {
        return commands::background::handle(&cli, &DetachedSpawner);
    }

    let notify = config::resolve(&env::config_files(), cli.notify_flags());
    let def = cli.definition(notify);
    commands::run::handle(&paths, def, cli.name.clone(), cli.persist).await
}
