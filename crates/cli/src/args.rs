// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Command-line surface.

use crate::config::NotifySettings;
use clap::Parser;
use r4e_core::{JobDefinition, DEFAULT_DELAY_SECS, UNLIMITED_RETRIES};

const VERSION: &str = concat!(env!("CARGO_PKG_VERSION"), "+", env!("BUILD_GIT_HASH"));

#[derive(Parser, Debug)]
#[command(
    name = "run4ever",
    version = VERSION,
    about = "Run a command forever, restarting it whenever it exits",
    after_help = "Examples:\n  run4ever -d 5 -m 3 ./backup.sh\n  run4ever --exit-on-success -- curl -f https://example.com\n  run4ever -g --persist --name web -- python -m http.server"
)]
pub struct Cli {
    /// Seconds to wait between attempts
    #[arg(short = 'd', long, default_value_t = DEFAULT_DELAY_SECS)]
    pub delay: u64,

    /// Retry cap; -1 retries forever
    #[arg(
        short = 'm',
        long,
        default_value_t = UNLIMITED_RETRIES,
        allow_negative_numbers = true,
        value_parser = clap::value_parser!(i64).range(UNLIMITED_RETRIES..)
    )]
    pub max_retries: i64,

    /// Per-attempt timeout in seconds; 0 disables it
    #[arg(short = 't', long, default_value_t = 0)]
    pub timeout: u64,

    /// Stop after the first successful run
    #[arg(long)]
    pub exit_on_success: bool,

    /// When to notify: off, success, failure, always
    #[arg(long, value_name = "WHEN")]
    pub notify_on: Option<String>,

    /// Notification channel: desktop, telegram, slack, email
    #[arg(long, value_name = "METHOD")]
    pub notify_method: Option<String>,

    #[arg(long)]
    pub telegram_token: Option<String>,

    #[arg(long)]
    pub telegram_chat_id: Option<String>,

    /// Telegram Bot API base URL
    #[arg(long, value_name = "URL")]
    pub telegram_custom_api: Option<String>,

    #[arg(long, value_name = "URL")]
    pub slack_webhook_url: Option<String>,

    #[arg(long)]
    pub slack_channel: Option<String>,

    #[arg(long)]
    pub email_to: Option<String>,

    #[arg(long)]
    pub email_from: Option<String>,

    #[arg(long)]
    pub email_password: Option<String>,

    /// SMTP relay host
    #[arg(long, value_name = "HOST")]
    pub email_smtp: Option<String>,

    #[arg(long)]
    pub email_port: Option<u16>,

    /// Label shown for this job
    #[arg(long)]
    pub name: Option<String>,

    /// Run detached in the background
    #[arg(short = 'g', long)]
    pub background: bool,

    /// Same as --background
    #[arg(short = 'D', long)]
    pub daemon: bool,

    /// Save this job so --restore can relaunch it
    #[arg(long)]
    pub persist: bool,

    /// Relaunch every saved job in the background
    #[arg(long)]
    pub restore: bool,

    /// List running jobs
    #[arg(short = 'l', long)]
    pub list: bool,

    /// Watch running jobs, refreshing every 3 seconds
    #[arg(long)]
    pub ps: bool,

    #[arg(short = 'v', long)]
    pub verbose: bool,

    /// Command to run, followed by its arguments
    #[arg(trailing_var_arg = true, allow_hyphen_values = true, value_name = "COMMAND")]
    pub command: Vec<String>,
}

impl Cli {
    pub fn detach(&self) -> bool {
        self.background || self.daemon
    }

    /// The notification layer given on the command line.
    pub fn notify_flags(&self) -> NotifySettings {
        NotifySettings {
            notify_on: self.notify_on.clone(),
            notify_method: self.notify_method.clone(),
            telegram_token: self.telegram_token.clone(),
            telegram_chat_id: self.telegram_chat_id.clone(),
            telegram_custom_api: self.telegram_custom_api.clone(),
            slack_webhook_url: self.slack_webhook_url.clone(),
            slack_channel: self.slack_channel.clone(),
            email_to: self.email_to.clone(),
            email_from: self.email_from.clone(),
            email_password: self.email_password.clone(),
            email_smtp: self.email_smtp.clone(),
            email_port: self.email_port,
        }
    }

    /// Build the job from flags plus fully resolved notification settings.
    pub fn definition(&self, notify: NotifySettings) -> JobDefinition {
        let mut def = JobDefinition::new(self.command.clone());
        def.delay = self.delay;
        def.max_retries = self.max_retries;
        def.timeout = self.timeout;
        def.exit_on_success = self.exit_on_success;
        notify.apply(&mut def);
        def
    }

    /// Flags for the detached copy of this invocation.
    ///
    /// Only what was typed is forwarded. Settings from config files and the
    /// environment are resolved again by the detached copy, which keeps
    /// their credentials out of its argv.
    pub fn background_args(&self) -> Vec<String> {
        let mut args = Vec::new();
        if self.verbose {
            args.push("--verbose".to_string());
        }
        if self.persist {
            args.push("--persist".to_string());
        }
        if let Some(name) = &self.name {
            args.push("--name".to_string());
            args.push(name.clone());
        }

        args.extend(["-d".to_string(), self.delay.to_string()]);
        if self.max_retries != UNLIMITED_RETRIES {
            args.extend(["-m".to_string(), self.max_retries.to_string()]);
        }
        if self.timeout > 0 {
            args.extend(["-t".to_string(), self.timeout.to_string()]);
        }
        if self.exit_on_success {
            args.push("--exit-on-success".to_string());
        }
        args.extend(self.notify_flags().to_cli_args());

        args.push("--".to_string());
        args.extend(self.command.iter().cloned());
        args
    }
}

#[cfg(test)]
#[path = "args_tests.rs"]
mod tests;
