// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Masking of secret values in argument vectors.
//!
//! Redaction runs before anything is written to the ledger or composed into
//! a notification. The argv handed to the child is never redacted.

/// Replacement text for a masked value.
pub const MASK: &str = "******";

/// Flags whose value is treated as a secret.
pub const SECRET_FLAGS: &[&str] = &[
    "-password",
    "--password",
    "-p",
    "--pass",
    "--secret",
    "--key",
    "--token",
    "--db-pass",
    "--api-key",
    "--api-token",
    "--auth",
    "--auth-token",
    "--auth-key",
    "--telegram-token",
    "--slack-token",
    "--email-pass",
    "--email-token",
    "--email-password",
];

fn is_secret_flag(flag: &str) -> bool {
    SECRET_FLAGS.contains(&flag)
}

/// Mask secret values in `args`.
///
/// `--flag value` keeps the flag and masks the following value.
/// `--flag=value` keeps `--flag=` and masks only the value.
/// A bare secret flag at the end of the vector is kept as is.
pub fn redact_args<S: AsRef<str>>(args: &[S]) -> Vec<String> {
    let mut out = Vec::with_capacity(args.len());
    let mut iter = args.iter().map(AsRef::as_ref).peekable();

    while let Some(arg) = iter.next() {
        if let Some((flag, _)) = arg.split_once('=') {
            if is_secret_flag(flag) {
                out.push(format!("{flag}={MASK}"));
                continue;
            }
        } else if is_secret_flag(arg) && iter.peek().is_some() {
            out.push(arg.to_string());
            out.push(MASK.to_string());
            iter.next();
            continue;
        }
        out.push(arg.to_string());
    }

    out
}

/// Redact and join with single spaces, the form stored in the ledger.
pub fn redacted_line<S: AsRef<str>>(args: &[S]) -> String {
    redact_args(args).join(" ")
}

#[cfg(test)]
#[path = "redact_tests.rs"]
mod tests;
