// Copyright 2022 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Logging setup shared by the `chessington` binaries.

use tracing_subscriber::{filter::LevelFilter, EnvFilter, FmtSubscriber};

/// Environment variable holding `tracing` filter directives. When set and valid, it takes precedence over
/// `--verbose`.
pub const LOG_ENV_VAR: &str = "CHESSINGTON_LOG";

/// Builds the filter for a binary: the directives in [`LOG_ENV_VAR`] if present, otherwise WARN, or DEBUG when
/// `verbose` is set.
pub fn log_filter(verbose: bool) -> EnvFilter {
    filter_from(std::env::var(LOG_ENV_VAR).ok(), verbose)
}

/// Installs a stderr `FmtSubscriber` using [`log_filter`] as the global default.
pub fn init(verbose: bool) -> anyhow::Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(log_filter(verbose))
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

fn default_level(verbose: bool) -> LevelFilter {
    if verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::WARN
    }
}

fn filter_from(directives: Option<String>, verbose: bool) -> EnvFilter {
    let fallback = || EnvFilter::new(default_level(verbose).to_string());
    match directives {
        Some(directives) if !directives.trim().is_empty() => {
            EnvFilter::try_new(directives).unwrap_or_else(|_| fallback())
        }
        _ => fallback(),
    }
}
