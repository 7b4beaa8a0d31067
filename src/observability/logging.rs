//! Diagnostics for a generation run.
//!
//! Progress lines (`Generating ...`) go to stdout and are not logged.
//! Everything else is a `tracing` event on stderr:
//!
//! - `warn`: a descriptor skipped for lack of a template label
//! - `info`: the run summary (pages written, descriptors skipped, index)
//! - `debug`: fragment loads, families, skipped image streams, absent
//!   source directories
//!
//! The default level is `warn`, so a plain run prints only the skips.
//! `-v` raises it one step per flag; `TEMPLATEDOC_LOG_LEVEL` replaces the
//! flags with a full filter directive.

use std::io::IsTerminal;

use tracing_subscriber::EnvFilter;

use crate::cli::args::ColorChoice;

/// Environment variable holding a filter directive that overrides `-v`.
pub const LOG_LEVEL_ENV: &str = "TEMPLATEDOC_LOG_LEVEL";

/// How diagnostics are written to stderr.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum LogFormat {
    /// One line per event, colored on a terminal.
    #[default]
    Human,
    /// One JSON object per event, for CI log collectors.
    Json,
}

/// Level directive for a count of `-v` flags. Saturates at `trace`.
#[must_use]
pub const fn verbosity_to_directive(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Whether human output gets ANSI colors. `NO_COLOR` turns off `auto`.
#[must_use]
pub fn ansi_enabled(color: ColorChoice) -> bool {
    match color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => {
            std::io::stderr().is_terminal() && std::env::var_os("NO_COLOR").is_none()
        }
    }
}

fn run_filter(verbosity: u8) -> EnvFilter {
    EnvFilter::try_from_env(LOG_LEVEL_ENV)
        .unwrap_or_else(|_| EnvFilter::new(verbosity_to_directive(verbosity)))
}

/// Installs the stderr subscriber for this run.
///
/// Event targets (module paths) are shown from `-vv` up. A second call is
/// a no-op.
pub fn init_logging(format: LogFormat, verbosity: u8, color: ColorChoice) {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(run_filter(verbosity))
        .with_target(verbosity >= 2)
        .with_writer(std::io::stderr);

    let _ = match format {
        LogFormat::Human => builder.with_ansi(ansi_enabled(color)).try_init(),
        LogFormat::Json => builder.json().try_init(),
    };
}
