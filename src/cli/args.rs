//! CLI argument definitions
//!
//! Clap derive structs for `templatedoc` command-line parsing.

use std::path::PathBuf;

use clap::{ArgAction, Parser, ValueEnum};

use crate::observability::LogFormat;

// ============================================================================
// Root CLI
// ============================================================================

/// Generate AsciiDoc pages from application-template descriptors.
///
/// With no paths, every descriptor in the source directories is
/// documented and the index page is written. With paths, only those
/// descriptors are documented.
#[derive(Parser, Debug)]
#[command(name = "templatedoc", author, version, about)]
pub struct Cli {
    /// Descriptor files to document, relative to the root.
    #[arg(value_name = "PATH")]
    pub paths: Vec<PathBuf>,

    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Do not print progress lines.
    #[arg(short, long)]
    pub quiet: bool,

    /// Color output control.
    #[arg(long, default_value = "auto", env = "TEMPLATEDOC_COLOR")]
    pub color: ColorChoice,

    /// Log output format.
    #[arg(long, default_value = "human")]
    pub log_format: LogFormat,

    /// YAML settings file overlaid on the built-in settings.
    #[arg(short, long, env = "TEMPLATEDOC_CONFIG")]
    pub config: Option<PathBuf>,

    /// Directory holding the sources, fragments, and output.
    #[arg(long, default_value = ".", env = "TEMPLATEDOC_ROOT")]
    pub root: PathBuf,

    /// Output root, overriding the settings file.
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Color output choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ColorChoice {
    /// Auto-detect terminal support.
    #[default]
    Auto,
    /// Always use color.
    Always,
    /// Never use color.
    Never,
}
