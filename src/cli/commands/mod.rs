//! CLI command dispatch.

pub mod generate;

use crate::cli::args::Cli;
use crate::error::TemplateDocError;

/// Runs a parsed CLI invocation.
///
/// # Errors
///
/// Returns an error if settings cannot be loaded or generation fails.
pub fn dispatch(cli: &Cli) -> Result<(), TemplateDocError> {
    generate::run(cli)?;
    Ok(())
}
