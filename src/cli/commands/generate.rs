//! Page generation command.

use tracing::debug;

use crate::cli::args::Cli;
use crate::config::Settings;
use crate::docgen::{Generator, RunSummary};
use crate::error::TemplateDocError;

/// Generates pages for the requested descriptors, or for every source
/// directory plus the index when none are named.
///
/// # Errors
///
/// Returns an error if settings cannot be loaded or generation fails.
pub fn run(cli: &Cli) -> Result<RunSummary, TemplateDocError> {
    let settings = Settings::load(cli.config.as_deref())?;
    debug!(
        root = %cli.root.display(),
        config = ?cli.config,
        sources = ?settings.source_dirs,
        "settings loaded"
    );

    let generator = Generator::new(&cli.root, settings, cli.output.clone(), cli.quiet);
    if cli.paths.is_empty() {
        generator.generate_all()
    } else {
        generator.generate_paths(&cli.paths)
    }
}
