//! `templatedoc` - AsciiDoc documentation for application templates

use clap::Parser;

use templatedoc::cli::args::Cli;
use templatedoc::cli::commands;
use templatedoc::error::ExitCode;
use templatedoc::observability::init_logging;

fn main() {
    let cli = Cli::parse();

    init_logging(cli.log_format, cli.verbose, cli.color);

    match commands::dispatch(&cli) {
        Ok(()) => std::process::exit(ExitCode::SUCCESS),
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(e.exit_code());
        }
    }
}
