//! depdiff - Semantic diff of Gradle dependency-tree reports
//!
//! Reads the `gradle dependencies` output of two builds and reports which
//! artifacts were added, removed or upgraded between them.

use clap::Parser;
use depdiff::cli::CliArgs;
use depdiff::logging;
use depdiff::orchestrator::{read_tree, Orchestrator};
use depdiff::output::OutputConfig;
use std::io::{self, IsTerminal, Write};
use std::process::ExitCode;
use tracing::debug;

fn main() -> ExitCode {
    let args = CliArgs::parse();
    logging::init(args.verbose);

    // Run the main logic and handle errors
    match run(args) {
        Ok(exit_code) => exit_code,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Main application logic
fn run(args: CliArgs) -> anyhow::Result<ExitCode> {
    debug!(old = %args.old.display(), new = %args.new.display(), "reading dependency trees");
    let old = read_tree(&args.old)?;
    let new = read_tree(&args.new)?;

    let color = !args.no_color && io::stdout().is_terminal();
    let output_config =
        OutputConfig::from_cli(&args.output_format, &args.collapse_prefixes(), color)?;
    let orchestrator = Orchestrator::new(output_config, args.side_effects);

    let mut stdout = io::stdout().lock();
    orchestrator.write_report(&old, &new, &mut stdout)?;
    stdout.flush()?;

    Ok(ExitCode::SUCCESS)
}
