//! CLI argument parsing module for depdiff

use clap::{ArgAction, Parser};
use std::path::PathBuf;

/// Semantic diff of two Gradle dependency-tree reports
#[derive(Parser, Debug, Clone)]
#[command(
    name = "depdiff",
    version,
    about = "Semantic diff of two Gradle dependency-tree reports"
)]
pub struct CliArgs {
    /// Dependency report of the baseline build
    #[arg(short, long, value_name = "FILE")]
    pub old: PathBuf,

    /// Dependency report of the changed build
    #[arg(short, long, value_name = "FILE")]
    pub new: PathBuf,

    // Output options
    /// Output format: plain or json
    #[arg(short = 'f', long, default_value = "plain")]
    pub output_format: String,

    /// Also report versions that changed only transitively
    #[arg(short, long)]
    pub side_effects: bool,

    /// Collapse same-version artifacts under a group prefix
    /// (can be specified multiple times, or as a space-separated list)
    #[arg(short, long, value_name = "PREFIX", action = ArgAction::Append)]
    pub collapse: Vec<String>,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Enable debug logging on stderr
    #[arg(long)]
    pub verbose: bool,
}

impl CliArgs {
    /// All collapse prefixes, with space-separated values split apart
    pub fn collapse_prefixes(&self) -> Vec<String> {
        self.collapse
            .iter()
            .flat_map(|value| value.split_whitespace())
            .map(str::to_string)
            .collect()
    }
}
