//! Output formatting for dependency diffs
//!
//! This module provides:
//! - Plain text output for human-readable display
//! - JSON output for machine processing

mod json;
mod text;

pub use json::JsonFormatter;
pub use text::TextFormatter;

use crate::diff::CollapseGroups;
use crate::error::ConfigError;
use crate::orchestrator::Report;
use std::fmt;
use std::io::Write;
use std::str::FromStr;

/// Heading of the side-effects section in plain output
pub const SIDE_EFFECTS_HEADING: &str = "Upgrade Side Effects";

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human-readable grouped report
    #[default]
    Plain,
    /// JSON document for machine processing
    Json,
}

impl OutputFormat {
    /// Returns the name accepted on the command line
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Plain => "plain",
            OutputFormat::Json => "json",
        }
    }
}

impl FromStr for OutputFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "plain" => Ok(OutputFormat::Plain),
            "json" => Ok(OutputFormat::Json),
            other => Err(ConfigError::unknown_output_format(other)),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Configuration for output formatting
#[derive(Debug, Clone, Default)]
pub struct OutputConfig {
    /// Output format (plain, json)
    pub format: OutputFormat,
    /// Group prefixes to collapse same-version artifacts under
    pub collapse: CollapseGroups,
    /// Whether to use colors (plain output only)
    pub color: bool,
}

impl OutputConfig {
    /// Create a new output configuration without collapsing or colors
    pub fn new(format: OutputFormat) -> Self {
        Self {
            format,
            collapse: CollapseGroups::default(),
            color: false,
        }
    }

    /// Set the collapse groups
    pub fn with_collapse(mut self, collapse: CollapseGroups) -> Self {
        self.collapse = collapse;
        self
    }

    /// Enable or disable colors
    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    /// Create configuration from CLI arguments
    ///
    /// Fails if `format` is not one of the supported output formats.
    pub fn from_cli<S: AsRef<str>>(
        format: &str,
        collapse: &[S],
        color: bool,
    ) -> Result<Self, ConfigError> {
        Ok(Self {
            format: format.parse()?,
            collapse: CollapseGroups::new(collapse),
            color,
        })
    }
}

/// Trait for output formatters
pub trait OutputFormatter {
    /// Format and write a report
    fn format(&self, report: &Report, writer: &mut dyn Write) -> std::io::Result<()>;
}

/// Create an output formatter based on configuration
pub fn create_formatter(config: OutputConfig) -> Box<dyn OutputFormatter> {
    match config.format {
        OutputFormat::Plain => Box::new(TextFormatter::with_color(config.collapse, config.color)),
        OutputFormat::Json => Box::new(JsonFormatter::new(config.collapse)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_format_default() {
        assert_eq!(OutputFormat::default(), OutputFormat::Plain);
    }

    #[test]
    fn test_output_format_parse() {
        assert_eq!("plain".parse::<OutputFormat>().unwrap(), OutputFormat::Plain);
        assert_eq!("json".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
    }

    #[test]
    fn test_output_format_parse_is_case_sensitive() {
        assert!("JSON".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_output_format_unknown() {
        let err = "yaml".parse::<OutputFormat>().unwrap_err();
        assert_eq!(err, ConfigError::unknown_output_format("yaml"));
    }

    #[test]
    fn test_output_format_display() {
        assert_eq!(OutputFormat::Json.to_string(), "json");
        assert_eq!(OutputFormat::Plain.to_string(), "plain");
    }

    #[test]
    fn test_output_config_default() {
        let config = OutputConfig::default();
        assert_eq!(config.format, OutputFormat::Plain);
        assert!(config.collapse.is_empty());
        assert!(!config.color);
    }

    #[test]
    fn test_output_config_from_cli() {
        let config = OutputConfig::from_cli("json", &["org.example", ""], true).unwrap();
        assert_eq!(config.format, OutputFormat::Json);
        assert_eq!(config.collapse.prefixes(), &["org.example"]);
        assert!(config.color);
    }

    #[test]
    fn test_output_config_from_cli_rejects_unknown_format() {
        let collapse: [&str; 0] = [];
        let err = OutputConfig::from_cli("xml", &collapse, false).unwrap_err();
        assert!(err.to_string().contains("'xml'"));
    }
}
