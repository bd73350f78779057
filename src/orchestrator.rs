//! Report orchestration
//!
//! This module coordinates the whole pipeline for one pair of trees:
//! parse → diff → (side effects) → collapse → format.

use crate::diff::{diff_sets, side_effects_between};
use crate::domain::{SideEffect, VersionDifferences};
use crate::error::{AppError, IoError, ParseError, Snapshot};
use crate::output::{create_formatter, OutputConfig};
use crate::parser::parse_tree;
use std::io::Write;
use std::path::Path;
use tracing::debug;

/// Everything a formatter needs to render one diff
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Report {
    /// Additions, removals and upgrades
    pub differences: VersionDifferences,
    /// Side effects, present only when requested
    pub side_effects: Option<Vec<SideEffect>>,
}

impl Report {
    /// Returns the side effects to show, if any were requested and found
    pub fn visible_side_effects(&self) -> Option<&[SideEffect]> {
        self.side_effects
            .as_deref()
            .filter(|effects| !effects.is_empty())
    }
}

/// Runs the diff pipeline with a fixed configuration
pub struct Orchestrator {
    /// Output configuration (format, collapse groups, colors)
    output: OutputConfig,
    /// Whether to analyze upgrade side effects
    side_effects: bool,
}

impl Orchestrator {
    /// Create a new orchestrator
    pub fn new(output: OutputConfig, side_effects: bool) -> Self {
        Self {
            output,
            side_effects,
        }
    }

    /// Diff two raw dependency reports
    pub fn analyze(&self, old: &str, new: &str) -> Result<Report, ParseError> {
        let old_tree = parse_tree(old).map_err(|e| e.in_snapshot(Snapshot::Old))?;
        let new_tree = parse_tree(new).map_err(|e| e.in_snapshot(Snapshot::New))?;

        let differences = diff_sets(&old_tree.dependency_set(), &new_tree.dependency_set());
        let side_effects = self
            .side_effects
            .then(|| side_effects_between(&old_tree, &new_tree, &differences));

        debug!(
            changes = differences.total_changes(),
            side_effects = side_effects.as_ref().map_or(0, Vec::len),
            "analyzed dependency trees"
        );

        Ok(Report {
            differences,
            side_effects,
        })
    }

    /// Diff two raw dependency reports and write the formatted result
    pub fn write_report(
        &self,
        old: &str,
        new: &str,
        writer: &mut dyn Write,
    ) -> Result<(), AppError> {
        let report = self.analyze(old, new)?;
        let formatter = create_formatter(self.output.clone());
        formatter
            .format(&report, writer)
            .map_err(IoError::write_failed)?;
        Ok(())
    }

    /// Diff two raw dependency reports into a formatted string
    pub fn render(&self, old: &str, new: &str) -> Result<String, AppError> {
        let mut buffer = Vec::new();
        self.write_report(old, new, &mut buffer)?;
        Ok(String::from_utf8_lossy(&buffer).into_owned())
    }
}

/// Renders a diff report in one call
///
/// `format` must be `"plain"` or `"json"`; anything else is a configuration
/// error. Empty collapse prefixes are ignored.
pub fn render_report<S: AsRef<str>>(
    old: &str,
    new: &str,
    collapse: &[S],
    side_effects: bool,
    format: &str,
) -> Result<String, AppError> {
    let output = OutputConfig::from_cli(format, collapse, false)?;
    Orchestrator::new(output, side_effects).render(old, new)
}

/// Reads a dependency report from disk
pub fn read_tree(path: &Path) -> Result<String, IoError> {
    std::fs::read_to_string(path).map_err(|e| IoError::read_failed(path, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConfigError;
    use crate::output::OutputFormat;

    const OLD: &str = "\
+--- com.squareup.retrofit2:retrofit:2.8.0
|    \\--- com.squareup.okhttp3:okhttp:3.14.7
|         \\--- com.squareup.okio:okio:1.17.2
+--- com.squareup.moshi:moshi:1.9.3
|    \\--- com.squareup.okio:okio:1.17.2
\\--- org.example:bar:1.0.0
";

    const NEW: &str = "\
+--- com.squareup.retrofit2:retrofit:2.9.0
|    \\--- com.squareup.okhttp3:okhttp:3.14.9
|         \\--- com.squareup.okio:okio:1.17.10
+--- com.squareup.moshi:moshi:1.9.3
|    \\--- com.squareup.okio:okio:1.17.2
+--- org.example:a:2.0.0
\\--- org.example:b:2.0.0
";

    const NO_COLLAPSE: [&str; 0] = [];

    #[test]
    fn test_analyze_without_side_effects() {
        let orchestrator = Orchestrator::new(OutputConfig::default(), false);
        let report = orchestrator.analyze(OLD, NEW).unwrap();
        assert_eq!(report.differences.additions.len(), 3);
        assert_eq!(report.differences.removals.len(), 1);
        assert_eq!(report.differences.upgrades.len(), 2);
        assert!(report.side_effects.is_none());
        assert!(report.visible_side_effects().is_none());
    }

    #[test]
    fn test_analyze_with_side_effects() {
        let orchestrator = Orchestrator::new(OutputConfig::default(), true);
        let report = orchestrator.analyze(OLD, NEW).unwrap();
        let effects = report.visible_side_effects().unwrap();
        assert_eq!(effects.len(), 1);
        assert_eq!(effects[0].artifact, "com.squareup.okio:okio");
    }

    #[test]
    fn test_side_effects_never_repeat_upgrades() {
        let orchestrator = Orchestrator::new(OutputConfig::default(), true);
        let report = orchestrator.analyze(OLD, NEW).unwrap();
        for effect in report.visible_side_effects().unwrap() {
            assert!(!report.differences.is_upgraded(&effect.artifact));
        }
    }

    #[test]
    fn test_requested_but_empty_side_effects_are_hidden() {
        let orchestrator = Orchestrator::new(OutputConfig::default(), true);
        let report = orchestrator.analyze(OLD, OLD).unwrap();
        assert_eq!(report.side_effects, Some(Vec::new()));
        assert!(report.visible_side_effects().is_none());
    }

    #[test]
    fn test_render_report_plain_with_collapse() {
        let output = render_report(OLD, NEW, &["org.example"], false, "plain").unwrap();
        assert!(output.contains(
            "Additions\n  com.squareup.okio:okio : 1.17.10\n  org.example.* : 2.0.0\n\n"
        ));
        assert!(output.contains("Removals\n  org.example:bar : 1.0.0\n"));
    }

    #[test]
    fn test_render_report_appends_side_effects() {
        let output = render_report(OLD, NEW, &NO_COLLAPSE, true, "plain").unwrap();
        assert!(output.contains(
            "\n\nUpgrade Side Effects\n  com.squareup.okio:okio : 1.17.2 -> 1.17.10 \
             (via com.squareup.okhttp3:okhttp, com.squareup.retrofit2:retrofit)\n"
        ));
        assert_eq!(output.matches("com.squareup.okhttp3:okhttp : ").count(), 1);
    }

    #[test]
    fn test_render_report_json() {
        let output = render_report(OLD, NEW, &NO_COLLAPSE, false, "json").unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed["upgrades"][0]["artifact"], "com.squareup.okhttp3:okhttp");
        assert_eq!(parsed["upgrades"][0]["previousVersion"], "3.14.7");
    }

    #[test]
    fn test_render_report_unknown_format() {
        let err = render_report(OLD, NEW, &NO_COLLAPSE, false, "yaml").unwrap_err();
        assert!(matches!(
            err,
            AppError::Config(ConfigError::UnknownOutputFormat { ref value }) if value == "yaml"
        ));
    }

    #[test]
    fn test_render_report_parse_error() {
        let err = render_report(OLD, "+--- broken\n", &NO_COLLAPSE, false, "plain").unwrap_err();
        assert!(matches!(err, AppError::Parse(_)));
    }

    #[test]
    fn test_write_report() {
        let orchestrator = Orchestrator::new(OutputConfig::new(OutputFormat::Plain), false);
        let mut buffer = Vec::new();
        orchestrator.write_report(OLD, OLD, &mut buffer).unwrap();
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_read_tree_missing_file() {
        let err = read_tree(Path::new("/definitely/not/here.txt")).unwrap_err();
        assert!(err.to_string().contains("/definitely/not/here.txt"));
    }
}
