//! JSON output formatter for machine processing
//!
//! This module provides:
//! - JSON serialization of the three change lists
//! - Collapsed rows with the artifacts they stand for
//! - Optional side effects with their triggering upgrades

use crate::diff::{CollapseGroups, DisplayEntry};
use crate::domain::Versioned;
use crate::orchestrator::Report;
use crate::output::OutputFormatter;
use serde::Serialize;
use std::io::Write;

/// JSON formatter for machine-readable output
pub struct JsonFormatter {
    /// Group prefixes to collapse rows under
    collapse: CollapseGroups,
}

impl JsonFormatter {
    /// Create a new JSON formatter
    pub fn new(collapse: CollapseGroups) -> Self {
        Self { collapse }
    }

    /// Convert a list of entries to JSON rows, collapsing where requested
    fn entries_to_json<T: Versioned>(&self, entries: &[T]) -> Vec<JsonEntry> {
        self.collapse
            .apply(entries)
            .iter()
            .map(JsonEntry::from_row)
            .collect()
    }
}

/// JSON representation of the full report
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonOutput {
    additions: Vec<JsonEntry>,
    removals: Vec<JsonEntry>,
    upgrades: Vec<JsonEntry>,
    /// Only present when side effects were requested and found
    #[serde(skip_serializing_if = "Option::is_none")]
    side_effects: Option<Vec<JsonEntry>>,
}

/// JSON representation of one row
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonEntry {
    /// Artifact coordinate, or `prefix.*` for a collapsed row
    artifact: String,
    version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    previous_version: Option<String>,
    /// Members of a collapsed row
    #[serde(skip_serializing_if = "Vec::is_empty")]
    artifacts: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    triggered_by: Vec<String>,
}

impl JsonEntry {
    fn from_row<T: Versioned>(row: &DisplayEntry<'_, T>) -> Self {
        let artifacts = if row.is_collapsed() {
            row.artifacts().into_iter().map(str::to_string).collect()
        } else {
            Vec::new()
        };

        Self {
            artifact: row.label(),
            version: row.version().to_string(),
            previous_version: row.previous_version().map(str::to_string),
            artifacts,
            triggered_by: row.triggered_by().to_vec(),
        }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format(&self, report: &Report, writer: &mut dyn Write) -> std::io::Result<()> {
        let differences = &report.differences;
        let output = JsonOutput {
            additions: self.entries_to_json(&differences.additions),
            removals: self.entries_to_json(&differences.removals),
            upgrades: self.entries_to_json(&differences.upgrades),
            side_effects: report
                .visible_side_effects()
                .map(|effects| self.entries_to_json(effects)),
        };

        let json = serde_json::to_string_pretty(&output).map_err(std::io::Error::other)?;
        writeln!(writer, "{}", json)?;
        Ok(())
    }
}
