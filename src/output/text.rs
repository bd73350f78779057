//! Text output formatter for human-readable display
//!
//! This module provides:
//! - Additions / Removals / Upgrades sections, empty ones omitted
//! - Collapsed group rows (`prefix.* : version`)
//! - The trailing side-effects section with its triggering upgrades

use crate::diff::{CollapseGroups, DisplayEntry};
use crate::domain::Versioned;
use crate::orchestrator::Report;
use crate::output::{OutputFormatter, SIDE_EFFECTS_HEADING};
use colored::Colorize;
use std::io::Write;

/// Kind of change a section lists, used to pick the row color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ChangeKind {
    Addition,
    Removal,
    Upgrade,
}

/// Text formatter for human-readable output
pub struct TextFormatter {
    /// Group prefixes to collapse rows under
    collapse: CollapseGroups,
    /// Whether to use colors
    color: bool,
}

impl TextFormatter {
    /// Create a new text formatter without colors
    pub fn new(collapse: CollapseGroups) -> Self {
        Self {
            collapse,
            color: false,
        }
    }

    /// Create a new text formatter with color option
    pub fn with_color(collapse: CollapseGroups, color: bool) -> Self {
        Self { collapse, color }
    }

    /// Write one section, preceded by a blank line unless it is the first
    ///
    /// Returns whether anything was written.
    fn write_section<T: Versioned>(
        &self,
        heading: &str,
        kind: ChangeKind,
        entries: &[T],
        separate: bool,
        writer: &mut dyn Write,
    ) -> std::io::Result<bool> {
        if entries.is_empty() {
            return Ok(false);
        }

        if separate {
            writeln!(writer)?;
        }
        if self.color {
            writeln!(writer, "{}", heading.bold())?;
        } else {
            writeln!(writer, "{}", heading)?;
        }

        for row in self.collapse.apply(entries) {
            self.write_row(&row, kind, writer)?;
        }
        Ok(true)
    }

    /// Format a single row
    fn write_row<T: Versioned>(
        &self,
        row: &DisplayEntry<'_, T>,
        kind: ChangeKind,
        writer: &mut dyn Write,
    ) -> std::io::Result<()> {
        let triggers = row.triggered_by();
        let suffix = if triggers.is_empty() {
            String::new()
        } else {
            format!(" (via {})", triggers.join(", "))
        };

        if self.color {
            let text = row.to_string();
            let text = match kind {
                ChangeKind::Addition => text.green(),
                ChangeKind::Removal => text.red(),
                ChangeKind::Upgrade => text.yellow(),
            };
            writeln!(writer, "  {}{}", text, suffix.dimmed())
        } else {
            writeln!(writer, "  {}{}", row, suffix)
        }
    }
}

impl OutputFormatter for TextFormatter {
    fn format(&self, report: &Report, writer: &mut dyn Write) -> std::io::Result<()> {
        let differences = &report.differences;
        let mut written = false;

        written |= self.write_section(
            "Additions",
            ChangeKind::Addition,
            &differences.additions,
            written,
            writer,
        )?;
        written |= self.write_section(
            "Removals",
            ChangeKind::Removal,
            &differences.removals,
            written,
            writer,
        )?;
        written |= self.write_section(
            "Upgrades",
            ChangeKind::Upgrade,
            &differences.upgrades,
            written,
            writer,
        )?;

        if let Some(effects) = report.visible_side_effects() {
            self.write_section(
                SIDE_EFFECTS_HEADING,
                ChangeKind::Upgrade,
                effects,
                written,
                writer,
            )?;
        }

        Ok(())
    }
}
