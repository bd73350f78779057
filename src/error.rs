//! Application error types using thiserror
//!
//! Error hierarchy:
//! - ParseError: Malformed lines inside a dependency tree block
//! - ConfigError: Invalid caller configuration (output format)
//! - IoError: Reading the tree dumps and writing the report

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Application-level error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Tree parsing errors
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// Configuration related errors
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// IO related errors
    #[error(transparent)]
    Io(#[from] IoError),
}

/// Which of the two inputs a parse error came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Snapshot {
    /// The old (baseline) tree
    Old,
    /// The new tree
    New,
}

impl fmt::Display for Snapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Snapshot::Old => write!(f, "old"),
            Snapshot::New => write!(f, "new"),
        }
    }
}

/// Errors raised while parsing a dependency tree
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// A line inside the tree block has no `--- ` marker
    #[error("line {line_number}: expected a tree entry with a '--- ' marker, found '{line}'")]
    MissingMarker { line_number: usize, line: String },

    /// A tree entry cannot be split into artifact and version
    #[error("line {line_number}: cannot split '{line}' into artifact and version")]
    MalformedCoordinate { line_number: usize, line: String },

    /// Wraps another parse error with the snapshot it came from
    #[error("failed to parse {snapshot} dependency tree: {source}")]
    InSnapshot {
        snapshot: Snapshot,
        #[source]
        source: Box<ParseError>,
    },
}

/// Errors related to configuration
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Unknown output format
    #[error("invalid output format '{value}': expected 'plain' or 'json'")]
    UnknownOutputFormat { value: String },
}

/// Errors related to IO operations
#[derive(Error, Debug)]
pub enum IoError {
    /// Failed to read a dependency tree file
    #[error("failed to read dependency tree {path}: {source}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to write the formatted report
    #[error("failed to write report: {source}")]
    WriteFailed {
        #[source]
        source: std::io::Error,
    },
}

impl ParseError {
    /// Creates a new MissingMarker error
    pub fn missing_marker(line_number: usize, line: impl Into<String>) -> Self {
        ParseError::MissingMarker {
            line_number,
            line: line.into(),
        }
    }

    /// Creates a new MalformedCoordinate error
    pub fn malformed_coordinate(line_number: usize, line: impl Into<String>) -> Self {
        ParseError::MalformedCoordinate {
            line_number,
            line: line.into(),
        }
    }

    /// Tags this error with the snapshot it was found in
    pub fn in_snapshot(self, snapshot: Snapshot) -> Self {
        ParseError::InSnapshot {
            snapshot,
            source: Box::new(self),
        }
    }

    /// Returns the 1-based line number of the offending line
    pub fn line_number(&self) -> usize {
        match self {
            ParseError::MissingMarker { line_number, .. }
            | ParseError::MalformedCoordinate { line_number, .. } => *line_number,
            ParseError::InSnapshot { source, .. } => source.line_number(),
        }
    }
}

impl ConfigError {
    /// Creates a new UnknownOutputFormat error
    pub fn unknown_output_format(value: impl Into<String>) -> Self {
        ConfigError::UnknownOutputFormat {
            value: value.into(),
        }
    }
}

impl IoError {
    /// Creates a new ReadFailed error
    pub fn read_failed(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        IoError::ReadFailed {
            path: path.into(),
            source,
        }
    }

    /// Creates a new WriteFailed error
    pub fn write_failed(source: std::io::Error) -> Self {
        IoError::WriteFailed { source }
    }
}
