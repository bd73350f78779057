//! depdiff - Semantic diff of Gradle dependency-tree reports
//!
//! This library provides the core functionality for comparing the
//! `gradle dependencies` output of two builds:
//! - Parsing the ASCII dependency tree into resolved coordinates
//! - Partitioning the change into additions, removals and upgrades
//! - Collapsing same-version artifacts under a group prefix
//! - Detecting versions that moved only transitively
//! - Plain text and JSON reports

pub mod cli;
pub mod diff;
pub mod domain;
pub mod error;
pub mod logging;
pub mod orchestrator;
pub mod output;
pub mod parser;

pub use orchestrator::{render_report, Report};
