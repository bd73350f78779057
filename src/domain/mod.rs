//! Core domain models for depdiff
//!
//! This module contains the value types shared by the parser, the diff engine
//! and the formatters:
//! - Resolved dependency coordinates
//! - The additions / removals / upgrades partition
//! - Side effects of upgrades
//! - Numeric-aware version ordering

mod dependency;
mod differences;
mod side_effect;
mod version;

pub use dependency::{Versioned, VersionedDependency};
pub use differences::VersionDifferences;
pub use side_effect::SideEffect;
pub use version::compare_versions;
