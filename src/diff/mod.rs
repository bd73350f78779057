//! Dependency diffing
//!
//! This module provides:
//! - The additions / removals / upgrades partition of two trees
//! - Collapsing of same-version artifacts under a group prefix for display
//! - Detection of transitive side effects of upgrades

pub mod collapse;
mod partition;
mod side_effects;

pub use collapse::{CollapseGroups, DisplayEntry};
pub use partition::{dependency_differences, diff_sets, partition_differences};
pub use side_effects::{side_effects_between, upgrade_effects};
