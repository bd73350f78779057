//! Diff result types
//!
//! Provides the three-way partition produced by comparing two dependency trees.

use super::VersionedDependency;
use serde::{Deserialize, Serialize};

/// Additions, removals and upgrades between two dependency snapshots
///
/// Each list is sorted by artifact and an artifact appears in at most one list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionDifferences {
    /// Artifacts only present in the new snapshot
    pub additions: Vec<VersionedDependency>,
    /// Artifacts only present in the old snapshot
    pub removals: Vec<VersionedDependency>,
    /// Artifacts present in both with a different version
    pub upgrades: Vec<VersionedDependency>,
}

impl VersionDifferences {
    /// Creates a new VersionDifferences, sorting each list by artifact
    pub fn new(
        mut additions: Vec<VersionedDependency>,
        mut removals: Vec<VersionedDependency>,
        mut upgrades: Vec<VersionedDependency>,
    ) -> Self {
        additions.sort_by(|a, b| a.artifact.cmp(&b.artifact));
        removals.sort_by(|a, b| a.artifact.cmp(&b.artifact));
        upgrades.sort_by(|a, b| a.artifact.cmp(&b.artifact));
        Self {
            additions,
            removals,
            upgrades,
        }
    }

    /// Returns true if nothing changed between the snapshots
    pub fn is_empty(&self) -> bool {
        self.additions.is_empty() && self.removals.is_empty() && self.upgrades.is_empty()
    }

    /// Returns the total number of reported changes
    pub fn total_changes(&self) -> usize {
        self.additions.len() + self.removals.len() + self.upgrades.len()
    }

    /// Returns true if `artifact` is reported as an upgrade
    pub fn is_upgraded(&self, artifact: &str) -> bool {
        self.upgrades
            .binary_search_by(|dep| dep.artifact.as_str().cmp(artifact))
            .is_ok()
    }
}
