//! Three-way partition of two dependency sets
//!
//! The sets are subtracted by identity (artifact + version) first; the two
//! differences are then re-paired by artifact to tell upgrades apart from
//! plain additions and removals.

use crate::domain::{VersionDifferences, VersionedDependency};
use crate::error::{ParseError, Snapshot};
use crate::parser::extract_dependencies;
use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;

/// Diffs two raw dependency reports
pub fn dependency_differences(old: &str, new: &str) -> Result<VersionDifferences, ParseError> {
    let old_dependencies =
        extract_dependencies(old).map_err(|e| e.in_snapshot(Snapshot::Old))?;
    let new_dependencies =
        extract_dependencies(new).map_err(|e| e.in_snapshot(Snapshot::New))?;

    Ok(diff_sets(&old_dependencies, &new_dependencies))
}

/// Diffs two dependency sets
pub fn diff_sets(
    old: &BTreeSet<VersionedDependency>,
    new: &BTreeSet<VersionedDependency>,
) -> VersionDifferences {
    let added = new.difference(old);
    let removed = old.difference(new);
    partition_differences(removed, added)
}

/// Splits identity differences into additions, removals and upgrades
///
/// An added entry whose artifact was also removed is an upgrade from the
/// removed version. Entries are consumed in the order given; with sorted
/// input the first removed version of an artifact is the one paired, and any
/// further versions of an upgraded artifact are dropped so the three lists
/// stay disjoint.
pub fn partition_differences<'a>(
    removed: impl IntoIterator<Item = &'a VersionedDependency>,
    added: impl IntoIterator<Item = &'a VersionedDependency>,
) -> VersionDifferences {
    let mut additions = Vec::new();
    let mut upgrades = Vec::new();
    let mut removals = Vec::new();

    let mut removed_versions: BTreeMap<&str, Vec<&str>> = BTreeMap::new();
    for dep in removed {
        removed_versions
            .entry(dep.artifact.as_str())
            .or_default()
            .push(dep.version.as_str());
    }

    let mut upgraded: BTreeSet<&str> = BTreeSet::new();
    for dep in added {
        let artifact = dep.artifact.as_str();
        if let Some(versions) = removed_versions.remove(artifact) {
            if versions.len() > 1 {
                debug!(artifact, ?versions, "several removed versions, pairing the first");
            }
            upgraded.insert(artifact);
            upgrades.push(VersionedDependency::upgrade(
                artifact,
                dep.version.as_str(),
                versions[0],
            ));
        } else if upgraded.contains(artifact) {
            debug!(artifact, version = %dep.version, "extra added version of an upgraded artifact");
        } else {
            additions.push(VersionedDependency::new(artifact, dep.version.as_str()));
        }
    }

    for (artifact, versions) in removed_versions {
        for version in versions {
            removals.push(VersionedDependency::new(artifact, version));
        }
    }

    let differences = VersionDifferences::new(additions, removals, upgrades);
    debug!(
        additions = differences.additions.len(),
        removals = differences.removals.len(),
        upgrades = differences.upgrades.len(),
        "partitioned dependency differences"
    );
    differences
}
