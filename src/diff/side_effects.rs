//! Detection of version changes caused indirectly by upgrades
//!
//! The diff engine already lists every artifact whose version was paired into
//! an upgrade. What it cannot explain is an artifact present in both trees
//! whose set of resolved versions changed without such a pairing, e.g. one
//! path now pulls a newer version while another still resolves the old one.
//! When a directly upgraded artifact sits above it in the new tree, that
//! change is reported as a side effect of the upgrade.

use crate::domain::{compare_versions, SideEffect, VersionDifferences};
use crate::error::{ParseError, Snapshot};
use crate::parser::{parse_tree, DependencyTree, TreeNode};
use std::collections::BTreeSet;
use tracing::debug;

use super::partition::diff_sets;

/// Finds version changes in `new` that were not reported as upgrades
///
/// Results are sorted by artifact; an empty result means no side effects.
pub fn upgrade_effects(old: &str, new: &str) -> Result<Vec<SideEffect>, ParseError> {
    let old_tree = parse_tree(old).map_err(|e| e.in_snapshot(Snapshot::Old))?;
    let new_tree = parse_tree(new).map_err(|e| e.in_snapshot(Snapshot::New))?;
    let differences = diff_sets(&old_tree.dependency_set(), &new_tree.dependency_set());
    Ok(side_effects_between(&old_tree, &new_tree, &differences))
}

/// Finds side effects between two parsed trees
///
/// `differences` is the diff engine's result for the same two trees; its
/// upgrades are the direct upgrades.
pub fn side_effects_between(
    old_tree: &DependencyTree,
    new_tree: &DependencyTree,
    differences: &VersionDifferences,
) -> Vec<SideEffect> {
    let old_versions = old_tree.versions_by_artifact();
    let new_versions = new_tree.versions_by_artifact();

    let mut effects = Vec::new();
    for (artifact, versions) in &new_versions {
        let Some(previous_versions) = old_versions.get(artifact) else {
            continue;
        };
        if previous_versions == versions || differences.is_upgraded(artifact) {
            continue;
        }

        let (Some(previous), Some(version)) =
            (highest(previous_versions), highest(versions))
        else {
            continue;
        };
        if previous == version {
            continue;
        }

        let triggers = upgraded_ancestors(new_tree, differences, artifact);
        if triggers.is_empty() {
            debug!(artifact, previous, version, "version change without an upgraded ancestor");
            continue;
        }

        debug!(artifact, previous, version, ?triggers, "found upgrade side effect");
        effects.push(SideEffect::new(*artifact, previous, version).with_triggers(triggers));
    }

    effects
}

/// Highest of several resolved versions, compared numerically
fn highest<'a>(versions: &BTreeSet<&'a str>) -> Option<&'a str> {
    versions
        .iter()
        .copied()
        .max_by(|a, b| compare_versions(a, b))
}

/// Collects the upgraded artifacts above any occurrence of `artifact`
fn upgraded_ancestors(
    tree: &DependencyTree,
    differences: &VersionDifferences,
    artifact: &str,
) -> Vec<String> {
    let mut triggers = BTreeSet::new();
    for position in tree.positions_of(artifact) {
        for ancestor in tree.ancestors(position).filter_map(TreeNode::dependency) {
            if differences.is_upgraded(&ancestor.artifact) {
                triggers.insert(ancestor.artifact.clone());
            }
        }
    }
    triggers.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const OLD: &str = "\
+--- com.squareup.retrofit2:retrofit:2.8.0
|    \\--- com.squareup.okhttp3:okhttp:3.14.7
|         \\--- com.squareup.okio:okio:1.17.2
+--- com.squareup.moshi:moshi:1.9.3
|    \\--- com.squareup.okio:okio:1.17.2
\\--- com.google.code.gson:gson:2.8.6
";

    const NEW: &str = "\
+--- com.squareup.retrofit2:retrofit:2.9.0
|    \\--- com.squareup.okhttp3:okhttp:3.14.9
|         \\--- com.squareup.okio:okio:1.17.10
+--- com.squareup.moshi:moshi:1.9.3
|    \\--- com.squareup.okio:okio:1.17.2
\\--- com.google.code.gson:gson:2.8.6
";

    fn differences(old: &str, new: &str) -> VersionDifferences {
        crate::diff::dependency_differences(old, new).unwrap()
    }

    #[test]
    fn test_identical_trees_have_no_side_effects() {
        assert!(upgrade_effects(OLD, OLD).unwrap().is_empty());
    }

    #[test]
    fn test_empty_inputs() {
        assert!(upgrade_effects("", "").unwrap().is_empty());
        assert!(upgrade_effects(OLD, "").unwrap().is_empty());
    }

    #[test]
    fn test_transitive_change_is_side_effect() {
        let effects = upgrade_effects(OLD, NEW).unwrap();
        assert_eq!(effects.len(), 1);

        let okio = &effects[0];
        assert_eq!(okio.artifact, "com.squareup.okio:okio");
        assert_eq!(okio.previous_version, "1.17.2");
        assert_eq!(okio.version, "1.17.10");
        assert_eq!(
            okio.triggered_by,
            vec!["com.squareup.okhttp3:okhttp", "com.squareup.retrofit2:retrofit"]
        );
    }

    #[test]
    fn test_side_effects_are_disjoint_from_upgrades() {
        let cases = [
            (OLD, NEW),
            (
                "+--- com.squareup.retrofit2:retrofit:2.8.0\n|    \\--- com.squareup.okhttp3:okhttp:3.14.7\n",
                "+--- com.squareup.retrofit2:retrofit:2.9.0\n|    \\--- com.squareup.okhttp3:okhttp:3.14.9\n",
            ),
        ];
        for (old, new) in cases {
            let upgraded: BTreeSet<String> = differences(old, new)
                .upgrades
                .into_iter()
                .map(|dep| dep.artifact)
                .collect();
            for effect in upgrade_effects(old, new).unwrap() {
                assert!(
                    !upgraded.contains(&effect.artifact),
                    "{} reported as both upgrade and side effect",
                    effect.artifact
                );
            }
        }
    }

    #[test]
    fn test_upgraded_transitive_is_not_side_effect() {
        let old = "+--- a:root:1.0\n|    \\--- b:child:1.0\n";
        let new = "+--- a:root:2.0\n|    \\--- b:child:1.0 -> 1.5\n";
        assert!(differences(old, new).is_upgraded("b:child"));
        assert!(upgrade_effects(old, new).unwrap().is_empty());
    }

    #[test]
    fn test_highest_version_is_numeric() {
        let old = "\
+--- root:lib:1.0
|    \\--- c:util:1.9.0
\\--- other:lib:1.0
     \\--- c:util:1.9.0
";
        let new = "\
+--- root:lib:2.0
|    \\--- c:util:1.10.0
\\--- other:lib:1.0
     \\--- c:util:1.9.0
";
        let effects = upgrade_effects(old, new).unwrap();
        assert_eq!(effects.len(), 1);
        assert_eq!(effects[0].artifact, "c:util");
        assert_eq!(effects[0].previous_version, "1.9.0");
        assert_eq!(effects[0].version, "1.10.0");
        assert_eq!(effects[0].triggered_by, vec!["root:lib"]);
    }

    #[test]
    fn test_change_without_upgraded_ancestor_is_not_side_effect() {
        let old = "\
+--- a:upgraded:1.0
\\--- b:stable:1.0
     \\--- c:shared:1.0
";
        let new = "\
+--- a:upgraded:2.0
\\--- b:stable:1.0
     +--- c:shared:1.0
     \\--- c:shared:1.1
";
        assert!(upgrade_effects(old, new).unwrap().is_empty());
    }

    #[test]
    fn test_side_effects_sorted_by_artifact() {
        let old = "\
+--- root:lib:1.0
|    +--- z:last:1.0
|    \\--- a:first:1.0
\\--- pin:lib:1.0
     +--- z:last:1.0
     \\--- a:first:1.0
";
        let new = "\
+--- root:lib:2.0
|    +--- z:last:2.0
|    \\--- a:first:2.0
\\--- pin:lib:1.0
     +--- z:last:1.0
     \\--- a:first:1.0
";
        let effects = upgrade_effects(old, new).unwrap();
        let artifacts: Vec<_> = effects.iter().map(|e| e.artifact.as_str()).collect();
        assert_eq!(artifacts, vec!["a:first", "z:last"]);
    }

    #[test]
    fn test_parse_error_names_snapshot() {
        let err = upgrade_effects("+--- a:b:1\nbad line\n", "").unwrap_err();
        assert!(err.to_string().contains("old dependency tree"));
    }
}
