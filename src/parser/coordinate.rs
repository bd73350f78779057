//! Artifact coordinate parser for Gradle tree entries
//!
//! Handles:
//! - Full coordinates: `group:name:1.2.3`
//! - Conflict resolution: `group:name:1.0 -> 1.2 (*)`
//! - Declarations without a version: `group:name -> 1.2`
//! - Unresolved declarations: `group:name FAILED`
//! - Omitted subtrees and constraints: `group:name:1.2 (*)`, `group:name:1.2 (c)`
//! - Rich versions: `group:name:{strictly 1.2} -> 1.2`

use crate::domain::VersionedDependency;

/// Resolution arrow separating the requested from the resolved version
const RESOLUTION_ARROW: &str = "->";

/// Markers Gradle appends after an already-printed subtree or a constraint
const OMISSION_MARKERS: [&str; 2] = ["(*)", "(c)"];

/// Reduces a version-info segment to the resolved version
///
/// `1.0 -> 1.2 (*)` becomes `1.2`, `1.2 (c)` becomes `1.2`. Anything else is
/// returned verbatim, so an already canonical version is left untouched.
pub fn canonical_version(version_info: &str) -> &str {
    if version_info.contains(RESOLUTION_ARROW) {
        let resolved = version_info
            .split_once("-> ")
            .map_or(version_info, |(_, after)| after);
        return resolved
            .split_once(' ')
            .map_or(resolved, |(version, _)| version);
    }

    if OMISSION_MARKERS
        .iter()
        .any(|marker| version_info.contains(marker))
    {
        return version_info
            .split_once(" (")
            .map_or(version_info, |(version, _)| version);
    }

    version_info
}

/// Splits an artifact body into its artifact and canonical version
///
/// With a single colon the artifact ends at the first space and the rest of
/// the body is the version info, which covers `group:name -> 1.2` as well as
/// Gradle's unresolved `group:name FAILED`. Returns `None` when there is no
/// colon at all or either part comes out empty.
pub fn parse_coordinate(body: &str) -> Option<VersionedDependency> {
    let first_colon = body.find(':')?;
    let last_colon = body.rfind(':')?;

    let (artifact, version_info) = if first_colon == last_colon {
        body.split_once(' ')?
    } else {
        (&body[..last_colon], &body[last_colon + 1..])
    };

    let version = canonical_version(version_info.trim());
    if artifact.is_empty() || version.is_empty() {
        return None;
    }

    Some(VersionedDependency::new(artifact, version))
}
