//! Resolved dependency coordinates

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Common view over anything that carries an artifact and a resolved version
///
/// Implemented by [`VersionedDependency`] and [`super::SideEffect`] so the
/// collapse transform and the formatters can treat both alike.
pub trait Versioned {
    /// Artifact coordinate in `group:name` form
    fn artifact(&self) -> &str;

    /// Resolved version
    fn version(&self) -> &str;

    /// Version before the change, if this entry describes an upgrade
    fn previous_version(&self) -> Option<&str>;

    /// Artifacts whose change caused this one, if known
    fn triggered_by(&self) -> &[String] {
        &[]
    }

    /// Group part of the artifact (everything before the first colon)
    fn group(&self) -> &str {
        let artifact = self.artifact();
        artifact
            .split_once(':')
            .map_or(artifact, |(group, _)| group)
            .trim()
    }
}

/// A single resolved library coordinate
///
/// Identity is `artifact` + `version`; `alternative_version` is auxiliary and
/// does not take part in equality, hashing or ordering.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VersionedDependency {
    /// Artifact coordinate, e.g. `org.jetbrains.kotlinx:kotlinx-coroutines-android`
    pub artifact: String,
    /// Canonical resolved version, e.g. `1.6.0`
    pub version: String,
    /// Prior version, set only when this entry is an upgrade
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alternative_version: Option<String>,
}

impl VersionedDependency {
    /// Creates a dependency without an alternative version
    pub fn new(artifact: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            artifact: artifact.into(),
            version: version.into(),
            alternative_version: None,
        }
    }

    /// Creates an upgrade entry from `previous` to `version`
    pub fn upgrade(
        artifact: impl Into<String>,
        version: impl Into<String>,
        previous: impl Into<String>,
    ) -> Self {
        Self {
            artifact: artifact.into(),
            version: version.into(),
            alternative_version: Some(previous.into()),
        }
    }

    /// Returns true if this entry carries a previous version
    pub fn is_upgrade(&self) -> bool {
        self.alternative_version.is_some()
    }
}

impl Versioned for VersionedDependency {
    fn artifact(&self) -> &str {
        &self.artifact
    }

    fn version(&self) -> &str {
        &self.version
    }

    fn previous_version(&self) -> Option<&str> {
        self.alternative_version.as_deref()
    }
}

impl PartialEq for VersionedDependency {
    fn eq(&self, other: &Self) -> bool {
        self.artifact == other.artifact && self.version == other.version
    }
}

impl Eq for VersionedDependency {}

impl Hash for VersionedDependency {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.artifact.hash(state);
        self.version.hash(state);
    }
}

impl PartialOrd for VersionedDependency {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for VersionedDependency {
    fn cmp(&self, other: &Self) -> Ordering {
        self.artifact
            .cmp(&other.artifact)
            .then_with(|| self.version.cmp(&other.version))
    }
}

impl fmt::Display for VersionedDependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.alternative_version {
            Some(previous) => write!(f, "{} : {} -> {}", self.artifact, previous, self.version),
            None => write!(f, "{} : {}", self.artifact, self.version),
        }
    }
}
