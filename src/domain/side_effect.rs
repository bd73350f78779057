//! Transitive version changes caused by direct upgrades

use super::Versioned;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A version change that was not requested directly
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SideEffect {
    /// Artifact coordinate
    pub artifact: String,
    /// Resolved version in the old tree
    pub previous_version: String,
    /// Resolved version in the new tree
    pub version: String,
    /// Directly upgraded ancestors in the new tree
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub triggered_by: Vec<String>,
}

impl SideEffect {
    /// Creates a side effect without known triggers
    pub fn new(
        artifact: impl Into<String>,
        previous_version: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            artifact: artifact.into(),
            previous_version: previous_version.into(),
            version: version.into(),
            triggered_by: Vec::new(),
        }
    }

    /// Sets the upgraded ancestors (builder pattern)
    pub fn with_triggers(mut self, triggered_by: Vec<String>) -> Self {
        self.triggered_by = triggered_by;
        self
    }
}

impl Versioned for SideEffect {
    fn artifact(&self) -> &str {
        &self.artifact
    }

    fn version(&self) -> &str {
        &self.version
    }

    fn previous_version(&self) -> Option<&str> {
        Some(&self.previous_version)
    }

    fn triggered_by(&self) -> &[String] {
        &self.triggered_by
    }
}

impl fmt::Display for SideEffect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} : {} -> {}",
            self.artifact, self.previous_version, self.version
        )?;
        if !self.triggered_by.is_empty() {
            write!(f, " (via {})", self.triggered_by.join(", "))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_side_effect_is_versioned_upgrade() {
        let effect = SideEffect::new("com.squareup.okio:okio", "2.8.0", "3.0.0");
        assert_eq!(effect.group(), "com.squareup.okio");
        assert_eq!(effect.previous_version(), Some("2.8.0"));
        assert_eq!(Versioned::version(&effect), "3.0.0");
    }

    #[test]
    fn test_display_without_triggers() {
        let effect = SideEffect::new("com.squareup.okio:okio", "2.8.0", "3.0.0");
        assert_eq!(effect.to_string(), "com.squareup.okio:okio : 2.8.0 -> 3.0.0");
    }

    #[test]
    fn test_display_with_triggers() {
        let effect = SideEffect::new("com.squareup.okio:okio", "2.8.0", "3.0.0").with_triggers(
            vec![
                "com.squareup.okhttp3:okhttp".to_string(),
                "com.squareup.retrofit2:retrofit".to_string(),
            ],
        );
        assert_eq!(
            effect.to_string(),
            "com.squareup.okio:okio : 2.8.0 -> 3.0.0 (via com.squareup.okhttp3:okhttp, com.squareup.retrofit2:retrofit)"
        );
    }
}
