//! Collapsing of same-version artifacts that share a group prefix
//!
//! `org.example:a:2.0.0` and `org.example:b:2.0.0` collapse under the prefix
//! `org.example` into the single row `org.example.* : 2.0.0`. A group
//! collapses only when every member has the same version (and, for upgrades,
//! the same previous version); otherwise its members stay listed individually.
//!
//! Collapsing only changes how rows are displayed. The underlying lists are
//! borrowed, never modified.

use crate::domain::Versioned;
use std::collections::BTreeMap;
use std::fmt;

/// Caller-supplied group prefixes to collapse under
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollapseGroups {
    /// Trimmed, deduplicated, non-empty prefixes
    prefixes: Vec<String>,
}

impl CollapseGroups {
    /// Creates collapse groups from raw prefixes
    ///
    /// Prefixes are trimmed; empty and duplicate prefixes are ignored.
    pub fn new<I, S>(prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut collected: Vec<String> = Vec::new();
        for prefix in prefixes {
            let prefix = prefix.as_ref().trim();
            if !prefix.is_empty() && !collected.iter().any(|p| p == prefix) {
                collected.push(prefix.to_string());
            }
        }
        Self {
            prefixes: collected,
        }
    }

    /// Returns true if no prefix was requested
    pub fn is_empty(&self) -> bool {
        self.prefixes.is_empty()
    }

    /// Returns the requested prefixes
    pub fn prefixes(&self) -> &[String] {
        &self.prefixes
    }

    /// Returns the longest prefix matching `group`
    ///
    /// A prefix matches when it equals the group or is followed by a `.` in it.
    pub fn matching_prefix(&self, group: &str) -> Option<&str> {
        self.prefixes
            .iter()
            .filter(|prefix| {
                group == prefix.as_str()
                    || group
                        .strip_prefix(prefix.as_str())
                        .is_some_and(|rest| rest.starts_with('.'))
            })
            .max_by_key(|prefix| prefix.len())
            .map(String::as_str)
    }

    /// Turns `entries` into display rows, collapsing eligible groups
    ///
    /// A collapsed row takes the position of its first member.
    pub fn apply<'a, T: Versioned>(&self, entries: &'a [T]) -> Vec<DisplayEntry<'a, T>> {
        if self.is_empty() {
            return entries.iter().map(DisplayEntry::Single).collect();
        }

        let mut buckets: BTreeMap<&str, Vec<usize>> = BTreeMap::new();
        for (index, entry) in entries.iter().enumerate() {
            if let Some(prefix) = self.matching_prefix(entry.group()) {
                buckets.entry(prefix).or_default().push(index);
            }
        }

        // first member index -> (prefix, member indices)
        let mut collapsed: BTreeMap<usize, (&str, Vec<usize>)> = BTreeMap::new();
        let mut absorbed = vec![false; entries.len()];
        for (prefix, members) in buckets {
            if members.len() < 2 || !same_versions(entries, &members) {
                continue;
            }
            for &index in &members {
                absorbed[index] = true;
            }
            collapsed.insert(members[0], (prefix, members));
        }

        let mut rows = Vec::with_capacity(entries.len());
        for (index, entry) in entries.iter().enumerate() {
            if let Some((prefix, members)) = collapsed.remove(&index) {
                rows.push(DisplayEntry::Collapsed {
                    prefix: prefix.to_string(),
                    version: entry.version().to_string(),
                    previous_version: entry.previous_version().map(str::to_string),
                    members: members.iter().map(|&i| &entries[i]).collect(),
                });
            } else if !absorbed[index] {
                rows.push(DisplayEntry::Single(entry));
            }
        }
        rows
    }
}

/// Returns true if every member shares the first member's versions
fn same_versions<T: Versioned>(entries: &[T], members: &[usize]) -> bool {
    let first = &entries[members[0]];
    members.iter().all(|&index| {
        let entry = &entries[index];
        entry.version() == first.version() && entry.previous_version() == first.previous_version()
    })
}

/// One rendered row of a diff section
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayEntry<'a, T> {
    /// An entry shown on its own
    Single(&'a T),
    /// Several same-version entries summarized under a group prefix
    Collapsed {
        /// The requested prefix
        prefix: String,
        /// Version shared by all members
        version: String,
        /// Previous version shared by all members (upgrades only)
        previous_version: Option<String>,
        /// The entries this row stands for
        members: Vec<&'a T>,
    },
}

impl<T: Versioned> DisplayEntry<'_, T> {
    /// Label shown in place of the artifact (`group:name` or `prefix.*`)
    pub fn label(&self) -> String {
        match self {
            DisplayEntry::Single(entry) => entry.artifact().to_string(),
            DisplayEntry::Collapsed { prefix, .. } => format!("{}.*", prefix),
        }
    }

    /// Resolved version of the row
    pub fn version(&self) -> &str {
        match self {
            DisplayEntry::Single(entry) => entry.version(),
            DisplayEntry::Collapsed { version, .. } => version,
        }
    }

    /// Previous version of the row, if it describes an upgrade
    pub fn previous_version(&self) -> Option<&str> {
        match self {
            DisplayEntry::Single(entry) => entry.previous_version(),
            DisplayEntry::Collapsed {
                previous_version, ..
            } => previous_version.as_deref(),
        }
    }

    /// Artifacts covered by the row
    pub fn artifacts(&self) -> Vec<&str> {
        match self {
            DisplayEntry::Single(entry) => vec![entry.artifact()],
            DisplayEntry::Collapsed { members, .. } => {
                members.iter().map(|member| member.artifact()).collect()
            }
        }
    }

    /// Causes attached to the row; collapsed rows carry none
    pub fn triggered_by(&self) -> &[String] {
        match self {
            DisplayEntry::Single(entry) => entry.triggered_by(),
            DisplayEntry::Collapsed { .. } => &[],
        }
    }

    /// Returns true if the row summarizes several entries
    pub fn is_collapsed(&self) -> bool {
        matches!(self, DisplayEntry::Collapsed { .. })
    }
}

impl<T: Versioned> fmt::Display for DisplayEntry<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.previous_version() {
            Some(previous) => write!(f, "{} : {} -> {}", self.label(), previous, self.version()),
            None => write!(f, "{} : {}", self.label(), self.version()),
        }
    }
}
