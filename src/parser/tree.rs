//! Gradle dependency tree parser
//!
//! Reads the first tree block of a `gradle dependencies` report:
//!
//! ```text
//! releaseRuntimeClasspath - Resolved configuration for runtime for variant: release
//! +--- project :core-module
//! |    \--- com.squareup.okio:okio:2.8.0 -> 3.0.0
//! +--- com.squareup.okhttp3:okhttp:4.9.3
//! |    \--- com.squareup.okio:okio:2.8.0 -> 3.0.0 (*)
//! \--- org.jetbrains.kotlin:kotlin-stdlib:1.6.10 (c)
//!
//! (c) - dependency constraint
//! ```
//!
//! Lines are classified by a small state machine: everything before the first
//! root entry (`+--- `) is preamble, the tree ends at the first empty line and
//! the rest of the report is ignored.

use crate::domain::VersionedDependency;
use crate::error::ParseError;
use crate::parser::coordinate::parse_coordinate;
use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;

/// Prefix of a top-level tree entry
const ROOT_MARKER: &str = "+--- ";

/// Tree-drawing marker preceding every artifact body
const ENTRY_MARKER: &str = "--- ";

/// Body prefix of local module references
const PROJECT_PREFIX: &str = "project ";

/// Width of one indentation level (`|    ` or five spaces)
const INDENT_WIDTH: usize = 5;

/// Position of the line scanner relative to the tree block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    /// Preamble before the first root entry
    BeforeTree,
    /// Inside the tree block
    InTree,
    /// Past the blank line that closes the tree block
    AfterTree,
}

/// What a tree line refers to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeEntry {
    /// Local module reference such as `project :core-module`
    Project(String),
    /// External library coordinate
    Dependency(VersionedDependency),
}

/// A single line of the tree with its position in the hierarchy
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeNode {
    /// Nesting level, 0 for top-level entries
    pub depth: usize,
    /// Index of the parent node, if any
    pub parent: Option<usize>,
    /// Parsed entry
    pub entry: TreeEntry,
}

impl TreeNode {
    /// Returns the dependency of this node, or `None` for project references
    pub fn dependency(&self) -> Option<&VersionedDependency> {
        match &self.entry {
            TreeEntry::Dependency(dep) => Some(dep),
            TreeEntry::Project(_) => None,
        }
    }
}

/// Parsed dependency tree preserving parent/child structure
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DependencyTree {
    nodes: Vec<TreeNode>,
}

impl DependencyTree {
    /// Returns all nodes in input order
    pub fn nodes(&self) -> &[TreeNode] {
        &self.nodes
    }

    /// Returns true if the tree has no entries
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns every external dependency, duplicates collapsed by identity
    pub fn dependency_set(&self) -> BTreeSet<VersionedDependency> {
        self.nodes
            .iter()
            .filter_map(TreeNode::dependency)
            .cloned()
            .collect()
    }

    /// Returns the external dependencies declared at the top level
    pub fn root_dependency_set(&self) -> BTreeSet<VersionedDependency> {
        self.nodes
            .iter()
            .filter(|node| node.depth == 0)
            .filter_map(TreeNode::dependency)
            .cloned()
            .collect()
    }

    /// Groups every resolved version by artifact
    pub fn versions_by_artifact(&self) -> BTreeMap<&str, BTreeSet<&str>> {
        let mut versions: BTreeMap<&str, BTreeSet<&str>> = BTreeMap::new();
        for dep in self.nodes.iter().filter_map(TreeNode::dependency) {
            versions
                .entry(dep.artifact.as_str())
                .or_default()
                .insert(dep.version.as_str());
        }
        versions
    }

    /// Iterates over the ancestors of `index`, nearest first
    pub fn ancestors(&self, index: usize) -> impl Iterator<Item = &TreeNode> + '_ {
        let mut next = self.nodes.get(index).and_then(|node| node.parent);
        std::iter::from_fn(move || {
            let node = self.nodes.get(next?)?;
            next = node.parent;
            Some(node)
        })
    }

    /// Returns the indices of every node referring to `artifact`
    pub fn positions_of<'a>(&'a self, artifact: &'a str) -> impl Iterator<Item = usize> + 'a {
        self.nodes
            .iter()
            .enumerate()
            .filter(move |(_, node)| {
                node.dependency()
                    .is_some_and(|dep| dep.artifact == artifact)
            })
            .map(|(index, _)| index)
    }
}

/// Parses the first tree block of a dependency report
///
/// Empty input, or input without any root entry, yields an empty tree.
pub fn parse_tree(content: &str) -> Result<DependencyTree, ParseError> {
    let mut nodes: Vec<TreeNode> = Vec::new();
    // (depth, node index) of the current ancestor chain
    let mut stack: Vec<(usize, usize)> = Vec::new();
    let mut state = ScanState::BeforeTree;

    for (line_idx, line) in content.lines().enumerate() {
        let line_number = line_idx + 1;

        match state {
            ScanState::BeforeTree if line.starts_with(ROOT_MARKER) => state = ScanState::InTree,
            ScanState::BeforeTree => continue,
            ScanState::InTree if line.is_empty() => {
                state = ScanState::AfterTree;
                continue;
            }
            ScanState::InTree => {}
            ScanState::AfterTree => break,
        }

        let (depth, entry) = classify_line(line, line_number)?;

        while stack.last().is_some_and(|&(d, _)| d >= depth) {
            stack.pop();
        }
        let parent = stack.last().map(|&(_, index)| index);

        stack.push((depth, nodes.len()));
        nodes.push(TreeNode {
            depth,
            parent,
            entry,
        });
    }

    debug!(
        nodes = nodes.len(),
        roots = nodes.iter().filter(|node| node.depth == 0).count(),
        "parsed dependency tree"
    );

    Ok(DependencyTree { nodes })
}

/// Parses a dependency report into its set of external dependencies
///
/// Local module references (`project ...`) are never part of the result.
pub fn extract_dependencies(content: &str) -> Result<BTreeSet<VersionedDependency>, ParseError> {
    Ok(parse_tree(content)?.dependency_set())
}

/// Splits a tree line into its nesting depth and entry
fn classify_line(line: &str, line_number: usize) -> Result<(usize, TreeEntry), ParseError> {
    let marker = line
        .find(ENTRY_MARKER)
        .ok_or_else(|| ParseError::missing_marker(line_number, line))?;
    let body = &line[marker + ENTRY_MARKER.len()..];
    // The connector (`+` or `\`) sits right before the marker
    let depth = marker.saturating_sub(1) / INDENT_WIDTH;

    if body.starts_with(PROJECT_PREFIX) {
        return Ok((depth, TreeEntry::Project(body.to_string())));
    }

    let dep = parse_coordinate(body)
        .ok_or_else(|| ParseError::malformed_coordinate(line_number, line))?;
    Ok((depth, TreeEntry::Dependency(dep)))
}
