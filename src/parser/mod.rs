//! Parsers for Gradle dependency tree reports
//!
//! This module provides:
//! - Coordinate parsing and version canonicalization
//! - Tree block parsing, flat (identity set) and structural (parent/child)

mod coordinate;
mod tree;

pub use coordinate::{canonical_version, parse_coordinate};
pub use tree::{extract_dependencies, parse_tree, DependencyTree, TreeEntry, TreeNode};
