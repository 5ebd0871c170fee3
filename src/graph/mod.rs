//! Internal dependency graph between workspace packages
//!
//! Nodes are package names. An edge `a -> b` means package `a` declares
//! `b` in `dependencies`, `devDependencies` or `peerDependencies` and `b`
//! is itself a loaded workspace package. Third-party names never become
//! nodes.
//!
//! The graph tolerates cycles; finding them is the job of [`cycles`].

mod cycles;

pub use cycles::{detect_cycles, Cycle, CycleReport};

use crate::error::{HealthError, Result};
use crate::models::PackageDescriptor;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use tracing::debug;

/// Default cap on enumerated cycles of length > 2
pub const DEFAULT_MAX_CYCLES: usize = 100;

/// Adjacency map of internal "depends on" edges
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct DependencyGraph {
    adjacency: BTreeMap<String, BTreeSet<String>>,
}

impl DependencyGraph {
    /// All package names, sorted
    pub fn nodes(&self) -> impl Iterator<Item = &str> {
        self.adjacency.keys().map(String::as_str)
    }

    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    pub fn edge_count(&self) -> usize {
        self.adjacency.values().map(BTreeSet::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.adjacency.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.adjacency.contains_key(name)
    }

    pub fn has_edge(&self, from: &str, to: &str) -> bool {
        self.adjacency
            .get(from)
            .is_some_and(|deps| deps.contains(to))
    }

    /// Packages that `name` depends on
    pub fn dependencies_of(&self, name: &str) -> impl Iterator<Item = &str> {
        self.adjacency
            .get(name)
            .into_iter()
            .flat_map(|deps| deps.iter().map(String::as_str))
    }

    /// Packages that depend on `name`
    pub fn dependents_of(&self, name: &str) -> Vec<&str> {
        self.adjacency
            .iter()
            .filter(|(_, deps)| deps.contains(name))
            .map(|(pkg, _)| pkg.as_str())
            .collect()
    }

    /// Every edge as `(from, to)`, ordered by source then target
    pub fn edges(&self) -> impl Iterator<Item = (&str, &str)> {
        self.adjacency
            .iter()
            .flat_map(|(from, deps)| deps.iter().map(move |to| (from.as_str(), to.as_str())))
    }
}

/// Check the name-uniqueness invariant the graph relies on
pub fn validate_descriptors(descriptors: &[PackageDescriptor]) -> Result<()> {
    let mut seen: HashMap<&str, &str> = HashMap::with_capacity(descriptors.len());
    for d in descriptors {
        if d.name.trim().is_empty() {
            return Err(HealthError::InvalidDescriptor {
                path: d.path.clone(),
                reason: "package name is empty".to_string(),
            });
        }
        if let Some(first) = seen.insert(d.name.as_str(), d.path.as_str()) {
            return Err(HealthError::DuplicatePackage {
                name: d.name.clone(),
                first: first.to_string(),
                second: d.path.clone(),
            });
        }
    }
    Ok(())
}

/// Build the internal graph and its cycle report
pub fn build(descriptors: &[PackageDescriptor]) -> (DependencyGraph, CycleReport) {
    build_with_limit(descriptors, DEFAULT_MAX_CYCLES)
}

/// Like [`build`], with an explicit cap on long-cycle enumeration
pub fn build_with_limit(
    descriptors: &[PackageDescriptor],
    max_cycles: usize,
) -> (DependencyGraph, CycleReport) {
    let known: BTreeSet<&str> = descriptors.iter().map(|d| d.name.as_str()).collect();

    let mut adjacency = BTreeMap::new();
    for d in descriptors {
        let internal: BTreeSet<String> = d
            .all_dependency_names()
            .into_iter()
            .filter(|dep| *dep != d.name && known.contains(dep))
            .map(str::to_string)
            .collect();
        adjacency.insert(d.name.clone(), internal);
    }

    let graph = DependencyGraph { adjacency };
    let cycles = detect_cycles(&graph, max_cycles);

    debug!(
        "Dependency graph: {} packages, {} internal edges, {} cycles",
        graph.node_count(),
        graph.edge_count(),
        cycles.len()
    );

    (graph, cycles)
}

#[cfg(test)]
mod tests;
