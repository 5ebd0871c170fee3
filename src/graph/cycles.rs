//! Circular dependency detection
//!
//! Two passes over the internal graph:
//!
//! 1. Direct mutual pairs (`a -> b` and `b -> a`). These are always
//!    reported, however many longer cycles exist.
//! 2. Longer cycles. Tarjan's SCC (via petgraph) narrows the search to
//!    strongly connected components with more than one package. Inside
//!    each component, Johnson's circuit search enumerates elementary cycles
//!    from every member in name order, visiting only members ordered after
//!    the start node. Blocked nodes stay blocked until a cycle is found
//!    through them, so dead-end paths are walked once per start node.
//!
//! A cycle keeps its dependency direction, rotated to begin with its
//! smallest name. Identity ignores direction: `a -> b -> c` and
//! `a -> c -> b` are one entry, and the first one found is reported.

use super::DependencyGraph;
use petgraph::algo::tarjan_scc;
use petgraph::graph::{DiGraph, NodeIndex};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};
use std::hash::{Hash, Hasher};
use tracing::warn;

/// One closed loop of internal dependencies
///
/// `packages[i]` depends on `packages[i + 1]`; the closing edge from the
/// last package back to the first is implied.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct Cycle {
    packages: Vec<String>,
    /// Direction-independent identity
    key: Vec<String>,
}

impl Cycle {
    /// Build a cycle from a dependency path, rotated to its smallest name
    pub fn new<S: AsRef<str>>(path: &[S]) -> Self {
        let packages = rotate_to_min(path.iter().map(|s| s.as_ref().to_string()).collect());
        let key = undirected_key(&packages);
        Self { packages, key }
    }

    pub fn packages(&self) -> &[String] {
        &self.packages
    }

    pub fn len(&self) -> usize {
        self.packages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }

    pub fn is_pair(&self) -> bool {
        self.packages.len() == 2
    }

    pub fn contains(&self, name: &str) -> bool {
        self.packages.iter().any(|p| p == name)
    }

    /// Whether `from -> to` is one of the edges around this cycle
    pub fn has_edge(&self, from: &str, to: &str) -> bool {
        let n = self.packages.len();
        (0..n).any(|i| self.packages[i] == from && self.packages[(i + 1) % n] == to)
    }

    /// Human-readable chain, e.g. `a <-> b` or `a -> b -> c -> a`
    pub fn describe(&self) -> String {
        if self.is_pair() {
            return format!("{} <-> {}", self.packages[0], self.packages[1]);
        }
        let mut chain = self.packages.join(" -> ");
        if let Some(first) = self.packages.first() {
            chain.push_str(" -> ");
            chain.push_str(first);
        }
        chain
    }
}

impl From<Vec<String>> for Cycle {
    fn from(path: Vec<String>) -> Self {
        Cycle::new(&path)
    }
}

impl From<Cycle> for Vec<String> {
    fn from(cycle: Cycle) -> Self {
        cycle.packages
    }
}

impl PartialEq for Cycle {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for Cycle {}

impl Hash for Cycle {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key.hash(state);
    }
}

impl PartialOrd for Cycle {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Cycle {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key.cmp(&other.key)
    }
}

/// Ordered, de-duplicated list of detected cycles
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CycleReport {
    cycles: Vec<Cycle>,
    /// True when long-cycle enumeration stopped at the configured cap
    #[serde(default)]
    pub truncated: bool,
}

impl CycleReport {
    pub fn cycles(&self) -> &[Cycle] {
        &self.cycles
    }

    pub fn into_cycles(self) -> Vec<Cycle> {
        self.cycles
    }

    pub fn len(&self) -> usize {
        self.cycles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cycles.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Cycle> {
        self.cycles.iter()
    }

    /// Whether the edge `from -> to` lies on any reported cycle
    pub fn on_cycle(&self, from: &str, to: &str) -> bool {
        self.cycles.iter().any(|c| c.has_edge(from, to))
    }

    /// One issue line per cycle
    pub fn issues(&self) -> Vec<String> {
        self.cycles
            .iter()
            .map(|c| format!("Circular dependency: {}", c.describe()))
            .collect()
    }
}

impl<'a> IntoIterator for &'a CycleReport {
    type Item = &'a Cycle;
    type IntoIter = std::slice::Iter<'a, Cycle>;

    fn into_iter(self) -> Self::IntoIter {
        self.cycles.iter()
    }
}

/// Find all cycles in the graph (see module docs)
pub fn detect_cycles(graph: &DependencyGraph, max_cycles: usize) -> CycleReport {
    let mut found: HashSet<Cycle> = HashSet::new();

    for (from, to) in graph.edges() {
        if from < to && graph.has_edge(to, from) {
            found.insert(Cycle::new(&[from, to]));
        }
    }

    let mut sink = LongCycleSink {
        found: HashSet::new(),
        limit: max_cycles,
        truncated: false,
    };

    for component in cyclic_components(graph) {
        for (pos, start) in component.iter().enumerate() {
            if sink.is_full() {
                break;
            }
            let mut search = CircuitSearch {
                graph,
                start: *start,
                allowed: component[pos..].iter().copied().collect(),
                path: Vec::new(),
                blocked: HashSet::new(),
                blocked_by: HashMap::new(),
                sink: &mut sink,
            };
            search.circuit(*start);
        }
    }

    if sink.truncated {
        warn!(
            "Cycle enumeration stopped after {} long cycles; raise graph.max_cycles to see more",
            max_cycles
        );
    }

    found.extend(sink.found);
    let mut cycles: Vec<Cycle> = found.into_iter().collect();
    cycles.sort_by(|a, b| a.len().cmp(&b.len()).then_with(|| a.cmp(b)));

    CycleReport {
        cycles,
        truncated: sink.truncated,
    }
}

struct LongCycleSink {
    found: HashSet<Cycle>,
    limit: usize,
    truncated: bool,
}

impl LongCycleSink {
    fn is_full(&self) -> bool {
        self.truncated
    }

    fn push(&mut self, path: &[&str]) {
        let cycle = Cycle::new(path);
        if self.found.contains(&cycle) {
            return;
        }
        if self.found.len() >= self.limit {
            self.truncated = true;
            return;
        }
        self.found.insert(cycle);
    }
}

/// Strongly connected components with more than one member, names sorted
fn cyclic_components(graph: &DependencyGraph) -> Vec<Vec<&str>> {
    let mut pg: DiGraph<&str, ()> = DiGraph::new();
    let mut index: HashMap<&str, NodeIndex> = HashMap::new();

    for name in graph.nodes() {
        index.insert(name, pg.add_node(name));
    }
    for (from, to) in graph.edges() {
        if let (Some(&a), Some(&b)) = (index.get(from), index.get(to)) {
            pg.add_edge(a, b, ());
        }
    }

    let mut components: Vec<Vec<&str>> = tarjan_scc(&pg)
        .into_iter()
        .filter(|scc| scc.len() > 1)
        .map(|scc| {
            let mut names: Vec<&str> = scc.into_iter().map(|idx| pg[idx]).collect();
            names.sort_unstable();
            names
        })
        .collect();
    components.sort();
    components
}

/// Johnson's circuit search rooted at one start node
struct CircuitSearch<'a, 's> {
    graph: &'a DependencyGraph,
    start: &'a str,
    allowed: HashSet<&'a str>,
    path: Vec<&'a str>,
    blocked: HashSet<&'a str>,
    blocked_by: HashMap<&'a str, HashSet<&'a str>>,
    sink: &'s mut LongCycleSink,
}

impl<'a> CircuitSearch<'a, '_> {
    /// Returns true when some cycle through `node` back to the start exists
    fn circuit(&mut self, node: &'a str) -> bool {
        let graph = self.graph;
        let mut closed = false;
        self.path.push(node);
        self.blocked.insert(node);

        for next in graph.dependencies_of(node) {
            if self.sink.is_full() {
                break;
            }
            if next == self.start {
                // Pairs come from the direct check
                if self.path.len() > 2 {
                    self.sink.push(&self.path);
                }
                closed = true;
            } else if self.allowed.contains(next)
                && !self.blocked.contains(next)
                && self.circuit(next)
            {
                closed = true;
            }
        }

        if closed {
            self.unblock(node);
        } else {
            for next in graph.dependencies_of(node) {
                if self.allowed.contains(next) {
                    self.blocked_by.entry(next).or_default().insert(node);
                }
            }
        }

        self.path.pop();
        closed
    }

    fn unblock(&mut self, node: &'a str) {
        self.blocked.remove(node);
        if let Some(waiting) = self.blocked_by.remove(node) {
            for w in waiting {
                if self.blocked.contains(w) {
                    self.unblock(w);
                }
            }
        }
    }
}

fn rotate_to_min(mut cycle: Vec<String>) -> Vec<String> {
    let min_idx = cycle
        .iter()
        .enumerate()
        .min_by_key(|(_, v)| *v)
        .map(|(i, _)| i)
        .unwrap_or(0);
    cycle.rotate_left(min_idx);
    cycle
}

/// The smaller of a rotated path and its reversal (first element fixed)
fn undirected_key(rotated: &[String]) -> Vec<String> {
    if rotated.len() < 3 {
        return rotated.to_vec();
    }
    let mut reversed = Vec::with_capacity(rotated.len());
    reversed.push(rotated[0].clone());
    reversed.extend(rotated[1..].iter().rev().cloned());
    reversed.min(rotated.to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rotation_keeps_direction() {
        let c = Cycle::new(&["c", "a", "b"]);
        assert_eq!(c.packages(), &["a", "b", "c"]);

        let reverse = Cycle::new(&["b", "a", "c"]);
        assert_eq!(reverse.packages(), &["a", "c", "b"]);
    }

    #[test]
    fn test_reversal_is_same_cycle() {
        let forward = Cycle::new(&["a", "b", "c"]);
        let backward = Cycle::new(&["a", "c", "b"]);
        assert_eq!(forward, backward);
        assert_ne!(forward.packages(), backward.packages());
    }

    #[test]
    fn test_has_edge_follows_direction() {
        let c = Cycle::new(&["a", "c", "b"]);
        assert!(c.has_edge("a", "c"));
        assert!(c.has_edge("c", "b"));
        assert!(c.has_edge("b", "a"));
        assert!(!c.has_edge("a", "b"));
        assert!(!c.has_edge("c", "a"));
    }

    #[test]
    fn test_describe() {
        assert_eq!(Cycle::new(&["b", "a"]).describe(), "a <-> b");
        assert_eq!(Cycle::new(&["b", "c", "a"]).describe(), "a -> b -> c -> a");
        assert_eq!(Cycle::new(&["c", "b", "a"]).describe(), "a -> c -> b -> a");
    }

    #[test]
    fn test_report_issues() {
        let report = CycleReport {
            cycles: vec![Cycle::new(&["x", "y"])],
            truncated: false,
        };
        assert_eq!(report.issues(), vec!["Circular dependency: x <-> y"]);
        assert!(report.on_cycle("y", "x"));
        assert!(!report.on_cycle("x", "z"));
    }

    #[test]
    fn test_cycle_serializes_as_path() {
        let value = serde_json::to_value(Cycle::new(&["b", "a"])).expect("serialize");
        assert_eq!(value, serde_json::json!(["a", "b"]));

        let value = serde_json::to_value(Cycle::new(&["a", "c", "b"])).expect("serialize");
        assert_eq!(value, serde_json::json!(["a", "c", "b"]));
        let back: Cycle = serde_json::from_value(value).expect("deserialize");
        assert_eq!(back.packages(), &["a", "c", "b"]);
    }
}
