//! File-level dependency graph.
//!
//! A [`DependencyGraph`] maps every scanned node name to the set of names it
//! imports. Dependency names need not be keys themselves: names that are
//! imported but never scanned are the graph's leaves.

use std::collections::btree_map;
use std::collections::{BTreeMap, BTreeSet, HashMap};

use petgraph::algo::tarjan_scc;
use petgraph::graph::{DiGraph, NodeIndex};
use serde::Serialize;

/// A directed graph of file imports, keyed by node name.
///
/// Keys and dependency sets are kept sorted so that everything derived
/// from the graph, rendered output included, is deterministic. A key never
/// maps to itself.
///
/// # Example
///
/// ```rust
/// use objcdep::graph::DependencyGraph;
///
/// let mut graph = DependencyGraph::new();
/// graph.add_edge("AppDelegate", "RootViewController");
/// graph.add_edge("RootViewController", "UIKit");
/// graph.insert_node("Constants");
///
/// assert_eq!(graph.node_count(), 3);
/// assert_eq!(graph.edge_count(), 2);
/// assert!(!graph.add_edge("Constants", "Constants")); // self-loops are rejected
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct DependencyGraph {
    nodes: BTreeMap<String, BTreeSet<String>>,
}

impl DependencyGraph {
    /// Creates a new empty dependency graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Ensures `name` is a key, with an empty dependency set if it is new.
    pub fn insert_node(&mut self, name: &str) {
        if !self.nodes.contains_key(name) {
            self.nodes.insert(name.to_string(), BTreeSet::new());
        }
    }

    /// Records that `from` imports `to`, creating the `from` key if needed.
    ///
    /// `to` is not added as a key. Returns `false` for a self-loop, which is
    /// never stored.
    pub fn add_edge(&mut self, from: &str, to: &str) -> bool {
        if from == to {
            return false;
        }
        self.insert_node(from);
        if let Some(deps) = self.nodes.get_mut(from) {
            deps.insert(to.to_string());
        }
        true
    }

    /// Unions two graphs by node name.
    ///
    /// A key present in only one of the graphs keeps its own set.
    ///
    /// # Example
    ///
    /// ```rust
    /// use objcdep::graph::DependencyGraph;
    ///
    /// let mut headers = DependencyGraph::new();
    /// headers.add_edge("Foo", "Bar");
    ///
    /// let mut sources = DependencyGraph::new();
    /// sources.add_edge("Foo", "Baz");
    /// sources.insert_node("Main");
    ///
    /// let merged = headers.union(sources);
    /// assert_eq!(merged.dependencies("Foo").map(|d| d.len()), Some(2));
    /// assert!(merged.contains("Main"));
    /// ```
    pub fn union(mut self, other: DependencyGraph) -> DependencyGraph {
        for (name, deps) in other.nodes {
            self.nodes.entry(name).or_default().extend(deps);
        }
        self
    }

    /// Returns the dependency set of `name`, if it is a key.
    pub fn dependencies(&self, name: &str) -> Option<&BTreeSet<String>> {
        self.nodes.get(name)
    }

    /// Returns true if `name` is a key.
    pub fn contains(&self, name: &str) -> bool {
        self.nodes.contains_key(name)
    }

    /// Returns true if `from` is a key that imports `to`.
    pub fn has_edge(&self, from: &str, to: &str) -> bool {
        self.nodes.get(from).is_some_and(|deps| deps.contains(to))
    }

    /// Iterates over keys and their dependency sets in name order.
    pub fn iter(&self) -> btree_map::Iter<'_, String, BTreeSet<String>> {
        self.nodes.iter()
    }

    /// Iterates over the keys in name order.
    pub fn names(&self) -> impl Iterator<Item = &String> {
        self.nodes.keys()
    }

    /// Returns the number of keys.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Returns the number of stored edges.
    pub fn edge_count(&self) -> usize {
        self.nodes.values().map(BTreeSet::len).sum()
    }

    /// Returns true if the graph has no keys.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Builds a petgraph view of the graph, leaves included as nodes.
    pub fn to_petgraph(&self) -> DiGraph<&str, ()> {
        let mut graph = DiGraph::with_capacity(self.nodes.len(), self.edge_count());
        let mut indices: HashMap<&str, NodeIndex> = HashMap::with_capacity(self.nodes.len());

        for name in self.nodes.keys() {
            indices.insert(name.as_str(), graph.add_node(name.as_str()));
        }
        for (name, deps) in &self.nodes {
            let from = indices[name.as_str()];
            for dep in deps {
                let to = *indices
                    .entry(dep.as_str())
                    .or_insert_with(|| graph.add_node(dep.as_str()));
                graph.add_edge(from, to, ());
            }
        }

        graph
    }

    /// Detects import cycles.
    ///
    /// Every strongly connected component with more than one member is
    /// reported; self-loops cannot occur. Members of each cycle are sorted,
    /// and cycles are ordered by their first member.
    ///
    /// # Example
    ///
    /// ```rust
    /// use objcdep::graph::DependencyGraph;
    ///
    /// let mut graph = DependencyGraph::new();
    /// graph.add_edge("a", "b");
    /// graph.add_edge("b", "c");
    /// graph.add_edge("c", "a"); // Creates cycle: a -> b -> c -> a
    /// graph.add_edge("c", "d");
    ///
    /// let cycles = graph.detect_cycles();
    /// assert_eq!(cycles.len(), 1);
    /// assert_eq!(cycles[0].nodes, vec!["a", "b", "c"]);
    /// ```
    pub fn detect_cycles(&self) -> Vec<CycleInfo> {
        let graph = self.to_petgraph();

        let mut cycles: Vec<CycleInfo> = tarjan_scc(&graph)
            .into_iter()
            .filter(|scc| scc.len() > 1)
            .map(|scc| {
                let mut nodes: Vec<String> =
                    scc.iter().map(|&idx| graph[idx].to_string()).collect();
                nodes.sort();
                CycleInfo { nodes }
            })
            .collect();

        cycles.sort_by(|a, b| a.nodes.cmp(&b.nodes));
        cycles
    }
}

impl<'a> IntoIterator for &'a DependencyGraph {
    type Item = (&'a String, &'a BTreeSet<String>);
    type IntoIter = btree_map::Iter<'a, String, BTreeSet<String>>;

    fn into_iter(self) -> Self::IntoIter {
        self.nodes.iter()
    }
}

impl IntoIterator for DependencyGraph {
    type Item = (String, BTreeSet<String>);
    type IntoIter = btree_map::IntoIter<String, BTreeSet<String>>;

    fn into_iter(self) -> Self::IntoIter {
        self.nodes.into_iter()
    }
}

impl FromIterator<(String, BTreeSet<String>)> for DependencyGraph {
    /// Collects key/set pairs, dropping any self reference.
    fn from_iter<I: IntoIterator<Item = (String, BTreeSet<String>)>>(iter: I) -> Self {
        let mut graph = DependencyGraph::new();
        for (name, deps) in iter {
            graph.insert_node(&name);
            for dep in deps {
                graph.add_edge(&name, &dep);
            }
        }
        graph
    }
}

/// Information about an import cycle.
///
/// Contains the node names that form a strongly connected component.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CycleInfo {
    /// The node names in the cycle, sorted
    pub nodes: Vec<String>,
}

impl CycleInfo {
    /// Returns the members joined for display, e.g. "a, b, c".
    pub fn members(&self) -> String {
        self.nodes.join(", ")
    }

    /// Returns the number of files in the cycle.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if the cycle is empty (should not happen in practice).
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
