//! Classification of a built dependency graph.
//!
//! All operations here are pure: they borrow or consume a graph and return
//! new values, so classifying the same graph twice gives the same answer.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::Serialize;
use tracing::debug;

use super::builder::is_category_name;
use super::DependencyGraph;

/// Two files that import each other.
///
/// The pair is unordered; it is normalized so that `first < second`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct BidirectionalPair {
    pub first: String,
    pub second: String,
}

impl BidirectionalPair {
    /// Creates a normalized pair. Returns `None` when both names are equal.
    pub fn new(a: &str, b: &str) -> Option<Self> {
        match a.cmp(b) {
            std::cmp::Ordering::Less => Some(Self {
                first: a.to_string(),
                second: b.to_string(),
            }),
            std::cmp::Ordering::Greater => Some(Self {
                first: b.to_string(),
                second: a.to_string(),
            }),
            std::cmp::Ordering::Equal => None,
        }
    }

    /// Returns true if the pair connects `a` and `b`, in either order.
    pub fn connects(&self, a: &str, b: &str) -> bool {
        (self.first == a && self.second == b) || (self.first == b && self.second == a)
    }
}

/// Names that depend on each name, the reverse of a [`DependencyGraph`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct InverseGraph {
    dependents: BTreeMap<String, BTreeSet<String>>,
}

impl InverseGraph {
    /// Returns the names that import `name`, if any do.
    pub fn dependents_of(&self, name: &str) -> Option<&BTreeSet<String>> {
        self.dependents.get(name)
    }

    /// Iterates over referenced names and their dependents in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &BTreeSet<String>)> {
        self.dependents.iter()
    }

    /// Number of distinct referenced names.
    pub fn len(&self) -> usize {
        self.dependents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dependents.is_empty()
    }
}

/// Out-degree distribution of a graph.
///
/// Bucket `i` holds the names with exactly `i` dependencies.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DegreeHistogram {
    buckets: Vec<BTreeSet<String>>,
}

impl DegreeHistogram {
    /// Names with exactly `degree` dependencies.
    pub fn names_with_degree(&self, degree: usize) -> Option<&BTreeSet<String>> {
        self.buckets.get(degree)
    }

    /// Number of names per degree, from degree zero to the maximum.
    pub fn counts(&self) -> Vec<usize> {
        self.buckets.iter().map(BTreeSet::len).collect()
    }

    /// Highest out-degree in the graph, `None` for an empty graph.
    pub fn max_degree(&self) -> Option<usize> {
        self.buckets.len().checked_sub(1)
    }
}

impl fmt::Display for DegreeHistogram {
    /// Renders a star chart followed by the names in each bucket.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.buckets.is_empty() {
            return Ok(());
        }

        for (degree, names) in self.buckets.iter().enumerate() {
            writeln!(f, "{:2} | {}", degree, "*".repeat(names.len()))?;
        }
        writeln!(f)?;
        for (degree, names) in self.buckets.iter().enumerate() {
            let listed: Vec<&str> = names.iter().map(String::as_str).collect();
            writeln!(f, "{:2} | {}", degree, listed.join(", "))?;
        }
        Ok(())
    }
}

impl DependencyGraph {
    /// Finds every pair of keys that import each other.
    ///
    /// # Example
    ///
    /// ```rust
    /// use objcdep::graph::DependencyGraph;
    ///
    /// let mut graph = DependencyGraph::new();
    /// graph.add_edge("A", "B");
    /// graph.add_edge("B", "A");
    /// graph.add_edge("B", "C");
    ///
    /// let pairs = graph.bidirectional_pairs();
    /// assert_eq!(pairs.len(), 1);
    /// assert!(pairs.iter().next().unwrap().connects("B", "A"));
    /// ```
    pub fn bidirectional_pairs(&self) -> BTreeSet<BidirectionalPair> {
        let mut pairs = BTreeSet::new();

        for (a, deps) in self {
            for b in deps {
                if self.has_edge(b, a) {
                    if let Some(pair) = BidirectionalPair::new(a, b) {
                        pairs.insert(pair);
                    }
                }
            }
        }

        pairs
    }

    /// Names that are imported somewhere but never scanned.
    pub fn leaves(&self) -> BTreeSet<String> {
        self.iter()
            .flat_map(|(_, deps)| deps.iter())
            .filter(|dep| !self.contains(dep))
            .cloned()
            .collect()
    }

    /// Splits category files out of the graph.
    ///
    /// A key is a category iff its name contains `+` and its dependency set
    /// is empty. Returns the category names in name order and the graph of
    /// every other key.
    ///
    /// # Example
    ///
    /// ```rust
    /// use objcdep::graph::DependencyGraph;
    ///
    /// let mut graph = DependencyGraph::new();
    /// graph.insert_node("UIView+Layout");
    /// graph.insert_node("Empty");
    /// graph.add_edge("Main", "Empty");
    ///
    /// let (categories, rest) = graph.partition_categories();
    /// assert_eq!(categories, vec!["UIView+Layout"]);
    /// assert!(rest.contains("Empty"));
    /// assert!(!rest.contains("UIView+Layout"));
    /// ```
    pub fn partition_categories(self) -> (Vec<String>, DependencyGraph) {
        let (categories, rest): (Vec<_>, Vec<_>) = self
            .into_iter()
            .partition(|(name, deps)| deps.is_empty() && is_category_name(name));

        let categories = categories.into_iter().map(|(name, _)| name).collect();
        (categories, rest.into_iter().collect())
    }

    /// All names, keys and dependencies alike, that contain `marker`.
    pub fn names_containing(&self, marker: &str) -> BTreeSet<String> {
        self.iter()
            .flat_map(|(name, deps)| std::iter::once(name).chain(deps.iter()))
            .filter(|name| name.contains(marker))
            .cloned()
            .collect()
    }

    /// Builds the referenced-by mapping.
    ///
    /// # Example
    ///
    /// ```rust
    /// use objcdep::graph::DependencyGraph;
    ///
    /// let mut graph = DependencyGraph::new();
    /// graph.add_edge("A", "Shared");
    /// graph.add_edge("B", "Shared");
    ///
    /// let inverse = graph.inverse();
    /// assert_eq!(inverse.dependents_of("Shared").map(|d| d.len()), Some(2));
    /// assert!(inverse.dependents_of("A").is_none());
    /// ```
    pub fn inverse(&self) -> InverseGraph {
        let mut dependents: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
        for (name, deps) in self {
            for dep in deps {
                dependents
                    .entry(dep.clone())
                    .or_default()
                    .insert(name.clone());
            }
        }
        InverseGraph { dependents }
    }

    /// Distribution of dependency counts across keys.
    pub fn degree_histogram(&self) -> DegreeHistogram {
        let max = self.iter().map(|(_, deps)| deps.len()).max();
        let Some(max) = max else {
            return DegreeHistogram::default();
        };

        let mut buckets = vec![BTreeSet::new(); max + 1];
        for (name, deps) in self {
            buckets[deps.len()].insert(name.clone());
        }
        DegreeHistogram { buckets }
    }
}

/// Names carrying a type marker, such as every `*ViewController`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MarkerSet {
    pub marker: String,
    pub names: BTreeSet<String>,
}

impl MarkerSet {
    /// Collects the names of `graph` containing `marker`.
    ///
    /// An empty marker selects no names.
    pub fn collect(graph: &DependencyGraph, marker: &str) -> Self {
        let names = if marker.is_empty() {
            BTreeSet::new()
        } else {
            graph.names_containing(marker)
        };

        Self {
            marker: marker.to_string(),
            names,
        }
    }
}

/// A fully classified project, ready to be rendered.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ClassifiedGraph {
    /// Main graph with category files removed
    pub graph: DependencyGraph,
    /// Mutually importing pairs of the main graph
    pub bidirectional: BTreeSet<BidirectionalPair>,
    /// Imported but never scanned names
    pub leaves: BTreeSet<String>,
    /// Category files removed from the main graph
    pub categories: Vec<String>,
    /// Graph of precompiled header imports
    pub pch: DependencyGraph,
    /// First type-marker group
    pub primary: MarkerSet,
    /// Second type-marker group
    pub secondary: MarkerSet,
    /// Subfolders pruned from the scan
    pub ignored: Vec<String>,
}

impl ClassifiedGraph {
    /// Classifies a main graph and its precompiled header graph.
    ///
    /// Mutual pairs and leaves are taken from the full graph; marker sets
    /// are taken after category files have been split off.
    pub fn classify(
        graph: DependencyGraph,
        pch: DependencyGraph,
        markers: [&str; 2],
        ignored: Vec<String>,
    ) -> Self {
        let bidirectional = graph.bidirectional_pairs();
        let leaves = graph.leaves();
        let (categories, graph) = graph.partition_categories();
        let primary = MarkerSet::collect(&graph, markers[0]);
        let secondary = MarkerSet::collect(&graph, markers[1]);

        debug!(
            nodes = graph.node_count(),
            bidirectional = bidirectional.len(),
            leaves = leaves.len(),
            categories = categories.len(),
            "classified graph"
        );

        Self {
            graph,
            bidirectional,
            leaves,
            categories,
            pch,
            primary,
            secondary,
            ignored,
        }
    }

    /// Returns true if `from -> to` is part of a mutual pair.
    pub fn is_bidirectional(&self, from: &str, to: &str) -> bool {
        BidirectionalPair::new(from, to).is_some_and(|pair| self.bidirectional.contains(&pair))
    }
}
