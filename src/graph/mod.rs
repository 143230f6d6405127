//! Graph module for file import relationships.
//!
//! This module provides the [`DependencyGraph`] built from scanned files,
//! the [`GraphBuilder`] that assembles it, and the classification that
//! turns it into a [`ClassifiedGraph`] ready for rendering.
//!
//! # Example
//!
//! ```rust
//! use objcdep::graph::{ClassifiedGraph, DependencyGraph};
//!
//! let mut graph = DependencyGraph::new();
//! graph.add_edge("A", "B");
//! graph.add_edge("B", "A");
//! graph.add_edge("A", "Foundation");
//! graph.insert_node("NSString+Extras");
//!
//! let classified = ClassifiedGraph::classify(
//!     graph,
//!     DependencyGraph::new(),
//!     ["ViewController", "ViewModel"],
//!     Vec::new(),
//! );
//!
//! assert_eq!(classified.bidirectional.len(), 1);
//! assert!(classified.leaves.contains("Foundation"));
//! assert_eq!(classified.categories, vec!["NSString+Extras"]);
//! ```

mod builder;
mod classify;
mod dependency_graph;

pub use builder::{is_category_name, GraphBuilder, CATEGORY_MARKER};
pub use classify::{BidirectionalPair, ClassifiedGraph, DegreeHistogram, InverseGraph, MarkerSet};
pub use dependency_graph::{CycleInfo, DependencyGraph};
