//! objcdep - import dependency graphs for Objective-C, C and C++ projects
//!
//! This crate scans a source tree for `#import` / `#include` directives,
//! builds a file-level dependency graph, classifies it (mutual imports,
//! unscanned leaves, category files, precompiled header imports, type
//! groups) and renders it as a Graphviz document.

pub mod analysis;
pub mod export;
pub mod graph;
pub mod pipeline;
