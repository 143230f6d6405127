//! End-to-end analysis of a project directory.

use std::path::Path;

use tracing::{info, warn};

use crate::analysis::{ScanOptions, ScanResult, SourceTree, PCH_EXTENSION, SOURCE_EXTENSIONS};
use crate::graph::{ClassifiedGraph, GraphBuilder};

/// Default marker of the first styled type group.
pub const DEFAULT_PRIMARY_MARKER: &str = "ViewController";

/// Default marker of the second styled type group.
pub const DEFAULT_SECONDARY_MARKER: &str = "ViewModel";

/// Scans `root`, builds the main and precompiled header graphs, and
/// classifies them.
///
/// The whole tree is walked once. Header and implementation groups are
/// merged into the main graph; `.pch` files form their own graph. Any read
/// failure aborts the analysis.
///
/// # Example
///
/// ```ignore
/// use std::path::Path;
/// use objcdep::analysis::ScanOptions;
/// use objcdep::pipeline::analyze_project;
///
/// let options = ScanOptions::new().with_ignore(vec!["Pods".into()]);
/// let markers = ["ViewController", "ViewModel"];
/// let classified = analyze_project(Path::new("./MyApp"), &options, markers)?;
/// println!("{} files", classified.graph.node_count());
/// ```
pub fn analyze_project(
    root: &Path,
    options: &ScanOptions,
    markers: [&str; 2],
) -> ScanResult<ClassifiedGraph> {
    let mut extensions = SOURCE_EXTENSIONS.to_vec();
    extensions.push(PCH_EXTENSION);

    let tree = SourceTree::scan(root, &extensions, options)?;
    if tree.is_empty() {
        warn!(root = %root.display(), "no source files found");
    }

    let builder = GraphBuilder::from_options(options);
    let graph = builder.build_groups(&tree, SOURCE_EXTENSIONS);
    let pch = builder.build(tree.group(PCH_EXTENSION));

    info!(
        files = tree.len(),
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        pch = pch.node_count(),
        "scanned project"
    );

    Ok(ClassifiedGraph::classify(
        graph,
        pch,
        markers,
        options.ignore.clone(),
    ))
}
