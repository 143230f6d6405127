//! Turns scanned source files into a [`DependencyGraph`].

use tracing::{debug, trace};

use super::DependencyGraph;
use crate::analysis::{strip_extension, ImportExtractor, ScanOptions, SourceFile, SourceTree};

/// Marker that identifies category (class extension) files, e.g. `NSString+Utils`.
pub const CATEGORY_MARKER: char = '+';

/// Returns true if `name` looks like a category file.
pub fn is_category_name(name: &str) -> bool {
    name.contains(CATEGORY_MARKER)
}

/// Builds dependency graphs from source files.
///
/// Edges are filtered while the graph is assembled:
///
/// - imported names lose their extension unless extensions are kept
/// - an import of the file itself is dropped
/// - any edge touching a category name is dropped, from either side
///
/// Every file still gets a key, even when none of its imports survive.
#[derive(Debug, Clone)]
pub struct GraphBuilder {
    extractor: ImportExtractor,
    keep_extensions: bool,
}

impl GraphBuilder {
    /// Creates a builder with an explicit extractor.
    pub fn new(extractor: ImportExtractor, keep_extensions: bool) -> Self {
        Self {
            extractor,
            keep_extensions,
        }
    }

    /// Creates a builder configured from scan options.
    pub fn from_options(options: &ScanOptions) -> Self {
        Self::new(options.extractor(), options.keep_extensions)
    }

    /// Builds the graph of a single extension group.
    pub fn build<'a, I>(&self, files: I) -> DependencyGraph
    where
        I: IntoIterator<Item = &'a SourceFile>,
    {
        let mut graph = DependencyGraph::new();

        for file in files {
            graph.insert_node(&file.name);

            for imported in self.extractor.imports(&file.content) {
                // Checked on the raw import, so `Foo.c++` counts as a category.
                if is_category_name(&imported) || is_category_name(&file.name) {
                    trace!(file = %file.name, %imported, "dropped category edge");
                    continue;
                }

                let dependency = if self.keep_extensions {
                    imported.as_str()
                } else {
                    strip_extension(&imported)
                };
                if !graph.add_edge(&file.name, dependency) {
                    trace!(file = %file.name, "dropped self import");
                }
            }
        }

        debug!(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            "built graph"
        );
        graph
    }

    /// Builds one graph per extension group and unions them by node name.
    pub fn build_groups(&self, tree: &SourceTree, extensions: &[&str]) -> DependencyGraph {
        extensions
            .iter()
            .map(|ext| self.build(tree.group(ext)))
            .fold(DependencyGraph::new(), DependencyGraph::union)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::ImportMode;
    use regex::Regex;

    fn builder() -> GraphBuilder {
        GraphBuilder::new(ImportExtractor::new(ImportMode::Local, None), false)
    }

    fn deps(graph: &DependencyGraph, name: &str) -> Vec<String> {
        graph
            .dependencies(name)
            .map(|d| d.iter().cloned().collect())
            .unwrap_or_default()
    }

    #[test]
    fn test_mutual_imports() {
        let files = vec![
            SourceFile::new("A", "#import \"B.h\"\n"),
            SourceFile::new("B", "#import \"A.h\"\n"),
        ];
        let graph = builder().build(&files);

        assert_eq!(deps(&graph, "A"), vec!["B"]);
        assert_eq!(deps(&graph, "B"), vec!["A"]);
    }

    #[test]
    fn test_file_without_imports_gets_key() {
        let files = vec![SourceFile::new("Lonely", "int main() { return 0; }\n")];
        let graph = builder().build(&files);

        assert!(graph.contains("Lonely"));
        assert!(deps(&graph, "Lonely").is_empty());
    }

    #[test]
    fn test_own_header_import_is_not_a_self_loop() {
        let files = vec![SourceFile::new("Foo", "#import \"Foo.h\"\n#import \"Bar.h\"\n")];
        let graph = builder().build(&files);

        assert_eq!(deps(&graph, "Foo"), vec!["Bar"]);
    }

    #[test]
    fn test_keep_extensions() {
        let builder = GraphBuilder::new(ImportExtractor::new(ImportMode::Local, None), true);
        let files = vec![SourceFile::new("Foo.m", "#import \"Foo.h\"\n#import \"Foo.m\"\n")];
        let graph = builder.build(&files);

        assert_eq!(deps(&graph, "Foo.m"), vec!["Foo.h"]);
    }

    #[test]
    fn test_category_edges_dropped_both_ways() {
        let files = vec![
            SourceFile::new("Foo", "#import \"NSString+Utils.h\"\n#import \"Bar.h\"\n"),
            SourceFile::new("NSString+Utils", "#import \"Foo.h\"\n"),
        ];
        let graph = builder().build(&files);

        assert_eq!(deps(&graph, "Foo"), vec!["Bar"]);
        assert!(deps(&graph, "NSString+Utils").is_empty());
    }

    #[test]
    fn test_category_marker_in_import_extension() {
        let files = vec![SourceFile::new("Bar", "#include \"Foo.c++\"\n#include \"Baz.h\"\n")];
        let graph = builder().build(&files);

        assert_eq!(deps(&graph, "Bar"), vec!["Baz"]);
    }

    #[test]
    fn test_system_mode_keeps_framework_paths() {
        let builder = GraphBuilder::new(ImportExtractor::new(ImportMode::System, None), false);
        let files = vec![SourceFile::new("App", "#import <UIKit/UIKit.h>\n")];
        let graph = builder.build(&files);

        assert_eq!(deps(&graph, "App"), vec!["UIKit/UIKit"]);
    }

    #[test]
    fn test_excluded_imports_are_skipped() {
        let extractor =
            ImportExtractor::new(ImportMode::Local, Some(Regex::new("Test.*").unwrap()));
        let builder = GraphBuilder::new(extractor, false);
        let files = vec![SourceFile::new("Foo", "#import \"FooTests.h\"\n#import \"Bar.h\"\n")];
        let graph = builder.build(&files);

        assert_eq!(deps(&graph, "Foo"), vec!["Bar"]);
    }

    #[test]
    fn test_build_groups_unions_by_name() {
        let mut tree = SourceTree::default();
        tree.insert("h", SourceFile::new("Foo", "#import \"Base.h\"\n"));
        tree.insert("m", SourceFile::new("Foo", "#import \"Foo.h\"\n#import \"Helper.h\"\n"));
        tree.insert("m", SourceFile::new("Main", ""));
        tree.insert("pch", SourceFile::new("Prefix", "#import \"Config.h\"\n"));

        let graph = builder().build_groups(&tree, &["h", "m"]);

        assert_eq!(deps(&graph, "Foo"), vec!["Base", "Helper"]);
        assert!(graph.contains("Main"));
        assert!(!graph.contains("Prefix"));
    }

    #[test]
    fn test_is_category_name() {
        assert!(is_category_name("UIView+Layout"));
        assert!(!is_category_name("UIViewLayout"));
    }
}
