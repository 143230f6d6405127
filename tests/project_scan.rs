//! End-to-end scans of small project trees.

use std::fs;
use std::path::Path;

use objcdep::analysis::{ScanError, ScanOptions};
use objcdep::export::{export_to_string, ExportFormat, RenderOptions};
use objcdep::graph::{BidirectionalPair, ClassifiedGraph};
use objcdep::pipeline::analyze_project;

const MARKERS: [&str; 2] = ["ViewController", "ViewModel"];

fn write(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().expect("file has a parent")).expect("create dirs");
    fs::write(path, content).expect("write file");
}

fn analyze(root: &Path, options: &ScanOptions) -> ClassifiedGraph {
    analyze_project(root, options, MARKERS).expect("analysis should succeed")
}

fn dot(classified: &ClassifiedGraph) -> String {
    export_to_string(ExportFormat::Dot, &RenderOptions::default(), classified)
        .expect("render should succeed")
}

fn deps(classified: &ClassifiedGraph, name: &str) -> Vec<String> {
    classified
        .graph
        .dependencies(name)
        .map(|d| d.iter().cloned().collect())
        .unwrap_or_default()
}

#[test]
fn mutual_imports_form_one_bidirectional_pair() {
    let dir = tempfile::tempdir().expect("temp dir");
    write(dir.path(), "A.h", "#import \"B.h\"\n");
    write(dir.path(), "B.h", "#import \"A.h\"\n");

    let classified = analyze(dir.path(), &ScanOptions::new());

    assert_eq!(deps(&classified, "A"), vec!["B"]);
    assert_eq!(deps(&classified, "B"), vec!["A"]);
    assert_eq!(classified.bidirectional.len(), 1);
    assert!(classified
        .bidirectional
        .contains(&BidirectionalPair::new("A", "B").expect("distinct names")));
    assert!(classified.leaves.is_empty());
    assert!(classified.categories.is_empty());
}

#[test]
fn unscanned_import_is_a_leaf() {
    let dir = tempfile::tempdir().expect("temp dir");
    write(dir.path(), "A.m", "#import \"External.h\"\n");

    let classified = analyze(dir.path(), &ScanOptions::new());

    assert_eq!(classified.leaves.iter().collect::<Vec<_>>(), vec!["External"]);
    assert!(!classified.graph.contains("External"));
}

#[test]
fn category_file_is_split_from_graph() {
    let dir = tempfile::tempdir().expect("temp dir");
    write(dir.path(), "Foo+Category.m", "");
    write(dir.path(), "Foo.m", "#import \"Foo.h\"\n");

    let classified = analyze(dir.path(), &ScanOptions::new());

    assert_eq!(classified.categories, vec!["Foo+Category"]);
    assert!(!classified.graph.contains("Foo+Category"));
    assert!(classified.graph.contains("Foo"));
    assert!(dot(&classified).contains("\"Categories\" [label=\"Foo+Category\"]"));
}

#[test]
fn pch_imports_form_a_separate_graph() {
    let dir = tempfile::tempdir().expect("temp dir");
    write(dir.path(), "App-Prefix.pch", "#import \"Config.h\"\n");
    write(dir.path(), "Config.h", "");

    let classified = analyze(dir.path(), &ScanOptions::new());

    assert!(classified.pch.has_edge("App-Prefix", "Config"));
    assert!(!classified.graph.contains("App-Prefix"));
    assert!(classified.bidirectional.is_empty());

    let document = dot(&classified);
    assert!(document.contains("\t\"App-Prefix\" -> \"Config\" [color=red];\n"));
    assert!(!document.contains("\t\"App-Prefix\" -> \"Config\";\n"));
}

#[test]
fn excluded_names_never_appear() {
    let dir = tempfile::tempdir().expect("temp dir");
    write(dir.path(), "Foo.m", "#import \"FooTests.h\"\n#import \"Bar.h\"\n");
    write(dir.path(), "FooTests.m", "#import \"Foo.h\"\n");
    write(dir.path(), "Bar.h", "");

    let options = ScanOptions::new().with_exclude("Test.*").expect("valid pattern");
    let classified = analyze(dir.path(), &options);

    assert!(!classified.graph.contains("FooTests"));
    assert_eq!(deps(&classified, "Foo"), vec!["Bar"]);
    assert!(!dot(&classified).contains("FooTests"));
}

#[test]
fn node_emptied_by_filtering_renders_without_edges() {
    let dir = tempfile::tempdir().expect("temp dir");
    write(
        dir.path(),
        "Widget.m",
        "#import \"Widget.h\"\n#import \"UIView+Widget.h\"\n",
    );

    let classified = analyze(dir.path(), &ScanOptions::new());

    assert!(deps(&classified, "Widget").is_empty());
    assert!(dot(&classified).contains("\t\"Widget\" -> {};\n"));
}

#[test]
fn headers_and_sources_merge_by_stem() {
    let dir = tempfile::tempdir().expect("temp dir");
    write(dir.path(), "Model.h", "#import \"Base.h\"\n");
    write(dir.path(), "Model.m", "#import \"Model.h\"\n#import \"Store.h\"\n");
    write(dir.path(), "src/Engine.cpp", "#include \"Model.h\"\n");

    let classified = analyze(dir.path(), &ScanOptions::new());

    assert_eq!(deps(&classified, "Model"), vec!["Base", "Store"]);
    assert_eq!(deps(&classified, "Engine"), vec!["Model"]);
}

#[test]
fn keep_extensions_separates_header_and_source() {
    let dir = tempfile::tempdir().expect("temp dir");
    write(dir.path(), "Model.h", "");
    write(dir.path(), "Model.m", "#import \"Model.h\"\n");

    let options = ScanOptions::new().with_keep_extensions(true);
    let classified = analyze(dir.path(), &options);

    assert_eq!(deps(&classified, "Model.m"), vec!["Model.h"]);
    assert!(classified.graph.contains("Model.h"));
}

#[test]
fn system_flag_adds_framework_imports() {
    let dir = tempfile::tempdir().expect("temp dir");
    write(dir.path(), "App.m", "#import <UIKit/UIKit.h>\n#import \"Local.h\"\n");

    let local = analyze(dir.path(), &ScanOptions::new());
    assert_eq!(deps(&local, "App"), vec!["Local"]);

    let system = analyze(dir.path(), &ScanOptions::new().with_system_imports(true));
    assert_eq!(deps(&system, "App"), vec!["Local", "UIKit/UIKit"]);
}

#[test]
fn ignored_folders_are_pruned_and_listed() {
    let dir = tempfile::tempdir().expect("temp dir");
    write(dir.path(), "App.m", "#import \"Lib.h\"\n");
    write(dir.path(), "Pods/Lib/Lib.h", "#import \"App.h\"\n");

    let options = ScanOptions::new().with_ignore(vec!["Pods".to_string()]);
    let classified = analyze(dir.path(), &options);

    assert!(!classified.graph.contains("Lib"));
    assert!(classified.leaves.contains("Lib"));
    assert!(dot(&classified).contains("\t\"Ignored\" [label=\"Pods\"];\n"));
}

#[test]
fn type_markers_are_styled() {
    let dir = tempfile::tempdir().expect("temp dir");
    write(
        dir.path(),
        "LoginViewController.m",
        "#import \"LoginViewModel.h\"\n",
    );
    write(dir.path(), "LoginViewModel.m", "");

    let classified = analyze(dir.path(), &ScanOptions::new());
    let document = dot(&classified);

    assert!(document.contains("\"LoginViewController\" [shape=box fillcolor=gray10"));
    assert!(document.contains("\"LoginViewModel\" [shape=oval fillcolor=gray85"));
}

#[test]
fn invalid_exclude_pattern_is_rejected() {
    let result = ScanOptions::new().with_exclude("[unclosed");
    assert!(matches!(result, Err(ScanError::InvalidPattern(_))));
}

#[test]
fn missing_project_is_fatal() {
    let dir = tempfile::tempdir().expect("temp dir");
    let result = analyze_project(&dir.path().join("missing"), &ScanOptions::new(), MARKERS);
    assert!(result.is_err());
}

#[test]
fn json_output_matches_classification() {
    let dir = tempfile::tempdir().expect("temp dir");
    write(dir.path(), "A.h", "#import \"B.h\"\n");
    write(dir.path(), "B.h", "#import \"A.h\"\n#import \"C.h\"\n");

    let classified = analyze(dir.path(), &ScanOptions::new());
    let json = export_to_string(ExportFormat::Json, &RenderOptions::default(), &classified)
        .expect("render should succeed");
    let parsed: serde_json::Value = serde_json::from_str(&json).expect("valid json");

    assert_eq!(parsed["summary"]["files"], 2);
    assert_eq!(parsed["leaves"], serde_json::json!(["C"]));
}
