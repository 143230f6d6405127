//! Project traversal.
//!
//! Walks a project tree once, pruning ignored subfolders, and collects the
//! source files the graph builder consumes. File contents are read eagerly:
//! a file that cannot be read aborts the whole scan.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use regex::Regex;
use thiserror::Error;
use tracing::debug;
use walkdir::{DirEntry, WalkDir};

use super::imports::{ImportExtractor, ImportMode};

/// Extensions whose files make up the main dependency graph, in scan order.
pub const SOURCE_EXTENSIONS: &[&str] = &["h", "hh", "hpp", "m", "mm", "c", "cc", "cpp"];

/// Extension of precompiled header files.
pub const PCH_EXTENSION: &str = "pch";

/// Errors that abort a scan.
#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Failed to read {}: {}", .path.display(), .source)]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to walk project tree: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("Invalid exclusion pattern: {0}")]
    InvalidPattern(#[from] regex::Error),
}

/// Result type for scan operations.
pub type ScanResult<T> = Result<T, ScanError>;

/// Options controlling which files are scanned and how they are named.
#[derive(Debug, Clone, Default)]
pub struct ScanOptions {
    /// Names matching this pattern are dropped, both as files and as imports.
    pub exclude: Option<Regex>,
    /// Subfolder names pruned from traversal at any depth.
    pub ignore: Vec<String>,
    /// Also match `#import <...>` includes.
    pub system_imports: bool,
    /// Keep the file extension in node names.
    pub keep_extensions: bool,
}

impl ScanOptions {
    /// Creates options with no exclusion pattern and nothing ignored.
    pub fn new() -> Self {
        Self::default()
    }

    /// Compiles and sets the exclusion pattern. An empty pattern clears it.
    pub fn with_exclude(mut self, pattern: &str) -> ScanResult<Self> {
        self.exclude = if pattern.is_empty() {
            None
        } else {
            Some(Regex::new(pattern)?)
        };
        Ok(self)
    }

    /// Sets the subfolder names to prune.
    pub fn with_ignore(mut self, ignore: Vec<String>) -> Self {
        self.ignore = ignore;
        self
    }

    /// Enables angle-bracket include matching.
    pub fn with_system_imports(mut self, system: bool) -> Self {
        self.system_imports = system;
        self
    }

    /// Keeps file extensions in node names.
    pub fn with_keep_extensions(mut self, keep: bool) -> Self {
        self.keep_extensions = keep;
        self
    }

    /// Builds the import extractor matching these options.
    pub fn extractor(&self) -> ImportExtractor {
        ImportExtractor::new(
            ImportMode::from_system_flag(self.system_imports),
            self.exclude.clone(),
        )
    }

    /// Maps a file name to its node name.
    pub fn node_name(&self, file_name: &str) -> String {
        if self.keep_extensions {
            file_name.to_string()
        } else {
            strip_extension(file_name).to_string()
        }
    }

    /// Returns true if the node name is dropped by the exclusion pattern.
    pub fn is_excluded(&self, name: &str) -> bool {
        self.exclude.as_ref().is_some_and(|re| re.is_match(name))
    }
}

/// Removes the last extension of `name`.
///
/// Directory components are kept, and a leading dot of the final component
/// does not start an extension (`.profile` stays `.profile`).
///
/// # Example
///
/// ```rust
/// use objcdep::analysis::strip_extension;
///
/// assert_eq!(strip_extension("Foo.h"), "Foo");
/// assert_eq!(strip_extension("Models/User.h"), "Models/User");
/// assert_eq!(strip_extension("archive.tar.gz"), "archive.tar");
/// assert_eq!(strip_extension("Makefile"), "Makefile");
/// ```
pub fn strip_extension(name: &str) -> &str {
    let base_start = name.rfind('/').map(|i| i + 1).unwrap_or(0);
    let base = &name[base_start..];
    let stem_len = base.len() - base.trim_start_matches('.').len();

    match base[stem_len..].rfind('.') {
        Some(dot) => &name[..base_start + stem_len + dot],
        None => name,
    }
}

/// A scanned source file, ready for import extraction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    /// Node name of the file (stem, or full name with extensions kept)
    pub name: String,
    /// Location on disk
    pub path: PathBuf,
    /// File content, decoded lossily
    pub content: String,
}

impl SourceFile {
    /// Creates a source file from in-memory content.
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            path: PathBuf::from(&name),
            name,
            content: content.into(),
        }
    }
}

/// Source files of a project, grouped by extension.
#[derive(Debug, Clone, Default)]
pub struct SourceTree {
    groups: BTreeMap<String, Vec<SourceFile>>,
}

impl SourceTree {
    /// Walks `root` and reads every file with one of `extensions`.
    ///
    /// Files whose node name matches the exclusion pattern are skipped
    /// without being read.
    pub fn scan(root: &Path, extensions: &[&str], options: &ScanOptions) -> ScanResult<Self> {
        let mut tree = SourceTree::default();

        let walker = WalkDir::new(root)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| !is_ignored_dir(e, &options.ignore));

        for entry in walker {
            let entry = entry?;
            let path = entry.path();

            // Links are not followed: a linked file is read through the link,
            // a linked directory is neither walked nor read.
            let file_type = entry.file_type();
            if file_type.is_symlink() {
                if path.is_dir() {
                    continue;
                }
            } else if !file_type.is_file() {
                continue;
            }

            let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
                continue;
            };
            if !extensions.contains(&ext) {
                continue;
            }

            let file_name = entry.file_name().to_string_lossy();
            let name = options.node_name(&file_name);
            if options.is_excluded(&name) {
                debug!(path = %path.display(), "excluded by pattern");
                continue;
            }

            let bytes = fs::read(path).map_err(|source| ScanError::Io {
                path: path.to_path_buf(),
                source,
            })?;
            debug!(path = %path.display(), %name, "scanned");

            tree.groups.entry(ext.to_string()).or_default().push(SourceFile {
                name,
                path: path.to_path_buf(),
                content: String::from_utf8_lossy(&bytes).into_owned(),
            });
        }

        Ok(tree)
    }

    /// Adds an in-memory file to the group of `extension`.
    pub fn insert(&mut self, extension: &str, file: SourceFile) {
        self.groups.entry(extension.to_string()).or_default().push(file);
    }

    /// Files scanned with the given extension, in traversal order.
    pub fn group(&self, extension: &str) -> &[SourceFile] {
        self.groups.get(extension).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Total number of scanned files.
    pub fn len(&self) -> usize {
        self.groups.values().map(Vec::len).sum()
    }

    /// Returns true if no file was scanned.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Check if a directory should be pruned from traversal.
fn is_ignored_dir(entry: &DirEntry, ignore: &[String]) -> bool {
    if entry.depth() == 0 || !entry.file_type().is_dir() {
        return false;
    }

    let name = entry.file_name().to_string_lossy();
    ignore.iter().any(|i| i.as_str() == name.as_ref())
}
