//! Source analysis for objcdep.
//!
//! This module finds the source files of a project and extracts the local
//! `#import` / `#include` directives from each of them.
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use objcdep::analysis::{ScanOptions, SourceTree, SOURCE_EXTENSIONS};
//!
//! let options = ScanOptions::new().with_exclude("Tests?$")?;
//! let tree = SourceTree::scan(Path::new("./MyApp"), SOURCE_EXTENSIONS, &options)?;
//! let extractor = options.extractor();
//!
//! for file in tree.group("m") {
//!     for import in extractor.imports(&file.content) {
//!         println!("{} -> {}", file.name, import);
//!     }
//! }
//! ```

pub mod imports;
pub mod scan;

pub use imports::{ImportExtractor, ImportMode};
pub use scan::{
    strip_extension, ScanError, ScanOptions, ScanResult, SourceFile, SourceTree, PCH_EXTENSION,
    SOURCE_EXTENSIONS,
};
