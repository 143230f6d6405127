//! Line-based `#import` / `#include` extraction.
//!
//! Each line of a source file is matched against one of two patterns: the
//! local pattern only accepts quoted includes (`#import "Foo.h"`), the
//! system pattern also accepts angle brackets (`#include <stdio.h>`).
//! Nothing beyond the line pattern is parsed; a matching line is trusted
//! at face value.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

// #import "Foo.h"
static LOCAL_IMPORT_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"^\s*#(?:import|include)\s+"(?P<name>\S*?)(?P<ext>\.(?:h|hpp|hh))?""#)
        .unwrap()
});

// #import "Foo.h" or #import <Foo/Foo.h>
static SYSTEM_IMPORT_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"^\s*#(?:import|include)\s+["<](?P<name>\S*?)(?P<ext>\.(?:h|hpp|hh))?[">]"#)
        .unwrap()
});

/// Which include syntax the extractor accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ImportMode {
    /// Quoted includes only: `#import "Foo.h"`
    #[default]
    Local,
    /// Quoted and angle-bracket includes: `#import <UIKit/UIKit.h>`
    System,
}

impl ImportMode {
    /// Picks the mode from the `--system` flag.
    pub fn from_system_flag(system: bool) -> Self {
        if system {
            ImportMode::System
        } else {
            ImportMode::Local
        }
    }

    fn pattern(self) -> &'static Regex {
        match self {
            ImportMode::Local => &LOCAL_IMPORT_PATTERN,
            ImportMode::System => &SYSTEM_IMPORT_PATTERN,
        }
    }
}

/// Extracts imported file names from source text.
///
/// # Example
///
/// ```rust
/// use objcdep::analysis::{ImportExtractor, ImportMode};
///
/// let extractor = ImportExtractor::new(ImportMode::Local, None);
/// let source = "#import \"Foo.h\"\n#import <UIKit/UIKit.h>\n";
/// let imports: Vec<String> = extractor.imports(source).collect();
///
/// assert_eq!(imports, vec!["Foo.h".to_string()]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ImportExtractor {
    mode: ImportMode,
    exclude: Option<Regex>,
}

impl ImportExtractor {
    /// Creates an extractor for the given mode and optional exclusion pattern.
    ///
    /// Imported names matched by `exclude` are silently skipped.
    pub fn new(mode: ImportMode, exclude: Option<Regex>) -> Self {
        Self { mode, exclude }
    }

    /// Returns the include syntax this extractor accepts.
    pub fn mode(&self) -> ImportMode {
        self.mode
    }

    /// Lazily yields the names imported by `content`, one per matching line.
    ///
    /// The header extension is kept on the yielded name when the include
    /// carried one. Lines that do not match, reference an empty name, or
    /// match the exclusion pattern yield nothing.
    pub fn imports<'a>(&'a self, content: &'a str) -> impl Iterator<Item = String> + 'a {
        content.lines().filter_map(move |line| self.extract_line(line))
    }

    /// Extracts the imported name from a single line, if any.
    pub fn extract_line(&self, line: &str) -> Option<String> {
        let caps = self.mode.pattern().captures(line)?;
        let name = imported_name(&caps)?;

        if let Some(exclude) = &self.exclude {
            if exclude.is_match(&name) {
                return None;
            }
        }

        Some(name)
    }
}

/// Joins the captured token and its optional header extension.
fn imported_name(caps: &Captures<'_>) -> Option<String> {
    let token = caps.name("name").map(|m| m.as_str()).unwrap_or("");
    if token.is_empty() {
        return None;
    }

    match caps.name("ext") {
        Some(ext) => Some(format!("{}{}", token, ext.as_str())),
        None => Some(token.to_string()),
    }
}
