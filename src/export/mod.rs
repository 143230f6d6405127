//! Export functionality for classified dependency graphs.
//!
//! This module provides exporters that write a [`ClassifiedGraph`] as a
//! Graphviz DOT document or as JSON.

pub mod dot;
pub mod json;

pub use dot::{DotExporter, MarkerStyle, RenderOptions};
pub use json::JsonExporter;

use crate::graph::ClassifiedGraph;
use std::io::{self, Write};

/// Export format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    /// Graphviz DOT - the styled import graph
    #[default]
    Dot,
    /// JSON format - machine-readable, full classification
    Json,
}

impl std::str::FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "dot" | "graphviz" => Ok(ExportFormat::Dot),
            "json" => Ok(ExportFormat::Json),
            _ => Err(format!(
                "Unknown export format: '{}'. Valid formats: dot, json",
                s
            )),
        }
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExportFormat::Dot => write!(f, "dot"),
            ExportFormat::Json => write!(f, "json"),
        }
    }
}

/// Trait for exporters.
pub trait Exporter {
    /// Export the graph to the given writer.
    fn export<W: Write>(&self, data: &ClassifiedGraph, writer: &mut W) -> io::Result<()>;
}

/// Export the graph in the specified format.
pub fn export<W: Write>(
    format: ExportFormat,
    options: &RenderOptions,
    data: &ClassifiedGraph,
    writer: &mut W,
) -> io::Result<()> {
    match format {
        ExportFormat::Dot => DotExporter::new(options.clone()).export(data, writer),
        ExportFormat::Json => JsonExporter.export(data, writer),
    }
}

/// Export the graph to a string.
pub fn export_to_string(
    format: ExportFormat,
    options: &RenderOptions,
    data: &ClassifiedGraph,
) -> io::Result<String> {
    let mut buffer = Vec::new();
    export(format, options, data, &mut buffer)?;
    String::from_utf8(buffer).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}
