//! JSON export implementation.
//!
//! Exports the classified graph in JSON format for machine-readable output.

use super::Exporter;
use crate::graph::{BidirectionalPair, ClassifiedGraph, DependencyGraph, MarkerSet};
use serde::Serialize;
use std::collections::BTreeSet;
use std::io::{self, Write};

/// JSON exporter implementation.
pub struct JsonExporter;

/// Summary statistics for JSON output.
#[derive(Serialize)]
struct JsonSummary {
    files: usize,
    imports: usize,
    bidirectional: usize,
    leaves: usize,
    categories: usize,
    pch_files: usize,
}

/// Root JSON export structure.
#[derive(Serialize)]
struct JsonExport<'a> {
    summary: JsonSummary,
    nodes: &'a DependencyGraph,
    bidirectional: &'a BTreeSet<BidirectionalPair>,
    leaves: &'a BTreeSet<String>,
    categories: &'a [String],
    pch: &'a DependencyGraph,
    markers: JsonMarkers<'a>,
    #[serde(skip_serializing_if = "is_empty")]
    ignored: &'a [String],
}

/// Marker groups keyed by role rather than by marker string.
#[derive(Serialize)]
struct JsonMarkers<'a> {
    primary: &'a MarkerSet,
    secondary: &'a MarkerSet,
}

fn is_empty(list: &&[String]) -> bool {
    list.is_empty()
}

impl Exporter for JsonExporter {
    fn export<W: Write>(&self, data: &ClassifiedGraph, writer: &mut W) -> io::Result<()> {
        let export = JsonExport {
            summary: JsonSummary {
                files: data.graph.node_count(),
                imports: data.graph.edge_count(),
                bidirectional: data.bidirectional.len(),
                leaves: data.leaves.len(),
                categories: data.categories.len(),
                pch_files: data.pch.node_count(),
            },
            nodes: &data.graph,
            bidirectional: &data.bidirectional,
            leaves: &data.leaves,
            categories: &data.categories,
            pch: &data.pch,
            markers: JsonMarkers {
                primary: &data.primary,
                secondary: &data.secondary,
            },
            ignored: &data.ignored,
        };

        let json = serde_json::to_string_pretty(&export)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

        writeln!(writer, "{}", json)
    }
}
