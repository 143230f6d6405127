//! Graphviz DOT export implementation.
//!
//! Writes the classified graph as a `digraph` with one styling section per
//! classification: plain imports, precompiled header imports, mutual
//! imports, leaves, the two type-marker groups, and the category and
//! ignored-folder annotation nodes.

use super::Exporter;
use crate::graph::ClassifiedGraph;
use std::collections::BTreeSet;
use std::io::{self, Write};

/// Node style applied to one type-marker group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkerStyle {
    pub shape: String,
    pub fill_color: String,
    pub font_color: String,
}

impl MarkerStyle {
    pub fn new(
        shape: impl Into<String>,
        fill_color: impl Into<String>,
        font_color: impl Into<String>,
    ) -> Self {
        Self {
            shape: shape.into(),
            fill_color: fill_color.into(),
            font_color: font_color.into(),
        }
    }

    /// Dark filled boxes, used for view controllers by default.
    pub fn dark_box() -> Self {
        Self::new("box", "gray10", "white")
    }

    /// Light filled ovals, used for view models by default.
    pub fn light_oval() -> Self {
        Self::new("oval", "gray85", "black")
    }
}

/// Styling options for DOT output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    /// Style of the first type-marker group
    pub primary: MarkerStyle,
    /// Style of the second type-marker group
    pub secondary: MarkerStyle,
    /// Draw imported-but-unscanned names as dashed gray nodes
    pub show_leaves: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            primary: MarkerStyle::dark_box(),
            secondary: MarkerStyle::light_oval(),
            show_leaves: false,
        }
    }
}

/// DOT exporter implementation.
#[derive(Debug, Clone, Default)]
pub struct DotExporter {
    options: RenderOptions,
}

impl DotExporter {
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }

    /// Quote a node identifier, escaping backslashes and quotes.
    fn quote(name: &str) -> String {
        format!("\"{}\"", Self::escape(name))
    }

    fn escape(value: &str) -> String {
        value.replace('\\', "\\\\").replace('"', "\\\"")
    }

    /// Label listing names one per line.
    fn label(names: &[String]) -> String {
        let escaped: Vec<String> = names.iter().map(|n| Self::escape(n)).collect();
        format!("\"{}\"", escaped.join("\\n"))
    }

    fn write_unidirectional<W: Write>(data: &ClassifiedGraph, writer: &mut W) -> io::Result<()> {
        writeln!(writer, "\tnode [shape=box style=rounded];")?;
        writeln!(writer, "\tedge [color=gray60];")?;

        for (name, deps) in &data.graph {
            if deps.is_empty() {
                writeln!(writer, "\t{} -> {{}};", Self::quote(name))?;
            }
            for dep in deps {
                if !data.is_bidirectional(name, dep) {
                    writeln!(writer, "\t{} -> {};", Self::quote(name), Self::quote(dep))?;
                }
            }
        }
        Ok(())
    }

    fn write_pch<W: Write>(data: &ClassifiedGraph, writer: &mut W) -> io::Result<()> {
        writeln!(writer, "\t")?;
        for (name, deps) in &data.pch {
            writeln!(writer, "\t{} [color=red];", Self::quote(name))?;
            for dep in deps {
                writeln!(
                    writer,
                    "\t{} -> {} [color=red];",
                    Self::quote(name),
                    Self::quote(dep)
                )?;
            }
        }
        Ok(())
    }

    fn write_bidirectional<W: Write>(data: &ClassifiedGraph, writer: &mut W) -> io::Result<()> {
        writeln!(writer, "\t")?;
        writeln!(writer, "\tedge [color=black, dir=both];")?;
        for pair in &data.bidirectional {
            writeln!(
                writer,
                "\t{} -> {};",
                Self::quote(&pair.first),
                Self::quote(&pair.second)
            )?;
        }
        Ok(())
    }

    fn write_leaves<W: Write>(data: &ClassifiedGraph, writer: &mut W) -> io::Result<()> {
        writeln!(writer, "\t")?;
        for leaf in &data.leaves {
            writeln!(
                writer,
                "\t{} [color=gray, style=dashed, fontcolor=gray shape=box]",
                Self::quote(leaf)
            )?;
        }
        Ok(())
    }

    fn write_marker_style<W: Write>(
        names: &BTreeSet<String>,
        style: &MarkerStyle,
        writer: &mut W,
    ) -> io::Result<()> {
        writeln!(writer, "\t")?;
        for name in names {
            writeln!(
                writer,
                "\t{} [shape={} fillcolor={} style=filled fontcolor={}]",
                Self::quote(name),
                style.shape,
                style.fill_color,
                style.font_color
            )?;
        }
        Ok(())
    }

    fn write_categories<W: Write>(data: &ClassifiedGraph, writer: &mut W) -> io::Result<()> {
        if data.categories.is_empty() {
            return Ok(());
        }
        writeln!(writer, "\t")?;
        writeln!(writer, "\tedge [color=black];")?;
        writeln!(writer, "\tnode [shape=plaintext];")?;
        writeln!(
            writer,
            "\t\"Categories\" [label={}];",
            Self::label(&data.categories)
        )
    }

    fn write_ignored<W: Write>(data: &ClassifiedGraph, writer: &mut W) -> io::Result<()> {
        if data.ignored.is_empty() {
            return Ok(());
        }
        writeln!(writer, "\t")?;
        writeln!(writer, "\tnode [shape=box, color=blue];")?;
        writeln!(writer, "\t\"Ignored\" [label={}];", Self::label(&data.ignored))
    }
}

impl Exporter for DotExporter {
    fn export<W: Write>(&self, data: &ClassifiedGraph, writer: &mut W) -> io::Result<()> {
        writeln!(writer, "digraph G {{")?;

        Self::write_unidirectional(data, writer)?;
        Self::write_pch(data, writer)?;
        Self::write_bidirectional(data, writer)?;
        if self.options.show_leaves {
            Self::write_leaves(data, writer)?;
        }
        Self::write_marker_style(&data.primary.names, &self.options.primary, writer)?;
        Self::write_marker_style(&data.secondary.names, &self.options.secondary, writer)?;
        Self::write_categories(data, writer)?;
        Self::write_ignored(data, writer)?;

        writeln!(writer, "}}")
    }
}
