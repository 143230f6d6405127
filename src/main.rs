use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use objcdep::analysis::ScanOptions;
use objcdep::export::{self, ExportFormat, RenderOptions};
use objcdep::graph::ClassifiedGraph;
use objcdep::pipeline::{analyze_project, DEFAULT_PRIMARY_MARKER, DEFAULT_SECONDARY_MARKER};

#[derive(Parser, Debug)]
#[command(name = "objcdep")]
#[command(version)]
#[command(
    about = "Import dependency graph for Objective-C, C and C++ projects, in Graphviz format",
    long_about = "Scans a project for #import/#include directives and prints the file \
                  dependency graph as a Graphviz document.\n\n\
                  - red arrows: .pch imports\n\
                  - black two-way arrows: mutual imports"
)]
struct Cli {
    /// Path to the folder hierarchy containing the source files
    project_path: PathBuf,

    /// Regular expression of names to exclude, as files and as imports
    #[arg(short = 'x', long, default_value = "")]
    exclude: String,

    /// Subfolder names to ignore
    #[arg(short, long, num_args = 1..)]
    ignore: Vec<String>,

    /// Include system dependencies (#import <...>)
    #[arg(short, long)]
    system: bool,

    /// Keep file extensions in node names
    #[arg(short, long)]
    extensions: bool,

    /// Output format: dot or json
    #[arg(short, long, default_value_t = ExportFormat::Dot)]
    format: ExportFormat,

    /// Draw imported but unscanned files as dashed nodes
    #[arg(long)]
    leaves: bool,

    /// Name marker of the first highlighted type group
    #[arg(long, default_value = DEFAULT_PRIMARY_MARKER)]
    primary_marker: String,

    /// Name marker of the second highlighted type group
    #[arg(long, default_value = DEFAULT_SECONDARY_MARKER)]
    secondary_marker: String,

    /// Print the dependency count histogram and import cycles to stderr
    #[arg(long)]
    stats: bool,

    /// Print the files importing NAME to stderr
    #[arg(long, value_name = "NAME")]
    dependents: Option<String>,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("OBJCDEP_LOG")
        .unwrap_or_else(|_| EnvFilter::new("objcdep=warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact().with_writer(io::stderr))
        .init();
}

fn print_diagnostics(cli: &Cli, classified: &ClassifiedGraph) -> io::Result<()> {
    let mut stderr = io::stderr().lock();

    if cli.stats {
        write!(stderr, "{}", classified.graph.degree_histogram())?;

        let cycles = classified.graph.detect_cycles();
        writeln!(stderr)?;
        writeln!(stderr, "{} import cycle(s)", cycles.len())?;
        for cycle in &cycles {
            writeln!(stderr, "  [{}] {}", cycle.len(), cycle.members())?;
        }
    }

    if let Some(name) = &cli.dependents {
        let inverse = classified.graph.inverse();
        match inverse.dependents_of(name) {
            Some(dependents) => {
                let listed: Vec<&str> = dependents.iter().map(String::as_str).collect();
                writeln!(stderr, "{} is imported by: {}", name, listed.join(", "))?;
            }
            None => writeln!(stderr, "{} is not imported by any scanned file", name)?,
        }
    }

    Ok(())
}

fn main() -> anyhow::Result<()> {
    init_tracing();

    let cli = Cli::parse();

    let options = ScanOptions::new()
        .with_exclude(&cli.exclude)
        .with_context(|| format!("invalid --exclude pattern '{}'", cli.exclude))?
        .with_ignore(cli.ignore.clone())
        .with_system_imports(cli.system)
        .with_keep_extensions(cli.extensions);

    info!(path = %cli.project_path.display(), "analyzing project");

    let classified = analyze_project(
        &cli.project_path,
        &options,
        [cli.primary_marker.as_str(), cli.secondary_marker.as_str()],
    )
    .with_context(|| format!("failed to analyze {}", cli.project_path.display()))?;

    let render_options = RenderOptions {
        show_leaves: cli.leaves,
        ..RenderOptions::default()
    };
    let document = export::export_to_string(cli.format, &render_options, &classified)
        .context("failed to render graph")?;

    print_diagnostics(&cli, &classified).context("failed to write diagnostics")?;

    let mut stdout = io::stdout().lock();
    stdout
        .write_all(document.as_bytes())
        .context("failed to write graph")?;

    Ok(())
}
