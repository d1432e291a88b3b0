//! Command-line interface for nested archive expansion.
//!
//! Takes a root archive (or a directory to expand in place) and flattens
//! every level of nested archives into a plain directory tree.

use clap::Parser;
use expander::{ExpandOptions, ExpandReport, ExtractionLayout};
use std::path::PathBuf;
use std::process;

#[derive(Parser)]
#[command(name = "expand")]
#[command(version, about = "Recursively expand nested archives", long_about = None)]
struct Cli {
    /// Root archive to expand, or a directory whose archives are expanded in place
    input: PathBuf,

    /// Output directory (defaults to a sibling directory named after the archive)
    output_dir: Option<PathBuf>,

    /// Keep archive files after extraction instead of deleting them
    #[arg(long)]
    keep_archives: bool,

    /// Nested archive layout: subdir, inplace
    #[arg(long, default_value = "subdir")]
    layout: String,

    /// Print the final report as JSON
    #[arg(long)]
    json: bool,
}

fn main() {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let options = ExpandOptions {
        delete_archives: !cli.keep_archives,
        layout: parse_layout(&cli.layout)?,
    };

    let report = if cli.input.is_dir() {
        if cli.output_dir.is_some() {
            return Err("an output directory cannot be combined with a directory input".into());
        }
        expander::expand_dir(&cli.input, &options)?
    } else {
        expander::expand(&cli.input, cli.output_dir.as_deref(), &options)?
    };

    print_report(&report, cli.json)
}

fn parse_layout(value: &str) -> Result<ExtractionLayout, Box<dyn std::error::Error>> {
    match value {
        "subdir" => Ok(ExtractionLayout::Subdir),
        "inplace" => Ok(ExtractionLayout::InPlace),
        other => Err(format!("unknown layout: {} (expected subdir or inplace)", other).into()),
    }
}

fn print_report(report: &ExpandReport, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
    } else {
        println!(
            "Expanded {} archive(s) into {} ({} skipped)",
            report.stats.archives_extracted,
            report.output_dir.display(),
            report.stats.archives_skipped
        );
    }
    Ok(())
}
