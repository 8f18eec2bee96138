//! CLI binary for the extraction stage.
//!
//! A thin shim over [`actlint::extract_sections`] that validates flags,
//! writes `extracted_sections.json`, and prints a one-line summary.

use actlint::{extract_sections, store};
use anyhow::{Context, Result};
use clap::Parser;
use std::io;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn bold(s: &str) -> String {
    format!("\x1b[1m{s}\x1b[0m")
}
fn dim(s: &str) -> String {
    format!("\x1b[2m{s}\x1b[0m")
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # Extract the default input (data/act.pdf)
  actlint-extract

  # Extract a specific Act
  actlint-extract data/ukpga_20250022_en.pdf

  # Write somewhere other than outputs/
  actlint-extract data/act.pdf -o /tmp/sections.json

PIPELINE:
  actlint-extract → actlint-summarize → actlint-check
  Stages communicate only through the JSON files under outputs/.
"#;

/// Extract a legal PDF into heading-delimited JSON sections.
#[derive(Parser, Debug)]
#[command(
    name = "actlint-extract",
    version,
    about = "Extract a legal PDF into heading-delimited JSON sections",
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// Path to the input PDF.
    #[arg(default_value = "data/act.pdf", env = "ACTLINT_PDF")]
    input: PathBuf,

    /// Where to write the extracted sections.
    #[arg(
        short,
        long,
        default_value = "outputs/extracted_sections.json",
        env = "ACTLINT_SECTIONS"
    )]
    output: PathBuf,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, env = "ACTLINT_VERBOSE")]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long, env = "ACTLINT_QUIET")]
    quiet: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.quiet {
        "error"
    } else if cli.verbose {
        "debug"
    } else {
        "info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .with_writer(io::stderr)
        .init();

    let doc = extract_sections(&cli.input).context("Extraction failed")?;
    store::write_json(&cli.output, &doc).context("Failed to write extracted sections")?;

    if !cli.quiet {
        eprintln!(
            "{} {} sections  {}  →  {}",
            green("✔"),
            bold(&doc.sections.len().to_string()),
            dim(&format!(
                "pages 1–{}",
                doc.sections.last().map(|s| s.page_range.end).unwrap_or(1)
            )),
            bold(&cli.output.display().to_string()),
        );
    }

    Ok(())
}
