//! CLI binary for the rule-checking stage.
//!
//! Runs the fixed checklist over `extracted_sections.json`, writes
//! `report.json`, and prints one verdict line per rule. No network, no
//! model — re-running on the same input produces an identical report.

use actlint::model::RuleStatus;
use actlint::{rules, store, SectionSet};
use anyhow::{Context, Result};
use clap::Parser;
use std::io;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn red(s: &str) -> String {
    format!("\x1b[31m{s}\x1b[0m")
}
fn bold(s: &str) -> String {
    format!("\x1b[1m{s}\x1b[0m")
}
fn dim(s: &str) -> String {
    format!("\x1b[2m{s}\x1b[0m")
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # Check the default extracted sections
  actlint-check

  # Check a specific sections file, report elsewhere
  actlint-check /tmp/sections.json -o /tmp/report.json

CHECKLIST:
  definitions       Act must define key terms
  eligibility       Act must specify eligibility criteria
  responsibilities  Act must specify responsibilities of the administering authority
  penalties         Act must include enforcement or penalties
  payments          Act must include payment calculation or entitlement structure
  record_keeping    Act must include record-keeping or reporting requirements
"#;

/// Run the fixed compliance checklist over extracted sections.
#[derive(Parser, Debug)]
#[command(
    name = "actlint-check",
    version,
    about = "Run the fixed compliance checklist over extracted sections",
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// Extracted sections produced by actlint-extract.
    #[arg(
        default_value = "outputs/extracted_sections.json",
        env = "ACTLINT_SECTIONS"
    )]
    input: PathBuf,

    /// Where to write the report.
    #[arg(short, long, default_value = "outputs/report.json", env = "ACTLINT_REPORT")]
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

    let doc: SectionSet = store::read_json(&cli.input, "Run `actlint-extract` first.")
        .context("Failed to read extracted sections")?;

    let report = rules::build_report(&doc);
    store::write_json(&cli.output, &report).context("Failed to write report")?;

    if !cli.quiet {
        let passed = report
            .rule_checks
            .iter()
            .filter(|c| c.status == RuleStatus::Pass)
            .count();
        for check in &report.rule_checks {
            let tick = match check.status {
                RuleStatus::Pass => green("✓"),
                RuleStatus::Fail => red("✗"),
            };
            eprintln!(
                "  {} {}  {}",
                tick,
                check.rule_name,
                dim(&format!("confidence {:.2}", check.confidence)),
            );
        }
        eprintln!(
            "{} {}/{} rules passed  →  {}",
            if passed == report.rule_checks.len() {
                green("✔")
            } else {
                red("✘")
            },
            bold(&passed.to_string()),
            report.rule_checks.len(),
            bold(&cli.output.display().to_string()),
        );
    }

    Ok(())
}
