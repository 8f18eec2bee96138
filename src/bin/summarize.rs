//! CLI binary for the summarisation stage.
//!
//! Maps CLI flags to a [`SummarizeConfig`], wires a terminal progress bar
//! into the library's per-section callback, and writes `summary.json`.
//! Interrupted runs resume from the checkpoint unless `--no-resume` is
//! given.

use actlint::summarize::{summarize_sections, Checkpoint};
use actlint::{store, SectionSet, SummarizeConfig, SummarizeProgressCallback};
use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn cyan(s: &str) -> String {
    format!("\x1b[36m{s}\x1b[0m")
}
fn bold(s: &str) -> String {
    format!("\x1b[1m{s}\x1b[0m")
}
fn dim(s: &str) -> String {
    format!("\x1b[2m{s}\x1b[0m")
}

// ── CLI progress callback using indicatif ────────────────────────────────────

/// Terminal progress callback: one bar, advanced as sections complete.
struct CliProgressCallback {
    bar: ProgressBar,
}

impl CliProgressCallback {
    /// Create a callback whose bar length is set by `on_run_start` once the
    /// pending-section count is known.
    fn new_dynamic() -> Arc<Self> {
        let bar = ProgressBar::new(0);

        // Spinner only until the pending count is known.
        let spinner_style = ProgressStyle::with_template("{spinner:.cyan} {prefix:.bold}  {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner());
        bar.set_style(spinner_style);
        bar.set_prefix("Preparing");
        bar.set_message("Reading sections…");
        bar.enable_steady_tick(Duration::from_millis(80));

        Arc::new(Self { bar })
    }

    fn finish(&self) {
        self.bar.finish_and_clear();
    }
}

impl SummarizeProgressCallback for CliProgressCallback {
    fn on_run_start(&self, pending: usize, resumed: usize) {
        if resumed > 0 {
            self.bar.println(format!(
                "{} {}",
                cyan("◆"),
                bold(&format!("Resuming: {resumed} section(s) already summarised"))
            ));
        }
        let style = ProgressStyle::with_template(
            "{spinner:.cyan} {prefix:.bold}  \
             [{bar:42.green/238}] {pos:>3}/{len} sections  ⏱ {elapsed_precise}",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏  ");
        self.bar.set_length(pending as u64);
        self.bar.set_style(style);
        self.bar.set_prefix("Summarising");
    }

    fn on_section_start(&self, section_id: u32, _heading: &str) {
        self.bar.set_message(format!("section {section_id}"));
    }

    fn on_section_complete(&self, _section_id: u32, _completed: usize, _total: usize) {
        self.bar.inc(1);
    }
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # Summarise the extracted sections with the default model
  export OPENAI_API_KEY=sk-...
  actlint-summarize

  # Use a different model
  actlint-summarize --model gpt-4o

  # Point at a local OpenAI-compatible server (no key semantics enforced)
  actlint-summarize --api-base http://localhost:11434/v1 --model llama3.2

  # Start over, ignoring the resume checkpoint
  actlint-summarize --no-resume

ENVIRONMENT VARIABLES:
  OPENAI_API_KEY       API key for the completion endpoint (required)
  ACTLINT_MODEL        Override the model ID
  ACTLINT_API_BASE     Override the endpoint base URL

RESUME:
  After each section the partial result is written to
  outputs/summary_intermediate.json. A re-run skips completed sections and
  the checkpoint is removed once summary.json is written. Checkpoint entries
  that do not match the current extracted sections are discarded.
"#;

/// Summarise extracted sections via an OpenAI-compatible completion API.
#[derive(Parser, Debug)]
#[command(
    name = "actlint-summarize",
    version,
    about = "Summarise extracted sections via an OpenAI-compatible completion API",
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// Extracted sections produced by actlint-extract.
    #[arg(
        default_value = "outputs/extracted_sections.json",
        env = "ACTLINT_SECTIONS"
    )]
    input: PathBuf,

    /// Where to write the summaries.
    #[arg(short, long, default_value = "outputs/summary.json", env = "ACTLINT_SUMMARY")]
    output: PathBuf,

    /// Model identifier.
    #[arg(long, env = "ACTLINT_MODEL", default_value = "gpt-4o-mini")]
    model: String,

    /// Chat-completions endpoint base URL.
    #[arg(long, env = "ACTLINT_API_BASE", default_value = "https://api.openai.com/v1")]
    api_base: String,

    /// Max tokens the model may generate per chunk call.
    #[arg(long, env = "ACTLINT_MAX_TOKENS", default_value_t = 400)]
    max_tokens: u32,

    /// Sampling temperature (0.0–2.0).
    #[arg(long, env = "ACTLINT_TEMPERATURE", default_value_t = 0.2)]
    temperature: f32,

    /// Section text longer than this many characters is chunked.
    #[arg(long, env = "ACTLINT_CHUNK_CHARS", default_value_t = 1200)]
    chunk_chars: usize,

    /// Overlap between consecutive chunks, in characters.
    #[arg(long, env = "ACTLINT_CHUNK_OVERLAP", default_value_t = 200)]
    chunk_overlap: usize,

    /// Retries per API call on transient failure (max 10).
    #[arg(long, env = "ACTLINT_MAX_RETRIES", default_value_t = 3)]
    max_retries: u32,

    /// Per-call HTTP timeout in seconds.
    #[arg(long, env = "ACTLINT_API_TIMEOUT", default_value_t = 60)]
    api_timeout: u64,

    /// Ignore an existing checkpoint and summarise everything again.
    #[arg(long)]
    no_resume: bool,

    /// Disable the progress bar.
    #[arg(long, env = "ACTLINT_NO_PROGRESS")]
    no_progress: bool,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, env = "ACTLINT_VERBOSE")]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long, env = "ACTLINT_QUIET")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Suppress INFO-level library logs while the bar is active; the bar
    // carries the per-section feedback.
    let show_progress = !cli.quiet && !cli.no_progress;
    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet || show_progress {
        "error"
    } else {
        "info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .with_writer(io::stderr)
        .init();

    let progress = if show_progress {
        Some(CliProgressCallback::new_dynamic())
    } else {
        None
    };

    let mut builder = SummarizeConfig::builder()
        .model(&cli.model)
        .api_base(&cli.api_base)
        .max_tokens(cli.max_tokens)
        .temperature(cli.temperature)
        .chunk_chars(cli.chunk_chars)
        .chunk_overlap(cli.chunk_overlap)
        .max_retries(cli.max_retries)
        .api_timeout_secs(cli.api_timeout);
    if let Some(cb) = &progress {
        builder = builder.progress_callback(cb.clone());
    }
    let config = builder.build().context("Invalid configuration")?;

    let doc: SectionSet = store::read_json(&cli.input, "Run `actlint-extract` first.")
        .context("Failed to read extracted sections")?;

    let checkpoint = Checkpoint::new(
        cli.output
            .with_file_name("summary_intermediate.json"),
    );
    if cli.no_resume {
        checkpoint.clear();
    }

    let result = summarize_sections(&doc, &config, Some(&checkpoint)).await;
    if let Some(cb) = &progress {
        cb.finish();
    }
    let set = result.context("Summarisation failed")?;

    store::write_json(&cli.output, &set).context("Failed to write summary")?;
    checkpoint.clear();

    if !cli.quiet {
        eprintln!(
            "{} {} summaries  {}  →  {}",
            green("✔"),
            bold(&set.summaries.len().to_string()),
            dim(&format!("model {}", set.model)),
            bold(&cli.output.display().to_string()),
        );
    }

    Ok(())
}
