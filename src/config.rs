//! Configuration for the summarisation stage.
//!
//! All summarizer behaviour is controlled through [`SummarizeConfig`], built
//! via its [`SummarizeConfigBuilder`]. Keeping every knob in one struct makes
//! it trivial to log a run's configuration and to diff two runs to understand
//! why their summaries differ.
//!
//! The extractor and the checker take no configuration beyond file paths —
//! their behaviour is fixed by the section heuristics and the rule checklist.

use crate::error::ActlintError;
use crate::progress::ProgressCallback;
use std::fmt;

/// Configuration for summarising extracted sections.
///
/// Built via [`SummarizeConfig::builder()`] or [`SummarizeConfig::default()`].
///
/// # Example
/// ```rust
/// use actlint::SummarizeConfig;
///
/// let config = SummarizeConfig::builder()
///     .model("gpt-4o-mini")
///     .chunk_chars(1200)
///     .max_retries(3)
///     .build()
///     .unwrap();
/// ```
#[derive(Clone)]
pub struct SummarizeConfig {
    /// Chat-completions endpoint base, without the `/chat/completions` suffix.
    /// Default: `https://api.openai.com/v1`. Point at any OpenAI-compatible
    /// server (Ollama, vLLM, LiteLLM) to run offline.
    pub api_base: String,

    /// API key. If None, read from `OPENAI_API_KEY` at client construction.
    pub api_key: Option<String>,

    /// Model identifier. Default: `gpt-4o-mini`.
    pub model: String,

    /// Maximum tokens the model may generate per chunk call. Default: 400.
    ///
    /// The prompt asks for 3–5 labelled bullets; 400 tokens covers that with
    /// headroom. Setting it lower truncates bullets mid-sentence, which the
    /// merge step cannot repair.
    pub max_tokens: u32,

    /// Sampling temperature. Default: 0.2.
    ///
    /// Low temperature keeps the model close to the source text, which is
    /// what you want when the output feeds a compliance review.
    pub temperature: f32,

    /// Section text longer than this many characters is split into chunks.
    /// Default: 1200.
    pub chunk_chars: usize,

    /// Characters of overlap between consecutive chunks. Default: 200.
    ///
    /// The overlap keeps a sentence that straddles a chunk boundary visible
    /// to at least one call in full. Must be smaller than `chunk_chars`.
    pub chunk_overlap: usize,

    /// Maximum retry attempts after a transient API failure. Default: 3.
    /// The builder caps this at 10 — the doubling backoff makes longer
    /// retry chains pointless.
    ///
    /// Timeouts, 429s, and 5xx responses are retried; authentication errors
    /// (401/403) are fatal immediately since retrying cannot help.
    pub max_retries: u32,

    /// Initial retry delay in milliseconds, doubled per attempt. Default: 500.
    pub retry_backoff_ms: u64,

    /// Per-call HTTP timeout in seconds. Default: 60.
    pub api_timeout_secs: u64,

    /// Optional per-section progress callback. Default: None.
    ///
    /// See [`crate::progress::SummarizeProgressCallback`].
    pub progress_callback: Option<ProgressCallback>,
}

impl Default for SummarizeConfig {
    fn default() -> Self {
        Self {
            api_base: "https://api.openai.com/v1".to_string(),
            api_key: None,
            model: "gpt-4o-mini".to_string(),
            max_tokens: 400,
            temperature: 0.2,
            chunk_chars: 1200,
            chunk_overlap: 200,
            max_retries: 3,
            retry_backoff_ms: 500,
            api_timeout_secs: 60,
            progress_callback: None,
        }
    }
}

// Manual impl: `Arc<dyn SummarizeProgressCallback>` is not Debug, and the
// API key must not end up in logs.
impl fmt::Debug for SummarizeConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SummarizeConfig")
            .field("api_base", &self.api_base)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("model", &self.model)
            .field("max_tokens", &self.max_tokens)
            .field("temperature", &self.temperature)
            .field("chunk_chars", &self.chunk_chars)
            .field("chunk_overlap", &self.chunk_overlap)
            .field("max_retries", &self.max_retries)
            .field("retry_backoff_ms", &self.retry_backoff_ms)
            .field("api_timeout_secs", &self.api_timeout_secs)
            .field("progress_callback", &self.progress_callback.is_some())
            .finish()
    }
}

impl SummarizeConfig {
    /// Create a new builder for `SummarizeConfig`.
    pub fn builder() -> SummarizeConfigBuilder {
        SummarizeConfigBuilder {
            config: Self::default(),
        }
    }
}

/// Builder for [`SummarizeConfig`].
#[derive(Debug)]
pub struct SummarizeConfigBuilder {
    config: SummarizeConfig,
}

impl SummarizeConfigBuilder {
    pub fn api_base(mut self, base: impl Into<String>) -> Self {
        self.config.api_base = base.into();
        self
    }

    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.config.api_key = Some(key.into());
        self
    }

    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.config.model = model.into();
        self
    }

    pub fn max_tokens(mut self, n: u32) -> Self {
        self.config.max_tokens = n.max(1);
        self
    }

    pub fn temperature(mut self, t: f32) -> Self {
        self.config.temperature = t.clamp(0.0, 2.0);
        self
    }

    pub fn chunk_chars(mut self, n: usize) -> Self {
        self.config.chunk_chars = n.max(100);
        self
    }

    pub fn chunk_overlap(mut self, n: usize) -> Self {
        self.config.chunk_overlap = n;
        self
    }

    pub fn max_retries(mut self, n: u32) -> Self {
        self.config.max_retries = n.min(10);
        self
    }

    pub fn retry_backoff_ms(mut self, ms: u64) -> Self {
        self.config.retry_backoff_ms = ms;
        self
    }

    pub fn api_timeout_secs(mut self, secs: u64) -> Self {
        self.config.api_timeout_secs = secs;
        self
    }

    pub fn progress_callback(mut self, cb: ProgressCallback) -> Self {
        self.config.progress_callback = Some(cb);
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<SummarizeConfig, ActlintError> {
        let c = &self.config;
        if c.chunk_overlap >= c.chunk_chars {
            return Err(ActlintError::InvalidConfig(format!(
                "chunk_overlap ({}) must be smaller than chunk_chars ({})",
                c.chunk_overlap, c.chunk_chars
            )));
        }
        if c.api_base.is_empty() {
            return Err(ActlintError::InvalidConfig("api_base must not be empty".into()));
        }
        if c.model.is_empty() {
            return Err(ActlintError::InvalidConfig("model must not be empty".into()));
        }
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_follow_chunking_constants() {
        let c = SummarizeConfig::default();
        assert_eq!(c.chunk_chars, 1200);
        assert_eq!(c.chunk_overlap, 200);
        assert_eq!(c.max_tokens, 400);
        assert_eq!(c.max_retries, 3);
    }

    #[test]
    fn overlap_must_be_smaller_than_chunk() {
        let err = SummarizeConfig::builder()
            .chunk_chars(500)
            .chunk_overlap(500)
            .build();
        assert!(err.is_err());
    }

    #[test]
    fn temperature_is_clamped() {
        let c = SummarizeConfig::builder().temperature(9.0).build().unwrap();
        assert_eq!(c.temperature, 2.0);
    }

    #[test]
    fn max_retries_is_capped() {
        let c = SummarizeConfig::builder().max_retries(500).build().unwrap();
        assert_eq!(c.max_retries, 10);
    }

    #[test]
    fn debug_output_redacts_the_api_key() {
        let c = SummarizeConfig::builder().api_key("sk-secret").build().unwrap();
        let printed = format!("{c:?}");
        assert!(!printed.contains("sk-secret"));
        assert!(printed.contains("<redacted>"));
    }

    #[test]
    fn chunk_chars_has_a_floor() {
        let c = SummarizeConfig::builder()
            .chunk_chars(1)
            .chunk_overlap(0)
            .build()
            .unwrap();
        assert_eq!(c.chunk_chars, 100);
    }
}
