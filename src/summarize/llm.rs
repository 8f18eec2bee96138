//! Chat-completions client: the pipeline's only network I/O.
//!
//! A thin reqwest wrapper around the OpenAI-compatible
//! `POST {base}/chat/completions` endpoint. Prompt engineering lives in
//! [`crate::prompts`] so it can change without touching retry or
//! error-handling logic here.
//!
//! ## Retry Strategy
//!
//! Timeouts, 429s, and 5xx responses are transient; they are retried up to
//! `max_retries` times with exponential backoff
//! (`retry_backoff_ms * 2^attempt`: 500 ms → 1 s → 2 s at the defaults).
//! Authentication failures (401/403) abort immediately — retrying a bad key
//! only burns time — and other 4xx responses are likewise not retried.

use crate::config::SummarizeConfig;
use crate::error::ActlintError;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, warn};

/// API key environment variable consulted when the config carries no key.
pub const API_KEY_VAR: &str = "OPENAI_API_KEY";

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChatMessage,
}

/// Client for one summarisation run. Holds the reqwest connection pool, the
/// resolved API key, and the per-call options from the config.
#[derive(Debug)]
pub struct LlmClient {
    client: reqwest::Client,
    api_key: String,
    config: SummarizeConfig,
}

impl LlmClient {
    /// Build a client from the config, resolving the API key from
    /// `OPENAI_API_KEY` when the config does not carry one.
    pub fn new(config: &SummarizeConfig) -> Result<Self, ActlintError> {
        let api_key = match &config.api_key {
            Some(key) if !key.is_empty() => key.clone(),
            _ => std::env::var(API_KEY_VAR)
                .ok()
                .filter(|k| !k.is_empty())
                .ok_or_else(|| ActlintError::MissingApiKey {
                    var: API_KEY_VAR.to_string(),
                })?,
        };

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.api_timeout_secs))
            .build()
            .map_err(|e| ActlintError::Internal(format!("http client: {e}")))?;

        Ok(Self {
            client,
            api_key,
            config: config.clone(),
        })
    }

    /// Run one chat completion, retrying transient failures.
    ///
    /// Returns the assistant message content of the first choice.
    pub async fn complete(&self, system: &str, user: &str) -> Result<String, ActlintError> {
        let url = format!(
            "{}/chat/completions",
            self.config.api_base.trim_end_matches('/')
        );
        let body = ChatRequest {
            model: &self.config.model,
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: system.to_string(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: user.to_string(),
                },
            ],
            max_tokens: self.config.max_tokens,
            temperature: self.config.temperature,
        };

        let mut last_status: Option<u16> = None;
        let mut last_detail = String::new();

        for attempt in 0..=self.config.max_retries {
            if attempt > 0 {
                // Saturating: the builder caps max_retries, but the field is
                // public and a doubling past 2^63 must not panic.
                let backoff = self
                    .config
                    .retry_backoff_ms
                    .saturating_mul(2u64.saturating_pow(attempt - 1));
                warn!(
                    "API retry {}/{} after {}ms",
                    attempt, self.config.max_retries, backoff
                );
                sleep(Duration::from_millis(backoff)).await;
            }

            let response = match self.client.post(&url).bearer_auth(&self.api_key).json(&body).send().await
            {
                Ok(r) => r,
                Err(e) => {
                    // Connect error or timeout: transient, keep retrying.
                    last_status = None;
                    last_detail = e.to_string();
                    warn!("API attempt {} failed: {}", attempt + 1, last_detail);
                    continue;
                }
            };

            let status = response.status();
            if status.is_success() {
                let parsed: ChatResponse =
                    response
                        .json()
                        .await
                        .map_err(|e| ActlintError::ApiFailed {
                            status: status.as_u16(),
                            attempts: attempt + 1,
                            detail: format!("unparseable response body: {e}"),
                        })?;
                let content = parsed
                    .choices
                    .into_iter()
                    .next()
                    .map(|c| c.message.content)
                    .unwrap_or_default();
                debug!("Completion returned {} chars", content.len());
                return Ok(content);
            }

            let detail = response.text().await.unwrap_or_default();
            if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
                return Err(ActlintError::AuthFailed { detail });
            } else if status == StatusCode::TOO_MANY_REQUESTS {
                last_status = Some(status.as_u16());
                last_detail = detail;
                warn!("API attempt {}: rate limited", attempt + 1);
            } else if status.is_server_error() {
                last_status = Some(status.as_u16());
                last_detail = detail;
                warn!("API attempt {}: HTTP {}", attempt + 1, status);
            } else {
                // Other 4xx: the request itself is wrong, retrying won't fix it.
                return Err(ActlintError::ApiFailed {
                    status: status.as_u16(),
                    attempts: attempt + 1,
                    detail,
                });
            }
        }

        let attempts = self.config.max_retries + 1;
        match last_status {
            Some(status) => Err(ActlintError::ApiFailed {
                status,
                attempts,
                detail: last_detail,
            }),
            None => Err(ActlintError::ApiUnreachable {
                attempts,
                detail: last_detail,
            }),
        }
    }
}
