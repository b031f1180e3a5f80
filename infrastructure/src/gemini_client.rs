use crate::config::Config;
use async_trait::async_trait;
use domain::ports::LlmClient;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use shared::types::Result;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Error)]
pub enum GeminiError {
    #[error("GEMINI_KEY is not set")]
    MissingApiKey,
    #[error("Gemini API returned {status}: {body}")]
    Http { status: StatusCode, body: String },
    #[error("Gemini request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("Gemini response is missing {0}")]
    MalformedResponse(&'static str),
}

impl GeminiError {
    /// Rate limits, server errors and network hiccups are worth retrying.
    pub fn is_transient(&self) -> bool {
        match self {
            GeminiError::Http { status, .. } => {
                *status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error()
            }
            GeminiError::Transport(err) => err.is_timeout() || err.is_connect(),
            _ => false,
        }
    }
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

impl GenerateResponse {
    fn first_text(self) -> std::result::Result<String, GeminiError> {
        let candidate = self
            .candidates
            .into_iter()
            .next()
            .ok_or(GeminiError::MalformedResponse("candidates[0]"))?;
        let content = candidate
            .content
            .ok_or(GeminiError::MalformedResponse("candidates[0].content"))?;
        content
            .parts
            .into_iter()
            .next()
            .and_then(|part| part.text)
            .ok_or(GeminiError::MalformedResponse(
                "candidates[0].content.parts[0].text",
            ))
    }
}

/// Backoff schedule for transient failures.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub base_delay: Duration,
}

impl RetryPolicy {
    pub fn delay_for(&self, attempt: u32) -> Duration {
        self.base_delay.saturating_mul(2u32.saturating_pow(attempt))
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            base_delay: Duration::from_millis(500),
        }
    }
}

/// Client for the Gemini `generateContent` endpoint.
#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    base_url: String,
    model: String,
    api_key: Option<String>,
    retry: RetryPolicy,
}

impl GeminiClient {
    pub fn new(config: &Config) -> Result<Self> {
        let client = Client::builder().timeout(config.http_timeout).build()?;
        Ok(Self {
            client,
            base_url: config.gemini_base_url.trim_end_matches('/').to_string(),
            model: config.gemini_model.clone(),
            api_key: config.gemini_api_key.clone(),
            retry: RetryPolicy {
                max_retries: config.http_max_retries,
                ..RetryPolicy::default()
            },
        })
    }

    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        )
    }

    async fn send_once(&self, api_key: &str, prompt: &str) -> std::result::Result<String, GeminiError> {
        let request = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
        };
        let response = self
            .client
            .post(self.endpoint())
            .query(&[("key", api_key)])
            .json(&request)
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GeminiError::Http { status, body });
        }
        let parsed: GenerateResponse = response.json().await?;
        parsed.first_text()
    }

    pub async fn generate_content(&self, prompt: &str) -> std::result::Result<String, GeminiError> {
        let api_key = self.api_key.as_deref().ok_or(GeminiError::MissingApiKey)?;
        let mut attempt = 0;
        loop {
            match self.send_once(api_key, prompt).await {
                Ok(text) => {
                    debug!(attempt, chars = text.len(), "Gemini answered");
                    return Ok(text);
                }
                Err(err) if err.is_transient() && attempt < self.retry.max_retries => {
                    let delay = self.retry.delay_for(attempt);
                    warn!(attempt, ?delay, error = %err, "Retrying Gemini request");
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(err) => return Err(err),
            }
        }
    }
}

#[async_trait]
impl LlmClient for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<String> {
        Ok(self.generate_content(prompt).await?)
    }
}
