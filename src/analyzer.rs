//! LLM analysis client
//!
//! Builds a per-category prompt from filtered CSS, submits it to a
//! chat-completion service and retries on rate limiting with a bounded
//! budget. The completion call, the backoff sleep and the scorer are all
//! trait seams so tests run against fakes with no real delays.

use crate::config::AppConfig;
use crate::css::{filter_css_content, truncate};
use crate::error::{CriticError, Result};
use crate::report::CategoryAnalysis;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, warn};

/// Fixed system instruction for every analysis request.
pub const SYSTEM_PROMPT: &str = "You are an AI trained to analyze CSS.";

/// Chat-completion service. Rate limiting is signalled as
/// [`CriticError::RateLimited`]; every other error is permanent.
#[async_trait]
pub trait CompletionService: Send + Sync {
    async fn complete(&self, system: &str, user: &str) -> Result<String>;
}

/// Category-keyed scoring of an analysis response.
pub trait Scorer: Send + Sync {
    fn score(&self, category: &str, analysis: &str) -> f32;
}

/// Placeholder scorer. Scoring logic has not been implemented yet; every
/// category scores 0. A real scorer slots in behind the [`Scorer`] trait.
pub struct StubScorer;

impl Scorer for StubScorer {
    fn score(&self, _category: &str, _analysis: &str) -> f32 {
        0.0
    }
}

/// Sleep dependency for retry backoff, injectable so tests don't wait.
#[async_trait]
pub trait Backoff: Send + Sync {
    async fn sleep(&self, duration: Duration);
}

pub struct TokioBackoff;

#[async_trait]
impl Backoff for TokioBackoff {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// OpenAI-compatible chat completions client over HTTP.
pub struct OpenAiClient {
    client: reqwest::Client,
    api_url: String,
    api_key: String,
    model: String,
}

#[derive(Serialize)]
struct ApiMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Serialize)]
struct ApiRequest<'a> {
    model: &'a str,
    messages: Vec<ApiMessage<'a>>,
}

#[derive(Deserialize)]
struct ApiResponse {
    choices: Vec<ApiChoice>,
}

#[derive(Deserialize)]
struct ApiChoice {
    message: ApiResponseMessage,
}

#[derive(Deserialize)]
struct ApiResponseMessage {
    content: String,
}

impl OpenAiClient {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_url: config.api_url.clone(),
            api_key: config.openai_api_key.clone(),
            model: config.model.clone(),
        }
    }
}

#[async_trait]
impl CompletionService for OpenAiClient {
    async fn complete(&self, system: &str, user: &str) -> Result<String> {
        let request = ApiRequest {
            model: &self.model,
            messages: vec![
                ApiMessage {
                    role: "system",
                    content: system,
                },
                ApiMessage {
                    role: "user",
                    content: user,
                },
            ],
        };

        let response = self
            .client
            .post(&self.api_url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&request)
            .send()
            .await
            .map_err(|e| CriticError::Analysis(e.to_string()))?;

        if response.status() == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after_secs = response
                .headers()
                .get(reqwest::header::RETRY_AFTER)
                .and_then(|value| value.to_str().ok())
                .and_then(|value| value.parse().ok());
            return Err(CriticError::RateLimited { retry_after_secs });
        }

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            error!("Completion API returned {}: {}", status, body);
            return Err(CriticError::Analysis(format!(
                "completion API returned status {}",
                status
            )));
        }

        let api_response: ApiResponse = response
            .json()
            .await
            .map_err(|e| CriticError::Analysis(e.to_string()))?;

        api_response
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| CriticError::Analysis("completion response had no choices".to_string()))
    }
}

/// Runs one category analysis: filter, prompt, truncate, complete with retry,
/// score.
pub struct Analyzer {
    completions: Arc<dyn CompletionService>,
    scorer: Arc<dyn Scorer>,
    backoff: Arc<dyn Backoff>,
    max_retries: u32,
    default_retry_delay: Duration,
    prompt_budget: usize,
}

impl Analyzer {
    pub fn new(completions: Arc<dyn CompletionService>, config: &AppConfig) -> Self {
        Self::with_parts(
            completions,
            Arc::new(StubScorer),
            Arc::new(TokioBackoff),
            config,
        )
    }

    /// Full constructor with scorer and backoff injected; tests use this with
    /// fakes.
    pub fn with_parts(
        completions: Arc<dyn CompletionService>,
        scorer: Arc<dyn Scorer>,
        backoff: Arc<dyn Backoff>,
        config: &AppConfig,
    ) -> Self {
        Self {
            completions,
            scorer,
            backoff,
            max_retries: config.max_retries,
            default_retry_delay: config.default_retry_delay,
            prompt_budget: config.prompt_budget,
        }
    }

    /// Analyze one category of the given CSS.
    ///
    /// The character budget applies to the full prompt, not the raw CSS, so
    /// truncation happens after prompt construction.
    pub async fn analyze(&self, css: &str, category: &str) -> Result<CategoryAnalysis> {
        let filtered = filter_css_content(css);
        let prompt = format!("Analyze the {} used in this CSS: {}", category, filtered);
        let prompt = truncate(&prompt, self.prompt_budget);
        debug!(
            "Analyzing category '{}' with {} prompt chars",
            category,
            prompt.chars().count()
        );

        let analysis = self.complete_with_retry(prompt).await?;
        let score = self.scorer.score(category, &analysis);

        Ok(CategoryAnalysis { analysis, score })
    }

    /// Bounded retry loop: only the rate-limit signal is retried, sleeping
    /// for the server-supplied hint or the configured default each time.
    async fn complete_with_retry(&self, prompt: &str) -> Result<String> {
        let mut retries_left = self.max_retries;

        loop {
            match self.completions.complete(SYSTEM_PROMPT, prompt).await {
                Ok(text) => return Ok(text),
                Err(CriticError::RateLimited { retry_after_secs }) => {
                    if retries_left == 0 {
                        error!("No more retries left. Please reduce the frequency of your requests.");
                        return Err(CriticError::RetryExhausted {
                            attempts: self.max_retries,
                        });
                    }
                    let delay = retry_after_secs
                        .map(Duration::from_secs)
                        .unwrap_or(self.default_retry_delay);
                    warn!(
                        "Rate limited by completion service, retrying in {:?} ({} retries left)",
                        delay, retries_left
                    );
                    self.backoff.sleep(delay).await;
                    retries_left -= 1;
                }
                Err(e) => {
                    error!("Completion request failed: {}", e);
                    return Err(e);
                }
            }
        }
    }
}
