//! Process configuration
//!
//! Everything the service reads from the environment is collected here once
//! at startup and handed to the component constructors. Business logic never
//! touches the environment directly.

use crate::error::{CriticError, Result};
use std::time::Duration;

/// Default chat model used for analysis requests.
pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";

/// Default OpenAI-compatible chat completions endpoint.
pub const DEFAULT_API_URL: &str = "https://api.openai.com/v1/chat/completions";

/// Application configuration, built once at process start.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// API key for the completion service
    pub openai_api_key: String,
    /// Chat completions endpoint (override for compatible APIs)
    pub api_url: String,
    /// Model name sent with each completion request
    pub model: String,
    /// Port for the HTTP server
    pub port: u16,
    /// Directory served as static assets
    pub static_dir: String,
    /// Retry budget for rate-limited completion calls
    pub max_retries: u32,
    /// Backoff used when the service gives no retry-after hint
    pub default_retry_delay: Duration,
    /// Maximum characters of prompt sent to the completion service
    pub prompt_budget: usize,
    /// How long a loaded page is given to settle before evaluation
    pub settle: Duration,
    /// Navigation timeout for browser sessions
    pub navigation_timeout: Duration,
    /// Whether color extraction also reads computed border-color
    pub include_border_colors: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            openai_api_key: String::new(),
            api_url: DEFAULT_API_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            port: 5000,
            static_dir: "public".to_string(),
            max_retries: 5,
            default_retry_delay: Duration::from_secs(5 * 60),
            prompt_budget: 4096,
            settle: Duration::from_millis(500),
            navigation_timeout: Duration::from_secs(30),
            include_border_colors: true,
        }
    }
}

impl AppConfig {
    /// Build configuration from the environment.
    ///
    /// Callers should load `.env` first (`dotenvy::dotenv().ok()`); this only
    /// reads process variables. `OPENAI_API_KEY` is required, everything else
    /// falls back to defaults.
    pub fn from_env() -> Result<Self> {
        let openai_api_key = std::env::var("OPENAI_API_KEY")
            .map_err(|_| CriticError::Config("OPENAI_API_KEY not set".to_string()))?;

        let mut config = Self {
            openai_api_key,
            ..Self::default()
        };

        if let Ok(url) = std::env::var("OPENAI_API_URL") {
            config.api_url = url;
        }
        if let Ok(model) = std::env::var("OPENAI_MODEL") {
            config.model = model;
        }
        if let Ok(port) = std::env::var("PORT") {
            config.port = port
                .parse()
                .map_err(|_| CriticError::Config(format!("Invalid PORT value: {}", port)))?;
        }
        if let Ok(dir) = std::env::var("STATIC_DIR") {
            config.static_dir = dir;
        }

        Ok(config)
    }
}
