//! design-critic - website CSS design critique service
//!
//! Fetches a page with headless Chrome, extracts its CSS, color palette and
//! fonts, sends the filtered CSS to a chat-completion API for five fixed
//! categories of design critique, and aggregates everything into a single
//! JSON result served over HTTP.

pub mod alternatives;
pub mod analyzer;
pub mod browser;
pub mod config;
pub mod css;
pub mod error;
pub mod extractor;
pub mod pipeline;
pub mod report;
pub mod server;

pub use alternatives::{AlternativeSource, StaticAlternatives};
pub use analyzer::{Analyzer, CompletionService, OpenAiClient, Scorer, StubScorer};
pub use browser::{BrowserBackend, ChromiumBackend, PageSession};
pub use config::AppConfig;
pub use css::{filter_css_content, truncate};
pub use error::{AssetKind, CriticError, Result};
pub use extractor::Extractor;
pub use pipeline::{validate_url, Pipeline};
pub use report::{AnalysisResult, Category, CategoryAnalysis, CategoryMap, DesignAlternative};

use std::sync::Arc;

/// Wire up the production pipeline: headless Chrome extraction, OpenAI
/// completion client, stub scorer and static alternatives.
pub fn build_pipeline(config: &AppConfig) -> Pipeline {
    let backend = Arc::new(ChromiumBackend::new(config));
    let extractor = Extractor::new(backend, config);
    let completions = Arc::new(OpenAiClient::new(config));
    let analyzer = Analyzer::new(completions, config);

    Pipeline::new(extractor, analyzer, Arc::new(StaticAlternatives))
}
