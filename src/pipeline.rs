//! Website analysis pipeline
//!
//! The orchestrator behind the HTTP boundary: validate the URL, run the three
//! browser extractions, filter the CSS once, fan the five category analyses
//! out concurrently and assemble the aggregate result. All-or-nothing: a
//! failed extraction or analysis fails the whole request, no partial results.

use crate::alternatives::{get_design_alternatives, AlternativeSource};
use crate::analyzer::Analyzer;
use crate::css::filter_css_content;
use crate::error::{CriticError, Result};
use crate::extractor::Extractor;
use crate::report::{AnalysisResult, Category, CategoryAnalysis, CategoryMap};
use futures::future::try_join_all;
use std::sync::Arc;
use tracing::info;
use url::Url;

/// Reject empty, unparsable and non-http(s) URLs before any browser session
/// is opened.
pub fn validate_url(url: &str) -> Result<()> {
    if url.trim().is_empty() {
        return Err(CriticError::InvalidUrl("URL is empty".to_string()));
    }

    let parsed = Url::parse(url).map_err(|_| CriticError::InvalidUrl(url.to_string()))?;

    match parsed.scheme() {
        "http" | "https" => Ok(()),
        _ => Err(CriticError::InvalidUrl(url.to_string())),
    }
}

pub struct Pipeline {
    extractor: Extractor,
    analyzer: Analyzer,
    alternatives: Arc<dyn AlternativeSource>,
}

impl Pipeline {
    pub fn new(
        extractor: Extractor,
        analyzer: Analyzer,
        alternatives: Arc<dyn AlternativeSource>,
    ) -> Self {
        Self {
            extractor,
            analyzer,
            alternatives,
        }
    }

    /// Analyze a website end to end.
    pub async fn analyze_website(&self, url: &str) -> Result<AnalysisResult> {
        validate_url(url)?;
        info!("Analyzing website: {}", url);

        // Three independent sessions, one per asset type.
        let raw_css = self.extractor.extract_css(url).await?;
        let colors = self.extractor.extract_colors(url).await?;
        let fonts = self.extractor.extract_fonts(url).await?;

        let filtered_css = filter_css_content(&raw_css);

        // All five categories in flight together; results recombine in fixed
        // category order regardless of completion order.
        let analyses = try_join_all(Category::ALL.iter().map(|category| {
            let css = filtered_css.as_str();
            async move {
                let analysis = self.analyzer.analyze(css, category.as_str()).await?;
                Ok::<_, CriticError>((*category, analysis))
            }
        }))
        .await?;

        let category_analysis: CategoryMap<CategoryAnalysis> = analyses.into_iter().collect();
        let design_alternatives =
            get_design_alternatives(self.alternatives.as_ref(), &category_analysis);

        info!("Analysis complete for: {}", url);

        Ok(AnalysisResult {
            css: filtered_css,
            colors,
            fonts,
            category_analysis,
            design_alternatives,
        })
    }

    /// Analyze ad-hoc CSS for a single category, used by the `/analyze`
    /// endpoint.
    pub async fn analyze_css(&self, css: &str, category: &str) -> Result<CategoryAnalysis> {
        self.analyzer.analyze(css, category).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_well_formed_http_urls() {
        assert!(validate_url("https://example.com").is_ok());
        assert!(validate_url("http://example.com/page?x=1").is_ok());
    }

    #[test]
    fn rejects_empty_and_malformed_urls() {
        assert!(matches!(
            validate_url(""),
            Err(CriticError::InvalidUrl(_))
        ));
        assert!(matches!(
            validate_url("   "),
            Err(CriticError::InvalidUrl(_))
        ));
        assert!(matches!(
            validate_url("not a url"),
            Err(CriticError::InvalidUrl(_))
        ));
    }

    #[test]
    fn rejects_non_http_schemes() {
        assert!(matches!(
            validate_url("ftp://example.com"),
            Err(CriticError::InvalidUrl(_))
        ));
        assert!(matches!(
            validate_url("file:///etc/passwd"),
            Err(CriticError::InvalidUrl(_))
        ));
    }
}
