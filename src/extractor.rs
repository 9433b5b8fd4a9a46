//! Browser extraction of page assets
//!
//! Three independent operations pull raw CSS text, computed colors and
//! computed font families out of a rendered page. Each one opens its own
//! isolated session, evaluates a script in-page and tears the session down
//! again, evaluation failure included. Any failure is fatal for the asset.

use crate::browser::BrowserBackend;
use crate::config::AppConfig;
use crate::error::{AssetKind, CriticError, Result};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Collects stylesheet and `<style>` text in document order.
const CSS_SCRIPT: &str = r#"
(() => {
  const styles = Array.from(document.querySelectorAll('link[rel="stylesheet"], style'));
  return styles
    .map((style) => style.textContent)
    .filter((content) => content.trim().length > 0)
    .join('\n');
})()
"#;

/// Reads computed color properties of every element, skipping fully
/// transparent values. `__PROPS__` is substituted with the property list.
const COLOR_SCRIPT: &str = r#"
(() => {
  const elements = Array.from(document.querySelectorAll('*'));
  const colorSet = new Set();
  elements.forEach((element) => {
    const styles = window.getComputedStyle(element);
    __PROPS__.forEach((propertyName) => {
      const colorValue = styles.getPropertyValue(propertyName);
      if (colorValue && colorValue !== 'rgba(0, 0, 0, 0)' && colorValue !== 'transparent') {
        colorSet.add(colorValue);
      }
    });
  });
  return Array.from(colorSet);
})()
"#;

/// Reads computed font-family of every element, one entry per family with
/// quotes stripped.
const FONT_SCRIPT: &str = r#"
(() => {
  const elements = Array.from(document.querySelectorAll('*'));
  const fontSet = new Set();
  elements.forEach((element) => {
    const fontFamilyValue = window.getComputedStyle(element).getPropertyValue('font-family');
    if (fontFamilyValue) {
      fontFamilyValue.split(',').forEach((fontFamily) => {
        fontSet.add(fontFamily.trim().replace(/['"]/g, ''));
      });
    }
  });
  return Array.from(fontSet);
})()
"#;

/// Extracts CSS, colors and fonts from a page via a browser backend.
pub struct Extractor {
    backend: Arc<dyn BrowserBackend>,
    include_border_colors: bool,
}

impl Extractor {
    pub fn new(backend: Arc<dyn BrowserBackend>, config: &AppConfig) -> Self {
        Self {
            backend,
            include_border_colors: config.include_border_colors,
        }
    }

    /// Text content of all stylesheets and `<style>` elements, newline-joined
    /// in document order with empty entries excluded.
    pub async fn extract_css(&self, url: &str) -> Result<String> {
        let value = self.evaluate_on_page(url, CSS_SCRIPT, AssetKind::Css).await?;
        let css: String = Self::decode(value, AssetKind::Css)?;
        debug!("Extracted {} bytes of CSS", css.len());
        Ok(css)
    }

    /// Deduplicated computed color values, first-seen order.
    pub async fn extract_colors(&self, url: &str) -> Result<Vec<String>> {
        let script = COLOR_SCRIPT.replace("__PROPS__", self.color_properties());
        let value = self
            .evaluate_on_page(url, &script, AssetKind::Colors)
            .await?;
        let colors: Vec<String> = Self::decode(value, AssetKind::Colors)?;
        debug!("Extracted {} distinct colors", colors.len());
        Ok(colors)
    }

    /// Deduplicated computed font families, first-seen order.
    pub async fn extract_fonts(&self, url: &str) -> Result<Vec<String>> {
        let value = self
            .evaluate_on_page(url, FONT_SCRIPT, AssetKind::Fonts)
            .await?;
        let fonts: Vec<String> = Self::decode(value, AssetKind::Fonts)?;
        debug!("Extracted {} distinct fonts", fonts.len());
        Ok(fonts)
    }

    fn color_properties(&self) -> &'static str {
        if self.include_border_colors {
            "['color', 'background-color', 'border-color']"
        } else {
            "['color', 'background-color']"
        }
    }

    /// Open a session, evaluate the script and close the session again.
    /// The session is torn down even when evaluation fails.
    async fn evaluate_on_page(&self, url: &str, script: &str, asset: AssetKind) -> Result<Value> {
        info!("Extracting {} from {}", asset, url);

        let mut session =
            self.backend
                .open(url)
                .await
                .map_err(|e| CriticError::Extraction {
                    asset,
                    message: e.to_string(),
                })?;

        let result = session.evaluate(script).await;

        if let Err(e) = session.close().await {
            warn!("Failed to close browser session: {}", e);
        }

        result.map_err(|e| CriticError::Extraction {
            asset,
            message: e.to_string(),
        })
    }

    fn decode<T: serde::de::DeserializeOwned>(value: Value, asset: AssetKind) -> Result<T> {
        serde_json::from_value(value).map_err(|e| CriticError::Extraction {
            asset,
            message: format!("Unexpected script result shape: {}", e),
        })
    }
}
