//! Analysis result data structures
//!
//! The shapes here are the wire format of the service: one `AnalysisResult`
//! per request, built once by the pipeline and serialized straight to the
//! HTTP response. Nothing is persisted.

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// The five fixed design-critique dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    ColorScheme,
    Typography,
    LayoutAndSpacing,
    DesignPrinciples,
    ImageryAndGraphics,
}

impl Category {
    /// All categories in declaration order. Result maps are keyed in this
    /// order regardless of analysis completion order.
    pub const ALL: [Category; 5] = [
        Category::ColorScheme,
        Category::Typography,
        Category::LayoutAndSpacing,
        Category::DesignPrinciples,
        Category::ImageryAndGraphics,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::ColorScheme => "Color Scheme",
            Category::Typography => "Typography",
            Category::LayoutAndSpacing => "Layout and Spacing",
            Category::DesignPrinciples => "Design Principles",
            Category::ImageryAndGraphics => "Imagery and Graphics",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Critique of one category: the completion text plus a score.
///
/// Scoring is not implemented yet; `score` is always 0 (see
/// [`crate::analyzer::StubScorer`]).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryAnalysis {
    /// Analysis text returned by the completion service
    pub analysis: String,
    /// Category score (currently always 0)
    pub score: f32,
}

/// A suggested design alternative for a category.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DesignAlternative {
    pub name: String,
    pub description: String,
}

/// Ordered category-keyed map, serialized as a JSON object whose keys appear
/// in insertion order.
#[derive(Debug, Clone)]
pub struct CategoryMap<T>(Vec<(Category, T)>);

impl<T> CategoryMap<T> {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn insert(&mut self, category: Category, value: T) {
        self.0.push((category, value));
    }

    pub fn get(&self, category: Category) -> Option<&T> {
        self.0.iter().find(|(c, _)| *c == category).map(|(_, v)| v)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Category, &T)> {
        self.0.iter().map(|(c, v)| (*c, v))
    }
}

impl<T> Default for CategoryMap<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> FromIterator<(Category, T)> for CategoryMap<T> {
    fn from_iter<I: IntoIterator<Item = (Category, T)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<T: Serialize> Serialize for CategoryMap<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (category, value) in &self.0 {
            map.serialize_entry(category.as_str(), value)?;
        }
        map.end()
    }
}

/// The complete response payload for one website analysis.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    /// Filtered CSS content of the page
    pub css: String,
    /// Deduplicated computed color values, first-seen order
    pub colors: Vec<String>,
    /// Deduplicated computed font families, first-seen order
    pub fonts: Vec<String>,
    /// Per-category critique, keyed in category declaration order
    pub category_analysis: CategoryMap<CategoryAnalysis>,
    /// Placeholder alternatives per category
    pub design_alternatives: CategoryMap<Vec<DesignAlternative>>,
}
