//! Design alternative suggestions
//!
//! Placeholder content for now. The [`AlternativeSource`] trait is the seam a
//! real recommendation engine will implement later; [`StaticAlternatives`]
//! returns fixed entries and performs no external lookup.

use crate::report::{Category, CategoryAnalysis, CategoryMap, DesignAlternative};

/// Produces alternative suggestions for one category.
pub trait AlternativeSource: Send + Sync {
    fn alternatives_for(&self, category: Category) -> Vec<DesignAlternative>;
}

/// Static placeholder suggestions, two generic entries per category.
pub struct StaticAlternatives;

impl AlternativeSource for StaticAlternatives {
    fn alternatives_for(&self, category: Category) -> Vec<DesignAlternative> {
        let entries: [(&str, &str); 2] = match category {
            Category::ColorScheme => [
                (
                    "Complementary palette",
                    "Pair the dominant color with its complement for stronger contrast.",
                ),
                (
                    "Muted monochrome",
                    "Reduce the palette to tints and shades of a single hue.",
                ),
            ],
            Category::Typography => [
                (
                    "Two-family pairing",
                    "Limit the page to one heading family and one body family.",
                ),
                (
                    "Modular type scale",
                    "Derive font sizes from a fixed ratio instead of ad-hoc values.",
                ),
            ],
            Category::LayoutAndSpacing => [
                (
                    "Grid alignment",
                    "Align sections to a consistent column grid.",
                ),
                (
                    "Spacing scale",
                    "Use a small set of spacing steps instead of arbitrary margins.",
                ),
            ],
            Category::DesignPrinciples => [
                (
                    "Visual hierarchy pass",
                    "Emphasize one primary action per view and demote the rest.",
                ),
                (
                    "Consistency audit",
                    "Unify repeated components that currently differ in style.",
                ),
            ],
            Category::ImageryAndGraphics => [
                (
                    "Unified treatment",
                    "Apply one consistent crop and filter style to all imagery.",
                ),
                (
                    "Purposeful icons",
                    "Replace decorative graphics with icons that carry meaning.",
                ),
            ],
        };

        entries
            .iter()
            .map(|(name, description)| DesignAlternative {
                name: name.to_string(),
                description: description.to_string(),
            })
            .collect()
    }
}

/// Build the alternatives map for every category present in the analysis map,
/// preserving its key order.
pub fn get_design_alternatives(
    source: &dyn AlternativeSource,
    analysis: &CategoryMap<CategoryAnalysis>,
) -> CategoryMap<Vec<DesignAlternative>> {
    analysis
        .iter()
        .map(|(category, _)| (category, source.alternatives_for(category)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_category_gets_two_placeholder_entries() {
        let source = StaticAlternatives;
        for category in Category::ALL {
            let alternatives = source.alternatives_for(category);
            assert_eq!(alternatives.len(), 2);
            assert!(alternatives.iter().all(|a| !a.name.is_empty()));
            assert!(alternatives.iter().all(|a| !a.description.is_empty()));
        }
    }

    #[test]
    fn alternatives_map_mirrors_analysis_map_keys() {
        let mut analysis = CategoryMap::new();
        analysis.insert(
            Category::Typography,
            CategoryAnalysis {
                analysis: "text".to_string(),
                score: 0.0,
            },
        );

        let alternatives = get_design_alternatives(&StaticAlternatives, &analysis);
        assert_eq!(alternatives.len(), 1);
        assert!(alternatives.get(Category::Typography).is_some());
        assert!(alternatives.get(Category::ColorScheme).is_none());
    }
}
