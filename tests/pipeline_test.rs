//! End-to-end pipeline tests against fake collaborators.

mod common;

use common::{fake_pipeline, FakeBackend, FakeCompletions};
use design_critic::{Category, CriticError};
use std::sync::Arc;

#[tokio::test]
async fn full_analysis_assembles_every_section() {
    let backend = Arc::new(FakeBackend::happy());
    let completions = Arc::new(FakeCompletions::answering("Looks fine"));
    let pipeline = fake_pipeline(backend.clone(), completions.clone());

    let result = pipeline.analyze_website("https://example.com").await.unwrap();

    assert_eq!(result.css, "body{color:red;}");
    assert_eq!(result.colors, vec!["rgb(255,0,0)".to_string()]);
    assert_eq!(result.fonts, vec!["Arial".to_string()]);

    assert_eq!(result.category_analysis.len(), 5);
    for category in Category::ALL {
        let analysis = result
            .category_analysis
            .get(category)
            .unwrap_or_else(|| panic!("missing category: {}", category));
        assert_eq!(analysis.analysis, "Looks fine");
        assert_eq!(analysis.score, 0.0);
    }

    assert_eq!(result.design_alternatives.len(), 5);
    for category in Category::ALL {
        let alternatives = result.design_alternatives.get(category).unwrap();
        assert!(!alternatives.is_empty());
    }

    // One browser session per asset type, one completion per category.
    assert_eq!(backend.opens(), 3);
    assert_eq!(completions.count(), 5);
}

#[tokio::test]
async fn result_serializes_with_expected_keys() {
    let backend = Arc::new(FakeBackend::happy());
    let completions = Arc::new(FakeCompletions::answering("Looks fine"));
    let pipeline = fake_pipeline(backend, completions);

    let result = pipeline.analyze_website("https://example.com").await.unwrap();
    let value = serde_json::to_value(&result).unwrap();

    let analysis = value.get("categoryAnalysis").unwrap().as_object().unwrap();
    assert_eq!(analysis.len(), 5);
    let score = analysis
        .get("Color Scheme")
        .unwrap()
        .get("score")
        .unwrap()
        .as_f64()
        .unwrap();
    assert_eq!(score, 0.0);

    let alternatives = value.get("designAlternatives").unwrap().as_object().unwrap();
    assert_eq!(alternatives.len(), 5);
    for category in Category::ALL {
        assert!(alternatives.contains_key(category.as_str()));
    }
}

#[tokio::test]
async fn empty_url_fails_before_touching_any_collaborator() {
    let backend = Arc::new(FakeBackend::happy());
    let completions = Arc::new(FakeCompletions::answering("Looks fine"));
    let pipeline = fake_pipeline(backend.clone(), completions.clone());

    let result = pipeline.analyze_website("").await;

    assert!(matches!(result, Err(CriticError::InvalidUrl(_))));
    assert_eq!(backend.opens(), 0);
    assert_eq!(completions.count(), 0);
}

#[tokio::test]
async fn malformed_url_is_rejected() {
    let backend = Arc::new(FakeBackend::happy());
    let completions = Arc::new(FakeCompletions::answering("Looks fine"));
    let pipeline = fake_pipeline(backend.clone(), completions.clone());

    let result = pipeline.analyze_website("not a url").await;

    assert!(matches!(result, Err(CriticError::InvalidUrl(_))));
    assert_eq!(backend.opens(), 0);
}

#[tokio::test]
async fn failed_extraction_aborts_before_any_analysis() {
    let backend = Arc::new(FakeBackend::failing_on("colorSet"));
    let completions = Arc::new(FakeCompletions::answering("Looks fine"));
    let pipeline = fake_pipeline(backend.clone(), completions.clone());

    let result = pipeline.analyze_website("https://example.com").await;

    assert!(matches!(result, Err(CriticError::Extraction { .. })));
    // No partial category results: the completion service was never called.
    assert_eq!(completions.count(), 0);
}

#[tokio::test]
async fn failed_analysis_fails_the_whole_request() {
    let backend = Arc::new(FakeBackend::happy());
    let completions = Arc::new(FakeCompletions::broken());
    let pipeline = fake_pipeline(backend, completions);

    let result = pipeline.analyze_website("https://example.com").await;

    assert!(matches!(result, Err(CriticError::Analysis(_))));
}
