//! Shared fakes for integration tests.
#![allow(dead_code)]

use async_trait::async_trait;
use design_critic::analyzer::Backoff;
use design_critic::{
    Analyzer, AppConfig, BrowserBackend, CompletionService, CriticError, Extractor, PageSession,
    Pipeline, Result, StaticAlternatives, StubScorer,
};
use serde_json::{json, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// In-memory browser backend returning canned extraction values.
pub struct FakeBackend {
    pub css: String,
    pub colors: Vec<String>,
    pub fonts: Vec<String>,
    /// Script fragment whose evaluation should fail ("colorSet", "fontSet",
    /// "stylesheet"), or None for full success.
    pub fail_on: Option<&'static str>,
    pub open_calls: AtomicUsize,
}

impl FakeBackend {
    pub fn happy() -> Self {
        Self {
            css: "body{color:red !important;}".to_string(),
            colors: vec!["rgb(255,0,0)".to_string()],
            fonts: vec!["Arial".to_string()],
            fail_on: None,
            open_calls: AtomicUsize::new(0),
        }
    }

    pub fn failing_on(fragment: &'static str) -> Self {
        Self {
            fail_on: Some(fragment),
            ..Self::happy()
        }
    }

    pub fn opens(&self) -> usize {
        self.open_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl BrowserBackend for FakeBackend {
    async fn open(&self, _url: &str) -> Result<Box<dyn PageSession>> {
        self.open_calls.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(FakeSession {
            css: self.css.clone(),
            colors: self.colors.clone(),
            fonts: self.fonts.clone(),
            fail_on: self.fail_on,
        }))
    }
}

struct FakeSession {
    css: String,
    colors: Vec<String>,
    fonts: Vec<String>,
    fail_on: Option<&'static str>,
}

#[async_trait]
impl PageSession for FakeSession {
    async fn evaluate(&self, script: &str) -> Result<Value> {
        if let Some(fragment) = self.fail_on {
            if script.contains(fragment) {
                return Err(CriticError::Browser("simulated evaluation failure".to_string()));
            }
        }
        if script.contains("colorSet") {
            Ok(json!(self.colors))
        } else if script.contains("fontSet") {
            Ok(json!(self.fonts))
        } else {
            Ok(json!(self.css))
        }
    }

    async fn close(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Completion fake that always answers with a fixed text and counts calls.
pub struct FakeCompletions {
    pub text: String,
    pub fail: bool,
    pub calls: AtomicUsize,
}

impl FakeCompletions {
    pub fn answering(text: &str) -> Self {
        Self {
            text: text.to_string(),
            fail: false,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn broken() -> Self {
        Self {
            text: String::new(),
            fail: true,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CompletionService for FakeCompletions {
    async fn complete(&self, _system: &str, _user: &str) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(CriticError::Analysis("simulated completion failure".to_string()));
        }
        Ok(self.text.clone())
    }
}

struct InstantBackoff;

#[async_trait]
impl Backoff for InstantBackoff {
    async fn sleep(&self, _duration: Duration) {}
}

/// Assemble a pipeline wired to fakes.
pub fn fake_pipeline(backend: Arc<FakeBackend>, completions: Arc<FakeCompletions>) -> Pipeline {
    let config = AppConfig::default();
    let extractor = Extractor::new(backend, &config);
    let analyzer = Analyzer::with_parts(
        completions,
        Arc::new(StubScorer),
        Arc::new(InstantBackoff),
        &config,
    );
    Pipeline::new(extractor, analyzer, Arc::new(StaticAlternatives))
}
