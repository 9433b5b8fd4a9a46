//! Browser automation abstraction
//!
//! Extraction depends only on these traits, never on a concrete automation
//! backend. The real implementation drives headless Chrome over CDP
//! ([`chromium::ChromiumBackend`]); tests substitute in-memory fakes.

pub mod chromium;

use crate::error::Result;
use async_trait::async_trait;
use serde_json::Value;

pub use chromium::ChromiumBackend;

/// Opens isolated page sessions. One session per extraction task; sessions
/// are never shared concurrently within a request.
#[async_trait]
pub trait BrowserBackend: Send + Sync {
    /// Launch a fresh session, navigate to `url` and wait for the page to
    /// settle. The returned session is ready for script evaluation.
    async fn open(&self, url: &str) -> Result<Box<dyn PageSession>>;
}

/// A live page loaded in a browser session.
#[async_trait]
pub trait PageSession: Send {
    /// Evaluate a JavaScript expression in the page and return its value.
    async fn evaluate(&self, script: &str) -> Result<Value>;

    /// Tear the session down. Callers must invoke this unconditionally,
    /// including after evaluation failures.
    async fn close(&mut self) -> Result<()>;
}
