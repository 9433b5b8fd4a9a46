//! Headless Chrome backend over CDP

use crate::browser::{BrowserBackend, PageSession};
use crate::config::AppConfig;
use crate::error::{CriticError, Result};
use async_trait::async_trait;
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::page::Page;
use futures::StreamExt;
use serde_json::Value;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// Launches one dedicated headless Chrome instance per session.
///
/// Each extraction gets its own browser process, torn down when the session
/// closes. This keeps sessions fully isolated at the cost of startup time.
pub struct ChromiumBackend {
    navigation_timeout: Duration,
    settle: Duration,
}

impl ChromiumBackend {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            navigation_timeout: config.navigation_timeout,
            settle: config.settle,
        }
    }
}

#[async_trait]
impl BrowserBackend for ChromiumBackend {
    async fn open(&self, url: &str) -> Result<Box<dyn PageSession>> {
        let browser_config = BrowserConfig::builder()
            .request_timeout(self.navigation_timeout)
            .build()
            .map_err(CriticError::Browser)?;

        let (browser, mut handler) = Browser::launch(browser_config)
            .await
            .map_err(|e| CriticError::Browser(format!("Failed to launch browser: {}", e)))?;

        // The handler must be polled for the browser connection to make
        // progress; it ends when the browser closes.
        let handler_task = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if event.is_err() {
                    break;
                }
            }
        });

        let mut session = ChromiumSession {
            browser,
            page: None,
            handler_task,
        };

        if let Err(e) = session.navigate(url, self.settle).await {
            if let Err(close_err) = session.close().await {
                warn!("Failed to close browser after navigation error: {}", close_err);
            }
            return Err(e);
        }

        Ok(Box::new(session))
    }
}

struct ChromiumSession {
    browser: Browser,
    page: Option<Page>,
    handler_task: JoinHandle<()>,
}

impl ChromiumSession {
    async fn navigate(&mut self, url: &str, settle: Duration) -> Result<()> {
        debug!("Navigating to {}", url);

        let page = self
            .browser
            .new_page(url)
            .await
            .map_err(|e| CriticError::Browser(format!("Failed to open page: {}", e)))?;

        page.wait_for_navigation()
            .await
            .map_err(|e| CriticError::Browser(format!("Navigation failed: {}", e)))?;

        // CDP has no networkidle2 equivalent; give late asset loads and
        // style recalculation a short window before evaluating.
        tokio::time::sleep(settle).await;

        self.page = Some(page);
        Ok(())
    }
}

#[async_trait]
impl PageSession for ChromiumSession {
    async fn evaluate(&self, script: &str) -> Result<Value> {
        let page = self
            .page
            .as_ref()
            .ok_or_else(|| CriticError::Browser("No page loaded in session".to_string()))?;

        let evaluation = page
            .evaluate(script)
            .await
            .map_err(|e| CriticError::Browser(format!("Script evaluation failed: {}", e)))?;

        evaluation
            .into_value()
            .map_err(|e| CriticError::Browser(format!("Unexpected evaluation result: {}", e)))
    }

    async fn close(&mut self) -> Result<()> {
        let result = self.browser.close().await;
        self.handler_task.abort();
        result
            .map(|_| ())
            .map_err(|e| CriticError::Browser(format!("Failed to close browser: {}", e)))
    }
}
