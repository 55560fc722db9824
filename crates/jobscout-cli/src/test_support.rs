//! Offline browser session for exercising the phases without Chrome.

use async_trait::async_trait;
use jobscout_browser::{BrowserActions, BrowserError};
use std::sync::Mutex;

/// Accepts every action, serves an empty page and remembers navigations.
#[derive(Default)]
pub struct OfflineBrowser {
    visited: Mutex<Vec<String>>,
}

impl OfflineBrowser {
    pub fn visited(&self) -> Vec<String> {
        self.visited.lock().expect("visited lock").clone()
    }
}

#[async_trait]
impl BrowserActions for OfflineBrowser {
    async fn navigate(&self, url: &str) -> Result<(), BrowserError> {
        self.visited.lock().expect("visited lock").push(url.to_string());
        Ok(())
    }

    async fn fill_field(&self, _selector: &str, _value: &str) -> Result<(), BrowserError> {
        Ok(())
    }

    async fn click(&self, _selector: &str) -> Result<(), BrowserError> {
        Ok(())
    }

    async fn wait_for_selector(&self, _selector: &str, _timeout_ms: u64) -> Result<(), BrowserError> {
        Ok(())
    }

    async fn page_html(&self) -> Result<String, BrowserError> {
        Ok("<html><body></body></html>".to_string())
    }

    async fn current_url(&self) -> Result<String, BrowserError> {
        Ok(self
            .visited
            .lock()
            .expect("visited lock")
            .last()
            .cloned()
            .unwrap_or_else(|| "about:blank".to_string()))
    }
}
