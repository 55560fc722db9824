//! Offline browser session and page fixtures shared by the integration tests.

#![allow(dead_code)]

use async_trait::async_trait;
use jobscout_browser::{BrowserActions, BrowserError};
use jobscout_scanner::SiteDefinition;
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

pub const BASE_URL: &str = "https://jobs.test";

/// Site definition pointing at the fixture host.
pub fn test_site() -> SiteDefinition {
    let mut site = SiteDefinition::default();
    site.site.base_url = BASE_URL.to_string();
    site
}

/// Serves fixed HTML per URL and remembers every navigation.
#[derive(Default)]
pub struct MockBrowser {
    pages: HashMap<String, String>,
    unreachable: HashSet<String>,
    waits_time_out: bool,
    current: Mutex<Option<String>>,
    visited: Mutex<Vec<String>>,
}

impl MockBrowser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(mut self, url: impl Into<String>, html: impl Into<String>) -> Self {
        self.pages.insert(url.into(), html.into());
        self
    }

    pub fn with_unreachable(mut self, url: impl Into<String>) -> Self {
        self.unreachable.insert(url.into());
        self
    }

    /// Every readiness wait times out, as if the page never finished rendering.
    pub fn with_wait_timeouts(mut self) -> Self {
        self.waits_time_out = true;
        self
    }

    pub fn visited(&self) -> Vec<String> {
        self.visited.lock().expect("visited lock").clone()
    }
}

#[async_trait]
impl BrowserActions for MockBrowser {
    async fn navigate(&self, url: &str) -> Result<(), BrowserError> {
        self.visited.lock().expect("visited lock").push(url.to_string());
        if self.unreachable.contains(url) {
            return Err(BrowserError::NavigationError(format!(
                "net::ERR_CONNECTION_RESET at {url}"
            )));
        }
        *self.current.lock().expect("current lock") = Some(url.to_string());
        Ok(())
    }

    async fn fill_field(&self, _selector: &str, _value: &str) -> Result<(), BrowserError> {
        Ok(())
    }

    async fn click(&self, _selector: &str) -> Result<(), BrowserError> {
        Ok(())
    }

    async fn wait_for_selector(&self, selector: &str, timeout_ms: u64) -> Result<(), BrowserError> {
        if self.waits_time_out {
            return Err(BrowserError::Timeout(format!(
                "{selector} did not appear within {timeout_ms}ms"
            )));
        }
        Ok(())
    }

    async fn page_html(&self) -> Result<String, BrowserError> {
        let current = self.current.lock().expect("current lock").clone();
        Ok(current
            .and_then(|url| self.pages.get(&url).cloned())
            .unwrap_or_else(|| "<html><body></body></html>".to_string()))
    }

    async fn current_url(&self) -> Result<String, BrowserError> {
        Ok(self
            .current
            .lock()
            .expect("current lock")
            .clone()
            .unwrap_or_else(|| "about:blank".to_string()))
    }
}

/// A results page listing `entries` with a pagination control up to `pages`.
///
/// `None` entries have no identifier attribute (promoted cards).
pub fn results_page(pages: u32, entries: &[Option<u64>]) -> String {
    let pagination: String = (1..=pages)
        .map(|p| format!(r#"<li data-test-pagination-page-btn="{p}"><button><span>{p}</span></button></li>"#))
        .collect();
    let items: String = entries
        .iter()
        .map(|entry| match entry {
            Some(id) => format!(
                r#"<li class="jobs-search-results__list-item scaffold-layout__list-item" data-occludable-job-id="{id}"><div>Posting {id}</div></li>"#
            ),
            None => r#"<li class="scaffold-layout__list-item"><div>Promoted</div></li>"#.to_string(),
        })
        .collect();

    format!(
        r#"<html><body><main>
        <div class="jobs-search-results-list">
          <ul class="scaffold-layout__list-container">{items}</ul>
          <div class="jobs-search-results-list__pagination artdeco-pagination"><ul>{pagination}</ul></div>
        </div>
        </main></body></html>"#
    )
}

/// A detail page with a title and company, plus whatever `extra` adds.
pub fn detail_page(title: &str, company: &str, extra: &str) -> String {
    format!(
        r#"<html><body>
        <div class="p5">
          <h1 class="jobs-unified-top-card__job-title">{title}</h1>
          <span class="jobs-unified-top-card__company-name"><a href="/company/x">{company}</a></span>
          {extra}
        </div>
        </body></html>"#
    )
}
