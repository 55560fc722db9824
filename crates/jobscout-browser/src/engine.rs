use crate::actions::{extract_domain, BrowserActions};
use crate::error::{BrowserError, Result};
use crate::launch::LaunchOptions;
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::Page;
use futures_util::stream::StreamExt;
use std::time::{Duration, Instant};
use tokio::task::JoinHandle;

/// Browser automation engine
///
/// Owns one Chrome process and one page. Every navigation mutates that page,
/// so the engine is meant to be driven sequentially.
pub struct BrowserEngine {
    browser: Browser,
    page: Page,
    handler_task: JoinHandle<()>,
    options: LaunchOptions,
}

impl BrowserEngine {
    /// Create a new browser engine with default configuration
    pub async fn new() -> Result<Self> {
        Self::launch(LaunchOptions::default()).await
    }

    /// Start Chrome with the given options and open a blank page
    pub async fn launch(options: LaunchOptions) -> Result<Self> {
        options.check_executable()?;

        let mut builder = BrowserConfig::builder()
            .no_sandbox()
            .window_size(options.window_width, options.window_height)
            .request_timeout(options.navigation_timeout);
        if !options.headless {
            builder = builder.with_head();
        }
        if let Some(executable) = &options.executable {
            builder = builder.chrome_executable(executable);
        }
        for arg in options.extra_args() {
            builder = builder.arg(arg);
        }
        let config = builder.build().map_err(BrowserError::ChromiumError)?;

        let (browser, mut handler) = Browser::launch(config)
            .await
            .map_err(|e| BrowserError::ChromiumError(e.to_string()))?;

        // Spawn browser handler
        let handler_task = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(e) = event {
                    tracing::debug!("browser handler event error: {}", e);
                }
            }
        });

        let page = browser
            .new_page("about:blank")
            .await
            .map_err(|e| BrowserError::ChromiumError(e.to_string()))?;

        tracing::info!(headless = options.headless, "browser session started");

        Ok(Self {
            browser,
            page,
            handler_task,
            options,
        })
    }

    /// Close the browser and wait for the process to exit
    pub async fn close(self) -> Result<()> {
        let Self {
            mut browser,
            handler_task,
            ..
        } = self;
        browser
            .close()
            .await
            .map_err(|e| BrowserError::ChromiumError(e.to_string()))?;
        if let Err(e) = browser.wait().await {
            tracing::warn!("browser process did not exit cleanly: {}", e);
        }
        handler_task.abort();
        tracing::info!("browser session closed");
        Ok(())
    }

    fn chromium_err(e: impl std::fmt::Display) -> BrowserError {
        BrowserError::ChromiumError(e.to_string())
    }
}

#[async_trait::async_trait]
impl BrowserActions for BrowserEngine {
    async fn navigate(&self, url: &str) -> Result<()> {
        let domain = extract_domain(url)?;
        tracing::debug!(%domain, "navigating to {}", url);

        match tokio::time::timeout(self.options.navigation_timeout, self.page.goto(url)).await {
            Ok(Ok(_)) => Ok(()),
            Ok(Err(e)) => Err(BrowserError::NavigationError(format!("{url}: {e}"))),
            Err(_) => Err(BrowserError::Timeout(format!(
                "navigation to {url} exceeded {:?}",
                self.options.navigation_timeout
            ))),
        }
    }

    async fn fill_field(&self, selector: &str, value: &str) -> Result<()> {
        let element = self
            .page
            .find_element(selector)
            .await
            .map_err(|_| BrowserError::SelectorNotFound(selector.to_string()))?;
        element.click().await.map_err(Self::chromium_err)?;
        element.type_str(value).await.map_err(Self::chromium_err)?;
        Ok(())
    }

    async fn click(&self, selector: &str) -> Result<()> {
        let element = self
            .page
            .find_element(selector)
            .await
            .map_err(|_| BrowserError::SelectorNotFound(selector.to_string()))?;
        element.click().await.map_err(Self::chromium_err)?;
        Ok(())
    }

    async fn wait_for_selector(&self, selector: &str, timeout_ms: u64) -> Result<()> {
        let deadline = Instant::now() + Duration::from_millis(timeout_ms);
        loop {
            if self.page.find_element(selector).await.is_ok() {
                return Ok(());
            }
            if Instant::now() >= deadline {
                return Err(BrowserError::Timeout(format!(
                    "{selector} did not appear within {timeout_ms}ms"
                )));
            }
            tokio::time::sleep(self.options.poll_interval).await;
        }
    }

    async fn page_html(&self) -> Result<String> {
        self.page.content().await.map_err(Self::chromium_err)
    }

    async fn current_url(&self) -> Result<String> {
        self.page
            .url()
            .await
            .map_err(Self::chromium_err)?
            .ok_or_else(|| BrowserError::NavigationError("page has no URL".to_string()))
    }
}
