//! Timing and paging knobs shared by the enumerator and the extractor.

use jobscout_core::ScrapingConfig;
use std::time::Duration;

/// Scan timing derived from the `[scraping]` config section.
#[derive(Debug, Clone)]
pub struct ScanSettings {
    /// Entries per results page; page `p` starts at `(p - 1) * page_size`
    pub page_size: u32,
    /// Upper bound on waiting for a page's readiness marker
    pub wait_timeout: Duration,
    /// Pause after the marker appears
    pub settle_delay: Duration,
}

impl Default for ScanSettings {
    fn default() -> Self {
        Self::from(&ScrapingConfig::default())
    }
}

impl From<&ScrapingConfig> for ScanSettings {
    fn from(config: &ScrapingConfig) -> Self {
        Self {
            page_size: config.page_size,
            wait_timeout: config.wait_timeout(),
            settle_delay: config.settle_delay(),
        }
    }
}

impl ScanSettings {
    /// Settings for tests and offline fixtures: no waiting at all.
    #[must_use]
    pub fn immediate() -> Self {
        Self {
            page_size: 25,
            wait_timeout: Duration::ZERO,
            settle_delay: Duration::ZERO,
        }
    }

    pub(crate) fn wait_timeout_ms(&self) -> u64 {
        u64::try_from(self.wait_timeout.as_millis()).unwrap_or(u64::MAX)
    }

    pub(crate) async fn settle(&self) {
        if !self.settle_delay.is_zero() {
            tokio::time::sleep(self.settle_delay).await;
        }
    }
}
