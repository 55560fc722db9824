//! Listing enumeration: search query in, deduplicated posting identifiers out.

use crate::error::{Result, ScanError};
use crate::parser::ListingParser;
use crate::settings::ScanSettings;
use crate::site::SiteDefinition;
use crate::url_builder::{build_search_url, page_url};
use jobscout_browser::BrowserActions;
use jobscout_core::{PostingId, SearchQuery, Timestamp};
use std::collections::BTreeSet;
use std::fmt::Write as _;
use tracing::{debug, info, warn};

/// Entries on one results page whose identifier could not be read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageFailures {
    /// 1-based page number
    pub page: u32,
    /// Number of failed entries
    pub count: usize,
}

/// Outcome of enumerating one search query.
#[derive(Debug, Clone)]
pub struct Enumeration {
    /// Unique identifiers across all scraped pages
    pub ids: BTreeSet<PostingId>,
    /// When enumeration started
    pub scraped_at: Timestamp,
    /// Pages the site reported for the query
    pub total_pages: u32,
    /// Pages actually visited after clamping
    pub pages_scraped: u32,
    /// Identifiers read before deduplication
    pub entries_read: usize,
    /// Pages with unreadable entries
    pub failures: Vec<PageFailures>,
}

impl Enumeration {
    /// Identifiers that were seen more than once.
    #[must_use]
    pub fn duplicates(&self) -> usize {
        self.entries_read - self.ids.len()
    }

    /// Failed entries over all pages.
    #[must_use]
    pub fn failed_entries(&self) -> usize {
        self.failures.iter().map(|f| f.count).sum()
    }

    /// Human-readable report of per-page entry failures.
    #[must_use]
    pub fn summary(&self) -> String {
        if self.failures.is_empty() {
            return "All jobs scraped successfully.".to_string();
        }
        let mut out = String::from("Some jobs could not be scraped:");
        for failure in &self.failures {
            let _ = write!(out, "\n - {} jobs on page {}", failure.count, failure.page);
        }
        out
    }
}

/// Walks the paginated search results of one query.
pub struct ListingEnumerator<'a, B: BrowserActions + ?Sized> {
    browser: &'a B,
    site: &'a SiteDefinition,
    parser: ListingParser,
    settings: ScanSettings,
}

impl<'a, B: BrowserActions + ?Sized> ListingEnumerator<'a, B> {
    /// Compile the listing selectors of `site`.
    pub fn new(browser: &'a B, site: &'a SiteDefinition, settings: ScanSettings) -> Result<Self> {
        Ok(Self {
            browser,
            site,
            parser: ListingParser::new(&site.listing)?,
            settings,
        })
    }

    /// Enumerate every posting identifier the query yields.
    pub async fn enumerate(&self, query: &SearchQuery) -> Result<Enumeration> {
        self.enumerate_with_progress(query, |_, _| {}).await
    }

    /// Like [`enumerate`](Self::enumerate), calling `on_page(page, pages)`
    /// after each results page is read.
    ///
    /// Fails when the first page has no pagination control. Entries whose
    /// identifier cannot be read are counted per page and skipped.
    pub async fn enumerate_with_progress<F>(
        &self,
        query: &SearchQuery,
        mut on_page: F,
    ) -> Result<Enumeration>
    where
        F: FnMut(u32, u32),
    {
        let scraped_at = Timestamp::now();
        let search_url = build_search_url(self.site, query);
        info!(keyword = query.keyword(), location = query.location(), "Enumerating listings");

        let first_page = self
            .load(&search_url, &self.site.listing.pagination_pages)
            .await?;
        let total_pages = self
            .parser
            .max_page(&first_page)
            .ok_or_else(|| ScanError::PaginationMissing {
                url: search_url.clone(),
            })?;
        let pages = query.effective_pages(total_pages);
        info!(total_pages, pages, "Resolved page count");

        let mut ids = BTreeSet::new();
        let mut entries_read = 0;
        let mut failures = Vec::new();

        for page in 1..=pages {
            let url = page_url(&search_url, page, self.settings.page_size);
            let html = self.load(&url, &self.site.listing.result_item).await?;
            let scan = self.parser.posting_ids(&html);

            debug!(page, found = scan.ids.len(), failed = scan.failed, "Read results page");
            if scan.failed > 0 {
                warn!(page, failed = scan.failed, "Some entries had no readable posting ID");
                failures.push(PageFailures {
                    page,
                    count: scan.failed,
                });
            }

            entries_read += scan.ids.len();
            ids.extend(scan.ids);
            on_page(page, pages);
        }

        info!(unique = ids.len(), entries_read, "Enumeration finished");

        Ok(Enumeration {
            ids,
            scraped_at,
            total_pages,
            pages_scraped: pages,
            entries_read,
            failures,
        })
    }

    /// Navigate, wait for `marker`, settle, snapshot.
    ///
    /// A marker that never shows up is only logged; the caller decides what
    /// an incomplete page means.
    async fn load(&self, url: &str, marker: &str) -> Result<String> {
        debug!(url, "Loading results page");
        self.browser.navigate(url).await?;

        if let Err(e) = self
            .browser
            .wait_for_selector(marker, self.settings.wait_timeout_ms())
            .await
        {
            warn!(url, error = %e, "Results did not render in time");
        }
        self.settings.settle().await;

        Ok(self.browser.page_html().await?)
    }
}
