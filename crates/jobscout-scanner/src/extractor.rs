//! Record extraction: posting identifier in, [`PostingRecord`] out.

use crate::error::Result;
use crate::fields::FieldPlan;
use crate::record::PostingRecord;
use crate::settings::ScanSettings;
use crate::site::SiteDefinition;
use crate::url_builder::detail_url;
use jobscout_browser::BrowserActions;
use jobscout_core::{PostingId, Timestamp};
use tracing::{debug, warn};

/// Reads posting detail pages through a browser session.
pub struct RecordExtractor<'a, B: BrowserActions + ?Sized> {
    browser: &'a B,
    site: &'a SiteDefinition,
    plan: FieldPlan,
    settings: ScanSettings,
}

impl<'a, B: BrowserActions + ?Sized> RecordExtractor<'a, B> {
    /// Compile the detail selectors of `site`.
    pub fn new(browser: &'a B, site: &'a SiteDefinition, settings: ScanSettings) -> Result<Self> {
        Ok(Self {
            browser,
            site,
            plan: FieldPlan::compile(&site.detail)?,
            settings,
        })
    }

    /// Load the posting's detail page and read every field.
    ///
    /// Missing fields are left empty. Only a failure of the page as a whole
    /// (navigation, snapshot) is returned as an error.
    pub async fn extract(&self, id: PostingId) -> Result<PostingRecord> {
        let url = detail_url(self.site, id);
        let scraped_at = Timestamp::now();

        debug!(posting_id = %id, url = %url, "Loading detail page");
        self.browser.navigate(&url).await?;

        if let Err(e) = self
            .browser
            .wait_for_selector(&self.site.detail.title, self.settings.wait_timeout_ms())
            .await
        {
            warn!(posting_id = %id, error = %e, "Detail page did not render in time");
        }
        self.settings.settle().await;

        let html = self.browser.page_html().await?;
        let record = self.plan.extract_record(id, url, &html, scraped_at);

        let missing = record.missing_fields();
        if missing > 0 {
            debug!(posting_id = %id, missing, "Record has empty fields");
        }
        Ok(record)
    }
}
