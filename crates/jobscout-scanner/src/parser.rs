use crate::error::Result;
use crate::site::{compile_selector, ListingSelectors};
use jobscout_core::PostingId;
use scraper::{Html, Selector};
use tracing::trace;

/// Identifiers read off one results page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageScan {
    pub ids: Vec<PostingId>,
    /// Entries whose identifier attribute was missing or not numeric
    pub failed: usize,
}

/// Reads the search results page with selectors compiled once up front.
#[derive(Debug, Clone)]
pub struct ListingParser {
    pagination: Selector,
    result_item: Selector,
    id_attribute: String,
}

impl ListingParser {
    pub fn new(selectors: &ListingSelectors) -> Result<Self> {
        Ok(Self {
            pagination: compile_selector("listing.pagination_pages", &selectors.pagination_pages)?,
            result_item: compile_selector("listing.result_item", &selectors.result_item)?,
            id_attribute: selectors.id_attribute.clone(),
        })
    }

    /// Highest page number shown in the pagination control.
    ///
    /// Entries that are not numbers ("…", "Next") are skipped. `None` means
    /// the control is absent or carries no page number at all.
    pub fn max_page(&self, html: &str) -> Option<u32> {
        let document = Html::parse_document(html);
        document
            .select(&self.pagination)
            .filter_map(|li| li.text().collect::<String>().trim().parse::<u32>().ok())
            .max()
    }

    /// Read every result entry's identifier attribute.
    ///
    /// Entries that fail are counted, the rest of the page still counts.
    pub fn posting_ids(&self, html: &str) -> PageScan {
        let document = Html::parse_document(html);
        let mut scan = PageScan::default();

        for entry in document.select(&self.result_item) {
            match entry
                .value()
                .attr(&self.id_attribute)
                .map(PostingId::parse)
            {
                Some(Ok(id)) => scan.ids.push(id),
                Some(Err(e)) => {
                    trace!(error = %e, "unparseable posting id");
                    scan.failed += 1;
                }
                None => scan.failed += 1,
            }
        }

        scan
    }
}
