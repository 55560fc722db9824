//! The per-identifier extraction loop.

use crate::error::ScanError;
use crate::extractor::RecordExtractor;
use crate::record::PostingRecord;
use jobscout_browser::BrowserActions;
use jobscout_core::PostingId;
use tracing::{error, info};

/// A posting whose record could not be built.
#[derive(Debug)]
pub struct RecordFailure {
    /// The posting that failed
    pub posting_id: PostingId,
    /// Why
    pub error: ScanError,
}

/// Records and failures of one harvest, in identifier order.
#[derive(Debug, Default)]
pub struct HarvestReport {
    /// Successfully extracted records
    pub records: Vec<PostingRecord>,
    /// Postings that were dropped
    pub failures: Vec<RecordFailure>,
}

impl HarvestReport {
    /// "N records scraped, M failed"
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "{} records scraped, {} failed",
            self.records.len(),
            self.failures.len()
        )
    }
}

/// Extract a record for every identifier, one after another.
///
/// A failing posting is logged and recorded; the loop moves on to the next
/// one. `on_progress(done, total)` runs after each posting.
pub async fn harvest<B, F>(
    extractor: &RecordExtractor<'_, B>,
    ids: &[PostingId],
    mut on_progress: F,
) -> HarvestReport
where
    B: BrowserActions + ?Sized,
    F: FnMut(usize, usize),
{
    let total = ids.len();
    let mut report = HarvestReport::default();
    info!(total, "Extracting records");

    for (index, &posting_id) in ids.iter().enumerate() {
        match extractor.extract(posting_id).await {
            Ok(record) => report.records.push(record),
            Err(e) => {
                error!(posting_id = %posting_id, error = %e, "Dropping posting");
                report.failures.push(RecordFailure {
                    posting_id,
                    error: e,
                });
            }
        }
        on_progress(index + 1, total);
    }

    info!(
        records = report.records.len(),
        failed = report.failures.len(),
        "Extraction finished"
    );
    report
}
