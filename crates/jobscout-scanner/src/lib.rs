//! Jobscout Scanner - Listing enumeration and posting record extraction.
//!
//! This crate turns a search query into a set of posting identifiers and each
//! identifier into a flat [`PostingRecord`]. It drives a
//! [`BrowserActions`](jobscout_browser::BrowserActions) session, snapshots the
//! rendered HTML, and reads fields out of the snapshot with CSS selectors that
//! come from a [`SiteDefinition`].
//!
//! # Features
//!
//! - Paginated listing enumeration with per-entry failure counting
//! - Per-field extraction chains (primary selector, then fallbacks, then null)
//! - Insight classification for job/company overview snippets
//! - Identifier file and CSV record persistence
//!
//! # Example
//!
//! ```rust,ignore
//! use jobscout_scanner::{harvest, ListingEnumerator, RecordExtractor, ScanSettings, SiteDefinition};
//!
//! let site = SiteDefinition::default();
//! let settings = ScanSettings::default();
//!
//! let enumeration = ListingEnumerator::new(&engine, &site, settings.clone())?
//!     .enumerate(&query)
//!     .await?;
//!
//! let extractor = RecordExtractor::new(&engine, &site, settings)?;
//! let ids: Vec<_> = enumeration.ids.iter().copied().collect();
//! let report = harvest(&extractor, &ids, |_, _| {}).await;
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod enumerator;
pub mod error;
pub mod extractor;
#[allow(missing_docs)]
pub mod fields;
pub mod harvest;
pub mod idfile;
pub mod insight;
pub mod output;
#[allow(missing_docs)]
pub mod parser;
pub mod record;
pub mod sanitize;
pub mod settings;
pub mod site;
#[allow(missing_docs)]
pub mod url_builder;

// Re-export commonly used types
pub use enumerator::{Enumeration, ListingEnumerator, PageFailures};
pub use error::{Result, ScanError};
pub use extractor::RecordExtractor;
pub use fields::FieldPlan;
pub use harvest::{harvest, HarvestReport, RecordFailure};
pub use idfile::{read_id_file, write_id_file, IdFile};
pub use output::{record_file_path, write_records};
pub use parser::{ListingParser, PageScan};
pub use record::{ApplyStatus, PostingRecord};
pub use settings::ScanSettings;
pub use site::SiteDefinition;
pub use url_builder::{build_search_url, detail_url, login_url, page_url};
