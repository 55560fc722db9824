//! Shared types used across jobscout.
//!
//! This module defines the newtypes that flow between the listing
//! enumerator, the record extractor and the file writers.

use crate::error::JobscoutError;
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Identifier of a single posting on the source site.
///
/// The site uses decimal integer identifiers, so anything that does not
/// parse as one is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PostingId(u64);

impl PostingId {
    /// Create a `PostingId` from its numeric value.
    #[must_use]
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// Parse a `PostingId` from text, ignoring surrounding whitespace.
    ///
    /// # Errors
    /// Returns error if the text is not a non-negative decimal integer.
    pub fn parse(raw: &str) -> Result<Self, JobscoutError> {
        let trimmed = raw.trim();
        trimmed.parse::<u64>().map(Self).map_err(|_| {
            JobscoutError::Validation(format!(
                "invalid posting ID: expected a decimal integer, got '{trimmed}'"
            ))
        })
    }

    /// Get the numeric value.
    #[must_use]
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl FromStr for PostingId {
    type Err = JobscoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for PostingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A job search: keyword, location and how many result pages to read.
///
/// A `page_limit` of zero means "every page the site reports".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchQuery {
    keyword: String,
    location: String,
    page_limit: u32,
}

impl SearchQuery {
    /// Create a new search query.
    ///
    /// Keyword and location are trimmed. Both end up on their own line in
    /// the identifier file, so line breaks are rejected.
    ///
    /// # Errors
    /// Returns error if keyword or location contain a line break.
    pub fn new(
        keyword: impl Into<String>,
        location: impl Into<String>,
        page_limit: u32,
    ) -> Result<Self, JobscoutError> {
        let keyword = keyword.into().trim().to_string();
        let location = location.into().trim().to_string();

        for (field, value) in [("keyword", &keyword), ("location", &location)] {
            if value.contains(['\n', '\r']) {
                return Err(JobscoutError::Validation(format!(
                    "search {field} must be a single line"
                )));
            }
        }

        Ok(Self {
            keyword,
            location,
            page_limit,
        })
    }

    /// Search keyword.
    #[must_use]
    pub fn keyword(&self) -> &str {
        &self.keyword
    }

    /// Search location.
    #[must_use]
    pub fn location(&self) -> &str {
        &self.location
    }

    /// Requested page limit (0 = all available pages).
    #[must_use]
    pub fn page_limit(&self) -> u32 {
        self.page_limit
    }

    /// Number of pages to read given how many the site reports.
    ///
    /// `min(requested, available)` when a limit was requested, otherwise
    /// `available`.
    #[must_use]
    pub fn effective_pages(&self, available: u32) -> u32 {
        if self.page_limit > 0 {
            self.page_limit.min(available)
        } else {
            available
        }
    }
}

/// Wrapper around `chrono::DateTime<Local>` for scrape timestamps.
///
/// Local time is used because the timestamp ends up in file names the user
/// browses by hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(DateTime<Local>);

impl Timestamp {
    /// Create a timestamp representing the current moment.
    #[must_use]
    pub fn now() -> Self {
        Self(Local::now())
    }

    /// Compact form used in identifier file names, e.g. `240131_142501`.
    #[must_use]
    pub fn file_stamp(&self) -> String {
        self.0.format("%y%m%d_%H%M%S").to_string()
    }

    /// Human-readable form used in console output, e.g. `2024/01/31 14:25:01`.
    #[must_use]
    pub fn display_stamp(&self) -> String {
        self.0.format("%Y/%m/%d %H:%M:%S").to_string()
    }
}

impl Default for Timestamp {
    fn default() -> Self {
        Self::now()
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.to_rfc3339())
    }
}

impl From<DateTime<Local>> for Timestamp {
    fn from(dt: DateTime<Local>) -> Self {
        Self(dt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_posting_id_parse() {
        let id = PostingId::parse(" 3791234567 ").expect("valid posting ID");
        assert_eq!(id.value(), 3_791_234_567);
        assert_eq!(id.to_string(), "3791234567");
    }

    #[test]
    fn test_posting_id_invalid() {
        for raw in ["", "keywords=rust", "12a", "-5", "1.5"] {
            assert!(PostingId::parse(raw).is_err(), "Should fail for: {raw}");
        }
    }

    #[test]
    fn test_posting_id_serializes_as_number() {
        let json = serde_json::to_string(&PostingId::new(42)).expect("serialize posting ID");
        assert_eq!(json, "42");
    }

    #[test]
    fn test_effective_pages_clamps_to_available() {
        let query = SearchQuery::new("engineer", "remote", 5).expect("valid query");
        assert_eq!(query.effective_pages(3), 3);
        assert_eq!(query.effective_pages(40), 5);
    }

    #[test]
    fn test_effective_pages_unbounded() {
        let query = SearchQuery::new("engineer", "remote", 0).expect("valid query");
        assert_eq!(query.effective_pages(40), 40);
        assert_eq!(query.effective_pages(0), 0);
    }

    #[test]
    fn test_search_query_trims() {
        let query = SearchQuery::new("  data engineer ", " Berlin ", 1).expect("valid query");
        assert_eq!(query.keyword(), "data engineer");
        assert_eq!(query.location(), "Berlin");
    }

    #[test]
    fn test_search_query_rejects_line_breaks() {
        assert!(SearchQuery::new("rust\ndeveloper", "remote", 1).is_err());
        assert!(SearchQuery::new("rust", "new\r\nyork", 1).is_err());
    }

    #[test]
    fn test_timestamp_stamps() {
        let dt = Local
            .with_ymd_and_hms(2024, 1, 31, 14, 25, 1)
            .single()
            .expect("unambiguous local time");
        let ts = Timestamp::from(dt);
        assert_eq!(ts.file_stamp(), "240131_142501");
        assert_eq!(ts.display_stamp(), "2024/01/31 14:25:01");
    }

    #[test]
    fn test_timestamp_ordering() {
        let ts1 = Timestamp::now();
        std::thread::sleep(std::time::Duration::from_millis(10));
        let ts2 = Timestamp::now();
        assert!(ts2 > ts1);
    }
}
