//! The flat per-posting record written to the record file.

use jobscout_core::{PostingId, Timestamp};
use serde::{Deserialize, Serialize};
use std::fmt;

/// How a posting accepts applications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ApplyStatus {
    /// Applied to on the site itself
    #[serde(rename = "Easy Apply")]
    EasyApply,
    /// Redirects to the employer's own page
    #[serde(rename = "External Link")]
    ExternalLink,
    /// No longer accepting applications
    #[serde(rename = "Closed")]
    Closed,
}

impl ApplyStatus {
    /// Label used in the record file.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::EasyApply => "Easy Apply",
            Self::ExternalLink => "External Link",
            Self::Closed => "Closed",
        }
    }
}

impl fmt::Display for ApplyStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything read from one posting's detail page.
///
/// Every scraped field is independently optional. A record is built once by
/// the extractor and never modified afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostingRecord {
    /// Identifier the record was scraped for
    #[serde(rename = "Job ID")]
    pub posting_id: PostingId,
    /// Detail page URL
    #[serde(rename = "Job URL")]
    pub url: String,
    /// Posting title
    #[serde(rename = "Name")]
    pub name: Option<String>,
    /// Employer name
    #[serde(rename = "Company")]
    pub company: Option<String>,
    /// Employer logo image URL
    #[serde(rename = "Company Logo URL")]
    pub company_logo_url: Option<String>,
    /// Location text as shown on the card
    #[serde(rename = "Location")]
    pub location: Option<String>,
    /// Work-mode tag (On-site, Hybrid, Remote)
    #[serde(rename = "Workplace Type")]
    pub workplace_type: Option<String>,
    /// Relative post age, e.g. "3 days ago"
    #[serde(rename = "Time Posted")]
    pub time_posted: Option<String>,
    /// Number of applicants, when the site shows one
    #[serde(rename = "Applicants Count")]
    pub applicants_count: Option<u32>,
    /// Insight snippet classified as job overview
    #[serde(rename = "Job Overview")]
    pub job_overview: Option<String>,
    /// Insight snippet classified as company overview
    #[serde(rename = "Company Overview")]
    pub company_overview: Option<String>,
    /// How applications are taken
    #[serde(rename = "Apply Status")]
    pub apply_status: Option<ApplyStatus>,
    /// Profile URL of the hiring contact
    #[serde(rename = "HR URL")]
    pub hr_url: Option<String>,
    /// When the detail page was read
    #[serde(rename = "Scrape Timestamp")]
    pub scraped_at: Timestamp,
    /// Job description, HTML comments stripped
    #[serde(rename = "Job Details")]
    pub job_details: Option<String>,
    /// Employer description, HTML comments stripped
    #[serde(rename = "Company Details")]
    pub company_details: Option<String>,
}

impl PostingRecord {
    /// Column headers, in file order.
    pub const COLUMNS: [&'static str; 16] = [
        "Job ID",
        "Job URL",
        "Name",
        "Company",
        "Company Logo URL",
        "Location",
        "Workplace Type",
        "Time Posted",
        "Applicants Count",
        "Job Overview",
        "Company Overview",
        "Apply Status",
        "HR URL",
        "Scrape Timestamp",
        "Job Details",
        "Company Details",
    ];

    /// A record with only the identifying columns filled in.
    #[must_use]
    pub fn empty(posting_id: PostingId, url: String, scraped_at: Timestamp) -> Self {
        Self {
            posting_id,
            url,
            name: None,
            company: None,
            company_logo_url: None,
            location: None,
            workplace_type: None,
            time_posted: None,
            applicants_count: None,
            job_overview: None,
            company_overview: None,
            apply_status: None,
            hr_url: None,
            scraped_at,
            job_details: None,
            company_details: None,
        }
    }

    /// Number of scraped fields that came back empty.
    #[must_use]
    pub fn missing_fields(&self) -> usize {
        [
            self.name.is_none(),
            self.company.is_none(),
            self.company_logo_url.is_none(),
            self.location.is_none(),
            self.workplace_type.is_none(),
            self.time_posted.is_none(),
            self.applicants_count.is_none(),
            self.job_overview.is_none(),
            self.company_overview.is_none(),
            self.apply_status.is_none(),
            self.hr_url.is_none(),
            self.job_details.is_none(),
            self.company_details.is_none(),
        ]
        .into_iter()
        .filter(|missing| *missing)
        .count()
    }
}
