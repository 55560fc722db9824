//! Per-field extraction from a detail page snapshot.
//!
//! Each field is a [`FieldChain`]: an ordered list of [`Probe`]s tried until
//! one yields a value. A probe misses when its element is absent or when the
//! value it reads does not map (an applicant line without a count, an apply
//! icon of an unknown type). A chain that runs out of probes leaves the field
//! empty. Fields never affect each other.

use crate::error::Result;
use crate::insight::{resolve_overviews, InsightReader};
use crate::record::{ApplyStatus, PostingRecord};
use crate::sanitize::clean_text;
use crate::site::{compile_selector, DetailSelectors};
use jobscout_core::{PostingId, Timestamp};
use regex::Regex;
use scraper::{Html, Selector};
use std::sync::OnceLock;
use tracing::debug;

/// What to read from a matched element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Read {
    /// Serialized children, HTML comments included
    InnerHtml,
    /// Concatenated descendant text
    Text,
    /// Value of the named attribute
    Attr(String),
}

/// One extraction strategy: first element matching `selector`, read it, map it.
#[derive(Debug, Clone)]
pub struct Probe<T> {
    selector: Selector,
    read: Read,
    map: fn(&str) -> Option<T>,
}

impl<T> Probe<T> {
    pub fn new(field: &str, selector: &str, read: Read, map: fn(&str) -> Option<T>) -> Result<Self> {
        Ok(Self {
            selector: compile_selector(field, selector)?,
            read,
            map,
        })
    }

    pub fn probe(&self, document: &Html) -> Option<T> {
        let element = document.select(&self.selector).next()?;
        let raw = match &self.read {
            Read::InnerHtml => element.inner_html(),
            Read::Text => element.text().collect::<String>(),
            Read::Attr(name) => element.value().attr(name)?.to_string(),
        };
        (self.map)(&raw)
    }
}

/// Ordered probes for one field.
#[derive(Debug, Clone)]
pub struct FieldChain<T> {
    field: &'static str,
    probes: Vec<Probe<T>>,
}

impl<T> FieldChain<T> {
    pub fn new(field: &'static str, probes: Vec<Probe<T>>) -> Self {
        Self { field, probes }
    }

    /// Chain with a single probe.
    pub fn single(
        field: &'static str,
        selector: &str,
        read: Read,
        map: fn(&str) -> Option<T>,
    ) -> Result<Self> {
        Ok(Self::new(field, vec![Probe::new(field, selector, read, map)?]))
    }

    /// First value any probe yields, in order.
    pub fn resolve(&self, document: &Html) -> Option<T> {
        let value = self.probes.iter().find_map(|probe| probe.probe(document));
        if value.is_none() {
            debug!(field = self.field, probes = self.probes.len(), "field not found");
        }
        value
    }
}

/// Trimmed text with HTML comments removed.
pub fn text_value(raw: &str) -> Option<String> {
    clean_text(raw)
}

fn applicants_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"(\d+) applicants").expect("valid regex"))
}

/// "Over 200 applicants" and similar, case-insensitively.
pub fn applicant_count(raw: &str) -> Option<u32> {
    applicants_pattern()
        .captures(&raw.to_lowercase())
        .and_then(|caps| caps.get(1))
        .and_then(|count| count.as_str().parse().ok())
}

/// Icon type inside the apply button.
pub fn apply_button_status(raw: &str) -> Option<ApplyStatus> {
    match raw.trim() {
        "linkedin-bug" => Some(ApplyStatus::EasyApply),
        "link-external" => Some(ApplyStatus::ExternalLink),
        _ => None,
    }
}

/// Icon type of the apply error banner.
pub fn apply_error_status(raw: &str) -> Option<ApplyStatus> {
    (raw.trim() == "error-pebble-icon").then_some(ApplyStatus::Closed)
}

/// Every field chain of the detail page, compiled once per run.
#[derive(Debug, Clone)]
pub struct FieldPlan {
    name: FieldChain<String>,
    company: FieldChain<String>,
    company_logo_url: FieldChain<String>,
    location: FieldChain<String>,
    workplace_type: FieldChain<String>,
    time_posted: FieldChain<String>,
    applicants_count: FieldChain<u32>,
    insights: InsightReader,
    apply_status: FieldChain<ApplyStatus>,
    hr_url: FieldChain<String>,
    job_details: FieldChain<String>,
    company_details: FieldChain<String>,
}

impl FieldPlan {
    pub fn compile(s: &DetailSelectors) -> Result<Self> {
        Ok(Self {
            name: FieldChain::single("detail.title", &s.title, Read::InnerHtml, text_value)?,
            company: FieldChain::single("detail.company", &s.company, Read::InnerHtml, text_value)?,
            company_logo_url: FieldChain::single(
                "detail.company_logo",
                &s.company_logo,
                Read::Attr("src".to_string()),
                text_value,
            )?,
            location: FieldChain::single(
                "detail.location",
                &s.location,
                Read::InnerHtml,
                text_value,
            )?,
            workplace_type: FieldChain::single(
                "detail.workplace_type",
                &s.workplace_type,
                Read::InnerHtml,
                text_value,
            )?,
            time_posted: FieldChain::single(
                "detail.time_posted",
                &s.time_posted,
                Read::InnerHtml,
                text_value,
            )?,
            applicants_count: FieldChain::new(
                "detail.applicants",
                vec![
                    Probe::new("detail.applicants", &s.applicants, Read::Text, applicant_count)?,
                    Probe::new(
                        "detail.applicants_fallback",
                        &s.applicants_fallback,
                        Read::Text,
                        applicant_count,
                    )?,
                ],
            ),
            insights: InsightReader::compile(s)?,
            apply_status: FieldChain::new(
                "detail.apply_icon",
                vec![
                    Probe::new(
                        "detail.apply_icon",
                        &s.apply_icon,
                        Read::Attr("type".to_string()),
                        apply_button_status,
                    )?,
                    Probe::new(
                        "detail.apply_closed_icon",
                        &s.apply_closed_icon,
                        Read::Attr("type".to_string()),
                        apply_error_status,
                    )?,
                ],
            ),
            hr_url: FieldChain::single(
                "detail.recruiter_link",
                &s.recruiter_link,
                Read::Attr("href".to_string()),
                text_value,
            )?,
            job_details: FieldChain::single(
                "detail.job_details",
                &s.job_details,
                Read::InnerHtml,
                text_value,
            )?,
            company_details: FieldChain::single(
                "detail.company_details",
                &s.company_details,
                Read::InnerHtml,
                text_value,
            )?,
        })
    }

    /// Build the record for one posting from its detail page HTML.
    ///
    /// Pure: every field is resolved independently against the snapshot.
    pub fn extract_record(
        &self,
        posting_id: PostingId,
        url: String,
        html: &str,
        scraped_at: Timestamp,
    ) -> PostingRecord {
        let document = Html::parse_document(html);
        let overviews = resolve_overviews(&self.insights.read(&document));

        PostingRecord {
            posting_id,
            url,
            name: self.name.resolve(&document),
            company: self.company.resolve(&document),
            company_logo_url: self.company_logo_url.resolve(&document),
            location: self.location.resolve(&document),
            workplace_type: self.workplace_type.resolve(&document),
            time_posted: self.time_posted.resolve(&document),
            applicants_count: self.applicants_count.resolve(&document),
            job_overview: overviews.job,
            company_overview: overviews.company,
            apply_status: self.apply_status.resolve(&document),
            hr_url: self.hr_url.resolve(&document),
            scraped_at,
            job_details: self.job_details.resolve(&document),
            company_details: self.company_details.resolve(&document),
        }
    }
}
