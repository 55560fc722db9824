//! Job and company overview snippets.
//!
//! The detail page shows a short list of "insight" rows, each an icon plus a
//! line of text. Which row is the job overview and which the company
//! overview is only visible from the icon, so rows are classified by the
//! first command of the icon's SVG path.

use crate::error::Result;
use crate::sanitize::clean_text;
use crate::site::{compile_selector, DetailSelectors};
use scraper::{ElementRef, Html, Selector};

/// Path token of the job overview icon (briefcase).
pub const JOB_ICON_TOKEN: &str = "M17";
/// Path token of the company overview icon (building).
pub const COMPANY_ICON_TOKEN: &str = "M4";

/// Only this many insight rows are considered, the rest are ignored.
pub const MAX_INSIGHTS: usize = 2;

/// What an insight row describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsightKind {
    /// Seniority, employment type
    Job,
    /// Head count, industry
    Company,
}

/// Classify an insight by its icon's SVG path data.
///
/// The first whitespace-separated token must be exactly [`JOB_ICON_TOKEN`] or
/// [`COMPANY_ICON_TOKEN`]; anything else is not an overview row.
#[must_use]
pub fn classify_icon(path_data: &str) -> Option<InsightKind> {
    match path_data.split_whitespace().next()? {
        JOB_ICON_TOKEN => Some(InsightKind::Job),
        COMPANY_ICON_TOKEN => Some(InsightKind::Company),
        _ => None,
    }
}

/// Raw content of one insight row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InsightSnapshot {
    /// `d` attribute of the row's icon path
    pub icon_path: Option<String>,
    /// Cleaned text of the row
    pub text: Option<String>,
}

impl InsightSnapshot {
    /// Snapshot from already extracted values.
    pub fn new(icon_path: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            icon_path: Some(icon_path.into()),
            text: clean_text(&text.into()),
        }
    }
}

/// Overview fields resolved from the insight rows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Overviews {
    /// Job overview text
    pub job: Option<String>,
    /// Company overview text
    pub company: Option<String>,
}

/// Assign the first [`MAX_INSIGHTS`] rows to the job/company overview.
///
/// Rows without a recognised icon or without text are skipped. When two rows
/// share a kind the later one wins.
#[must_use]
pub fn resolve_overviews(insights: &[InsightSnapshot]) -> Overviews {
    let mut overviews = Overviews::default();

    for insight in insights.iter().take(MAX_INSIGHTS) {
        let Some(kind) = insight.icon_path.as_deref().and_then(classify_icon) else {
            continue;
        };
        let Some(text) = insight.text.clone() else {
            continue;
        };
        match kind {
            InsightKind::Job => overviews.job = Some(text),
            InsightKind::Company => overviews.company = Some(text),
        }
    }

    overviews
}

/// Compiled selectors for reading insight rows out of a detail page.
#[derive(Debug, Clone)]
pub struct InsightReader {
    row: Selector,
    row_fallback: Option<Selector>,
    icon_path: Selector,
    text: Selector,
}

impl InsightReader {
    /// Compile the insight selectors of a site definition.
    pub fn compile(selectors: &DetailSelectors) -> Result<Self> {
        Ok(Self {
            row: compile_selector("detail.insight", &selectors.insight)?,
            row_fallback: selectors
                .insight_fallback
                .as_deref()
                .map(|s| compile_selector("detail.insight_fallback", s))
                .transpose()?,
            icon_path: compile_selector("detail.insight_icon_path", &selectors.insight_icon_path)?,
            text: compile_selector("detail.insight_text", &selectors.insight_text)?,
        })
    }

    /// Snapshot the insight rows, using the fallback row selector only when
    /// the primary one matches nothing.
    pub fn read(&self, document: &Html) -> Vec<InsightSnapshot> {
        let mut rows: Vec<ElementRef<'_>> = document.select(&self.row).collect();
        if rows.is_empty() {
            if let Some(fallback) = &self.row_fallback {
                rows = document.select(fallback).collect();
            }
        }

        rows.into_iter()
            .take(MAX_INSIGHTS)
            .map(|row| InsightSnapshot {
                icon_path: row
                    .select(&self.icon_path)
                    .next()
                    .and_then(|path| path.value().attr("d"))
                    .map(str::to_string),
                text: row
                    .select(&self.text)
                    .next()
                    .and_then(|span| clean_text(&span.text().collect::<String>())),
            })
            .collect()
    }
}
