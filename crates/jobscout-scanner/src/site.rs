//! Site definition: URLs and CSS selectors of the job site.
//!
//! The defaults target the live site's current markup. Class names on the
//! site change every few months, so every selector can be overridden from a
//! TOML file without rebuilding:
//!
//! ```toml
//! [detail]
//! title = ".job-details-jobs-unified-top-card__job-title"
//! ```

use crate::error::{Result, ScanError};
use crate::fields::FieldPlan;
use crate::parser::ListingParser;
use jobscout_auth::LoginForm;
use scraper::Selector;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// Complete description of the job site.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteDefinition {
    /// Base URL and paths
    pub site: SiteUrls,
    /// Search results page selectors
    pub listing: ListingSelectors,
    /// Posting detail page selectors
    pub detail: DetailSelectors,
    /// Login page selectors
    pub login: LoginForm,
}

impl SiteDefinition {
    /// Load a site definition override from TOML.
    ///
    /// Sections and keys missing from the file keep their defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let definition: Self =
            toml::from_str(&contents).map_err(|source| ScanError::SiteDefinitionParse {
                path: path.display().to_string(),
                source,
            })?;
        definition.validate()?;

        debug!(path = %path.display(), base_url = %definition.site.base_url, "loaded site definition");
        Ok(definition)
    }

    /// Load the override file when one is configured, else the defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    /// Validate URLs and compile every selector once.
    pub fn validate(&self) -> Result<()> {
        if !self.site.base_url.starts_with("http://") && !self.site.base_url.starts_with("https://")
        {
            return Err(ScanError::InvalidSiteDefinition(format!(
                "site.base_url must be an http(s) URL, got '{}'",
                self.site.base_url
            )));
        }

        for (field, path) in [
            ("site.search_path", &self.site.search_path),
            ("site.detail_path", &self.site.detail_path),
            ("site.login_path", &self.site.login_path),
        ] {
            if !path.starts_with('/') {
                return Err(ScanError::InvalidSiteDefinition(format!(
                    "{field} must start with '/', got '{path}'"
                )));
            }
        }

        ListingParser::new(&self.listing)?;
        FieldPlan::compile(&self.detail)?;

        for (field, selector) in [
            ("login.username_input", &self.login.username_input),
            ("login.password_input", &self.login.password_input),
            ("login.submit_button", &self.login.submit_button),
            ("login.success_indicator", &self.login.success_indicator),
        ] {
            compile_selector(field, selector)?;
        }

        Ok(())
    }
}

/// Base URL and the paths hanging off it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteUrls {
    /// Scheme and host, without trailing slash
    pub base_url: String,
    /// Search results path
    pub search_path: String,
    /// Posting detail path, the identifier is appended
    pub detail_path: String,
    /// Login page path
    pub login_path: String,
}

impl Default for SiteUrls {
    fn default() -> Self {
        Self {
            base_url: "https://www.linkedin.com".to_string(),
            search_path: "/jobs/search/".to_string(),
            detail_path: "/jobs/view/".to_string(),
            login_path: "/login".to_string(),
        }
    }
}

/// Selectors on the search results page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListingSelectors {
    /// Page-number entries of the pagination control
    pub pagination_pages: String,
    /// One entry per posting in the results list
    pub result_item: String,
    /// Attribute on `result_item` carrying the posting identifier
    pub id_attribute: String,
}

impl Default for ListingSelectors {
    fn default() -> Self {
        Self {
            pagination_pages: ".jobs-search-results-list__pagination ul li".to_string(),
            result_item: ".jobs-search-results-list .scaffold-layout__list-container .scaffold-layout__list-item".to_string(),
            id_attribute: "data-occludable-job-id".to_string(),
        }
    }
}

/// Selectors on a posting's detail page.
///
/// `*_fallback` selectors are only consulted when the primary one yields nothing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetailSelectors {
    /// Job title
    pub title: String,
    /// Employer name
    pub company: String,
    /// Employer logo image
    pub company_logo: String,
    /// Location text
    pub location: String,
    /// On-site/remote/hybrid tag
    pub workplace_type: String,
    /// Relative post age ("2 days ago")
    pub time_posted: String,
    /// Highlighted insight carrying "N applicants"
    pub applicants: String,
    /// Secondary location of the applicant count
    pub applicants_fallback: String,
    /// Insight elements holding the job/company overview snippets
    pub insight: String,
    /// Insight elements in the older top-card layout
    #[serde(skip_serializing_if = "Option::is_none")]
    pub insight_fallback: Option<String>,
    /// Vector icon path inside an insight
    pub insight_icon_path: String,
    /// Text container inside an insight
    pub insight_text: String,
    /// Icon inside the apply button
    pub apply_icon: String,
    /// Icon of the "no longer accepting applications" banner
    pub apply_closed_icon: String,
    /// Link to the recruiter's profile
    pub recruiter_link: String,
    /// Job description body
    pub job_details: String,
    /// "About the company" body
    pub company_details: String,
}

impl Default for DetailSelectors {
    fn default() -> Self {
        const CARD: &str = "jobs-unified-top-card";
        Self {
            title: format!(".{CARD}__job-title"),
            company: format!("span[class*='{CARD}__company-name'] a"),
            company_logo: ".p5 img".to_string(),
            location: format!(
                "span[class*='{CARD}__subtitle-primary-grouping'] span[class*='{CARD}__bullet']"
            ),
            workplace_type: format!(".{CARD}__workplace-type"),
            time_posted: format!(".{CARD}__posted-date"),
            applicants: format!("div[class*='mb2'] li[class*='{CARD}__job-insight--highlight'] > span"),
            applicants_fallback: format!(
                "span[class*='{CARD}__subtitle-secondary-grouping'] span[class*='{CARD}__bullet']"
            ),
            insight: format!(".{CARD}__job-insight"),
            insight_fallback: None,
            insight_icon_path: "path".to_string(),
            insight_text: "span".to_string(),
            apply_icon: "div[class='jobs-apply-button--top-card'] button li-icon".to_string(),
            apply_closed_icon: "div[class*='jobs-details-top-card__apply-error'] li-icon"
                .to_string(),
            recruiter_link: "div[class*='hirer-card__hirer-information'] a".to_string(),
            job_details: "#job-details span".to_string(),
            // A <div> inside <p> only survives in the live DOM; once the
            // snapshot is re-parsed it becomes the paragraph's next sibling.
            company_details:
                "div[class='jobs-company__box'] p div, div[class='jobs-company__box'] p + div"
                    .to_string(),
        }
    }
}

/// Parse a CSS selector, naming the offending field on failure.
pub(crate) fn compile_selector(field: &str, selector: &str) -> Result<Selector> {
    if selector.trim().is_empty() {
        return Err(ScanError::InvalidSelector {
            field: field.to_string(),
            reason: "selector is empty".to_string(),
        });
    }
    Selector::parse(selector).map_err(|e| ScanError::InvalidSelector {
        field: field.to_string(),
        reason: format!("{selector}: {e}"),
    })
}
