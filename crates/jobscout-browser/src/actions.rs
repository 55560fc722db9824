use crate::error::{BrowserError, Result};

/// Browser actions for automation.
///
/// Everything operates on the session's single current page; callers must
/// not interleave two navigations.
#[async_trait::async_trait]
pub trait BrowserActions: Send + Sync {
    /// Navigate to a URL and wait for the load event
    async fn navigate(&self, url: &str) -> Result<()>;

    /// Fill a form field by selector
    async fn fill_field(&self, selector: &str, value: &str) -> Result<()>;

    /// Click an element by selector
    async fn click(&self, selector: &str) -> Result<()>;

    /// Poll until a selector matches or the timeout elapses
    async fn wait_for_selector(&self, selector: &str, timeout_ms: u64) -> Result<()>;

    /// Serialized HTML of the current page
    async fn page_html(&self) -> Result<String>;

    /// URL of the current page, after any redirects
    async fn current_url(&self) -> Result<String>;
}

/// Helper to extract domain from URL
pub fn extract_domain(url: &str) -> Result<String> {
    let url = url::Url::parse(url)
        .map_err(|e| BrowserError::NavigationError(format!("Invalid URL: {}", e)))?;

    url.host_str()
        .ok_or_else(|| BrowserError::NavigationError("No host in URL".to_string()))
        .map(|s| s.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_domain() {
        assert_eq!(
            extract_domain("https://www.linkedin.com/jobs/view/123").unwrap(),
            "www.linkedin.com"
        );
        assert_eq!(
            extract_domain("http://localhost:8080/jobs/search/?keywords=rust").unwrap(),
            "localhost"
        );
    }

    #[test]
    fn test_extract_domain_invalid() {
        assert!(extract_domain("not-a-url").is_err());
    }
}
