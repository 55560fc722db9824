use crate::site::SiteDefinition;
use jobscout_core::{PostingId, SearchQuery};

/// Search results URL for a query, without a page offset.
pub fn build_search_url(site: &SiteDefinition, query: &SearchQuery) -> String {
    format!(
        "{}{}?keywords={}&location={}&refresh=true",
        site.site.base_url,
        site.site.search_path,
        urlencoding::encode(query.keyword()),
        urlencoding::encode(query.location()),
    )
}

/// URL of results page `page` (1-based).
///
/// Built fresh from the search URL every time, so offsets never accumulate.
pub fn page_url(search_url: &str, page: u32, page_size: u32) -> String {
    let start = page.saturating_sub(1).saturating_mul(page_size);
    format!("{search_url}&start={start}")
}

pub fn detail_url(site: &SiteDefinition, id: PostingId) -> String {
    format!("{}{}{}", site.site.base_url, site.site.detail_path, id)
}

pub fn login_url(site: &SiteDefinition) -> String {
    format!("{}{}", site.site.base_url, site.site.login_path)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(keyword: &str, location: &str) -> SearchQuery {
        SearchQuery::new(keyword, location, 0).expect("valid query")
    }

    #[test]
    fn test_build_search_url_encodes_terms() {
        let site = SiteDefinition::default();
        let url = build_search_url(&site, &query("rust developer", "São Paulo, Brazil"));

        assert_eq!(
            url,
            "https://www.linkedin.com/jobs/search/?keywords=rust%20developer&location=S%C3%A3o%20Paulo%2C%20Brazil&refresh=true"
        );
    }

    #[test]
    fn test_build_search_url_escapes_query_separators() {
        let site = SiteDefinition::default();
        let url = build_search_url(&site, &query("c++ & go", "remote"));

        assert!(url.contains("keywords=c%2B%2B%20%26%20go&"));
        assert_eq!(url.matches('&').count(), 2);
    }

    #[test]
    fn test_page_url_offsets() {
        let base = "https://site.test/jobs/search/?keywords=a&location=b&refresh=true";
        assert!(page_url(base, 1, 25).ends_with("&start=0"));
        assert!(page_url(base, 2, 25).ends_with("&start=25"));
        assert!(page_url(base, 5, 25).ends_with("&start=100"));
    }

    #[test]
    fn test_page_url_does_not_accumulate() {
        let base = "https://site.test/jobs/search/?keywords=a";
        let second = page_url(base, 2, 25);
        let third = page_url(base, 3, 25);

        assert_eq!(second.matches("start=").count(), 1);
        assert_eq!(third, format!("{base}&start=50"));
    }

    #[test]
    fn test_detail_and_login_urls() {
        let site = SiteDefinition::default();
        assert_eq!(
            detail_url(&site, PostingId::new(3_712_345_678)),
            "https://www.linkedin.com/jobs/view/3712345678"
        );
        assert_eq!(login_url(&site), "https://www.linkedin.com/login");
    }
}
