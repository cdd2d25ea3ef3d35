//! The host-facing adapter: request building, response parsing, and
//! capability declaration for the NDA site search.

use std::collections::HashMap;

use tracing::debug;

use crate::models::{EngineTraits, RequestSpec, ResultRecord};
use crate::parse;

pub const DEFAULT_BASE_URL: &str = "https://www.nishithdesai.com";

/// Headers sent with every search request, mimicking a desktop browser so
/// the site serves the full HTML page instead of a degraded one.
const DEFAULT_HEADERS: &[(&str, &str)] = &[
    (
        "User-Agent",
        "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
    ),
    (
        "Accept",
        "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8",
    ),
    ("Accept-Language", "en-US,en;q=0.5"),
    ("Accept-Encoding", "gzip, deflate"),
    ("DNT", "1"),
    ("Connection", "keep-alive"),
    ("Upgrade-Insecure-Requests", "1"),
];

/// Immutable engine configuration, held by the adapter instance instead of
/// living as module-level globals.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Site origin; also the join base for relative result URLs
    pub base_url: String,
    pub search_path: String,
    pub headers: Vec<(String, String)>,
    pub results_per_page: u32,
    /// Deepest page the host should request; the host clamps, not us
    pub max_page: u32,
    pub categories: Vec<String>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            search_path: "/Search.html".to_string(),
            headers: DEFAULT_HEADERS
                .iter()
                .map(|(name, value)| (name.to_string(), value.to_string()))
                .collect(),
            results_per_page: 20,
            max_page: 10,
            categories: vec!["law".to_string()],
        }
    }
}

/// Stateless search adapter for the Nishith Desai Associates website.
///
/// Safe to share across threads; every operation is pure with respect to
/// adapter state.
#[derive(Debug, Clone, Default)]
pub struct NishithDesaiEngine {
    config: EngineConfig,
}

impl NishithDesaiEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Build the GET request for one results page.
    ///
    /// The query is trimmed and percent-encoded; an empty query passes
    /// through unchanged. Cannot fail.
    pub fn build_request(&self, query: &str, page: u32) -> RequestSpec {
        let query = query.trim();
        let encoded = urlencoding::encode(query);

        let url = format!(
            "{}{}?q={}&searchtext={}&page={}&results={}",
            self.config.base_url,
            self.config.search_path,
            encoded,
            encoded,
            page,
            self.config.results_per_page,
        );
        debug!(%url, page, "built search request");

        RequestSpec {
            method: "GET".to_string(),
            url,
            headers: self
                .config
                .headers
                .iter()
                .cloned()
                .collect::<HashMap<_, _>>(),
            page,
        }
    }

    /// Parse a search results page. Best-effort: a document that matches
    /// nothing, or cannot be made sense of at all, yields an empty list.
    pub fn parse_response(&self, html: &str) -> Vec<ResultRecord> {
        parse::parse_results(html, &self.config.base_url)
    }

    /// Declare locale/region capabilities on a host-owned traits object.
    /// Idempotent.
    pub fn fetch_traits(&self, traits: &mut EngineTraits) {
        traits.all_locale = Some("en-IN".to_string());
        traits
            .languages
            .insert("en".to_string(), "English".to_string());
        traits
            .regions
            .insert("IN".to_string(), "India".to_string());
        traits
            .regions
            .insert("US".to_string(), "United States".to_string());
    }

    /// Host initialization hook. Nothing to set up.
    pub fn init(&self, _settings: &serde_json::Value) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_request_encodes_query_params() {
        let engine = NishithDesaiEngine::new();
        let spec = engine.build_request("cross-border tax treaty", 3);

        assert_eq!(spec.method, "GET");
        assert_eq!(spec.page, 3);
        assert!(spec.url.starts_with("https://www.nishithdesai.com/Search.html?"));
        assert!(spec.url.contains("q=cross-border%20tax%20treaty"));
        assert!(spec.url.contains("searchtext=cross-border%20tax%20treaty"));
        assert!(spec.url.contains("page=3"));
        assert!(spec.url.contains("results=20"));
        assert!(spec.url.is_ascii());
    }

    #[test]
    fn build_request_trims_query() {
        let engine = NishithDesaiEngine::new();
        let spec = engine.build_request("  merger control  ", 1);
        assert!(spec.url.contains("q=merger%20control&"));
    }

    #[test]
    fn build_request_passes_empty_query_through() {
        let engine = NishithDesaiEngine::new();
        let spec = engine.build_request("   ", 1);
        assert!(spec.url.contains("q=&searchtext=&page=1"));
    }

    #[test]
    fn build_request_encodes_non_ascii_query() {
        let engine = NishithDesaiEngine::new();
        let spec = engine.build_request("fusões & aquisições", 1);
        assert!(spec.url.is_ascii());
        assert!(spec.url.contains("%26"));
    }

    #[test]
    fn build_request_carries_browser_headers() {
        let engine = NishithDesaiEngine::new();
        let spec = engine.build_request("tax", 1);

        for name in [
            "User-Agent",
            "Accept",
            "Accept-Language",
            "Accept-Encoding",
            "DNT",
            "Connection",
            "Upgrade-Insecure-Requests",
        ] {
            assert!(spec.headers.contains_key(name), "missing header {name}");
        }
        assert!(spec.headers["User-Agent"].contains("Mozilla/5.0"));
    }

    #[test]
    fn custom_base_url_flows_into_request_and_parse() {
        let config = EngineConfig {
            base_url: "http://localhost:8080".to_string(),
            ..EngineConfig::default()
        };
        let engine = NishithDesaiEngine::with_config(config);

        let spec = engine.build_request("tax", 1);
        assert!(spec.url.starts_with("http://localhost:8080/Search.html?"));

        let records = engine.parse_response(
            r#"<div class="result"><h3>Local Entry</h3><a href="/a.html"></a></div>"#,
        );
        assert_eq!(records[0].url(), "http://localhost:8080/a.html");
    }

    #[test]
    fn fetch_traits_is_idempotent() {
        let engine = NishithDesaiEngine::new();

        let mut first = EngineTraits::default();
        engine.fetch_traits(&mut first);

        let mut second = EngineTraits::default();
        engine.fetch_traits(&mut second);
        engine.fetch_traits(&mut second);

        assert_eq!(first, second);
        assert_eq!(first.all_locale.as_deref(), Some("en-IN"));
        assert_eq!(first.languages["en"], "English");
        assert_eq!(first.regions["IN"], "India");
        assert_eq!(first.regions["US"], "United States");
    }

    #[test]
    fn init_is_a_noop() {
        let engine = NishithDesaiEngine::new();
        engine.init(&serde_json::json!({ "timeout": 5 }));
    }

    #[test]
    fn engine_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<NishithDesaiEngine>();
    }
}
