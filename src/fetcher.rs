use anyhow::{Context, Result};
use reqwest::Client;
use std::time::Duration;
use tracing::info;
use url::Url;

use crate::models::RequestSpec;

/// Execute a built search request and return the response body.
///
/// The aggregator host normally supplies its own transport; this exists so
/// the crate is usable standalone (and drives the CLI binary).
pub async fn execute(spec: &RequestSpec) -> Result<String> {
    let url = Url::parse(&spec.url).with_context(|| format!("Invalid request URL: {}", spec.url))?;
    info!("Fetching search page: {}", url);

    let client = Client::builder()
        .timeout(Duration::from_secs(30))
        .build()
        .context("Failed to build HTTP client")?;

    let mut request = client.get(url.as_str());
    for (name, value) in &spec.headers {
        request = request.header(name.as_str(), value.as_str());
    }

    let response = request
        .send()
        .await
        .with_context(|| format!("Failed to fetch URL: {}", url))?;

    if !response.status().is_success() {
        anyhow::bail!(
            "HTTP error when fetching {}: {} ({})",
            url,
            response.status().as_u16(),
            response.status().canonical_reason().unwrap_or("Unknown")
        );
    }

    let content_type = response
        .headers()
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");

    // The search page is plain server-rendered HTML; anything else means
    // the site answered with something we cannot parse.
    if !content_type.contains("text/html") {
        anyhow::bail!("Non-HTML content type: {}", content_type);
    }

    response.text().await.context("Failed to read response body")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::NishithDesaiEngine;

    #[tokio::test]
    async fn rejects_unparseable_url() {
        let engine = NishithDesaiEngine::new();
        let mut spec = engine.build_request("tax", 1);
        spec.url = "not a url".to_string();

        let err = execute(&spec).await.unwrap_err();
        assert!(err.to_string().contains("Invalid request URL"));
    }
}
