//! Search provider seam and the SerpAPI implementation.

use async_trait::async_trait;
use secrecy::ExposeSecret;
use serde::Deserialize;

use crate::config::SerpApiConfig;
use crate::error::ProviderError;

/// A raw search hit: result title and link. Parsing into contact
/// records happens in the resolver, not here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawHit {
    pub title: String,
    pub link: String,
}

/// External search service supplying raw candidate hits.
#[async_trait]
pub trait SearchProvider: Send + Sync {
    /// Run a search query and return zero or more raw hits in upstream
    /// ranking order.
    async fn search(&self, query: &str) -> Result<Vec<RawHit>, ProviderError>;
}

/// SerpAPI-backed provider (Google engine).
pub struct SerpApiProvider {
    config: SerpApiConfig,
    client: reqwest::Client,
}

impl SerpApiProvider {
    pub fn new(config: SerpApiConfig) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl SearchProvider for SerpApiProvider {
    async fn search(&self, query: &str) -> Result<Vec<RawHit>, ProviderError> {
        let response = self
            .client
            .get(&self.config.endpoint)
            .query(&[
                ("engine", "google"),
                ("q", query),
                ("api_key", self.config.api_key.expose_secret()),
                ("num", "10"),
            ])
            .send()
            .await
            .map_err(|e| ProviderError::Http(e.to_string()))?;

        if !response.status().is_success() {
            return Err(ProviderError::Http(format!(
                "search returned status {}",
                response.status()
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| ProviderError::Http(e.to_string()))?;

        parse_search_response(&body)
    }
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    organic_results: Vec<OrganicResult>,
}

#[derive(Debug, Deserialize)]
struct OrganicResult {
    #[serde(default)]
    title: String,
    #[serde(default)]
    link: String,
}

/// Parse a SerpAPI JSON response body into raw hits, preserving the
/// upstream ranking order.
pub fn parse_search_response(body: &str) -> Result<Vec<RawHit>, ProviderError> {
    let parsed: SearchResponse =
        serde_json::from_str(body).map_err(|e| ProviderError::InvalidResponse(e.to_string()))?;

    Ok(parsed
        .organic_results
        .into_iter()
        .map(|r| RawHit {
            title: r.title,
            link: r.link,
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_organic_results_in_order() {
        let body = r#"{
            "organic_results": [
                {"title": "Jane Doe - Recruiter", "link": "https://linkedin.com/in/jane"},
                {"title": "John Roe - HR Partner", "link": "https://linkedin.com/in/john"}
            ]
        }"#;
        let hits = parse_search_response(body).unwrap();
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].title, "Jane Doe - Recruiter");
        assert_eq!(hits[1].link, "https://linkedin.com/in/john");
    }

    #[test]
    fn missing_results_field_yields_empty() {
        let hits = parse_search_response(r#"{"search_metadata": {}}"#).unwrap();
        assert!(hits.is_empty());
    }

    #[test]
    fn missing_hit_fields_default_to_empty() {
        let body = r#"{"organic_results": [{"link": "https://linkedin.com/in/x"}]}"#;
        let hits = parse_search_response(body).unwrap();
        assert_eq!(hits[0].title, "");
    }

    #[test]
    fn malformed_body_is_invalid_response() {
        let err = parse_search_response("not json").unwrap_err();
        assert!(matches!(err, ProviderError::InvalidResponse(_)));
    }
}
