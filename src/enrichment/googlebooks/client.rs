//! Google Books HTTP client
//!
//! Handles communication with the Google Books volumes search endpoint.
//! See: https://developers.google.com/books/docs/v1/using#PerformingSearch
//!
//! The client returns the raw body; parsing happens in the adapter so the
//! pool can release its slot before any extraction work.

use crate::enrichment::domain::EnrichmentError;

const DEFAULT_BASE_URL: &str = "https://www.googleapis.com/books/v1/volumes";

/// User agent string sent with every request
const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Google Books API client
pub struct GoogleBooksClient {
    http_client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl GoogleBooksClient {
    /// Create a new client
    ///
    /// Searches work without a key, at a lower quota.
    pub fn new(api_key: Option<String>) -> Result<Self, EnrichmentError> {
        Self::with_base_url(DEFAULT_BASE_URL, api_key)
    }

    /// Create a client against a custom endpoint
    pub fn with_base_url(
        base_url: impl Into<String>,
        api_key: Option<String>,
    ) -> Result<Self, EnrichmentError> {
        let http_client = reqwest::Client::builder()
            .gzip(true) // Accept gzip-compressed responses
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| EnrichmentError::Network(e.to_string()))?;

        Ok(Self {
            http_client,
            base_url: base_url.into(),
            api_key: api_key.filter(|key| !key.is_empty()),
        })
    }

    /// Build the search URL for a title
    fn search_url(&self, title: &str) -> String {
        let mut url = format!("{}?q={}", self.base_url, urlencoding::encode(title));
        if let Some(ref key) = self.api_key {
            url.push_str("&key=");
            url.push_str(&urlencoding::encode(key));
        }
        url
    }

    /// Search volumes by free-text title and return the raw response body
    pub async fn search(&self, title: &str) -> Result<Vec<u8>, EnrichmentError> {
        let url = self.search_url(title);

        let response = self
            .http_client
            .get(&url)
            .send()
            .await
            .map_err(|e| EnrichmentError::Network(e.to_string()))?;

        let status = response.status();

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(EnrichmentError::RateLimited);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(EnrichmentError::Http {
                status: status.as_u16(),
                body: body.chars().take(200).collect(),
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| EnrichmentError::Network(e.to_string()))?;

        Ok(bytes.to_vec())
    }
}
