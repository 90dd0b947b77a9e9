//! Bookmeter "want to read" list scraper
//!
//! Fetches `https://bookmeter.com/users/{uid}/books/wish` and reads the title
//! of each book from the `alt` text of its cover image.

use scraper::{Html, Selector};
use tracing::{debug, info};

use super::SourceError;

const DEFAULT_BASE_URL: &str = "https://bookmeter.com";

/// Cover images on the wish list page carry the book title as alt text
const COVER_SELECTOR: &str = "img.cover__image";

/// Bookmeter HTTP client
pub struct BookmeterClient {
    http_client: reqwest::Client,
    base_url: String,
}

impl BookmeterClient {
    /// Create a new client
    pub fn new() -> Result<Self, SourceError> {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Create a client against a custom host
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self, SourceError> {
        let http_client = reqwest::Client::builder()
            .gzip(true) // The site serves gzip when asked
            .user_agent(concat!(
                env!("CARGO_PKG_NAME"),
                "/",
                env!("CARGO_PKG_VERSION")
            ))
            .build()
            .map_err(|e| SourceError::Network(e.to_string()))?;

        Ok(Self {
            http_client,
            base_url: base_url.into(),
        })
    }

    fn wish_list_url(&self, user_id: &str) -> String {
        format!(
            "{}/users/{}/books/wish",
            self.base_url,
            urlencoding::encode(user_id)
        )
    }

    /// Fetch the wish list of `user_id` and return its titles
    pub async fn wish_list(&self, user_id: &str) -> Result<Vec<String>, SourceError> {
        if user_id.trim().is_empty() {
            return Err(SourceError::EmptyUserId);
        }

        let url = self.wish_list_url(user_id);
        debug!(%url, "Fetching wish list");

        let response = self
            .http_client
            .get(&url)
            .send()
            .await
            .map_err(|e| SourceError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::Http {
                status: status.as_u16(),
                url,
            });
        }

        let page = response
            .text()
            .await
            .map_err(|e| SourceError::Network(e.to_string()))?;

        let titles = parse_titles(&page)?;
        info!(count = titles.len(), "Fetched wish list");
        Ok(titles)
    }
}

/// Collect the cover alt texts of a wish list page, in document order.
///
/// Covers without alt text, or with only whitespace, are skipped. Other alt
/// texts are kept exactly as written.
pub fn parse_titles(page: &str) -> Result<Vec<String>, SourceError> {
    let selector = Selector::parse(COVER_SELECTOR).map_err(|e| SourceError::Parse(e.to_string()))?;
    let document = Html::parse_document(page);

    let titles = document
        .select(&selector)
        .filter_map(|img| img.value().attr("alt"))
        .filter(|alt| !alt.trim().is_empty())
        .map(String::from)
        .collect();

    Ok(titles)
}
