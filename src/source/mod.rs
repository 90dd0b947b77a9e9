//! Title sources - where the list of books to enrich comes from.
//!
//! The enrichment pool consumes a plain `Vec<String>`; a source produces it
//! once, before any lookup starts.

mod bookmeter;

use async_trait::async_trait;

pub use bookmeter::{BookmeterClient, parse_titles};

/// Errors that can occur while fetching the title list
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("HTTP {status} fetching {url}")]
    Http { status: u16, url: String },

    #[error("Failed to parse page: {0}")]
    Parse(String),

    #[error("User id must not be empty")]
    EmptyUserId,
}

/// Trait for anything that can list the titles a user wants to read.
#[async_trait]
pub trait TitleSource: Send + Sync {
    /// Fetch the titles for `user_id`, in page order.
    async fn fetch_titles(&self, user_id: &str) -> Result<Vec<String>, SourceError>;
}

#[async_trait]
impl TitleSource for BookmeterClient {
    async fn fetch_titles(&self, user_id: &str) -> Result<Vec<String>, SourceError> {
        self.wish_list(user_id).await
    }
}
