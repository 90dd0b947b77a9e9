//! Trait definitions for external API clients.
//!
//! These traits enable dependency injection and mocking for tests.
//! Production code uses [`GoogleBooksClient`](super::googlebooks::GoogleBooksClient),
//! while tests substitute the implementations in [`mocks`].
//!
//! # Example
//!
//! ```ignore
//! use book_isbn::enrichment::traits::BookSearchApi;
//!
//! async fn lookup<T: BookSearchApi>(client: &T, title: &str) -> Result<Vec<u8>, EnrichmentError> {
//!     client.search(title).await
//! }
//! ```

use async_trait::async_trait;

use super::domain::EnrichmentError;

/// Trait for a free-text bibliographic search.
///
/// Returns the raw response body; the pool hands it to the extractor.
#[async_trait]
pub trait BookSearchApi: Send + Sync {
    /// Search for a title.
    async fn search(&self, title: &str) -> Result<Vec<u8>, EnrichmentError>;
}

#[async_trait]
impl BookSearchApi for super::googlebooks::GoogleBooksClient {
    async fn search(&self, title: &str) -> Result<Vec<u8>, EnrichmentError> {
        self.search(title).await
    }
}
