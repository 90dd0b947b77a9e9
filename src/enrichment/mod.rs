//! Book enrichment module - looks up identifiers (ISBN-10/13, other) for titles.
//!
//! # Architecture
//!
//! This module follows a clean separation between:
//! - **Domain models** (`domain.rs`) - Internal types that represent our business logic
//! - **API DTOs** (`googlebooks/dto.rs`) - Exact API response shapes
//! - **Adapter** (`googlebooks/adapter.rs`) - Extracts an identifier record from a raw response
//! - **Client** (`googlebooks/client.rs`) - HTTP client for the search API
//! - **Aggregator** (`aggregator.rs`) - The shared collection workers merge into
//! - **Pool** (`pool.rs`) - Bounded concurrent orchestration of all lookups
//!
//! The pool only sees the [`BookSearchApi`] trait, so it runs against stubs in tests.
//!
//! # Usage
//!
//! ```ignore
//! use std::sync::Arc;
//! use enrichment::{enrich, GoogleBooksClient, PoolConfig};
//!
//! let client = Arc::new(GoogleBooksClient::new(None)?);
//! let report = enrich(&titles, client, &PoolConfig::default()).await?;
//! for record in &report.records {
//!     println!("{}: {:?}", record.title, record.isbn13);
//! }
//! ```

pub mod aggregator;
pub mod domain;
pub mod googlebooks;
pub mod pool;
pub mod traits;

pub use aggregator::ResultCollection;
pub use domain::{
    EnrichmentError, EnrichmentReport, FailurePolicy, IdentifierKind, IdentifierRecord,
    LookupFailure, PoolConfig,
};
pub use googlebooks::{GoogleBooksClient, extract};
pub use pool::{EnrichmentPool, enrich};
pub use traits::BookSearchApi;
