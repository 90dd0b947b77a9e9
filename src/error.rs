//! Application-wide error types.
//!
//! This module provides a unified error hierarchy for the application.
//! Library modules use specific error types via `thiserror`, while
//! CLI/main uses `anyhow` for convenient error propagation.
//!
//! # Design
//!
//! - [`Error`]: Top-level application error enum
//! - Module-specific errors (e.g., [`EnrichmentError`]) for detailed handling
//! - All errors implement `std::error::Error` for compatibility
//!
//! # Example
//!
//! ```ignore
//! use book_isbn::error::{Result, ResultExt};
//!
//! fn run(config: &Config) -> Result<()> {
//!     let pool = config.enrichment.to_pool_config()?;    // Config errors auto-convert
//!     let titles = fetch_titles().with_context("loading wish list")?;
//!     Ok(())
//! }
//! ```
//!
//! [`EnrichmentError`]: crate::enrichment::EnrichmentError

/// Application-wide result type.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level application error.
///
/// Aggregates errors from all subsystems for unified handling.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Title list could not be fetched
    #[error("Source error: {0}")]
    Source(#[from] crate::source::SourceError),

    /// Lookup or extraction error
    #[error("Enrichment error: {0}")]
    Enrichment(#[from] crate::enrichment::EnrichmentError),

    /// Result file could not be written
    #[error("Output error: {0}")]
    Output(#[from] crate::output::OutputError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),

    /// The run was cancelled before it finished
    #[error("Cancelled")]
    Cancelled,

    /// Generic error with context
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    /// Add context to an error.
    pub fn context(self, ctx: impl Into<String>) -> Self {
        Self::WithContext {
            context: ctx.into(),
            source: Box::new(self),
        }
    }

    /// Whether this is a configuration problem, detected before any work ran.
    pub fn is_config(&self) -> bool {
        match self {
            Self::Config(_) => true,
            Self::Enrichment(crate::enrichment::EnrichmentError::InvalidConfig(_)) => true,
            Self::Output(
                crate::output::OutputError::EmptyPath
                | crate::output::OutputError::IsDirectory(_)
                | crate::output::OutputError::MissingParent(_),
            ) => true,
            Self::WithContext { source, .. } => source.is_config(),
            _ => false,
        }
    }
}

/// Extension trait for adding context to Results.
pub trait ResultExt<T> {
    /// Add context to an error result.
    fn with_context(self, ctx: impl Into<String>) -> Result<T>;
}

impl<T, E> ResultExt<T> for std::result::Result<T, E>
where
    E: Into<Error>,
{
    fn with_context(self, ctx: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.into().context(ctx))
    }
}
