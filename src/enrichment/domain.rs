//! Internal domain models for book identifier enrichment.
//!
//! These types are OUR types - they don't change when the search API changes.
//! Google Books responses get converted into these types via the adapter.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::sync::Semaphore;

/// Identifiers found for one title.
///
/// `None` means the response carried no identifier of that kind. An identifier
/// that was present but empty is kept as `Some("")`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct IdentifierRecord {
    /// The title that was searched for (not the title the API returned)
    pub title: String,
    #[serde(rename = "isbn_10", skip_serializing_if = "Option::is_none")]
    pub isbn10: Option<String>,
    #[serde(rename = "isbn_13", skip_serializing_if = "Option::is_none")]
    pub isbn13: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub other: Option<String>,
}

impl IdentifierRecord {
    /// A record with only the title set.
    pub fn title_only(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    /// Store `value` in the field for `kind`, replacing any earlier value.
    pub fn set(&mut self, kind: IdentifierKind, value: impl Into<String>) {
        let slot = match kind {
            IdentifierKind::Isbn10 => &mut self.isbn10,
            IdentifierKind::Isbn13 => &mut self.isbn13,
            IdentifierKind::Other => &mut self.other,
        };
        *slot = Some(value.into());
    }

    /// Whether any identifier was found.
    pub fn has_identifiers(&self) -> bool {
        self.isbn10.is_some() || self.isbn13.is_some() || self.other.is_some()
    }
}

/// The identifier kinds the search API reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IdentifierKind {
    Isbn10,
    Isbn13,
    Other,
}

impl IdentifierKind {
    /// Tag used by the API for this kind.
    pub fn as_tag(self) -> &'static str {
        match self {
            Self::Isbn10 => "ISBN_10",
            Self::Isbn13 => "ISBN_13",
            Self::Other => "OTHER",
        }
    }
}

impl FromStr for IdentifierKind {
    type Err = UnknownKind;

    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        match tag {
            "ISBN_10" => Ok(Self::Isbn10),
            "ISBN_13" => Ok(Self::Isbn13),
            "OTHER" => Ok(Self::Other),
            other => Err(UnknownKind(other.to_string())),
        }
    }
}

impl fmt::Display for IdentifierKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_tag())
    }
}

/// An identifier tag outside the recognized set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownKind(pub String);

/// What the pool does when a single lookup fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FailurePolicy {
    /// First failure aborts the run, no partial result.
    #[default]
    Abort,
    /// Failures are recorded per title and the run continues.
    BestEffort,
}

/// Settings for one enrichment run.
#[derive(Debug, Clone)]
pub struct PoolConfig {
    /// Maximum number of lookups with an outstanding network call
    pub concurrency_limit: usize,
    /// Emit a progress line per title
    pub verbose: bool,
    pub failure_policy: FailurePolicy,
    /// Deadline for a single network call (none = wait forever)
    pub lookup_timeout: Option<Duration>,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            concurrency_limit: 3,
            verbose: false,
            failure_policy: FailurePolicy::Abort,
            lookup_timeout: None,
        }
    }
}

impl PoolConfig {
    /// Reject settings that would deadlock or make no sense.
    pub fn validate(&self) -> Result<(), EnrichmentError> {
        if self.concurrency_limit == 0 {
            return Err(EnrichmentError::InvalidConfig(
                "concurrency limit must be at least 1".to_string(),
            ));
        }
        if self.lookup_timeout == Some(Duration::ZERO) {
            return Err(EnrichmentError::InvalidConfig(
                "lookup timeout must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Number of semaphore slots for this run.
    ///
    /// Limits above what a semaphore can hold behave as "no limit".
    pub fn permits(&self) -> usize {
        self.concurrency_limit.min(Semaphore::MAX_PERMITS)
    }
}

/// A title whose lookup failed in a best-effort run.
#[derive(Debug, Clone, Serialize)]
pub struct LookupFailure {
    pub title: String,
    #[serde(serialize_with = "serialize_display")]
    pub error: EnrichmentError,
}

fn serialize_display<S: serde::Serializer>(
    error: &EnrichmentError,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.collect_str(error)
}

/// Outcome of a completed run.
#[derive(Debug, Default)]
pub struct EnrichmentReport {
    /// One record per successful lookup, in completion order
    pub records: Vec<IdentifierRecord>,
    /// Always empty under [`FailurePolicy::Abort`]
    pub failures: Vec<LookupFailure>,
}

/// Errors that can occur during enrichment
#[derive(Debug, Clone, thiserror::Error)]
pub enum EnrichmentError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    #[error("Rate limited - try again later")]
    RateLimited,

    #[error("Failed to parse response: {0}")]
    Parse(String),

    #[error("Unrecognized identifier type {kind:?} for {title:?}")]
    UnknownIdentifierKind { title: String, kind: String },

    #[error("Lookup timed out after {0:?}")]
    Timeout(Duration),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Lookup failed for {title:?}: {source}")]
    LookupFailed {
        title: String,
        #[source]
        source: Box<EnrichmentError>,
    },

    #[error("Worker task failed: {0}")]
    TaskJoin(String),
}
