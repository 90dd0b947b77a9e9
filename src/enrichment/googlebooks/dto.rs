//! Google Books API Data Transfer Objects
//!
//! These types match what the volumes search endpoint returns, restricted to
//! the path we read: `items[].volumeInfo.industryIdentifiers[]`.
//! DO NOT use these types outside the googlebooks module - convert to domain types.
//!
//! API Reference: https://developers.google.com/books/docs/v1/reference/volumes/list

use serde::{Deserialize, Serialize};

/// Response of `GET /volumes?q=...`
///
/// `items` is omitted entirely when the search has no results.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VolumesResponse {
    pub kind: Option<String>,
    pub total_items: Option<u64>,
    #[serde(default)]
    pub items: Vec<Volume>,
}

/// One search result
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Volume {
    pub id: Option<String>,
    pub volume_info: Option<VolumeInfo>,
}

/// Bibliographic data for a volume
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VolumeInfo {
    pub title: Option<String>,
    #[serde(default)]
    pub industry_identifiers: Vec<IndustryIdentifier>,
}

/// Entry of `industryIdentifiers`
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct IndustryIdentifier {
    /// "ISBN_10", "ISBN_13" or "OTHER"
    #[serde(rename = "type")]
    pub kind: String,
    pub identifier: String,
}
