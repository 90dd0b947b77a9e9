//! Adapter layer: turn a raw Google Books response into an IdentifierRecord
//!
//! This is the ONLY place where search DTOs are converted to domain types.

use super::dto;
use crate::enrichment::domain::{EnrichmentError, IdentifierKind, IdentifierRecord};

/// Extract the identifiers of the first search result.
///
/// `title` is stamped into the record whatever the response holds. No results,
/// or a first result without identifiers, yields a title-only record. An
/// identifier tag outside ISBN_10/ISBN_13/OTHER fails the lookup.
pub fn extract(raw_response: &[u8], title: &str) -> Result<IdentifierRecord, EnrichmentError> {
    let response: dto::VolumesResponse = serde_json::from_slice(raw_response)
        .map_err(|e| EnrichmentError::Parse(e.to_string()))?;

    to_record(response, title)
}

/// Convert a parsed search response to a record
pub fn to_record(
    response: dto::VolumesResponse,
    title: &str,
) -> Result<IdentifierRecord, EnrichmentError> {
    let mut record = IdentifierRecord::title_only(title);

    let identifiers = response
        .items
        .into_iter()
        .next()
        .and_then(|volume| volume.volume_info)
        .map(|info| info.industry_identifiers)
        .unwrap_or_default();

    for entry in identifiers {
        let kind = entry.kind.parse::<IdentifierKind>().map_err(|_| {
            EnrichmentError::UnknownIdentifierKind {
                title: title.to_string(),
                kind: entry.kind.clone(),
            }
        })?;
        record.set(kind, entry.identifier);
    }

    Ok(record)
}
