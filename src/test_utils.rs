//! Test utilities and fixtures for book-isbn tests.
//!
//! This module provides canned search responses and title lists to reduce
//! boilerplate in tests. Mock clients live in
//! [`enrichment::traits::mocks`](crate::enrichment::traits::mocks).
//!
//! # Example
//!
//! ```ignore
//! use crate::test_utils::{numbered_titles, search_response};
//!
//! let body = search_response(&[("ISBN_13", "9784003101018")]);
//! let titles = numbered_titles(10);
//! ```

/// Search response with no hits (the API omits `items` entirely).
pub const SEARCH_NO_ITEMS: &str = r#"{"kind": "books#volumes", "totalItems": 0}"#;

/// A Bookmeter wish list page with three covers, one without alt text.
pub const WISH_LIST_PAGE: &str = r#"<!DOCTYPE html>
<html>
<body>
  <ul class="book-list">
    <li class="group__book">
      <div class="book__thumbnail">
        <a href="/books/1"><img class="cover__image" alt="こころ" src="/c/1.jpg"></a>
      </div>
    </li>
    <li class="group__book">
      <div class="book__thumbnail">
        <a href="/books/2"><img class="cover__image" alt="The Rust Programming Language" src="/c/2.jpg"></a>
      </div>
    </li>
    <li class="group__book">
      <div class="book__thumbnail">
        <a href="/books/3"><img class="cover__image" src="/c/3.jpg"></a>
      </div>
    </li>
  </ul>
  <img class="avatar" alt="user icon" src="/u.png">
</body>
</html>"#;

/// Builds a single-hit search response carrying the given
/// `(type, identifier)` entries.
pub fn search_response(identifiers: &[(&str, &str)]) -> String {
    let entries: Vec<_> = identifiers
        .iter()
        .map(|(kind, id)| serde_json::json!({ "type": kind, "identifier": id }))
        .collect();

    serde_json::json!({
        "kind": "books#volumes",
        "totalItems": 1,
        "items": [{
            "kind": "books#volume",
            "id": "test-volume",
            "volumeInfo": {
                "title": "Test Volume",
                "industryIdentifiers": entries
            }
        }]
    })
    .to_string()
}

/// `count` distinct titles: "Title 0", "Title 1", ...
pub fn numbered_titles(count: usize) -> Vec<String> {
    (0..count).map(|i| format!("Title {}", i)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_response_is_valid_json() {
        let body = search_response(&[("ISBN_10", "4003101011")]);
        let value: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(
            value["items"][0]["volumeInfo"]["industryIdentifiers"][0]["identifier"],
            "4003101011"
        );
    }

    #[test]
    fn test_numbered_titles_are_distinct() {
        let titles = numbered_titles(3);
        assert_eq!(titles, vec!["Title 0", "Title 1", "Title 2"]);
    }
}
