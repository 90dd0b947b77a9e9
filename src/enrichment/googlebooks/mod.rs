//! Google Books API integration
//!
//! Looks up a title with the volumes search endpoint and reads the industry
//! identifiers of the first hit.
//!
//! API docs: https://developers.google.com/books/docs/v1/using

pub mod dto;
mod adapter;
mod client;

pub use adapter::{extract, to_record};
pub use client::GoogleBooksClient;
