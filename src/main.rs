//! book-isbn - looks up ISBNs for the books on a Bookmeter wish list.
//!
//! The titles on the list are searched on Google Books in parallel, with a
//! cap on concurrent requests, and the identifiers of the first hit for each
//! title are written to a JSON file.

pub mod cli;
pub mod config;
pub mod enrichment;
pub mod error;
pub mod output;
pub mod source;
#[cfg(test)]
pub mod test_utils;

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

fn main() -> anyhow::Result<()> {
    let args = cli::Cli::parse();

    // Initialize logging
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env().add_directive("book_isbn=info".parse()?))
        .init();

    cli::run_command(&args)
}
