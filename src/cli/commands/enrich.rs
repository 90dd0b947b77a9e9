//! Wish list fetching, identifier lookup and output commands.

use std::future::Future;
use std::sync::Arc;
use tokio::runtime::Runtime;

use super::Settings;
use crate::enrichment::{self, EnrichmentReport, GoogleBooksClient};
use crate::error::{Error, Result, ResultExt};
use crate::output;
use crate::source::{BookmeterClient, TitleSource};

/// Fetch the wish list, look up every title and write the book list
pub fn cmd_run(rt: &Runtime, settings: &Settings) -> Result<()> {
    let report = rt.block_on(until_cancelled(async {
        let titles = fetch_titles(settings).await?;
        lookup_titles(settings, &titles).await
    }))?;

    output::write(&settings.output, &report)?;

    println!(
        "✓ Wrote {} books to {}",
        report.records.len(),
        settings.output.display()
    );
    print_failures(&report);
    Ok(())
}

/// Print the wish list titles, one per line
pub fn cmd_titles(rt: &Runtime, settings: &Settings) -> Result<()> {
    let titles = rt.block_on(until_cancelled(fetch_titles(settings)))?;
    for title in &titles {
        println!("{}", title);
    }
    Ok(())
}

/// Look up the given titles and print the JSON to stdout
pub fn cmd_lookup(rt: &Runtime, settings: &Settings, titles: &[String]) -> Result<()> {
    let report = rt.block_on(until_cancelled(lookup_titles(settings, titles)))?;
    let json = output::to_json(&report)?;
    println!("{}", String::from_utf8_lossy(&json));
    Ok(())
}

async fn fetch_titles(settings: &Settings) -> Result<Vec<String>> {
    let source = BookmeterClient::new()?;
    source
        .fetch_titles(&settings.user_id)
        .await
        .with_context(format!("fetching wish list of user {}", settings.user_id))
}

async fn lookup_titles(settings: &Settings, titles: &[String]) -> Result<EnrichmentReport> {
    let client = Arc::new(GoogleBooksClient::new(settings.api_key.clone())?);
    let report = enrichment::enrich(titles, client, &settings.pool).await?;
    Ok(report)
}

/// Race `work` against Ctrl-C. Dropping the work future cancels every
/// outstanding lookup.
async fn until_cancelled<T>(work: impl Future<Output = Result<T>>) -> Result<T> {
    tokio::select! {
        result = work => result,
        _ = tokio::signal::ctrl_c() => {
            tracing::warn!("Interrupted, nothing was written");
            Err(Error::Cancelled)
        }
    }
}

fn print_failures(report: &EnrichmentReport) {
    if report.failures.is_empty() {
        return;
    }
    eprintln!("✗ {} lookups failed:", report.failures.len());
    for failure in &report.failures {
        eprintln!("  {}: {}", failure.title, failure.error);
    }
}
