//! Bounded enrichment pool - runs one lookup per title with a cap on
//! concurrent network calls.
//!
//! Each title becomes its own tokio task:
//! 1. Acquire a slot from the semaphore
//! 2. Search the title (optionally under a deadline)
//! 3. Release the slot
//! 4. Extract identifiers from the response
//! 5. Merge the record into the shared [`ResultCollection`]
//!
//! Only step 2 is bounded by `concurrency_limit`. What happens when a lookup
//! fails is decided here, by [`FailurePolicy`].

use std::sync::Arc;

use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

use super::aggregator::ResultCollection;
use super::domain::{EnrichmentError, EnrichmentReport, FailurePolicy, LookupFailure, PoolConfig};
use super::googlebooks;
use super::traits::BookSearchApi;

/// Runs enrichment over title lists with a fixed search client and config
pub struct EnrichmentPool<S: ?Sized> {
    search: Arc<S>,
    config: PoolConfig,
}

impl<S> EnrichmentPool<S>
where
    S: BookSearchApi + ?Sized + 'static,
{
    /// Create a pool, rejecting invalid configuration up front
    pub fn new(search: Arc<S>, config: PoolConfig) -> Result<Self, EnrichmentError> {
        config.validate()?;
        Ok(Self { search, config })
    }

    pub fn config(&self) -> &PoolConfig {
        &self.config
    }

    /// Look up every title and collect the results.
    ///
    /// Returns once every lookup has finished. Under [`FailurePolicy::Abort`]
    /// the first failure cancels the remaining lookups and is returned as
    /// [`EnrichmentError::LookupFailed`]; nothing collected so far is kept.
    pub async fn run(&self, titles: &[String]) -> Result<EnrichmentReport, EnrichmentError> {
        if titles.is_empty() {
            debug!("No titles to enrich");
            return Ok(EnrichmentReport::default());
        }

        let slots = Arc::new(Semaphore::new(self.config.permits()));
        let collection = Arc::new(ResultCollection::with_capacity(titles.len()));

        info!(
            titles = titles.len(),
            limit = self.config.concurrency_limit,
            "Starting enrichment"
        );

        let mut tasks = JoinSet::new();
        for title in titles {
            tasks.spawn(lookup_title(
                Arc::clone(&self.search),
                Arc::clone(&slots),
                Arc::clone(&collection),
                title.clone(),
                self.config.clone(),
            ));
        }

        let mut failures = Vec::new();
        while let Some(joined) = tasks.join_next().await {
            let (title, outcome) = joined.map_err(|e| EnrichmentError::TaskJoin(e.to_string()))?;

            let Err(error) = outcome else {
                continue;
            };

            match self.config.failure_policy {
                FailurePolicy::Abort => {
                    warn!(%title, %error, "Lookup failed, aborting run");
                    tasks.abort_all();
                    return Err(EnrichmentError::LookupFailed {
                        title,
                        source: Box::new(error),
                    });
                }
                FailurePolicy::BestEffort => {
                    warn!(%title, %error, "Lookup failed, continuing");
                    failures.push(LookupFailure { title, error });
                }
            }
        }

        // Every task has been joined, so this is the last reference
        let records = Arc::try_unwrap(collection)
            .map(ResultCollection::into_records)
            .unwrap_or_else(|shared| shared.snapshot());

        info!(
            records = records.len(),
            failures = failures.len(),
            "Enrichment complete"
        );

        Ok(EnrichmentReport { records, failures })
    }
}

/// Quick helper to run a single enrichment without keeping a pool around
pub async fn enrich<S>(
    titles: &[String],
    search: Arc<S>,
    config: &PoolConfig,
) -> Result<EnrichmentReport, EnrichmentError>
where
    S: BookSearchApi + ?Sized + 'static,
{
    EnrichmentPool::new(search, config.clone())?.run(titles).await
}

/// One unit of work. Returns the title alongside the outcome so the
/// orchestrator can name it in errors.
async fn lookup_title<S>(
    search: Arc<S>,
    slots: Arc<Semaphore>,
    collection: Arc<ResultCollection>,
    title: String,
    config: PoolConfig,
) -> (String, Result<(), EnrichmentError>)
where
    S: BookSearchApi + ?Sized,
{
    let outcome = search_and_merge(&*search, &slots, &collection, &title, &config).await;
    (title, outcome)
}

async fn search_and_merge<S>(
    search: &S,
    slots: &Semaphore,
    collection: &ResultCollection,
    title: &str,
    config: &PoolConfig,
) -> Result<(), EnrichmentError>
where
    S: BookSearchApi + ?Sized,
{
    let body = {
        // Closed only if the pool is torn down mid-run
        let _slot = slots
            .acquire()
            .await
            .map_err(|e| EnrichmentError::TaskJoin(e.to_string()))?;

        if config.verbose {
            info!("Get {} ISBN...", title);
        } else {
            debug!(%title, "Searching");
        }

        match config.lookup_timeout {
            Some(deadline) => tokio::time::timeout(deadline, search.search(title))
                .await
                .map_err(|_| EnrichmentError::Timeout(deadline))??,
            None => search.search(title).await?,
        }
    };

    let record = googlebooks::extract(&body, title)?;
    collection.merge(record);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use crate::enrichment::domain::IdentifierRecord;
    use crate::enrichment::traits::mocks::{MockBookSearch, StalledSearch};
    use crate::test_utils::{numbered_titles, search_response};
    use proptest::prelude::*;

    fn config(limit: usize) -> PoolConfig {
        PoolConfig {
            concurrency_limit: limit,
            ..Default::default()
        }
    }

    fn sorted(mut records: Vec<IdentifierRecord>) -> Vec<IdentifierRecord> {
        records.sort();
        records
    }

    #[tokio::test]
    async fn test_empty_titles_no_network() {
        let mock = Arc::new(MockBookSearch::always_isbn13("9780000000000"));

        let report = enrich(&[], Arc::clone(&mock), &config(3)).await.unwrap();

        assert!(report.records.is_empty());
        assert!(report.failures.is_empty());
        assert_eq!(mock.calls(), 0);
    }

    #[tokio::test]
    async fn test_zero_limit_rejected_before_work() {
        let mock = Arc::new(MockBookSearch::always_isbn13("9780000000000"));
        let titles = numbered_titles(5);

        let result = enrich(&titles, Arc::clone(&mock), &config(0)).await;

        assert!(matches!(result, Err(EnrichmentError::InvalidConfig(_))));
        assert_eq!(mock.calls(), 0);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_one_record_per_title() {
        let mock = Arc::new(MockBookSearch::always_isbn13("9784003101018"));
        let titles = numbered_titles(25);

        let report = enrich(&titles, Arc::clone(&mock), &config(4)).await.unwrap();

        assert_eq!(report.records.len(), 25);
        assert_eq!(mock.calls(), 25);
        let mut seen: Vec<_> = report.records.iter().map(|r| r.title.clone()).collect();
        seen.sort();
        let mut expected = titles.clone();
        expected.sort();
        assert_eq!(seen, expected);
        assert!(report
            .records
            .iter()
            .all(|r| r.isbn13.as_deref() == Some("9784003101018")));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 8)]
    async fn test_concurrency_never_exceeds_limit() {
        let mock = Arc::new(
            MockBookSearch::always_isbn13("9780000000000").with_delay(Duration::from_millis(15)),
        );
        let titles = numbered_titles(30);

        let report = enrich(&titles, Arc::clone(&mock), &config(3)).await.unwrap();

        assert_eq!(report.records.len(), 30);
        assert_eq!(mock.high_water_mark(), 3);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_limit_above_semaphore_capacity() {
        let mock = Arc::new(MockBookSearch::always_isbn13("9780000000000"));
        let titles = numbered_titles(4);

        let report = enrich(&titles, Arc::clone(&mock), &config(usize::MAX)).await.unwrap();

        assert_eq!(report.records.len(), 4);
        assert_eq!(mock.calls(), 4);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 8)]
    async fn test_serial_and_parallel_runs_agree() {
        let titles = numbered_titles(50);
        let mut mock = MockBookSearch::with_default(search_response(&[]));
        for (i, title) in titles.iter().enumerate() {
            mock = mock.respond(
                title,
                search_response(&[("ISBN_10", &format!("{i:010}")), ("OTHER", "X")]),
            );
        }
        let mock = Arc::new(mock.with_delay(Duration::from_millis(1)));

        let serial = enrich(&titles, Arc::clone(&mock), &config(1)).await.unwrap();
        let parallel = enrich(&titles, Arc::clone(&mock), &config(50)).await.unwrap();

        assert_eq!(serial.records.len(), 50);
        assert_eq!(sorted(serial.records), sorted(parallel.records));
    }

    #[tokio::test]
    async fn test_abort_policy_fails_run() {
        let mock = Arc::new(
            MockBookSearch::always_isbn13("9780000000000")
                .fail("Title 3", EnrichmentError::Network("connection reset".to_string())),
        );
        let titles = numbered_titles(6);

        let err = enrich(&titles, mock, &config(2)).await.unwrap_err();

        match err {
            EnrichmentError::LookupFailed { title, source } => {
                assert_eq!(title, "Title 3");
                assert!(matches!(*source, EnrichmentError::Network(_)));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_best_effort_keeps_partial_results() {
        let mock = Arc::new(
            MockBookSearch::always_isbn13("9780000000000")
                .fail("Title 1", EnrichmentError::RateLimited)
                .respond("Title 4", "not json"),
        );
        let titles = numbered_titles(6);
        let config = PoolConfig {
            failure_policy: FailurePolicy::BestEffort,
            ..config(2)
        };

        let report = enrich(&titles, mock, &config).await.unwrap();

        assert_eq!(report.records.len(), 4);
        let mut failed: Vec<_> = report.failures.iter().map(|f| f.title.as_str()).collect();
        failed.sort();
        assert_eq!(failed, vec!["Title 1", "Title 4"]);
        assert!(report.records.iter().all(|r| r.title != "Title 1"));
    }

    #[tokio::test]
    async fn test_unknown_kind_fails_only_that_title() {
        let mock = Arc::new(
            MockBookSearch::always_isbn13("9780000000000")
                .respond("Title 2", search_response(&[("ISSN", "1234-5678")])),
        );
        let titles = numbered_titles(4);

        let best_effort = PoolConfig {
            failure_policy: FailurePolicy::BestEffort,
            ..config(2)
        };
        let report = enrich(&titles, Arc::clone(&mock), &best_effort).await.unwrap();
        assert_eq!(report.records.len(), 3);
        assert!(matches!(
            report.failures[0].error,
            EnrichmentError::UnknownIdentifierKind { .. }
        ));

        let aborted = enrich(&titles, mock, &config(2)).await;
        assert!(matches!(
            aborted,
            Err(EnrichmentError::LookupFailed { ref title, .. }) if title == "Title 2"
        ));
    }

    #[tokio::test]
    async fn test_lookup_timeout() {
        let titles = numbered_titles(3);
        let config = PoolConfig {
            lookup_timeout: Some(Duration::from_millis(20)),
            failure_policy: FailurePolicy::BestEffort,
            ..config(3)
        };

        let report = enrich(&titles, Arc::new(StalledSearch), &config).await.unwrap();

        assert!(report.records.is_empty());
        assert_eq!(report.failures.len(), 3);
        assert!(report
            .failures
            .iter()
            .all(|f| matches!(f.error, EnrichmentError::Timeout(_))));
    }

    #[tokio::test]
    async fn test_verbose_does_not_change_results() {
        let mock = Arc::new(MockBookSearch::always_isbn13("9780000000000"));
        let titles = numbered_titles(5);
        let config = PoolConfig {
            verbose: true,
            ..config(2)
        };

        let report = enrich(&titles, mock, &config).await.unwrap();

        assert_eq!(report.records.len(), 5);
    }

    #[tokio::test]
    async fn test_pool_accepts_trait_object() {
        let search: Arc<dyn BookSearchApi> = Arc::new(MockBookSearch::always_isbn13("1"));
        let pool = EnrichmentPool::new(search, config(1)).unwrap();

        let report = pool.run(&numbered_titles(2)).await.unwrap();

        assert_eq!(report.records.len(), 2);
        assert_eq!(pool.config().concurrency_limit, 1);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(24))]

        #[test]
        fn prop_record_count_matches_titles(count in 1usize..40, limit in 1usize..12) {
            let runtime = tokio::runtime::Builder::new_multi_thread()
                .worker_threads(4)
                .enable_all()
                .build()
                .unwrap();
            let mock = Arc::new(MockBookSearch::always_isbn13("9780000000000"));
            let titles = numbered_titles(count);

            let report = runtime
                .block_on(enrich(&titles, Arc::clone(&mock), &config(limit)))
                .unwrap();

            prop_assert_eq!(report.records.len(), count);
            prop_assert!(mock.high_water_mark() <= limit);
        }
    }
}
