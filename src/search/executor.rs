//! Search execution and enrichment

use super::models::{OrchestratorOptions, SearchUnavailable};
use crate::lookup::{DetailLookup, LookupError, SearchLookup};
use crate::metrics::{NoopObserver, SearchObserver};
use crate::results::{EnrichedResult, SearchHit};
use futures::{future, stream, StreamExt};
use std::sync::Arc;
use std::time::Instant;
use tokio::time::timeout;
use tracing::{debug, info, warn};

/// Combines a search lookup with per-hit detail lookups.
///
/// A failed search lookup fails the whole search. A failed detail lookup
/// drops only that hit; the remaining results keep the order of the hits.
#[derive(Clone)]
pub struct SearchOrchestrator {
    search_lookup: Arc<dyn SearchLookup>,
    detail_lookup: Arc<dyn DetailLookup>,
    observer: Arc<dyn SearchObserver>,
    options: OrchestratorOptions,
}

impl SearchOrchestrator {
    /// Create an orchestrator with default options and no observer
    pub fn new(search_lookup: Arc<dyn SearchLookup>, detail_lookup: Arc<dyn DetailLookup>) -> Self {
        Self {
            search_lookup,
            detail_lookup,
            observer: Arc::new(NoopObserver),
            options: OrchestratorOptions::default(),
        }
    }

    /// Set the diagnostic observer
    pub fn with_observer(mut self, observer: Arc<dyn SearchObserver>) -> Self {
        self.observer = observer;
        self
    }

    /// Set options
    pub fn with_options(mut self, options: OrchestratorOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> &OrchestratorOptions {
        &self.options
    }

    /// Search with the configured default limit
    pub async fn search_default(&self, query: &str) -> Result<Vec<EnrichedResult>, SearchUnavailable> {
        self.search(query, self.options.default_limit).await
    }

    /// Search for `query` and enrich up to `limit` hits
    pub async fn search(
        &self,
        query: &str,
        limit: u32,
    ) -> Result<Vec<EnrichedResult>, SearchUnavailable> {
        let start = Instant::now();

        let hits = match self.lookup_hits(query, limit).await {
            Ok(hits) => hits,
            Err(e) => {
                warn!(query, error = %e, kind = e.kind(), "Search lookup failed");
                self.observer.search_failed(query, &e);
                return Err(e.into());
            }
        };

        let hit_count = hits.len();
        if hits.is_empty() {
            debug!("Search '{}' returned no hits", query);
            self.observer.search_completed(query, 0, 0, start.elapsed());
            return Ok(Vec::new());
        }

        // Futures are built before streaming so the search future stays `Send`.
        // `buffered` yields in input order regardless of completion order.
        let lookups: Vec<_> = hits.iter().map(|hit| self.enrich(hit)).collect();
        let results: Vec<EnrichedResult> = stream::iter(lookups)
            .buffered(self.options.detail_concurrency.max(1))
            .filter_map(future::ready)
            .collect()
            .await;

        let elapsed = start.elapsed();
        info!(
            "Search '{}' returned {} of {} hits in {:?}",
            query,
            results.len(),
            hit_count,
            elapsed
        );
        self.observer
            .search_completed(query, hit_count, results.len(), elapsed);

        Ok(results)
    }

    async fn lookup_hits(&self, query: &str, limit: u32) -> Result<Vec<SearchHit>, LookupError> {
        timeout(
            self.options.search_timeout,
            self.search_lookup.search(query, limit),
        )
        .await
        .unwrap_or(Err(LookupError::Timeout))
    }

    /// Fetch the summary of one hit; `None` when the hit is dropped
    async fn enrich(&self, hit: &SearchHit) -> Option<EnrichedResult> {
        let outcome = timeout(
            self.options.detail_timeout,
            self.detail_lookup.summary(&hit.title),
        )
        .await
        .unwrap_or(Err(LookupError::Timeout));

        match outcome {
            Ok(summary) => Some(EnrichedResult::from_summary(
                hit,
                summary,
                &self.options.placeholders,
                &self.options.locale,
            )),
            Err(e) => {
                warn!(
                    title = %hit.title,
                    id = hit.id,
                    error = %e,
                    kind = e.kind(),
                    "Dropping hit, summary lookup failed"
                );
                self.observer.detail_dropped(hit, &e);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::results::ArticleSummary;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::Mutex;
    use std::time::Duration;

    struct FakeSearch {
        outcome: Result<Vec<SearchHit>, LookupError>,
        calls: Mutex<Vec<(String, u32)>>,
    }

    impl FakeSearch {
        fn hits(titles: &[&str]) -> Arc<Self> {
            let hits = titles
                .iter()
                .enumerate()
                .map(|(i, t)| SearchHit::new(100 + i as u64, *t))
                .collect();
            Arc::new(Self {
                outcome: Ok(hits),
                calls: Mutex::new(Vec::new()),
            })
        }

        fn failing(error: LookupError) -> Arc<Self> {
            Arc::new(Self {
                outcome: Err(error),
                calls: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl SearchLookup for FakeSearch {
        async fn search(&self, query: &str, limit: u32) -> Result<Vec<SearchHit>, LookupError> {
            self.calls.lock().unwrap().push((query.to_string(), limit));
            self.outcome.clone()
        }
    }

    enum Behavior {
        Fail(LookupError),
        Delay(Duration),
        Hang,
    }

    #[derive(Default)]
    struct FakeDetail {
        behaviors: HashMap<String, Behavior>,
        calls: Mutex<Vec<String>>,
    }

    impl FakeDetail {
        fn with(mut self, title: &str, behavior: Behavior) -> Self {
            self.behaviors.insert(title.to_string(), behavior);
            self
        }
    }

    #[async_trait]
    impl DetailLookup for FakeDetail {
        async fn summary(&self, title: &str) -> Result<ArticleSummary, LookupError> {
            self.calls.lock().unwrap().push(title.to_string());
            match self.behaviors.get(title) {
                Some(Behavior::Fail(e)) => return Err(e.clone()),
                Some(Behavior::Delay(d)) => tokio::time::sleep(*d).await,
                Some(Behavior::Hang) => future::pending::<()>().await,
                None => {}
            }
            Ok(ArticleSummary::new(title).with_extract(format!("About {}", title)))
        }
    }

    #[derive(Default)]
    struct RecordingObserver {
        dropped: Mutex<Vec<(String, LookupError)>>,
        failed: Mutex<Vec<LookupError>>,
        completed: Mutex<Vec<(usize, usize)>>,
    }

    impl SearchObserver for RecordingObserver {
        fn search_completed(&self, _query: &str, hits: usize, results: usize, _elapsed: Duration) {
            self.completed.lock().unwrap().push((hits, results));
        }

        fn search_failed(&self, _query: &str, error: &LookupError) {
            self.failed.lock().unwrap().push(error.clone());
        }

        fn detail_dropped(&self, hit: &SearchHit, reason: &LookupError) {
            self.dropped
                .lock()
                .unwrap()
                .push((hit.title.clone(), reason.clone()));
        }
    }

    fn titles(results: &[EnrichedResult]) -> Vec<&str> {
        results.iter().map(|r| r.title.as_str()).collect()
    }

    const TOPICS: [&str; 6] = ["Indonesia", "Jakarta", "Bali", "Java", "Sumatra", "Borneo"];

    #[tokio::test]
    async fn test_all_details_succeed() {
        let search = FakeSearch::hits(&TOPICS);
        let orchestrator = SearchOrchestrator::new(search.clone(), Arc::new(FakeDetail::default()));

        let results = orchestrator.search("Indonesia", 6).await.unwrap();

        assert_eq!(titles(&results), TOPICS);
        assert_eq!(results[0].id, 100);
        assert_eq!(results[5].id, 105);
        assert_eq!(results[1].snippet, "About Jakarta");
        assert_eq!(
            search.calls.lock().unwrap().as_slice(),
            [("Indonesia".to_string(), 6)]
        );
    }

    #[tokio::test]
    async fn test_failed_details_are_dropped_in_order() {
        let detail = FakeDetail::default()
            .with("Jakarta", Behavior::Fail(LookupError::Status(404)))
            .with("Java", Behavior::Fail(LookupError::Transport("reset".into())));
        let observer = Arc::new(RecordingObserver::default());
        let orchestrator = SearchOrchestrator::new(FakeSearch::hits(&TOPICS), Arc::new(detail))
            .with_observer(observer.clone());

        let results = orchestrator.search("Indonesia", 6).await.unwrap();

        assert_eq!(titles(&results), ["Indonesia", "Bali", "Sumatra", "Borneo"]);

        let dropped = observer.dropped.lock().unwrap();
        assert_eq!(dropped.len(), 2);
        assert!(dropped.contains(&("Jakarta".to_string(), LookupError::Status(404))));
        assert_eq!(observer.completed.lock().unwrap().as_slice(), [(6, 4)]);
    }

    #[tokio::test]
    async fn test_search_lookup_failure_is_unavailable() {
        let detail = Arc::new(FakeDetail::default());
        let observer = Arc::new(RecordingObserver::default());
        let orchestrator = SearchOrchestrator::new(
            FakeSearch::failing(LookupError::Status(503)),
            detail.clone(),
        )
        .with_observer(observer.clone());

        let err = orchestrator.search("Indonesia", 10).await.unwrap_err();

        assert_eq!(err.source, LookupError::Status(503));
        assert!(detail.calls.lock().unwrap().is_empty());
        assert_eq!(
            observer.failed.lock().unwrap().as_slice(),
            [LookupError::Status(503)]
        );
    }

    #[test]
    fn test_zero_hits_returns_empty() {
        let detail = Arc::new(FakeDetail::default());
        let orchestrator = SearchOrchestrator::new(FakeSearch::hits(&[]), detail.clone());

        let results = tokio_test::block_on(orchestrator.search("zzzxqj", 10)).unwrap();

        assert!(results.is_empty());
        assert!(detail.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_detail_timeout_drops_only_that_hit() {
        let detail = FakeDetail::default().with("Bali", Behavior::Hang);
        let observer = Arc::new(RecordingObserver::default());
        let options = OrchestratorOptions::default()
            .with_timeouts(Duration::from_secs(5), Duration::from_millis(100));
        let orchestrator = SearchOrchestrator::new(FakeSearch::hits(&TOPICS), Arc::new(detail))
            .with_options(options)
            .with_observer(observer.clone());

        let results = orchestrator.search("Indonesia", 6).await.unwrap();

        assert_eq!(results.len(), 5);
        assert_eq!(titles(&results), ["Indonesia", "Jakarta", "Java", "Sumatra", "Borneo"]);
        assert_eq!(
            observer.dropped.lock().unwrap().as_slice(),
            [("Bali".to_string(), LookupError::Timeout)]
        );
    }

    #[tokio::test]
    async fn test_search_timeout_is_unavailable() {
        struct HangingSearch;

        #[async_trait]
        impl SearchLookup for HangingSearch {
            async fn search(&self, _query: &str, _limit: u32) -> Result<Vec<SearchHit>, LookupError> {
                future::pending().await
            }
        }

        let options = OrchestratorOptions::default()
            .with_timeouts(Duration::from_millis(50), Duration::from_secs(5));
        let orchestrator =
            SearchOrchestrator::new(Arc::new(HangingSearch), Arc::new(FakeDetail::default()))
                .with_options(options);

        let err = orchestrator.search("Indonesia", 10).await.unwrap_err();
        assert_eq!(err.source, LookupError::Timeout);
    }

    #[tokio::test]
    async fn test_out_of_order_completion_keeps_hit_order() {
        let detail = FakeDetail::default()
            .with("Indonesia", Behavior::Delay(Duration::from_millis(80)))
            .with("Jakarta", Behavior::Delay(Duration::from_millis(40)));
        let options = OrchestratorOptions::default().with_concurrency(6);
        let orchestrator = SearchOrchestrator::new(FakeSearch::hits(&TOPICS), Arc::new(detail))
            .with_options(options);

        let results = orchestrator.search("Indonesia", 6).await.unwrap();
        assert_eq!(titles(&results), TOPICS);
    }

    #[tokio::test]
    async fn test_sequential_mode_calls_details_in_hit_order() {
        let detail = Arc::new(FakeDetail::default());
        let options = OrchestratorOptions::default().with_concurrency(1);
        let orchestrator =
            SearchOrchestrator::new(FakeSearch::hits(&TOPICS), detail.clone()).with_options(options);

        orchestrator.search("Indonesia", 6).await.unwrap();
        assert_eq!(detail.calls.lock().unwrap().as_slice(), TOPICS);
    }

    #[tokio::test]
    async fn test_search_default_uses_configured_limit() {
        let search = FakeSearch::hits(&["Indonesia"]);
        let orchestrator = SearchOrchestrator::new(search.clone(), Arc::new(FakeDetail::default()));

        orchestrator.search_default("Indonesia").await.unwrap();
        assert_eq!(search.calls.lock().unwrap()[0].1, 10);
    }

    #[tokio::test]
    async fn test_search_runs_on_spawned_task() {
        let detail = FakeDetail::default().with("Bali", Behavior::Fail(LookupError::Status(404)));
        let orchestrator = SearchOrchestrator::new(FakeSearch::hits(&TOPICS), Arc::new(detail));

        let handle = tokio::spawn(async move { orchestrator.search("Indonesia", 6).await });
        let results = handle.await.unwrap().unwrap();

        assert_eq!(titles(&results), ["Indonesia", "Jakarta", "Java", "Sumatra", "Borneo"]);
    }
}
