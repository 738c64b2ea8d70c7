//! Merges the source adapters into one batch of genuinely new jobs.
//!
//! Two strategies:
//! - **FallbackChain**: sources are tried in priority order and the first
//!   non-empty batch wins; an error or an empty batch falls through to the
//!   next source. The synthetic tail never comes back empty, so the chain
//!   always terminates with something.
//! - **FanOutAll**: every source is queried concurrently; the combined
//!   batch is collapsed by title+company so near-duplicates surfaced by
//!   several boards reach the channel once, attributed to the
//!   highest-priority source.
//!
//! Whatever the strategy, ids already present in the seen-job store are
//! excluded before the batch is returned.

use std::collections::HashSet;
use std::sync::Arc;

use futures::future::join_all;

use crate::config::{FilterConfig, MergeStrategy};
use crate::domain::models::Job;
use crate::repository::SeenJobStore;
use crate::source::SourceAdapter;

pub struct Aggregator {
    adapters: Vec<Arc<dyn SourceAdapter>>,
    strategy: MergeStrategy,
    store: Arc<SeenJobStore>,
}

impl Aggregator {
    /// `adapters` must be in priority order, highest first.
    pub fn new(
        adapters: Vec<Arc<dyn SourceAdapter>>,
        strategy: MergeStrategy,
        store: Arc<SeenJobStore>,
    ) -> Self {
        Self {
            adapters,
            strategy,
            store,
        }
    }

    /// (label, description) of every registered source, in priority order.
    pub fn source_descriptions(&self) -> Vec<(&'static str, &'static str)> {
        self.adapters
            .iter()
            .map(|a| (a.kind().label(), a.describe()))
            .collect()
    }

    /// Run the configured strategy and return only jobs the store has not
    /// seen yet, in source-priority-then-discovery order.
    pub async fn collect(&self, filters: &FilterConfig) -> Vec<Job> {
        let mut batch = match self.strategy {
            MergeStrategy::FallbackChain => self.first_non_empty(filters).await,
            MergeStrategy::FanOutAll => self.fan_out(filters).await,
        };
        batch.retain(|job| !self.store.contains(&job.id));
        batch
    }

    async fn first_non_empty(&self, filters: &FilterConfig) -> Vec<Job> {
        for adapter in &self.adapters {
            match adapter.fetch(filters).await {
                Ok(jobs) if !jobs.is_empty() => {
                    log::debug!(
                        "Using {} ({} candidates)",
                        adapter.kind().label(),
                        jobs.len()
                    );
                    return jobs;
                }
                Ok(_) => {
                    log::debug!("{} returned nothing, falling through", adapter.kind().label());
                }
                Err(e) => {
                    log::warn!("{} failed: {}", adapter.kind().label(), e);
                }
            }
        }
        Vec::new()
    }

    async fn fan_out(&self, filters: &FilterConfig) -> Vec<Job> {
        let fetches = self.adapters.iter().map(|adapter| async move {
            match adapter.fetch(filters).await {
                Ok(jobs) => jobs,
                Err(e) => {
                    log::warn!("{} failed: {}", adapter.kind().label(), e);
                    Vec::new()
                }
            }
        });

        // join_all preserves input order, which re-imposes source priority
        // on the merged batch regardless of completion order.
        let mut merged = Vec::new();
        let mut seen_keys = HashSet::new();
        for jobs in join_all(fetches).await {
            for job in jobs {
                if seen_keys.insert(job.dedup_key()) {
                    merged.push(job);
                }
            }
        }
        merged
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::{SeenEntry, SourceKind};
    use crate::test_utils::{job_from, StubSource};

    // These tests never persist, so the backing path is never written.
    fn store() -> Arc<SeenJobStore> {
        Arc::new(SeenJobStore::new("unused-jobs.json"))
    }

    #[tokio::test]
    async fn chain_stops_at_first_non_empty_source() {
        let first = Arc::new(StubSource::new(
            SourceKind::Api,
            vec![job_from(SourceKind::Api, "api-1", "Engineer", "Acme")],
        ));
        let second = Arc::new(StubSource::new(SourceKind::Feed, vec![]));

        let aggregator = Aggregator::new(
            vec![first.clone(), second.clone()],
            MergeStrategy::FallbackChain,
            store(),
        );
        let batch = aggregator.collect(&FilterConfig::default()).await;

        assert_eq!(batch.len(), 1);
        assert_eq!(first.calls(), 1);
        assert_eq!(second.calls(), 0, "lower-priority source must not run");
    }

    #[tokio::test]
    async fn chain_falls_through_empty_and_failing_sources() {
        let empty = Arc::new(StubSource::new(SourceKind::Api, vec![]));
        let failing = Arc::new(StubSource::failing(SourceKind::Feed));
        let last = Arc::new(StubSource::new(
            SourceKind::Synthetic,
            vec![job_from(SourceKind::Synthetic, "synthetic-1", "Engineer", "Acme")],
        ));

        let aggregator = Aggregator::new(
            vec![empty.clone(), failing.clone(), last.clone()],
            MergeStrategy::FallbackChain,
            store(),
        );
        let batch = aggregator.collect(&FilterConfig::default()).await;

        assert_eq!(batch.len(), 1);
        assert_eq!(batch[0].id, "synthetic-1");
        assert_eq!(empty.calls(), 1);
        assert_eq!(failing.calls(), 1);
        assert_eq!(last.calls(), 1);
    }

    #[tokio::test]
    async fn fan_out_collapses_near_duplicates_keeping_priority_winner() {
        // Same title+company from two sources under different ids.
        let api = Arc::new(StubSource::new(
            SourceKind::Api,
            vec![job_from(SourceKind::Api, "api-7", "Rust Engineer", "Acme")],
        ));
        let feed = Arc::new(StubSource::new(
            SourceKind::Feed,
            vec![
                job_from(SourceKind::Feed, "feed-9", "Rust Engineer", "Acme"),
                job_from(SourceKind::Feed, "feed-10", "Go Developer", "Beta"),
            ],
        ));

        let aggregator =
            Aggregator::new(vec![api, feed], MergeStrategy::FanOutAll, store());
        let batch = aggregator.collect(&FilterConfig::default()).await;

        assert_eq!(batch.len(), 2);
        assert_eq!(batch[0].id, "api-7", "higher-priority entry survives");
        assert_eq!(batch[1].id, "feed-10");
    }

    #[tokio::test]
    async fn seen_ids_are_excluded_from_the_batch() {
        let jobs = vec![
            job_from(SourceKind::Api, "api-1", "Engineer", "Acme"),
            job_from(SourceKind::Api, "api-2", "Developer", "Beta"),
        ];
        let source = Arc::new(StubSource::new(SourceKind::Api, jobs.clone()));
        let store = store();
        store.record(SeenEntry::new(&jobs[0]));

        let aggregator =
            Aggregator::new(vec![source], MergeStrategy::FallbackChain, store);
        let batch = aggregator.collect(&FilterConfig::default()).await;

        assert_eq!(batch.len(), 1);
        assert_eq!(batch[0].id, "api-2");
    }

    #[tokio::test]
    async fn second_pass_is_empty_once_everything_is_recorded() {
        let jobs = vec![
            job_from(SourceKind::Feed, "feed-1", "Engineer", "Acme"),
            job_from(SourceKind::Feed, "feed-2", "Developer", "Beta"),
        ];
        let source = Arc::new(StubSource::new(SourceKind::Feed, jobs.clone()));
        let store = store();
        let aggregator = Aggregator::new(
            vec![source],
            MergeStrategy::FallbackChain,
            store.clone(),
        );

        let first = aggregator.collect(&FilterConfig::default()).await;
        assert_eq!(first.len(), 2);
        for job in &first {
            store.record(SeenEntry::new(job));
        }

        let second = aggregator.collect(&FilterConfig::default()).await;
        assert!(second.is_empty());
    }
}
