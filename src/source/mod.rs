//! Source adapters: one per job-listing origin.
//!
//! Every adapter implements the same contract: fetch candidate jobs for the
//! current filters, already normalized. Failures stay inside the adapter -
//! a network error, a non-2xx status or a malformed payload is logged and
//! reported as an empty batch, never as a panic or an error that could stop
//! the aggregation pass.

mod api;
mod fallback;
mod feed;
mod scrape;
mod synthetic;

pub use api::ApiSource;
pub use fallback::FallbackSource;
pub use feed::FeedSource;
pub use scrape::ScrapeSource;
pub use synthetic::SyntheticSource;

use async_trait::async_trait;

use crate::config::FilterConfig;
use crate::domain::models::{Job, SourceKind};
use crate::error::Result;

/// Contract shared by every job-listing origin.
#[async_trait]
pub trait SourceAdapter: Send + Sync {
    /// Which origin this adapter represents.
    fn kind(&self) -> SourceKind;

    /// One-line description shown by `!jobsources`.
    fn describe(&self) -> &'static str;

    /// Fetch candidate jobs for the active filters. Implementations catch
    /// their own failures and return an empty batch; `Err` is reserved for
    /// contract violations and is treated as empty by the aggregator.
    async fn fetch(&self, filters: &FilterConfig) -> Result<Vec<Job>>;
}
