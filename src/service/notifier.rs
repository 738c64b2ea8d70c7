//! Formats, paces and delivers new job notifications.

use std::sync::Arc;
use std::time::Duration;

use tokio::time::sleep;

use crate::domain::models::{Job, SeenEntry};
use crate::repository::SeenJobStore;
use crate::service::sink::MessageSink;

/// Pause between successful sends, to stay inside the channel's rate limit.
pub const SEND_PACING_MS: u64 = 1000;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeliveryReport {
    pub delivered: usize,
    pub failed: usize,
}

pub struct Notifier {
    sink: Arc<dyn MessageSink>,
    store: Arc<SeenJobStore>,
    pacing: Duration,
}

impl Notifier {
    pub fn new(sink: Arc<dyn MessageSink>, store: Arc<SeenJobStore>) -> Self {
        Self::with_pacing(sink, store, Duration::from_millis(SEND_PACING_MS))
    }

    pub fn with_pacing(
        sink: Arc<dyn MessageSink>,
        store: Arc<SeenJobStore>,
        pacing: Duration,
    ) -> Self {
        Self {
            sink,
            store,
            pacing,
        }
    }

    /// Deliver up to `cap` jobs in order. A failed send is logged and the
    /// job stays unseen, so it is retried on a later check; later jobs in
    /// the batch still go out. The store is persisted exactly once after
    /// the whole batch, successes and failures alike.
    pub async fn deliver(&self, jobs: Vec<Job>, cap: usize) -> DeliveryReport {
        if jobs.len() > cap {
            log::info!("Capping batch of {} new jobs to {}", jobs.len(), cap);
        }

        let mut report = DeliveryReport::default();
        for job in jobs.into_iter().take(cap) {
            match self.sink.send(&job).await {
                Ok(()) => {
                    self.store.record(SeenEntry::new(&job));
                    report.delivered += 1;
                    sleep(self.pacing).await;
                }
                Err(e) => {
                    log::error!("Failed to deliver job {}: {}", job.id, e);
                    report.failed += 1;
                }
            }
        }

        if let Err(e) = self.store.persist().await {
            log::error!("Failed to persist seen jobs: {:#}", e);
        }

        report
    }
}
