//! Drives the check-and-notify sequence, on a timer and on demand.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{Mutex, RwLock};
use tokio::time::sleep;

use crate::config::FilterConfig;
use crate::error::{AppError, Result};
use crate::service::aggregator::Aggregator;
use crate::service::notifier::{DeliveryReport, Notifier};
use crate::service::sink::MessageSink;

/// Delay before the first check, so the delivery channel has a moment to
/// come up after process start.
pub const INITIAL_CHECK_DELAY_MS: u64 = 5000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckOutcome {
    /// A full cycle ran; `found` counts new jobs before the cap.
    Completed {
        found: usize,
        report: DeliveryReport,
    },
    /// Another cycle was still in flight, nothing was done.
    Skipped,
}

pub struct Scheduler {
    aggregator: Aggregator,
    notifier: Notifier,
    sink: Arc<dyn MessageSink>,
    filters: Arc<RwLock<FilterConfig>>,
    /// Held for the duration of one cycle; `try_lock` keeps overlapping
    /// triggers from running checks concurrently.
    cycle_guard: Mutex<()>,
}

impl Scheduler {
    pub fn new(
        aggregator: Aggregator,
        notifier: Notifier,
        sink: Arc<dyn MessageSink>,
        filters: Arc<RwLock<FilterConfig>>,
    ) -> Self {
        Self {
            aggregator,
            notifier,
            sink,
            filters,
            cycle_guard: Mutex::new(()),
        }
    }

    /// (label, description) pairs for `!jobsources`.
    pub fn source_descriptions(&self) -> Vec<(&'static str, &'static str)> {
        self.aggregator.source_descriptions()
    }

    /// Periodic loop: one early check shortly after start, then one check
    /// per poll interval. The interval is re-read every lap so a filter
    /// change applies without a restart. A failed cycle never ends the
    /// loop.
    pub async fn run(self: Arc<Self>) {
        sleep(Duration::from_millis(INITIAL_CHECK_DELAY_MS)).await;
        self.run_logged().await;

        loop {
            let interval_ms = self.filters.read().await.check_interval_ms;
            sleep(Duration::from_millis(interval_ms)).await;
            self.run_logged().await;
        }
    }

    async fn run_logged(&self) {
        match self.check_now().await {
            Ok(CheckOutcome::Completed { found, report }) => {
                log::info!(
                    "Check complete: {} new, {} delivered, {} failed",
                    found,
                    report.delivered,
                    report.failed
                );
            }
            Ok(CheckOutcome::Skipped) => {}
            Err(e) => log::error!("Check failed: {}", e),
        }
    }

    /// One check-and-notify cycle, shared by the timer and the on-demand
    /// trigger. Aborts with no side effects when the destination channel
    /// cannot be resolved.
    pub async fn check_now(&self) -> Result<CheckOutcome> {
        let Ok(_guard) = self.cycle_guard.try_lock() else {
            log::warn!("A check is already in progress, skipping this trigger");
            return Ok(CheckOutcome::Skipped);
        };

        if !self.sink.is_ready() {
            log::error!("Destination channel unresolved; aborting this check");
            return Err(AppError::ChannelUnresolved);
        }

        // Snapshot the live filters once per cycle.
        let filters = self.filters.read().await.clone();

        let jobs = self.aggregator.collect(&filters).await;
        log::info!("Found {} new job listings", jobs.len());

        let found = jobs.len();
        if found == 0 {
            return Ok(CheckOutcome::Completed {
                found: 0,
                report: DeliveryReport::default(),
            });
        }

        let report = self.notifier.deliver(jobs, filters.max_per_check).await;
        Ok(CheckOutcome::Completed { found, report })
    }
}
