//! Shared stubs for unit and integration tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use crate::config::FilterConfig;
use crate::domain::models::{Job, SourceKind};
use crate::error::{AppError, Result};
use crate::service::sink::MessageSink;
use crate::source::SourceAdapter;

/// Minimal job literal for pipeline tests.
pub fn job_from(source: SourceKind, id: &str, title: &str, company: &str) -> Job {
    Job {
        id: id.to_string(),
        title: title.to_string(),
        company: company.to_string(),
        location: "Remote".to_string(),
        link: None,
        posted_time: None,
        source,
        description: None,
    }
}

/// Source adapter returning a fixed batch, counting invocations.
pub struct StubSource {
    kind: SourceKind,
    jobs: Vec<Job>,
    fail: bool,
    calls: AtomicUsize,
}

impl StubSource {
    pub fn new(kind: SourceKind, jobs: Vec<Job>) -> Self {
        Self {
            kind,
            jobs,
            fail: false,
            calls: AtomicUsize::new(0),
        }
    }

    /// A stub that violates the adapter contract by returning `Err`.
    pub fn failing(kind: SourceKind) -> Self {
        Self {
            kind,
            jobs: Vec::new(),
            fail: true,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SourceAdapter for StubSource {
    fn kind(&self) -> SourceKind {
        self.kind
    }

    fn describe(&self) -> &'static str {
        "Stub source for tests"
    }

    async fn fetch(&self, _filters: &FilterConfig) -> Result<Vec<Job>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(AppError::network("stub source down"));
        }
        Ok(self.jobs.clone())
    }
}

/// Sink that records delivered job ids, optionally failing on one id or
/// sleeping per send to hold a cycle open.
pub struct RecordingSink {
    sent: Mutex<Vec<String>>,
    fail_on: Option<String>,
    send_delay: Duration,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            fail_on: None,
            send_delay: Duration::ZERO,
        }
    }

    pub fn failing_on(id: &str) -> Self {
        Self {
            fail_on: Some(id.to_string()),
            ..Self::new()
        }
    }

    pub fn with_send_delay(delay: Duration) -> Self {
        Self {
            send_delay: delay,
            ..Self::new()
        }
    }

    pub fn sent_ids(&self) -> Vec<String> {
        self.sent.lock().expect("sink mutex poisoned").clone()
    }
}

impl Default for RecordingSink {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MessageSink for RecordingSink {
    fn is_ready(&self) -> bool {
        true
    }

    async fn send(&self, job: &Job) -> Result<()> {
        if !self.send_delay.is_zero() {
            tokio::time::sleep(self.send_delay).await;
        }
        if self.fail_on.as_deref() == Some(job.id.as_str()) {
            return Err(AppError::delivery("stub sink rejected message"));
        }
        self.sent.lock().expect("sink mutex poisoned").push(job.id.clone());
        Ok(())
    }
}

/// Sink whose destination never resolves.
pub struct UnreadySink;

#[async_trait]
impl MessageSink for UnreadySink {
    fn is_ready(&self) -> bool {
        false
    }

    async fn send(&self, _job: &Job) -> Result<()> {
        Err(AppError::ChannelUnresolved)
    }
}
