//! Core domain entities - behavior lives WITH data

use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Landing page substituted when a posting carries no link of its own.
pub const DEFAULT_LANDING_PAGE: &str = "https://www.linkedin.com/jobs/search/";

/// Render-time cap on description length.
pub const DESCRIPTION_LIMIT: usize = 300;

/// Sentinel used when a source reports no location.
pub const LOCATION_FALLBACK: &str = "Remote/Various";

// ====== Enums ======

/// Which adapter produced a record. Order here is the fallback priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum SourceKind {
    Api,
    Feed,
    Scrape,
    Fallback,
    Synthetic,
}

impl SourceKind {
    /// Stable short tag, used as the id prefix for native identifiers.
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceKind::Api => "api",
            SourceKind::Feed => "feed",
            SourceKind::Scrape => "scrape",
            SourceKind::Fallback => "fallback",
            SourceKind::Synthetic => "synthetic",
        }
    }

    /// Display name shown in notifications and `!jobsources`.
    pub fn label(&self) -> &'static str {
        match self {
            SourceKind::Api => "Job Search API",
            SourceKind::Feed => "RSS feeds",
            SourceKind::Scrape => "LinkedIn search",
            SourceKind::Fallback => "Curated boards",
            SourceKind::Synthetic => "Sample listings",
        }
    }
}

// ====== Entities ======

/// Canonical posting record produced by every source adapter.
#[derive(Debug, Clone, Serialize)]
pub struct Job {
    /// Deduplication key; stable across fetches of the same posting.
    pub id: String,
    pub title: String,
    pub company: String,
    pub location: String,
    pub link: Option<String>,
    /// Human-readable recency string; display only, never used for ordering.
    pub posted_time: Option<String>,
    pub source: SourceKind,
    pub description: Option<String>,
}

impl Job {
    /// Batch-level dedup key; collapses near-duplicates surfaced by
    /// different sources. Distinct from the persisted `id`.
    pub fn dedup_key(&self) -> String {
        format!(
            "{}|{}",
            self.title.to_lowercase(),
            self.company.to_lowercase()
        )
    }

    pub fn display_link(&self) -> &str {
        self.link.as_deref().unwrap_or(DEFAULT_LANDING_PAGE)
    }

    pub fn display_posted(&self) -> &str {
        self.posted_time.as_deref().unwrap_or("Recently")
    }

    /// Description cut to [`DESCRIPTION_LIMIT`] characters with an ellipsis
    /// marker when anything was dropped.
    pub fn truncated_description(&self) -> Option<String> {
        let text = self.description.as_deref()?.trim();
        if text.is_empty() {
            return None;
        }
        if text.chars().count() <= DESCRIPTION_LIMIT {
            return Some(text.to_string());
        }
        let cut: String = text.chars().take(DESCRIPTION_LIMIT).collect();
        Some(format!("{}...", cut.trim_end()))
    }

    /// Notification body shared by every sink.
    pub fn render_body(&self) -> String {
        let mut body = format!(
            "**Company:** {}\n**Location:** {}\n**Posted:** {}\n**Source:** {}",
            self.company,
            self.location,
            self.display_posted(),
            self.source.label()
        );
        if let Some(description) = self.truncated_description() {
            body.push_str("\n\n");
            body.push_str(&description);
        }
        body
    }
}

/// Record persisted once a posting has been reported. Written once,
/// never mutated, removed only by a full history clear.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeenEntry {
    pub id: String,
    pub title: String,
    #[serde(rename = "dateFound")]
    pub date_found: String,
}

impl SeenEntry {
    pub fn new(job: &Job) -> Self {
        Self {
            id: job.id.clone(),
            title: job.title.clone(),
            date_found: Utc::now().to_rfc3339(),
        }
    }
}
