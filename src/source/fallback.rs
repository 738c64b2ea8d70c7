//! Static fallback listings used when every live source comes back empty.

use async_trait::async_trait;

use crate::config::FilterConfig;
use crate::domain::models::{Job, SourceKind};
use crate::domain::normalizer::{normalize, RawJob};
use crate::error::Result;
use crate::source::SourceAdapter;

/// (title, company, location, link) of stable board landing pages.
const LISTINGS: &[(&str, &str, &str, &str)] = &[
    (
        "Newest software engineer listings",
        "Indeed",
        "United States",
        "https://www.indeed.com/q-software-engineer-jobs.html",
    ),
    (
        "Remote programming jobs",
        "We Work Remotely",
        "Remote",
        "https://weworkremotely.com/categories/remote-programming-jobs",
    ),
    (
        "Who is hiring this month",
        "Hacker News",
        "Remote/Various",
        "https://news.ycombinator.com/jobs",
    ),
];

pub struct FallbackSource;

#[async_trait]
impl SourceAdapter for FallbackSource {
    fn kind(&self) -> SourceKind {
        SourceKind::Fallback
    }

    fn describe(&self) -> &'static str {
        "Curated board landing pages (static)"
    }

    async fn fetch(&self, _filters: &FilterConfig) -> Result<Vec<Job>> {
        let jobs = LISTINGS
            .iter()
            .filter_map(|(title, company, location, link)| {
                normalize(
                    RawJob {
                        native_id: None,
                        title: title.to_string(),
                        company: company.to_string(),
                        location: Some(location.to_string()),
                        link: Some(link.to_string()),
                        posted_time: None,
                        description: None,
                    },
                    SourceKind::Fallback,
                )
            })
            .collect();
        Ok(jobs)
    }
}
