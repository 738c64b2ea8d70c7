//! Randomized sample-listing generator, the infallible tail of the
//! fallback chain. Exists so the pipeline has non-empty output for demos
//! and tests even when every live source fails.

use async_trait::async_trait;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::config::FilterConfig;
use crate::domain::models::{Job, SourceKind};
use crate::domain::normalizer::{normalize, RawJob};
use crate::error::Result;
use crate::source::SourceAdapter;

const TITLES: &[&str] = &[
    "Software Engineer",
    "Backend Developer",
    "Frontend Developer",
    "Full Stack Engineer",
    "DevOps Engineer",
    "Data Engineer",
];

const COMPANIES: &[&str] = &[
    "Acme Systems",
    "Initech",
    "Globex",
    "Hooli",
    "Umbrella Labs",
    "Stark Industries",
];

const LOCATIONS: &[&str] = &[
    "Remote",
    "New York, NY",
    "Austin, TX",
    "Seattle, WA",
    "San Francisco, CA",
];

const BATCH_SIZE: usize = 3;

pub struct SyntheticSource;

#[async_trait]
impl SourceAdapter for SyntheticSource {
    fn kind(&self) -> SourceKind {
        SourceKind::Synthetic
    }

    fn describe(&self) -> &'static str {
        "Randomized sample listings (demo/testing)"
    }

    async fn fetch(&self, _filters: &FilterConfig) -> Result<Vec<Job>> {
        let mut rng = rand::thread_rng();
        let jobs = (0..BATCH_SIZE)
            .filter_map(|_| {
                let title = *TITLES.choose(&mut rng).expect("non-empty pool");
                let company = *COMPANIES.choose(&mut rng).expect("non-empty pool");
                let location = *LOCATIONS.choose(&mut rng).expect("non-empty pool");
                // Random disambiguator so repeated demo checks keep
                // producing unseen ids.
                let nonce: u32 = rng.gen();
                normalize(
                    RawJob {
                        native_id: Some(format!("{:08x}", nonce)),
                        title: title.to_string(),
                        company: company.to_string(),
                        location: Some(location.to_string()),
                        link: None,
                        posted_time: Some("Just now".to_string()),
                        description: Some(format!(
                            "Sample listing for a {} opening at {}.",
                            title, company
                        )),
                    },
                    SourceKind::Synthetic,
                )
            })
            .collect();
        Ok(jobs)
    }
}
