//! Structured job-search API source (JSearch-style endpoint).

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::config::{DateRange, FilterConfig, RemotePreference};
use crate::domain::models::{Job, SourceKind};
use crate::domain::normalizer::{normalize, RawJob};
use crate::error::Result;
use crate::source::SourceAdapter;

const SEARCH_ENDPOINT: &str = "https://jsearch.p.rapidapi.com/search";
const API_HOST: &str = "jsearch.p.rapidapi.com";

pub struct ApiSource {
    client: Client,
    endpoint: String,
    api_key: Option<String>,
}

impl ApiSource {
    pub fn new(client: Client, api_key: Option<String>) -> Self {
        Self::with_endpoint(client, api_key, SEARCH_ENDPOINT.to_string())
    }

    /// Endpoint override for tests.
    pub fn with_endpoint(client: Client, api_key: Option<String>, endpoint: String) -> Self {
        Self {
            client,
            endpoint,
            api_key,
        }
    }

    async fn query(&self, filters: &FilterConfig, api_key: &str) -> anyhow::Result<Vec<Job>> {
        let query = format!("{} in {}", filters.keyword, filters.location);
        let date_posted = match filters.date_range {
            DateRange::Any => "all",
            DateRange::PastDay => "today",
            DateRange::PastWeek => "week",
            DateRange::PastMonth => "month",
        };

        let mut request = self
            .client
            .get(&self.endpoint)
            .header("X-RapidAPI-Key", api_key)
            .header("X-RapidAPI-Host", API_HOST)
            .query(&[
                ("query", query.as_str()),
                ("page", "1"),
                ("num_pages", "1"),
                ("date_posted", date_posted),
            ]);
        if filters.remote == RemotePreference::Remote {
            request = request.query(&[("work_from_home", "true")]);
        }

        let response = request.send().await?.error_for_status()?;
        let payload: SearchResponse = response.json().await?;

        let jobs = payload
            .data
            .into_iter()
            .filter_map(|hit| {
                let location = match (hit.job_city, hit.job_country) {
                    (Some(city), Some(country)) => Some(format!("{}, {}", city, country)),
                    (Some(city), None) => Some(city),
                    (None, country) => country,
                };
                normalize(
                    RawJob {
                        native_id: hit.job_id,
                        title: hit.job_title.unwrap_or_default(),
                        company: hit.employer_name.unwrap_or_default(),
                        location,
                        link: hit.job_apply_link,
                        posted_time: hit.job_posted_at,
                        description: hit.job_description,
                    },
                    SourceKind::Api,
                )
            })
            .collect();

        Ok(jobs)
    }
}

#[async_trait]
impl SourceAdapter for ApiSource {
    fn kind(&self) -> SourceKind {
        SourceKind::Api
    }

    fn describe(&self) -> &'static str {
        "Structured job-search API (requires JOBS_API_KEY)"
    }

    async fn fetch(&self, filters: &FilterConfig) -> Result<Vec<Job>> {
        let Some(api_key) = self.api_key.as_deref() else {
            log::debug!("No API key configured, skipping API source");
            return Ok(Vec::new());
        };

        match self.query(filters, api_key).await {
            Ok(jobs) => {
                log::debug!("API source returned {} candidates", jobs.len());
                Ok(jobs)
            }
            Err(e) => {
                log::warn!("API source failed: {:#}", e);
                Ok(Vec::new())
            }
        }
    }
}

/// Response shape of the search endpoint; everything optional so one odd
/// hit never sinks the batch.
#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    data: Vec<SearchHit>,
}

#[derive(Debug, Deserialize)]
struct SearchHit {
    job_id: Option<String>,
    job_title: Option<String>,
    employer_name: Option<String>,
    job_city: Option<String>,
    job_country: Option<String>,
    job_apply_link: Option<String>,
    job_posted_at: Option<String>,
    job_description: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::http::create_client;
    use mockito::Server;

    fn filters() -> FilterConfig {
        FilterConfig::default()
    }

    #[tokio::test]
    async fn maps_search_hits_to_jobs() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("GET", mockito::Matcher::Any)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"data": [
                    {"job_id": "abc123", "job_title": "Rust Engineer",
                     "employer_name": "Acme", "job_city": "Austin",
                     "job_country": "US",
                     "job_apply_link": "https://example.com/apply/abc123",
                     "job_posted_at": "3 days ago",
                     "job_description": "Write Rust services"},
                    {"job_title": "", "employer_name": "Nameless"}
                ]}"#,
            )
            .create_async()
            .await;

        let source = ApiSource::with_endpoint(
            create_client().unwrap(),
            Some("test-key".to_string()),
            server.url(),
        );
        let jobs = source.fetch(&filters()).await.unwrap();

        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0].id, "api-abc123");
        assert_eq!(jobs[0].title, "Rust Engineer");
        assert_eq!(jobs[0].location, "Austin, US");
        assert_eq!(jobs[0].source, SourceKind::Api);
    }

    #[tokio::test]
    async fn server_error_yields_empty_batch() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("GET", mockito::Matcher::Any)
            .with_status(500)
            .create_async()
            .await;

        let source = ApiSource::with_endpoint(
            create_client().unwrap(),
            Some("test-key".to_string()),
            server.url(),
        );
        let jobs = source.fetch(&filters()).await.unwrap();
        assert!(jobs.is_empty());
    }

    #[tokio::test]
    async fn missing_key_skips_without_a_request() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", mockito::Matcher::Any)
            .expect(0)
            .create_async()
            .await;

        let source = ApiSource::with_endpoint(create_client().unwrap(), None, server.url());
        let jobs = source.fetch(&filters()).await.unwrap();

        assert!(jobs.is_empty());
        mock.assert_async().await;
    }
}
