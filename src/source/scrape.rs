//! HTML scrape of the public job-search page.

use async_trait::async_trait;
use reqwest::Client;
use url::Url;

use crate::config::FilterConfig;
use crate::domain::models::{Job, SourceKind};
use crate::domain::normalizer::{normalize, RawJob};
use crate::error::Result;
use crate::extractor::listing::ListingExtractor;
use crate::source::SourceAdapter;

const SEARCH_PAGE: &str = "https://www.linkedin.com/jobs/search/";

pub struct ScrapeSource {
    client: Client,
    base_url: String,
}

impl ScrapeSource {
    pub fn new(client: Client) -> Self {
        Self::with_base_url(client, SEARCH_PAGE.to_string())
    }

    /// Base-URL override for tests.
    pub fn with_base_url(client: Client, base_url: String) -> Self {
        Self { client, base_url }
    }

    /// Search URL for the active filters; newest postings first.
    fn build_search_url(&self, filters: &FilterConfig) -> anyhow::Result<Url> {
        let mut url = Url::parse(&self.base_url)?;
        {
            let mut query = url.query_pairs_mut();
            query.append_pair("keywords", &filters.keyword);
            query.append_pair("location", &filters.location);
            if let Some(code) = filters.experience.query_code() {
                query.append_pair("f_E", code);
            }
            if let Some(code) = filters.job_type.query_code() {
                query.append_pair("f_JT", code);
            }
            if let Some(code) = filters.date_range.query_code() {
                query.append_pair("f_TPR", code);
            }
            if let Some(code) = filters.remote.query_code() {
                query.append_pair("f_WT", code);
            }
            query.append_pair("sortBy", "DD");
        }
        Ok(url)
    }

    async fn scrape(&self, filters: &FilterConfig) -> anyhow::Result<Vec<Job>> {
        let url = self.build_search_url(filters)?;
        log::debug!("Scraping job listings: {}", url);

        let response = self.client.get(url).send().await?.error_for_status()?;
        let body = response.text().await?;

        let jobs = ListingExtractor::extract_cards(&body)
            .into_iter()
            .filter_map(|card| {
                normalize(
                    RawJob {
                        native_id: card.id,
                        title: card.title.unwrap_or_default(),
                        company: card.company.unwrap_or_default(),
                        location: card.location,
                        link: card.link,
                        posted_time: card.posted_time,
                        description: None,
                    },
                    SourceKind::Scrape,
                )
            })
            .collect();
        Ok(jobs)
    }
}

#[async_trait]
impl SourceAdapter for ScrapeSource {
    fn kind(&self) -> SourceKind {
        SourceKind::Scrape
    }

    fn describe(&self) -> &'static str {
        "Public job-search page scrape"
    }

    async fn fetch(&self, filters: &FilterConfig) -> Result<Vec<Job>> {
        match self.scrape(filters).await {
            Ok(jobs) => {
                log::debug!("Scrape source returned {} candidates", jobs.len());
                Ok(jobs)
            }
            Err(e) => {
                log::warn!("Scrape source failed: {:#}", e);
                Ok(Vec::new())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DateRange, ExperienceLevel, JobType, RemotePreference};
    use crate::service::http::create_client;
    use mockito::Server;

    #[test]
    fn search_url_carries_every_active_filter_code() {
        let source = ScrapeSource::new(create_client().unwrap());
        let filters = FilterConfig {
            keyword: "software engineer".to_string(),
            location: "United States".to_string(),
            experience: ExperienceLevel::EntryLevel,
            job_type: JobType::FullTime,
            date_range: DateRange::PastDay,
            remote: RemotePreference::Remote,
            ..FilterConfig::default()
        };

        let url = source.build_search_url(&filters).unwrap().to_string();
        assert!(url.contains("keywords=software+engineer"));
        assert!(url.contains("f_E=2"));
        assert!(url.contains("f_JT=F"));
        assert!(url.contains("f_TPR=r86400"));
        assert!(url.contains("f_WT=2"));
        assert!(url.contains("sortBy=DD"));
    }

    #[test]
    fn inactive_filters_add_no_codes() {
        let source = ScrapeSource::new(create_client().unwrap());
        let url = source
            .build_search_url(&FilterConfig::default())
            .unwrap()
            .to_string();
        assert!(!url.contains("f_E="));
        assert!(!url.contains("f_JT="));
        assert!(!url.contains("f_TPR="));
        assert!(!url.contains("f_WT="));
    }

    #[tokio::test]
    async fn maps_cards_to_jobs() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("GET", mockito::Matcher::Any)
            .with_status(200)
            .with_body(
                r#"<html><body>
<div class="job-search-card" data-id="77001">
  <a class="base-card__full-link" href="https://example.com/view/77001"></a>
  <span class="base-search-card__title">Software Engineer</span>
  <span class="base-search-card__subtitle">Acme</span>
  <span class="job-search-card__location">Denver, CO</span>
</div></body></html>"#,
            )
            .create_async()
            .await;

        let source = ScrapeSource::with_base_url(create_client().unwrap(), server.url());
        let jobs = source.fetch(&FilterConfig::default()).await.unwrap();

        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0].id, "scrape-77001");
        assert_eq!(jobs[0].company, "Acme");
        assert_eq!(jobs[0].location, "Denver, CO");
    }

    #[tokio::test]
    async fn blocked_page_yields_empty_batch() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("GET", mockito::Matcher::Any)
            .with_status(429)
            .create_async()
            .await;

        let source = ScrapeSource::with_base_url(create_client().unwrap(), server.url());
        let jobs = source.fetch(&FilterConfig::default()).await.unwrap();
        assert!(jobs.is_empty());
    }
}
