//! RSS/XML feed source polling one or more configured origins.

use async_trait::async_trait;
use reqwest::Client;

use crate::config::FilterConfig;
use crate::domain::models::{Job, SourceKind};
use crate::domain::normalizer::{normalize, RawJob};
use crate::error::Result;
use crate::extractor::feed::{extract_items, FeedItem};
use crate::source::SourceAdapter;

pub struct FeedSource {
    client: Client,
    feeds: Vec<String>,
}

impl FeedSource {
    pub fn new(client: Client, feeds: Vec<String>) -> Self {
        Self { client, feeds }
    }

    /// Case-insensitive keyword gate: a candidate survives only when its
    /// title or description mentions the active keyword.
    fn matches_keyword(item: &FeedItem, keyword: &str) -> bool {
        let keyword = keyword.to_lowercase();
        if keyword.is_empty() {
            return true;
        }
        item.title.to_lowercase().contains(&keyword)
            || item
                .description
                .as_deref()
                .map(|d| d.to_lowercase().contains(&keyword))
                .unwrap_or(false)
    }

    fn to_job(item: FeedItem) -> Option<Job> {
        // Feed titles commonly read "Role at Company"; split when possible,
        // otherwise attribute the posting to the feed itself.
        let (title, company) = match item.title.split_once(" at ") {
            Some((role, company)) => (role.to_string(), company.to_string()),
            None => (item.title.clone(), "Various".to_string()),
        };

        normalize(
            RawJob {
                native_id: item.guid.clone().or_else(|| item.link.clone()),
                title,
                company,
                location: None,
                link: item.link,
                posted_time: item.pub_date,
                description: item.description,
            },
            SourceKind::Feed,
        )
    }

    async fn poll_feed(&self, url: &str, keyword: &str) -> anyhow::Result<Vec<Job>> {
        let response = self.client.get(url).send().await?.error_for_status()?;
        let body = response.text().await?;

        let jobs = extract_items(&body)
            .into_iter()
            .filter(|item| Self::matches_keyword(item, keyword))
            .filter_map(Self::to_job)
            .collect();
        Ok(jobs)
    }
}

#[async_trait]
impl SourceAdapter for FeedSource {
    fn kind(&self) -> SourceKind {
        SourceKind::Feed
    }

    fn describe(&self) -> &'static str {
        "RSS job feeds, filtered by the active keyword"
    }

    async fn fetch(&self, filters: &FilterConfig) -> Result<Vec<Job>> {
        let mut jobs = Vec::new();
        for url in &self.feeds {
            match self.poll_feed(url, &filters.keyword).await {
                Ok(mut batch) => {
                    log::debug!("Feed {} returned {} matching items", url, batch.len());
                    jobs.append(&mut batch);
                }
                Err(e) => log::warn!("Feed {} failed: {:#}", url, e),
            }
        }
        Ok(jobs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::http::create_client;
    use mockito::Server;

    fn filters_with_keyword(keyword: &str) -> FilterConfig {
        FilterConfig {
            keyword: keyword.to_string(),
            ..FilterConfig::default()
        }
    }

    const FEED: &str = r#"<rss><channel>
<item>
  <title>Rust Engineer at Acme</title>
  <link>https://example.com/jobs/1</link>
  <guid>wwr-1</guid>
  <description>Distributed systems work</description>
</item>
<item>
  <title>Gardener at GreenCo</title>
  <link>https://example.com/jobs/2</link>
  <guid>wwr-2</guid>
  <description>Tend the lawns</description>
</item>
<item>
  <title>Platform Lead at Beta</title>
  <link>https://example.com/jobs/3</link>
  <guid>wwr-3</guid>
  <description>Grow our RUST platform team</description>
</item>
</channel></rss>"#;

    #[tokio::test]
    async fn keyword_filter_is_case_insensitive_over_title_and_description() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("GET", "/feed.rss")
            .with_status(200)
            .with_body(FEED)
            .create_async()
            .await;

        let source = FeedSource::new(
            create_client().unwrap(),
            vec![format!("{}/feed.rss", server.url())],
        );
        let jobs = source.fetch(&filters_with_keyword("rust")).await.unwrap();

        // "Rust Engineer" matches in the title, "RUST platform" in the
        // description; the gardener matches nowhere.
        assert_eq!(jobs.len(), 2);
        assert_eq!(jobs[0].id, "feed-wwr-1");
        assert_eq!(jobs[0].title, "Rust Engineer");
        assert_eq!(jobs[0].company, "Acme");
        assert_eq!(jobs[1].id, "feed-wwr-3");
    }

    #[tokio::test]
    async fn merges_multiple_origins_and_survives_a_dead_one() {
        let mut server = Server::new_async().await;
        let _ok = server
            .mock("GET", "/a.rss")
            .with_status(200)
            .with_body(FEED)
            .create_async()
            .await;
        let _broken = server
            .mock("GET", "/b.rss")
            .with_status(503)
            .create_async()
            .await;

        let source = FeedSource::new(
            create_client().unwrap(),
            vec![
                format!("{}/a.rss", server.url()),
                format!("{}/b.rss", server.url()),
            ],
        );
        let jobs = source.fetch(&filters_with_keyword("engineer")).await.unwrap();
        assert_eq!(jobs.len(), 1);
    }

    #[tokio::test]
    async fn malformed_payload_yields_empty_batch() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("GET", "/feed.rss")
            .with_status(200)
            .with_body("this is not xml at all")
            .create_async()
            .await;

        let source = FeedSource::new(
            create_client().unwrap(),
            vec![format!("{}/feed.rss", server.url())],
        );
        let jobs = source.fetch(&filters_with_keyword("rust")).await.unwrap();
        assert!(jobs.is_empty());
    }

    #[test]
    fn feed_title_without_company_is_attributed_to_various() {
        let item = FeedItem {
            title: "Senior Backend Engineer".to_string(),
            guid: Some("x-1".to_string()),
            ..FeedItem::default()
        };
        let job = FeedSource::to_job(item).unwrap();
        assert_eq!(job.company, "Various");
    }
}
