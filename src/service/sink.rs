//! Delivery seam: where notifications leave the process.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::json;
use url::Url;

use crate::domain::models::Job;
use crate::error::{AppError, Result};

/// Accent color of the outbound embeds.
const EMBED_COLOR: u32 = 0x0077B5;

/// The "send message" capability consumed by the notifier. The scheduler
/// asks `is_ready` before starting a cycle and aborts without side effects
/// when the destination cannot be resolved.
#[async_trait]
pub trait MessageSink: Send + Sync {
    fn is_ready(&self) -> bool;

    /// Deliver one job notification. Failures map to
    /// [`AppError::DeliveryError`].
    async fn send(&self, job: &Job) -> Result<()>;
}

/// Posts Discord-compatible embeds to a configured webhook.
pub struct WebhookSink {
    client: Client,
    webhook_url: String,
}

impl WebhookSink {
    pub fn new(client: Client, webhook_url: String) -> Self {
        Self {
            client,
            webhook_url,
        }
    }
}

#[async_trait]
impl MessageSink for WebhookSink {
    fn is_ready(&self) -> bool {
        Url::parse(&self.webhook_url).is_ok()
    }

    async fn send(&self, job: &Job) -> Result<()> {
        let payload = json!({
            "embeds": [{
                "title": job.title,
                "description": job.render_body(),
                "url": job.display_link(),
                "color": EMBED_COLOR,
                "footer": { "text": "Job Watch" },
            }]
        });

        let response = self
            .client
            .post(&self.webhook_url)
            .json(&payload)
            .send()
            .await
            .map_err(|e| AppError::delivery(e.to_string()))?;

        if let Err(e) = response.error_for_status() {
            return Err(AppError::delivery(e.to_string()));
        }
        Ok(())
    }
}

/// Local stand-in that writes notifications to the log. Used when no
/// webhook is configured.
pub struct ConsoleSink;

#[async_trait]
impl MessageSink for ConsoleSink {
    fn is_ready(&self) -> bool {
        true
    }

    async fn send(&self, job: &Job) -> Result<()> {
        log::info!(
            "NEW JOB: {} | {} | {} | {}",
            job.title,
            job.company,
            job.location,
            job.display_link()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::SourceKind;
    use crate::service::http::create_client;
    use mockito::Server;

    fn job() -> Job {
        Job {
            id: "feed-1".to_string(),
            title: "Rust Engineer".to_string(),
            company: "Acme".to_string(),
            location: "Remote".to_string(),
            link: Some("https://example.com/jobs/1".to_string()),
            posted_time: Some("1 day ago".to_string()),
            source: SourceKind::Feed,
            description: None,
        }
    }

    #[tokio::test]
    async fn posts_an_embed_payload() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/hook")
            .match_header("content-type", "application/json")
            .with_status(204)
            .create_async()
            .await;

        let sink = WebhookSink::new(create_client().unwrap(), format!("{}/hook", server.url()));
        assert!(sink.is_ready());
        sink.send(&job()).await.unwrap();
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn rejected_post_is_a_delivery_error() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("POST", "/hook")
            .with_status(404)
            .create_async()
            .await;

        let sink = WebhookSink::new(create_client().unwrap(), format!("{}/hook", server.url()));
        let err = sink.send(&job()).await.unwrap_err();
        assert!(matches!(err, AppError::DeliveryError(_)));
    }

    #[test]
    fn malformed_webhook_url_is_not_ready() {
        let sink = WebhookSink::new(create_client().unwrap(), "not a url".to_string());
        assert!(!sink.is_ready());
    }
}
