use anyhow::{Context, Result};
use reqwest::Client;
use std::time::Duration;

/// Browser-style User-Agent sent on every fetch; several boards return a
/// stripped page to unknown clients.
pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// Shared HTTP client for every source adapter and the webhook sink.
pub fn create_client() -> Result<Client> {
    Client::builder()
        .timeout(Duration::from_secs(30))
        .user_agent(USER_AGENT)
        .build()
        .context("Failed to build HTTP client")
}
