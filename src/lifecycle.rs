//! Process wiring: logging setup and component construction.

use std::sync::Arc;

use anyhow::Result;
use tokio::sync::RwLock;

use crate::commands::CommandContext;
use crate::config::AppConfig;
use crate::repository::SeenJobStore;
use crate::service::http;
use crate::service::{Aggregator, ConsoleSink, MessageSink, Notifier, Scheduler, WebhookSink};
use crate::source::{
    ApiSource, FallbackSource, FeedSource, ScrapeSource, SourceAdapter, SyntheticSource,
};

/// Initialize logging with tracing_subscriber. `log::` records from the
/// rest of the crate are bridged in through the tracing-log feature.
pub fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("jobwatch=debug".parse().unwrap())
                .add_directive("hyper=warn".parse().unwrap())
                .add_directive("info".parse().unwrap()),
        )
        .compact()
        .with_target(false)
        .with_ansi(true)
        .init();
}

pub struct App {
    pub scheduler: Arc<Scheduler>,
    pub ctx: CommandContext,
}

/// Wire every component from configuration. Sources are registered in
/// fallback-priority order, most reliable first.
pub fn build(config: AppConfig) -> Result<App> {
    let store = Arc::new(SeenJobStore::load(&config.data_file));
    let client = http::create_client()?;

    let adapters: Vec<Arc<dyn SourceAdapter>> = vec![
        Arc::new(ApiSource::new(client.clone(), config.api_key.clone())),
        Arc::new(FeedSource::new(client.clone(), config.feeds.clone())),
        Arc::new(ScrapeSource::new(client.clone())),
        Arc::new(FallbackSource),
        Arc::new(SyntheticSource),
    ];

    let sink: Arc<dyn MessageSink> = match &config.webhook_url {
        Some(url) => {
            log::info!("Delivering notifications via webhook");
            Arc::new(WebhookSink::new(client, url.clone()))
        }
        None => {
            log::warn!("WEBHOOK_URL not set; notifications go to the console");
            Arc::new(ConsoleSink)
        }
    };

    let aggregator = Aggregator::new(adapters, config.merge_strategy, store.clone());
    let notifier = Notifier::new(sink.clone(), store.clone());
    let filters = Arc::new(RwLock::new(config.filters));

    let scheduler = Arc::new(Scheduler::new(
        aggregator,
        notifier,
        sink,
        filters.clone(),
    ));

    Ok(App {
        scheduler: scheduler.clone(),
        ctx: CommandContext {
            filters,
            store,
            scheduler,
        },
    })
}
