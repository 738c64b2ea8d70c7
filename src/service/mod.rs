//! Core services: aggregation, delivery and scheduling.

pub mod aggregator;
pub mod http;
pub mod notifier;
pub mod scheduler;
pub mod sink;

pub use aggregator::Aggregator;
pub use notifier::{DeliveryReport, Notifier};
pub use scheduler::{CheckOutcome, Scheduler};
pub use sink::{ConsoleSink, MessageSink, WebhookSink};
