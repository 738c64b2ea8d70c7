//! Error types for the job watcher.
//!
//! This module provides structured error handling with:
//! - `AppError`: Domain-specific errors for application operations
//! - `Result<T>`: Type alias for Results using AppError

use thiserror::Error;

// ============================================================================
// DOMAIN ERROR TYPE
// ============================================================================

/// Domain-specific errors for application operations.
#[derive(Debug, Error)]
pub enum AppError {
    /// Invalid or malformed URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Network request failed
    #[error("Network error: {0}")]
    NetworkError(String),

    /// Failed to parse a source payload (HTML, XML, JSON)
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Seen-job store read/write failed
    #[error("Storage error: {0}")]
    StorageError(String),

    /// Message could not be delivered to the channel
    #[error("Delivery error: {0}")]
    DeliveryError(String),

    /// The destination channel is not configured or cannot be resolved
    #[error("Notification channel is not configured")]
    ChannelUnresolved,

    /// A filter dimension or value was rejected
    #[error("Invalid filter: {0}")]
    InvalidFilter(String),

    /// Generic error with context
    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

impl AppError {
    /// Create a network error
    pub fn network(msg: impl Into<String>) -> Self {
        Self::NetworkError(msg.into())
    }

    /// Create a parse error
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::ParseError(msg.into())
    }

    /// Create a storage error
    pub fn storage(msg: impl Into<String>) -> Self {
        Self::StorageError(msg.into())
    }

    /// Create a delivery error
    pub fn delivery(msg: impl Into<String>) -> Self {
        Self::DeliveryError(msg.into())
    }

    /// Create a filter validation error
    pub fn filter(msg: impl Into<String>) -> Self {
        Self::InvalidFilter(msg.into())
    }
}

/// Result type alias using AppError.
pub type Result<T> = std::result::Result<T, AppError>;
