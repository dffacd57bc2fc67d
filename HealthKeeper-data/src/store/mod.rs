//! Store module for the HealthKeeper application
//!
//! Everything needed to reach the hosted table store: the configuration read
//! at startup and the HTTP handle built from it.

use thiserror::Error;

pub mod client;
pub mod config;

pub use client::StoreClient;
pub use config::StoreConfig;

/// Configuration error
///
/// Raised while reading store credentials or building the store handle. The
/// application cannot serve anything without a store, so callers treat this
/// as fatal.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Required environment variable missing or blank
    #[error("Environment variable not found: {0}")]
    EnvVarNotFound(String),

    /// Store URL could not be parsed
    #[error("Invalid store URL {url}: {reason}")]
    InvalidUrl { url: String, reason: String },

    /// Service key cannot be sent as an HTTP header
    #[error("Store key contains characters that are not allowed in a header")]
    InvalidKey,

    /// Numeric setting could not be parsed
    #[error("Invalid value for {name}: {value}")]
    InvalidSetting { name: String, value: String },

    /// HTTP client could not be built
    #[error("Failed to build store client: {0}")]
    Client(#[from] reqwest::Error),
}
