//! Sitemirror: a scoped site-mirroring engine
//!
//! This crate implements a concurrent crawler that, given a seed URL, fetches
//! every reachable resource on the seed's domain and persists each one to a
//! local path derived from its URL. Discovered links outside the seed's
//! domain are never followed.

pub mod config;
pub mod crawler;
pub mod report;
pub mod store;
pub mod url;

use thiserror::Error;

/// Main error type for sitemirror operations
#[derive(Debug, Error)]
pub enum MirrorError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("URL error: {0}")]
    Url(#[from] UrlError),

    #[error("HTTP client error: {0}")]
    Client(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Worker task failed: {0}")]
    WorkerPanic(String),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Validation error: {0}")]
    Validation(String),
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Unsupported URL scheme: {0}")]
    UnsupportedScheme(String),

    #[error("Missing host in URL: {0}")]
    MissingHost(String),
}

/// Result type alias for sitemirror operations
pub type Result<T> = std::result::Result<T, MirrorError>;

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

// Re-export commonly used types
pub use config::CrawlConfig;
pub use report::CrawlReport;
pub use store::DownloadedRecord;
pub use url::{clean_seed_url, resolve_candidate, Scope};
