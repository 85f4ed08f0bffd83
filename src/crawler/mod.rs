//! Crawler module: the concurrent crawl engine
//!
//! This module contains the core crawling logic, including:
//! - The frontier (dedup-guaranteed work queue with completion detection)
//! - HTTP fetching with retry, backoff, and jitter
//! - Candidate link extraction
//! - The worker processing cycle
//! - Overall crawl coordination

mod coordinator;
mod extract;
mod fetcher;
mod frontier;
mod worker;

pub use coordinator::Coordinator;
pub use extract::{HtmlLinkExtractor, LinkExtractor};
pub use fetcher::{
    build_http_client, AttemptOutcome, FetchFailure, Fetcher, HttpTransport, RetryDecision,
    RetryPolicy, Transport, TransportError, TransportResponse,
};
pub use frontier::Frontier;

use crate::config::CrawlConfig;
use crate::report::CrawlReport;
use crate::Result;

/// Runs a complete crawl of the seed's domain
///
/// This is the main entry point for starting a crawl. It will:
/// 1. Clean the seed address and derive the crawl scope from it
/// 2. Create the output root directory
/// 3. Seed the frontier and launch the worker pool
/// 4. Wait until no scoped work remains anywhere
/// 5. Return the report of persisted resources
///
/// # Arguments
///
/// * `seed` - The target address (bare addresses are coerced to `https`)
/// * `config` - The crawl configuration
///
/// # Returns
///
/// * `Ok(CrawlReport)` - Crawl completed; possibly with zero records
/// * `Err(MirrorError)` - Setup failed before any crawling happened
pub async fn crawl(seed: &str, config: CrawlConfig) -> Result<CrawlReport> {
    Coordinator::new(seed, config)?.run().await
}
