//! Crawl orchestration
//!
//! The coordinator cleans the seed, derives the scope, creates the output
//! root, admits the seed into the frontier, runs the worker pool, and merges
//! the workers' records into the final report.

use crate::config::CrawlConfig;
use crate::crawler::extract::HtmlLinkExtractor;
use crate::crawler::fetcher::{build_http_client, Fetcher, HttpTransport, RetryPolicy, Transport};
use crate::crawler::frontier::Frontier;
use crate::crawler::worker::{run_worker, CrawlContext};
use crate::report::CrawlReport;
use crate::url::{clean_seed_url, Scope};
use crate::{MirrorError, Result};
use std::sync::Arc;
use std::time::Instant;
use url::Url;

/// Main crawl coordinator
pub struct Coordinator {
    config: CrawlConfig,
    seed: Url,
    scope: Scope,
}

impl Coordinator {
    /// Creates a coordinator for one crawl run
    ///
    /// # Arguments
    ///
    /// * `seed` - The target address as supplied by the operator; cleaned and
    ///   scheme-normalized here
    /// * `config` - The crawl configuration; validated here
    ///
    /// # Returns
    ///
    /// * `Ok(Coordinator)` - Ready to run
    /// * `Err(MirrorError)` - Bad configuration or unusable seed
    pub fn new(seed: &str, config: CrawlConfig) -> Result<Self> {
        config.validate()?;

        let seed = clean_seed_url(seed)?;
        let scope = Scope::from_seed(&seed)?;

        Ok(Self {
            config,
            seed,
            scope,
        })
    }

    /// Runs the crawl to completion
    ///
    /// Spawns the fixed-size worker pool, waits for every worker to observe
    /// global completion, and assembles the report. The pool is deliberately
    /// small by default to bound concurrent load on the target host.
    pub async fn run(self) -> Result<CrawlReport> {
        let started = Instant::now();
        tracing::info!(
            seed = %self.seed,
            scope = %self.scope.domain(),
            workers = self.config.workers,
            "starting crawl"
        );

        tokio::fs::create_dir_all(&self.config.output_root).await?;

        let client = build_http_client(self.config.request_timeout)?;
        let transport: Arc<dyn Transport> = Arc::new(HttpTransport::new(client));
        let policy = RetryPolicy {
            max_attempts: self.config.max_attempts,
            backoff_unit: self.config.backoff_unit,
        };
        let fetcher = Fetcher::new(
            transport,
            policy,
            self.config.jitter_min,
            self.config.jitter_max,
        );

        let ctx = Arc::new(CrawlContext {
            frontier: Frontier::new(),
            fetcher,
            extractor: Box::new(HtmlLinkExtractor),
            scope: self.scope.clone(),
            output_root: self.config.output_root.clone(),
        });

        // The seed is admitted exactly once, before any worker starts.
        ctx.frontier.try_admit(&self.seed);

        // Operator abort: stop admission and let in-flight fetches drain.
        let abort_ctx = Arc::clone(&ctx);
        let abort_listener = tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                tracing::warn!("interrupt received, closing the frontier");
                abort_ctx.frontier.close();
            }
        });

        let mut handles = Vec::with_capacity(self.config.workers);
        for worker_id in 0..self.config.workers {
            tracing::debug!(worker_id, "spawning worker");
            handles.push(tokio::spawn(run_worker(worker_id, Arc::clone(&ctx))));
        }

        let mut records = Vec::new();
        for handle in handles {
            let worker_records = handle
                .await
                .map_err(|e| MirrorError::WorkerPanic(e.to_string()))?;
            records.extend(worker_records);
        }

        abort_listener.abort();

        let elapsed = started.elapsed();
        tracing::info!(
            downloaded = records.len(),
            visited = ctx.frontier.visited_count(),
            ?elapsed,
            "crawl complete"
        );

        Ok(CrawlReport {
            scope: self.scope.domain().to_string(),
            records,
            elapsed,
        })
    }
}
