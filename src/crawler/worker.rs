//! Crawl worker: the dequeue / fetch / persist / extract cycle
//!
//! Each worker loops until the frontier reports global completion. Any
//! failure along the way (fetch, write, a single bad link) is logged and
//! recovered locally; nothing a worker encounters ends the run.

use crate::crawler::extract::LinkExtractor;
use crate::crawler::fetcher::Fetcher;
use crate::crawler::frontier::Frontier;
use crate::store::{self, DownloadedRecord};
use crate::url::{resolve_candidate, Scope};
use std::path::PathBuf;
use std::sync::Arc;
use url::Url;

/// Everything a worker shares with its peers
pub(crate) struct CrawlContext {
    pub frontier: Frontier,
    pub fetcher: Fetcher,
    pub extractor: Box<dyn LinkExtractor>,
    pub scope: Scope,
    pub output_root: PathBuf,
}

/// Runs one worker to completion and returns the resources it persisted
pub(crate) async fn run_worker(worker_id: usize, ctx: Arc<CrawlContext>) -> Vec<DownloadedRecord> {
    let mut records = Vec::new();

    while let Some(url) = ctx.frontier.next().await {
        tracing::info!(worker_id, %url, "processing");

        if let Some(record) = process_url(&ctx, &url).await {
            records.push(record);
        }

        // The cycle for this URL is over, extraction included; this is what
        // lets the last idle worker observe completion.
        ctx.frontier.complete();
    }

    tracing::debug!(worker_id, "no work remains, exiting");
    records
}

/// Processes one URL: fetch, persist, then discover links on success
async fn process_url(ctx: &CrawlContext, url: &Url) -> Option<DownloadedRecord> {
    let body = match ctx.fetcher.fetch(url).await {
        Ok(body) => body,
        Err(failure) => {
            tracing::warn!(%url, %failure, "fetch failed");
            return None;
        }
    };

    let relative = store::map_url(url);
    match store::persist(&ctx.output_root, &relative, &body).await {
        Ok(_) => {
            tracing::info!(%url, path = %relative.display(), "saved");
        }
        Err(error) => {
            // Fatal for this one resource only; its links are not followed
            // since the page was never persisted.
            tracing::error!(%url, %error, "failed to write resource");
            return None;
        }
    }

    discover_links(ctx, url, &body);

    Some(DownloadedRecord {
        url: url.clone(),
        relative_path: relative,
    })
}

/// Resolves, scope-filters, and admits every candidate found on a page
///
/// One bad candidate never aborts the batch.
fn discover_links(ctx: &CrawlContext, base: &Url, body: &[u8]) {
    for raw in ctx.extractor.extract(body, base) {
        match resolve_candidate(base, &raw) {
            Ok(candidate) => {
                if ctx.scope.in_scope(&candidate) && ctx.frontier.try_admit(&candidate) {
                    tracing::debug!(%candidate, "admitted");
                }
            }
            Err(error) => {
                tracing::debug!(candidate = %raw, %error, "skipping unresolvable link");
            }
        }
    }
}
