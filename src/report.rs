//! Terminal crawl report
//!
//! The end product of a run: which resources were persisted and where. When
//! nothing at all was downloaded, a fixed diagnostic list of likely causes is
//! printed instead of a bare zero.

use crate::store::DownloadedRecord;
use std::time::Duration;

/// Likely causes shown when a crawl ends with zero downloads
pub const EMPTY_RESULT_HINTS: [&str; 4] = [
    "the site has anti-crawling defenses",
    "the content requires authentication",
    "the network connection failed",
    "the site is temporarily unavailable",
];

/// Summary of one completed crawl run
#[derive(Debug)]
pub struct CrawlReport {
    /// The domain the crawl was confined to
    pub scope: String,

    /// Every persisted resource, in no particular order
    pub records: Vec<DownloadedRecord>,

    /// Wall-clock duration of the run
    pub elapsed: Duration,
}

impl CrawlReport {
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Prints the report to stdout
pub fn print_summary(report: &CrawlReport) {
    println!("\nDownload complete. Saved files:");
    for record in &report.records {
        println!("  {}", record.relative_path.display());
    }

    println!(
        "\n{} file(s) saved from {} in {:.1}s",
        report.records.len(),
        report.scope,
        report.elapsed.as_secs_f64()
    );

    if report.is_empty() {
        println!("\nNo files could be downloaded. Possible causes:");
        for (index, hint) in EMPTY_RESULT_HINTS.iter().enumerate() {
            println!("  {}. {}", index + 1, hint);
        }
    }
}
