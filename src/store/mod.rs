//! Local persistence for mirrored resources
//!
//! This module maps URLs onto sanitized relative filesystem paths and writes
//! fetched bytes beneath the output root.

mod path;
mod writer;

pub use path::map_url;
pub use writer::persist;

use std::path::PathBuf;
use url::Url;

/// One successfully persisted resource
///
/// Created once per write; the terminal crawl report is the full collection
/// of these records.
#[derive(Debug, Clone)]
pub struct DownloadedRecord {
    /// The URL the resource was fetched from
    pub url: Url,

    /// The path it was written to, relative to the output root
    pub relative_path: PathBuf,
}
