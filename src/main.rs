//! Sitemirror main entry point
//!
//! Command-line interface for the scoped site-mirroring engine.

use clap::Parser;
use sitemirror::config::CrawlConfig;
use sitemirror::crawler::crawl;
use sitemirror::report::print_summary;
use std::io::Write;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Sitemirror: mirror a website into a local directory
///
/// Given a seed URL, sitemirror fetches every reachable resource on the
/// seed's domain and writes each one to a path derived from its URL. Links
/// pointing outside the seed's domain are never followed.
#[derive(Parser, Debug)]
#[command(name = "sitemirror")]
#[command(version = "1.0.0")]
#[command(about = "Mirror a website into a local directory", long_about = None)]
struct Cli {
    /// Target address; prompted for interactively when omitted.
    /// A bare address like example.com is coerced to https://example.com
    #[arg(value_name = "URL")]
    url: Option<String>,

    /// Directory the mirrored site is written into
    #[arg(short, long, default_value = "output")]
    output: PathBuf,

    /// Number of concurrent crawl workers
    #[arg(short, long, default_value_t = 3)]
    workers: usize,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let seed = match cli.url {
        Some(url) => url,
        None => prompt_for_url()?,
    };

    let config = CrawlConfig {
        workers: cli.workers,
        output_root: cli.output,
        ..Default::default()
    };

    let report = crawl(&seed, config).await?;
    print_summary(&report);

    Ok(())
}

/// Reads the target address from stdin when none was passed on the CLI
fn prompt_for_url() -> anyhow::Result<String> {
    print!("Enter target URL: ");
    std::io::stdout().flush()?;

    let mut line = String::new();
    std::io::stdin().read_line(&mut line)?;

    let trimmed = line.trim().to_string();
    if trimmed.is_empty() {
        anyhow::bail!("no target URL provided");
    }

    Ok(trimmed)
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("sitemirror=info,warn"),
            1 => EnvFilter::new("sitemirror=debug,info"),
            2 => EnvFilter::new("sitemirror=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}
