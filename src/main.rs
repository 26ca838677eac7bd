//! # Investing News
//!
//! Crawls the investing.com latest-news listing, follows every article link
//! it has not seen before, and keeps the extracted articles in a single JSON
//! corpus file.
//!
//! ## Usage
//!
//! ```sh
//! investing_news            # scrape into ./news_data.json
//! investing_news --debug    # also trace every extraction decision
//! INVESTING_NEWS_CONFIG=scraper.yaml investing_news
//! ```
//!
//! ## Architecture
//!
//! A run is one sequential pipeline:
//! 1. **Loading**: read the existing corpus and index its URLs
//! 2. **Indexing**: fetch the listing page and collect article links
//! 3. **Extraction**: fetch each unseen article and pull out headline,
//!    category and body through fallback strategies
//! 4. **Persistence**: checkpoint every few articles, save once more at the end
//!
//! The process exits non-zero only when the run cannot start (bad config,
//! listing page unreachable) or the final save fails. Individual article
//! failures are logged and skipped.

use std::error::Error;
use std::path::PathBuf;

use clap::Parser;
use tracing::{debug, error, info, instrument};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod cli;
mod config;
mod error;
mod http;
mod models;
mod outputs;
mod pipeline;
mod scrapers;
mod utils;

use cli::Cli;
use config::{CONFIG_ENV, Config};
use http::HttpFetcher;
use outputs::json::CorpusStore;
use pipeline::Pipeline;
use scrapers::article::ArticleExtractor;

#[tokio::main]
#[instrument]
async fn main() -> Result<(), Box<dyn Error>> {
    // Parse CLI first: --debug changes the default log level
    let args = Cli::parse();

    // --- Tracing init ---
    let default_level = if args.debug { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("investing_news starting up");
    debug!(?args, "Parsed CLI arguments");

    let config_path = std::env::var_os(CONFIG_ENV).map(PathBuf::from);
    let config = Config::load(config_path.as_deref()).map_err(|e| {
        error!(error = %e, "Unusable configuration");
        e
    })?;

    let fetcher = HttpFetcher::new(&config)?;
    let store = CorpusStore::new(&config.output_path);
    info!(path = %store.path().display(), "Using corpus file");

    let pipeline = Pipeline::new(fetcher, store, ArticleExtractor::new(args.debug), &config);
    let summary = pipeline.run().await?;

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        existing = summary.existing,
        candidates = summary.candidates,
        new_articles = summary.added,
        skipped = summary.skipped,
        failed = summary.failed,
        total = summary.total,
        "Execution complete"
    );
    Ok(())
}
