//! The scrape run: listing → dedup → fetch → extract → persist.
//!
//! A run is strictly sequential. Candidates are visited in listing order and
//! each one ends in exactly one of three ways:
//!
//! - **skipped**: its URL is already in the corpus, nothing is fetched
//! - **added**: fetched and extracted, appended to the corpus
//! - **failed**: the fetch failed; logged and left for a later run
//!
//! The corpus is saved after every `checkpoint_every` additions and once
//! more when the listing is exhausted, so an interrupted run loses at most
//! the articles added since the last checkpoint.

use std::collections::HashSet;
use std::time::Duration;

use tokio::time::sleep;
use tracing::{debug, error, info, instrument, warn};
use url::Url;

use crate::config::Config;
use crate::error::PipelineError;
use crate::http::PageFetcher;
use crate::models::ArticleRecord;
use crate::outputs::json::CorpusStore;
use crate::scrapers::article::ArticleExtractor;
use crate::scrapers::listing::parse_listing;

/// URLs already present in the corpus. Only grows during a run.
#[derive(Debug, Default)]
pub struct DedupIndex {
    urls: HashSet<String>,
}

impl DedupIndex {
    pub fn from_records(records: &[ArticleRecord]) -> Self {
        Self {
            urls: records.iter().map(|r| r.url.clone()).collect(),
        }
    }

    pub fn contains(&self, url: &str) -> bool {
        self.urls.contains(url)
    }

    pub fn insert(&mut self, url: String) {
        self.urls.insert(url);
    }

    pub fn len(&self) -> usize {
        self.urls.len()
    }
}

/// Counters reported at the end of a run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    /// Records in the corpus before the run.
    pub existing: usize,
    /// Candidates found on the listing page.
    pub candidates: usize,
    pub skipped: usize,
    pub added: usize,
    pub failed: usize,
    /// Records in the corpus after the run.
    pub total: usize,
}

pub struct Pipeline<F> {
    fetcher: F,
    store: CorpusStore,
    extractor: ArticleExtractor,
    listing_url: String,
    base_url: Url,
    checkpoint_every: usize,
    request_delay: Duration,
}

impl<F: PageFetcher> Pipeline<F> {
    pub fn new(
        fetcher: F,
        store: CorpusStore,
        extractor: ArticleExtractor,
        config: &Config,
    ) -> Self {
        Self {
            fetcher,
            store,
            extractor,
            listing_url: config.listing_url.clone(),
            base_url: config.base_url.clone(),
            checkpoint_every: config.checkpoint_every.max(1),
            request_delay: config.request_delay(),
        }
    }

    /// Execute one full run.
    ///
    /// Loads the corpus, fetches the listing once, then visits every
    /// candidate in order. Every fetch, failed or not, is followed by a pause of
    /// `request_delay` unless it was the last candidate. Skipped candidates
    /// send no request and are not followed by a pause.
    ///
    /// # Returns
    ///
    /// A [`RunSummary`] with the counters of this run.
    ///
    /// # Errors
    ///
    /// - [`PipelineError::Listing`] if the listing page cannot be fetched;
    ///   the corpus file is not touched.
    /// - [`PipelineError::Save`] if the final save fails. Failed checkpoints
    ///   are logged and do not end the run.
    #[instrument(level = "info", skip_all, fields(listing = %self.listing_url))]
    pub async fn run(&self) -> Result<RunSummary, PipelineError> {
        let mut corpus = self.store.load().await;
        let mut seen = DedupIndex::from_records(&corpus);
        let mut summary = RunSummary {
            existing: corpus.len(),
            ..RunSummary::default()
        };
        info!(existing = corpus.len(), unique_urls = seen.len(), "Found existing articles");

        let listing = self.fetcher.fetch(&self.listing_url).await.map_err(|e| {
            error!(error = %e, "Could not fetch listing page");
            PipelineError::Listing(e)
        })?;
        let candidates = parse_listing(&listing, &self.base_url);
        summary.candidates = candidates.len();

        for (i, candidate) in candidates.iter().enumerate() {
            if seen.contains(&candidate.url) {
                debug!(url = %candidate.url, "Already scraped; skipping");
                summary.skipped += 1;
                continue;
            }

            match self.fetcher.fetch(&candidate.url).await {
                Ok(html) => {
                    let record = self.extractor.extract(&html, &candidate.url);
                    summary.added += 1;
                    info!(
                        n = summary.added,
                        headline = %record.headline,
                        category = %record.category,
                        listing_title = %candidate.title,
                        "Scraped article"
                    );
                    seen.insert(record.url.clone());
                    corpus.push(record);

                    if summary.added % self.checkpoint_every == 0 {
                        match self.store.save(&corpus).await {
                            Ok(()) => info!(added = summary.added, "Intermediate save"),
                            Err(e) => error!(
                                added = summary.added,
                                error = %e,
                                "Checkpoint failed; continuing with corpus in memory"
                            ),
                        }
                    }
                }
                Err(e) => {
                    summary.failed += 1;
                    warn!(url = %candidate.url, error = %e, "Failed to retrieve article; skipping");
                }
            }

            if i + 1 < candidates.len() {
                sleep(self.request_delay).await;
            }
        }

        self.store.save(&corpus).await.map_err(|e| {
            error!(error = %e, "Final save failed");
            PipelineError::Save(e)
        })?;

        summary.total = corpus.len();
        info!(
            added = summary.added,
            skipped = summary.skipped,
            failed = summary.failed,
            total = summary.total,
            "Completed"
        );
        Ok(summary)
    }
}
