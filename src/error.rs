//! Error types for fetching, persistence, configuration and the run itself.
//!
//! Extraction never fails: a missing element degrades to a fallback value or
//! a sentinel, so there is no extraction error here.

use std::path::PathBuf;

use thiserror::Error;

/// A page could not be retrieved.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Transport-level failure (DNS, connect, TLS, timeout, body read).
    #[error("network error fetching {url}: {source}")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The server answered with a non-success status.
    #[error("HTTP {status} fetching {url}")]
    Status { url: String, status: u16 },
}

/// The corpus file could not be written.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error writing {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize corpus: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// The configuration file could not be used.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {path}: {reason}")]
    Parse { path: PathBuf, reason: String },
}

/// Conditions that end a pipeline run early or unsuccessfully.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The listing page could not be fetched; nothing was processed.
    #[error("could not fetch listing page: {0}")]
    Listing(#[source] FetchError),

    /// The final save failed; the checkpoints written earlier remain on disk.
    #[error("final save failed: {0}")]
    Save(#[source] StoreError),
}
