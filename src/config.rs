//! Runtime configuration.
//!
//! Every field has a default, so the scraper runs without any configuration
//! file. When the `INVESTING_NEWS_CONFIG` environment variable names a YAML
//! file, values present in it override the defaults:
//!
//! ```yaml
//! output_path: /var/lib/investing/news_data.json
//! request_delay_ms: 3000
//! checkpoint_every: 10
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use tracing::{info, instrument};
use url::Url;

use crate::error::ConfigError;

/// Environment variable holding the path to an optional YAML config file.
pub const CONFIG_ENV: &str = "INVESTING_NEWS_CONFIG";

const CHROME_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36";

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// The listing page crawled once per run.
    pub listing_url: String,
    /// Origin that relative article links are resolved against.
    pub base_url: Url,
    /// Location of the corpus JSON file.
    pub output_path: PathBuf,
    /// Persist the corpus after this many successful extractions.
    pub checkpoint_every: usize,
    /// Pause between consecutive article fetches.
    pub request_delay_ms: u64,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    pub referer: String,
    pub accept_language: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listing_url: "https://www.investing.com/news/latest-news".to_string(),
            base_url: Url::parse("https://www.investing.com").unwrap(),
            output_path: PathBuf::from("news_data.json"),
            checkpoint_every: 5,
            request_delay_ms: 2000,
            request_timeout_secs: 30,
            user_agent: CHROME_USER_AGENT.to_string(),
            referer: "https://www.investing.com/".to_string(),
            accept_language: "en-US,en;q=0.9".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from `path`, or defaults when no path is given.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file cannot be read, is not valid YAML
    /// for this schema, or sets `checkpoint_every` to zero.
    #[instrument(level = "info", skip_all, fields(path = ?path))]
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_yaml(&raw).map_err(|reason| ConfigError::Parse {
            path: path.to_path_buf(),
            reason,
        })?;
        info!(output = %config.output_path.display(), "Loaded configuration");
        Ok(config)
    }

    fn from_yaml(raw: &str) -> Result<Self, String> {
        // An empty file deserializes as YAML null rather than an empty map
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self = serde_yaml::from_str(raw).map_err(|e| e.to_string())?;
        if config.checkpoint_every == 0 {
            return Err("checkpoint_every must be at least 1".to_string());
        }
        Ok(config)
    }

    pub fn request_delay(&self) -> Duration {
        Duration::from_millis(self.request_delay_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
