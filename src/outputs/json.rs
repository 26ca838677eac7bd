//! JSON corpus persistence.
//!
//! The corpus is one pretty-printed JSON array of
//! [`ArticleRecord`](crate::models::ArticleRecord)s, rewritten in full on
//! every save:
//!
//! ```text
//! [
//!   {
//!     "headline": "...",
//!     "category": "...",
//!     "full_text": "...",
//!     "url": "https://www.investing.com/news/...",
//!     "scraped_at": "2025-05-06T08:00:00Z"
//!   }
//! ]
//! ```
//!
//! Saves go to a sibling `*.tmp` file that is then renamed over the corpus,
//! so an interrupted save leaves the previous file in place.

use std::path::{Path, PathBuf};

use tokio::fs;
use tracing::{debug, info, instrument, warn};

use crate::error::StoreError;
use crate::models::ArticleRecord;

/// Loads and saves the article corpus at a fixed path.
#[derive(Debug, Clone)]
pub struct CorpusStore {
    path: PathBuf,
}

impl CorpusStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    /// Read the corpus from disk.
    ///
    /// # Returns
    ///
    /// The stored records in file order. A missing, unreadable, or malformed file yields an empty corpus; the
    /// cause is logged and never returned.
    #[instrument(level = "info", skip_all, fields(path = %self.path.display()))]
    pub async fn load(&self) -> Vec<ArticleRecord> {
        let raw = match fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("No corpus file yet; starting empty");
                return Vec::new();
            }
            Err(e) => {
                warn!(error = %e, "Failed to read corpus; starting empty");
                return Vec::new();
            }
        };

        match serde_json::from_str::<Vec<ArticleRecord>>(&raw) {
            Ok(records) => {
                info!(count = records.len(), "Loaded existing corpus");
                records
            }
            Err(e) => {
                warn!(error = %e, "Corpus file is not a valid article list; starting empty");
                Vec::new()
            }
        }
    }

    /// Write the whole corpus, replacing the previous file.
    ///
    /// # Arguments
    ///
    /// * `records` - Every record of the corpus, in insertion order
    ///
    /// The JSON is pretty-printed and written to a sibling `.tmp` file, which
    /// is then renamed over the corpus path. Missing parent directories are
    /// created first.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if serialization, directory creation, the
    /// temporary write, or the final rename fails. The previous corpus file
    /// is left untouched in every failure case.
    #[instrument(level = "info", skip_all, fields(path = %self.path.display(), count = records.len()))]
    pub async fn save(&self, records: &[ArticleRecord]) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(records)?;
        let io_err = |path: &Path| {
            let path = path.to_path_buf();
            move |source: std::io::Error| StoreError::Io { path, source }
        };

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await.map_err(io_err(parent))?;
        }

        let tmp = self.temp_path();
        fs::write(&tmp, json).await.map_err(io_err(&tmp))?;
        if let Err(e) = fs::rename(&tmp, &self.path).await {
            let _ = fs::remove_file(&tmp).await;
            return Err(io_err(&self.path)(e));
        }

        info!("Saved corpus");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(url: &str, headline: &str) -> ArticleRecord {
        ArticleRecord {
            headline: headline.to_string(),
            category: "Economy".to_string(),
            full_text: "Body text of the article.".to_string(),
            url: url.to_string(),
            scraped_at: "2025-05-06T08:00:00Z".to_string(),
        }
    }

    #[tokio::test]
    async fn test_load_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = CorpusStore::new(dir.path().join("news_data.json"));
        assert!(store.load().await.is_empty());
    }

    #[tokio::test]
    async fn test_load_invalid_json_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("news_data.json");
        std::fs::write(&path, "[{\"headline\": ").unwrap();

        let store = CorpusStore::new(&path);
        assert!(store.load().await.is_empty());
    }

    #[tokio::test]
    async fn test_load_wrong_shape_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("news_data.json");
        std::fs::write(&path, r#"{"articles": []}"#).unwrap();

        assert!(CorpusStore::new(&path).load().await.is_empty());
    }

    #[tokio::test]
    async fn test_save_then_load_preserves_order_and_unicode() {
        let dir = tempfile::tempdir().unwrap();
        let store = CorpusStore::new(dir.path().join("news_data.json"));
        let records = vec![
            record("https://www.investing.com/news/b-2", "Zona euro: inflación 2,4%"),
            record("https://www.investing.com/news/a-1", "Nikkei 株価 rises"),
        ];

        store.save(&records).await.unwrap();
        let raw = std::fs::read_to_string(store.path()).unwrap();
        assert!(raw.contains("Nikkei 株価 rises"));
        assert!(raw.contains("\n  {\n    \"headline\""));
        assert!(!store.temp_path().exists());

        assert_eq!(store.load().await, records);
    }

    #[tokio::test]
    async fn test_save_overwrites_whole_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = CorpusStore::new(dir.path().join("news_data.json"));

        store
            .save(&[record("https://x/1", "one"), record("https://x/2", "two")])
            .await
            .unwrap();
        store.save(&[record("https://x/3", "three")]).await.unwrap();

        let loaded = store.load().await;
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].url, "https://x/3");
    }

    #[tokio::test]
    async fn test_save_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let store = CorpusStore::new(dir.path().join("nested/deeper/news_data.json"));

        store.save(&[record("https://x/1", "one")]).await.unwrap();
        assert_eq!(store.load().await.len(), 1);
    }

    #[tokio::test]
    async fn test_save_failure_keeps_previous_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("news_data.json");
        let store = CorpusStore::new(&path);
        store.save(&[record("https://x/1", "one")]).await.unwrap();

        // A directory squatting on the temp path makes the write fail
        std::fs::create_dir(store.temp_path()).unwrap();
        let err = store.save(&[record("https://x/2", "two")]).await.unwrap_err();
        assert!(matches!(err, StoreError::Io { .. }));

        let loaded = store.load().await;
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].url, "https://x/1");
    }

    #[test]
    fn test_temp_path_is_sibling() {
        let store = CorpusStore::new("/data/news_data.json");
        assert_eq!(store.temp_path(), PathBuf::from("/data/news_data.json.tmp"));
    }
}
