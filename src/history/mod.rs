pub mod json;
pub mod memory;
pub mod sqlite;

use crate::config::{HistoryBackend, HistoryConfig};
use crate::normalization::truncate_chars;
use crate::verdict::{RiskTier, Verdict};
use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub use json::JsonHistoryStore;
pub use memory::MemoryHistoryStore;
pub use sqlite::SqliteHistoryStore;

/// Fixed storage key the log lives under.
pub const HISTORY_STORAGE_KEY: &str = "meneyScamHistory";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    /// Leading characters of the analyzed message.
    pub message: String,
    pub is_scam: bool,
    pub score: u32,
    pub tier: RiskTier,
    pub timestamp: DateTime<Utc>,
}

impl HistoryEntry {
    pub fn from_verdict(text: &str, verdict: &Verdict, preview_chars: usize) -> Self {
        Self {
            message: truncate_chars(text, preview_chars),
            is_scam: verdict.is_scam,
            score: verdict.score,
            tier: verdict.tier,
            timestamp: Utc::now(),
        }
    }
}

/// Bounded, FIFO-evicting log of past verdicts.
pub trait HistoryStore {
    /// Append an entry, evicting the oldest ones beyond capacity.
    fn append(&mut self, entry: HistoryEntry) -> Result<()>;

    /// Up to `limit` most recent entries, oldest first.
    fn recent_entries(&self, limit: usize) -> Result<Vec<HistoryEntry>>;

    fn len(&self) -> Result<usize>;

    fn capacity(&self) -> usize;

    fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }
}

impl<S: HistoryStore + ?Sized> HistoryStore for Box<S> {
    fn append(&mut self, entry: HistoryEntry) -> Result<()> {
        (**self).append(entry)
    }

    fn recent_entries(&self, limit: usize) -> Result<Vec<HistoryEntry>> {
        (**self).recent_entries(limit)
    }

    fn len(&self) -> Result<usize> {
        (**self).len()
    }

    fn capacity(&self) -> usize {
        (**self).capacity()
    }
}

/// Open the backend selected in configuration.
pub fn open_store(config: &HistoryConfig) -> Result<Box<dyn HistoryStore>> {
    let store: Box<dyn HistoryStore> = match config.backend {
        HistoryBackend::Memory => Box::new(MemoryHistoryStore::new(config.capacity)),
        HistoryBackend::Json => Box::new(JsonHistoryStore::open(&config.path, config.capacity)?),
        HistoryBackend::Sqlite => Box::new(SqliteHistoryStore::open(
            sqlite_path(&config.path),
            config.capacity,
        )?),
    };
    log::debug!(
        "Opened {:?} history store at {} (capacity {})",
        config.backend,
        config.path,
        config.capacity
    );
    Ok(store)
}

/// Database file the SQLite backend keeps inside the history directory.
pub fn sqlite_path<P: AsRef<Path>>(dir: P) -> PathBuf {
    dir.as_ref().join(format!("{HISTORY_STORAGE_KEY}.db"))
}

/// Keep only the last `capacity` items of `entries`.
pub(crate) fn tail(mut entries: Vec<HistoryEntry>, capacity: usize) -> Vec<HistoryEntry> {
    if entries.len() > capacity {
        entries.drain(..entries.len() - capacity);
    }
    entries
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_truncates_on_char_boundary() {
        let verdict = Verdict {
            score: 50,
            is_scam: true,
            tier: RiskTier::Medium,
            reasons: vec![],
            advice: String::new(),
        };
        let text = "बधाई हो! ".repeat(30);
        let entry = HistoryEntry::from_verdict(&text, &verdict, 100);
        assert_eq!(entry.message.chars().count(), 100);
        assert!(entry.is_scam);
        assert_eq!(entry.tier, RiskTier::Medium);
    }

    #[test]
    fn test_entry_json_field_names() {
        let entry = test_support::entry(4);
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["message"], "message 4");
        assert_eq!(json["isScam"], true);
        assert_eq!(json["score"], 4);
        assert_eq!(json["tier"], "SAFE");
        assert!(json["timestamp"].as_str().unwrap().starts_with("2023-11-14T"));
    }

    #[test]
    fn test_open_memory_store() {
        let config = HistoryConfig {
            backend: HistoryBackend::Memory,
            path: String::new(),
            capacity: 3,
            preview_chars: 100,
        };
        let mut store = open_store(&config).unwrap();
        test_support::check_fifo_eviction(&mut store);
    }

    #[test]
    fn test_backends_share_history_directory() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = HistoryConfig {
            backend: HistoryBackend::Json,
            path: dir.path().join("eye-meney").to_string_lossy().into_owned(),
            capacity: 3,
            preview_chars: 100,
        };
        open_store(&config).unwrap().append(test_support::entry(1)).unwrap();

        config.backend = HistoryBackend::Sqlite;
        let mut store = open_store(&config).unwrap();
        store.append(test_support::entry(2)).unwrap();
        assert_eq!(store.recent_entries(10).unwrap(), vec![test_support::entry(2)]);

        let history_dir = Path::new(&config.path);
        assert!(history_dir.join("meneyScamHistory.json").is_file());
        assert!(sqlite_path(history_dir).is_file());
        assert!(sqlite_path(history_dir).ends_with("meneyScamHistory.db"));
    }

    #[test]
    fn test_tail() {
        let entries: Vec<HistoryEntry> = (0..5).map(test_support::entry).collect();
        let kept = tail(entries, 2);
        assert_eq!(kept.iter().map(|e| e.score).collect::<Vec<_>>(), vec![3, 4]);
    }
}
