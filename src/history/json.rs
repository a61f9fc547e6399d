use super::{tail, HistoryEntry, HistoryStore, HISTORY_STORAGE_KEY};
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// JSON array persisted under the fixed storage key inside `dir`. The whole
/// file is rewritten on each append, which is fine at this capacity.
#[derive(Debug)]
pub struct JsonHistoryStore {
    path: PathBuf,
    capacity: usize,
}

impl JsonHistoryStore {
    pub fn open<P: AsRef<Path>>(dir: P, capacity: usize) -> Result<Self> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create history directory: {}", dir.display()))?;

        Ok(Self {
            path: dir.join(format!("{HISTORY_STORAGE_KEY}.json")),
            capacity,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<Vec<HistoryEntry>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let content = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read history file: {}", self.path.display()))?;
        if content.trim().is_empty() {
            return Ok(Vec::new());
        }
        let entries: Vec<HistoryEntry> = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse history file: {}", self.path.display()))?;
        Ok(entries)
    }

    fn save(&self, entries: &[HistoryEntry]) -> Result<()> {
        let content = serde_json::to_string(entries).context("Failed to serialize history")?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, content)
            .with_context(|| format!("Failed to write history file: {}", tmp.display()))?;
        fs::rename(&tmp, &self.path)
            .with_context(|| format!("Failed to replace history file: {}", self.path.display()))?;
        Ok(())
    }
}

impl HistoryStore for JsonHistoryStore {
    fn append(&mut self, entry: HistoryEntry) -> Result<()> {
        let mut entries = self.load()?;
        entries.push(entry);
        self.save(&tail(entries, self.capacity))
    }

    fn recent_entries(&self, limit: usize) -> Result<Vec<HistoryEntry>> {
        Ok(tail(self.load()?, limit.min(self.capacity)))
    }

    fn len(&self) -> Result<usize> {
        Ok(self.load()?.len().min(self.capacity))
    }

    fn capacity(&self) -> usize {
        self.capacity
    }
}
