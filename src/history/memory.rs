use super::{HistoryEntry, HistoryStore};
use anyhow::Result;
use std::collections::VecDeque;

/// Process-local ring buffer; nothing survives a restart.
#[derive(Debug)]
pub struct MemoryHistoryStore {
    entries: VecDeque<HistoryEntry>,
    capacity: usize,
}

impl MemoryHistoryStore {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }
}

impl HistoryStore for MemoryHistoryStore {
    fn append(&mut self, entry: HistoryEntry) -> Result<()> {
        self.entries.push_back(entry);
        while self.entries.len() > self.capacity {
            self.entries.pop_front();
        }
        Ok(())
    }

    fn recent_entries(&self, limit: usize) -> Result<Vec<HistoryEntry>> {
        let skip = self.entries.len().saturating_sub(limit);
        Ok(self.entries.iter().skip(skip).cloned().collect())
    }

    fn len(&self) -> Result<usize> {
        Ok(self.entries.len())
    }

    fn capacity(&self) -> usize {
        self.capacity
    }
}
