use super::{HistoryEntry, HistoryStore, HISTORY_STORAGE_KEY};
use crate::verdict::RiskTier;
use anyhow::{anyhow, Context, Result};
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection};
use std::path::Path;

/// SQLite-backed log. Entries are keyed under the fixed storage key so the
/// database can be shared with other local data.
pub struct SqliteHistoryStore {
    conn: Connection,
    capacity: usize,
}

impl SqliteHistoryStore {
    pub fn open<P: AsRef<Path>>(db_path: P, capacity: usize) -> Result<Self> {
        let db_path = db_path.as_ref();
        if let Some(parent) = db_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).with_context(|| {
                    format!("Failed to create history directory: {}", parent.display())
                })?;
            }
        }

        let conn = Connection::open(db_path)
            .with_context(|| format!("Failed to open history database: {}", db_path.display()))?;
        Self::init_database(&conn)?;
        // The log may have been written under a larger capacity.
        let evicted = Self::evict_overflow(&conn, capacity)?;
        if evicted > 0 {
            log::debug!("Evicted {evicted} history rows beyond capacity {capacity}");
        }
        Ok(Self { conn, capacity })
    }

    pub fn open_in_memory(capacity: usize) -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Self::init_database(&conn)?;
        Ok(Self { conn, capacity })
    }

    fn init_database(conn: &Connection) -> Result<()> {
        conn.execute(
            "CREATE TABLE IF NOT EXISTS scam_history (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                storage_key TEXT NOT NULL,
                message TEXT NOT NULL,
                is_scam INTEGER NOT NULL,
                score INTEGER NOT NULL,
                tier TEXT NOT NULL,
                timestamp TEXT NOT NULL
            )",
            [],
        )?;
        conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_scam_history_key ON scam_history (storage_key, id)",
            [],
        )?;
        Ok(())
    }

    /// Delete everything older than the newest `capacity` rows.
    fn evict_overflow(conn: &Connection, capacity: usize) -> Result<usize> {
        let limit = i64::try_from(capacity).unwrap_or(i64::MAX);
        let evicted = conn.execute(
            "DELETE FROM scam_history
             WHERE storage_key = ?1 AND id NOT IN (
                 SELECT id FROM scam_history WHERE storage_key = ?1
                 ORDER BY id DESC LIMIT ?2
             )",
            params![HISTORY_STORAGE_KEY, limit],
        )?;
        Ok(evicted)
    }

    fn parse_tier(value: &str) -> Result<RiskTier> {
        match value {
            "SAFE" => Ok(RiskTier::Safe),
            "MEDIUM" => Ok(RiskTier::Medium),
            "HIGH" => Ok(RiskTier::High),
            "CRITICAL" => Ok(RiskTier::Critical),
            other => Err(anyhow!("Unknown risk tier in history: {other}")),
        }
    }
}

impl HistoryStore for SqliteHistoryStore {
    fn append(&mut self, entry: HistoryEntry) -> Result<()> {
        let tx = self.conn.transaction()?;

        tx.execute(
            "INSERT INTO scam_history (storage_key, message, is_scam, score, tier, timestamp)
             VALUES (?, ?, ?, ?, ?, ?)",
            params![
                HISTORY_STORAGE_KEY,
                entry.message,
                entry.is_scam,
                entry.score,
                entry.tier.as_str(),
                entry.timestamp.to_rfc3339(),
            ],
        )?;

        Self::evict_overflow(&tx, self.capacity)?;
        tx.commit()?;
        Ok(())
    }

    fn recent_entries(&self, limit: usize) -> Result<Vec<HistoryEntry>> {
        let limit = i64::try_from(limit.min(self.capacity)).unwrap_or(i64::MAX);
        let mut stmt = self.conn.prepare(
            "SELECT message, is_scam, score, tier, timestamp FROM scam_history
             WHERE storage_key = ? ORDER BY id DESC LIMIT ?",
        )?;

        let rows = stmt
            .query_map(params![HISTORY_STORAGE_KEY, limit], |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, bool>(1)?,
                    row.get::<_, u32>(2)?,
                    row.get::<_, String>(3)?,
                    row.get::<_, String>(4)?,
                ))
            })?
            .collect::<Result<Vec<_>, _>>()?;

        let mut entries = rows
            .into_iter()
            .map(|(message, is_scam, score, tier, timestamp)| -> Result<HistoryEntry> {
                Ok(HistoryEntry {
                    message,
                    is_scam,
                    score,
                    tier: Self::parse_tier(&tier)?,
                    timestamp: DateTime::parse_from_rfc3339(&timestamp)
                        .with_context(|| format!("Bad timestamp in history: {timestamp}"))?
                        .with_timezone(&Utc),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        entries.reverse();
        Ok(entries)
    }

    fn len(&self) -> Result<usize> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM scam_history WHERE storage_key = ?",
            params![HISTORY_STORAGE_KEY],
            |row| row.get(0),
        )?;
        Ok(usize::try_from(count).unwrap_or(0).min(self.capacity))
    }

    fn capacity(&self) -> usize {
        self.capacity
    }
}
