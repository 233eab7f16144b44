use rusqlite::{Connection, params};
use std::path::Path;
use std::sync::Mutex;
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("dedup store error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

/// Claimed-key store backing dedup.
///
/// One row per candidate key. SQLite rather than marker files because a
/// claim has to be a single atomic insert even with concurrent writers on
/// the same database.
pub struct DedupStore {
    conn: Mutex<Connection>,
}

impl DedupStore {
    /// Open the store at `path`, creating file and schema if needed.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let conn = Connection::open(path)?;
        conn.execute_batch("PRAGMA journal_mode=WAL;")?;
        Self::init(conn)
    }

    /// Purely in-memory store, for tests and dry runs.
    pub fn open_in_memory() -> Result<Self, StoreError> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> Result<Self, StoreError> {
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS seen (
                candidate_key TEXT PRIMARY KEY,
                claimed_at    TEXT NOT NULL DEFAULT (datetime('now'))
            );",
        )?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Atomically claim a key. Returns true exactly once per key: the
    /// insert either lands (first claim) or is ignored (already claimed).
    pub fn claim(&self, candidate_key: &str) -> Result<bool, StoreError> {
        let conn = self.conn.lock().expect("dedup store lock poisoned");
        let inserted = conn.execute(
            "INSERT OR IGNORE INTO seen (candidate_key) VALUES (?1)",
            params![candidate_key],
        )?;
        debug!(candidate_key, inserted, "dedup claim");
        Ok(inserted > 0)
    }

    /// Whether a key has been claimed, without claiming it.
    pub fn is_seen(&self, candidate_key: &str) -> Result<bool, StoreError> {
        let conn = self.conn.lock().expect("dedup store lock poisoned");
        let mut stmt = conn.prepare("SELECT 1 FROM seen WHERE candidate_key = ?1")?;
        Ok(stmt.exists(params![candidate_key])?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_claim_wins_second_loses() {
        let store = DedupStore::open_in_memory().unwrap();
        assert!(store.claim("abc123").unwrap());
        assert!(!store.claim("abc123").unwrap());
    }

    #[test]
    fn distinct_keys_claim_independently() {
        let store = DedupStore::open_in_memory().unwrap();
        assert!(store.claim("key-one").unwrap());
        assert!(store.claim("key-two").unwrap());
    }

    #[test]
    fn is_seen_reflects_claims_without_claiming() {
        let store = DedupStore::open_in_memory().unwrap();
        assert!(!store.is_seen("k").unwrap());
        // peeking must not claim
        assert!(store.claim("k").unwrap());
        assert!(store.is_seen("k").unwrap());
    }

    #[test]
    fn claims_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("seen.db");

        {
            let store = DedupStore::open(&path).unwrap();
            assert!(store.claim("persisted").unwrap());
        }

        let reopened = DedupStore::open(&path).unwrap();
        assert!(!reopened.claim("persisted").unwrap());
        assert!(reopened.claim("fresh").unwrap());
    }
}
