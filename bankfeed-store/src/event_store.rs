//! Append-only raw event store backed by SQLite.

use std::path::{Path, PathBuf};

use bankfeed_core::ArchivedEvent;
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use serde_json::Value;
use tracing::{debug, info};

use crate::error::StoreError;

/// Idempotent schema for the append-only event table.
const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS raw_events (
  id          INTEGER PRIMARY KEY AUTOINCREMENT,
  source      TEXT NOT NULL,
  received_at TEXT NOT NULL,
  payload     TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS ix_raw_events_source      ON raw_events(source);
CREATE INDEX IF NOT EXISTS ix_raw_events_received_at ON raw_events(received_at);
";

/// Returns the default database location under the platform data directory.
pub fn default_db_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("bankfeed")
        .join("events.db")
}

/// Append-only store for raw provider payloads.
///
/// Each insert is its own implicit transaction, so a crash mid-run leaves
/// exactly the already-inserted events durable. There is no run-level
/// atomicity, and none is wanted: partial batches are still valid data.
pub struct EventStore {
    conn: Connection,
}

impl EventStore {
    /// Opens (or creates) the store at `path`, creating parent directories
    /// as needed.
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let conn = Connection::open(path)?;
        info!(path = %path.display(), "opened event store");
        Ok(Self { conn })
    }

    /// Opens an in-memory store. Used by tests.
    pub fn open_in_memory() -> Result<Self, StoreError> {
        Ok(Self {
            conn: Connection::open_in_memory()?,
        })
    }

    /// Creates the event table and its indexes if they do not exist yet.
    ///
    /// Safe to call on every process start.
    pub fn ensure_schema(&self) -> Result<(), StoreError> {
        self.conn.execute_batch(SCHEMA)?;
        Ok(())
    }

    /// Inserts one payload under `source` and returns the assigned id.
    pub fn insert_event(&self, source: &str, payload: &Value) -> Result<i64, StoreError> {
        let received_at = Utc::now().to_rfc3339();
        let json = serde_json::to_string(payload)?;
        self.conn.execute(
            "INSERT INTO raw_events (source, received_at, payload) VALUES (?1, ?2, ?3)",
            params![source, received_at, json],
        )?;
        let id = self.conn.last_insert_rowid();
        debug!(source, id, "inserted raw event");
        Ok(id)
    }

    /// Loads one event by id.
    pub fn event(&self, id: i64) -> Result<ArchivedEvent, StoreError> {
        let row: Option<(i64, String, String, String)> = self
            .conn
            .query_row(
                "SELECT id, source, received_at, payload FROM raw_events WHERE id = ?1",
                params![id],
                |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?)),
            )
            .optional()?;
        let (id, source, received_at, payload) = row.ok_or(StoreError::NotFound(id))?;
        Self::decode(id, source, &received_at, &payload)
    }

    /// Loads all events archived under `source`, oldest first.
    pub fn events_for_source(&self, source: &str) -> Result<Vec<ArchivedEvent>, StoreError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, source, received_at, payload FROM raw_events WHERE source = ?1 ORDER BY id",
        )?;
        let rows = stmt.query_map(params![source], |row| {
            Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?))
        })?;

        let mut events = Vec::new();
        for row in rows {
            let (id, source, received_at, payload): (i64, String, String, String) = row?;
            events.push(Self::decode(id, source, &received_at, &payload)?);
        }
        Ok(events)
    }

    /// Returns the total number of archived events.
    pub fn event_count(&self) -> Result<u64, StoreError> {
        let count: u64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM raw_events", [], |row| row.get(0))?;
        Ok(count)
    }

    fn decode(
        id: i64,
        source: String,
        received_at: &str,
        payload: &str,
    ) -> Result<ArchivedEvent, StoreError> {
        Ok(ArchivedEvent {
            id,
            source,
            received_at: DateTime::parse_from_rfc3339(received_at)?.with_timezone(&Utc),
            payload: serde_json::from_str(payload)?,
        })
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn store() -> EventStore {
        let store = EventStore::open_in_memory().unwrap();
        store.ensure_schema().unwrap();
        store
    }

    #[test]
    fn test_ensure_schema_is_idempotent() {
        let store = EventStore::open_in_memory().unwrap();
        store.ensure_schema().unwrap();
        store.ensure_schema().unwrap();

        let tables: u64 = store
            .conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = 'raw_events'",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(tables, 1);
    }

    #[test]
    fn test_ids_strictly_increase() {
        let store = store();
        let a = store.insert_event("plaid.auth", &json!({ "a": 1 })).unwrap();
        let b = store.insert_event("plaid.auth", &json!({ "a": 1 })).unwrap();
        let c = store.insert_event("plaid.assets", &json!({})).unwrap();
        assert!(a < b && b < c);
    }

    #[test]
    fn test_round_trip_preserves_payload_and_source() {
        let store = store();
        let payload = json!({
            "a": 1,
            "nested": { "names": ["Ádám", "میلاد"], "flag": true },
            "empty": {},
            "list": [1, 2.5, null, "x"],
        });
        let id = store.insert_event("plaid.auth", &payload).unwrap();

        let event = store.event(id).unwrap();
        assert_eq!(event.id, id);
        assert_eq!(event.source, "plaid.auth");
        assert_eq!(event.payload, payload);
    }

    #[test]
    fn test_events_for_source_ordered() {
        let store = store();
        store.insert_event("plaid.identity", &json!({ "n": 1 })).unwrap();
        store.insert_event("plaid.auth", &json!({})).unwrap();
        store.insert_event("plaid.identity", &json!({ "n": 2 })).unwrap();

        let events = store.events_for_source("plaid.identity").unwrap();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].payload["n"], 1);
        assert_eq!(events[1].payload["n"], 2);
        assert!(events[0].id < events[1].id);
    }

    #[test]
    fn test_missing_event_is_not_found() {
        let store = store();
        assert!(matches!(store.event(42), Err(StoreError::NotFound(42))));
    }

    #[test]
    fn test_open_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("events.db");

        let store = EventStore::open(&path).unwrap();
        store.ensure_schema().unwrap();
        let id = store.insert_event("plaid.auth", &json!({ "a": 1 })).unwrap();
        drop(store);

        // Reopen and confirm the row survived.
        let store = EventStore::open(&path).unwrap();
        store.ensure_schema().unwrap();
        let event = store.event(id).unwrap();
        assert_eq!(event.payload, json!({ "a": 1 }));
    }

    #[test]
    fn test_event_count() {
        let store = store();
        assert_eq!(store.event_count().unwrap(), 0);
        store.insert_event("plaid.auth", &json!({})).unwrap();
        store.insert_event("plaid.assets", &json!({})).unwrap();
        assert_eq!(store.event_count().unwrap(), 2);
    }
}
