//! Verity Storage Layer
//!
//! Client-local persistence behind the `PersistentStore` trait.
//!
//! # Architecture
//!
//! - `SqliteStore`: a single key/value table in SQLite (`:memory:` supported)
//! - `MemoryStore`: a process-local map, for tests and throwaway sessions
//! - `HistoryStore`: bounded, newest-first log of past analyses
//! - `CredentialStore`: the stored API key
//!
//! Both record kinds are best-effort: a missing or corrupt record never stops
//! a session from starting.
//!
//! # Examples
//!
//! ```no_run
//! use std::sync::Arc;
//! use verity_store::{HistoryStore, SqliteStore};
//!
//! let store = Arc::new(SqliteStore::new("verity.db").unwrap());
//! let history = HistoryStore::load(store);
//! println!("{} past analyses", history.len());
//! ```

#![warn(missing_docs)]

pub mod credential;
pub mod history;
pub mod memory;

use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use std::sync::Mutex;
use thiserror::Error;
use verity_domain::now_millis;
use verity_domain::traits::PersistentStore;

pub use credential::{mask, CredentialStore};
pub use history::{HistoryStore, MAX_HISTORY};
pub use memory::MemoryStore;

/// Key under which the history list is stored
pub const HISTORY_KEY: &str = "history";

/// Key under which the API credential is stored
pub const CREDENTIAL_KEY: &str = "credential";

/// Errors that can occur during storage operations
#[derive(Error, Debug)]
pub enum StoreError {
    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Invalid data format
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// Lock poisoned by a panicking writer
    #[error("Store lock poisoned")]
    Poisoned,

    /// Error reported by another `PersistentStore` implementation
    #[error("Backend error: {0}")]
    Backend(String),
}

/// SQLite-based implementation of PersistentStore
///
/// The connection sits behind a mutex so one store can be shared between the
/// history store and the request builder.
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Create a new SqliteStore with the given database path
    ///
    /// Use `:memory:` for an in-memory database (useful for testing).
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let conn = Connection::open(path)?;
        conn.execute_batch(include_str!("schema.sql"))?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn with_conn<T>(
        &self,
        f: impl FnOnce(&Connection) -> Result<T, rusqlite::Error>,
    ) -> Result<T, StoreError> {
        let conn = self.conn.lock().map_err(|_| StoreError::Poisoned)?;
        Ok(f(&conn)?)
    }
}

impl PersistentStore for SqliteStore {
    type Error = StoreError;

    fn get(&self, key: &str) -> Result<Option<String>, Self::Error> {
        self.with_conn(|conn| {
            conn.query_row("SELECT value FROM kv WHERE key = ?1", params![key], |row| {
                row.get(0)
            })
            .optional()
        })
    }

    fn set(&self, key: &str, value: &str) -> Result<(), Self::Error> {
        let now = now_millis() as i64;
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO kv (key, value, updated_at) VALUES (?1, ?2, ?3)
                 ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
                params![key, value, now],
            )
            .map(|_| ())
        })
    }

    fn remove(&self, key: &str) -> Result<(), Self::Error> {
        self.with_conn(|conn| conn.execute("DELETE FROM kv WHERE key = ?1", params![key]).map(|_| ()))
    }
}
