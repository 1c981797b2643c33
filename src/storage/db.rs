use anyhow::{Context, Result};
use chrono::Utc;
use rusqlite::{Connection, OptionalExtension, params};
use std::path::PathBuf;

use super::KeyValueStore;
use crate::config::Config;
use crate::error::StorageError;

pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open or create the database in the configured data directory
    pub fn open() -> Result<Self> {
        let path = Self::default_db_path()?;
        Self::open_at_path(path)
    }

    /// Open or create a database at a specific path
    pub fn open_at_path(path: PathBuf) -> Result<Self> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create data directory: {:?}", parent))?;
        }

        let conn = Connection::open(&path)
            .with_context(|| format!("Failed to open database: {:?}", path))?;

        let db = Self { conn };
        db.init_schema()?;
        tracing::debug!(path = ?path, "opened database");

        Ok(db)
    }

    #[cfg(test)]
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().context("Failed to open in-memory database")?;
        let db = Self { conn };
        db.init_schema()?;
        Ok(db)
    }

    /// Get the default database file path
    fn default_db_path() -> Result<PathBuf> {
        Ok(Config::load()?.resolved_data_dir()?.join("studypal.db"))
    }

    /// Initialize database schema
    fn init_schema(&self) -> Result<()> {
        // One row per namespace (deck, mastery), value is a JSON document
        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS kv (
                namespace TEXT PRIMARY KEY,
                value TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )",
            [],
        )?;

        Ok(())
    }
}

impl KeyValueStore for Database {
    fn get(&self, namespace: &str) -> Result<Option<String>, StorageError> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM kv WHERE namespace = ?1",
                params![namespace],
                |row| row.get(0),
            )
            .optional()?;
        Ok(value)
    }

    fn set(&self, namespace: &str, value: &str) -> Result<(), StorageError> {
        let now = Utc::now().to_rfc3339();
        self.conn.execute(
            "INSERT INTO kv (namespace, value, updated_at) VALUES (?1, ?2, ?3)
             ON CONFLICT(namespace) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
            params![namespace, value, now],
        )?;
        Ok(())
    }

    fn remove(&self, namespace: &str) -> Result<(), StorageError> {
        self.conn
            .execute("DELETE FROM kv WHERE namespace = ?1", params![namespace])?;
        Ok(())
    }
}
