//! Storage layer for spaceport.
//!
//! This module provides `SQLite`-based persistent storage for companies,
//! rockets and launches. Each record type gets its own `impl Storage` block
//! with list, get and create operations.

pub mod bootstrap;
mod companies;
mod launches;
mod rockets;
pub mod schema;

use std::path::{Path, PathBuf};
use std::time::Duration;

use rusqlite::Connection;
use tracing::{debug, info};

use crate::error::{Error, Result};

pub use bootstrap::SeedReport;

/// Storage engine for spaceflight records.
///
/// Wraps a single `SQLite` connection. The schema is ensured when the storage
/// is opened, so every `Storage` value is ready for reads and writes.
#[derive(Debug)]
pub struct Storage {
    /// Path to the database file.
    path: PathBuf,
    /// Database connection.
    conn: Connection,
}

impl Storage {
    /// Open or create a storage database at the given path.
    ///
    /// Creates the parent directories and database file if they don't exist,
    /// then creates any missing tables.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or schema initialization fails.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent).map_err(|source| Error::DirectoryCreate {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
        }

        if !path.exists() {
            info!("Database {} doesn't exist, creating it", path.display());
        }

        debug!("Opening database at {}", path.display());
        let conn = Connection::open(&path).map_err(|source| Error::DatabaseOpen {
            path: path.clone(),
            source,
        })?;

        // WAL lets page renders read while an API create is writing
        conn.execute_batch(
            "PRAGMA journal_mode=WAL; PRAGMA synchronous=NORMAL; PRAGMA foreign_keys=ON;",
        )?;

        bootstrap::ensure_schema(&conn)?;

        info!("Database opened successfully at {}", path.display());
        Ok(Self { path, conn })
    }

    /// Create an in-memory storage instance for testing.
    ///
    /// # Errors
    ///
    /// Returns an error if the in-memory database cannot be created.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(|source| Error::DatabaseOpen {
            path: PathBuf::from(":memory:"),
            source,
        })?;

        conn.execute_batch("PRAGMA foreign_keys=ON;")?;
        bootstrap::ensure_schema(&conn)?;

        Ok(Self {
            path: PathBuf::from(":memory:"),
            conn,
        })
    }

    /// Get the path to the database file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Set how long a statement waits on a locked database before failing.
    ///
    /// # Errors
    ///
    /// Returns an error if `SQLite` rejects the setting.
    pub fn set_busy_timeout(&self, timeout: Duration) -> Result<()> {
        self.conn.busy_timeout(timeout)?;
        Ok(())
    }

    /// Get row counts and file size.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn stats(&self) -> Result<StorageStats> {
        let db_size_bytes = if self.path.to_string_lossy() == ":memory:" {
            0
        } else {
            std::fs::metadata(&self.path).map(|m| m.len()).unwrap_or(0)
        };

        Ok(StorageStats {
            companies: self.count_companies()?,
            rockets: self.count_rockets()?,
            launches: self.count_launches()?,
            db_size_bytes,
        })
    }

    fn count(&self, sql: &str) -> Result<i64> {
        let count: i64 = self.conn.query_row(sql, [], |row| row.get(0))?;
        Ok(count)
    }

    fn row_exists(&self, sql: &str, id: i64) -> Result<bool> {
        let count: i64 = self.conn.query_row(sql, [id], |row| row.get(0))?;
        Ok(count > 0)
    }
}

/// Statistics about the storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageStats {
    /// Number of company rows.
    pub companies: i64,
    /// Number of rocket rows.
    pub rockets: i64,
    /// Number of launch rows.
    pub launches: i64,
    /// Size of the database file in bytes.
    pub db_size_bytes: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::record::NewCompany;

    fn temp_db_path(tag: &str) -> PathBuf {
        std::env::temp_dir().join(format!("spaceport_{tag}_{}.db", std::process::id()))
    }

    fn cleanup(path: &Path) {
        let _ = std::fs::remove_file(path);
        let _ = std::fs::remove_file(path.with_extension("db-wal"));
        let _ = std::fs::remove_file(path.with_extension("db-shm"));
    }

    #[test]
    fn test_open_in_memory() {
        let storage = Storage::open_in_memory().unwrap();
        assert_eq!(storage.path().to_string_lossy(), ":memory:");
    }

    #[test]
    fn test_stats_empty() {
        let storage = Storage::open_in_memory().unwrap();
        let stats = storage.stats().unwrap();
        assert_eq!(
            stats,
            StorageStats {
                companies: 0,
                rockets: 0,
                launches: 0,
                db_size_bytes: 0,
            }
        );
    }

    #[test]
    fn test_foreign_keys_enabled() {
        let storage = Storage::open_in_memory().unwrap();
        let enabled: i64 = storage
            .conn
            .query_row("PRAGMA foreign_keys", [], |row| row.get(0))
            .unwrap();
        assert_eq!(enabled, 1);
    }

    #[test]
    fn test_open_file_based_persists() {
        let db_path = temp_db_path("persist");
        cleanup(&db_path);

        let storage = Storage::open(&db_path).unwrap();
        assert_eq!(storage.path(), db_path);
        storage
            .create_company(&NewCompany {
                name: "Blue Origin".to_string(),
                ceo_admin_name: "Dave Limp".to_string(),
                year_founded: 2000,
                country_origin: "US".to_string(),
            })
            .unwrap();
        drop(storage);

        let reopened = Storage::open(&db_path).unwrap();
        let companies = reopened.list_companies().unwrap();
        assert_eq!(companies.len(), 1);
        assert_eq!(companies[0].name, "Blue Origin");
        assert!(reopened.stats().unwrap().db_size_bytes > 0);

        drop(reopened);
        cleanup(&db_path);
    }

    #[test]
    fn test_open_creates_parent_dirs() {
        let root = std::env::temp_dir().join(format!("spaceport_nested_{}", std::process::id()));
        let _ = std::fs::remove_dir_all(&root);
        let nested_path = root.join("data/spaceport.db");

        let storage = Storage::open(&nested_path).unwrap();
        assert!(nested_path.exists());

        drop(storage);
        let _ = std::fs::remove_dir_all(&root);
    }

    #[test]
    fn test_set_busy_timeout() {
        let storage = Storage::open_in_memory().unwrap();
        assert!(storage.set_busy_timeout(Duration::from_millis(250)).is_ok());
    }
}
