//! Database operations for journal entries, moods and settings.
//!
//! This module provides the SQLite entry store. It uses connection pooling via
//! r2d2; every operation checks out a connection for its own scope and hands
//! it back when the guard drops.
//!
//! # Module Structure
//!
//! - `schema`: Table definitions and the ordered migration list
//! - `entries`: Entry CRUD operations
//! - `moods`: Mood catalog seeding and lookup
//! - `settings`: The singleton user settings row
//!
//! # Example
//!
//! ```no_run
//! use jupdate::db::Database;
//! use std::path::Path;
//!
//! let db = Database::open(Path::new("/tmp/journal.db"))?;
//! db.initialize_schema()?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod entries;
pub mod moods;
pub mod schema;
pub mod settings;

use crate::constants;
use crate::errors::{AppResult, DatabaseError};
use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::Connection;
use std::path::Path;
use tracing::{debug, info};

/// Type alias for a pooled SQLite connection.
pub type PooledConnection = r2d2::PooledConnection<SqliteConnectionManager>;

/// Database handle with connection pooling.
#[derive(Clone)]
pub struct Database {
    pool: Pool<SqliteConnectionManager>,
}

impl Database {
    /// Opens or creates the SQLite journal database.
    ///
    /// If the database file doesn't exist, it will be created.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Database file cannot be opened
    /// - Connection pool cannot be initialized
    pub fn open(db_path: &Path) -> AppResult<Self> {
        debug!("Opening database at: {:?}", db_path);

        let manager = SqliteConnectionManager::file(db_path);
        let pool = Pool::builder()
            .max_size(constants::DB_POOL_SIZE)
            .connection_customizer(Box::new(ConnectionPragmas))
            .build(manager)
            .map_err(DatabaseError::Pool)?;

        // Make sure the file is actually a usable database
        let conn = pool.get().map_err(DatabaseError::Pool)?;
        conn.query_row("SELECT COUNT(*) FROM sqlite_master", [], |row| {
            row.get::<_, i64>(0)
        })
        .map_err(DatabaseError::Sqlite)?;
        drop(conn);

        info!("Database opened successfully");
        Ok(Database { pool })
    }

    /// Gets a connection from the pool.
    ///
    /// # Errors
    ///
    /// Returns an error if no connection is available or the pool is exhausted.
    pub fn get_conn(&self) -> AppResult<PooledConnection> {
        self.pool
            .get()
            .map_err(|e| DatabaseError::Pool(e).into())
    }

    /// Initializes the database schema.
    ///
    /// Runs every pending migration step and seeds the default mood catalog.
    /// This is idempotent and safe to call on every startup.
    ///
    /// # Errors
    ///
    /// Returns an error if a migration step or the mood seed fails.
    pub fn initialize_schema(&self) -> AppResult<()> {
        let conn = self.get_conn()?;
        schema::run_migrations(&conn)?;
        moods::seed_default_moods(&conn)?;
        info!("Database schema initialized");
        Ok(())
    }
}

/// Connection customizer applying the per-connection pragmas.
#[derive(Debug)]
struct ConnectionPragmas;

impl r2d2::CustomizeConnection<Connection, rusqlite::Error> for ConnectionPragmas {
    fn on_acquire(&self, conn: &mut Connection) -> Result<(), rusqlite::Error> {
        // journal_mode answers with the resulting mode, so it has to be read back
        let mode: String =
            conn.pragma_update_and_check(None, "journal_mode", "WAL", |row| row.get(0))?;
        debug!("SQLite journal mode: {}", mode);
        conn.pragma_update(None, "foreign_keys", "ON")?;
        Ok(())
    }

    fn on_release(&self, _conn: Connection) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_database_open_and_connect() {
        let temp_dir = TempDir::new().unwrap();
        let db_path = temp_dir.path().join("test.db");

        let db = Database::open(&db_path).unwrap();
        let conn = db.get_conn().unwrap();

        let result: i32 = conn
            .query_row("SELECT 1 + 1", [], |row| row.get(0))
            .unwrap();
        assert_eq!(result, 2);
    }

    #[test]
    fn test_connections_use_wal() {
        let temp_dir = TempDir::new().unwrap();
        let db_path = temp_dir.path().join("test.db");

        let db = Database::open(&db_path).unwrap();
        let conn = db.get_conn().unwrap();

        let mode: String = conn
            .query_row("PRAGMA journal_mode", [], |row| row.get(0))
            .unwrap();
        assert_eq!(mode.to_lowercase(), "wal");
    }

    #[test]
    fn test_initialize_schema_idempotent() {
        let temp_dir = TempDir::new().unwrap();
        let db_path = temp_dir.path().join("test.db");

        let db = Database::open(&db_path).unwrap();

        db.initialize_schema().unwrap();
        db.initialize_schema().unwrap();

        let conn = db.get_conn().unwrap();
        let mood_count: i64 = conn
            .query_row("SELECT COUNT(*) FROM moods", [], |row| row.get(0))
            .unwrap();
        assert_eq!(mood_count, 15);
    }
}
