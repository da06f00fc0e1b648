//! Database schema definitions and migrations.
//!
//! The schema is built by an ordered list of migration steps. Each step knows
//! how to tell whether it is still needed, so the whole list can run on every
//! startup: a fresh database gets every table, an older file only gets the
//! columns it is missing, and an up-to-date file is left untouched. Steps only
//! ever add, never drop or rewrite, so existing rows survive.

use crate::errors::{AppResult, DatabaseError};
use rusqlite::{params, Connection};
use tracing::{debug, info};

/// Latest schema version known to this build.
pub const SCHEMA_VERSION: i32 = 4;

/// A single additive schema step.
pub struct Migration {
    /// Monotonic step number, recorded in `schema_version` once applied.
    pub version: i32,
    /// Short description used in logs and errors.
    pub description: &'static str,
    /// Returns `true` when the step still has work to do on this database.
    pub is_pending: fn(&Connection) -> rusqlite::Result<bool>,
    /// Performs the step.
    pub apply: fn(&Connection) -> rusqlite::Result<()>,
}

/// Every migration, in the order it must run.
pub const MIGRATIONS: &[Migration] = &[
    Migration {
        version: 1,
        description: "create entries, moods and settings tables",
        is_pending: base_tables_pending,
        apply: create_base_tables,
    },
    Migration {
        version: 2,
        description: "add entries.tags",
        is_pending: tags_column_pending,
        apply: add_tags_column,
    },
    Migration {
        version: 3,
        description: "add entries.is_draft",
        is_pending: draft_column_pending,
        apply: add_draft_column,
    },
    Migration {
        version: 4,
        description: "index entries by date",
        is_pending: date_index_pending,
        apply: create_date_index,
    },
];

/// Brings the database up to [`SCHEMA_VERSION`].
///
/// Each step's applicability check runs before the step, so this is
/// idempotent and safe to call on every startup.
///
/// # Errors
///
/// Returns `DatabaseError::Migration` naming the failing step.
pub fn run_migrations(conn: &Connection) -> AppResult<()> {
    debug!("Running schema migrations");

    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS schema_version (
            version INTEGER NOT NULL,
            applied_at DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP
        );
        "#,
    )
    .map_err(DatabaseError::Sqlite)?;

    for migration in MIGRATIONS {
        let failed = |source| DatabaseError::Migration {
            version: migration.version,
            description: migration.description,
            source,
        };

        if (migration.is_pending)(conn).map_err(failed)? {
            info!(
                "Applying migration {}: {}",
                migration.version, migration.description
            );
            (migration.apply)(conn).map_err(failed)?;
        } else {
            debug!("Migration {} already applied", migration.version);
        }

        record_version(conn, migration.version).map_err(failed)?;
    }

    Ok(())
}

/// Gets the highest schema version recorded in the database.
///
/// Returns `None` if the schema_version table doesn't exist or is empty.
///
/// # Errors
///
/// Returns an error if the query fails for reasons other than missing table.
pub fn current_schema_version(conn: &Connection) -> AppResult<Option<i32>> {
    let result = conn.query_row("SELECT MAX(version) FROM schema_version", [], |row| {
        row.get::<_, Option<i32>>(0)
    });

    match result {
        Ok(version) => Ok(version),
        Err(e) if e.to_string().contains("no such table") => Ok(None),
        Err(e) => Err(DatabaseError::Sqlite(e).into()),
    }
}

/// Reports whether `table` has a column called `column`.
pub fn column_exists(conn: &Connection, table: &str, column: &str) -> rusqlite::Result<bool> {
    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM pragma_table_info(?1) WHERE name = ?2",
        params![table, column],
        |row| row.get(0),
    )?;
    Ok(count > 0)
}

fn table_exists(conn: &Connection, table: &str) -> rusqlite::Result<bool> {
    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?1",
        params![table],
        |row| row.get(0),
    )?;
    Ok(count > 0)
}

fn base_tables_pending(conn: &Connection) -> rusqlite::Result<bool> {
    for table in ["entries", "moods", "settings"] {
        if !table_exists(conn, table)? {
            return Ok(true);
        }
    }
    Ok(false)
}

fn create_base_tables(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS entries (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            entry_date TEXT NOT NULL UNIQUE,
            title TEXT,
            content TEXT NOT NULL,
            content_format TEXT DEFAULT 'Markdown',
            primary_mood_id INTEGER NOT NULL,
            secondary_mood_1_id INTEGER,
            secondary_mood_2_id INTEGER,
            category TEXT,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS moods (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            category INTEGER NOT NULL,
            emoji TEXT
        );

        CREATE TABLE IF NOT EXISTS settings (
            id INTEGER PRIMARY KEY CHECK(id = 1),
            pin_hash TEXT,
            theme TEXT DEFAULT 'light',
            custom_theme_data TEXT
        );
        "#,
    )
}

fn tags_column_pending(conn: &Connection) -> rusqlite::Result<bool> {
    Ok(!column_exists(conn, "entries", "tags")?)
}

fn add_tags_column(conn: &Connection) -> rusqlite::Result<()> {
    add_column(conn, "entries", "tags", "TEXT")
}

fn draft_column_pending(conn: &Connection) -> rusqlite::Result<bool> {
    Ok(!column_exists(conn, "entries", "is_draft")?)
}

fn add_draft_column(conn: &Connection) -> rusqlite::Result<()> {
    add_column(conn, "entries", "is_draft", "INTEGER DEFAULT 0")
}

fn date_index_pending(conn: &Connection) -> rusqlite::Result<bool> {
    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM sqlite_master WHERE type = 'index' AND name = 'idx_entries_date'",
        [],
        |row| row.get(0),
    )?;
    Ok(count == 0)
}

fn create_date_index(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch("CREATE INDEX IF NOT EXISTS idx_entries_date ON entries(entry_date DESC);")
}

fn add_column(
    conn: &Connection,
    table: &str,
    column: &str,
    definition: &str,
) -> rusqlite::Result<()> {
    // Identifiers cannot be bound as parameters; all callers pass literals
    conn.execute_batch(&format!(
        "ALTER TABLE {} ADD COLUMN {} {};",
        table, column, definition
    ))
}

fn record_version(conn: &Connection, version: i32) -> rusqlite::Result<()> {
    conn.execute(
        r#"
        INSERT INTO schema_version (version)
        SELECT ?1
        WHERE NOT EXISTS (SELECT 1 FROM schema_version WHERE version = ?1)
        "#,
        params![version],
    )?;
    Ok(())
}
