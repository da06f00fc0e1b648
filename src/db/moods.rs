//! Mood catalog operations.
//!
//! Moods are seeded once from a fixed catalog and are read-only afterwards.

use crate::errors::{AppResult, DatabaseError};
use rusqlite::{params, Connection, OptionalExtension, Row};
use serde::Serialize;
use std::fmt;
use tracing::{debug, info};

/// Broad emotional category of a mood.
///
/// Stored as an INTEGER: Positive = 0, Neutral = 1, Negative = 2.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum MoodCategory {
    Positive,
    Neutral,
    Negative,
}

impl MoodCategory {
    /// All categories in storage order.
    pub const ALL: [MoodCategory; 3] = [
        MoodCategory::Positive,
        MoodCategory::Neutral,
        MoodCategory::Negative,
    ];

    /// Convert to database integer representation.
    pub fn as_i64(&self) -> i64 {
        match self {
            MoodCategory::Positive => 0,
            MoodCategory::Neutral => 1,
            MoodCategory::Negative => 2,
        }
    }

    /// Parse from database integer representation.
    pub fn from_i64(value: i64) -> Option<Self> {
        match value {
            0 => Some(MoodCategory::Positive),
            1 => Some(MoodCategory::Neutral),
            2 => Some(MoodCategory::Negative),
            _ => None,
        }
    }

    /// Display label, also used as the key in distribution output.
    pub fn label(&self) -> &'static str {
        match self {
            MoodCategory::Positive => "Positive",
            MoodCategory::Neutral => "Neutral",
            MoodCategory::Negative => "Negative",
        }
    }
}

impl fmt::Display for MoodCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Represents a mood in the database.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Mood {
    pub id: i64,
    pub name: String,
    pub category: MoodCategory,
    pub emoji: String,
}

/// The catalog written to an empty `moods` table.
pub const DEFAULT_MOODS: &[(&str, MoodCategory, &str)] = &[
    ("Happy", MoodCategory::Positive, "😊"),
    ("Excited", MoodCategory::Positive, "🎉"),
    ("Relaxed", MoodCategory::Positive, "😌"),
    ("Grateful", MoodCategory::Positive, "🙏"),
    ("Confident", MoodCategory::Positive, "💪"),
    ("Calm", MoodCategory::Neutral, "😐"),
    ("Thoughtful", MoodCategory::Neutral, "🤔"),
    ("Curious", MoodCategory::Neutral, "🤨"),
    ("Nostalgic", MoodCategory::Neutral, "😌"),
    ("Bored", MoodCategory::Neutral, "😑"),
    ("Sad", MoodCategory::Negative, "😔"),
    ("Angry", MoodCategory::Negative, "😠"),
    ("Stressed", MoodCategory::Negative, "😰"),
    ("Lonely", MoodCategory::Negative, "😞"),
    ("Anxious", MoodCategory::Negative, "😟"),
];

/// Inserts the default catalog when the table is empty.
///
/// Returns the number of moods inserted (0 when the catalog already exists).
///
/// # Errors
///
/// Returns an error if the database operation fails.
pub fn seed_default_moods(conn: &Connection) -> AppResult<usize> {
    let count: i64 = conn
        .query_row("SELECT COUNT(*) FROM moods", [], |row| row.get(0))
        .map_err(DatabaseError::Sqlite)?;

    if count > 0 {
        debug!("Mood catalog already present ({} moods)", count);
        return Ok(0);
    }

    let mut stmt = conn
        .prepare("INSERT INTO moods (name, category, emoji) VALUES (?1, ?2, ?3)")
        .map_err(DatabaseError::Sqlite)?;
    for (name, category, emoji) in DEFAULT_MOODS {
        stmt.execute(params![name, category.as_i64(), emoji])
            .map_err(DatabaseError::Sqlite)?;
    }

    info!("Seeded {} default moods", DEFAULT_MOODS.len());
    Ok(DEFAULT_MOODS.len())
}

fn mood_from_row(row: &Row<'_>) -> rusqlite::Result<Mood> {
    let raw_category: i64 = row.get(2)?;
    let category = MoodCategory::from_i64(raw_category).ok_or_else(|| {
        rusqlite::Error::IntegralValueOutOfRange(2, raw_category)
    })?;

    Ok(Mood {
        id: row.get(0)?,
        name: row.get(1)?,
        category,
        emoji: row.get::<_, Option<String>>(3)?.unwrap_or_default(),
    })
}

/// Lists every mood ordered by category, then name.
///
/// # Errors
///
/// Returns an error if the database operation fails.
pub fn list_moods(conn: &Connection) -> AppResult<Vec<Mood>> {
    let mut stmt = conn
        .prepare("SELECT id, name, category, emoji FROM moods ORDER BY category, name")
        .map_err(DatabaseError::Sqlite)?;

    let moods = stmt
        .query_map([], mood_from_row)
        .map_err(DatabaseError::Sqlite)?
        .collect::<Result<Vec<_>, _>>()
        .map_err(DatabaseError::Sqlite)?;

    Ok(moods)
}

/// Retrieves a mood by id.
///
/// # Errors
///
/// Returns an error if the database operation fails.
/// Returns `Ok(None)` if no mood has that id.
pub fn get_mood(conn: &Connection, id: i64) -> AppResult<Option<Mood>> {
    conn.query_row(
        "SELECT id, name, category, emoji FROM moods WHERE id = ?1",
        params![id],
        mood_from_row,
    )
    .optional()
    .map_err(|e| DatabaseError::Sqlite(e).into())
}

/// Looks a mood up by name, ignoring ASCII case.
///
/// # Errors
///
/// Returns an error if the database operation fails.
pub fn find_mood_by_name(conn: &Connection, name: &str) -> AppResult<Option<Mood>> {
    conn.query_row(
        "SELECT id, name, category, emoji FROM moods WHERE name = ?1 COLLATE NOCASE LIMIT 1",
        params![name.trim()],
        mood_from_row,
    )
    .optional()
    .map_err(|e| DatabaseError::Sqlite(e).into())
}
