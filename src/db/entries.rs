//! Entry CRUD operations.
//!
//! This module provides functions for creating, reading, updating, deleting and
//! querying journal entries in the database. There is at most one entry per
//! calendar date; writes are upserts keyed on that date.
//!
//! Rows are read by column name so that a file missing a later optional
//! column still loads, with that field falling back to its default.

use crate::constants;
use crate::errors::{AppResult, DatabaseError};
use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};
use rusqlite::types::{FromSql, Type};
use rusqlite::{params, Connection, OptionalExtension, Row};
use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt;
use tracing::debug;

/// Markup used by an entry's content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum ContentFormat {
    #[default]
    Markdown,
    RichText,
}

impl ContentFormat {
    /// Convert to database string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentFormat::Markdown => "Markdown",
            ContentFormat::RichText => "RichText",
        }
    }

    /// Parse from database string representation.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "markdown" => Some(ContentFormat::Markdown),
            "richtext" => Some(ContentFormat::RichText),
            _ => None,
        }
    }
}

impl fmt::Display for ContentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Represents a journal entry in the database.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JournalEntry {
    pub id: i64,
    pub entry_date: NaiveDate,
    pub title: Option<String>,
    pub content: String,
    pub content_format: ContentFormat,
    pub primary_mood_id: i64,
    pub secondary_mood_1_id: Option<i64>,
    pub secondary_mood_2_id: Option<i64>,
    pub category: Option<String>,
    /// Comma-separated tag list, stored as written.
    pub tags: Option<String>,
    pub is_draft: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl JournalEntry {
    /// The entry's tags, split and trimmed.
    pub fn tag_list(&self) -> Vec<String> {
        self.tags.as_deref().map(split_tags).unwrap_or_default()
    }

    /// Secondary mood ids that are set.
    pub fn secondary_mood_ids(&self) -> Vec<i64> {
        [self.secondary_mood_1_id, self.secondary_mood_2_id]
            .into_iter()
            .flatten()
            .collect()
    }
}

/// The writable part of an entry: everything except identity and timestamps.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NewEntry {
    pub entry_date: NaiveDate,
    pub title: Option<String>,
    pub content: String,
    pub content_format: ContentFormat,
    pub primary_mood_id: i64,
    pub secondary_mood_1_id: Option<i64>,
    pub secondary_mood_2_id: Option<i64>,
    pub category: Option<String>,
    pub tags: Option<String>,
    pub is_draft: bool,
}

/// Splits a comma-separated tag field, trimming whitespace and dropping empties.
///
/// # Examples
///
/// ```
/// use jupdate::db::entries::split_tags;
///
/// assert_eq!(split_tags("gym, friends,,  "), vec!["gym", "friends"]);
/// ```
pub fn split_tags(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect()
}

/// Formats a date the way it is stored (`yyyy-MM-dd`).
pub fn format_date(date: NaiveDate) -> String {
    date.format(constants::DATE_FORMAT_ISO).to_string()
}

/// Formats a timestamp in round-trip form (RFC 3339, UTC, full precision).
pub fn format_timestamp(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

/// Parses a stored timestamp. Values without an offset are taken as UTC.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|ts| ts.with_timezone(&Utc))
        .ok()
        .or_else(|| {
            NaiveDateTime::parse_from_str(raw, constants::TIMESTAMP_FORMAT_NAIVE)
                .ok()
                .map(|naive| naive.and_utc())
        })
}

fn conversion_error(column: &str, err: impl std::error::Error + Send + Sync + 'static) -> rusqlite::Error {
    debug!("Failed to convert column {}", column);
    rusqlite::Error::FromSqlConversionFailure(0, Type::Text, Box::new(err))
}

/// Reads a column that older files may not have, falling back to `None`.
fn optional_column<T: FromSql>(row: &Row<'_>, column: &str) -> rusqlite::Result<Option<T>> {
    match row.get::<_, Option<T>>(column) {
        Ok(value) => Ok(value),
        Err(rusqlite::Error::InvalidColumnName(_)) => Ok(None),
        Err(e) => Err(e),
    }
}

fn read_date(row: &Row<'_>, column: &str) -> rusqlite::Result<NaiveDate> {
    let raw: String = row.get(column)?;
    // Older writers may have stored a full timestamp; only the date part counts
    let date_part = raw.get(..10).unwrap_or(raw.as_str());
    NaiveDate::parse_from_str(date_part, constants::DATE_FORMAT_ISO)
        .map_err(|e| conversion_error(column, e))
}

fn read_timestamp(row: &Row<'_>, column: &str) -> rusqlite::Result<DateTime<Utc>> {
    let raw: String = row.get(column)?;
    parse_timestamp(&raw).ok_or_else(|| {
        conversion_error(
            column,
            DatabaseError::Custom(format!("invalid timestamp '{}'", raw)),
        )
    })
}

fn entry_from_row(row: &Row<'_>) -> rusqlite::Result<JournalEntry> {
    let content_format = optional_column::<String>(row, "content_format")?
        .and_then(|raw| ContentFormat::parse(&raw))
        .unwrap_or_default();

    Ok(JournalEntry {
        id: row.get("id")?,
        entry_date: read_date(row, "entry_date")?,
        title: optional_column(row, "title")?,
        content: row.get("content")?,
        content_format,
        primary_mood_id: row.get("primary_mood_id")?,
        secondary_mood_1_id: optional_column(row, "secondary_mood_1_id")?,
        secondary_mood_2_id: optional_column(row, "secondary_mood_2_id")?,
        category: optional_column(row, "category")?,
        tags: optional_column(row, "tags")?,
        is_draft: optional_column::<i64>(row, "is_draft")?.unwrap_or(0) == 1,
        created_at: read_timestamp(row, "created_at")?,
        updated_at: read_timestamp(row, "updated_at")?,
    })
}

/// Inserts or updates the entry for `entry.entry_date`.
///
/// An existing entry for the same date keeps its id and `created_at`; every
/// other field is overwritten and `updated_at` becomes `now`. A new date gets
/// a fresh row with both timestamps set to `now`.
///
/// Returns the stored entry.
///
/// # Errors
///
/// Returns an error if the database operation fails.
pub fn upsert_entry(conn: &Connection, entry: &NewEntry, now: DateTime<Utc>) -> AppResult<JournalEntry> {
    debug!("Upserting entry for date {}", entry.entry_date);

    let existing = get_entry_by_date(conn, entry.entry_date)?;
    let now_str = format_timestamp(now);

    let id = match &existing {
        Some(current) => {
            conn.execute(
                r#"
                UPDATE entries
                SET title = ?1, content = ?2, content_format = ?3,
                    primary_mood_id = ?4, secondary_mood_1_id = ?5,
                    secondary_mood_2_id = ?6, category = ?7,
                    tags = ?8, is_draft = ?9, updated_at = ?10
                WHERE id = ?11
                "#,
                params![
                    entry.title,
                    entry.content,
                    entry.content_format.as_str(),
                    entry.primary_mood_id,
                    entry.secondary_mood_1_id,
                    entry.secondary_mood_2_id,
                    entry.category,
                    entry.tags,
                    entry.is_draft as i64,
                    now_str,
                    current.id,
                ],
            )
            .map_err(DatabaseError::Sqlite)?;
            current.id
        }
        None => {
            conn.execute(
                r#"
                INSERT INTO entries
                    (entry_date, title, content, content_format, primary_mood_id,
                     secondary_mood_1_id, secondary_mood_2_id, category, tags,
                     is_draft, created_at, updated_at)
                VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?11)
                "#,
                params![
                    format_date(entry.entry_date),
                    entry.title,
                    entry.content,
                    entry.content_format.as_str(),
                    entry.primary_mood_id,
                    entry.secondary_mood_1_id,
                    entry.secondary_mood_2_id,
                    entry.category,
                    entry.tags,
                    entry.is_draft as i64,
                    now_str,
                ],
            )
            .map_err(DatabaseError::Sqlite)?;
            conn.last_insert_rowid()
        }
    };

    debug!("Entry upserted with id {}", id);

    Ok(JournalEntry {
        id,
        entry_date: entry.entry_date,
        title: entry.title.clone(),
        content: entry.content.clone(),
        content_format: entry.content_format,
        primary_mood_id: entry.primary_mood_id,
        secondary_mood_1_id: entry.secondary_mood_1_id,
        secondary_mood_2_id: entry.secondary_mood_2_id,
        category: entry.category.clone(),
        tags: entry.tags.clone(),
        is_draft: entry.is_draft,
        created_at: existing.map(|current| current.created_at).unwrap_or(now),
        updated_at: now,
    })
}

/// Retrieves an entry by date.
///
/// # Errors
///
/// Returns an error if the database operation fails.
/// Returns `Ok(None)` if no entry exists for the given date.
pub fn get_entry_by_date(conn: &Connection, date: NaiveDate) -> AppResult<Option<JournalEntry>> {
    debug!("Getting entry for date {}", date);

    conn.query_row(
        "SELECT * FROM entries WHERE entry_date = ?1",
        params![format_date(date)],
        entry_from_row,
    )
    .optional()
    .map_err(|e| DatabaseError::Sqlite(e).into())
}

/// Retrieves an entry by id.
///
/// # Errors
///
/// Returns an error if the database operation fails.
/// Returns `Ok(None)` if no entry has that id.
pub fn get_entry_by_id(conn: &Connection, id: i64) -> AppResult<Option<JournalEntry>> {
    debug!("Getting entry id {}", id);

    conn.query_row(
        "SELECT * FROM entries WHERE id = ?1",
        params![id],
        entry_from_row,
    )
    .optional()
    .map_err(|e| DatabaseError::Sqlite(e).into())
}

/// Lists every entry, newest date first.
///
/// # Errors
///
/// Returns an error if the database operation fails.
pub fn list_entries(conn: &Connection) -> AppResult<Vec<JournalEntry>> {
    list_entries_between(conn, None, None)
}

/// Lists entries whose date lies within the inclusive bounds, newest first.
///
/// A `None` bound leaves that side open.
///
/// # Errors
///
/// Returns an error if the database operation fails.
pub fn list_entries_between(
    conn: &Connection,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
) -> AppResult<Vec<JournalEntry>> {
    let mut stmt = conn
        .prepare(
            r#"
            SELECT * FROM entries
            WHERE (?1 IS NULL OR entry_date >= ?1)
              AND (?2 IS NULL OR entry_date <= ?2)
            ORDER BY entry_date DESC
            "#,
        )
        .map_err(DatabaseError::Sqlite)?;

    let entries = stmt
        .query_map(
            params![start.map(format_date), end.map(format_date)],
            entry_from_row,
        )
        .map_err(DatabaseError::Sqlite)?
        .collect::<Result<Vec<_>, _>>()
        .map_err(DatabaseError::Sqlite)?;

    debug!("Loaded {} entries", entries.len());
    Ok(entries)
}

/// Deletes an entry by id.
///
/// Returns `true` when a row was removed.
///
/// # Errors
///
/// Returns an error if the database operation fails.
pub fn delete_entry(conn: &Connection, id: i64) -> AppResult<bool> {
    debug!("Deleting entry id {}", id);

    let rows_affected = conn
        .execute("DELETE FROM entries WHERE id = ?1", params![id])
        .map_err(DatabaseError::Sqlite)?;

    Ok(rows_affected > 0)
}

/// Every tag ever used, deduplicated and sorted alphabetically.
///
/// # Errors
///
/// Returns an error if the database operation fails.
pub fn all_tags(conn: &Connection) -> AppResult<Vec<String>> {
    let mut stmt = conn
        .prepare("SELECT tags FROM entries WHERE tags IS NOT NULL AND tags != ''")
        .map_err(DatabaseError::Sqlite)?;

    let raw_tags = stmt
        .query_map([], |row| row.get::<_, String>(0))
        .map_err(DatabaseError::Sqlite)?
        .collect::<Result<Vec<_>, _>>()
        .map_err(DatabaseError::Sqlite)?;

    let tags: BTreeSet<String> = raw_tags.iter().flat_map(|raw| split_tags(raw)).collect();
    Ok(tags.into_iter().collect())
}
