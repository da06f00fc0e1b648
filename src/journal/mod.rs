//! Journal access layer for the jupdate application.
//!
//! `Journal` is the façade front ends talk to. It owns the pooled database
//! handle, validates entries before they are written, and maps the raw store
//! operations in `db` onto calls that read like the questions a user asks:
//! "what did I write on this day", "show my recent entries", "which tags have
//! I used".
//!
//! Clock values are passed in rather than read here so callers (and tests)
//! decide what "now" is.


use crate::analytics::DateRange;
use crate::config::{self, Config};
use crate::db::entries::{self, JournalEntry, NewEntry};
use crate::db::moods::{self, Mood};
use crate::db::settings::{self, Theme, UserSettings};
use crate::db::Database;
use crate::errors::{AppError, AppResult, DatabaseError};
use chrono::{DateTime, NaiveDate, Utc};
use tracing::{debug, info, warn};

/// Journal operations over a single database.
#[derive(Clone)]
pub struct Journal {
    db: Database,
}

impl Journal {
    /// Opens the journal described by `config`.
    ///
    /// Creates the data directory when missing, opens the database and brings
    /// its schema up to date.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid, the directory cannot
    /// be created, or the database cannot be opened or migrated.
    pub fn open(config: &Config) -> AppResult<Self> {
        config.validate()?;
        config::ensure_data_dir(&config.data_dir)?;

        let db = Database::open(&config.db_path())?;
        db.initialize_schema()?;

        info!("Journal opened");
        Ok(Journal { db })
    }

    /// Wraps an already opened and initialized database.
    pub fn from_database(db: Database) -> Self {
        Journal { db }
    }

    /// The underlying database handle.
    pub fn database(&self) -> &Database {
        &self.db
    }

    /// Saves the entry for `entry.entry_date`, replacing any entry already
    /// written for that day.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Journal` when:
    /// - the content is blank and the entry is not a draft
    /// - the primary or a secondary mood does not exist
    /// - a secondary mood repeats the primary mood or the other secondary mood
    ///
    /// Database failures are returned as `AppError::Database`.
    pub fn save_entry(&self, entry: &NewEntry, now: DateTime<Utc>) -> AppResult<JournalEntry> {
        let conn = self.db.get_conn()?;

        if !entry.is_draft && entry.content.trim().is_empty() {
            return Err(AppError::Journal(
                "Entry content cannot be empty (save it as a draft instead)".to_string(),
            ));
        }

        if moods::get_mood(&conn, entry.primary_mood_id)?.is_none() {
            return Err(AppError::Journal(format!(
                "Unknown mood id {}",
                entry.primary_mood_id
            )));
        }

        let secondary: Vec<i64> = [entry.secondary_mood_1_id, entry.secondary_mood_2_id]
            .into_iter()
            .flatten()
            .collect();
        for (idx, mood_id) in secondary.iter().enumerate() {
            if *mood_id == entry.primary_mood_id {
                return Err(AppError::Journal(
                    "Secondary mood cannot repeat the primary mood".to_string(),
                ));
            }
            if secondary[..idx].contains(mood_id) {
                return Err(AppError::Journal(
                    "Secondary moods must be different".to_string(),
                ));
            }
            if moods::get_mood(&conn, *mood_id)?.is_none() {
                return Err(AppError::Journal(format!("Unknown mood id {}", mood_id)));
            }
        }

        let stored = entries::upsert_entry(&conn, entry, now)?;
        info!(
            "Saved entry {} for {}{}",
            stored.id,
            stored.entry_date,
            if stored.is_draft { " (draft)" } else { "" }
        );
        Ok(stored)
    }

    /// The entry written for `date`, if any.
    pub fn entry_for_date(&self, date: NaiveDate) -> AppResult<Option<JournalEntry>> {
        let conn = self.db.get_conn()?;
        entries::get_entry_by_date(&conn, date)
    }

    /// The entry with the given id, if any.
    pub fn entry_by_id(&self, id: i64) -> AppResult<Option<JournalEntry>> {
        let conn = self.db.get_conn()?;
        entries::get_entry_by_id(&conn, id)
    }

    /// Every entry, newest first.
    pub fn all_entries(&self) -> AppResult<Vec<JournalEntry>> {
        let conn = self.db.get_conn()?;
        entries::list_entries(&conn)
    }

    /// The `count` most recent entries, newest first.
    pub fn recent_entries(&self, count: usize) -> AppResult<Vec<JournalEntry>> {
        let mut all = self.all_entries()?;
        all.truncate(count);
        Ok(all)
    }

    /// Entries dated within `range`, newest first.
    pub fn entries_between(&self, range: &DateRange) -> AppResult<Vec<JournalEntry>> {
        let conn = self.db.get_conn()?;
        entries::list_entries_between(&conn, range.start, range.end)
    }

    /// Permanently deletes an entry.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::NotFound` when no entry has that id.
    pub fn delete_entry(&self, id: i64) -> AppResult<()> {
        let conn = self.db.get_conn()?;
        if entries::delete_entry(&conn, id)? {
            info!("Deleted entry {}", id);
            Ok(())
        } else {
            Err(DatabaseError::NotFound(format!("Entry with id {} not found", id)).into())
        }
    }

    /// Every tag in use, sorted alphabetically.
    pub fn all_tags(&self) -> AppResult<Vec<String>> {
        let conn = self.db.get_conn()?;
        entries::all_tags(&conn)
    }

    /// The mood catalog.
    pub fn moods(&self) -> AppResult<Vec<Mood>> {
        let conn = self.db.get_conn()?;
        moods::list_moods(&conn)
    }

    /// Looks a mood up by name, ignoring case.
    pub fn find_mood(&self, name: &str) -> AppResult<Option<Mood>> {
        let conn = self.db.get_conn()?;
        moods::find_mood_by_name(&conn, name)
    }

    /// Current user settings.
    pub fn settings(&self) -> AppResult<UserSettings> {
        let conn = self.db.get_conn()?;
        settings::get_settings(&conn)
    }

    /// The configured theme.
    ///
    /// Never fails: if the settings cannot be read the default theme is
    /// returned and the failure logged.
    pub fn theme(&self) -> Theme {
        match self.settings() {
            Ok(settings) => settings.theme,
            Err(e) => {
                warn!("Could not load theme, using default: {}", e);
                Theme::default()
            }
        }
    }

    /// Stores a new theme choice. `custom_data` is only kept for
    /// [`Theme::Custom`].
    pub fn set_theme(&self, theme: Theme, custom_data: Option<String>) -> AppResult<()> {
        let conn = self.db.get_conn()?;
        let mut current = settings::get_settings(&conn)?;

        current.theme = theme;
        current.custom_theme_data = match theme {
            Theme::Custom => custom_data,
            Theme::Light | Theme::Dark => None,
        };

        debug!("Switching theme to {}", theme);
        settings::save_settings(&conn, &current)
    }
}
