//! The singleton user settings row.
//!
//! Settings live in row `id = 1` of the `settings` table. Reading a database
//! that has never saved settings yields the defaults without writing anything.

use crate::constants;
use crate::errors::{AppResult, DatabaseError};
use rusqlite::{params, Connection, OptionalExtension};
use serde::Serialize;
use std::fmt;
use tracing::{debug, warn};

/// Display theme identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
    /// Colors come from `UserSettings::custom_theme_data`.
    Custom,
}

impl Theme {
    /// Convert to database string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
            Theme::Custom => "custom",
        }
    }

    /// Parse from database string representation.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Some(Theme::Light),
            "dark" => Some(Theme::Dark),
            "custom" => Some(Theme::Custom),
            _ => None,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// User preferences stored in the settings row.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UserSettings {
    /// Hex digest of the PIN, `None` when no PIN is configured.
    pub pin_hash: Option<String>,
    pub theme: Theme,
    /// Opaque JSON payload for the custom theme.
    pub custom_theme_data: Option<String>,
}

/// Loads the settings row, or the defaults if it was never written.
///
/// An unrecognized theme value reads as the default theme.
///
/// # Errors
///
/// Returns an error if the database operation fails.
pub fn get_settings(conn: &Connection) -> AppResult<UserSettings> {
    let row = conn
        .query_row(
            "SELECT pin_hash, theme, custom_theme_data FROM settings WHERE id = ?1",
            params![constants::SETTINGS_ROW_ID],
            |row| {
                Ok((
                    row.get::<_, Option<String>>(0)?,
                    row.get::<_, Option<String>>(1)?,
                    row.get::<_, Option<String>>(2)?,
                ))
            },
        )
        .optional()
        .map_err(DatabaseError::Sqlite)?;

    let Some((pin_hash, raw_theme, custom_theme_data)) = row else {
        debug!("No settings row yet, using defaults");
        return Ok(UserSettings::default());
    };

    let theme = match raw_theme.as_deref() {
        None => Theme::default(),
        Some(raw) => Theme::parse(raw).unwrap_or_else(|| {
            warn!("Unknown theme '{}' in settings, using default", raw);
            Theme::default()
        }),
    };

    Ok(UserSettings {
        pin_hash,
        theme,
        custom_theme_data,
    })
}

/// Writes every field of the settings row, creating it if needed.
///
/// # Errors
///
/// Returns an error if the database operation fails.
pub fn save_settings(conn: &Connection, settings: &UserSettings) -> AppResult<()> {
    debug!("Saving settings (theme {})", settings.theme);

    conn.execute(
        r#"
        INSERT INTO settings (id, pin_hash, theme, custom_theme_data)
        VALUES (?1, ?2, ?3, ?4)
        ON CONFLICT(id) DO UPDATE SET
            pin_hash = excluded.pin_hash,
            theme = excluded.theme,
            custom_theme_data = excluded.custom_theme_data
        "#,
        params![
            constants::SETTINGS_ROW_ID,
            settings.pin_hash,
            settings.theme.as_str(),
            settings.custom_theme_data,
        ],
    )
    .map_err(DatabaseError::Sqlite)?;

    Ok(())
}

/// Removes the stored PIN hash, leaving the other settings alone.
///
/// # Errors
///
/// Returns an error if the database operation fails.
pub fn clear_pin(conn: &Connection) -> AppResult<()> {
    conn.execute(
        "UPDATE settings SET pin_hash = NULL WHERE id = ?1",
        params![constants::SETTINGS_ROW_ID],
    )
    .map_err(DatabaseError::Sqlite)?;
    Ok(())
}
