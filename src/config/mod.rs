//! Configuration management for the jupdate application.
//!
//! This module handles loading and validating configuration settings from environment
//! variables, with sensible defaults. It decides where the journal database lives.
//!
//! # Environment Variables
//!
//! - `JUPDATE_DIR`: Path to the data directory (defaults to ~/.jupdate)
//! - `HOME`: Used for expanding the default data directory path

use crate::constants;
use crate::errors::{AppError, AppResult};
use std::env;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Configuration for the jupdate application.
///
/// # Examples
///
/// Creating a configuration manually:
/// ```
/// use jupdate::Config;
/// use std::path::PathBuf;
///
/// let config = Config {
///     data_dir: PathBuf::from("/path/to/data"),
/// };
/// assert_eq!(config.db_path(), PathBuf::from("/path/to/data/journal.db"));
/// ```
#[derive(Clone)]
pub struct Config {
    /// Directory holding the journal database.
    ///
    /// Loaded from the JUPDATE_DIR environment variable with a fallback
    /// to ~/.jupdate if not specified.
    pub data_dir: PathBuf,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("data_dir", &constants::REDACTED_PLACEHOLDER)
            .finish()
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            data_dir: PathBuf::from(""),
        }
    }
}

impl Config {
    /// Loads configuration from environment variables with sensible defaults.
    ///
    /// The data directory path is expanded with `shellexpand` to handle `~`
    /// and environment variable references.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if path expansion fails or yields an empty path.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use jupdate::Config;
    ///
    /// match Config::load() {
    ///     Ok(config) => println!("Database: {}", config.db_path().display()),
    ///     Err(err) => eprintln!("Failed to load config: {}", err),
    /// }
    /// ```
    pub fn load() -> AppResult<Self> {
        let data_dir_str = env::var(constants::ENV_VAR_JUPDATE_DIR).unwrap_or_else(|_| {
            let home = env::var(constants::ENV_VAR_HOME).unwrap_or_default();
            format!("{}/{}", home, constants::DEFAULT_DATA_SUBDIR)
        });

        let expanded_path = shellexpand::full(&data_dir_str)
            .map_err(|e| AppError::Config(format!("Failed to expand path: {}", e)))?;

        let data_dir = PathBuf::from(expanded_path.into_owned());

        if data_dir.as_os_str().is_empty() {
            return Err(AppError::Config("Data directory path is empty".to_string()));
        }

        Ok(Config { data_dir })
    }

    /// Validates that the configuration is usable.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` when the data directory is empty or relative.
    ///
    /// # Examples
    ///
    /// ```
    /// use jupdate::Config;
    /// use std::path::PathBuf;
    ///
    /// let valid = Config { data_dir: PathBuf::from("/absolute/path") };
    /// assert!(valid.validate().is_ok());
    ///
    /// let invalid = Config { data_dir: PathBuf::from("relative/path") };
    /// assert!(invalid.validate().is_err());
    /// ```
    pub fn validate(&self) -> AppResult<()> {
        if self.data_dir.as_os_str().is_empty() {
            return Err(AppError::Config("Data directory path is empty".to_string()));
        }

        if !self.data_dir.is_absolute() {
            return Err(AppError::Config(
                "Data directory must be an absolute path".to_string(),
            ));
        }

        Ok(())
    }

    /// Path of the SQLite journal file inside the data directory.
    pub fn db_path(&self) -> PathBuf {
        self.data_dir.join(constants::DATABASE_FILE_NAME)
    }
}

/// Creates the data directory (and parents) if it does not exist yet.
///
/// On unix the directory is restricted to the owner.
pub fn ensure_data_dir(dir: &Path) -> AppResult<()> {
    if dir.exists() {
        return Ok(());
    }

    debug!("Creating data directory");
    fs::create_dir_all(dir)?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(
            dir,
            fs::Permissions::from_mode(constants::DEFAULT_DIR_PERMISSIONS),
        )?;
    }

    Ok(())
}
