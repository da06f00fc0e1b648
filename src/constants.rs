//! Constants used throughout the application.
//!
//! This module contains all constants used in the jupdate application, organized
//! into logical groups. Having constants centralized makes them easier to find,
//! modify, and reference consistently.

// Application Metadata
/// The name of the application.
pub const APP_NAME: &str = "jupdate";
/// The description of the application used in CLI help text.
pub const APP_DESCRIPTION: &str = "A daily journal with moods, tags and writing statistics";

// CLI Arguments & Defaults
/// Log format identifier for plain text.
pub const LOG_FORMAT_TEXT: &str = "text";
/// Log format identifier for JSON.
pub const LOG_FORMAT_JSON: &str = "json";
/// Default log level.
pub const DEFAULT_LOG_LEVEL: &str = "warn";
/// Log level used when `--verbose` is passed.
pub const VERBOSE_LOG_LEVEL: &str = "debug";
/// Number of entries shown by `list` when no count is given.
pub const DEFAULT_RECENT_ENTRIES: usize = 5;
/// Number of moods reported by the most-frequent-moods statistic.
pub const DEFAULT_TOP_MOODS: usize = 5;
/// Number of tags reported by the most-used-tags statistic.
pub const DEFAULT_TOP_TAGS: usize = 10;

// Configuration Keys & Environment Variables
/// Environment variable for specifying the data directory.
pub const ENV_VAR_JUPDATE_DIR: &str = "JUPDATE_DIR";
/// Environment variable supplying the PIN for non-interactive unlocking.
pub const ENV_VAR_JUPDATE_PIN: &str = "JUPDATE_PIN";
/// Standard environment variable for the user's home directory.
pub const ENV_VAR_HOME: &str = "HOME";
/// Default sub-directory for the journal database within the user's home directory.
pub const DEFAULT_DATA_SUBDIR: &str = ".jupdate";
/// File name of the journal database inside the data directory.
pub const DATABASE_FILE_NAME: &str = "journal.db";
/// Placeholder string for redacted information in debug output.
pub const REDACTED_PLACEHOLDER: &str = "[REDACTED]";

// File System Parameters
/// Default POSIX permissions for newly created directories (owner read/write/execute).
#[cfg(unix)]
pub const DEFAULT_DIR_PERMISSIONS: u32 = 0o700;

// Database
/// Maximum number of pooled SQLite connections.
pub const DB_POOL_SIZE: u32 = 5;
/// Fixed primary key of the settings singleton row.
pub const SETTINGS_ROW_ID: i64 = 1;

// Date/Time Logic
/// Date format string for ISO date format (YYYY-MM-DD).
pub const DATE_FORMAT_ISO: &str = "%Y-%m-%d";
/// Date format string for compact date format (YYYYMMDD).
pub const DATE_FORMAT_COMPACT: &str = "%Y%m%d";
/// Fallback timestamp format for rows written without an offset.
pub const TIMESTAMP_FORMAT_NAIVE: &str = "%Y-%m-%dT%H:%M:%S%.f";

// Content
/// Characters treated as markdown formatting and ignored when counting words.
pub const MARKDOWN_PUNCTUATION: &[char] = &['#', '*', '_', '`', '[', ']', '(', ')'];
/// Name reported for entries whose primary mood is missing from the catalog.
pub const UNKNOWN_MOOD_NAME: &str = "Unknown";

// Logging Configuration
/// Service name used in tracing spans and structured logs.
pub const TRACING_SERVICE_NAME: &str = "jupdate";
/// Name for the root tracing span covering an application invocation.
pub const TRACING_ROOT_SPAN_NAME: &str = "app_invocation";
