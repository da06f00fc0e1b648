/*!
# jupdate

jupdate is a personal journal: one entry per calendar day, each tagged with a
primary mood (and up to two secondary moods), an optional category and free
tags. Entries live in a local SQLite database; statistics such as writing
streaks, mood distribution, tag usage and word-count trends are computed from
them on demand.

## Core Features

- Write, show, list and delete daily entries, including drafts
- A fixed catalog of moods in positive, neutral and negative categories
- Streaks, missed days, mood and tag rankings and monthly word counts
- Optional PIN protection and a persisted theme preference

## Architecture

- `config`: Configuration loading and validation
- `db`: SQLite store with pooled connections and ordered migrations
- `journal`: Validated entry access over the store
- `analytics`: Statistics over entry snapshots
- `auth`: PIN hashing and the unlock session
- `ops`: User-facing operations behind each CLI command
- `cli`: Command-line argument parsing using clap
- `errors`: Error handling infrastructure

## Usage Example

```rust,no_run
use chrono::{Local, Utc};
use jupdate::analytics::Analytics;
use jupdate::db::entries::NewEntry;
use jupdate::{Config, Journal};

fn main() -> jupdate::AppResult<()> {
    let config = Config::load()?;
    let journal = Journal::open(&config)?;

    let happy = journal.find_mood("Happy")?.expect("catalog is seeded");
    let today = Local::now().date_naive();
    journal.save_entry(
        &NewEntry {
            entry_date: today,
            content: "Finished the first draft.".to_string(),
            primary_mood_id: happy.id,
            ..NewEntry::default()
        },
        Utc::now(),
    )?;

    let streak = Analytics::new(journal.database()).current_streak(today)?;
    println!("Current streak: {}", streak);
    Ok(())
}
```
*/

/// Statistics computed from journal entries
pub mod analytics;
/// PIN protection and the unlock session
pub mod auth;
/// Command-line interface for parsing and handling user arguments
pub mod cli;
/// Configuration loading and management
pub mod config;
/// Application-wide constants
pub mod constants;
/// SQLite persistence
pub mod db;
/// Error types and utilities for error handling
pub mod errors;
/// Journal access layer
pub mod journal;
/// Operations behind each CLI command
pub mod ops;

// Re-export important types for convenience
pub use cli::CliArgs;
pub use config::Config;
pub use errors::{AppError, AppResult};
pub use journal::Journal;
