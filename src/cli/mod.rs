//! Command-line interface for the jupdate application.
//!
//! Arguments are parsed with clap's derive API. Each subcommand maps onto one
//! operation in `ops`; global flags control logging.

use crate::constants;
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use std::fmt;
use std::str::FromStr;

/// A daily journal with moods, tags and writing statistics
#[derive(Parser, Debug)]
#[clap(name = "jupdate", about = constants::APP_DESCRIPTION)]
#[clap(author, version, long_about = None)]
pub struct CliArgs {
    /// Print verbose output (debug-level logs)
    #[clap(short = 'v', long, global = true)]
    pub verbose: bool,

    /// Log output format
    #[clap(
        long,
        global = true,
        default_value = constants::LOG_FORMAT_TEXT,
        value_parser = [constants::LOG_FORMAT_TEXT, constants::LOG_FORMAT_JSON]
    )]
    pub log_format: String,

    #[clap(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Commands {
    /// Write (or replace) the entry for a day
    Write(WriteArgs),

    /// Show a single entry
    Show {
        /// Date of the entry (YYYY-MM-DD or YYYYMMDD, defaults to today)
        #[clap(short = 'd', long, value_parser = parse_date_arg, conflicts_with = "id")]
        date: Option<NaiveDate>,

        /// Id of the entry
        #[clap(long)]
        id: Option<i64>,
    },

    /// List recent entries, newest first
    List {
        /// Number of entries to list
        #[clap(short = 'n', long, default_value_t = constants::DEFAULT_RECENT_ENTRIES)]
        recent: usize,

        /// List every entry
        #[clap(long, conflicts_with = "recent")]
        all: bool,
    },

    /// Permanently delete an entry
    Delete {
        /// Id of the entry to delete
        id: i64,
    },

    /// List every tag in use
    Tags,

    /// List the mood catalog
    Moods,

    /// Show writing statistics
    Stats(StatsArgs),

    /// List days without an entry
    Missed {
        /// First day to check
        #[clap(long, value_parser = parse_date_arg)]
        from: NaiveDate,

        /// Last day to check (defaults to today)
        #[clap(long, value_parser = parse_date_arg)]
        to: Option<NaiveDate>,
    },

    /// Manage the journal PIN
    Pin {
        #[clap(subcommand)]
        action: PinAction,
    },

    /// Show or change the theme
    Theme {
        /// New theme: light, dark or custom
        name: Option<String>,

        /// JSON payload for the custom theme
        #[clap(long)]
        custom_data: Option<String>,
    },
}

#[derive(Args, Clone, PartialEq)]
pub struct WriteArgs {
    /// Date of the entry (YYYY-MM-DD or YYYYMMDD, defaults to today)
    #[clap(short = 'd', long, value_parser = parse_date_arg)]
    pub date: Option<NaiveDate>,

    /// Primary mood name (see `jupdate moods`)
    #[clap(short = 'm', long)]
    pub mood: String,

    /// Secondary mood name, at most twice
    #[clap(long)]
    pub also: Vec<String>,

    /// Entry title
    #[clap(long)]
    pub title: Option<String>,

    /// Free-form category
    #[clap(long)]
    pub category: Option<String>,

    /// Comma-separated tags
    #[clap(short = 't', long)]
    pub tags: Option<String>,

    /// Content format: markdown or richtext
    #[clap(long, default_value = "markdown")]
    pub format: String,

    /// Save as a draft (content may be empty)
    #[clap(long)]
    pub draft: bool,

    /// Entry text; read from stdin when omitted
    #[clap(short = 'c', long)]
    pub content: Option<String>,
}

// Entry text stays out of debug logs
impl fmt::Debug for WriteArgs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WriteArgs")
            .field("date", &self.date)
            .field("mood", &self.mood)
            .field("also", &self.also)
            .field(
                "title",
                &self.title.as_ref().map(|_| constants::REDACTED_PLACEHOLDER),
            )
            .field("category", &self.category)
            .field("tags", &self.tags)
            .field("format", &self.format)
            .field("draft", &self.draft)
            .field(
                "content",
                &self.content.as_ref().map(|_| constants::REDACTED_PLACEHOLDER),
            )
            .finish()
    }
}

#[derive(Args, Debug, Clone, PartialEq)]
pub struct StatsArgs {
    /// Only consider entries from this day on
    #[clap(long, value_parser = parse_date_arg)]
    pub from: Option<NaiveDate>,

    /// Only consider entries up to this day
    #[clap(long, value_parser = parse_date_arg)]
    pub to: Option<NaiveDate>,

    /// Number of moods in the most-frequent list
    #[clap(long, default_value_t = constants::DEFAULT_TOP_MOODS)]
    pub top_moods: usize,

    /// Number of tags in the most-used list
    #[clap(long, default_value_t = constants::DEFAULT_TOP_TAGS)]
    pub top_tags: usize,

    /// Print the statistics as JSON
    #[clap(long)]
    pub json: bool,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum PinAction {
    /// Set or change the PIN
    Set,
    /// Remove the PIN
    Clear,
    /// Report whether a PIN is set
    Status,
    /// Check a PIN without changing anything
    Verify,
}

impl Commands {
    /// Whether the command reads or changes journal content, and so needs an
    /// unlocked session when a PIN is set.
    pub fn requires_unlock(&self) -> bool {
        match self {
            Commands::Moods | Commands::Theme { .. } => false,
            Commands::Pin { action } => matches!(action, PinAction::Set | PinAction::Clear),
            _ => true,
        }
    }
}

/// Parses a date given as `YYYY-MM-DD` or `YYYYMMDD`.
///
/// # Examples
///
/// ```
/// use jupdate::cli::parse_date_arg;
/// use chrono::NaiveDate;
///
/// let expected = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
/// assert_eq!(parse_date_arg("2024-01-15"), Ok(expected));
/// assert_eq!(parse_date_arg("20240115"), Ok(expected));
/// assert!(parse_date_arg("15/01/2024").is_err());
/// ```
pub fn parse_date_arg(value: &str) -> Result<NaiveDate, String> {
    NaiveDate::from_str(value)
        .or_else(|_| NaiveDate::parse_from_str(value, constants::DATE_FORMAT_COMPACT))
        .map_err(|_| {
            format!(
                "Invalid date '{}': expected YYYY-MM-DD or YYYYMMDD",
                value
            )
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_write_args() {
        let args = CliArgs::parse_from(vec![
            "jupdate", "write", "--mood", "happy", "--also", "calm", "--also", "curious",
            "-d", "20240115", "--tags", "work,gym", "--draft", "-c", "hello",
        ]);

        match args.command {
            Commands::Write(write) => {
                assert_eq!(write.mood, "happy");
                assert_eq!(write.also, vec!["calm", "curious"]);
                assert_eq!(write.date, Some(date(2024, 1, 15)));
                assert_eq!(write.tags.as_deref(), Some("work,gym"));
                assert_eq!(write.format, "markdown");
                assert!(write.draft);
                assert_eq!(write.content.as_deref(), Some("hello"));
            }
            other => panic!("Expected write command, got {:?}", other),
        }
    }

    #[test]
    fn test_write_args_debug_hides_entry_text() {
        let args = CliArgs::parse_from(vec![
            "jupdate", "write", "--mood", "calm", "--title", "Dear diary", "-c", "quiet evening",
        ]);

        let debug = format!("{:?}", args);
        assert!(debug.contains("calm"));
        assert!(debug.contains("[REDACTED]"));
        assert!(!debug.contains("Dear diary"));
        assert!(!debug.contains("quiet evening"));
    }

    #[test]
    fn test_write_requires_mood() {
        assert!(CliArgs::try_parse_from(vec!["jupdate", "write", "-c", "text"]).is_err());
    }

    #[test]
    fn test_global_flags() {
        let args = CliArgs::parse_from(vec!["jupdate", "tags"]);
        assert!(!args.verbose);
        assert_eq!(args.log_format, "text");

        let args = CliArgs::parse_from(vec!["jupdate", "moods", "-v", "--log-format", "json"]);
        assert!(args.verbose);
        assert_eq!(args.log_format, "json");
        assert_eq!(args.command, Commands::Moods);

        assert!(CliArgs::try_parse_from(vec!["jupdate", "--log-format", "xml", "tags"]).is_err());
    }

    #[test]
    fn test_list_defaults() {
        let args = CliArgs::parse_from(vec!["jupdate", "list"]);
        assert_eq!(
            args.command,
            Commands::List {
                recent: constants::DEFAULT_RECENT_ENTRIES,
                all: false
            }
        );
    }

    #[test]
    fn test_stats_args() {
        let args = CliArgs::parse_from(vec![
            "jupdate", "stats", "--from", "2024-01-01", "--to", "2024-01-31", "--top-tags", "3",
            "--json",
        ]);
        match args.command {
            Commands::Stats(stats) => {
                assert_eq!(stats.from, Some(date(2024, 1, 1)));
                assert_eq!(stats.to, Some(date(2024, 1, 31)));
                assert_eq!(stats.top_moods, constants::DEFAULT_TOP_MOODS);
                assert_eq!(stats.top_tags, 3);
                assert!(stats.json);
            }
            other => panic!("Expected stats command, got {:?}", other),
        }
    }

    #[test]
    fn test_invalid_date_rejected() {
        assert!(CliArgs::try_parse_from(vec!["jupdate", "show", "--date", "yesterday"]).is_err());
        assert!(CliArgs::try_parse_from(vec!["jupdate", "missed"]).is_err());
    }

    #[test]
    fn test_pin_subcommands() {
        let args = CliArgs::parse_from(vec!["jupdate", "pin", "status"]);
        assert_eq!(
            args.command,
            Commands::Pin {
                action: PinAction::Status
            }
        );
    }

    #[test]
    fn test_requires_unlock() {
        assert!(Commands::Tags.requires_unlock());
        assert!(Commands::Delete { id: 1 }.requires_unlock());
        assert!(!Commands::Moods.requires_unlock());
        assert!(!Commands::Pin { action: PinAction::Status }.requires_unlock());
        assert!(!Commands::Pin { action: PinAction::Verify }.requires_unlock());
        assert!(Commands::Pin { action: PinAction::Clear }.requires_unlock());
    }

    #[test]
    fn test_parse_date_arg() {
        assert_eq!(parse_date_arg("2023-01-15"), Ok(date(2023, 1, 15)));
        assert_eq!(parse_date_arg("20230115"), Ok(date(2023, 1, 15)));
        assert!(parse_date_arg("2023-02-30").is_err());
        assert!(parse_date_arg("invalid-date").is_err());
    }
}
