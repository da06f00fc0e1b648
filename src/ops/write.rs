//! Writing an entry from command-line input.

use crate::cli::WriteArgs;
use crate::db::entries::{ContentFormat, JournalEntry, NewEntry};
use crate::errors::{AppError, AppResult};
use crate::journal::Journal;
use chrono::{DateTime, NaiveDate, Utc};
use std::io::Write;
use tracing::debug;

const MAX_SECONDARY_MOODS: usize = 2;

fn non_blank(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

fn resolve_mood(journal: &Journal, name: &str) -> AppResult<i64> {
    journal
        .find_mood(name)?
        .map(|mood| mood.id)
        .ok_or_else(|| {
            AppError::Journal(format!(
                "Unknown mood '{}'. Run `jupdate moods` to see the catalog.",
                name
            ))
        })
}

/// Saves the entry described by `args` with the given `content`.
///
/// The entry goes to `args.date`, or `today` when no date was given. Mood
/// names are resolved against the catalog, ignoring case.
///
/// # Errors
///
/// Returns `AppError::Journal` for an unknown mood or format, more than two
/// secondary moods, or any validation failure from [`Journal::save_entry`].
pub fn write_entry<W: Write>(
    journal: &Journal,
    args: &WriteArgs,
    content: String,
    today: NaiveDate,
    now: DateTime<Utc>,
    out: &mut W,
) -> AppResult<JournalEntry> {
    if args.also.len() > MAX_SECONDARY_MOODS {
        return Err(AppError::Journal(format!(
            "At most {} secondary moods are allowed",
            MAX_SECONDARY_MOODS
        )));
    }

    let content_format = ContentFormat::parse(&args.format).ok_or_else(|| {
        AppError::Journal(format!(
            "Unknown format '{}': expected markdown or richtext",
            args.format
        ))
    })?;

    let primary_mood_id = resolve_mood(journal, &args.mood)?;
    let secondary = args
        .also
        .iter()
        .map(|name| resolve_mood(journal, name))
        .collect::<AppResult<Vec<i64>>>()?;

    let entry = NewEntry {
        entry_date: args.date.unwrap_or(today),
        title: non_blank(&args.title),
        content,
        content_format,
        primary_mood_id,
        secondary_mood_1_id: secondary.first().copied(),
        secondary_mood_2_id: secondary.get(1).copied(),
        category: non_blank(&args.category),
        tags: non_blank(&args.tags),
        is_draft: args.draft,
    };
    debug!("Writing entry for {}", entry.entry_date);

    let stored = journal.save_entry(&entry, now)?;
    writeln!(
        out,
        "Saved {}entry #{} for {}",
        if stored.is_draft { "draft " } else { "" },
        stored.id,
        stored.entry_date
    )?;
    Ok(stored)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use chrono::TimeZone;
    use tempfile::TempDir;

    fn setup_journal() -> (TempDir, Journal) {
        let temp_dir = TempDir::new().unwrap();
        let journal = Journal::open(&Config {
            data_dir: temp_dir.path().to_path_buf(),
        })
        .unwrap();
        (temp_dir, journal)
    }

    fn args(mood: &str) -> WriteArgs {
        WriteArgs {
            date: None,
            mood: mood.to_string(),
            also: Vec::new(),
            title: None,
            category: None,
            tags: None,
            format: "markdown".to_string(),
            draft: false,
            content: None,
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 2, 1).unwrap()
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 2, 1, 9, 30, 0).unwrap()
    }

    #[test]
    fn test_write_entry_defaults_to_today() {
        let (_dir, journal) = setup_journal();
        let mut out = Vec::new();

        let stored = write_entry(&journal, &args("happy"), "Hello".to_string(), today(), now(), &mut out).unwrap();

        assert_eq!(stored.entry_date, today());
        assert_eq!(journal.find_mood("Happy").unwrap().unwrap().id, stored.primary_mood_id);
        let printed = String::from_utf8(out).unwrap();
        assert!(printed.contains("Saved entry #"));
        assert!(printed.contains("2024-02-01"));
    }

    #[test]
    fn test_write_entry_resolves_secondary_moods_and_blanks() {
        let (_dir, journal) = setup_journal();
        let mut request = args("Sad");
        request.also = vec!["calm".to_string(), "Lonely".to_string()];
        request.title = Some("  ".to_string());
        request.tags = Some("rain, home".to_string());
        request.format = "RichText".to_string();

        let stored = write_entry(&journal, &request, "Grey day".to_string(), today(), now(), &mut Vec::new()).unwrap();

        assert_eq!(stored.secondary_mood_ids().len(), 2);
        assert_eq!(stored.title, None);
        assert_eq!(stored.tags.as_deref(), Some("rain, home"));
        assert_eq!(stored.content_format, ContentFormat::RichText);
    }

    #[test]
    fn test_write_entry_rejects_bad_input() {
        let (_dir, journal) = setup_journal();

        let unknown = write_entry(&journal, &args("ecstatic"), "x".to_string(), today(), now(), &mut Vec::new());
        assert!(matches!(unknown, Err(AppError::Journal(msg)) if msg.contains("Unknown mood")));

        let mut too_many = args("happy");
        too_many.also = vec!["calm".into(), "sad".into(), "bored".into()];
        assert!(write_entry(&journal, &too_many, "x".to_string(), today(), now(), &mut Vec::new()).is_err());

        let mut bad_format = args("happy");
        bad_format.format = "html".to_string();
        assert!(write_entry(&journal, &bad_format, "x".to_string(), today(), now(), &mut Vec::new()).is_err());

        assert!(journal.all_entries().unwrap().is_empty());
    }
}
