//! Reading entries, tags and moods back out of the journal.

use crate::db::entries::JournalEntry;
use crate::db::moods::Mood;
use crate::errors::{AppResult, DatabaseError};
use crate::journal::Journal;
use chrono::NaiveDate;
use std::collections::HashMap;
use std::io::Write;

/// Which entry `show` should print.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntrySelector {
    Date(NaiveDate),
    Id(i64),
}

struct MoodLabels {
    by_id: HashMap<i64, Mood>,
}

impl MoodLabels {
    fn load(journal: &Journal) -> AppResult<Self> {
        let by_id = journal
            .moods()?
            .into_iter()
            .map(|mood| (mood.id, mood))
            .collect();
        Ok(MoodLabels { by_id })
    }

    fn label(&self, id: i64) -> String {
        match self.by_id.get(&id) {
            Some(mood) => format!("{} {}", mood.emoji, mood.name),
            None => format!("? mood #{}", id),
        }
    }
}

fn summary_line(entry: &JournalEntry) -> String {
    let text = entry
        .title
        .as_deref()
        .or_else(|| entry.content.lines().find(|line| !line.trim().is_empty()))
        .unwrap_or("")
        .trim();

    let mut line: String = text.chars().take(60).collect();
    if text.chars().count() > 60 {
        line.push('…');
    }
    line
}

/// Prints one entry in full.
///
/// # Errors
///
/// Returns `DatabaseError::NotFound` when there is no such entry.
pub fn show_entry<W: Write>(journal: &Journal, selector: EntrySelector, out: &mut W) -> AppResult<()> {
    let found = match selector {
        EntrySelector::Date(date) => journal.entry_for_date(date)?,
        EntrySelector::Id(id) => journal.entry_by_id(id)?,
    };

    let entry = found.ok_or_else(|| {
        DatabaseError::NotFound(match selector {
            EntrySelector::Date(date) => format!("No entry for {}", date),
            EntrySelector::Id(id) => format!("No entry with id {}", id),
        })
    })?;

    let moods = MoodLabels::load(journal)?;

    writeln!(out, "{} (#{}){}", entry.entry_date, entry.id, if entry.is_draft { " [draft]" } else { "" })?;
    if let Some(title) = &entry.title {
        writeln!(out, "Title: {}", title)?;
    }

    let mut mood_line = moods.label(entry.primary_mood_id);
    let secondary: Vec<String> = entry
        .secondary_mood_ids()
        .into_iter()
        .map(|id| moods.label(id))
        .collect();
    if !secondary.is_empty() {
        mood_line.push_str(&format!(" (also {})", secondary.join(", ")));
    }
    writeln!(out, "Mood: {}", mood_line)?;

    if let Some(category) = &entry.category {
        writeln!(out, "Category: {}", category)?;
    }
    let tags = entry.tag_list();
    if !tags.is_empty() {
        writeln!(out, "Tags: {}", tags.join(", "))?;
    }
    writeln!(out, "Format: {}", entry.content_format)?;
    writeln!(out)?;
    writeln!(out, "{}", entry.content)?;
    Ok(())
}

/// Prints one line per entry, newest first. `limit` of `None` lists all.
pub fn list_entries<W: Write>(journal: &Journal, limit: Option<usize>, out: &mut W) -> AppResult<()> {
    let entries = match limit {
        Some(count) => journal.recent_entries(count)?,
        None => journal.all_entries()?,
    };

    if entries.is_empty() {
        writeln!(out, "No entries yet.")?;
        return Ok(());
    }

    let moods = MoodLabels::load(journal)?;
    for entry in &entries {
        writeln!(
            out,
            "{}  #{:<4} {:<14} {}{}",
            entry.entry_date,
            entry.id,
            moods.label(entry.primary_mood_id),
            summary_line(entry),
            if entry.is_draft { " [draft]" } else { "" }
        )?;
    }
    Ok(())
}

/// Deletes an entry and confirms it.
pub fn delete_entry<W: Write>(journal: &Journal, id: i64, out: &mut W) -> AppResult<()> {
    journal.delete_entry(id)?;
    writeln!(out, "Deleted entry #{}", id)?;
    Ok(())
}

/// Prints every tag in use, one per line.
pub fn list_tags<W: Write>(journal: &Journal, out: &mut W) -> AppResult<()> {
    let tags = journal.all_tags()?;
    if tags.is_empty() {
        writeln!(out, "No tags yet.")?;
    }
    for tag in tags {
        writeln!(out, "{}", tag)?;
    }
    Ok(())
}

/// Prints the mood catalog grouped by category.
pub fn list_moods<W: Write>(journal: &Journal, out: &mut W) -> AppResult<()> {
    let mut current_category = None;
    for mood in journal.moods()? {
        if current_category != Some(mood.category) {
            writeln!(out, "{}:", mood.category)?;
            current_category = Some(mood.category);
        }
        writeln!(out, "  {} {}", mood.emoji, mood.name)?;
    }
    Ok(())
}
