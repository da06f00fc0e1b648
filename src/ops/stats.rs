//! Printing statistics.

use crate::analytics::{Analytics, DateRange, Ranking, StatsOptions, StatsSummary};
use crate::cli::StatsArgs;
use crate::errors::{AppError, AppResult};
use crate::journal::Journal;
use chrono::NaiveDate;
use std::io::Write;

fn write_ranking<W: Write>(out: &mut W, heading: &str, ranking: &Ranking) -> AppResult<()> {
    writeln!(out, "{}:", heading)?;
    if ranking.is_empty() {
        writeln!(out, "  (none)")?;
    }
    for item in ranking.iter() {
        writeln!(out, "  {:<16} {}", item.label, item.count)?;
    }
    Ok(())
}

fn write_summary<W: Write>(out: &mut W, summary: &StatsSummary) -> AppResult<()> {
    writeln!(out, "Entries:         {}", summary.total_entries)?;
    writeln!(out, "Current streak:  {} day(s)", summary.current_streak)?;
    writeln!(out, "Longest streak:  {} day(s)", summary.longest_streak)?;
    if let Some(missed) = &summary.missed_days {
        writeln!(out, "Missed days:     {}", missed.len())?;
    }

    writeln!(out, "Mood distribution:")?;
    for (label, count) in summary.mood_distribution.as_pairs() {
        writeln!(out, "  {:<16} {}", label, count)?;
    }

    write_ranking(out, "Most frequent moods", &summary.top_moods)?;
    write_ranking(out, "Most used tags", &summary.top_tags)?;

    writeln!(out, "Average words per entry:")?;
    if summary.word_count_trend.is_empty() {
        writeln!(out, "  (none)")?;
    }
    for (month, average) in &summary.word_count_trend {
        writeln!(out, "  {:<16} {:.1}", month, average)?;
    }
    Ok(())
}

/// Prints every statistic, as text or as JSON.
pub fn show_stats<W: Write>(
    journal: &Journal,
    args: &StatsArgs,
    today: NaiveDate,
    out: &mut W,
) -> AppResult<StatsSummary> {
    let options = StatsOptions {
        range: DateRange::new(args.from, args.to),
        top_moods: args.top_moods,
        top_tags: args.top_tags,
    };
    let summary = Analytics::new(journal.database()).summary(today, &options)?;

    if args.json {
        let json = serde_json::to_string_pretty(&summary)
            .map_err(|e| AppError::Journal(format!("Failed to serialize statistics: {}", e)))?;
        writeln!(out, "{}", json)?;
    } else {
        write_summary(out, &summary)?;
    }
    Ok(summary)
}

/// Prints the days in `[from, to]` without an entry.
pub fn show_missed_days<W: Write>(
    journal: &Journal,
    from: NaiveDate,
    to: NaiveDate,
    out: &mut W,
) -> AppResult<Vec<NaiveDate>> {
    let missed = Analytics::new(journal.database()).missed_days(from, to)?;

    if missed.is_empty() {
        writeln!(out, "No missed days between {} and {}.", from, to)?;
    }
    for day in &missed {
        writeln!(out, "{}", day)?;
    }
    Ok(missed)
}
