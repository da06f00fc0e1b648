//! Writing streaks and gaps.

use crate::db::entries::JournalEntry;
use chrono::{Duration, NaiveDate};
use std::collections::HashSet;

/// Number of consecutive days with an entry, counting back from `today`.
///
/// Entries dated after `today` are ignored. If there is no entry for `today`
/// the streak is 0, even when yesterday had one.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use jupdate::analytics::streaks::current_streak;
///
/// let today = NaiveDate::from_ymd_opt(2024, 1, 3).unwrap();
/// assert_eq!(current_streak(&[], today), 0);
/// ```
pub fn current_streak(entries: &[JournalEntry], today: NaiveDate) -> usize {
    let mut dates: Vec<NaiveDate> = entries.iter().map(|e| e.entry_date).collect();
    dates.sort_unstable_by(|a, b| b.cmp(a));
    dates.dedup();

    let mut streak = 0;
    let mut expected = today;

    for date in dates {
        if date == expected {
            streak += 1;
            expected -= Duration::days(1);
        } else if date < expected {
            break;
        }
    }

    streak
}

/// Length of the longest run of consecutive dated entries.
pub fn longest_streak(entries: &[JournalEntry]) -> usize {
    let mut dates: Vec<NaiveDate> = entries.iter().map(|e| e.entry_date).collect();
    dates.sort_unstable();
    dates.dedup();

    let Some(first) = dates.first().copied() else {
        return 0;
    };

    let mut longest = 1;
    let mut run = 1;
    let mut previous = first;

    for date in dates.into_iter().skip(1) {
        if date - previous == Duration::days(1) {
            run += 1;
        } else {
            longest = longest.max(run);
            run = 1;
        }
        previous = date;
    }

    longest.max(run)
}

/// Dates in `[start, end]` with no entry, oldest first.
///
/// Returns an empty list when `start > end`.
pub fn missed_days(entries: &[JournalEntry], start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
    let written: HashSet<NaiveDate> = entries
        .iter()
        .map(|e| e.entry_date)
        .filter(|d| *d >= start && *d <= end)
        .collect();

    start
        .iter_days()
        .take_while(|d| *d <= end)
        .filter(|d| !written.contains(d))
        .collect()
}
