//! Word counts over time.

use super::DateRange;
use crate::constants;
use crate::db::entries::JournalEntry;
use chrono::Datelike;
use std::collections::BTreeMap;

/// Counts words, treating markdown punctuation as whitespace.
///
/// # Examples
///
/// ```
/// use jupdate::analytics::words::count_words;
///
/// assert_eq!(count_words("# Title\n**bold** [link](url)"), 4);
/// assert_eq!(count_words("   "), 0);
/// ```
pub fn count_words(text: &str) -> usize {
    text.split(|c: char| c.is_whitespace() || constants::MARKDOWN_PUNCTUATION.contains(&c))
        .filter(|word| !word.is_empty())
        .count()
}

/// Average words per entry for each month in `range`, keyed `YYYY-MM`.
///
/// Averages are rounded to one decimal place, halves to even.
pub fn word_count_trend(entries: &[JournalEntry], range: &DateRange) -> BTreeMap<String, f64> {
    let mut months: BTreeMap<(i32, u32), (usize, usize)> = BTreeMap::new();

    for entry in range.filter(entries) {
        let key = (entry.entry_date.year(), entry.entry_date.month());
        let (words, count) = months.entry(key).or_insert((0, 0));
        *words += count_words(&entry.content);
        *count += 1;
    }

    months
        .into_iter()
        .map(|((year, month), (words, count))| {
            let average = words as f64 / count as f64;
            (
                format!("{:04}-{:02}", year, month),
                (average * 10.0).round_ties_even() / 10.0,
            )
        })
        .collect()
}
