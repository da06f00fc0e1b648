//! Statistics derived from the journal.
//!
//! Everything here is computed on demand from a full snapshot of entries; no
//! result is cached or persisted. The submodules hold pure functions over
//! entry slices so they can be tested and benchmarked without a database:
//!
//! - `streaks`: current and longest streak, missed days
//! - `moods`: mood category distribution and most frequent moods
//! - `tags`: most used tags
//! - `words`: monthly average word count
//!
//! [`Analytics`] is the database-backed façade; [`StatsSummary`] bundles all
//! of it for the `stats` command.

pub mod moods;
pub mod streaks;
pub mod tags;
pub mod words;

pub use moods::MoodDistribution;

use crate::constants;
use crate::db::entries::{self, JournalEntry};
use crate::db::moods as mood_store;
use crate::db::Database;
use crate::errors::AppResult;
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use tracing::debug;

/// Inclusive date filter. A missing bound leaves that side open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct DateRange {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl DateRange {
    pub fn new(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        DateRange { start, end }
    }

    /// A range with no bounds.
    pub fn all() -> Self {
        DateRange::default()
    }

    /// Whether `date` falls within the range.
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::NaiveDate;
    /// use jupdate::analytics::DateRange;
    ///
    /// let jan = |d| NaiveDate::from_ymd_opt(2024, 1, d).unwrap();
    /// let range = DateRange::new(Some(jan(2)), None);
    /// assert!(!range.contains(jan(1)));
    /// assert!(range.contains(jan(2)));
    /// assert!(range.contains(jan(31)));
    /// ```
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start.map_or(true, |start| date >= start) && self.end.map_or(true, |end| date <= end)
    }

    /// Entries within the range, in their original order.
    pub fn filter<'e>(&self, entries: &'e [JournalEntry]) -> impl Iterator<Item = &'e JournalEntry> + 'e {
        let range = *self;
        entries.iter().filter(move |entry| range.contains(entry.entry_date))
    }
}

/// A label with an occurrence count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankedCount {
    pub label: String,
    pub count: usize,
}

/// Labels ordered by count, highest first.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(transparent)]
pub struct Ranking(Vec<RankedCount>);

impl Ranking {
    /// Counts `labels` and keeps the `limit` most frequent.
    ///
    /// Labels with equal counts stay in the order they were first seen.
    pub fn from_labels<I>(labels: I, limit: usize) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        let mut order: Vec<RankedCount> = Vec::new();
        let mut index: HashMap<String, usize> = HashMap::new();

        for label in labels {
            match index.get(&label) {
                Some(&idx) => order[idx].count += 1,
                None => {
                    index.insert(label.clone(), order.len());
                    order.push(RankedCount { label, count: 1 });
                }
            }
        }

        // sort_by is stable, which keeps first-seen order among ties
        order.sort_by(|a, b| b.count.cmp(&a.count));
        order.truncate(limit);
        Ranking(order)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, RankedCount> {
        self.0.iter()
    }

    /// Label and count pairs, ready for a chart.
    pub fn as_pairs(&self) -> Vec<(&str, usize)> {
        self.0
            .iter()
            .map(|item| (item.label.as_str(), item.count))
            .collect()
    }

    /// Count recorded for `label`, if it made the cut.
    pub fn count_of(&self, label: &str) -> Option<usize> {
        self.0
            .iter()
            .find(|item| item.label == label)
            .map(|item| item.count)
    }
}

/// Knobs for [`Analytics::summary`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatsOptions {
    pub range: DateRange,
    pub top_moods: usize,
    pub top_tags: usize,
}

impl Default for StatsOptions {
    fn default() -> Self {
        StatsOptions {
            range: DateRange::all(),
            top_moods: constants::DEFAULT_TOP_MOODS,
            top_tags: constants::DEFAULT_TOP_TAGS,
        }
    }
}

/// Every statistic in one serializable value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatsSummary {
    pub range: DateRange,
    /// Entries inside `range`.
    pub total_entries: usize,
    /// Streaks always consider the whole journal.
    pub current_streak: usize,
    pub longest_streak: usize,
    /// Only present when `range` has both bounds.
    pub missed_days: Option<Vec<NaiveDate>>,
    pub mood_distribution: MoodDistribution,
    pub top_moods: Ranking,
    pub top_tags: Ranking,
    pub word_count_trend: BTreeMap<String, f64>,
}

/// Database-backed analytics. Each call reads a fresh snapshot.
pub struct Analytics<'a> {
    db: &'a Database,
}

impl<'a> Analytics<'a> {
    pub fn new(db: &'a Database) -> Self {
        Analytics { db }
    }

    fn snapshot(&self) -> AppResult<Vec<JournalEntry>> {
        let conn = self.db.get_conn()?;
        let all = entries::list_entries(&conn)?;
        debug!("Analytics snapshot of {} entries", all.len());
        Ok(all)
    }

    fn snapshot_with_moods(&self) -> AppResult<(Vec<JournalEntry>, Vec<mood_store::Mood>)> {
        let conn = self.db.get_conn()?;
        Ok((entries::list_entries(&conn)?, mood_store::list_moods(&conn)?))
    }

    /// Consecutive days with an entry, ending at `today`.
    pub fn current_streak(&self, today: NaiveDate) -> AppResult<usize> {
        Ok(streaks::current_streak(&self.snapshot()?, today))
    }

    /// The longest run of consecutive days with an entry.
    pub fn longest_streak(&self) -> AppResult<usize> {
        Ok(streaks::longest_streak(&self.snapshot()?))
    }

    /// Days in `[start, end]` without an entry, oldest first.
    pub fn missed_days(&self, start: NaiveDate, end: NaiveDate) -> AppResult<Vec<NaiveDate>> {
        Ok(streaks::missed_days(&self.snapshot()?, start, end))
    }

    pub fn mood_distribution(&self, range: &DateRange) -> AppResult<MoodDistribution> {
        let (all, catalog) = self.snapshot_with_moods()?;
        Ok(moods::mood_distribution(&all, &catalog, range))
    }

    pub fn most_frequent_moods(&self, count: usize, range: &DateRange) -> AppResult<Ranking> {
        let (all, catalog) = self.snapshot_with_moods()?;
        Ok(moods::most_frequent_moods(&all, &catalog, count, range))
    }

    pub fn most_used_tags(&self, count: usize, range: &DateRange) -> AppResult<Ranking> {
        Ok(tags::most_used_tags(&self.snapshot()?, count, range))
    }

    pub fn word_count_trend(&self, range: &DateRange) -> AppResult<BTreeMap<String, f64>> {
        Ok(words::word_count_trend(&self.snapshot()?, range))
    }

    /// Computes every statistic from a single snapshot.
    pub fn summary(&self, today: NaiveDate, options: &StatsOptions) -> AppResult<StatsSummary> {
        let (all, catalog) = self.snapshot_with_moods()?;
        let range = &options.range;

        let missed_days = match (range.start, range.end) {
            (Some(start), Some(end)) => Some(streaks::missed_days(&all, start, end)),
            _ => None,
        };

        Ok(StatsSummary {
            range: *range,
            total_entries: range.filter(&all).count(),
            current_streak: streaks::current_streak(&all, today),
            longest_streak: streaks::longest_streak(&all),
            missed_days,
            mood_distribution: moods::mood_distribution(&all, &catalog, range),
            top_moods: moods::most_frequent_moods(&all, &catalog, options.top_moods, range),
            top_tags: tags::most_used_tags(&all, options.top_tags, range),
            word_count_trend: words::word_count_trend(&all, range),
        })
    }
}
