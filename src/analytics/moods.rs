//! Mood statistics.

use super::{DateRange, Ranking};
use crate::constants;
use crate::db::entries::JournalEntry;
use crate::db::moods::{Mood, MoodCategory};
use serde::Serialize;
use std::collections::HashMap;

/// Number of entries per primary-mood category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct MoodDistribution {
    pub positive: usize,
    pub neutral: usize,
    pub negative: usize,
}

impl MoodDistribution {
    pub fn get(&self, category: MoodCategory) -> usize {
        match category {
            MoodCategory::Positive => self.positive,
            MoodCategory::Neutral => self.neutral,
            MoodCategory::Negative => self.negative,
        }
    }

    fn increment(&mut self, category: MoodCategory) {
        match category {
            MoodCategory::Positive => self.positive += 1,
            MoodCategory::Neutral => self.neutral += 1,
            MoodCategory::Negative => self.negative += 1,
        }
    }

    /// All three categories with their counts, in category order.
    pub fn as_pairs(&self) -> Vec<(&'static str, usize)> {
        MoodCategory::ALL
            .iter()
            .map(|category| (category.label(), self.get(*category)))
            .collect()
    }

    pub fn total(&self) -> usize {
        self.positive + self.neutral + self.negative
    }
}

/// Counts entries in `range` by the category of their primary mood.
///
/// Entries whose primary mood is not in `moods` are left out.
pub fn mood_distribution(entries: &[JournalEntry], moods: &[Mood], range: &DateRange) -> MoodDistribution {
    let categories: HashMap<i64, MoodCategory> = moods.iter().map(|m| (m.id, m.category)).collect();

    let mut distribution = MoodDistribution::default();
    for entry in range.filter(entries) {
        if let Some(category) = categories.get(&entry.primary_mood_id) {
            distribution.increment(*category);
        }
    }
    distribution
}

/// The `count` most common primary moods in `range`, by name.
///
/// A primary mood missing from `moods` is reported as "Unknown".
pub fn most_frequent_moods(
    entries: &[JournalEntry],
    moods: &[Mood],
    count: usize,
    range: &DateRange,
) -> Ranking {
    let names: HashMap<i64, &str> = moods.iter().map(|m| (m.id, m.name.as_str())).collect();

    let labels = range.filter(entries).map(|entry| {
        names
            .get(&entry.primary_mood_id)
            .copied()
            .unwrap_or(constants::UNKNOWN_MOOD_NAME)
            .to_string()
    });

    Ranking::from_labels(labels, count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::test_support::{date, entry_on};

    fn catalog() -> Vec<Mood> {
        vec![
            Mood {
                id: 1,
                name: "Happy".to_string(),
                category: MoodCategory::Positive,
                emoji: "😊".to_string(),
            },
            Mood {
                id: 2,
                name: "Calm".to_string(),
                category: MoodCategory::Neutral,
                emoji: "😐".to_string(),
            },
            Mood {
                id: 3,
                name: "Sad".to_string(),
                category: MoodCategory::Negative,
                emoji: "😔".to_string(),
            },
        ]
    }

    fn with_mood(day: u32, mood_id: i64) -> JournalEntry {
        JournalEntry {
            primary_mood_id: mood_id,
            ..entry_on(date(2024, 1, day))
        }
    }

    #[test]
    fn test_mood_distribution() {
        let entries = vec![with_mood(1, 1), with_mood(2, 3), with_mood(3, 1)];
        let distribution = mood_distribution(&entries, &catalog(), &DateRange::all());

        assert_eq!(
            distribution.as_pairs(),
            vec![("Positive", 2), ("Neutral", 0), ("Negative", 1)]
        );
        assert_eq!(distribution.total(), 3);
    }

    #[test]
    fn test_mood_distribution_skips_unknown_moods() {
        let entries = vec![with_mood(1, 1), with_mood(2, 42)];
        let distribution = mood_distribution(&entries, &catalog(), &DateRange::all());
        assert_eq!(distribution.total(), 1);
    }

    #[test]
    fn test_mood_distribution_respects_range() {
        let entries = vec![with_mood(1, 1), with_mood(5, 3), with_mood(9, 2)];
        let range = DateRange::new(Some(date(2024, 1, 2)), Some(date(2024, 1, 8)));
        let distribution = mood_distribution(&entries, &catalog(), &range);
        assert_eq!(distribution, MoodDistribution { positive: 0, neutral: 0, negative: 1 });
    }

    #[test]
    fn test_mood_distribution_empty() {
        let distribution = mood_distribution(&[], &catalog(), &DateRange::all());
        assert_eq!(distribution.as_pairs().len(), 3);
        assert_eq!(distribution.total(), 0);
    }

    #[test]
    fn test_most_frequent_moods() {
        let entries = vec![
            with_mood(1, 3),
            with_mood(2, 1),
            with_mood(3, 1),
            with_mood(4, 2),
            with_mood(5, 3),
            with_mood(6, 1),
        ];
        let ranking = most_frequent_moods(&entries, &catalog(), 2, &DateRange::all());
        assert_eq!(ranking.as_pairs(), vec![("Happy", 3), ("Sad", 2)]);
    }

    #[test]
    fn test_most_frequent_moods_unknown_label() {
        let entries = vec![with_mood(1, 99), with_mood(2, 99), with_mood(3, 1)];
        let ranking = most_frequent_moods(&entries, &catalog(), 5, &DateRange::all());
        assert_eq!(ranking.as_pairs(), vec![("Unknown", 2), ("Happy", 1)]);
    }
}
