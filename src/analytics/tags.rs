//! Tag usage.

use super::{DateRange, Ranking};
use crate::db::entries::JournalEntry;

/// The `count` most used tags in `range`.
///
/// Tags are counted once per occurrence; ties keep the order in which the
/// tags were first met while walking `entries`.
pub fn most_used_tags(entries: &[JournalEntry], count: usize, range: &DateRange) -> Ranking {
    let tags = range.filter(entries).flat_map(|entry| entry.tag_list());
    Ranking::from_labels(tags, count)
}
