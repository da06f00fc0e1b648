//! Performance benchmarks for journal statistics.
//!
//! Run with: cargo bench
//!
//! These benchmarks establish baseline performance metrics for:
//! - Streak and word-count computation over in-memory entry snapshots
//! - The full database-backed stats summary at various journal sizes

use chrono::{Duration, NaiveDate, TimeZone, Utc};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use jupdate::analytics::{streaks, words, Analytics, DateRange, StatsOptions};
use jupdate::db::entries::{upsert_entry, ContentFormat, JournalEntry, NewEntry};
use jupdate::db::Database;
use tempfile::TempDir;

const SIZES: [(&str, usize); 3] = [("100", 100), ("1000", 1000), ("5000", 5000)];

fn start_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2010, 1, 1).unwrap()
}

/// Builds `count` entries on consecutive days, skipping every seventh day.
fn synthetic_entries(count: usize) -> Vec<JournalEntry> {
    let now = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
    (0..count)
        .map(|i| JournalEntry {
            id: i as i64 + 1,
            entry_date: start_date() + Duration::days((i + i / 6) as i64),
            title: None,
            content: "Some **markdown** text about the day, with [a link](x).".repeat(i % 5 + 1),
            content_format: ContentFormat::Markdown,
            primary_mood_id: (i % 15) as i64 + 1,
            secondary_mood_1_id: None,
            secondary_mood_2_id: None,
            category: None,
            tags: Some(format!("tag{}, common", i % 20)),
            is_draft: false,
            created_at: now,
            updated_at: now,
        })
        .rev()
        .collect()
}

/// Benchmark the pure streak and word-count functions.
fn bench_pure_analytics(c: &mut Criterion) {
    let mut group = c.benchmark_group("pure_analytics");

    for (name, size) in SIZES {
        let entries = synthetic_entries(size);
        let today = entries[0].entry_date;
        group.throughput(Throughput::Elements(size as u64));

        group.bench_with_input(BenchmarkId::new("longest_streak", name), &entries, |b, e| {
            b.iter(|| black_box(streaks::longest_streak(black_box(e))));
        });

        group.bench_with_input(BenchmarkId::new("current_streak", name), &entries, |b, e| {
            b.iter(|| black_box(streaks::current_streak(black_box(e), today)));
        });

        group.bench_with_input(BenchmarkId::new("word_count_trend", name), &entries, |b, e| {
            b.iter(|| black_box(words::word_count_trend(black_box(e), &DateRange::all())));
        });
    }

    group.finish();
}

/// Benchmark the full stats summary, including the snapshot read.
fn bench_summary(c: &mut Criterion) {
    let mut group = c.benchmark_group("stats_summary");
    group.sample_size(20);

    for (name, size) in SIZES {
        let temp_dir = TempDir::new().expect("create temp dir");
        let db = Database::open(&temp_dir.path().join("bench.db")).expect("open database");
        db.initialize_schema().expect("initialize schema");

        {
            let conn = db.get_conn().expect("get connection");
            let now = Utc::now();
            for entry in synthetic_entries(size) {
                let new = NewEntry {
                    entry_date: entry.entry_date,
                    content: entry.content,
                    primary_mood_id: entry.primary_mood_id,
                    tags: entry.tags,
                    ..NewEntry::default()
                };
                upsert_entry(&conn, &new, now).expect("upsert entry");
            }
        }

        let today = synthetic_entries(size)[0].entry_date;
        let options = StatsOptions::default();
        let analytics = Analytics::new(&db);

        group.bench_function(BenchmarkId::from_parameter(name), |b| {
            b.iter(|| {
                let summary = analytics
                    .summary(black_box(today), black_box(&options))
                    .expect("summary failed");
                black_box(summary);
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_pure_analytics, bench_summary);
criterion_main!(benches);
