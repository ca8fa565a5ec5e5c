//! # FeelBuddy Performance Benchmarks
//!
//! Benchmarks for the hot paths of a journal request.
//!
//! ## Benchmark Categories
//!
//! - **Classification**: Keyword scan over short and long entries
//! - **Streaks**: Leaderboard ranking over growing check-in histories
//! - **Storage**: Timeline load from a populated CSV file
//!
//! ## Running Benchmarks
//!
//! ```bash
//! # Run all benchmarks
//! cargo bench
//!
//! # Run specific benchmark group
//! cargo bench classification
//! cargo bench streaks
//! ```

use chrono::{Duration, NaiveDate, NaiveDateTime};
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use feelbuddy::mood::{self, Mood};
use feelbuddy::streak::{self, StreakEntry};
use feelbuddy::timeline::TimelineStore;
use std::hint::black_box;
use tempfile::TempDir;

const SHORT_ENTRY: &str = "Tired and a bit worried, but grateful for a quiet evening.";

/// Helper to build a check-in history: `users` users, each with `days`
/// check-ins and a gap every 7th day.
fn create_check_ins(users: usize, days: i64) -> Vec<StreakEntry> {
    let start = NaiveDate::from_ymd_opt(2024, 1, 1).expect("valid date");
    (0..users)
        .flat_map(|u| {
            (0..days)
                .filter(move |d| (d + u as i64) % 7 != 0)
                .map(move |d| StreakEntry {
                    user: format!("player-{u:03}"),
                    date: start + Duration::days(d),
                })
        })
        .collect()
}

/// Benchmark keyword classification
fn benchmark_classification(c: &mut Criterion) {
    let mut group = c.benchmark_group("classification");

    group.bench_function("short_entry", |b| {
        b.iter(|| mood::classify(black_box(SHORT_ENTRY)))
    });

    group.bench_function("no_match_fallback", |b| {
        b.iter(|| mood::classify(black_box("went to the shop and back")))
    });

    for repeats in [10, 100, 1000] {
        let long_entry = SHORT_ENTRY.repeat(repeats);
        group.bench_with_input(
            BenchmarkId::new("long_entry", repeats),
            &long_entry,
            |b, text| b.iter(|| mood::classify(black_box(text))),
        );
    }

    group.finish();
}

/// Benchmark leaderboard ranking
fn benchmark_streaks(c: &mut Criterion) {
    let mut group = c.benchmark_group("streaks");

    for users in [10, 100, 1000] {
        let entries = create_check_ins(users, 60);
        group.bench_with_input(BenchmarkId::new("rank", users), &entries, |b, entries| {
            b.iter(|| streak::rank(black_box(entries), streak::DEFAULT_LEADERBOARD_SIZE))
        });
    }

    group.finish();
}

/// Benchmark timeline reads from disk
fn benchmark_timeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("timeline");

    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let store = TimelineStore::open(temp_dir.path().join("mood_data.csv"))
        .expect("Failed to open timeline");
    let start: NaiveDateTime = NaiveDate::from_ymd_opt(2024, 1, 1)
        .and_then(|d| d.and_hms_opt(8, 0, 0))
        .expect("valid timestamp");
    for i in 0..5000 {
        store
            .append_at(SHORT_ENTRY, Mood::Stressed, start + Duration::minutes(i))
            .expect("Failed to append entry");
    }

    group.bench_function("load_100_of_5000", |b| {
        b.iter(|| store.load(black_box(100)).expect("load"))
    });

    group.finish();
}

// Group all benchmarks
criterion_group!(
    benches,
    benchmark_classification,
    benchmark_streaks,
    benchmark_timeline
);

criterion_main!(benches);
