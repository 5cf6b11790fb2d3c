//! Store integration tests against real SQLite files.
//!
//! Covers persistence across reopen, ordering of `list_all`, rejected input,
//! id allocation, and the aggregation properties over stored rows.

use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use rstest::rstest;
use tempfile::TempDir;

use liftlog::analytics::{daily_volume, volume_by_exercise};
use liftlog::{LiftlogError, Store, ValidationError};

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn file_store(dir: &TempDir) -> Store {
    let path = dir.path().join("workouts.db");
    let mut store = Store::open(path.to_str().unwrap()).unwrap();
    store.initialize().unwrap();
    store
}

#[test]
fn add_then_list_has_one_row_with_derived_volume() {
    let dir = TempDir::new().unwrap();
    let mut store = file_store(&dir);

    let id = store.add(day(2024, 1, 1), "Bench Press", 3, 8, 135.0).unwrap();
    let rows = store.list_all().unwrap();

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].id, id);
    assert_eq!(rows[0].exercise, "Bench Press");
    assert_eq!(rows[0].volume, 3240.0);
}

#[test]
fn rows_survive_reopen_with_dates_intact() {
    let dir = TempDir::new().unwrap();
    {
        let mut store = file_store(&dir);
        store.add(day(2023, 12, 31), "Squat", 5, 5, 200.0).unwrap();
        store.add(day(2024, 2, 29), "Row", 4, 10, 60.5).unwrap();
    }

    let mut store = file_store(&dir);
    let rows = store.list_all().unwrap();
    let dates: Vec<NaiveDate> = rows.iter().map(|r| r.workout_date).collect();
    assert_eq!(dates, vec![day(2023, 12, 31), day(2024, 2, 29)]);
    assert_eq!(rows[1].weight, 60.5);
    assert_eq!(rows[1].volume, 2420.0);
}

#[test]
fn list_orders_by_date_then_id() {
    let mut store = Store::open_in_memory().unwrap();
    store.initialize().unwrap();

    let late = store.add(day(2024, 1, 10), "Squat", 1, 1, 1.0).unwrap();
    let early_a = store.add(day(2024, 1, 2), "Bench", 1, 1, 1.0).unwrap();
    let early_b = store.add(day(2024, 1, 2), "Row", 1, 1, 1.0).unwrap();
    let oldest = store.add(day(2023, 6, 1), "Curl", 1, 1, 1.0).unwrap();

    let ids: Vec<i64> = store.list_all().unwrap().iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![oldest, early_a, early_b, late]);
}

#[test]
fn add_then_delete_leaves_nothing() {
    let mut store = Store::open_in_memory().unwrap();
    store.initialize().unwrap();

    let id = store.add(day(2024, 1, 1), "Squat", 5, 5, 200.0).unwrap();
    store.delete(id).unwrap();

    assert!(store.list_all().unwrap().is_empty());
}

#[test]
fn deleted_ids_are_not_reused() {
    let dir = TempDir::new().unwrap();
    let mut store = file_store(&dir);

    store.add(day(2024, 1, 1), "Squat", 1, 1, 1.0).unwrap();
    let highest = store.add(day(2024, 1, 1), "Squat", 1, 1, 1.0).unwrap();
    store.delete(highest).unwrap();

    let next = store.add(day(2024, 1, 1), "Squat", 1, 1, 1.0).unwrap();
    assert!(next > highest);
}

#[test]
fn identical_adds_never_merge() {
    let mut store = Store::open_in_memory().unwrap();
    store.initialize().unwrap();

    for _ in 0..3 {
        store.add(day(2024, 1, 1), "Plank", 1, 1, 0.0).unwrap();
    }
    assert_eq!(store.count().unwrap(), 3);
}

#[rstest]
#[case::blank_name("   ", 3, 8, 135.0)]
#[case::empty_name("", 3, 8, 135.0)]
#[case::zero_sets("Squat", 0, 8, 135.0)]
#[case::zero_reps("Squat", 3, 0, 135.0)]
#[case::negative_weight("Squat", 3, 8, -2.5)]
#[case::infinite_weight("Squat", 3, 8, f64::INFINITY)]
#[case::volume_overflow("Sled", 1000, 1000, 1e303)]
fn invalid_input_is_rejected_before_writing(
    #[case] exercise: &str,
    #[case] sets: u32,
    #[case] reps: u32,
    #[case] weight: f64,
) {
    let mut store = Store::open_in_memory().unwrap();
    store.initialize().unwrap();
    store.add(day(2024, 1, 1), "Existing", 1, 1, 1.0).unwrap();

    let err = store
        .add(day(2024, 1, 2), exercise, sets, reps, weight)
        .unwrap_err();

    assert!(err.is_validation(), "unexpected error: {err}");
    assert_eq!(store.count().unwrap(), 1);
}

#[test]
fn open_in_missing_directory_fails() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("missing").join("workouts.db");

    match Store::open(path.to_str().unwrap()) {
        Err(LiftlogError::Connection(_)) => {}
        Err(other) => panic!("expected a connection error, got {other}"),
        Ok(_) => panic!("opened a database inside a missing directory"),
    }
    assert!(!path.exists());
}

#[test]
fn overflowing_volume_is_not_stored() {
    let mut store = Store::open_in_memory().unwrap();
    store.initialize().unwrap();

    let err = store.add(day(2024, 1, 1), "Sled", 1000, 1000, 1e303).unwrap_err();
    assert!(matches!(
        err,
        LiftlogError::Validation(ValidationError::VolumeOutOfRange(_))
    ));
    assert!(store.list_all().unwrap().is_empty());
}

#[test]
fn blank_exercise_reports_empty_name() {
    let mut store = Store::open_in_memory().unwrap();
    store.initialize().unwrap();

    let err = store.add(day(2024, 1, 1), " \t ", 1, 1, 1.0).unwrap_err();
    assert!(matches!(
        err,
        LiftlogError::Validation(ValidationError::EmptyExercise)
    ));
}

#[test]
fn bench_and_squat_aggregates() {
    let mut store = Store::open_in_memory().unwrap();
    store.initialize().unwrap();
    store.add(day(2024, 1, 1), "Bench Press", 3, 8, 135.0).unwrap();
    store.add(day(2024, 1, 1), "Squat", 5, 5, 200.0).unwrap();

    let rows = store.list_all().unwrap();
    let daily = daily_volume(&rows);
    assert_eq!(daily.len(), 1);
    assert_eq!(daily[0].total_volume, 8240.0);

    let by_exercise: Vec<(String, f64)> = volume_by_exercise(&rows)
        .into_iter()
        .map(|v| (v.exercise, v.total_volume))
        .collect();
    assert_eq!(
        by_exercise,
        vec![
            ("Squat".to_string(), 5000.0),
            ("Bench Press".to_string(), 3240.0)
        ]
    );
}

fn arb_entry() -> impl Strategy<Value = (NaiveDate, String, u32, u32, u32)> {
    (
        0u64..60,
        prop::sample::select(vec!["Squat", "Bench", "Row", "Dip"]),
        1u32..6,
        1u32..13,
        0u32..400,
    )
        .prop_map(|(offset, name, sets, reps, weight)| {
            let date = day(2024, 1, 1) + chrono::Days::new(offset);
            (date, name.to_string(), sets, reps, weight)
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn list_all_is_sorted_and_volumes_consistent(entries in prop::collection::vec(arb_entry(), 0..25)) {
        let mut store = Store::open_in_memory().unwrap();
        store.initialize().unwrap();
        for (date, name, sets, reps, weight) in &entries {
            store.add(*date, name, *sets, *reps, f64::from(*weight)).unwrap();
        }

        let rows = store.list_all().unwrap();
        prop_assert_eq!(rows.len(), entries.len());
        for pair in rows.windows(2) {
            prop_assert!((pair[0].workout_date, pair[0].id) < (pair[1].workout_date, pair[1].id));
        }
        for row in &rows {
            prop_assert_eq!(row.volume, f64::from(row.sets) * f64::from(row.reps) * row.weight);
        }
    }

    #[test]
    fn daily_totals_sum_to_grand_total(entries in prop::collection::vec(arb_entry(), 0..25)) {
        let mut store = Store::open_in_memory().unwrap();
        store.initialize().unwrap();
        for (date, name, sets, reps, weight) in &entries {
            store.add(*date, name, *sets, *reps, f64::from(*weight)).unwrap();
        }

        let rows = store.list_all().unwrap();
        let grand: f64 = rows.iter().map(|r| r.volume).sum();
        let daily: f64 = daily_volume(&rows).iter().map(|d| d.total_volume).sum();
        // integral weights keep every partial sum exact
        prop_assert_eq!(grand, daily);

        let by_exercise = volume_by_exercise(&rows);
        for pair in by_exercise.windows(2) {
            prop_assert!(pair[0].total_volume >= pair[1].total_volume);
        }
    }
}
