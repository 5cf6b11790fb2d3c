//! Group-and-sum views over logged sets.
//!
//! Everything in here is a pure function of a slice of [`LoggedSet`]s; filter
//! first with [`EntryFilter`], then aggregate.

mod filter;
mod summary;

pub use filter::EntryFilter;
pub use summary::{DateRange, Summary, volume_in_range};

use chrono::NaiveDate;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet, HashMap};

use crate::db::models::LoggedSet;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyVolume {
    pub date: NaiveDate,
    pub total_volume: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExerciseVolume {
    pub exercise: String,
    pub total_volume: f64,
}

/// Total volume per training day, oldest first. Days without entries are absent.
pub fn daily_volume(entries: &[LoggedSet]) -> Vec<DailyVolume> {
    let mut by_day: BTreeMap<NaiveDate, f64> = BTreeMap::new();
    for entry in entries {
        *by_day.entry(entry.workout_date).or_insert(0.0) += entry.volume;
    }

    by_day
        .into_iter()
        .map(|(date, total_volume)| DailyVolume { date, total_volume })
        .collect()
}

/// Total volume per exercise, largest first. Equal totals keep the order in
/// which the exercises first appear in `entries`.
pub fn volume_by_exercise(entries: &[LoggedSet]) -> Vec<ExerciseVolume> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut totals: Vec<ExerciseVolume> = Vec::new();

    for entry in entries {
        match index.get(entry.exercise.as_str()).copied() {
            Some(i) => totals[i].total_volume += entry.volume,
            None => {
                index.insert(entry.exercise.as_str(), totals.len());
                totals.push(ExerciseVolume {
                    exercise: entry.exercise.clone(),
                    total_volume: entry.volume,
                });
            }
        }
    }

    // sort_by is stable
    totals.sort_by(|a, b| b.total_volume.total_cmp(&a.total_volume));
    totals
}

pub fn top_exercises(entries: &[LoggedSet], n: usize) -> Vec<ExerciseVolume> {
    let mut totals = volume_by_exercise(entries);
    totals.truncate(n);
    totals
}

/// Distinct exercise names, sorted. These are the choices offered by the exercise filter.
pub fn exercise_names(entries: &[LoggedSet]) -> Vec<String> {
    entries
        .iter()
        .map(|e| e.exercise.as_str())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}
