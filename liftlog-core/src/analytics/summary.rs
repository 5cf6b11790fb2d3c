//! Headline numbers for the dashboard.

use chrono::{Days, NaiveDate};
use serde::Serialize;
use std::collections::BTreeSet;

use crate::db::models::LoggedSet;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub total_volume: f64,
    pub training_days: usize,
    pub entry_count: usize,
    pub most_recent: Option<NaiveDate>,
}

impl Summary {
    pub fn from_entries(entries: &[LoggedSet]) -> Self {
        let days: BTreeSet<NaiveDate> = entries.iter().map(|e| e.workout_date).collect();

        Summary {
            total_volume: entries.iter().map(|e| e.volume).sum(),
            training_days: days.len(),
            entry_count: entries.len(),
            most_recent: days.last().copied(),
        }
    }
}

/// Inclusive range of calendar days. A range whose `start` is after its `end` holds no days.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    pub fn single(day: NaiveDate) -> Self {
        Self::new(day, day)
    }

    pub fn empty() -> Self {
        Self::new(NaiveDate::MAX, NaiveDate::MIN)
    }

    /// The `n` days ending with `today`; `last_days(today, 7)` is the last week
    /// and `last_days(today, 0)` is empty.
    pub fn last_days(today: NaiveDate, n: u64) -> Self {
        let Some(back) = n.checked_sub(1) else {
            return Self::empty();
        };
        let start = today
            .checked_sub_days(Days::new(back))
            .unwrap_or(NaiveDate::MIN);
        Self::new(start, today)
    }

    pub fn is_empty(&self) -> bool {
        self.start > self.end
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

pub fn volume_in_range(entries: &[LoggedSet], range: DateRange) -> f64 {
    entries
        .iter()
        .filter(|e| range.contains(e.workout_date))
        .map(|e| e.volume)
        .sum()
}
