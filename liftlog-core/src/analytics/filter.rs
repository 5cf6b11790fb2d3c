use chrono::NaiveDate;
use std::collections::BTreeSet;

use crate::db::models::LoggedSet;

/// Predicate over logged sets: exercise membership and an inclusive minimum date.
///
/// An empty exercise set matches every exercise.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryFilter {
    pub exercises: BTreeSet<String>,
    pub since: Option<NaiveDate>,
}

impl EntryFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_exercises<I, S>(mut self, exercises: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exercises.extend(exercises.into_iter().map(Into::into));
        self
    }

    pub fn since(mut self, date: NaiveDate) -> Self {
        self.since = Some(date);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.exercises.is_empty() && self.since.is_none()
    }

    pub fn matches(&self, entry: &LoggedSet) -> bool {
        let exercise_ok = self.exercises.is_empty() || self.exercises.contains(&entry.exercise);
        let date_ok = self.since.is_none_or(|since| entry.workout_date >= since);
        exercise_ok && date_ok
    }

    /// Matching entries, in their original order.
    pub fn apply(&self, entries: &[LoggedSet]) -> Vec<LoggedSet> {
        entries.iter().filter(|e| self.matches(e)).cloned().collect()
    }
}
