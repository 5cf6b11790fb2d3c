use chrono::{Datelike, NaiveDate};
use diesel::{Insertable, Queryable, Selectable};
use serde::Serialize;
use std::fmt;

use crate::db::schema;
use crate::errors::{LiftlogError, ValidationError};

/// Storage format of `workout_date`. Zero-padded ISO-8601 keeps text order equal to date order.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Raw `workout_logs` row as SQLite hands it back.
#[derive(Queryable, Selectable, Debug, Clone)]
#[diesel(table_name = schema::workout_logs)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct WorkoutLogRow {
    pub id: i64,
    pub workout_date: String,
    pub exercise: String,
    pub sets: i32,
    pub reps: i32,
    pub weight: f64,
    pub volume: f64,
}

/// One recorded set of an exercise on a given day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoggedSet {
    pub id: i64,
    pub workout_date: NaiveDate,
    pub exercise: String,
    pub sets: u32,
    pub reps: u32,
    pub weight: f64,
    pub volume: f64,
}

impl TryFrom<WorkoutLogRow> for LoggedSet {
    type Error = LiftlogError;

    fn try_from(row: WorkoutLogRow) -> Result<Self, Self::Error> {
        let workout_date = NaiveDate::parse_from_str(&row.workout_date, DATE_FORMAT).map_err(
            |_| LiftlogError::CorruptDate {
                id: row.id,
                value: row.workout_date.clone(),
            },
        )?;

        let sets = stored_count(row.id, row.sets, "sets")?;
        let reps = stored_count(row.id, row.reps, "reps")?;

        Ok(LoggedSet {
            id: row.id,
            workout_date,
            exercise: row.exercise,
            sets,
            reps,
            weight: row.weight,
            volume: row.volume,
        })
    }
}

// The table carries no CHECK constraints, so a row written by another tool may hold anything.
fn stored_count(id: i64, value: i32, column: &'static str) -> Result<u32, LiftlogError> {
    u32::try_from(value)
        .ok()
        .filter(|v| *v >= 1)
        .ok_or(LiftlogError::CorruptRow { id, column })
}

impl fmt::Display for LoggedSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "#{} {} {}: {} x {} @ {:.1} (volume {:.1})",
            self.id, self.workout_date, self.exercise, self.sets, self.reps, self.weight, self.volume
        )
    }
}

#[derive(Insertable, Debug)]
#[diesel(table_name = schema::workout_logs)]
pub struct NewWorkoutLog {
    pub workout_date: String,
    pub exercise: String,
    pub sets: i32,
    pub reps: i32,
    pub weight: f64,
    pub volume: f64,
}

impl NewWorkoutLog {
    /// Validates user input and derives `volume`. Nothing is written here.
    pub fn validated(
        workout_date: NaiveDate,
        exercise: &str,
        sets: u32,
        reps: u32,
        weight: f64,
    ) -> Result<Self, ValidationError> {
        let exercise = exercise.trim();
        if exercise.is_empty() {
            return Err(ValidationError::EmptyExercise);
        }

        let sets_col = i32::try_from(sets)
            .ok()
            .filter(|s| *s >= 1)
            .ok_or(ValidationError::InvalidSets(sets))?;
        let reps_col = i32::try_from(reps)
            .ok()
            .filter(|r| *r >= 1)
            .ok_or(ValidationError::InvalidReps(reps))?;

        if !weight.is_finite() || weight < 0.0 {
            return Err(ValidationError::InvalidWeight(weight));
        }

        if !(1..=9999).contains(&workout_date.year()) {
            return Err(ValidationError::DateOutOfRange(workout_date));
        }

        let volume = volume(sets, reps, weight);
        if !volume.is_finite() {
            return Err(ValidationError::VolumeOutOfRange(volume));
        }

        Ok(NewWorkoutLog {
            workout_date: workout_date.format(DATE_FORMAT).to_string(),
            exercise: exercise.to_string(),
            sets: sets_col,
            reps: reps_col,
            weight,
            volume,
        })
    }
}

/// Workload proxy: sets x reps x weight.
pub fn volume(sets: u32, reps: u32, weight: f64) -> f64 {
    f64::from(sets) * f64::from(reps) * weight
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn validated_trims_and_computes_volume() {
        let new = NewWorkoutLog::validated(day(2024, 1, 1), "  Bench Press ", 3, 8, 135.0).unwrap();
        assert_eq!(new.exercise, "Bench Press");
        assert_eq!(new.workout_date, "2024-01-01");
        assert_eq!(new.volume, 3240.0);
    }

    #[test]
    fn zero_weight_is_bodyweight() {
        let new = NewWorkoutLog::validated(day(2024, 1, 1), "Pull Up", 3, 10, 0.0).unwrap();
        assert_eq!(new.volume, 0.0);
    }

    #[test]
    fn rejects_nan_weight() {
        let err = NewWorkoutLog::validated(day(2024, 1, 1), "Row", 3, 10, f64::NAN).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidWeight(_)));
    }

    #[test]
    fn rejects_sets_beyond_column_range() {
        let err =
            NewWorkoutLog::validated(day(2024, 1, 1), "Row", u32::MAX, 10, 10.0).unwrap_err();
        assert_eq!(err, ValidationError::InvalidSets(u32::MAX));
    }

    #[test]
    fn rejects_five_digit_years() {
        let err = NewWorkoutLog::validated(day(10000, 1, 1), "Row", 1, 1, 1.0).unwrap_err();
        assert!(matches!(err, ValidationError::DateOutOfRange(_)));
    }

    #[test]
    fn rejects_volume_that_overflows() {
        let err = NewWorkoutLog::validated(day(2024, 1, 1), "Sled", 1000, 1000, 1e303).unwrap_err();
        assert_eq!(err, ValidationError::VolumeOutOfRange(f64::INFINITY));
    }

    #[test]
    fn corrupt_date_names_the_row() {
        let row = WorkoutLogRow {
            id: 7,
            workout_date: "yesterday".to_string(),
            exercise: "Squat".to_string(),
            sets: 1,
            reps: 1,
            weight: 1.0,
            volume: 1.0,
        };
        let err = LoggedSet::try_from(row).unwrap_err();
        assert!(matches!(err, LiftlogError::CorruptDate { id: 7, .. }));
    }

    #[test]
    fn negative_sets_names_the_row() {
        let row = WorkoutLogRow {
            id: 4,
            workout_date: "2024-01-01".to_string(),
            exercise: "Squat".to_string(),
            sets: -3,
            reps: 5,
            weight: 100.0,
            volume: -1500.0,
        };
        let err = LoggedSet::try_from(row).unwrap_err();
        assert!(matches!(err, LiftlogError::CorruptRow { id: 4, column: "sets" }));
    }

    #[test]
    fn zero_reps_names_the_row() {
        let row = WorkoutLogRow {
            id: 5,
            workout_date: "2024-01-01".to_string(),
            exercise: "Squat".to_string(),
            sets: 3,
            reps: 0,
            weight: 100.0,
            volume: 0.0,
        };
        let err = LoggedSet::try_from(row).unwrap_err();
        assert!(matches!(err, LiftlogError::CorruptRow { id: 5, column: "reps" }));
    }
}
