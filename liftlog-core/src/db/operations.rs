use chrono::NaiveDate;
use diesel::prelude::*;
use log::{debug, warn};

use crate::db::Store;
use crate::db::models::{LoggedSet, NewWorkoutLog, WorkoutLogRow};
use crate::db::schema::workout_logs;
use crate::errors::Result;

impl Store {
    /// Records one set and returns its id. Every call inserts a new row.
    pub fn add(
        &mut self,
        workout_date: NaiveDate,
        exercise: &str,
        sets: u32,
        reps: u32,
        weight: f64,
    ) -> Result<i64> {
        let new_log = NewWorkoutLog::validated(workout_date, exercise, sets, reps, weight)?;

        let id = diesel::insert_into(workout_logs::table)
            .values(&new_log)
            .returning(workout_logs::id)
            .get_result::<i64>(&mut self.conn)?;

        debug!(
            "Logged set #{}: {} {} x {} @ {} on {}",
            id, new_log.exercise, new_log.sets, new_log.reps, new_log.weight, new_log.workout_date
        );
        Ok(id)
    }

    /// Removes the row with `id`. Deleting an unknown id is a no-op.
    pub fn delete(&mut self, id: i64) -> Result<()> {
        let removed = diesel::delete(workout_logs::table.find(id)).execute(&mut self.conn)?;
        if removed == 0 {
            warn!("No workout log with id {} to delete", id);
        } else {
            debug!("Deleted workout log #{}", id);
        }
        Ok(())
    }

    /// Every logged set, ordered by date then insertion order.
    pub fn list_all(&mut self) -> Result<Vec<LoggedSet>> {
        workout_logs::table
            .order((workout_logs::workout_date.asc(), workout_logs::id.asc()))
            .select(WorkoutLogRow::as_select())
            .load::<WorkoutLogRow>(&mut self.conn)?
            .into_iter()
            .map(LoggedSet::try_from)
            .collect()
    }

    pub fn count(&mut self) -> Result<i64> {
        workout_logs::table
            .count()
            .get_result::<i64>(&mut self.conn)
            .map_err(Into::into)
    }
}
