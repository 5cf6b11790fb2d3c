use chrono::NaiveDate;
use thiserror::Error as ThisError;

/// Input rejected before anything touches the database.
#[derive(Debug, Clone, PartialEq, ThisError)]
pub enum ValidationError {
    #[error("exercise name must not be empty")]
    EmptyExercise,
    #[error("sets must be between 1 and {max}, got {0}", max = i32::MAX)]
    InvalidSets(u32),
    #[error("reps must be between 1 and {max}, got {0}", max = i32::MAX)]
    InvalidReps(u32),
    #[error("weight must be a finite number >= 0, got {0}")]
    InvalidWeight(f64),
    #[error("workout date {0} is outside years 1..=9999")]
    DateOutOfRange(NaiveDate),
    #[error("volume of sets x reps x weight is not a finite number, got {0}")]
    VolumeOutOfRange(f64),
}

#[derive(Debug, ThisError)]
#[non_exhaustive]
pub enum LiftlogError {
    #[error("invalid workout log: {0}")]
    Validation(#[from] ValidationError),
    #[error("storage error: {0}")]
    Storage(#[from] diesel::result::Error),
    #[error("failed to open database: {0}")]
    Connection(#[from] diesel::result::ConnectionError),
    #[error("failed to initialize schema: {0}")]
    Migration(String),
    #[error("row {id} has an unreadable workout_date {value:?}")]
    CorruptDate { id: i64, value: String },
    #[error("row {id} has an out-of-range {column}")]
    CorruptRow { id: i64, column: &'static str },
}

impl LiftlogError {
    pub fn is_validation(&self) -> bool {
        matches!(self, LiftlogError::Validation(_))
    }
}

pub type Result<T, E = LiftlogError> = std::result::Result<T, E>;
