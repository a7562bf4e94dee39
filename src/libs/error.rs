use thiserror::Error;

/// Errors raised by the data layer.
///
/// Constraint violations on writes are not errors here; repositories turn them
/// into failed [`WriteOutcome`](crate::libs::outcome::WriteOutcome)s. What
/// remains is everything a caller cannot recover from locally.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("All student IDs for {0} are taken")]
    SequenceExhausted(i32),

    #[error("Student ID '{0}' does not have the STU-<year><4 digits> shape")]
    MalformedStudentId(String),
}

pub type StoreResult<T> = Result<T, StoreError>;
