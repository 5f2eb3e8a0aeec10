use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReadingError {
    /// The backend refused the write (e.g. a CHECK constraint).
    #[error("invalid reading: {0}")]
    Validation(String),

    #[error("no sensor readings found")]
    NotFound,

    /// Anything else the backend reported, passed through as-is.
    #[error(transparent)]
    Backend(#[from] sqlx::Error),
}
