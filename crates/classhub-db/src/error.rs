use classhub_core::AppError;
use tracing::error;

/// Errors surfaced by store implementations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("No seats available for this class")]
    NoSeatsAvailable,

    #[error("Already enrolled in this class")]
    AlreadyEnrolled,

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(_) => AppError::not_found(err),
            StoreError::NoSeatsAvailable | StoreError::AlreadyEnrolled => {
                AppError::conflict(err.to_string())
            }
            StoreError::Database(ref e) => {
                error!(error = %e, "Database error");
                AppError::database(err)
            }
        }
    }
}
