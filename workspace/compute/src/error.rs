use model::store::StoreError;
use thiserror::Error;

/// Error types for the compute module
#[derive(Error, Debug)]
pub enum ComputeError {
    /// Error from a store accessor, already carrying its context
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Error from the database operations outside an accessor (transactions)
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// Rejected input; nothing was written
    #[error("Validation error: {0}")]
    Validation(String),
}

impl ComputeError {
    pub fn validation(message: impl Into<String>) -> Self {
        ComputeError::Validation(message.into())
    }
}

/// Type alias for Result with ComputeError
pub type Result<T> = std::result::Result<T, ComputeError>;
