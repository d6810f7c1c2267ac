use axum::extract::Query;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use axum_valid::{Valid, ValidRejection};
use compute::ComputeError;
use model::store::StoreError;
use thiserror::Error;
use tracing::{error, warn};

use crate::schemas::ErrorResponse;
use crate::storage::StorageError;

/// Errors surfaced by the REST handlers and the RPC endpoint
#[derive(Error, Debug)]
pub enum ApiError {
    /// Rejected input; nothing was written
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    NotFound(String),

    /// A store failure, prefixed with the attempted operation
    #[error("{0}")]
    Database(String),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

pub type ApiResult<T> = Result<T, ApiError>;

/// JSON body extractor that runs `validator` rules.
pub type ValidJson<T> = Result<Valid<Json<T>>, ValidRejection<JsonRejection>>;
/// Query string extractor that runs `validator` rules.
pub type ValidQuery<T> = Result<Valid<Query<T>>, ValidRejection<QueryRejection>>;

impl ApiError {
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::Validation(message.into())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Database(_) | ApiError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            ApiError::Validation(_) => "VALIDATION_ERROR",
            ApiError::NotFound(_) => "NOT_FOUND",
            ApiError::Database(_) => "DATABASE_ERROR",
            ApiError::Storage(_) => "STORAGE_ERROR",
        }
    }

    /// Client errors are logged as warnings, server errors as errors.
    pub fn log(&self) {
        if self.status().is_server_error() {
            error!(code = self.code(), "{}", self);
        } else {
            warn!(code = self.code(), "{}", self);
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { .. } => ApiError::NotFound(err.to_string()),
            StoreError::Query { .. } => ApiError::Database(err.to_string()),
        }
    }
}

impl From<ComputeError> for ApiError {
    fn from(err: ComputeError) -> Self {
        match err {
            ComputeError::Store(e) => e.into(),
            ComputeError::Database(e) => ApiError::Database(format!("Transaction failed: {e}")),
            ComputeError::Validation(message) => ApiError::Validation(message),
        }
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(errors: validator::ValidationErrors) -> Self {
        ApiError::Validation(errors.to_string())
    }
}

impl<E: std::fmt::Display> From<ValidRejection<E>> for ApiError {
    fn from(rejection: ValidRejection<E>) -> Self {
        match rejection {
            ValidRejection::Valid(errors) => errors.into(),
            ValidRejection::Inner(inner) => ApiError::Validation(inner.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        self.log();
        let body = ErrorResponse {
            error: self.to_string(),
            code: self.code().to_string(),
            success: false,
        };
        (self.status(), Json(body)).into_response()
    }
}
