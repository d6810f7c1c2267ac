//! Per-table accessors over the relational store.
//!
//! Every accessor is scoped to a user id and generic over [`ConnectionTrait`]
//! so the same call works on a pooled connection or inside a transaction.
//! Failures carry a short description of the operation followed by the
//! store's own message.

pub mod categories;
pub mod expenses;
pub mod income;
pub mod reports;

use sea_orm::DbErr;
use thiserror::Error;

/// Errors returned by the store accessors
#[derive(Error, Debug)]
pub enum StoreError {
    /// A query failed; `context` names the operation that was attempted
    #[error("{context}: {source}")]
    Query {
        context: &'static str,
        #[source]
        source: DbErr,
    },

    /// The row does not exist or belongs to another user
    #[error("{entity} with ID {id} not found")]
    NotFound { entity: &'static str, id: i32 },
}

/// Type alias for Result with StoreError
pub type Result<T> = std::result::Result<T, StoreError>;

pub(crate) fn context(context: &'static str) -> impl FnOnce(DbErr) -> StoreError {
    move |source| StoreError::Query { context, source }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_error_appends_store_message() {
        let err = context("Failed to list categories")(DbErr::Custom("connection reset".to_string()));
        let message = err.to_string();
        assert!(message.starts_with("Failed to list categories: "));
        assert!(message.contains("connection reset"));
    }

    #[test]
    fn test_not_found_message() {
        let err = StoreError::NotFound { entity: "Expense", id: 42 };
        assert_eq!(err.to_string(), "Expense with ID 42 not found");
    }
}
