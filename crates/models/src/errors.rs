use sea_orm::{DbErr, SqlErr};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("validation error: {0}")]
    Validation(String),
    #[error("unique constraint violated: {0}")]
    Conflict(String),
    #[error("database error: {0}")]
    Db(String),
}

/// Classify a driver error, pulling unique-constraint violations into
/// their own bucket so callers can map them to a client error.
pub fn classify(err: DbErr) -> ModelError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(detail)) => ModelError::Conflict(detail),
        _ => ModelError::Db(err.to_string()),
    }
}
