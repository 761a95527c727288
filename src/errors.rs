// errors.rs
use thiserror::Error;

use crate::domain::filter::FilterError;

/// Errors raised while running a search session.
///
/// Only some of them end the process; see [`AppError::is_fatal`].
#[derive(Debug, Error)]
pub enum AppError {
    /// Opening or pinging the database failed.
    #[error("Database connection failed: {0}")]
    Connect(String),

    /// Reading or applying a schema file failed.
    #[error("Schema error: {0}")]
    Schema(String),

    /// Preparing or executing a search statement failed.
    #[error("Query execution failed: {0}")]
    Query(String),

    /// A result row did not match the Property record layout.
    #[error("Failed to decode row: {0}")]
    Decode(String),

    /// The user typed a filter the grammar does not accept.
    #[error("Invalid filter: {0}")]
    Filter(#[from] FilterError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl AppError {
    /// Whether the error should end the whole session rather than the
    /// current search.
    pub fn is_fatal(&self) -> bool {
        match self {
            AppError::Connect(_) | AppError::Schema(_) | AppError::Io(_) => true,
            AppError::Query(_) | AppError::Decode(_) | AppError::Filter(_) => false,
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;
