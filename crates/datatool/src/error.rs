//! Data tool error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// The statement failed the read-only gate before execution.
    #[error("only SELECT or WITH statements are allowed, got: {0}")]
    RejectedQuery(String),

    /// The store rejected an accepted statement (syntax error, missing
    /// table, and so on). Carries the underlying error text for diagnosis.
    #[error("query execution error: {0}")]
    Execution(String),

    /// A store-level fault outside query execution (open, catalog walk).
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Filesystem fault while bootstrapping a database file.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
