//! Error types for the query pipeline.
//!
//! Errors are split by collaborator (database, language model) and joined
//! at the pipeline level by [`AgentError`]. Everything is recovered at the
//! orchestrator boundary and turned into a structured outcome; nothing in
//! this crate surfaces a failure to an HTTP client as a raw backtrace.

use thiserror::Error;

/// Errors from the database service.
#[derive(Error, Debug)]
pub enum DatabaseError {
    /// The database could not be reached at all.
    #[error("database unavailable: {0}")]
    Unavailable(String),

    /// The engine rejected or failed a query it received.
    #[error("query execution failed: {0}")]
    Query(String),
}

impl From<sqlx::Error> for DatabaseError {
    fn from(error: sqlx::Error) -> Self {
        match error {
            sqlx::Error::Io(e) => DatabaseError::Unavailable(e.to_string()),
            sqlx::Error::Tls(e) => DatabaseError::Unavailable(e.to_string()),
            sqlx::Error::PoolTimedOut => DatabaseError::Unavailable("connection timed out".into()),
            other => DatabaseError::Query(other.to_string()),
        }
    }
}

/// Errors from the language model client.
#[derive(Error, Debug)]
pub enum LlmError {
    /// The model endpoint could not be reached or returned a non-success status.
    #[error("language model unavailable: {0}")]
    Transport(String),

    /// The endpoint answered but the body was not the expected shape.
    #[error("language model returned an unreadable response: {0}")]
    Malformed(String),
}

/// Pipeline-level error, covering every step of one query run.
#[derive(Error, Debug)]
pub enum AgentError {
    #[error(transparent)]
    Database(#[from] DatabaseError),

    #[error(transparent)]
    Model(#[from] LlmError),

    /// The generated statement tripped the denylist and was never executed.
    #[error("query contains potentially dangerous operations; only SELECT queries are allowed")]
    UnsafeStatement,
}

pub type AgentResult<T> = Result<T, AgentError>;
