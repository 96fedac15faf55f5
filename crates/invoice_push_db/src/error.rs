//! Error types for the database layer.

use std::time::Duration;
use thiserror::Error;

/// Database operation result type.
pub type Result<T> = std::result::Result<T, DbError>;

/// Database errors.
#[derive(Error, Debug)]
pub enum DbError {
    /// Connection could not be established
    #[error("Database connection failed: {0}")]
    Connect(#[source] sqlx::Error),

    /// Connection did not complete within `database.connect_timeout_secs`
    #[error("Database connection timed out after {0:?}")]
    ConnectTimeout(Duration),

    /// Query was rejected or failed mid-flight
    #[error("Database query failed: {0}")]
    Query(#[source] sqlx::Error),

    /// A returned row could not be decoded
    #[error("Failed to read row: {0}")]
    Scan(#[source] sqlx::Error),

    /// `sslmode` is not one of the libpq modes
    #[error("Invalid sslmode '{0}' (expected disable, allow, prefer, require, verify-ca or verify-full)")]
    InvalidSslMode(String),
}
