//! Shared error type
//!
//! Covers the failures the library itself can hit: storage, filesystem
//! access during root-folder setup, and configuration parsing. The web
//! service wraps these in its own HTTP-facing error enum.

use thiserror::Error;

/// Result alias for memoire-common operations
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// SQLite pool or query failure
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Filesystem failure while preparing the root folder or database file
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Unreadable or invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),
}
