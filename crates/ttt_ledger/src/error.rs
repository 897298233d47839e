//! Store and configuration errors, tagged with where they were raised.

use derive_more::{Display, Error};
use tracing::instrument;

/// Failure reading or replacing the backing store file.
#[derive(Debug, Clone, Display, Error)]
#[display("Store error: {} at {}:{}", message, file, line)]
pub struct StoreError {
    /// What went wrong.
    pub message: String,
    /// Caller line.
    pub line: u32,
    /// Caller source file.
    pub file: &'static str,
}

impl StoreError {
    /// Creates a store error stamped with the caller's location.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: impl Into<String>) -> Self {
        let caller = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: caller.line(),
            file: caller.file(),
        }
    }
}

impl From<std::io::Error> for StoreError {
    #[track_caller]
    fn from(err: std::io::Error) -> Self {
        Self::new(format!("I/O error: {}", err))
    }
}

impl From<tempfile::PersistError> for StoreError {
    #[track_caller]
    fn from(err: tempfile::PersistError) -> Self {
        Self::new(format!("Failed to replace store file: {}", err.error))
    }
}

/// Unreadable or invalid configuration file.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// What went wrong.
    pub message: String,
    /// Caller line.
    pub line: u32,
    /// Caller source file.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a configuration error stamped with the caller's location.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: impl Into<String>) -> Self {
        let caller = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: caller.line(),
            file: caller.file(),
        }
    }
}
