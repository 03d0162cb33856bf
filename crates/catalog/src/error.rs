//! Catalog Error Types
//!
//! This module provides structured errors using `exn` for automatic location
//! tracking and error tree construction.

use derive_more::{Display, Error};
use std::path::PathBuf;

/// A catalog error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for catalog operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Actionable error categories.
///
/// These describe what the caller should *do*, not what went wrong internally.
#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// A cheatsheet directory could not be listed.
    #[display("unable to scan cheatsheet directory: {}", _0.display())]
    Io(#[error(not(source))] PathBuf),
    /// More than one installed bundle claims the same simplified name.
    #[display("ambiguous cheatsheet name '{_0}': more than one bundle matches")]
    Ambiguous(#[error(not(source))] String),
    /// An explicit mapping tried to register the same name twice.
    #[display("cheatsheet name registered twice: {_0}")]
    DuplicateName(#[error(not(source))] String),
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        // Installed bundles don't change between retries of the same call.
        false
    }
}
