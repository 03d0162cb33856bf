//! Extraction Error Types
//!
//! This module provides structured errors using `exn` for automatic location
//! tracking and error tree construction. Lower-level failures (SQLite, I/O,
//! catalog lookups) are kept as children of the kind raised here.

use derive_more::{Display, Error};
use std::path::PathBuf;

/// An extraction error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for extraction operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Actionable error categories.
///
/// These describe what the caller should *do*, not what went wrong internally.
#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// The name does not resolve to an installed bundle.
    #[display("cheatsheet not found: {_0}")]
    NotFound(#[error(not(source))] String),
    /// The bundle's index could not be opened, or its schema is unrecognized.
    #[display("corrupt cheatsheet index: {}", _0.display())]
    CorruptIndex(#[error(not(source))] PathBuf),
    /// The bundle's content file could not be read at all.
    #[display("unreadable cheatsheet content: {}", _0.display())]
    UnreadableContent(#[error(not(source))] PathBuf),
    /// The bundle is valid, but has no category with this label.
    #[display("unknown category '{category}' in cheatsheet '{cheatsheet}'")]
    UnknownCategory {
        /// The cheatsheet that was searched.
        cheatsheet: String,
        /// The requested category label.
        category: String,
    },
    /// The catalog collaborator failed while listing bundles.
    #[display("unable to list installed cheatsheets")]
    Catalog,
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        // Every failure stems from fixed on-disk state; retrying the same
        // call gives the same answer.
        false
    }
}
