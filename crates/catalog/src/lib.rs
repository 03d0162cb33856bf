//! Catalog of installed cheatsheet bundles.
//!
//! The extraction engine never scans the filesystem for bundles itself: it
//! asks a [`Catalog`] to turn a simplified name (`git`, `http-status-codes`)
//! into a bundle path. Lookups are exact and case-sensitive.

mod directory;
mod entry;
pub mod error;
mod fixed;

pub use crate::directory::DirectoryCatalog;
pub use crate::entry::{CatalogEntry, DOCSET_EXTENSION, simplify};
pub use crate::fixed::StaticCatalog;
use crate::error::Result;
use std::path::PathBuf;
use std::sync::Arc;

pub type CatalogHandle = Arc<dyn Catalog + Send + Sync>;

/// Lookup service for installed cheatsheet bundles.
pub trait Catalog {
    /// Every installed bundle, sorted by simplified name.
    fn list_installed(&self) -> Result<Vec<CatalogEntry>>;

    /// Maps a simplified name to a bundle path.
    ///
    /// Returns `Ok(None)` when nothing matches exactly. Implementations must
    /// not fall back to a "close enough" name.
    fn resolve(&self, name: &str) -> Result<Option<PathBuf>>;
}
