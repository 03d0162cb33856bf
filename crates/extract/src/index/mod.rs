//! Readers for the two index formats a bundle may carry.

mod manifest;
mod sqlite;

use percent_encoding::percent_decode_str;
use tracing::instrument;

use crate::bundle::{Bundle, IndexHandle};
use crate::error::Result;
use crate::models::{CategoryMap, IndexEntry};

/// Reads every index entry of the bundle, in on-disk order.
///
/// Entries are never re-sorted or de-duplicated. Any failure to open or
/// understand the index is an [`ErrorKind::CorruptIndex`](crate::error::ErrorKind::CorruptIndex);
/// an index that can't be read never comes back empty.
#[instrument(skip_all, fields(bundle = %bundle.name, index = %bundle.index.path().display()))]
pub fn read_index(bundle: &Bundle) -> Result<Vec<IndexEntry>> {
    let entries = match &bundle.index {
        IndexHandle::Sqlite(path) => sqlite::read(path)?,
        IndexHandle::Manifest(path) => manifest::read(path)?,
    };
    tracing::debug!(entries = entries.len(), "Read cheatsheet index");
    Ok(entries)
}

/// Reads the index and groups it by category, in first-seen order.
pub fn read_categories(bundle: &Bundle) -> Result<CategoryMap> {
    Ok(CategoryMap::from_entries(read_index(bundle)?))
}

/// Percent-decodes an anchor or label, replacing invalid UTF-8.
pub(crate) fn percent_decode(value: &str) -> String {
    percent_decode_str(value).decode_utf8_lossy().into_owned()
}
