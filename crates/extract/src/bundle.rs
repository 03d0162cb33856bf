//! Resolution of cheatsheet names into on-disk bundles.

use std::path::{Path, PathBuf};

use cheatsheet_catalog::Catalog;
use exn::{OptionExt, ResultExt};
use tracing::instrument;

use crate::consts::{DOCSET_CONTENT, DOCSET_INDEX, FLAT_CONTENT, MANIFEST_INDEX};
use crate::error::{ErrorKind, Result};
use crate::parse::ContentFormat;

/// Where a bundle keeps its index, and how to read it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum IndexHandle {
    /// Dash `docSet.dsidx` SQLite database.
    Sqlite(PathBuf),
    /// `index.json` manifest.
    Manifest(PathBuf),
}
impl IndexHandle {
    pub fn path(&self) -> &Path {
        match self {
            Self::Sqlite(path) | Self::Manifest(path) => path,
        }
    }
}

/// A resolved cheatsheet bundle. Only valid for the call that located it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bundle {
    /// The name the bundle was requested by.
    pub name: String,
    pub root: PathBuf,
    pub index: IndexHandle,
    content: PathBuf,
    format: ContentFormat,
}
impl Bundle {
    /// Recognizes the bundle layout at `root`, or `None` if it isn't one.
    ///
    /// The content file of a docset isn't checked here: a docset with an
    /// index but no content is a bundle whose content can't be read.
    pub fn open(name: impl Into<String>, root: impl Into<PathBuf>) -> Option<Self> {
        let root = root.into();
        if !root.is_dir() {
            return None;
        }
        let docset_index = root.join(DOCSET_INDEX);
        if docset_index.is_file() {
            return Some(Self {
                name: name.into(),
                content: root.join(DOCSET_CONTENT),
                format: ContentFormat::Html,
                index: IndexHandle::Sqlite(docset_index),
                root,
            });
        }
        let manifest = root.join(MANIFEST_INDEX);
        if manifest.is_file() {
            let content = FLAT_CONTENT
                .iter()
                .map(|candidate| root.join(candidate))
                .find(|candidate| candidate.is_file())
                .unwrap_or_else(|| root.join(FLAT_CONTENT[0]));
            return Some(Self {
                name: name.into(),
                format: ContentFormat::from_path(&content),
                content,
                index: IndexHandle::Manifest(manifest),
                root,
            });
        }
        None
    }

    pub fn content_path(&self) -> &Path {
        &self.content
    }

    pub fn content_format(&self) -> ContentFormat {
        self.format
    }
}

/// Resolves `name` through the catalog and confirms the path is a bundle.
///
/// Names are matched exactly; a catalog failure (such as an ambiguous name)
/// surfaces as [`ErrorKind::NotFound`] with the catalog error attached.
#[instrument(skip(catalog))]
pub fn locate(catalog: &dyn Catalog, name: &str) -> Result<Bundle> {
    let path = catalog
        .resolve(name)
        .or_raise(|| ErrorKind::NotFound(name.to_string()))?
        .ok_or_raise(|| ErrorKind::NotFound(name.to_string()))?;
    let bundle = Bundle::open(name, &path);
    if bundle.is_none() {
        tracing::debug!(path = %path.display(), "Catalog path is not a cheatsheet bundle");
    }
    bundle.ok_or_raise(|| ErrorKind::NotFound(name.to_string()))
}
