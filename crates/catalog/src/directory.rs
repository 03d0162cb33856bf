//! Catalog of Dash cheatsheets installed on the local filesystem.
//!
//! Dash installs each cheatsheet as `<root>/<Display Name>/<Display Name>.docset`,
//! so each configured root is scanned two levels deep for `*.docset`
//! directories. Every call re-scans; nothing is remembered between calls.
//!
//! Symbolic links are followed within that depth, so a bundle linked into a
//! root is found like an installed one. Entries that can't be read (dangling
//! links, permission errors, link loops) are logged and skipped; only a root
//! that can't be read at all fails the scan.

use crate::error::{ErrorKind, Result};
use crate::{Catalog, CatalogEntry, StaticCatalog};
use exn::ResultExt;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::instrument;
use walkdir::WalkDir;

const SCAN_DEPTH: usize = 2;

/// Scans one or more cheatsheet directories, with an explicit mapping
/// layered on top.
///
/// Explicit entries always win over scanned ones with the same name. Two
/// scanned bundles with the same simplified name (e.g. `Git.docset` in two
/// roots) are still listed, but [`resolve`](Catalog::resolve) refuses to pick
/// one and fails with [`ErrorKind::Ambiguous`].
#[derive(Debug, Clone, Default)]
pub struct DirectoryCatalog {
    directories: Vec<PathBuf>,
    explicit: StaticCatalog,
}
impl DirectoryCatalog {
    pub fn new(directories: impl IntoIterator<Item = impl Into<PathBuf>>) -> Self {
        Self {
            directories: directories.into_iter().map(Into::into).collect(),
            explicit: StaticCatalog::new(),
        }
    }

    pub fn with_explicit(mut self, explicit: StaticCatalog) -> Self {
        self.explicit = explicit;
        self
    }

    pub fn directories(&self) -> &[PathBuf] {
        &self.directories
    }

    #[instrument(level = "debug", skip(self), fields(directories = self.directories.len()))]
    fn scan(&self) -> Result<Vec<CatalogEntry>> {
        let mut found = Vec::new();
        for directory in &self.directories {
            if !directory.is_dir() {
                tracing::debug!(directory = %directory.display(), "Cheatsheet directory does not exist; skipping");
                continue;
            }
            found.extend(Self::scan_directory(directory)?);
        }
        Ok(found)
    }

    fn scan_directory(directory: &Path) -> Result<Vec<CatalogEntry>> {
        let mut found = Vec::new();
        let walker =
            WalkDir::new(directory).min_depth(1).max_depth(SCAN_DEPTH).follow_links(true).sort_by_file_name();
        for item in walker {
            let item = match item {
                Ok(item) => item,
                Err(err) if err.depth() == 0 => {
                    return Err(err).or_raise(|| ErrorKind::Io(directory.to_path_buf()));
                },
                Err(err) => {
                    let path = err.path().unwrap_or(directory).to_path_buf();
                    tracing::warn!(path = %path.display(), error = %err, "Unreadable entry in cheatsheet directory; skipping");
                    continue;
                },
            };
            if !item.file_type().is_dir() {
                continue;
            }
            if let Some(entry) = CatalogEntry::from_docset(item.path()) {
                tracing::trace!(name = %entry.name, path = %entry.path.display(), "Found cheatsheet bundle");
                found.push(entry);
            }
        }
        Ok(found)
    }
}

impl Catalog for DirectoryCatalog {
    fn list_installed(&self) -> Result<Vec<CatalogEntry>> {
        let mut entries: Vec<_> =
            self.scan()?.into_iter().filter(|entry| self.explicit.get(&entry.name).is_none()).collect();
        entries.extend(self.explicit.entries().iter().cloned());
        entries.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.path.cmp(&b.path)));
        Ok(entries)
    }

    #[instrument(level = "debug", skip(self))]
    fn resolve(&self, name: &str) -> Result<Option<PathBuf>> {
        if let Some(entry) = self.explicit.get(name) {
            return Ok(Some(entry.path.clone()));
        }
        let mut matches: Vec<_> = self.scan()?.into_iter().filter(|entry| entry.name == name).collect();
        // The same bundle reachable twice (overlapping roots) isn't ambiguous.
        let mut seen = HashSet::new();
        matches.retain(|entry| seen.insert(entry.path.clone()));
        match matches.len() {
            0 => Ok(None),
            1 => Ok(matches.pop().map(|entry| entry.path)),
            _ => exn::bail!(ErrorKind::Ambiguous(name.to_string())),
        }
    }
}
