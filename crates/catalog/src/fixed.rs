//! Explicit, in-memory name → bundle mapping.

use crate::error::{ErrorKind, Result};
use crate::{Catalog, CatalogEntry};
use std::path::PathBuf;

/// A catalog backed by an explicit list of entries.
///
/// Names are unique; registering the same name twice is an error rather than
/// a silent overwrite, so lookups never have to guess.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StaticCatalog {
    entries: Vec<CatalogEntry>,
}
impl StaticCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, entry: CatalogEntry) -> Result<()> {
        if self.get(&entry.name).is_some() {
            exn::bail!(ErrorKind::DuplicateName(entry.name));
        }
        self.entries.push(entry);
        Ok(())
    }

    /// Builder-style [`insert`](Self::insert), using the name as display name.
    pub fn with(mut self, name: impl Into<String>, path: impl Into<PathBuf>) -> Result<Self> {
        let name = name.into();
        self.insert(CatalogEntry::new(name.clone(), name, path))?;
        Ok(self)
    }

    pub fn get(&self, name: &str) -> Option<&CatalogEntry> {
        self.entries.iter().find(|entry| entry.name == name)
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
impl TryFrom<Vec<CatalogEntry>> for StaticCatalog {
    type Error = crate::error::Error;
    fn try_from(entries: Vec<CatalogEntry>) -> std::result::Result<Self, Self::Error> {
        let mut catalog = Self::new();
        for entry in entries {
            catalog.insert(entry)?;
        }
        Ok(catalog)
    }
}

impl Catalog for StaticCatalog {
    fn list_installed(&self) -> Result<Vec<CatalogEntry>> {
        let mut entries = self.entries.clone();
        entries.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(entries)
    }

    fn resolve(&self, name: &str) -> Result<Option<PathBuf>> {
        Ok(self.get(name).map(|entry| entry.path.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_resolve_exact_name_only() {
        let catalog = StaticCatalog::new().with("git", "/sheets/Git.docset").unwrap();
        assert_eq!(catalog.resolve("git").unwrap().as_deref(), Some(Path::new("/sheets/Git.docset")));
        // Case-sensitive, and no near matches.
        assert_eq!(catalog.resolve("Git").unwrap(), None);
        assert_eq!(catalog.resolve("gi").unwrap(), None);
    }

    #[test]
    fn test_duplicate_names_rejected() {
        let err = StaticCatalog::new()
            .with("git", "/a/Git.docset")
            .unwrap()
            .with("git", "/b/Git.docset")
            .unwrap_err();
        assert!(matches!(&*err, ErrorKind::DuplicateName(name) if name == "git"));
    }

    #[test]
    fn test_list_sorted_by_name() {
        let catalog = StaticCatalog::try_from(vec![
            CatalogEntry::new("vim", "Vim", "/sheets/Vim.docset"),
            CatalogEntry::new("docker", "Docker", "/sheets/Docker.docset"),
        ])
        .unwrap();
        let names: Vec<_> = catalog.list_installed().unwrap().into_iter().map(|e| e.name).collect();
        assert_eq!(names, vec!["docker", "vim"]);
    }
}
