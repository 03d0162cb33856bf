//! `index.json` reader for flat bundles.

use std::fs;
use std::path::Path;

use exn::ResultExt;
use serde::Deserialize;

use crate::error::{ErrorKind, Result};
use crate::models::{IndexEntry, Locator};

#[derive(Debug, Deserialize)]
struct Manifest {
    entries: Vec<ManifestEntry>,
}

#[derive(Debug, Deserialize)]
struct ManifestEntry {
    name: String,
    #[serde(default)]
    category: Option<String>,
    #[serde(default)]
    anchor: Option<String>,
    #[serde(default)]
    offset: Option<u64>,
    #[serde(default)]
    id: Option<i64>,
}
impl ManifestEntry {
    /// Exactly one of `anchor`, `offset` and `id` must be present.
    fn locator(&self) -> Option<Locator> {
        match (&self.anchor, self.offset, self.id) {
            (Some(anchor), None, None) => Some(Locator::Anchor(anchor.clone())),
            (None, Some(offset), None) => Some(Locator::Offset(offset)),
            (None, None, Some(id)) => Some(Locator::Record(id)),
            _ => None,
        }
    }
}

pub(super) fn read(path: &Path) -> Result<Vec<IndexEntry>> {
    let corrupt = || ErrorKind::CorruptIndex(path.to_path_buf());
    let raw = fs::read(path).or_raise(corrupt)?;
    let manifest: Manifest = serde_json::from_slice(&raw).or_raise(corrupt)?;
    let mut entries = Vec::with_capacity(manifest.entries.len());
    for (position, entry) in manifest.entries.into_iter().enumerate() {
        let Some(locator) = entry.locator() else {
            tracing::debug!(position, name = %entry.name, "Manifest entry needs exactly one locator");
            exn::bail!(corrupt());
        };
        entries.push(IndexEntry::new(entry.name, entry.category, locator));
    }
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn write_manifest(json: &str) -> (tempfile::TempDir, std::path::PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("index.json");
        fs::write(&path, json).unwrap();
        (dir, path)
    }

    #[test]
    fn test_entries() {
        let (_dir, path) = write_manifest(
            r#"{ "entries": [
                { "name": "add", "category": "Staging", "anchor": "add" },
                { "name": "intro", "offset": 0 },
                { "name": "legacy", "category": " ", "id": 7 }
            ] }"#,
        );
        assert_eq!(
            read(&path).unwrap(),
            vec![
                IndexEntry::new("add", Some("Staging".to_string()), Locator::Anchor("add".to_string())),
                IndexEntry::new("intro", None, Locator::Offset(0)),
                IndexEntry::new("legacy", None, Locator::Record(7)),
            ]
        );
    }

    #[rstest]
    #[case("not json")]
    #[case(r#"{ "sections": [] }"#)]
    #[case(r#"{ "entries": [ { "name": "add" } ] }"#)]
    #[case(r#"{ "entries": [ { "name": "add", "anchor": "add", "offset": 3 } ] }"#)]
    #[case(r#"{ "entries": [ { "anchor": "add" } ] }"#)]
    fn test_corrupt(#[case] json: &str) {
        let (_dir, path) = write_manifest(json);
        assert_eq!(*read(&path).unwrap_err(), ErrorKind::CorruptIndex(path));
    }

    #[test]
    fn test_empty_entries_is_valid() {
        let (_dir, path) = write_manifest(r#"{ "entries": [] }"#);
        assert!(read(&path).unwrap().is_empty());
    }
}
