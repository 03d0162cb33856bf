use rslug::slugify;
use std::path::{Path, PathBuf};

/// Directory extension used by Dash for installed docsets and cheatsheets.
pub const DOCSET_EXTENSION: &str = "docset";

/// One installed cheatsheet bundle, as known to a [`Catalog`](crate::Catalog).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CatalogEntry {
    /// Simplified, case-sensitive identifier callers use (e.g. `http-status-codes`).
    pub name: String,
    /// Human-friendly name (e.g. `HTTP Status Codes`).
    pub display_name: String,
    /// Filesystem root of the bundle.
    pub path: PathBuf,
}
impl CatalogEntry {
    pub fn new(name: impl Into<String>, display_name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            display_name: display_name.into(),
            path: path.into(),
        }
    }

    /// Builds an entry for a `*.docset` directory, deriving the display name
    /// from the directory stem and the simplified name from that.
    ///
    /// Returns `None` for paths without a `.docset` extension.
    pub fn from_docset(path: impl AsRef<Path>) -> Option<Self> {
        let path = path.as_ref();
        let is_docset = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case(DOCSET_EXTENSION));
        if !is_docset {
            return None;
        }
        let display_name = path.file_stem()?.to_str()?.trim().to_string();
        let name = simplify(&display_name);
        if name.is_empty() {
            return None;
        }
        Some(Self::new(name, display_name, path))
    }
}

/// Converts a display name into the simplified identifier used for lookups.
///
/// ```
/// use cheatsheet_catalog::simplify;
/// assert_eq!(simplify("HTTP Status Codes"), "http-status-codes");
/// assert_eq!(simplify("Git"), "git");
/// ```
pub fn simplify(display_name: &str) -> String {
    slugify!(display_name)
}
