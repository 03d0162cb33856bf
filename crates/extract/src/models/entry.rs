use std::fmt::{Display, Formatter, Result as FmtResult};

use super::block::collapse_whitespace;
use crate::consts::GENERAL_CATEGORY;

/// Where an index entry points to inside the bundle's content.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Locator {
    /// An anchor id (`id="…"` or `<a name="…">`) in the content.
    Anchor(String),
    /// A byte offset into the raw content.
    Offset(u64),
    /// An opaque record id that cannot be mapped onto the content.
    Record(i64),
}
impl Display for Locator {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::Anchor(anchor) => write!(f, "#{anchor}"),
            Self::Offset(offset) => write!(f, "@{offset}"),
            Self::Record(id) => write!(f, "record {id}"),
        }
    }
}

/// One row recovered from a bundle's index.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IndexEntry {
    /// Display name of the entry (e.g. `checkout`).
    pub name: String,
    /// Category label, `None` when the index doesn't specify one.
    pub category: Option<String>,
    pub locator: Locator,
}
impl IndexEntry {
    /// Category labels are kept on one line (whitespace runs collapse to a
    /// single space) and blank ones are treated as missing.
    pub fn new(name: impl Into<String>, category: Option<String>, locator: Locator) -> Self {
        let category = category.map(|c| collapse_whitespace(&c)).filter(|c| !c.is_empty());
        Self {
            name: name.into(),
            category,
            locator,
        }
    }

    /// The category this entry is grouped under, falling back to `General`.
    pub fn category_label(&self) -> &str {
        self.category.as_deref().unwrap_or(GENERAL_CATEGORY)
    }
}
