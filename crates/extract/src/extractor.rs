//! Public façade tying locator, index reader, parser and renderer together.

use std::fmt::{Debug, Formatter, Result as FmtResult};
use std::sync::Arc;

use cheatsheet_catalog::{Catalog, CatalogHandle};
use exn::{OptionExt, ResultExt};
use tracing::instrument;

use crate::bundle::{self, Bundle};
use crate::error::{ErrorKind, Result};
use crate::index::read_categories;
use crate::listing::Listing;
use crate::models::{CategoryMap, Document};
use crate::{Options, parse, render};

/// Retrieves cheatsheets by name.
///
/// Holds no state besides the catalog and options: every call locates,
/// reads and parses the bundle again, so calls from several threads never
/// observe each other.
#[derive(Clone)]
pub struct Extractor {
    catalog: CatalogHandle,
    options: Options,
}
impl Extractor {
    pub fn new(catalog: impl Catalog + Send + Sync + 'static) -> Self {
        Self::from_handle(Arc::new(catalog))
    }

    pub fn from_handle(catalog: CatalogHandle) -> Self {
        Self {
            catalog,
            options: Options::default(),
        }
    }

    pub fn with_options(mut self, options: Options) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    pub fn locate(&self, name: &str) -> Result<Bundle> {
        bundle::locate(self.catalog.as_ref(), name)
    }

    /// Category labels of a cheatsheet, in the order its index first
    /// mentions them. An empty list is a valid answer.
    #[instrument(skip(self))]
    pub fn categories(&self, name: &str) -> Result<Vec<String>> {
        let bundle = self.locate(name)?;
        Ok(read_categories(&bundle)?.labels())
    }

    /// The parsed, category-partitioned content of a cheatsheet.
    #[instrument(skip(self))]
    pub fn document(&self, name: &str) -> Result<Document> {
        let bundle = self.locate(name)?;
        let categories = read_categories(&bundle)?;
        self.load(&bundle, &categories)
    }

    /// Renders the whole cheatsheet, or only one of its categories.
    ///
    /// An unknown category is an error, checked before any content is
    /// parsed; it never falls back to the whole document.
    #[instrument(skip(self))]
    pub fn render(&self, name: &str, category: Option<&str>) -> Result<String> {
        let bundle = self.locate(name)?;
        let categories = read_categories(&bundle)?;
        let unknown = |category: &str| ErrorKind::UnknownCategory {
            cheatsheet: name.to_string(),
            category: category.to_string(),
        };
        if let Some(category) = category
            && !categories.contains(category)
        {
            exn::bail!(unknown(category));
        }
        let document = self.load(&bundle, &categories)?;
        let blocks = document.select(category).ok_or_raise(|| unknown(category.unwrap_or_default()))?;
        Ok(render(blocks))
    }

    /// One `- **name** (Display Name)` line per installed cheatsheet.
    #[instrument(skip(self))]
    pub fn list_available_cheatsheets(&self) -> Result<String> {
        let installed = self.catalog.list_installed().or_raise(|| ErrorKind::Catalog)?;
        let body = installed
            .iter()
            .map(|entry| format!("- **{}** ({})", entry.name, entry.display_name))
            .collect();
        Ok(Listing::new("Available cheatsheets:", body, ("cheatsheet", "cheatsheets")).to_string())
    }

    /// Category labels framed by a two-line header and a two-line footer.
    #[instrument(skip(self))]
    pub fn list_cheatsheet_categories(&self, name: &str) -> Result<String> {
        let categories = self.categories(name)?;
        Ok(Listing::new(format!("Categories in {name}:"), categories, ("category", "categories")).to_string())
    }

    /// Same output as [`render`](Self::render).
    pub fn search_cheatsheet(&self, name: &str, category: Option<&str>) -> Result<String> {
        self.render(name, category)
    }

    fn load(&self, bundle: &Bundle, categories: &CategoryMap) -> Result<Document> {
        let content = parse::parse(bundle, &self.options)?;
        let document = Document::new(content, categories);
        if document.blocks().is_empty() {
            tracing::warn!(bundle = %bundle.name, "Cheatsheet content has no blocks");
        }
        Ok(document)
    }
}
impl Debug for Extractor {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("Extractor").field("options", &self.options).finish_non_exhaustive()
    }
}
