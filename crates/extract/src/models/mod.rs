mod block;
mod category;
mod document;
mod entry;

pub use self::block::Block;
pub(crate) use self::block::collapse_whitespace;
pub use self::category::{Category, CategoryMap};
pub use self::document::{Document, Section};
pub use self::entry::{IndexEntry, Locator};
