//! Category discovery and text rendering for installed cheatsheet bundles.
//!
//! ```text
//! name ─▶ locate ─▶ Bundle ─▶ read_categories ─▶ CategoryMap ─┐
//!                     └────▶ parse ─▶ Content ────────────────┴─▶ Document ─▶ render
//! ```
//!
//! [`Extractor`] runs the whole pipeline per call; the stages are public for
//! callers that only need part of it.

mod bundle;
mod consts;
pub mod error;
mod extractor;
#[cfg(test)]
mod fixtures;
mod index;
mod listing;
pub mod models;
mod options;
pub mod parse;
mod render;
mod truncate;

pub use crate::bundle::{Bundle, IndexHandle, locate};
pub use crate::consts::{DEFAULT_MAX_CONTENT_BYTES, GENERAL_CATEGORY, MAX_HEADING_LEVEL};
pub use crate::extractor::Extractor;
pub use crate::index::{read_categories, read_index};
pub use crate::options::Options;
pub use crate::parse::{Candidate, CommandClassifier, ContentFormat, MarkerClassifier};
pub use crate::render::render;
pub use crate::truncate::safe_truncate;
