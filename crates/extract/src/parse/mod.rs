//! Conversion of raw bundle content into normalized blocks.
//!
//! Both front-ends ([`html`] and [`markup`]) feed a [`ContentBuilder`], which
//! owns the rules every format shares: blank blocks are dropped, consecutive
//! prose is merged (unless an anchor sits between the two), and anchors are
//! pinned to the position of the next block.

mod classify;
mod html;
mod markup;

use std::fs;
use std::path::Path;

use exn::ResultExt;
use tracing::instrument;

pub use self::classify::{Candidate, CommandClassifier, MarkerClassifier};
use crate::bundle::Bundle;
use crate::error::{ErrorKind, Result};
use crate::index::percent_decode;
use crate::models::{Block, Locator};
use crate::{Options, safe_truncate};

/// Supported raw content formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentFormat {
    /// HTML, as shipped inside Dash docsets.
    Html,
    /// Lightweight line-based markup (`#` headings, `## command`, fences).
    Markup,
}
impl ContentFormat {
    /// Guesses the format from the file extension; anything that isn't HTML
    /// is read as markup.
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        let is_html = path
            .as_ref()
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("html") || ext.eq_ignore_ascii_case("htm"));
        if is_html { Self::Html } else { Self::Markup }
    }
}

/// An anchor id, pinned to the block that follows it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Anchor {
    pub id: String,
    pub position: usize,
    key: String,
}

/// Parser output: blocks in document order, plus what's needed to map index
/// locators back onto them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Content {
    blocks: Vec<Block>,
    offsets: Vec<Option<u64>>,
    anchors: Vec<Anchor>,
}
impl Content {
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn anchors(&self) -> &[Anchor] {
        &self.anchors
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub(crate) fn into_blocks(self) -> Vec<Block> {
        self.blocks
    }

    /// Position of the first block a locator points at.
    ///
    /// Anchors match either verbatim or after percent-decoding, since Dash
    /// indexes store encoded fragments while the HTML may not. Offsets match
    /// the first block starting at or after them. Record ids never match.
    pub fn resolve(&self, locator: &Locator) -> Option<usize> {
        match locator {
            Locator::Anchor(id) => {
                let key = percent_decode(id);
                self.anchors.iter().find(|anchor| anchor.id == *id || anchor.key == key).map(|anchor| anchor.position)
            },
            Locator::Offset(offset) => self.offsets.iter().position(|start| start.is_some_and(|start| start >= *offset)),
            Locator::Record(_) => None,
        }
    }
}

#[derive(Debug, Default)]
pub(crate) struct ContentBuilder {
    content: Content,
}
impl ContentBuilder {
    /// Registers an anchor for the next block to be pushed.
    pub(crate) fn anchor(&mut self, id: &str) {
        let id = id.trim();
        if id.is_empty() {
            return;
        }
        self.content.anchors.push(Anchor {
            id: id.to_string(),
            position: self.content.blocks.len(),
            key: percent_decode(id),
        });
    }

    pub(crate) fn push(&mut self, block: Block, offset: Option<u64>) {
        if block.is_blank() {
            return;
        }
        let position = self.content.blocks.len();
        let anchored = self.content.anchors.last().is_some_and(|anchor| anchor.position == position);
        if let Block::Prose { text } = &block
            && !anchored
            && let Some(Block::Prose { text: previous }) = self.content.blocks.last_mut()
        {
            previous.push('\n');
            previous.push_str(text);
            return;
        }
        self.content.blocks.push(block);
        self.content.offsets.push(offset);
    }

    pub(crate) fn finish(self) -> Content {
        self.content
    }
}

/// Loads and parses a bundle's content file.
///
/// Fails with [`ErrorKind::UnreadableContent`] only when the file can't be
/// read at all; malformed markup is recovered from.
#[instrument(skip_all, fields(bundle = %bundle.name, path = %bundle.content_path().display()))]
pub fn parse(bundle: &Bundle, options: &Options) -> Result<Content> {
    let path = bundle.content_path();
    let bytes = fs::read(path).or_raise(|| ErrorKind::UnreadableContent(path.to_path_buf()))?;
    let content = parse_bytes(bundle.content_format(), &bytes, options);
    tracing::debug!(blocks = content.blocks.len(), anchors = content.anchors.len(), "Parsed cheatsheet content");
    Ok(content)
}

/// Parses raw bytes; invalid UTF-8 sequences are replaced with U+FFFD.
pub fn parse_bytes(format: ContentFormat, bytes: &[u8], options: &Options) -> Content {
    let limited = safe_truncate(bytes, options.max_content_bytes, format);
    if limited.len() < bytes.len() {
        tracing::warn!(size = bytes.len(), kept = limited.len(), "Cheatsheet content exceeds size cap; truncated");
    }
    let text = String::from_utf8_lossy(limited);
    let classifier = options.classifier.as_ref();
    match format {
        ContentFormat::Html => html::parse(&text, classifier),
        ContentFormat::Markup => markup::parse(&text, classifier),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("index.html", ContentFormat::Html)]
    #[case("Documents/INDEX.HTM", ContentFormat::Html)]
    #[case("index.md", ContentFormat::Markup)]
    #[case("index.txt", ContentFormat::Markup)]
    fn test_format_from_path(#[case] path: &str, #[case] expected: ContentFormat) {
        assert_eq!(ContentFormat::from_path(path), expected);
    }

    #[test]
    fn test_builder_merges_consecutive_prose() {
        let mut builder = ContentBuilder::default();
        builder.push(Block::prose("one"), None);
        builder.push(Block::prose("  "), None);
        builder.push(Block::prose("two"), None);
        assert_eq!(builder.finish().blocks(), &[Block::prose("one\ntwo")]);
    }

    #[test]
    fn test_builder_does_not_merge_across_anchor() {
        let mut builder = ContentBuilder::default();
        builder.push(Block::prose("one"), None);
        builder.anchor("second");
        builder.push(Block::prose("two"), None);
        let content = builder.finish();
        assert_eq!(content.blocks(), &[Block::prose("one"), Block::prose("two")]);
        assert_eq!(content.resolve(&Locator::Anchor("second".to_string())), Some(1));
    }

    #[test]
    fn test_resolve_locators() {
        let mut builder = ContentBuilder::default();
        builder.push(Block::heading(1, "Title"), Some(0));
        builder.anchor("//dash_ref_Remote%20Repos/Entry/push/0");
        builder.push(Block::command("push"), Some(12));
        builder.push(Block::prose("Upload"), Some(30));
        let content = builder.finish();
        assert_eq!(content.resolve(&Locator::Anchor("//dash_ref_Remote Repos/Entry/push/0".to_string())), Some(1));
        assert_eq!(content.resolve(&Locator::Offset(5)), Some(1));
        assert_eq!(content.resolve(&Locator::Offset(12)), Some(1));
        assert_eq!(content.resolve(&Locator::Offset(99)), None);
        assert_eq!(content.resolve(&Locator::Record(1)), None);
        assert_eq!(content.resolve(&Locator::Anchor("missing".to_string())), None);
    }

    #[test]
    fn test_parse_bytes_truncates_oversized_content() {
        let options = Options::default().with_max_content_bytes(20);
        let content = parse_bytes(ContentFormat::Markup, b"# Title\n## first\n## second\n", &options);
        assert_eq!(content.blocks(), &[Block::heading(1, "Title"), Block::command("first")]);
    }

    #[test]
    fn test_parse_bytes_replaces_invalid_utf8() {
        let content = parse_bytes(ContentFormat::Markup, b"caf\xe9 au lait", &Options::default());
        assert_eq!(content.blocks(), &[Block::prose("caf\u{FFFD} au lait")]);
    }
}
