//! Category attribution over parsed content.

use std::ops::Range;

use super::{Block, CategoryMap};
use crate::parse::Content;

/// The blocks attributed to one category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub label: String,
    pub ranges: Vec<Range<usize>>,
}

/// Parsed content of one bundle, partitioned by category.
///
/// Every category of the index has a [`Section`], even when none of its
/// entries could be located in the content. Blocks before the first located
/// entry form the preamble (usually the document title), which frames every
/// category selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    blocks: Vec<Block>,
    preamble: Range<usize>,
    sections: Vec<Section>,
}
impl Document {
    pub fn new(content: Content, categories: &CategoryMap) -> Self {
        // Where each located entry starts its category, in index order.
        let mut switches: Vec<(usize, usize)> = Vec::new();
        for (category, entry) in categories.indexed() {
            match content.resolve(&entry.locator) {
                Some(position) => switches.push((position, category)),
                None => tracing::trace!(entry = %entry.name, locator = %entry.locator, "Index entry not found in content"),
            }
        }
        // Stable: entries sharing a position keep index order, the last one wins.
        switches.sort_by_key(|&(position, _)| position);

        let blocks = content.into_blocks();
        let mut ranges: Vec<Vec<Range<usize>>> = vec![Vec::new(); categories.len()];
        let mut switches = switches.into_iter().peekable();
        let mut current: Option<usize> = None;
        let mut preamble_end = blocks.len();
        for position in 0..blocks.len() {
            while let Some((_, category)) = switches.next_if(|&(at, _)| at <= position) {
                current = Some(category);
            }
            let Some(category) = current else {
                continue;
            };
            preamble_end = preamble_end.min(position);
            match ranges[category].last_mut() {
                Some(range) if range.end == position => range.end += 1,
                _ => ranges[category].push(position..position + 1),
            }
        }
        let sections = categories
            .iter()
            .zip(ranges)
            .map(|(category, ranges)| Section { label: category.label.clone(), ranges })
            .collect();
        Self { blocks, preamble: 0..preamble_end, sections }
    }

    /// Every block, in document order.
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn preamble(&self) -> &[Block] {
        &self.blocks[self.preamble.clone()]
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn section(&self, label: &str) -> Option<&Section> {
        self.sections.iter().find(|section| section.label == label)
    }

    /// Blocks attributed to `label`, preceded by the preamble.
    ///
    /// Returns `None` if the document has no such category.
    pub fn category_blocks(&self, label: &str) -> Option<Vec<&Block>> {
        let section = self.section(label)?;
        let attributed = section.ranges.iter().flat_map(|range| &self.blocks[range.clone()]);
        Some(self.preamble().iter().chain(attributed).collect())
    }

    /// The whole document for `None`, a single category otherwise.
    pub fn select(&self, category: Option<&str>) -> Option<Vec<&Block>> {
        match category {
            Some(label) => self.category_blocks(label),
            None => Some(self.blocks.iter().collect()),
        }
    }
}
