//! HTML front-end.
//!
//! `html5ever` (through `scraper`) already recovers from unclosed tags, so
//! the walker never fails. What it does handle is elements that came out of
//! that recovery with the wrong shape: a heading or `pre` that swallowed
//! block content is walked like any other container, meaning its own text
//! becomes prose and the blocks it swallowed still parse normally.
//!
//! The DOM depth is unbounded, so neither pass recurses: subtree shapes are
//! gathered bottom-up over the flattened tree and the walk itself runs off
//! an explicit stack.

use std::collections::HashMap;

use ego_tree::{NodeId, NodeRef};
#[cfg(feature = "markdown")]
use html2md::rewrite_html as html_to_markdown;
use scraper::node::Node;
use scraper::{ElementRef, Html};

use super::classify::{Candidate, CommandClassifier};
use super::{Content, ContentBuilder};
use crate::consts;
use crate::models::{Block, collapse_whitespace};

pub(crate) fn parse(html: &str, classifier: &dyn CommandClassifier) -> Content {
    let document = Html::parse_document(html);
    let root = document.root_element();
    let mut walker = Walker {
        classifier,
        shapes: shapes(root, classifier),
        builder: ContentBuilder::default(),
    };
    walker.walk(root);
    walker.builder.finish()
}

/// What the walker needs to know about everything below an element.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
struct Shape {
    /// Some descendant would become a block of its own.
    nested_block: bool,
    /// Levels of elements below this one.
    depth: usize,
}

/// Shapes of every element under (and including) `root`.
///
/// Reverse document order visits children before their parents, so each
/// element's shape is complete by the time it is folded into its parent.
fn shapes(root: ElementRef<'_>, classifier: &dyn CommandClassifier) -> HashMap<NodeId, Shape> {
    let elements = root.descendants().filter_map(ElementRef::wrap).collect::<Vec<_>>();
    let mut shapes: HashMap<NodeId, Shape> = HashMap::with_capacity(elements.len());
    for element in elements.into_iter().rev() {
        let shape = *shapes.entry(element.id()).or_default();
        let Some(parent) = element.parent().filter(|_| element.id() != root.id()) else {
            continue;
        };
        let is_block = consts::BLOCK_ELEMENTS.contains(&element.value().name())
            || classifier.command(&Candidate::Element(element)).is_some();
        let parent = shapes.entry(parent.id()).or_default();
        parent.nested_block |= is_block || shape.nested_block;
        parent.depth = parent.depth.max(shape.depth + 1);
    }
    shapes
}

struct Walker<'c> {
    classifier: &'c dyn CommandClassifier,
    shapes: HashMap<NodeId, Shape>,
    builder: ContentBuilder,
}
impl Walker<'_> {
    fn walk(&mut self, root: ElementRef<'_>) {
        let mut stack = Vec::new();
        push_children(&mut stack, *root);
        while let Some(node) = stack.pop() {
            if let Some(element) = ElementRef::wrap(node) {
                if self.element(element) {
                    push_children(&mut stack, node);
                }
            } else if let Node::Text(text) = node.value() {
                self.builder.push(Block::prose(collapse_whitespace(text)), None);
            }
        }
    }

    /// Emits the block `element` stands for, or returns `true` when its
    /// children have to be walked instead.
    fn element(&mut self, element: ElementRef<'_>) -> bool {
        let name = element.value().name();
        if consts::SKIPPED_ELEMENTS.contains(&name) {
            return false;
        }
        self.anchors(element);
        if let Some(command) = self.classifier.command(&Candidate::Element(element)) {
            self.nested_anchors(element);
            self.builder.push(Block::command(command), None);
            return false;
        }
        let shape = self.shape(element);
        match name {
            "br" | "hr" | "img" => false,
            "h1" | "h2" | "h3" | "h4" | "h5" | "h6" if !shape.nested_block => {
                let level = name[1..].parse::<usize>().unwrap_or(1);
                self.nested_anchors(element);
                self.builder.push(Block::heading(level, element.text().collect::<String>()), None);
                false
            },
            "pre" if !shape.nested_block => {
                self.nested_anchors(element);
                self.builder.push(Block::code(code_language(element), element.text().collect::<String>()), None);
                false
            },
            "h1" | "h2" | "h3" | "h4" | "h5" | "h6" | "pre" => {
                tracing::debug!(element = name, "Element contains block content; degrading to prose");
                true
            },
            _ if !shape.nested_block => {
                self.nested_anchors(element);
                self.builder.push(prose(element, shape.depth), None);
                false
            },
            _ => true,
        }
    }

    fn shape(&self, element: ElementRef<'_>) -> Shape {
        self.shapes.get(&element.id()).copied().unwrap_or_default()
    }

    /// Registers `id="…"` and `<a name="…">` of the element itself.
    fn anchors(&mut self, element: ElementRef<'_>) {
        let value = element.value();
        if let Some(id) = value.id() {
            self.builder.anchor(id);
        }
        if value.name() == "a"
            && let Some(name) = value.attr("name")
        {
            self.builder.anchor(name);
        }
    }

    fn nested_anchors(&mut self, element: ElementRef<'_>) {
        for descendant in element.descendants().skip(1).filter_map(ElementRef::wrap) {
            self.anchors(descendant);
        }
    }
}

/// Pushes the children of `node` so that they pop in document order.
fn push_children<'a>(stack: &mut Vec<NodeRef<'a, Node>>, node: NodeRef<'a, Node>) {
    let start = stack.len();
    stack.extend(node.children());
    stack[start..].reverse();
}

/// The explicit language hint of a code region, or an empty string.
///
/// Looks at the `pre` and its first `code` child for `data-lang`,
/// `language-*`/`lang-*` classes, or the class following `highlight`
/// (Rouge output, as used by Dash cheatsheets).
fn code_language(pre: ElementRef<'_>) -> String {
    let code = pre.select(&consts::CODE_SELECTOR).next();
    [Some(pre), code].into_iter().flatten().find_map(language_hint).unwrap_or_default()
}

fn language_hint(element: ElementRef<'_>) -> Option<String> {
    let value = element.value();
    if let Some(lang) = value.attr("data-lang").map(str::trim).filter(|lang| !lang.is_empty()) {
        return Some(lang.to_string());
    }
    let mut classes = value.attr("class")?.split_whitespace();
    while let Some(class) = classes.next() {
        if let Some(lang) = class.strip_prefix("language-").or_else(|| class.strip_prefix("lang-"))
            && !lang.is_empty()
        {
            return Some(lang.to_string());
        }
        if class == "highlight" {
            return classes.next().map(str::to_string);
        }
    }
    None
}

/// Leaf prose. Markdown conversion walks the fragment recursively, so
/// leaves nested deeper than [`consts::MAX_MARKDOWN_DEPTH`] keep plain text.
#[cfg(feature = "markdown")]
fn prose(element: ElementRef<'_>, depth: usize) -> Block {
    if depth > consts::MAX_MARKDOWN_DEPTH {
        tracing::debug!(depth, "Prose nested too deeply for markdown conversion; keeping plain text");
        return plain_prose(element);
    }
    Block::prose(html_to_markdown(element.inner_html().as_str(), true))
}

#[cfg(not(feature = "markdown"))]
fn prose(element: ElementRef<'_>, _depth: usize) -> Block {
    plain_prose(element)
}

fn plain_prose(element: ElementRef<'_>) -> Block {
    Block::prose(collapse_whitespace(&element.text().collect::<String>()))
}
