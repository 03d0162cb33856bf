//! Line-based markup front-end.
//!
//! `#` opens a heading, the classifier's marker (`## ` by default) labels a
//! command, `###` and deeper are lower heading levels, fences delimit code
//! and everything else is prose. Byte offsets of every block are kept so
//! offset locators resolve.

use rslug::slugify;

use super::classify::{Candidate, CommandClassifier};
use super::{Content, ContentBuilder};
use crate::consts::{MARKUP_ANCHOR_REGEX, MARKUP_FENCE_REGEX, MARKUP_HEADING_ID_REGEX, MARKUP_HEADING_REGEX};
use crate::models::Block;

pub(crate) fn parse(text: &str, classifier: &dyn CommandClassifier) -> Content {
    let mut builder = ContentBuilder::default();
    let mut lines = Lines::new(text);
    while let Some((start, line)) = lines.next() {
        if let Some(captures) = MARKUP_FENCE_REGEX.captures(line) {
            let fence = captures[1].len();
            let language = captures.get(2).map_or("", |lang| lang.as_str());
            let mut body = Vec::new();
            let mut closed = false;
            for (_, line) in lines.by_ref() {
                let closing = line.trim();
                if closing.len() >= fence && closing.bytes().all(|b| b == b'`') {
                    closed = true;
                    break;
                }
                body.push(line);
            }
            if closed {
                builder.push(Block::code(language, body.join("\n")), Some(start));
            } else {
                tracing::debug!(offset = start, "Unclosed code fence; degrading to prose");
                let text = std::iter::once(line).chain(body).collect::<Vec<_>>().join("\n");
                builder.push(Block::prose(text), Some(start));
            }
            continue;
        }
        if let Some(captures) = MARKUP_ANCHOR_REGEX.captures(line) {
            builder.anchor(&captures[1]);
            continue;
        }
        let (trimmed, explicit_id) = split_explicit_id(line.trim());
        if let Some(command) = classifier.command(&Candidate::Line(trimmed)) {
            title_anchors(&mut builder, explicit_id, &command);
            builder.push(Block::command(command), Some(start));
            continue;
        }
        if let Some(captures) = MARKUP_HEADING_REGEX.captures(trimmed) {
            let depth = captures[1].len();
            let text = captures.get(2).map_or("", |text| text.as_str());
            title_anchors(&mut builder, explicit_id, text);
            // `##` belongs to commands, so `###` is the second level.
            let level = if depth <= 2 { 1 } else { depth - 1 };
            builder.push(Block::heading(level, text), Some(start));
            continue;
        }
        builder.push(Block::prose(line), Some(start));
    }
    builder.finish()
}

/// Headings and commands are reachable through an explicit `{#id}` and
/// through the slug of their text.
fn title_anchors(builder: &mut ContentBuilder, explicit_id: Option<&str>, title: &str) {
    if let Some(id) = explicit_id {
        builder.anchor(id);
    }
    builder.anchor(&slugify!(title));
}

/// Splits a trailing `{#id}` off a line.
fn split_explicit_id(text: &str) -> (&str, Option<&str>) {
    match MARKUP_HEADING_ID_REGEX.captures(text) {
        Some(captures) => {
            let (Some(whole), Some(id)) = (captures.get(0), captures.get(1)) else {
                return (text, None);
            };
            (&text[..whole.start()], Some(id.as_str()))
        },
        None => (text, None),
    }
}

/// Lines paired with the byte offset they start at; `\r\n` endings are
/// stripped.
struct Lines<'a> {
    text: &'a str,
    position: usize,
}
impl<'a> Lines<'a> {
    fn new(text: &'a str) -> Self {
        Self { text, position: 0 }
    }
}
impl<'a> Iterator for Lines<'a> {
    type Item = (u64, &'a str);

    fn next(&mut self) -> Option<Self::Item> {
        if self.position >= self.text.len() {
            return None;
        }
        let start = self.position;
        let rest = &self.text[start..];
        let (line, consumed) = match memchr::memchr(b'\n', rest.as_bytes()) {
            Some(end) => (&rest[..end], end + 1),
            None => (rest, rest.len()),
        };
        self.position += consumed;
        Some((start as u64, line.strip_suffix('\r').unwrap_or(line)))
    }
}
