//! Utilities for capping oversized cheatsheet content before parsing.

use memchr::memrchr;

use crate::parse::ContentFormat;

/// Truncates raw content bytes to at most `max_bytes`, cutting at a safe
/// boundary for the given format.
///
/// - HTML is never cut mid-tag or mid-entity.
/// - Markup is cut after the last complete line, unless the first line alone
///   exceeds the limit.
///
/// Accepts raw bytes, instead of requiring valid UTF-8. Every marker
/// searched for (`<`, `>`, `&`, `;`, `\n`) is ASCII, so searching is safe.
///
/// # Examples
///
/// ```rust
/// use cheatsheet_extract::{ContentFormat, safe_truncate};
/// let html = b"<div>Hello World</div>";
/// assert_eq!(safe_truncate(html, 10, ContentFormat::Html).len(), 10);
/// assert_eq!(safe_truncate(html, 18, ContentFormat::Html).len(), 16);
/// assert_eq!(safe_truncate(b"# One\n## two\n", 9, ContentFormat::Markup), b"# One\n");
/// ```
pub fn safe_truncate(content: &[u8], max_bytes: usize, format: ContentFormat) -> &[u8] {
    if content.len() <= max_bytes {
        return content;
    }
    let candidate = &content[..max_bytes];
    match format {
        ContentFormat::Html => html_boundary(candidate),
        ContentFormat::Markup => match memrchr(b'\n', candidate) {
            Some(newline) => &candidate[..=newline],
            None => candidate,
        },
    }
}

fn html_boundary(candidate: &[u8]) -> &[u8] {
    let open_tag = memrchr(b'<', candidate);
    let close_tag = memrchr(b'>', candidate);
    if let Some(open_tag) = open_tag
        && close_tag.is_none_or(|close_tag| close_tag < open_tag)
    {
        // Inside a tag, cut before the '<'
        return &candidate[..open_tag];
    }
    let entity_start = memrchr(b'&', candidate);
    let entity_end = memrchr(b';', candidate);
    if let Some(entity_start) = entity_start
        && entity_end.is_none_or(|entity_end| entity_end < entity_start)
    {
        // Inside an entity, cut before the '&'
        return &candidate[..entity_start];
    }
    candidate
}
