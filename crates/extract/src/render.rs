use std::fmt::Write;

use crate::models::Block;

/// Serializes blocks into the text output.
///
/// Blocks are separated by one blank line, and non-empty output ends with a
/// single newline. The same blocks always produce the same bytes.
pub fn render<'a>(blocks: impl IntoIterator<Item = &'a Block>) -> String {
    let mut output = String::new();
    for block in blocks {
        if !output.is_empty() {
            output.push('\n');
        }
        // Writing into a `String` is infallible.
        let _ = writeln!(output, "{block}");
    }
    output
}
