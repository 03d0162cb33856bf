//! Detection of labeled shell/tool invocations ("commands").
//!
//! Whether something is a command is a per-format heuristic, so it lives
//! behind [`CommandClassifier`] and can be swapped through
//! [`Options::with_classifier`](crate::Options::with_classifier) without
//! touching either parser.

use std::fmt::Debug;

use scraper::ElementRef;

use crate::models::collapse_whitespace;

/// Something a parser is about to turn into a block.
#[derive(Debug, Clone, Copy)]
pub enum Candidate<'a> {
    /// A trimmed line of lightweight markup.
    Line(&'a str),
    /// An HTML element, visited before any other block rule applies to it.
    Element(ElementRef<'a>),
}

/// The single predicate deciding what counts as a command.
pub trait CommandClassifier: Debug + Send + Sync {
    /// Returns the command name when `candidate` is a labeled invocation.
    fn command(&self, candidate: &Candidate<'_>) -> Option<String>;
}

/// Default classifier.
///
/// - Markup: a line starting with the marker (`"## "`) is a command named by
///   the rest of the line. The marker matches the rendered output, so
///   rendered text parses back into the same commands.
/// - HTML: an element carrying the class (`name`, the entry title in Dash
///   cheatsheets) is a command named by its text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkerClassifier {
    marker: String,
    class: String,
}
impl MarkerClassifier {
    pub fn new(marker: impl Into<String>, class: impl Into<String>) -> Self {
        Self {
            marker: marker.into(),
            class: class.into(),
        }
    }
}
impl Default for MarkerClassifier {
    fn default() -> Self {
        Self::new("## ", "name")
    }
}

impl CommandClassifier for MarkerClassifier {
    fn command(&self, candidate: &Candidate<'_>) -> Option<String> {
        let name = match candidate {
            Candidate::Line(line) => collapse_whitespace(line.strip_prefix(self.marker.as_str())?),
            Candidate::Element(element) => {
                let has_class = element
                    .value()
                    .attr("class")
                    .is_some_and(|classes| classes.split_whitespace().any(|class| class == self.class));
                if !has_class {
                    return None;
                }
                collapse_whitespace(&element.text().collect::<String>())
            },
        };
        Some(name).filter(|name| !name.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use scraper::{Html, Selector};

    #[rstest]
    #[case("## git add", Some("git add"))]
    #[case("##   spaced   out ", Some("spaced out"))]
    #[case("### Heading", None)]
    #[case("# Heading", None)]
    #[case("##", None)]
    #[case("plain prose", None)]
    fn test_marker_lines(#[case] line: &str, #[case] expected: Option<&str>) {
        let classifier = MarkerClassifier::default();
        assert_eq!(classifier.command(&Candidate::Line(line)).as_deref(), expected);
    }

    #[test]
    fn test_marker_elements() {
        let html = Html::parse_fragment(
            r#"<div class="name"><p><code>git   checkout</code></p></div><div class="notes">Switch</div>"#,
        );
        let classifier = MarkerClassifier::default();
        let divs: Vec<_> = html.select(&Selector::parse("div").unwrap()).collect();
        assert_eq!(classifier.command(&Candidate::Element(divs[0])).as_deref(), Some("git checkout"));
        assert_eq!(classifier.command(&Candidate::Element(divs[1])), None);
    }

    #[test]
    fn test_custom_marker() {
        let classifier = MarkerClassifier::new("$ ", "cmd");
        assert_eq!(classifier.command(&Candidate::Line("$ ls -la")).as_deref(), Some("ls -la"));
        assert_eq!(classifier.command(&Candidate::Line("## ls")), None);
    }
}
