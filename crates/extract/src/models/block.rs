use std::fmt::{Display, Formatter, Result as FmtResult};

use crate::consts::MAX_HEADING_LEVEL;

/// One normalized unit of cheatsheet content.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Block {
    /// Section heading, level within `1..=MAX_HEADING_LEVEL`.
    Heading { level: u8, text: String },
    /// A labeled shell/tool invocation.
    Command { name: String },
    /// Code sample; `language` is empty unless the source gave an explicit hint.
    CodeFence { language: String, body: String },
    /// Anything else textual.
    Prose { text: String },
}
impl Block {
    /// Builds a heading, clamping the source depth into the supported range.
    pub fn heading(level: usize, text: impl AsRef<str>) -> Self {
        let level = level.clamp(1, usize::from(MAX_HEADING_LEVEL)) as u8;
        Self::Heading { level, text: collapse_whitespace(text.as_ref()) }
    }

    pub fn command(name: impl AsRef<str>) -> Self {
        Self::Command { name: collapse_whitespace(name.as_ref()) }
    }

    pub fn code(language: impl Into<String>, body: impl AsRef<str>) -> Self {
        Self::CodeFence {
            language: language.into().trim().to_string(),
            body: body.as_ref().trim_matches('\n').trim_end().to_string(),
        }
    }

    pub fn prose(text: impl AsRef<str>) -> Self {
        Self::Prose { text: text.as_ref().trim().to_string() }
    }

    /// `true` for blocks carrying no visible content; these are dropped.
    pub fn is_blank(&self) -> bool {
        match self {
            Self::Heading { text, .. } => text.trim().is_empty(),
            Self::Command { name } => name.trim().is_empty(),
            Self::CodeFence { body, .. } => body.trim().is_empty(),
            Self::Prose { text } => text.trim().is_empty(),
        }
    }

    pub fn is_prose(&self) -> bool {
        matches!(self, Self::Prose { .. })
    }
}

impl Display for Block {
    /// Writes the block as text. `##` is reserved for commands, so headings
    /// below the first level skip it (`###` onwards).
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::Heading { level, text } => {
                let hashes = if *level <= 1 { 1 } else { usize::from(*level) + 1 };
                write!(f, "{} {text}", "#".repeat(hashes))
            },
            Self::Command { name } => write!(f, "## {name}"),
            Self::CodeFence { language, body } => {
                let fence = "`".repeat(longest_backtick_run(body).max(2) + 1);
                write!(f, "{fence}{language}\n{body}\n{fence}")
            },
            Self::Prose { text } => write!(f, "{text}"),
        }
    }
}

/// Length of the longest run of consecutive backticks in `s`.
fn longest_backtick_run(s: &str) -> usize {
    s.split(|c| c != '`').map(str::len).max().unwrap_or(0)
}

pub(crate) fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}
