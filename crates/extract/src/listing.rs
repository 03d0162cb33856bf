//! Plain-text listings returned by the façade.
//!
//! The layout is a compatibility contract with existing consumers: one
//! header line and one blank line, then the body, then one blank line and
//! one footer line. Consumers slice `lines[2:-2]` to get the body back.

use std::fmt::{Display, Formatter, Result as FmtResult};

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Listing {
    header: String,
    body: Vec<String>,
    footer: String,
}
impl Listing {
    pub(crate) fn new(header: impl Into<String>, body: Vec<String>, noun: (&str, &str)) -> Self {
        let (singular, plural) = noun;
        let footer = format!("Total: {} {}", body.len(), if body.len() == 1 { singular } else { plural });
        Self {
            header: header.into(),
            body,
            footer,
        }
    }
}
impl Display for Listing {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        writeln!(f, "{}", self.header)?;
        writeln!(f)?;
        for line in &self.body {
            writeln!(f, "{line}")?;
        }
        writeln!(f)?;
        write!(f, "{}", self.footer)
    }
}
