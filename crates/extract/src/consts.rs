use regex::Regex;
use scraper::Selector;
use std::sync::LazyLock;

macro_rules! selector {
    ($name:ident, $css:expr) => {
        pub(crate) static $name: LazyLock<Selector> = LazyLock::new(|| Selector::parse($css).unwrap());
    };
}

macro_rules! regex {
    ($name:ident, $regex:expr) => {
        pub(crate) static $name: LazyLock<Regex> = LazyLock::new(|| Regex::new($regex).unwrap());
    };
}

/// Bundle-relative location of the Dash SQLite index.
pub(crate) const DOCSET_INDEX: &str = "Contents/Resources/docSet.dsidx";
/// Bundle-relative location of the Dash content document.
pub(crate) const DOCSET_CONTENT: &str = "Contents/Resources/Documents/index.html";
/// Manifest index for flat bundles.
pub(crate) const MANIFEST_INDEX: &str = "index.json";
/// Content candidates for flat bundles, in order of preference.
pub(crate) const FLAT_CONTENT: &[&str] = &["index.html", "index.htm", "index.md", "index.markdown", "index.txt"];

/// Label given to entries whose index row carries no category.
pub const GENERAL_CATEGORY: &str = "General";
/// Upper bound for heading levels; deeper source headings are clamped.
pub const MAX_HEADING_LEVEL: u8 = 5;
/// Default cap on the number of content bytes handed to the parser.
pub const DEFAULT_MAX_CONTENT_BYTES: usize = 8 * 1024 * 1024;

/// Element depth beyond which leaf prose skips markdown conversion.
pub(crate) const MAX_MARKDOWN_DEPTH: usize = 256;

/// Elements that make their ancestors containers rather than single blocks.
pub(crate) const BLOCK_ELEMENTS: &[&str] = &[
    "address", "article", "aside", "blockquote", "dd", "details", "div", "dl", "dt", "fieldset", "figure", "footer",
    "form", "h1", "h2", "h3", "h4", "h5", "h6", "header", "hr", "li", "main", "nav", "ol", "p", "pre", "section",
    "table", "tbody", "td", "tfoot", "th", "thead", "tr", "ul",
];
/// Elements whose content never reaches the output.
pub(crate) const SKIPPED_ELEMENTS: &[&str] = &["head", "script", "style", "template", "noscript"];

selector!(CODE_SELECTOR, "code");

// `index.html#//dash_ref_Branching/Entry/git%20checkout/0`
regex!(DASH_REF_REGEX, r"^//dash_ref_([^/]+)/");
regex!(MARKUP_HEADING_REGEX, r"^(#+)\s+(.*?)\s*$");
regex!(MARKUP_HEADING_ID_REGEX, r"\s*\{#([^}\s]+)\}$");
regex!(MARKUP_FENCE_REGEX, r"^\s*(`{3,})\s*([A-Za-z0-9_+#.-]*)\s*$");
regex!(MARKUP_ANCHOR_REGEX, r#"^\s*<a\s+(?:name|id)\s*=\s*["']([^"']+)["']\s*/?>\s*(?:</a>)?\s*$"#);
