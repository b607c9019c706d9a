pub mod catalog;
pub mod config;
pub mod extras;
pub mod flanking;
pub mod inline_parser;
pub mod lexer;
pub mod matcher;
pub mod parser;
pub mod scanner;
pub mod syntax;
pub mod tree;

use std::sync::LazyLock;

use regex::Regex;

pub use catalog::{Catalog, MarkerFamily, Strength};
pub use extras::{EmphasisExtras, Extension};
pub use inline_parser::InlineParser;
pub use parser::parse;
pub use tree::{InlineNode, outline};

static BLANK_LINES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n(?:[ \t]*\n)+").expect("valid blank line pattern"));

/// Parses one inline container (a paragraph, a heading, a table cell) into
/// a forest of text and spans.
///
/// # Examples
///
/// ```rust
/// use inlinemark::{EmphasisExtras, outline, parse_inlines};
///
/// let nodes = parse_inlines("~~a^b^c~~", EmphasisExtras::DEFAULT);
/// assert_eq!(outline(&nodes), r#"(strikeout "a" (superscript "b") "c")"#);
/// ```
pub fn parse_inlines(input: &str, extras: EmphasisExtras) -> Vec<InlineNode> {
    InlineParser::new(input, Catalog::new(extras)).parse()
}

/// Splits `input` into paragraphs on blank lines and parses each one as an
/// independent inline container.
pub fn parse_document(input: &str, extras: EmphasisExtras) -> Vec<Vec<InlineNode>> {
    let normalized = input.replace("\r\n", "\n");
    let catalog = Catalog::new(extras);
    paragraphs(&normalized)
        .map(|para| InlineParser::new(para, catalog).parse())
        .collect()
}

/// One outline line per paragraph.
pub fn outline_document(input: &str, extras: EmphasisExtras) -> String {
    let mut out = String::new();
    for nodes in parse_document(input, extras) {
        out.push_str(&outline(&nodes));
        out.push('\n');
    }
    out
}

fn paragraphs(input: &str) -> impl Iterator<Item = &str> {
    BLANK_LINES
        .split(input)
        .map(str::trim)
        .filter(|para| !para.is_empty())
}
