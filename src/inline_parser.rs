use crate::catalog::Catalog;
use crate::lexer::{Token, tokenize};
use crate::matcher::{MatchedSpan, Matcher};
use crate::scanner::{Scanned, scan};
use crate::tree::{self, InlineNode};


/// The InlineParser runs the delimiter engine over one inline container
/// (a paragraph, a heading's text, ...): tokens are scanned into delimiter
/// runs, runs are matched on an owned delimiter stack, and the matched spans
/// are assembled into an [`InlineNode`] forest.
pub struct InlineParser<'a> {
    input: &'a str,
    tokens: Vec<Token>,
    catalog: Catalog,
}

impl<'a> InlineParser<'a> {
    pub fn new(input: &'a str, catalog: Catalog) -> Self {
        let tokens = tokenize(input);
        debug_assert_eq!(tokens.iter().map(|t| t.len).sum::<usize>(), input.len());
        Self {
            input,
            tokens,
            catalog,
        }
    }

    pub fn input(&self) -> &'a str {
        self.input
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Run scanner and matcher, returning the spans in the order they closed.
    pub fn match_spans(&self) -> Vec<MatchedSpan> {
        let mut matcher = Matcher::new();
        let mut literal = 0usize;

        for item in scan(self.input, &self.tokens, &self.catalog) {
            match item {
                Scanned::Text(range) => literal += range.len(),
                Scanned::Run(run) => matcher.feed(run),
            }
        }

        let spans = matcher.finish();
        log::debug!(
            "Inline parse: {} literal bytes, {} span(s) matched",
            literal,
            spans.len()
        );
        spans
    }

    pub fn parse(self) -> Vec<InlineNode> {
        let spans = self.match_spans();
        tree::build(self.input, &spans)
    }
}
