use std::ops::Range;

use rowan::GreenNodeBuilder;

use crate::catalog::Catalog;
use crate::extras::EmphasisExtras;
use crate::inline_parser::InlineParser;
use crate::lexer::Token;
use crate::syntax::{SyntaxKind, SyntaxNode};
use crate::tree::{Event, events};

#[cfg(test)]
mod tests;

/// Builds a lossless rowan tree of the inline parse: every byte of the input
/// ends up in exactly one token, matched markers as `DelimiterMarker` tokens
/// at the edges of their span node.
pub struct Parser<'a> {
    inline: InlineParser<'a>,
    builder: GreenNodeBuilder<'static>,
    token_starts: Vec<usize>,
    pos: usize,
}

impl<'a> Parser<'a> {
    pub fn new(input: &'a str, catalog: Catalog) -> Self {
        let inline = InlineParser::new(input, catalog);
        let token_starts = inline
            .tokens()
            .iter()
            .scan(0usize, |offset, token| {
                let start = *offset;
                *offset += token.len;
                Some(start)
            })
            .collect();
        Self {
            inline,
            builder: GreenNodeBuilder::new(),
            token_starts,
            pos: 0,
        }
    }

    pub fn parse(mut self) -> SyntaxNode {
        let input = self.inline.input();
        let spans = self.inline.match_spans();

        self.builder.start_node(SyntaxKind::ROOT.into());
        for event in events(input.len(), &spans) {
            match event {
                Event::Text(range) => self.literal(range),
                Event::Open(idx) => {
                    let span = &spans[idx];
                    let kind = SyntaxKind::for_span(span.family, span.strength);
                    log::trace!("Opening {kind:?} at {}", span.open.start);
                    self.builder.start_node(kind.into());
                    self.marker(span.open.clone());
                }
                Event::Close(idx) => {
                    self.marker(spans[idx].close.clone());
                    self.builder.finish_node();
                }
            }
        }
        self.builder.finish_node();

        SyntaxNode::new_root(self.builder.finish())
    }

    fn token(&self, idx: usize) -> (&Token, Range<usize>) {
        let token = &self.inline.tokens()[idx];
        let start = self.token_starts[idx];
        (token, start..start + token.len)
    }

    /// Emit the lexer tokens covering `range`, clipping any token that a
    /// consumed marker splits.
    fn literal(&mut self, range: Range<usize>) {
        let input = self.inline.input();
        while self.pos < self.token_starts.len() {
            let (token, span) = self.token(self.pos);
            if span.end <= range.start {
                self.pos += 1;
                continue;
            }
            if span.start >= range.end {
                break;
            }
            let kind = token.kind;
            let piece = span.start.max(range.start)..span.end.min(range.end);
            log::trace!("Literal {:?} = {:?}", kind, &input[piece.clone()]);
            self.builder.token(kind.into(), &input[piece]);
            if span.end <= range.end {
                self.pos += 1;
            } else {
                break;
            }
        }
    }

    fn marker(&mut self, range: Range<usize>) {
        let text = &self.inline.input()[range];
        self.builder.token(SyntaxKind::DelimiterMarker.into(), text);
    }
}

pub fn parse(input: &str, extras: EmphasisExtras) -> SyntaxNode {
    Parser::new(input, Catalog::new(extras)).parse()
}
