use std::ops::Range;

use crate::catalog::{Catalog, Marker};
use crate::flanking::{self, Flanking};
use crate::lexer::Token;
use crate::syntax::SyntaxKind;

/// A maximal run of one marker character, as seen by the matcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DelimiterRun {
    pub marker: Marker,
    /// Byte offset of the first marker character.
    pub start: usize,
    /// Byte offset one past the last marker character.
    pub end: usize,
    /// Characters not yet consumed. Closing consumes from the front, opening
    /// from the back, so the live range always stays contiguous.
    pub live: Range<usize>,
    pub flanking: Flanking,
    pub active: bool,
}

impl DelimiterRun {
    pub fn new(marker: Marker, start: usize, end: usize, flanking: Flanking) -> Self {
        Self {
            marker,
            start,
            end,
            live: start..end,
            flanking,
            active: true,
        }
    }

    /// Length of the run as scanned.
    pub(crate) fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn remaining(&self) -> usize {
        self.live.len()
    }

    pub fn can_open(&self) -> bool {
        self.flanking.can_open
    }

    pub fn can_close(&self) -> bool {
        self.flanking.can_close
    }

    /// Consume `n` characters on the closing side (the front of the run).
    pub fn take_front(&mut self, n: usize) -> Range<usize> {
        debug_assert!(n <= self.remaining());
        let taken = self.live.start..self.live.start + n;
        self.live.start += n;
        self.active = self.remaining() > 0;
        taken
    }

    /// Consume `n` characters on the opening side (the back of the run).
    pub fn take_back(&mut self, n: usize) -> Range<usize> {
        debug_assert!(n <= self.remaining());
        let taken = self.live.end - n..self.live.end;
        self.live.end -= n;
        self.active = self.remaining() > 0;
        taken
    }
}

/// One step of the scan: either literal content or a run worth matching.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Scanned {
    Text(Range<usize>),
    Run(DelimiterRun),
}

/// Single left-to-right pass turning tokens into literal text and delimiter runs.
pub struct Scanner<'a> {
    input: &'a str,
    tokens: &'a [Token],
    catalog: &'a Catalog,
    index: usize,
    offset: usize,
}

impl<'a> Scanner<'a> {
    pub fn new(input: &'a str, tokens: &'a [Token], catalog: &'a Catalog) -> Self {
        Self {
            input,
            tokens,
            catalog,
            index: 0,
            offset: 0,
        }
    }

    fn classify_run(&self, start: usize, end: usize) -> Scanned {
        let text = &self.input[start..end];
        let Some(ch) = text.chars().next() else {
            return Scanned::Text(start..end);
        };

        let Some(marker) = self.catalog.lookup(ch) else {
            log::trace!("Run {text:?} at {start}: marker disabled");
            return Scanned::Text(start..end);
        };

        if !marker.accepts_run(end - start) {
            log::trace!("Run {text:?} at {start}: length not accepted");
            return Scanned::Text(start..end);
        }

        let before = self.input[..start].chars().next_back();
        let after = self.input[end..].chars().next();
        let flanking = flanking::classify(before, after, marker.intraword);

        if flanking.is_inert() {
            log::trace!("Run {text:?} at {start}: neither opens nor closes");
            return Scanned::Text(start..end);
        }

        log::trace!(
            "Run {text:?} at {start}: open={} close={}",
            flanking.can_open,
            flanking.can_close
        );
        Scanned::Run(DelimiterRun::new(marker, start, end, flanking))
    }
}

impl Iterator for Scanner<'_> {
    type Item = Scanned;

    fn next(&mut self) -> Option<Scanned> {
        let token = self.tokens.get(self.index)?;
        let start = self.offset;
        let end = start + token.len;
        self.index += 1;
        self.offset = end;

        if token.kind == SyntaxKind::DelimiterRun {
            return Some(self.classify_run(start, end));
        }

        // Coalesce consecutive non-marker tokens into one literal piece
        let mut end = end;
        while let Some(next) = self.tokens.get(self.index)
            && next.kind != SyntaxKind::DelimiterRun
        {
            end += next.len;
            self.index += 1;
        }
        self.offset = end;
        Some(Scanned::Text(start..end))
    }
}

pub fn scan<'a>(input: &'a str, tokens: &'a [Token], catalog: &'a Catalog) -> Scanner<'a> {
    Scanner::new(input, tokens, catalog)
}
