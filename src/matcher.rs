use std::collections::HashMap;
use std::ops::Range;

use crate::catalog::{MarkerFamily, MatchRule, Strength};
use crate::scanner::DelimiterRun;

#[cfg(test)]
mod tests;

/// A resolved opener/closer pair, by the byte ranges of the consumed markers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchedSpan {
    pub family: MarkerFamily,
    pub strength: Strength,
    pub open: Range<usize>,
    pub close: Range<usize>,
}

impl MatchedSpan {
    /// The full extent of the span, markers included.
    pub fn outer(&self) -> Range<usize> {
        self.open.start..self.close.end
    }

    /// The content between the markers.
    pub fn inner(&self) -> Range<usize> {
        self.open.end..self.close.start
    }
}

#[derive(Debug)]
struct Pending {
    run: DelimiterRun,
    prev: Option<usize>,
    next: Option<usize>,
}

/// Pending openers in insertion order, linked by index so interior entries
/// can be unlinked in O(1).
#[derive(Debug, Default)]
pub struct DelimiterStack {
    entries: Vec<Pending>,
    top: Option<usize>,
    live: usize,
}

impl DelimiterStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.live
    }

    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    pub fn push(&mut self, run: DelimiterRun) -> usize {
        let idx = self.entries.len();
        self.entries.push(Pending {
            run,
            prev: self.top,
            next: None,
        });
        if let Some(top) = self.top {
            self.entries[top].next = Some(idx);
        }
        self.top = Some(idx);
        self.live += 1;
        idx
    }

    pub fn remove(&mut self, idx: usize) {
        let (prev, next) = {
            let entry = &mut self.entries[idx];
            entry.run.active = false;
            (entry.prev.take(), entry.next.take())
        };
        match next {
            Some(next) => self.entries[next].prev = prev,
            None => self.top = prev,
        }
        if let Some(prev) = prev {
            self.entries[prev].next = next;
        }
        self.live -= 1;
    }

    /// Drop every entry pushed after `idx`; they can no longer be matched.
    pub fn truncate_above(&mut self, idx: usize) {
        while let Some(top) = self.top
            && top != idx
        {
            let run = &self.entries[top].run;
            log::trace!(
                "Dropping delimiter {:?} at {} between matched pair",
                run.marker.ch,
                run.start
            );
            self.remove(top);
        }
    }

    pub fn get(&self, idx: usize) -> &DelimiterRun {
        &self.entries[idx].run
    }

    fn get_mut(&mut self, idx: usize) -> &mut DelimiterRun {
        &mut self.entries[idx].run
    }

    /// Indices from the top of the stack down to the bottom.
    pub fn iter_down(&self) -> impl Iterator<Item = usize> + '_ {
        std::iter::successors(self.top, |&idx| self.entries[idx].prev)
    }

    /// Pending runs, bottom first.
    pub fn runs(&self) -> Vec<&DelimiterRun> {
        let mut runs: Vec<_> = self.iter_down().map(|idx| self.get(idx)).collect();
        runs.reverse();
        runs
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct BottomKey {
    ch: char,
    can_open: bool,
    class: usize,
}

impl BottomKey {
    fn for_closer(closer: &DelimiterRun) -> Self {
        match closer.marker.rule {
            MatchRule::Nested => Self {
                ch: closer.marker.ch,
                can_open: closer.can_open(),
                class: closer.len() % 3,
            },
            MatchRule::Exact { .. } => Self {
                ch: closer.marker.ch,
                can_open: false,
                class: closer.remaining(),
            },
        }
    }
}

/// CommonMark's rule of three: when either side could go both ways, a pair
/// whose combined length is a multiple of three is not allowed unless both
/// lengths are.
fn violates_rule_of_three(opener: &DelimiterRun, closer: &DelimiterRun) -> bool {
    (closer.can_open() || opener.can_close())
        && (opener.len() + closer.len()) % 3 == 0
        && !(opener.len() % 3 == 0 && closer.len() % 3 == 0)
}

/// Online matcher: feed runs in source order, then take the spans.
///
/// A run that can close searches the pending openers from the top down for
/// the nearest compatible one; a run that can open and still has characters
/// left is pushed. Pairing consumes characters from the inner ends of both
/// runs and drops every pending delimiter between them, so spans never cross.
/// Failed searches record an openers-bottom floor per closer key, so no part
/// of the stack is rescanned by a closer that is bound to fail there again.
#[derive(Debug, Default)]
pub struct Matcher {
    stack: DelimiterStack,
    bottoms: HashMap<BottomKey, usize>,
    spans: Vec<MatchedSpan>,
}

impl Matcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stack(&self) -> &DelimiterStack {
        &self.stack
    }

    pub fn spans(&self) -> &[MatchedSpan] {
        &self.spans
    }

    pub fn feed(&mut self, mut run: DelimiterRun) {
        if run.can_close() {
            while run.remaining() > 0 {
                let Some((opener, used)) = self.find_opener(&run) else {
                    break;
                };
                self.pair(opener, &mut run, used);
            }
        }

        if run.remaining() == 0 {
            return;
        }

        if run.can_open() {
            log::trace!(
                "Pushing opener {:?} at {} ({} left)",
                run.marker.ch,
                run.start,
                run.remaining()
            );
            self.stack.push(run);
        } else {
            log::trace!(
                "Unmatched closer {:?} at {} stays literal",
                run.marker.ch,
                run.start
            );
        }
    }

    fn find_opener(&mut self, closer: &DelimiterRun) -> Option<(usize, usize)> {
        let key = BottomKey::for_closer(closer);
        let floor = self.bottoms.get(&key).copied().unwrap_or(0);

        for idx in self.stack.iter_down() {
            let opener = self.stack.get(idx);
            if opener.start < floor {
                break;
            }
            if opener.marker.ch != closer.marker.ch || !opener.can_open() {
                continue;
            }
            if opener.marker.rule == MatchRule::Nested && violates_rule_of_three(opener, closer) {
                continue;
            }
            if let Some(used) = opener
                .marker
                .consume(opener.remaining(), closer.remaining())
            {
                return Some((idx, used));
            }
        }

        // The key fixes every closer-side input of the rule of three, so any
        // opener skipped here is skipped by all later closers with this key.
        self.bottoms.insert(key, closer.start);
        None
    }

    fn pair(&mut self, opener_idx: usize, closer: &mut DelimiterRun, used: usize) {
        let marker = closer.marker;
        let open = self.stack.get_mut(opener_idx).take_back(used);
        let close = closer.take_front(used);

        self.stack.truncate_above(opener_idx);
        if !self.stack.get(opener_idx).active {
            // take_back already marked it spent; unlink it
            self.stack.remove(opener_idx);
        }

        let Some((family, strength)) = marker.resolve(used) else {
            return;
        };
        log::debug!("Matched {family:?}/{strength:?}: open {open:?}, close {close:?}");
        self.spans.push(MatchedSpan {
            family,
            strength,
            open,
            close,
        });
    }

    /// Finish matching. Anything still pending is literal text.
    pub fn finish(self) -> Vec<MatchedSpan> {
        if !self.stack.is_empty() {
            log::debug!(
                "{} unmatched opener(s) left as literal text",
                self.stack.len()
            );
        }
        self.spans
    }
}

/// Match a whole sequence of runs at once.
pub fn match_runs(runs: impl IntoIterator<Item = DelimiterRun>) -> Vec<MatchedSpan> {
    let mut matcher = Matcher::new();
    for run in runs {
        matcher.feed(run);
    }
    matcher.finish()
}
