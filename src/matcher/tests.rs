use std::ops::Range;

use crate::catalog::{Catalog, MarkerFamily, Strength};
use crate::extras::EmphasisExtras;
use crate::lexer::tokenize;
use crate::matcher::{MatchedSpan, Matcher, match_runs};
use crate::scanner::{Scanned, scan};

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn spans_with(input: &str, extras: EmphasisExtras) -> Vec<MatchedSpan> {
    init_logger();
    let tokens = tokenize(input);
    let catalog = Catalog::new(extras);
    let runs = scan(input, &tokens, &catalog).filter_map(|item| match item {
        Scanned::Run(run) => Some(run),
        Scanned::Text(_) => None,
    });
    match_runs(runs)
}

fn spans(input: &str) -> Vec<MatchedSpan> {
    spans_with(input, EmphasisExtras::DEFAULT)
}

fn span(
    family: MarkerFamily,
    strength: Strength,
    open: Range<usize>,
    close: Range<usize>,
) -> MatchedSpan {
    MatchedSpan {
        family,
        strength,
        open,
        close,
    }
}

#[test]
fn simple_emphasis_pair() {
    assert_eq!(
        spans("*a*"),
        vec![span(MarkerFamily::Emphasis, Strength::Weak, 0..1, 2..3)]
    );
}

#[test]
fn triple_run_matches_strong_first() {
    // Strong takes the inner two characters, emphasis the outer one
    assert_eq!(
        spans("***strong***"),
        vec![
            span(MarkerFamily::Emphasis, Strength::Strong, 1..3, 9..11),
            span(MarkerFamily::Emphasis, Strength::Weak, 0..1, 11..12),
        ]
    );
}

#[test]
fn rule_of_three_skips_both_flanking_opener() {
    // **a*b*** => strong(a em(b))
    assert_eq!(
        spans("**a*b***"),
        vec![
            span(MarkerFamily::Emphasis, Strength::Weak, 3..4, 5..6),
            span(MarkerFamily::Emphasis, Strength::Strong, 0..2, 6..8),
        ]
    );
}

#[test]
fn closer_remainder_stays_literal() {
    // *a** closes one star, the second star has nothing to close
    assert_eq!(
        spans("*a**"),
        vec![span(MarkerFamily::Emphasis, Strength::Weak, 0..1, 2..3)]
    );
}

#[test]
fn opener_remainder_can_match_later() {
    // **a* b* => em(em(a) b) with the outer star left on the first run
    assert_eq!(
        spans("**a* b*"),
        vec![
            span(MarkerFamily::Emphasis, Strength::Weak, 1..2, 3..4),
            span(MarkerFamily::Emphasis, Strength::Weak, 0..1, 6..7),
        ]
    );
}

#[test]
fn tilde_length_selects_family() {
    assert_eq!(
        spans("~~a~~ ~b~"),
        vec![
            span(MarkerFamily::Strikeout, Strength::Weak, 0..2, 3..5),
            span(MarkerFamily::Subscript, Strength::Weak, 6..7, 8..9),
        ]
    );
}

#[test]
fn mismatched_tilde_lengths_do_not_pair() {
    assert!(spans("~~a~").is_empty());
    assert!(spans("~a~~").is_empty());
}

#[test]
fn nearest_compatible_opener_wins() {
    // The inner ~ cannot pair with ~~, so it skips to the outer single ~
    assert_eq!(
        spans("~a ~~b~"),
        vec![span(MarkerFamily::Subscript, Strength::Weak, 0..1, 6..7)]
    );
}

#[test]
fn families_nest_without_crossing() {
    assert_eq!(
        spans("~~a^b^c~~"),
        vec![
            span(MarkerFamily::Superscript, Strength::Weak, 3..4, 5..6),
            span(MarkerFamily::Strikeout, Strength::Weak, 0..2, 7..9),
        ]
    );
}

#[test]
fn delimiters_between_a_pair_are_dropped() {
    // The ^ opener sits inside the strikeout, so the trailing ^ cannot reach it
    assert_eq!(
        spans("~~a^b~~c^"),
        vec![span(MarkerFamily::Strikeout, Strength::Weak, 0..2, 5..7)]
    );
}

#[test]
fn crossing_markers_resolve_first_closer() {
    // ==a ++b== c++: the marked span wins, the inserted opener is dropped
    assert_eq!(
        spans("==a ++b== c++"),
        vec![span(MarkerFamily::Marked, Strength::Weak, 0..2, 7..9)]
    );
}

#[test]
fn disabled_families_never_match() {
    assert!(spans_with("++a++ ==b==", EmphasisExtras::empty()).is_empty());
    assert_eq!(
        spans_with("++a++ ==b==", EmphasisExtras::MARKED),
        vec![span(MarkerFamily::Marked, Strength::Weak, 6..8, 9..11)]
    );
}

#[test]
fn stack_keeps_unmatched_openers() {
    init_logger();
    let input = "*a _b";
    let tokens = tokenize(input);
    let catalog = Catalog::default();
    let mut matcher = Matcher::new();
    for item in scan(input, &tokens, &catalog) {
        if let Scanned::Run(run) = item {
            matcher.feed(run);
        }
    }
    let pending: Vec<_> = matcher.stack().runs().iter().map(|r| r.start).collect();
    assert_eq!(pending, vec![0, 3]);
    assert!(matcher.spans().is_empty());
    assert!(matcher.finish().is_empty());
}

#[test]
fn pathological_closers_stay_linear() {
    // Thousands of openers followed by thousands of unmatched closers of a
    // different marker; each closer must stop at the remembered floor.
    let mut input = "*a ".repeat(5_000);
    input.push_str(&"b_ ".repeat(5_000));
    assert!(spans(&input).is_empty());

    let nested = format!("{}x{}", "*".repeat(10_000), "*".repeat(10_000));
    let found = spans(&nested);
    assert_eq!(found.len(), 5_000);
    assert!(found.iter().all(|s| s.strength == Strength::Strong));
}

#[test]
fn rule_of_three_rejections_stay_linear() {
    // Every odd `**` can also close but is barred from all the `*` openers
    // by the rule of three; the floor it leaves must stop the next search.
    let n = 20_000;
    let mut input = " *a".repeat(n);
    input.push_str(&" a**b".repeat(n));
    let found = spans(&input);
    assert_eq!(found.len(), n / 2);
    let base = 3 * n;
    for (j, pair) in found.iter().enumerate() {
        assert_eq!(pair.strength, Strength::Strong);
        assert_eq!(pair.open, base + 10 * j + 2..base + 10 * j + 4);
        assert_eq!(pair.close, base + 10 * j + 7..base + 10 * j + 9);
    }
}

#[test]
fn rule_of_three_floor_keeps_later_matches() {
    // A single-star closer after the rejected `**` uses another floor key and
    // still reaches the first opener.
    assert_eq!(
        spans("*a**b c*"),
        vec![span(MarkerFamily::Emphasis, Strength::Weak, 0..1, 7..8)]
    );
}

#[test]
fn alternating_openers_and_closers() {
    let input = "a*b".repeat(2_000);
    let found = spans(&input);
    // Every star is both-flanking; they pair up left to right
    assert_eq!(found.len(), 1_000);
    for pair in &found {
        assert_eq!(pair.close.start - pair.open.end, 2);
    }
}
