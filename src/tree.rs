use std::fmt::Write as _;
use std::ops::Range;

use crate::catalog::{MarkerFamily, Strength};
use crate::matcher::MatchedSpan;

/// Result of inline parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InlineNode {
    Text(String),
    Span {
        family: MarkerFamily,
        strength: Strength,
        children: Vec<InlineNode>,
    },
}

impl InlineNode {
    pub fn text(s: impl Into<String>) -> Self {
        InlineNode::Text(s.into())
    }

    pub fn span(family: MarkerFamily, children: Vec<InlineNode>) -> Self {
        InlineNode::Span {
            family,
            strength: Strength::Weak,
            children,
        }
    }

    pub fn strong(children: Vec<InlineNode>) -> Self {
        InlineNode::Span {
            family: MarkerFamily::Emphasis,
            strength: Strength::Strong,
            children,
        }
    }

    /// All literal text below this node, markup stripped.
    pub fn plain_text(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        match self {
            InlineNode::Text(s) => out.push_str(s),
            InlineNode::Span { children, .. } => {
                children.iter().for_each(|child| child.collect_text(out));
            }
        }
    }
}

/// Literal text of a whole forest.
pub fn plain_text(nodes: &[InlineNode]) -> String {
    nodes.iter().map(InlineNode::plain_text).collect()
}

/// One step of the ordered build stream. Span events carry an index into the
/// span slice they were derived from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Text(Range<usize>),
    Open(usize),
    Close(usize),
}

/// Order spans by offset and interleave them with the literal text around
/// them. `len` is the length of the source the spans point into.
pub fn events(len: usize, spans: &[MatchedSpan]) -> Vec<Event> {
    let mut order: Vec<usize> = (0..spans.len()).collect();
    order.sort_by_key(|&idx| spans[idx].open.start);

    let mut out = Vec::with_capacity(spans.len() * 4 + 1);
    let mut open: Vec<usize> = Vec::new();
    let mut cursor = 0;

    for idx in order {
        let span = &spans[idx];
        while let Some(&top) = open.last()
            && spans[top].close.start <= span.open.start
        {
            emit_text(&mut out, cursor, spans[top].close.start);
            out.push(Event::Close(top));
            cursor = spans[top].close.end;
            open.pop();
        }
        debug_assert!(
            open.last()
                .is_none_or(|&top| span.close.end <= spans[top].close.start),
            "span {span:?} crosses its parent"
        );
        emit_text(&mut out, cursor, span.open.start);
        out.push(Event::Open(idx));
        cursor = span.open.end;
        open.push(idx);
    }

    while let Some(top) = open.pop() {
        emit_text(&mut out, cursor, spans[top].close.start);
        out.push(Event::Close(top));
        cursor = spans[top].close.end;
    }
    emit_text(&mut out, cursor, len);

    out
}

fn emit_text(out: &mut Vec<Event>, start: usize, end: usize) {
    if start < end {
        out.push(Event::Text(start..end));
    }
}

fn push_text(children: &mut Vec<InlineNode>, s: &str) {
    if let Some(InlineNode::Text(last)) = children.last_mut() {
        last.push_str(s);
    } else {
        children.push(InlineNode::Text(s.to_string()));
    }
}

/// Assemble the forest for `input` from its matched spans.
///
/// Spans arrive in closing order, which is not nesting order once several
/// families are involved, so the forest is built from the recorded offsets
/// via [`events`] and an explicit stack of open spans.
pub fn build(input: &str, spans: &[MatchedSpan]) -> Vec<InlineNode> {
    let mut root: Vec<InlineNode> = Vec::new();
    let mut open: Vec<(usize, Vec<InlineNode>)> = Vec::new();

    for event in events(input.len(), spans) {
        match event {
            Event::Text(range) => {
                let children = match open.last_mut() {
                    Some((_, children)) => children,
                    None => &mut root,
                };
                push_text(children, &input[range]);
            }
            Event::Open(idx) => open.push((idx, Vec::new())),
            Event::Close(_) => {
                let Some((idx, children)) = open.pop() else {
                    continue;
                };
                let span = &spans[idx];
                let node = InlineNode::Span {
                    family: span.family,
                    strength: span.strength,
                    children,
                };
                match open.last_mut() {
                    Some((_, parent)) => parent.push(node),
                    None => root.push(node),
                }
            }
        }
    }

    root
}

/// Compact s-expression form of a forest, e.g. `(strikeout "a" (superscript "b") "c")`.
pub fn outline(nodes: &[InlineNode]) -> String {
    let mut out = String::new();
    for (i, node) in nodes.iter().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        write_outline(node, &mut out);
    }
    out
}

fn write_outline(node: &InlineNode, out: &mut String) {
    match node {
        InlineNode::Text(s) => {
            let _ = write!(out, "{s:?}");
        }
        InlineNode::Span {
            family,
            strength,
            children,
        } => {
            out.push('(');
            out.push_str(family.name(*strength));
            for child in children {
                out.push(' ');
                write_outline(child, out);
            }
            out.push(')');
        }
    }
}
