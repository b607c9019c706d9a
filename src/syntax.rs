use rowan::Language;

use crate::catalog::{MarkerFamily, Strength};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u16)]
pub enum SyntaxKind {
    // Tokens
    WHITESPACE = 0,
    NEWLINE,
    TEXT,
    Escape,          // \* and friends
    DelimiterRun,    // * _ ~ ^ + = runs, before matching
    DelimiterMarker, // marker characters consumed by a span

    // Composite nodes
    ROOT,
    Emphasis,
    Strong,
    Strikeout,
    Subscript,
    Superscript,
    Inserted,
    Marked,
}

impl SyntaxKind {
    pub fn for_span(family: MarkerFamily, strength: Strength) -> Self {
        match (family, strength) {
            (MarkerFamily::Emphasis, Strength::Weak) => SyntaxKind::Emphasis,
            (MarkerFamily::Emphasis, Strength::Strong) => SyntaxKind::Strong,
            (MarkerFamily::Strikeout, _) => SyntaxKind::Strikeout,
            (MarkerFamily::Subscript, _) => SyntaxKind::Subscript,
            (MarkerFamily::Superscript, _) => SyntaxKind::Superscript,
            (MarkerFamily::Inserted, _) => SyntaxKind::Inserted,
            (MarkerFamily::Marked, _) => SyntaxKind::Marked,
        }
    }

    pub fn is_span(self) -> bool {
        matches!(
            self,
            SyntaxKind::Emphasis
                | SyntaxKind::Strong
                | SyntaxKind::Strikeout
                | SyntaxKind::Subscript
                | SyntaxKind::Superscript
                | SyntaxKind::Inserted
                | SyntaxKind::Marked
        )
    }
}

impl From<SyntaxKind> for rowan::SyntaxKind {
    fn from(kind: SyntaxKind) -> Self {
        Self(kind as u16)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum InlineLanguage {}

impl Language for InlineLanguage {
    type Kind = SyntaxKind;

    fn kind_from_raw(raw: rowan::SyntaxKind) -> Self::Kind {
        assert!(raw.0 <= SyntaxKind::Marked as u16);
        unsafe { std::mem::transmute::<u16, SyntaxKind>(raw.0) }
    }

    fn kind_to_raw(kind: Self::Kind) -> rowan::SyntaxKind {
        kind.into()
    }
}

pub type SyntaxNode = rowan::SyntaxNode<InlineLanguage>;
pub type SyntaxToken = rowan::SyntaxToken<InlineLanguage>;
pub type SyntaxElement = rowan::SyntaxElement<InlineLanguage>;
