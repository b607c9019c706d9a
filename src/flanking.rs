/// Classification of the character adjacent to a delimiter run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharClass {
    Whitespace,
    Punctuation,
    Other,
}

impl CharClass {
    /// Classify an optional neighbour; `None` is a stream boundary and
    /// counts as whitespace.
    pub fn of(c: Option<char>) -> Self {
        match c {
            None => CharClass::Whitespace,
            Some(c) if c.is_whitespace() => CharClass::Whitespace,
            Some(c) if is_punctuation(c) => CharClass::Punctuation,
            Some(_) => CharClass::Other,
        }
    }
}

pub fn is_punctuation(c: char) -> bool {
    c.is_ascii_punctuation()
        || matches!(
            c,
            '¡' | '§' | '«' | '¶' | '·' | '»' | '¿'
                | '\u{2010}'..='\u{2027}'
                | '\u{2030}'..='\u{205E}'
                | '\u{2E00}'..='\u{2E4F}'
                | '\u{3001}'..='\u{3003}'
                | '\u{3008}'..='\u{3011}'
                | '\u{3014}'..='\u{301F}'
                | '\u{FF01}'..='\u{FF0F}'
                | '\u{FF1A}'..='\u{FF20}'
                | '\u{FF3B}'..='\u{FF40}'
                | '\u{FF5B}'..='\u{FF65}'
        )
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Flanking {
    pub can_open: bool,
    pub can_close: bool,
}

impl Flanking {
    pub fn is_inert(&self) -> bool {
        !self.can_open && !self.can_close
    }
}

/// Compute whether a run bounded by `before` and `after` can open or close.
///
/// `intraword == false` adds the `_` restriction: such a run may not open or
/// close when it sits between two word characters.
pub fn classify(before: Option<char>, after: Option<char>, intraword: bool) -> Flanking {
    let left = CharClass::of(before);
    let right = CharClass::of(after);

    let left_flanking = match right {
        CharClass::Whitespace => false,
        CharClass::Other => true,
        CharClass::Punctuation => left != CharClass::Other,
    };
    let right_flanking = match left {
        CharClass::Whitespace => false,
        CharClass::Other => true,
        CharClass::Punctuation => right != CharClass::Other,
    };

    if intraword {
        Flanking {
            can_open: left_flanking,
            can_close: right_flanking,
        }
    } else {
        Flanking {
            can_open: left_flanking && (!right_flanking || left == CharClass::Punctuation),
            can_close: right_flanking && (!left_flanking || right == CharClass::Punctuation),
        }
    }
}
