use crate::catalog::is_marker_char;
use crate::syntax::SyntaxKind;


#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: SyntaxKind,
    pub len: usize,
}

pub struct Lexer<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    pub fn current_char(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    pub fn peek_char(&self, offset: usize) -> Option<char> {
        self.input[self.pos..].chars().nth(offset)
    }

    pub fn advance(&mut self) -> Option<char> {
        if let Some(ch) = self.current_char() {
            self.pos += ch.len_utf8();
            Some(ch)
        } else {
            None
        }
    }

    pub fn advance_while<F>(&mut self, mut predicate: F) -> usize
    where
        F: FnMut(char) -> bool,
    {
        let start = self.pos;
        while let Some(ch) = self.current_char() {
            if predicate(ch) {
                self.advance();
            } else {
                break;
            }
        }
        self.pos - start
    }

    pub fn next_token(&mut self) -> Option<Token> {
        let ch = self.current_char()?;

        match ch {
            '\n' => {
                self.advance();
                Some(Token {
                    kind: SyntaxKind::NEWLINE,
                    len: 1,
                })
            }

            ' ' | '\t' | '\r' => {
                let len = self.advance_while(|c| matches!(c, ' ' | '\t' | '\r'));
                Some(Token {
                    kind: SyntaxKind::WHITESPACE,
                    len,
                })
            }

            '\\' if self.peek_char(1).is_some_and(|c| c.is_ascii_punctuation()) => {
                self.advance(); // consume \
                self.advance(); // consume the escaped character
                Some(Token {
                    kind: SyntaxKind::Escape,
                    len: 2,
                })
            }

            c if is_marker_char(c) => {
                let len = self.advance_while(|next| next == c);
                Some(Token {
                    kind: SyntaxKind::DelimiterRun,
                    len,
                })
            }

            _ => {
                // Regular text - advance until we hit something special
                let len = self.advance_while(|c| {
                    !matches!(c, '\n' | ' ' | '\t' | '\r' | '\\') && !is_marker_char(c)
                });

                if len == 0 {
                    // A lone backslash that escapes nothing
                    self.advance();
                    Some(Token {
                        kind: SyntaxKind::TEXT,
                        len: ch.len_utf8(),
                    })
                } else {
                    Some(Token {
                        kind: SyntaxKind::TEXT,
                        len,
                    })
                }
            }
        }
    }
}

pub fn tokenize(input: &str) -> Vec<Token> {
    let mut lexer = Lexer::new(input);
    let mut tokens = Vec::new();

    while let Some(token) = lexer.next_token() {
        log::trace!("Token {}: {:?} (len: {})", tokens.len(), token.kind, token.len);
        tokens.push(token);
    }

    log::debug!("Tokenization complete. {} tokens generated.", tokens.len());
    tokens
}
