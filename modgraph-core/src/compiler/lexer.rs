use core::{
    fmt,
    ops::Range,
    str::CharIndices,
};

#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Hash)]
pub enum Token<'a> {
    /// A run of ASCII alphanumeric characters, e.g. "K01657"
    Identifier(&'a str),

    /// Group open token: "("
    GroupOpen,
    /// Group close token: ")"
    GroupClose,

    /// Conjunction token: "+"
    Conjunction,
    /// Alternation token: ","
    Alternation,
    /// Sequence token: " "
    Sequence,
}

impl Token<'_> {
    /// The character this token has been created from.
    /// Returns `None` for identifiers.
    pub fn symbol(&self) -> Option<char> {
        Some(match self {
            Token::Identifier(_) => return None,
            Token::GroupOpen => '(',
            Token::GroupClose => ')',
            Token::Conjunction => '+',
            Token::Alternation => ',',
            Token::Sequence => ' ',
        })
    }
}

impl fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Identifier(value) => f.write_str(value),
            symbol => write!(f, "{}", symbol.symbol().unwrap_or_default()),
        }
    }
}

pub struct Lexer<'a> {
    input: &'a str,
    iter: CharIndices<'a>,

    token_start: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            iter: input.char_indices(),

            token_start: 0,
        }
    }

    /// Byte range of the last returned token.
    pub fn token_range(&self) -> Range<usize> {
        self.token_start..self.iter.offset()
    }

    /// Get the token from a specific char if the character is a symbol
    fn char_to_token(&self, value: char) -> Option<Token<'a>> {
        Some(match value {
            '(' => Token::GroupOpen,
            ')' => Token::GroupClose,

            '+' => Token::Conjunction,
            ',' => Token::Alternation,
            ' ' => Token::Sequence,

            _ => return None,
        })
    }

    pub fn next_token(&mut self) -> Option<Token<'a>> {
        loop {
            let Some((token_pos, token)) = self.iter.next() else {
                /* end reached */
                return None;
            };

            self.token_start = token_pos;
            if let Some(token) = self.char_to_token(token) {
                return Some(token);
            }

            if !token.is_ascii_alphanumeric() {
                /* not part of the grammar, drop it */
                continue;
            }

            let mut iter_local = self.iter.clone();
            let token_end = loop {
                let Some((position, token)) = iter_local.next() else {
                    break iter_local.offset();
                };

                if !token.is_ascii_alphanumeric() {
                    /* anything else (symbol or dropped character) ends the identifier */
                    break position;
                }

                self.iter.next();
            };

            return Some(Token::Identifier(&self.input[token_pos..token_end]));
        }
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_token()
    }
}

/// Split a module expression into its tokens.
///
/// Tokenizing never fails. Characters which are neither alphanumeric
/// nor one of `( ) + ,` and space are silently dropped.
/// A dropped character still ends the identifier it interrupts,
/// `"K1\nK2"` yields the two identifiers `K1` and `K2`.
pub fn tokenize(input: &str) -> Vec<Token<'_>> {
    Lexer::new(input).collect()
}
