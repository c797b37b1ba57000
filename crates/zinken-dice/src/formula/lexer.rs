//! Lexer for formula text.
//!
//! The lexer is deliberately simple — it only knows operators, integers, and
//! words. Whether a word like `d20kh` is a dice group or a variable reference
//! is decided by the parser.

use std::fmt;

use logos::Logos;

/// Token type for formula text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// Addition operator `+`.
    Plus,
    /// Subtraction operator `-`.
    Minus,
    /// Variable sigil `@`.
    At,
    /// Unsigned integer literal.
    Integer(i64),
    /// Bare word (dice group or variable name, disambiguated by the parser).
    Word(String),
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Plus => write!(f, "+"),
            Token::Minus => write!(f, "-"),
            Token::At => write!(f, "@"),
            Token::Integer(n) => write!(f, "{n}"),
            Token::Word(w) => write!(f, "{w}"),
        }
    }
}

/// Internal logos token, converted to owned `Token` after lexing.
#[derive(Logos, Debug)]
#[logos(skip r"[ \t\r\n]+")]
enum RawToken {
    #[token("+")]
    Plus,

    #[token("-")]
    Minus,

    #[token("@")]
    At,

    #[regex(r"[0-9][0-9_]*")]
    Integer,

    #[regex(r"[a-zA-Z_][a-zA-Z0-9_.]*")]
    Word,
}

/// A lexer error with source location.
#[derive(Debug, Clone)]
pub struct LexError {
    /// Byte range of the erroneous input in the source.
    pub span: std::ops::Range<usize>,
    /// Human-readable description of the lexer error.
    pub message: String,
}

/// Lex formula text into a sequence of `(Token, Span)` pairs.
///
/// Returns the token stream and any lexer errors. Lexing continues past
/// errors to collect as many tokens as possible.
pub fn lex(source: &str) -> (Vec<(Token, std::ops::Range<usize>)>, Vec<LexError>) {
    let mut tokens = Vec::new();
    let mut errors = Vec::new();
    let mut lexer = RawToken::lexer(source);

    while let Some(result) = lexer.next() {
        let span = lexer.span();
        match result {
            Ok(raw) => {
                let token = match raw {
                    RawToken::Plus => Token::Plus,
                    RawToken::Minus => Token::Minus,
                    RawToken::At => Token::At,
                    RawToken::Integer => {
                        let raw_text = lexer.slice();
                        match raw_text.replace('_', "").parse::<i64>() {
                            Ok(n) => Token::Integer(n),
                            Err(_) => {
                                errors.push(LexError {
                                    span: span.clone(),
                                    message: format!("integer literal out of range: {raw_text}"),
                                });
                                continue;
                            }
                        }
                    }
                    RawToken::Word => Token::Word(lexer.slice().to_string()),
                };
                tokens.push((token, span));
            }
            Err(()) => {
                errors.push(LexError {
                    span: span.clone(),
                    message: format!("unexpected character: {:?}", &source[span.clone()]),
                });
            }
        }
    }

    (tokens, errors)
}
