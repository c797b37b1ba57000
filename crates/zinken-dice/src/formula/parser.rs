//! Recursive-descent parser for formula text.
//!
//! All dice-group recognition happens here: the lexer hands over bare words,
//! and the parser decides whether `d20kh` names a dice group or a variable.

use super::lexer::{self, Token};
use super::{DiceTerm, Die, Formula, Keep, Sign, Term, TermKind};

/// Parse error with source span.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct ParseError {
    /// Byte range of the offending input in the source text.
    pub span: std::ops::Range<usize>,
    /// Human-readable description of the parse error.
    pub message: String,
}

impl ParseError {
    fn new(span: std::ops::Range<usize>, message: impl Into<String>) -> Self {
        Self {
            span,
            message: message.into(),
        }
    }
}

/// The largest dice group a single term may roll.
pub const MAX_DICE_PER_GROUP: u32 = 1000;

/// Parse formula text into a [`Formula`].
pub fn parse(text: &str) -> Result<Formula, ParseError> {
    let (tokens, lex_errors) = lexer::lex(text);
    if let Some(err) = lex_errors.into_iter().next() {
        return Err(ParseError::new(err.span, err.message));
    }

    let mut parser = Parser {
        tokens: &tokens,
        pos: 0,
        end: text.len(),
    };
    parser.formula()
}

struct Parser<'a> {
    tokens: &'a [(Token, std::ops::Range<usize>)],
    pos: usize,
    end: usize,
}

impl Parser<'_> {
    fn formula(&mut self) -> Result<Formula, ParseError> {
        if self.tokens.is_empty() {
            return Err(ParseError::new(0..0, "empty formula"));
        }

        let mut terms = Vec::new();
        // A leading sign is allowed on the first term
        let mut sign = match self.peek() {
            Some(Token::Plus) => {
                self.pos += 1;
                Sign::Plus
            }
            Some(Token::Minus) => {
                self.pos += 1;
                Sign::Minus
            }
            _ => Sign::Plus,
        };

        loop {
            terms.push(self.term(sign)?);

            match self.peek() {
                None => break,
                Some(Token::Plus) => {
                    self.pos += 1;
                    sign = Sign::Plus;
                }
                Some(Token::Minus) => {
                    self.pos += 1;
                    sign = Sign::Minus;
                }
                Some(other) => {
                    return Err(ParseError::new(
                        self.span(),
                        format!("expected '+' or '-', found `{other}`"),
                    ));
                }
            }
        }

        Formula::from_terms(terms).ok_or_else(|| ParseError::new(0..self.end, "empty formula"))
    }

    fn term(&mut self, sign: Sign) -> Result<Term, ParseError> {
        let start = self.span().start;
        match self.take() {
            Some(Token::Integer(n)) => {
                // `2d20kh`: a count followed by a dice word
                if let Some(Token::Word(word)) = self.peek() {
                    if let Some(shape) = dice_shape(word) {
                        let (die, keep) = shape.map_err(|msg| ParseError::new(self.span(), msg))?;
                        let span = start..self.span().end;
                        self.pos += 1;
                        let count = dice_count(n).map_err(|msg| ParseError::new(span, msg))?;
                        return Ok(Term {
                            sign,
                            kind: TermKind::Dice(DiceTerm { count, die, keep }),
                        });
                    }
                }
                Ok(Term {
                    sign,
                    kind: TermKind::Constant(n),
                })
            }
            Some(Token::Word(word)) => {
                if let Some(shape) = dice_shape(&word) {
                    let (die, keep) =
                        shape.map_err(|msg| ParseError::new(start..self.prev_end(), msg))?;
                    return Ok(Term {
                        sign,
                        kind: TermKind::Dice(DiceTerm {
                            count: 1,
                            die,
                            keep,
                        }),
                    });
                }
                Ok(Term {
                    sign,
                    kind: TermKind::Variable(word),
                })
            }
            Some(Token::At) => match self.take() {
                Some(Token::Word(word)) => Ok(Term {
                    sign,
                    kind: TermKind::Variable(word),
                }),
                _ => Err(ParseError::new(
                    start..self.prev_end(),
                    "expected a variable name after '@'",
                )),
            },
            Some(other) => Err(ParseError::new(
                start..self.prev_end(),
                format!("expected a dice group, number, or variable, found `{other}`"),
            )),
            None => Err(ParseError::new(
                self.end..self.end,
                "unexpected end of formula",
            )),
        }
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos).map(|(t, _)| t)
    }

    fn take(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).map(|(t, _)| t.clone());
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    /// Span of the current (not yet consumed) token, or the end of input.
    fn span(&self) -> std::ops::Range<usize> {
        self.tokens
            .get(self.pos)
            .map_or(self.end..self.end, |(_, s)| s.clone())
    }

    /// End of the most recently consumed token's span.
    fn prev_end(&self) -> usize {
        self.tokens
            .get(self.pos.saturating_sub(1))
            .map_or(self.end, |(_, s)| s.end)
    }
}

/// Decide whether a word names a dice group (`d20`, `d20kh`, `d6kl`).
///
/// Returns `None` for words that are plain variable names, and
/// `Some(Err(..))` for words that are dice-shaped but invalid, so typos like
/// `d20kx` or `d1` surface as parse errors rather than unbound variables.
fn dice_shape(word: &str) -> Option<Result<(Die, Keep), String>> {
    let lower = word.to_lowercase();
    let rest = lower.strip_prefix('d')?;

    let (digits, suffix) = match rest.find(|c: char| !c.is_ascii_digit()) {
        Some(idx) => rest.split_at(idx),
        None => (rest, ""),
    };
    if digits.is_empty() {
        // "dex", "dark": a variable, not a die
        return None;
    }

    let keep = match suffix {
        "" => Keep::All,
        "kh" => Keep::Highest,
        "kl" => Keep::Lowest,
        other => return Some(Err(format!("unknown keep suffix `{other}` (use kh or kl)"))),
    };

    let sides = match digits.parse::<u32>() {
        Ok(n) => n,
        Err(_) => return Some(Err(format!("die size out of range: d{digits}"))),
    };
    match Die::from_sides(sides) {
        Some(die) => Some(Ok((die, keep))),
        None => Some(Err(format!("a die needs at least 2 sides, got d{sides}"))),
    }
}

/// Validate a dice-group count parsed from the leading integer.
fn dice_count(n: i64) -> Result<u32, String> {
    if n < 1 {
        Err("dice count must be at least 1".to_string())
    } else if n > i64::from(MAX_DICE_PER_GROUP) {
        Err(format!(
            "too many dice in one group (max {MAX_DICE_PER_GROUP})"
        ))
    } else {
        Ok(n as u32)
    }
}
