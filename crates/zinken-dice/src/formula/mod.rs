//! Formula model: dice groups, constants, and variables combined additively.
//!
//! A formula is an ordered, non-empty sequence of signed terms. Once built
//! (programmatically or via [`Formula::parse`]) it is immutable for the
//! lifetime of a roll. `Display` produces the canonical text form, which
//! parses back to the same formula.

pub mod lexer;
pub mod parser;

pub use parser::ParseError;

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A polyhedral die type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Die {
    /// Four-sided die.
    D4,
    /// Six-sided die.
    D6,
    /// Eight-sided die.
    D8,
    /// Ten-sided die.
    D10,
    /// Twelve-sided die.
    D12,
    /// Twenty-sided die.
    D20,
    /// Percentile die (1-100).
    D100,
    /// A die with a custom number of sides.
    Custom(u32),
}

impl Die {
    /// Returns the number of sides on this die.
    pub fn sides(self) -> u32 {
        match self {
            Self::D4 => 4,
            Self::D6 => 6,
            Self::D8 => 8,
            Self::D10 => 10,
            Self::D12 => 12,
            Self::D20 => 20,
            Self::D100 => 100,
            Self::Custom(n) => n,
        }
    }

    /// Build a die from a side count. Returns `None` for fewer than 2 sides.
    pub fn from_sides(sides: u32) -> Option<Self> {
        match sides {
            0 | 1 => None,
            4 => Some(Self::D4),
            6 => Some(Self::D6),
            8 => Some(Self::D8),
            10 => Some(Self::D10),
            12 => Some(Self::D12),
            20 => Some(Self::D20),
            100 => Some(Self::D100),
            n => Some(Self::Custom(n)),
        }
    }
}

impl fmt::Display for Die {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "d{}", self.sides())
    }
}

/// Which dice of a group count toward the total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Keep {
    /// Every die in the group counts.
    #[default]
    All,
    /// Only the single highest die counts (advantage).
    Highest,
    /// Only the single lowest die counts (disadvantage).
    Lowest,
}

/// A group of identical dice rolled together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DiceTerm {
    /// How many dice to roll. At least 1.
    pub count: u32,
    /// The die type.
    pub die: Die,
    /// Which of the rolled dice are kept.
    pub keep: Keep,
}

/// Whether a term is added to or subtracted from the total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Sign {
    /// Added.
    #[default]
    Plus,
    /// Subtracted.
    Minus,
}

impl Sign {
    /// Multiplier applied to the term's value: `1` or `-1`.
    pub fn factor(self) -> i64 {
        match self {
            Self::Plus => 1,
            Self::Minus => -1,
        }
    }
}

/// The payload of a formula term.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TermKind {
    /// A dice group.
    Dice(DiceTerm),
    /// An integer modifier.
    Constant(i64),
    /// A named value resolved from the bindings at evaluation time.
    Variable(String),
}

/// One signed element of a formula.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Term {
    /// Added or subtracted.
    pub sign: Sign,
    /// What the term is.
    pub kind: TermKind,
}

/// An ordered, non-empty additive combination of terms forming one roll.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Formula {
    terms: Vec<Term>,
}

impl Formula {
    /// Start a formula with a dice group.
    pub fn dice(count: u32, die: Die, keep: Keep) -> Self {
        Self {
            terms: vec![Term {
                sign: Sign::Plus,
                kind: TermKind::Dice(DiceTerm { count, die, keep }),
            }],
        }
    }

    /// Start a formula with an integer constant.
    pub fn constant(value: i64) -> Self {
        Self {
            terms: vec![Term {
                sign: Sign::Plus,
                kind: TermKind::Constant(value),
            }],
        }
    }

    /// Start a formula with a variable reference.
    pub fn variable(name: impl Into<String>) -> Self {
        Self {
            terms: vec![Term {
                sign: Sign::Plus,
                kind: TermKind::Variable(name.into()),
            }],
        }
    }

    /// Append an added dice group.
    pub fn plus_dice(self, count: u32, die: Die, keep: Keep) -> Self {
        self.push(Sign::Plus, TermKind::Dice(DiceTerm { count, die, keep }))
    }

    /// Append a subtracted dice group.
    pub fn minus_dice(self, count: u32, die: Die, keep: Keep) -> Self {
        self.push(Sign::Minus, TermKind::Dice(DiceTerm { count, die, keep }))
    }

    /// Append an added constant.
    pub fn plus_constant(self, value: i64) -> Self {
        self.push(Sign::Plus, TermKind::Constant(value))
    }

    /// Append a subtracted constant.
    pub fn minus_constant(self, value: i64) -> Self {
        self.push(Sign::Minus, TermKind::Constant(value))
    }

    /// Append an added variable reference.
    pub fn plus_variable(self, name: impl Into<String>) -> Self {
        self.push(Sign::Plus, TermKind::Variable(name.into()))
    }

    /// Append a subtracted variable reference.
    pub fn minus_variable(self, name: impl Into<String>) -> Self {
        self.push(Sign::Minus, TermKind::Variable(name.into()))
    }

    fn push(mut self, sign: Sign, kind: TermKind) -> Self {
        self.terms.push(Term { sign, kind });
        self
    }

    /// Build a formula directly from terms. Returns `None` if `terms` is empty.
    pub fn from_terms(terms: Vec<Term>) -> Option<Self> {
        if terms.is_empty() { None } else { Some(Self { terms }) }
    }

    /// The terms of this formula, in order.
    pub fn terms(&self) -> &[Term] {
        &self.terms
    }

    /// Parse a formula from its text form, e.g. `2d20kh + @prof - 1`.
    pub fn parse(text: &str) -> Result<Self, ParseError> {
        parser::parse(text)
    }
}

impl fmt::Display for Formula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, term) in self.terms.iter().enumerate() {
            if i == 0 {
                if term.sign == Sign::Minus {
                    write!(f, "-")?;
                }
            } else {
                match term.sign {
                    Sign::Plus => write!(f, " + ")?,
                    Sign::Minus => write!(f, " - ")?,
                }
            }
            match &term.kind {
                TermKind::Dice(group) => {
                    write!(f, "{}{}", group.count, group.die)?;
                    match group.keep {
                        Keep::All => {}
                        Keep::Highest => write!(f, "kh")?,
                        Keep::Lowest => write!(f, "kl")?,
                    }
                }
                TermKind::Constant(n) => write!(f, "{n}")?,
                TermKind::Variable(name) => write!(f, "@{name}")?,
            }
        }
        Ok(())
    }
}

impl std::str::FromStr for Formula {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Read-only variable values substituted into a formula at evaluation time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bindings(HashMap<String, i64>);

impl Bindings {
    /// Create an empty bindings table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a binding, replacing any previous value for the name.
    pub fn with(mut self, name: impl Into<String>, value: i64) -> Self {
        self.0.insert(name.into(), value);
        self
    }

    /// Insert a binding in place.
    pub fn insert(&mut self, name: impl Into<String>, value: i64) {
        self.0.insert(name.into(), value);
    }

    /// Look up a variable by name.
    pub fn get(&self, name: &str) -> Option<i64> {
        self.0.get(name).copied()
    }

    /// Returns true if no variables are bound.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<HashMap<String, i64>> for Bindings {
    fn from(map: HashMap<String, i64>) -> Self {
        Self(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn die_sides() {
        assert_eq!(Die::D4.sides(), 4);
        assert_eq!(Die::D20.sides(), 20);
        assert_eq!(Die::D100.sides(), 100);
        assert_eq!(Die::Custom(30).sides(), 30);
    }

    #[test]
    fn die_from_sides() {
        assert_eq!(Die::from_sides(20), Some(Die::D20));
        assert_eq!(Die::from_sides(30), Some(Die::Custom(30)));
        assert_eq!(Die::from_sides(1), None);
        assert_eq!(Die::from_sides(0), None);
    }

    #[test]
    fn display_canonical() {
        let formula = Formula::dice(2, Die::D20, Keep::Highest)
            .plus_variable("prof")
            .minus_constant(1);
        assert_eq!(formula.to_string(), "2d20kh + @prof - 1");
    }

    #[test]
    fn display_leading_minus() {
        let formula = Formula::from_terms(vec![
            Term {
                sign: Sign::Minus,
                kind: TermKind::Constant(2),
            },
            Term {
                sign: Sign::Plus,
                kind: TermKind::Dice(DiceTerm {
                    count: 1,
                    die: Die::D6,
                    keep: Keep::All,
                }),
            },
        ])
        .unwrap();
        assert_eq!(formula.to_string(), "-2 + 1d6");
    }

    #[test]
    fn display_round_trips_through_parse() {
        for text in ["1d20 + 5", "2d20kh + @prof - 1", "3d6kl", "-1 + 1d4"] {
            let formula = Formula::parse(text).unwrap();
            assert_eq!(Formula::parse(&formula.to_string()).unwrap(), formula);
        }
    }

    #[test]
    fn from_terms_rejects_empty() {
        assert!(Formula::from_terms(Vec::new()).is_none());
    }

    #[test]
    fn bindings_lookup() {
        let bindings = Bindings::new().with("prof", 3).with("mod", -1);
        assert_eq!(bindings.get("prof"), Some(3));
        assert_eq!(bindings.get("mod"), Some(-1));
        assert_eq!(bindings.get("missing"), None);
    }
}
