//! Honest evaluation and range analysis.
//!
//! Every evaluation produces a fresh [`RollOutcome`] with a per-die
//! breakdown; outcomes are never mutated afterwards. [`Formula::minimum`]
//! and [`Formula::maximum`] are deterministic and consume no randomness.

use rand::Rng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use crate::formula::{Bindings, Die, Formula, Keep, Sign, TermKind};

/// Critical/fumble marking on a kept d20.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DieMark {
    /// No special marking.
    #[default]
    None,
    /// A kept d20 showing its highest face.
    Crit,
    /// A kept d20 showing a 1.
    Fumble,
}

/// The result of rolling a single die within a formula.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DieRoll {
    /// The die that was rolled.
    pub die: Die,
    /// The face value rolled (1 to `die.sides()`).
    pub value: u32,
    /// Whether this die counts toward the total (false for dice dropped by
    /// a keep-highest/lowest rule).
    pub kept: bool,
    /// Critical/fumble marking, set only on kept d20s.
    pub mark: DieMark,
}

/// The result of one formula evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollOutcome {
    /// The evaluated total, bindings and sign included.
    pub total: i64,
    /// Individual die results, in formula order.
    pub dice: Vec<DieRoll>,
}

impl RollOutcome {
    /// True if any kept d20 rolled its highest face.
    pub fn is_critical(&self) -> bool {
        self.dice.iter().any(|d| d.mark == DieMark::Crit)
    }

    /// True if any kept d20 rolled a 1.
    pub fn is_fumble(&self) -> bool {
        self.dice.iter().any(|d| d.mark == DieMark::Fumble)
    }

    /// Face values of the kept dice, in formula order.
    pub fn kept_values(&self) -> Vec<u32> {
        self.dice
            .iter()
            .filter(|d| d.kept)
            .map(|d| d.value)
            .collect()
    }
}

impl std::fmt::Display for RollOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let values: Vec<String> = self
            .dice
            .iter()
            .map(|d| {
                if d.kept {
                    d.value.to_string()
                } else {
                    format!("({})", d.value)
                }
            })
            .collect();
        write!(f, "[{}] = {}", values.join(", "), self.total)
    }
}

/// Errors raised while evaluating a formula.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EvalError {
    /// The formula references a variable the bindings do not supply.
    #[error("unbound variable: @{0}")]
    UnboundVariable(String),
}

impl Formula {
    /// Perform one fresh random evaluation.
    pub fn evaluate(
        &self,
        bindings: &Bindings,
        rng: &mut StdRng,
    ) -> Result<RollOutcome, EvalError> {
        self.resolve(bindings, |die, _| rng.random_range(1..=die.sides()))
    }

    /// The outcome with every die resolved to its best face for the total.
    ///
    /// Deterministic; consumes no randomness. A subtracted dice group
    /// resolves to its lowest faces here, since that maximizes the total.
    pub fn maximized(&self, bindings: &Bindings) -> Result<RollOutcome, EvalError> {
        self.resolve(bindings, |die, sign| match sign {
            Sign::Plus => die.sides(),
            Sign::Minus => 1,
        })
    }

    /// The outcome with every die resolved to its worst face for the total.
    ///
    /// Deterministic; consumes no randomness.
    pub fn minimized(&self, bindings: &Bindings) -> Result<RollOutcome, EvalError> {
        self.resolve(bindings, |die, sign| match sign {
            Sign::Plus => 1,
            Sign::Minus => die.sides(),
        })
    }

    /// The largest total this formula can produce under the given bindings.
    pub fn maximum(&self, bindings: &Bindings) -> Result<i64, EvalError> {
        self.maximized(bindings).map(|o| o.total)
    }

    /// The smallest total this formula can produce under the given bindings.
    pub fn minimum(&self, bindings: &Bindings) -> Result<i64, EvalError> {
        self.minimized(bindings).map(|o| o.total)
    }

    /// Walk the terms, resolving each die's face with `face(die, sign)`.
    fn resolve(
        &self,
        bindings: &Bindings,
        mut face: impl FnMut(Die, Sign) -> u32,
    ) -> Result<RollOutcome, EvalError> {
        let mut total = 0i64;
        let mut dice = Vec::new();

        for term in self.terms() {
            let factor = term.sign.factor();
            match &term.kind {
                TermKind::Constant(n) => total += factor * n,
                TermKind::Variable(name) => {
                    let value = bindings
                        .get(name)
                        .ok_or_else(|| EvalError::UnboundVariable(name.clone()))?;
                    total += factor * value;
                }
                TermKind::Dice(group) => {
                    let start = dice.len();
                    for _ in 0..group.count {
                        let value = face(group.die, term.sign);
                        dice.push(DieRoll {
                            die: group.die,
                            value,
                            kept: true,
                            mark: DieMark::None,
                        });
                    }

                    apply_keep(&mut dice[start..], group.keep);

                    for roll in &mut dice[start..] {
                        if !roll.kept {
                            continue;
                        }
                        total += factor * i64::from(roll.value);
                        if roll.die.sides() == 20 {
                            roll.mark = match roll.value {
                                20 => DieMark::Crit,
                                1 => DieMark::Fumble,
                                _ => DieMark::None,
                            };
                        }
                    }
                }
            }
        }

        Ok(RollOutcome { total, dice })
    }
}

/// Drop all but the single highest (or lowest) die of a group.
///
/// Ties keep the first die rolled.
fn apply_keep(group: &mut [DieRoll], keep: Keep) {
    let pick = match keep {
        Keep::All => return,
        Keep::Highest => group
            .iter()
            .enumerate()
            .max_by_key(|(i, d)| (d.value, std::cmp::Reverse(*i)))
            .map(|(i, _)| i),
        Keep::Lowest => group
            .iter()
            .enumerate()
            .min_by_key(|(i, d)| (d.value, *i))
            .map(|(i, _)| i),
    };
    let Some(pick) = pick else { return };
    for (i, roll) in group.iter_mut().enumerate() {
        roll.kept = i == pick;
    }
}
