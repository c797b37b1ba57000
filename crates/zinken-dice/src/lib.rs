//! Dice formulas, honest evaluation, and target-seeking rolls.
//!
//! A [`Formula`] is an additive combination of dice groups, constants, and
//! variables (`2d20kh + @prof - 1`). It can be evaluated honestly against an
//! RNG, analyzed for its achievable range, or handed to a [`Seeker`] that
//! re-rolls until the total lands on a requested target. The [`odds`] module
//! computes the exact distribution of a formula's totals.

pub mod error;
pub mod eval;
pub mod formula;
pub mod odds;
pub mod seek;

pub use error::{DiceError, DiceResult};
pub use eval::{DieMark, DieRoll, EvalError, RollOutcome};
pub use formula::{Bindings, DiceTerm, Die, Formula, Keep, ParseError, Sign, Term, TermKind};
pub use seek::{DEFAULT_MAX_ATTEMPTS, SeekReport, SeekResolution, Seeker};

use rand::rngs::StdRng;

/// Parse formula text and evaluate it honestly, in one step.
pub fn roll_text(text: &str, bindings: &Bindings, rng: &mut StdRng) -> DiceResult<RollOutcome> {
    let formula = Formula::parse(text)?;
    Ok(formula.evaluate(bindings, rng)?)
}

/// Parse formula text and seek a target total, in one step.
///
/// Uses the default attempt cap; build a [`Seeker`] directly to change it.
pub fn seek_text(
    text: &str,
    bindings: &Bindings,
    target: Option<i64>,
    rng: &mut StdRng,
) -> DiceResult<SeekReport> {
    let formula = Formula::parse(text)?;
    Ok(Seeker::new().seek(&formula, bindings, target, rng)?)
}
