//! The target-seeking roller.
//!
//! Given a formula, bindings, and a desired total, a [`Seeker`] re-rolls
//! until the evaluated total equals the target. Targets outside the
//! formula's achievable range get a single honest evaluation instead, and an
//! absent target returns the maximizing evaluation. The retry loop is
//! bounded: after the attempt cap the last honest roll is returned as a
//! best-effort outcome.

use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use crate::eval::{EvalError, RollOutcome};
use crate::formula::{Bindings, Formula};

/// Default retry cap before a seek gives up.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 10_000;

/// How a seek arrived at its outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SeekResolution {
    /// The outcome's total equals the requested target.
    Matched,
    /// No target was requested; the outcome is the maximizing evaluation.
    Maximized,
    /// The target lies outside `[minimum, maximum]`; the outcome is a single
    /// honest evaluation.
    TargetUnreachable,
    /// The attempt cap was reached; the outcome is the last honest
    /// evaluation. Callers should surface this as a warning.
    AttemptsExhausted,
}

/// The result of a seek: the final outcome plus how it was reached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeekReport {
    /// The outcome handed to the caller.
    pub outcome: RollOutcome,
    /// How many random evaluations were consumed. Zero for [`SeekResolution::Maximized`].
    pub attempts: u32,
    /// How the seek resolved.
    pub resolution: SeekResolution,
}

impl SeekReport {
    /// True if the outcome's total equals the requested target.
    pub fn matched(&self) -> bool {
        self.resolution == SeekResolution::Matched
    }
}

/// Re-rolls a formula until it lands on a requested total.
///
/// Stateless across invocations; each call is independent and reentrant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Seeker {
    max_attempts: u32,
}

impl Seeker {
    /// A seeker with the default attempt cap.
    pub fn new() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }

    /// Override the attempt cap. A cap of 0 is treated as 1.
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts.max(1);
        self
    }

    /// The configured attempt cap.
    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Roll `formula` until its total equals `target`.
    ///
    /// - `target == None`: returns the maximizing evaluation, consuming no
    ///   randomness ([`SeekResolution::Maximized`]).
    /// - target outside the achievable range: exactly one honest evaluation,
    ///   returned unconditionally ([`SeekResolution::TargetUnreachable`]).
    /// - otherwise: fresh evaluations until one matches
    ///   ([`SeekResolution::Matched`]) or the cap is hit
    ///   ([`SeekResolution::AttemptsExhausted`]).
    ///
    /// An unbound variable surfaces as an error before any rolling happens.
    pub fn seek(
        &self,
        formula: &Formula,
        bindings: &Bindings,
        target: Option<i64>,
        rng: &mut StdRng,
    ) -> Result<SeekReport, EvalError> {
        // Bounds are pure functions of formula and bindings; this also
        // surfaces unbound variables before any entropy is spent.
        let min = formula.minimum(bindings)?;
        let max = formula.maximum(bindings)?;

        let Some(target) = target else {
            return Ok(SeekReport {
                outcome: formula.maximized(bindings)?,
                attempts: 0,
                resolution: SeekResolution::Maximized,
            });
        };

        if target < min || target > max {
            return Ok(SeekReport {
                outcome: formula.evaluate(bindings, rng)?,
                attempts: 1,
                resolution: SeekResolution::TargetUnreachable,
            });
        }

        let mut attempts = 1;
        let mut outcome = formula.evaluate(bindings, rng)?;
        while outcome.total != target && attempts < self.max_attempts {
            outcome = formula.evaluate(bindings, rng)?;
            attempts += 1;
        }

        let resolution = if outcome.total == target {
            SeekResolution::Matched
        } else {
            SeekResolution::AttemptsExhausted
        };
        Ok(SeekReport {
            outcome,
            attempts,
            resolution,
        })
    }
}

impl Default for Seeker {
    fn default() -> Self {
        Self::new()
    }
}
