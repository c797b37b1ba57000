//! Error types for the dice crate.

use crate::eval::EvalError;
use crate::formula::ParseError;

/// Errors that can occur while parsing or evaluating a formula.
#[derive(Debug, Clone, thiserror::Error)]
pub enum DiceError {
    /// The formula text could not be parsed.
    #[error("{0}")]
    Parse(#[from] ParseError),

    /// The formula could not be evaluated against the supplied bindings.
    #[error("{0}")]
    Eval(#[from] EvalError),
}

/// Convenience result type for dice operations.
pub type DiceResult<T> = Result<T, DiceError>;
