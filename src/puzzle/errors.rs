use thiserror::Error;

use crate::expression::{ExpressionError, Number, Value};

/// Ways a puzzle can fail its solvability invariant
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PuzzleError {
    #[error("Puzzle has no numbers")]
    NoNumbers,
    #[error("Expression has {actual} tokens, expected {expected}")]
    ExpressionLength { expected: usize, actual: usize },
    #[error("Expression uses {0} more often than the numbers allow")]
    UnexpectedLiteral(Number),
    #[error("Expression evaluates to {value}, not the target {target}")]
    WrongValue { target: Number, value: Value },
    #[error("Expression evaluation error: {0}")]
    ExpressionError(#[from] ExpressionError),
}
