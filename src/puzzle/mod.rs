//! Generated puzzles and their solvability invariant

mod errors;

pub use errors::PuzzleError;

use std::collections::HashMap;
use std::fmt;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::expression::{Expression, Number, Token, Value, evaluate, to_rpn};

/// A target, the numbers available to reach it, and one postfix solution
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Puzzle {
    pub target: Number,
    pub numbers: Vec<Number>,
    pub expression: Vec<Token>,
}

impl Puzzle {
    /// Check that `expression` solves the puzzle.
    ///
    /// # Errors
    ///
    /// Returns an error if the expression has the wrong length, uses a
    /// literal that is not one of `numbers` (or uses one twice), cannot be
    /// evaluated, or evaluates to something other than `target`.
    pub fn verify(&self) -> Result<(), PuzzleError> {
        if self.numbers.is_empty() {
            return Err(PuzzleError::NoNumbers);
        }

        let expected = 2 * self.numbers.len() - 1;
        if self.expression.len() != expected {
            return Err(PuzzleError::ExpressionLength {
                expected,
                actual: self.expression.len(),
            });
        }

        let mut available: HashMap<Number, usize> = HashMap::new();
        for &n in &self.numbers {
            *available.entry(n).or_default() += 1;
        }
        for token in &self.expression {
            if let Token::Number(n) = *token {
                match available.get_mut(&n) {
                    Some(count) if *count > 0 => *count -= 1,
                    _ => return Err(PuzzleError::UnexpectedLiteral(n)),
                }
            }
        }

        let value = evaluate(&self.expression)?;
        if value != Value::from(self.target) {
            return Err(PuzzleError::WrongValue {
                target: self.target,
                value,
            });
        }

        debug!("Puzzle verified: {}", self);
        Ok(())
    }

    /// The solution as a postfix line
    pub fn rpn(&self) -> String {
        to_rpn(&self.expression)
    }

    /// The solution in conventional notation, if the expression is well formed
    pub fn infix(&self) -> Option<String> {
        Expression::from_postfix(&self.expression)
            .ok()
            .map(|expr| expr.to_string())
    }
}

impl fmt::Display for Puzzle {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "target={}, numbers={:?}", self.target, self.numbers)
    }
}
