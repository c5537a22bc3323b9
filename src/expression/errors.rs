use thiserror::Error;

use crate::expression::token::Operator;

/// Ways a postfix token sequence can fail to describe a single value
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MalformedExpression {
    #[error("invalid token '{0}'")]
    InvalidToken(String),
    #[error("stack underflow at token {position} ('{operator}')")]
    StackUnderflow { position: usize, operator: Operator },
    #[error("expected exactly one value on the stack, found {count}")]
    WrongStackDepth { count: usize },
}

/// Errors that can occur while parsing or evaluating an expression
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExpressionError {
    #[error("Malformed expression: {0}")]
    Malformed(#[from] MalformedExpression),
    #[error("Division by zero at token {position}")]
    DivisionByZero { position: usize },
    #[error("Arithmetic overflow at token {position}")]
    Overflow { position: usize },
}

impl ExpressionError {
    pub fn is_malformed(&self) -> bool {
        matches!(self, ExpressionError::Malformed(_))
    }
}
