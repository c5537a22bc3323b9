use log::debug;

use crate::expression::errors::{ExpressionError, MalformedExpression};
use crate::expression::parse::parse_line;
use crate::expression::token::{Operator, Token, Value};

/// Floor division, rounding toward negative infinity.
///
/// Identical to truncating division whenever both operands have the same sign.
#[inline]
fn floor_div(lhs: Value, rhs: Value) -> Option<Value> {
    let quotient = lhs.checked_div(rhs)?;
    if lhs % rhs != 0 && ((lhs < 0) != (rhs < 0)) {
        quotient.checked_sub(1)
    } else {
        Some(quotient)
    }
}

fn apply(op: Operator, lhs: Value, rhs: Value, position: usize) -> Result<Value, ExpressionError> {
    let result = match op {
        Operator::Add => lhs.checked_add(rhs),
        Operator::Sub => lhs.checked_sub(rhs),
        Operator::Mul => lhs.checked_mul(rhs),
        Operator::Div => {
            if rhs == 0 {
                debug!("Division by zero attempted at token {}", position);
                return Err(ExpressionError::DivisionByZero { position });
            }
            floor_div(lhs, rhs)
        }
    };
    result.ok_or(ExpressionError::Overflow { position })
}

/// Evaluate a postfix token sequence.
///
/// This is the one oracle for "does this expression equal this target":
/// generated puzzles and solver output are both checked with it.
///
/// # Errors
///
/// Returns an error when:
/// - an operator finds fewer than two values on the stack
/// - the stack does not hold exactly one value at the end (including an empty sequence)
/// - a division has a zero divisor
/// - an intermediate result leaves the `i128` range
pub fn evaluate(tokens: &[Token]) -> Result<Value, ExpressionError> {
    let mut stack: Vec<Value> = Vec::with_capacity(tokens.len().div_ceil(2));

    for (position, token) in tokens.iter().enumerate() {
        match *token {
            Token::Number(n) => stack.push(Value::from(n)),
            Token::Operator(op) => {
                let underflow = MalformedExpression::StackUnderflow {
                    position,
                    operator: op,
                };
                let rhs = stack.pop().ok_or_else(|| underflow.clone())?;
                let lhs = stack.last_mut().ok_or(underflow)?;
                *lhs = apply(op, *lhs, rhs, position)?;
            }
        }
    }

    match stack.as_slice() {
        [value] => {
            debug!("Expression evaluated to: {}", value);
            Ok(*value)
        }
        _ => Err(MalformedExpression::WrongStackDepth { count: stack.len() }.into()),
    }
}

/// Parse and evaluate one line of solver output.
///
/// Returns `Ok(None)` for a line without tokens.
///
/// # Errors
///
/// Propagates parse and evaluation errors from [`parse_line`] and [`evaluate`].
pub fn evaluate_line(line: &str) -> Result<Option<Value>, ExpressionError> {
    let tokens = parse_line(line)?;
    if tokens.is_empty() {
        return Ok(None);
    }
    evaluate(&tokens).map(Some)
}

#[cfg(test)]
mod tests_inner_helpers {
    use super::floor_div;

    #[test]
    fn test_floor_div_non_negative_truncates() {
        assert_eq!(floor_div(7, 2), Some(3));
        assert_eq!(floor_div(6, 3), Some(2));
        assert_eq!(floor_div(0, 5), Some(0));
    }

    #[test]
    fn test_floor_div_mixed_signs_rounds_down() {
        assert_eq!(floor_div(-7, 2), Some(-4));
        assert_eq!(floor_div(7, -2), Some(-4));
        assert_eq!(floor_div(-7, -2), Some(3));
        assert_eq!(floor_div(-6, 3), Some(-2));
    }

    #[test]
    fn test_floor_div_overflow() {
        assert_eq!(floor_div(i128::MIN, -1), None);
    }
}
