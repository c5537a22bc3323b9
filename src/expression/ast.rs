use crate::expression::errors::MalformedExpression;
use crate::expression::token::{Number, Operator, Token};

/// Tree form of a postfix expression, used for infix rendering
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expression {
    Number(Number),
    Add(Box<Expression>, Box<Expression>),
    Sub(Box<Expression>, Box<Expression>),
    Mul(Box<Expression>, Box<Expression>),
    Div(Box<Expression>, Box<Expression>),
}

impl Expression {
    fn combine(op: Operator, lhs: Expression, rhs: Expression) -> Self {
        let (l, r) = (Box::new(lhs), Box::new(rhs));
        match op {
            Operator::Add => Expression::Add(l, r),
            Operator::Sub => Expression::Sub(l, r),
            Operator::Mul => Expression::Mul(l, r),
            Operator::Div => Expression::Div(l, r),
        }
    }

    /// # Errors
    ///
    /// Fails on the same structural problems as [`crate::expression::evaluate`]:
    /// operator underflow or a final stack that does not hold exactly one tree.
    pub fn from_postfix(tokens: &[Token]) -> Result<Self, MalformedExpression> {
        let mut stack: Vec<Expression> = Vec::new();

        for (position, token) in tokens.iter().enumerate() {
            match *token {
                Token::Number(n) => stack.push(Expression::Number(n)),
                Token::Operator(op) => {
                    let underflow = MalformedExpression::StackUnderflow {
                        position,
                        operator: op,
                    };
                    let rhs = stack.pop().ok_or_else(|| underflow.clone())?;
                    let lhs = stack.pop().ok_or(underflow)?;
                    stack.push(Expression::combine(op, lhs, rhs));
                }
            }
        }

        let count = stack.len();
        match (stack.pop(), count) {
            (Some(expr), 1) => Ok(expr),
            _ => Err(MalformedExpression::WrongStackDepth { count }),
        }
    }
}
