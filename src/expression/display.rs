use std::cmp::Ordering;
use std::fmt;

use crate::expression::ast::Expression;
use crate::expression::token::{Operator, Token};

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Token::Number(n) => write!(f, "{}", n),
            Token::Operator(op) => write!(f, "{}", op),
        }
    }
}

impl From<Token> for String {
    fn from(token: Token) -> Self {
        token.to_string()
    }
}

/// Render tokens as a single space-separated postfix line
pub fn to_rpn(tokens: &[Token]) -> String {
    tokens
        .iter()
        .map(Token::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fn precedence(expr: &Expression) -> u8 {
            match expr {
                Expression::Add(_, _) | Expression::Sub(_, _) => 1,
                Expression::Mul(_, _) | Expression::Div(_, _) => 2,
                Expression::Number(_) => 3,
            }
        }

        fn write_with_parens(
            f: &mut fmt::Formatter,
            expr: &Expression,
            need_parens: bool,
        ) -> fmt::Result {
            if need_parens {
                write!(f, "(")?;
                fmt_expression(f, expr)?;
                write!(f, ")")
            } else {
                fmt_expression(f, expr)
            }
        }

        fn operator_of(expr: &Expression) -> Option<Operator> {
            match expr {
                Expression::Number(_) => None,
                Expression::Add(_, _) => Some(Operator::Add),
                Expression::Sub(_, _) => Some(Operator::Sub),
                Expression::Mul(_, _) => Some(Operator::Mul),
                Expression::Div(_, _) => Some(Operator::Div),
            }
        }

        // At equal precedence the right operand keeps its parens unless it
        // repeats the same associative operator: a * (b / c) != a * b / c.
        fn fmt_binary(
            f: &mut fmt::Formatter,
            op: Operator,
            l: &Expression,
            r: &Expression,
        ) -> fmt::Result {
            let own = match op {
                Operator::Add | Operator::Sub => 1,
                Operator::Mul | Operator::Div => 2,
            };
            let associative = matches!(op, Operator::Add | Operator::Mul);
            let need_l = precedence(l) < own;
            let need_r = match precedence(r).cmp(&own) {
                Ordering::Less => true,
                Ordering::Greater => false,
                Ordering::Equal => !(associative && operator_of(r) == Some(op)),
            };
            write_with_parens(f, l, need_l)?;
            write!(f, " {} ", op)?;
            write_with_parens(f, r, need_r)
        }

        fn fmt_expression(f: &mut fmt::Formatter, expr: &Expression) -> fmt::Result {
            match expr {
                Expression::Number(n) => write!(f, "{}", n),
                Expression::Add(l, r) => fmt_binary(f, Operator::Add, l, r),
                Expression::Sub(l, r) => fmt_binary(f, Operator::Sub, l, r),
                Expression::Mul(l, r) => fmt_binary(f, Operator::Mul, l, r),
                Expression::Div(l, r) => fmt_binary(f, Operator::Div, l, r),
            }
        }

        fmt_expression(f, self)
    }
}
