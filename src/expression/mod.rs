//! Postfix expressions: tokens, parsing, evaluation and rendering

mod ast;
mod display;
mod errors;
mod eval;
mod parse;
mod token;

pub use ast::Expression;
pub use display::to_rpn;
pub use errors::{ExpressionError, MalformedExpression};
pub use eval::{evaluate, evaluate_line};
pub use parse::parse_line;
pub use token::{Number, Operator, Token, Value};
