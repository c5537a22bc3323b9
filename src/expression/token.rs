use serde::{Deserialize, Serialize};

/// A number in the puzzle domain
pub type Number = u64;

/// An intermediate or final value computed by the evaluator
pub type Value = i128;

/// The four binary operators of the numbers game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    Add,
    Sub,
    Mul,
    Div,
}

impl Operator {
    /// All operators, in the order the generator tries them
    pub const ALL: [Operator; 4] = [Operator::Add, Operator::Sub, Operator::Mul, Operator::Div];

    pub fn symbol(self) -> char {
        match self {
            Operator::Add => '+',
            Operator::Sub => '-',
            Operator::Mul => '*',
            Operator::Div => '/',
        }
    }

    pub fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol {
            "+" => Some(Operator::Add),
            "-" => Some(Operator::Sub),
            "*" => Some(Operator::Mul),
            "/" => Some(Operator::Div),
            _ => None,
        }
    }

    /// Apply the operator the way the generator is allowed to: results stay
    /// non-negative and exact, and never overflow the puzzle domain.
    ///
    /// Returns `None` when the combination is not a legal intermediate.
    pub fn apply_exact(self, lhs: Number, rhs: Number) -> Option<Number> {
        match self {
            Operator::Add => lhs.checked_add(rhs),
            Operator::Sub => (lhs >= rhs).then(|| lhs - rhs),
            Operator::Mul => lhs.checked_mul(rhs),
            Operator::Div => (lhs >= rhs && rhs != 0 && lhs % rhs == 0).then(|| lhs / rhs),
        }
    }
}

/// One element of a postfix expression
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum Token {
    Number(Number),
    Operator(Operator),
}

impl From<Number> for Token {
    fn from(value: Number) -> Self {
        Token::Number(value)
    }
}

impl From<Operator> for Token {
    fn from(op: Operator) -> Self {
        Token::Operator(op)
    }
}
