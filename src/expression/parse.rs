use std::str::FromStr;

use log::debug;

use crate::expression::errors::{ExpressionError, MalformedExpression};
use crate::expression::token::{Number, Operator, Token};

impl FromStr for Token {
    type Err = MalformedExpression;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        if let Some(op) = Operator::from_symbol(text) {
            return Ok(Token::Operator(op));
        }

        if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
            return Err(MalformedExpression::InvalidToken(text.to_string()));
        }

        text.parse::<Number>()
            .map(Token::Number)
            .map_err(|_| MalformedExpression::InvalidToken(text.to_string()))
    }
}

impl TryFrom<String> for Token {
    type Error = MalformedExpression;

    fn try_from(text: String) -> Result<Self, Self::Error> {
        text.parse()
    }
}

/// Split a line of solver output into postfix tokens.
///
/// Tokens are separated by arbitrary whitespace; a blank line yields an
/// empty sequence.
///
/// # Errors
///
/// Returns `InvalidToken` for the first word that is neither an operator
/// symbol nor an unsigned decimal literal that fits the number domain.
pub fn parse_line(line: &str) -> Result<Vec<Token>, ExpressionError> {
    let tokens = line
        .split_whitespace()
        .map(str::parse::<Token>)
        .collect::<Result<Vec<_>, _>>()?;
    debug!("Parsed {} tokens from '{}'", tokens.len(), line.trim());
    Ok(tokens)
}
