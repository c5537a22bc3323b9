use std::fmt;

use crate::expression::{ExpressionError, Number, Value, evaluate_line};

/// Why a solver trial did not pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrialFailure {
    /// A candidate line evaluated, but not to the target
    WrongValue {
        line: String,
        value: Value,
        target: Number,
    },
    /// A candidate line could not be evaluated
    Malformed { line: String, error: ExpressionError },
    /// The solver exited unsuccessfully; `None` when killed by a signal
    ExitStatus(Option<i32>),
    /// The solver printed no candidate at all
    NoCandidates,
}

impl fmt::Display for TrialFailure {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            TrialFailure::WrongValue {
                line,
                value,
                target,
            } => write!(f, "{}: {} != {}", line, value, target),
            TrialFailure::Malformed { line, error } => {
                write!(f, "{}: error evaluating code ({})", line, error)
            }
            TrialFailure::ExitStatus(Some(code)) => write!(f, "exit code: {}", code),
            TrialFailure::ExitStatus(None) => write!(f, "terminated by signal"),
            TrialFailure::NoCandidates => write!(f, "no solutions printed"),
        }
    }
}

/// Grade one line of solver output against `target`.
///
/// Returns `None` for blank lines, `Some(Ok(()))` for a correct candidate.
pub fn grade_line(line: &str, target: Number) -> Option<Result<(), TrialFailure>> {
    let line = line.trim();
    match evaluate_line(line) {
        Ok(None) => None,
        Ok(Some(value)) if value == Value::from(target) => Some(Ok(())),
        Ok(Some(value)) => Some(Err(TrialFailure::WrongValue {
            line: line.to_string(),
            value,
            target,
        })),
        Err(error) => Some(Err(TrialFailure::Malformed {
            line: line.to_string(),
            error,
        })),
    }
}
