//! Numbers Oracle - solvable puzzle generation and grading for the countdown numbers game
//!
//! This library builds puzzles together with a postfix solution, so every
//! puzzle is solvable by construction, and evaluates postfix expressions
//! under exact integer semantics to grade the output of external solvers.

pub mod expression;
pub mod generator;
pub mod harness;
pub mod puzzle;

// Re-export the main public API
pub use expression::{ExpressionError, MalformedExpression, Token, evaluate, evaluate_line};
pub use generator::{GenerationParams, GeneratorConfig, GeneratorError, PuzzleGenerator};
pub use puzzle::Puzzle;

/// Generate a solvable puzzle with the default retry and timeout settings
///
/// # Arguments
///
/// * `min_size` - Fewest numbers the puzzle may have (at least 1)
/// * `max_size` - Most numbers the puzzle may have (at most 64)
/// * `max_number` - Largest number that may appear
/// * `max_target` - Largest target that may be chosen
///
/// # Errors
///
/// This function will return an error if:
/// * The bounds are inconsistent or out of range
/// * No puzzle was found within the retry budget
///
/// # Examples
///
/// ```
/// use numbers_oracle::{evaluate, generate_puzzle};
///
/// let puzzle = generate_puzzle(6, 6, 200, 999).expect("countdown-sized puzzles are easy");
/// assert_eq!(evaluate(&puzzle.expression), Ok(i128::from(puzzle.target)));
/// ```
pub fn generate_puzzle(
    min_size: usize,
    max_size: usize,
    max_number: u64,
    max_target: u64,
) -> Result<Puzzle, GeneratorError> {
    let params = GenerationParams::new(min_size, max_size, max_number, max_target);
    PuzzleGenerator::default().generate(&params)
}
