use thiserror::Error;

use crate::generator::config::GenerationParams;
use crate::generator::constants::MAX_PUZZLE_SIZE;

/// A generation bound that is out of range or contradicts another bound
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParameterError {
    #[error("min_size must be at least 1")]
    MinSizeZero,
    #[error("max_size ({max_size}) must not be below min_size ({min_size})")]
    MaxSizeBelowMinSize { min_size: usize, max_size: usize },
    #[error("max_size ({0}) exceeds the supported limit of {limit}", limit = MAX_PUZZLE_SIZE)]
    MaxSizeTooLarge(usize),
    #[error("max_number must be at least 1")]
    MaxNumberZero,
    #[error("max_target must be at least 1")]
    MaxTargetZero,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GeneratorError {
    #[error("Invalid parameters: {0}")]
    InvalidParameters(#[from] ParameterError),
    #[error("No solvable puzzle found after {attempts} attempts ({params})")]
    GenerationExhausted {
        attempts: usize,
        params: GenerationParams,
    },
}
