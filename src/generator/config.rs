use std::fmt;
use std::time::Duration;

use crate::expression::Number;
use crate::generator::constants::{
    DEFAULT_ATTEMPT_TIMEOUT_MS, DEFAULT_ATTEMPTS, MAX_PUZZLE_SIZE,
};
use crate::generator::errors::ParameterError;

/// The size and value envelope a generated puzzle must fit in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerationParams {
    pub min_size: usize,
    pub max_size: usize,
    pub max_number: Number,
    pub max_target: Number,
}

impl GenerationParams {
    pub fn new(min_size: usize, max_size: usize, max_number: Number, max_target: Number) -> Self {
        Self {
            min_size,
            max_size,
            max_number,
            max_target,
        }
    }

    /// # Errors
    ///
    /// Returns the first violated bound.
    pub fn validate(&self) -> Result<(), ParameterError> {
        if self.min_size < 1 {
            return Err(ParameterError::MinSizeZero);
        }
        if self.max_size < self.min_size {
            return Err(ParameterError::MaxSizeBelowMinSize {
                min_size: self.min_size,
                max_size: self.max_size,
            });
        }
        if self.max_size > MAX_PUZZLE_SIZE {
            return Err(ParameterError::MaxSizeTooLarge(self.max_size));
        }
        if self.max_number < 1 {
            return Err(ParameterError::MaxNumberZero);
        }
        if self.max_target < 1 {
            return Err(ParameterError::MaxTargetZero);
        }
        Ok(())
    }
}

impl fmt::Display for GenerationParams {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "min_size={}, max_size={}, max_number={}, max_target={}",
            self.min_size, self.max_size, self.max_number, self.max_target
        )
    }
}

/// Retry and randomness settings for the generator
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// Attempts before giving up
    pub attempts: usize,
    /// Wall-clock budget of a single attempt
    pub attempt_timeout: Duration,
    /// Seed for reproducible output; entropy when absent
    pub seed: Option<u64>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            attempts: DEFAULT_ATTEMPTS,
            attempt_timeout: Duration::from_millis(DEFAULT_ATTEMPT_TIMEOUT_MS),
            seed: None,
        }
    }
}
