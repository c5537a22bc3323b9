use std::time::Instant;

use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;

use crate::generator::config::{GenerationParams, GeneratorConfig};
use crate::generator::errors::GeneratorError;
use crate::generator::search::{AttemptTimeout, SearchState};
use crate::puzzle::Puzzle;

/// Builds puzzles that are solvable by construction
pub struct PuzzleGenerator {
    config: GeneratorConfig,
    rng: StdRng,
}

impl PuzzleGenerator {
    pub fn new(config: GeneratorConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { config, rng }
    }

    /// Generate one puzzle within `params`.
    ///
    /// Each attempt picks a fresh size and searches from an empty state
    /// until it finishes or its deadline passes.
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameters` before any search if the bounds are
    /// inconsistent, and `GenerationExhausted` once every attempt has
    /// timed out or run dry.
    pub fn generate(&mut self, params: &GenerationParams) -> Result<Puzzle, GeneratorError> {
        params.validate()?;
        info!("Generating puzzle with {}", params);

        for attempt in 1..=self.config.attempts {
            let size = self.rng.gen_range(params.min_size..=params.max_size);
            let started = Instant::now();
            let deadline = started + self.config.attempt_timeout;
            debug!("Attempt {} with {} numbers", attempt, size);

            let outcome = SearchState::new(&mut self.rng, *params, size, deadline).run();
            match outcome {
                Ok(Some(puzzle)) => {
                    info!(
                        "Found puzzle on attempt {} in {:?}: {}",
                        attempt,
                        started.elapsed(),
                        puzzle
                    );
                    return Ok(puzzle);
                }
                Ok(None) => debug!("Attempt {} exhausted its search space", attempt),
                Err(AttemptTimeout) => warn!(
                    "Attempt {} timed out after {:?}",
                    attempt, self.config.attempt_timeout
                ),
            }
        }

        warn!(
            "Giving up after {} attempts with {}",
            self.config.attempts, params
        );
        Err(GeneratorError::GenerationExhausted {
            attempts: self.config.attempts,
            params: *params,
        })
    }
}

impl Default for PuzzleGenerator {
    fn default() -> Self {
        Self::new(GeneratorConfig::default())
    }
}

/// Generate `count` independent puzzles in parallel.
///
/// Every request owns its generator; with a seed, request `i` uses
/// `seed + i`, so the batch is reproducible regardless of scheduling.
/// Results are in request order.
pub fn generate_batch(
    config: &GeneratorConfig,
    params: &GenerationParams,
    count: usize,
) -> Vec<Result<Puzzle, GeneratorError>> {
    info!("Generating batch of {} puzzles", count);

    (0..count)
        .into_par_iter()
        .map(|index| {
            let request = GeneratorConfig {
                seed: config.seed.map(|seed| seed.wrapping_add(index as u64)),
                ..config.clone()
            };
            PuzzleGenerator::new(request).generate(params)
        })
        .collect()
}
