pub mod constants;
mod config;
mod core;
mod errors;
mod search;

pub use config::{GenerationParams, GeneratorConfig};
pub use self::core::{PuzzleGenerator, generate_batch};
pub use errors::{GeneratorError, ParameterError};
