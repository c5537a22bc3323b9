// Configuration constants for the generator module
pub const MAX_PUZZLE_SIZE: usize = 64;
pub const DEFAULT_ATTEMPTS: usize = 64;
pub const DEFAULT_ATTEMPT_TIMEOUT_MS: u64 = 1000;
pub const SMALL_NUMBER_LIMIT: u64 = 10;
