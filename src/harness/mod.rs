//! Drives an external solver binary and grades its output

mod errors;
mod grading;
mod runner;

pub use errors::HarnessError;
pub use grading::{TrialFailure, grade_line};
pub use runner::{HarnessSummary, SolverCommand, TrialReport, run_solver, run_trials};
