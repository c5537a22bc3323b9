use std::io;

use thiserror::Error;

/// Faults of the harness itself, as opposed to failures of the solver
#[derive(Error, Debug)]
pub enum HarnessError {
    #[error("Failed to start solver '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },
    #[error("Solver stdout was not captured")]
    MissingStdout,
    #[error("Failed to read solver output: {0}")]
    Read(#[source] io::Error),
    #[error("Failed to wait for solver: {0}")]
    Wait(#[source] io::Error),
}
