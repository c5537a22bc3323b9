use std::io::{BufRead, BufReader};
use std::process::{Command, Stdio};

use log::{debug, info, warn};

use crate::harness::errors::HarnessError;
use crate::harness::grading::{TrialFailure, grade_line};
use crate::puzzle::Puzzle;

/// How to invoke the external solver; target and numbers are appended
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolverCommand {
    pub program: String,
    pub args: Vec<String>,
}

impl SolverCommand {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: vec!["--rpn".to_string()],
        }
    }

    pub fn with_args(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    fn command_for(&self, puzzle: &Puzzle) -> Command {
        let mut command = Command::new(&self.program);
        command
            .args(&self.args)
            .arg(puzzle.target.to_string())
            .args(puzzle.numbers.iter().map(|n| n.to_string()))
            .stdin(Stdio::null())
            .stdout(Stdio::piped());
        command
    }
}

/// Outcome of running the solver on one puzzle
#[derive(Debug, Clone)]
pub struct TrialReport {
    pub puzzle: Puzzle,
    pub candidates: usize,
    pub failures: Vec<TrialFailure>,
}

impl TrialReport {
    pub fn passed(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Aggregate of a series of trials
#[derive(Debug, Clone, Default)]
pub struct HarnessSummary {
    pub reports: Vec<TrialReport>,
}

impl HarnessSummary {
    pub fn passed(&self) -> usize {
        self.reports.iter().filter(|r| r.passed()).count()
    }

    pub fn failed(&self) -> usize {
        self.reports.len() - self.passed()
    }

    pub fn all_passed(&self) -> bool {
        self.reports.iter().all(TrialReport::passed)
    }
}

/// Run the solver on `puzzle` and grade every line it prints.
///
/// Lines are graded independently as they arrive; a malformed line is
/// recorded and does not stop grading of the rest.
///
/// # Errors
///
/// Returns an error only when the solver cannot be started, its output
/// cannot be read, or it cannot be waited on.
pub fn run_solver(solver: &SolverCommand, puzzle: &Puzzle) -> Result<TrialReport, HarnessError> {
    debug!("Running {} on {}", solver.program, puzzle);

    let mut child = solver
        .command_for(puzzle)
        .spawn()
        .map_err(|source| HarnessError::Spawn {
            program: solver.program.clone(),
            source,
        })?;
    let stdout = child.stdout.take().ok_or(HarnessError::MissingStdout)?;

    let mut candidates = 0;
    let mut failures = Vec::new();
    let mut reader = BufReader::new(stdout);
    let mut buffer = Vec::new();
    loop {
        buffer.clear();
        match reader.read_until(b'\n', &mut buffer) {
            Ok(0) => break,
            Ok(_) => {}
            Err(err) => {
                // Best effort: the read error is the fault being reported.
                let _ = child.kill();
                let _ = child.wait();
                return Err(HarnessError::Read(err));
            }
        }

        // Invalid UTF-8 becomes U+FFFD and fails as an invalid token.
        let line = String::from_utf8_lossy(&buffer);
        match grade_line(&line, puzzle.target) {
            None => {}
            Some(Ok(())) => candidates += 1,
            Some(Err(failure)) => {
                candidates += 1;
                warn!("Solver failure on {}: {}", puzzle, failure);
                failures.push(failure);
            }
        }
    }

    let status = child.wait().map_err(HarnessError::Wait)?;
    if !status.success() {
        warn!("Solver exited with {} on {}", status, puzzle);
        failures.push(TrialFailure::ExitStatus(status.code()));
    }
    if candidates == 0 {
        failures.push(TrialFailure::NoCandidates);
    }

    Ok(TrialReport {
        puzzle: puzzle.clone(),
        candidates,
        failures,
    })
}

/// Run the solver on each puzzle in turn, handing every report to
/// `on_report` as soon as its trial finishes.
///
/// # Errors
///
/// Stops at the first harness fault; solver failures are collected.
pub fn run_trials<F>(
    solver: &SolverCommand,
    puzzles: &[Puzzle],
    mut on_report: F,
) -> Result<HarnessSummary, HarnessError>
where
    F: FnMut(&TrialReport),
{
    let mut summary = HarnessSummary::default();
    for puzzle in puzzles {
        let report = run_solver(solver, puzzle)?;
        on_report(&report);
        summary.reports.push(report);
    }
    info!(
        "Trials finished: {} failed, {} succeeded",
        summary.failed(),
        summary.passed()
    );
    Ok(summary)
}
