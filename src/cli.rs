use std::io::{self, BufRead};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use log::{info, warn};

use numbers_oracle::generator::{GenerationParams, GeneratorConfig, generate_batch};
use numbers_oracle::harness::{SolverCommand, run_trials};
use numbers_oracle::{Puzzle, evaluate_line};

/// Log level for the application
#[derive(Debug, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn to_log_level_filter(&self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// How generated puzzles are printed
#[derive(Debug, Clone, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Rpn,
    Infix,
    Json,
}

/// Numbers Oracle - generate solvable numbers-game puzzles and grade solvers
#[derive(Parser, Debug)]
#[command(name = "numbers-oracle")]
#[command(about = "Generate solvable numbers-game puzzles and grade solver output")]
#[command(version)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Command,

    /// Log level (default: warn)
    #[arg(short, long, value_enum, default_value = "warn", global = true)]
    pub log_level: LogLevel,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate puzzles together with one solution each
    Generate {
        #[command(flatten)]
        bounds: BoundsArgs,

        #[command(flatten)]
        generator: GeneratorArgs,

        /// Number of puzzles to generate
        #[arg(short, long, default_value = "1")]
        count: usize,

        /// Output format
        #[arg(short, long, value_enum, default_value = "rpn")]
        format: OutputFormat,
    },
    /// Evaluate postfix expressions given as arguments, or one per stdin line
    Eval {
        /// Expressions such as "2 3 4 * +"
        expressions: Vec<String>,
    },
    /// Grade an external solver against generated puzzles
    Check {
        /// Path to the solver binary
        solver: String,

        /// Arguments placed before the target and numbers (default: --rpn)
        #[arg(long = "solver-arg", allow_hyphen_values = true)]
        solver_args: Vec<String>,

        /// Number of trials
        #[arg(short, long, default_value = "256")]
        trials: usize,

        #[command(flatten)]
        bounds: BoundsArgs,

        #[command(flatten)]
        generator: GeneratorArgs,
    },
}

/// Size and value envelope of generated puzzles
#[derive(Args, Debug, Clone)]
pub struct BoundsArgs {
    /// Fewest numbers per puzzle
    #[arg(long, default_value = "6")]
    pub min_size: usize,

    /// Most numbers per puzzle
    #[arg(long, default_value = "6")]
    pub max_size: usize,

    /// Largest number in a puzzle
    #[arg(long, default_value = "200")]
    pub max_number: u64,

    /// Largest target
    #[arg(long, default_value = "999")]
    pub max_target: u64,
}

/// Retry budget and randomness of the generator
#[derive(Args, Debug, Clone)]
pub struct GeneratorArgs {
    /// Attempts per puzzle before giving up
    #[arg(long, default_value = "64")]
    pub attempts: usize,

    /// Time budget of a single attempt in milliseconds
    #[arg(long, default_value = "1000")]
    pub timeout_ms: u64,

    /// Seed for reproducible puzzles
    #[arg(long)]
    pub seed: Option<u64>,
}

impl From<&BoundsArgs> for GenerationParams {
    fn from(args: &BoundsArgs) -> Self {
        GenerationParams::new(args.min_size, args.max_size, args.max_number, args.max_target)
    }
}

impl From<&GeneratorArgs> for GeneratorConfig {
    fn from(args: &GeneratorArgs) -> Self {
        GeneratorConfig {
            attempts: args.attempts,
            attempt_timeout: Duration::from_millis(args.timeout_ms),
            seed: args.seed,
        }
    }
}

/// Initialize logging based on the provided log level
pub fn init_logging(log_level: &LogLevel) -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log_level.to_log_level_filter())
        .try_init()
        .context("Failed to initialize logging")
}

fn generate_puzzles(
    bounds: &BoundsArgs,
    generator: &GeneratorArgs,
    count: usize,
) -> Result<Vec<Puzzle>> {
    let params = GenerationParams::from(bounds);
    let config = GeneratorConfig::from(generator);
    generate_batch(&config, &params, count)
        .into_iter()
        .enumerate()
        .map(|(index, result)| result.with_context(|| format!("Failed to generate puzzle {}", index)))
        .collect()
}

fn format_puzzle(puzzle: &Puzzle, format: &OutputFormat) -> Result<String> {
    Ok(match format {
        OutputFormat::Rpn => format!("{}: {}", puzzle, puzzle.rpn()),
        OutputFormat::Infix => format!(
            "{}: {}",
            puzzle,
            puzzle.infix().unwrap_or_else(|| puzzle.rpn())
        ),
        OutputFormat::Json => serde_json::to_string(puzzle).context("Failed to serialize puzzle")?,
    })
}

fn run_generate(
    bounds: &BoundsArgs,
    generator: &GeneratorArgs,
    count: usize,
    format: &OutputFormat,
) -> Result<i32> {
    for puzzle in generate_puzzles(bounds, generator, count)? {
        println!("{}", format_puzzle(&puzzle, format)?);
    }
    Ok(0)
}

fn run_eval(expressions: Vec<String>) -> Result<i32> {
    let lines: Vec<String> = if expressions.is_empty() {
        io::stdin()
            .lock()
            .lines()
            .collect::<Result<_, _>>()
            .context("Failed to read expressions from stdin")?
    } else {
        expressions
    };

    let mut code = 0;
    for line in &lines {
        match evaluate_line(line) {
            Ok(None) => {}
            Ok(Some(value)) => println!("{} = {}", line.trim(), value),
            Err(err) => {
                println!("{}: {}", line.trim(), err);
                code = 1;
            }
        }
    }
    Ok(code)
}

fn run_check(
    solver: SolverCommand,
    trials: usize,
    bounds: &BoundsArgs,
    generator: &GeneratorArgs,
) -> Result<i32> {
    let puzzles = generate_puzzles(bounds, generator, trials)?;
    info!("Checking {} against {} puzzles", solver.program, puzzles.len());

    let summary = run_trials(&solver, &puzzles, |report| {
        let header = format!("TEST: {}", report.puzzle);
        if report.passed() {
            println!("{:<73} [  OK  ]", header);
        } else {
            println!("{:<73} [ FAIL ]", header);
            for failure in &report.failures {
                println!("     {}", failure);
            }
        }
    })
    .with_context(|| format!("Failed to run solver {}", solver.program))?;

    println!(
        "failed: {}, succeeded: {}",
        summary.failed(),
        summary.passed()
    );
    if !summary.all_passed() {
        warn!("{} of {} trials failed", summary.failed(), trials);
    }
    Ok(if summary.all_passed() { 0 } else { 1 })
}

/// Run the main application logic and return the process exit code
pub fn run() -> Result<i32> {
    let args = CliArgs::parse();

    init_logging(&args.log_level)?;

    match args.command {
        Command::Generate {
            bounds,
            generator,
            count,
            format,
        } => run_generate(&bounds, &generator, count, &format),
        Command::Eval { expressions } => run_eval(expressions),
        Command::Check {
            solver,
            solver_args,
            trials,
            bounds,
            generator,
        } => {
            let solver = if solver_args.is_empty() {
                SolverCommand::new(solver)
            } else {
                SolverCommand::with_args(solver, solver_args)
            };
            run_check(solver, trials, &bounds, &generator)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bounds() -> BoundsArgs {
        BoundsArgs {
            min_size: 3,
            max_size: 5,
            max_number: 50,
            max_target: 500,
        }
    }

    #[test]
    fn test_cli_parses_generate() {
        let args = CliArgs::try_parse_from([
            "numbers-oracle",
            "generate",
            "--count",
            "3",
            "--seed",
            "9",
            "--format",
            "json",
        ]);
        assert!(args.is_ok());
        if let Ok(args) = args {
            assert!(matches!(args.log_level, LogLevel::Warn));
            assert!(matches!(
                args.command,
                Command::Generate {
                    count: 3,
                    format: OutputFormat::Json,
                    ..
                }
            ));
        }
    }

    #[test]
    fn test_cli_parses_check_with_solver_args() {
        let args = CliArgs::try_parse_from([
            "numbers-oracle",
            "-l",
            "debug",
            "check",
            "./build/numbers",
            "--solver-arg",
            "--rpn",
            "--trials",
            "4",
        ]);
        assert!(args.is_ok());
        if let Ok(args) = args {
            assert!(matches!(args.log_level, LogLevel::Debug));
            if let Command::Check {
                solver,
                solver_args,
                trials,
                ..
            } = args.command
            {
                assert_eq!(solver, "./build/numbers");
                assert_eq!(solver_args, vec!["--rpn".to_string()]);
                assert_eq!(trials, 4);
            } else {
                panic!("expected check command");
            }
        }
    }

    #[test]
    fn test_bounds_conversion() {
        let params = GenerationParams::from(&bounds());
        assert_eq!(params, GenerationParams::new(3, 5, 50, 500));

        let config = GeneratorConfig::from(&GeneratorArgs {
            attempts: 8,
            timeout_ms: 250,
            seed: Some(1),
        });
        assert_eq!(config.attempts, 8);
        assert_eq!(config.attempt_timeout, Duration::from_millis(250));
        assert_eq!(config.seed, Some(1));
    }

    #[test]
    fn test_generate_puzzles_are_valid() {
        let generator = GeneratorArgs {
            attempts: 64,
            timeout_ms: 1000,
            seed: Some(5),
        };
        let puzzles = generate_puzzles(&bounds(), &generator, 4);
        assert!(puzzles.is_ok());
        if let Ok(puzzles) = puzzles {
            assert_eq!(puzzles.len(), 4);
            assert!(puzzles.iter().all(|p| p.verify().is_ok()));
        }
    }

    #[test]
    fn test_generate_puzzles_reports_bad_bounds() {
        let mut bad = bounds();
        bad.min_size = 0;
        let generator = GeneratorArgs {
            attempts: 1,
            timeout_ms: 10,
            seed: None,
        };
        assert!(generate_puzzles(&bad, &generator, 2).is_err());
    }

    #[test]
    fn test_format_puzzle() {
        let puzzle = Puzzle {
            target: 20,
            numbers: vec![2, 3, 4],
            expression: numbers_oracle::expression::parse_line("2 3 + 4 *").unwrap_or_default(),
        };
        let rpn = format_puzzle(&puzzle, &OutputFormat::Rpn).unwrap_or_default();
        assert_eq!(rpn, "target=20, numbers=[2, 3, 4]: 2 3 + 4 *");
        let infix = format_puzzle(&puzzle, &OutputFormat::Infix).unwrap_or_default();
        assert_eq!(infix, "target=20, numbers=[2, 3, 4]: (2 + 3) * 4");
        let json = format_puzzle(&puzzle, &OutputFormat::Json).unwrap_or_default();
        assert!(json.starts_with(r#"{"target":20"#));
    }

    #[test]
    fn test_log_level_conversion() {
        assert_eq!(
            LogLevel::Error.to_log_level_filter(),
            log::LevelFilter::Error
        );
        assert_eq!(LogLevel::Warn.to_log_level_filter(), log::LevelFilter::Warn);
        assert_eq!(
            LogLevel::Trace.to_log_level_filter(),
            log::LevelFilter::Trace
        );
    }
}
