use std::env;
use std::fmt;
use std::io::{self, BufWriter, Write};
use std::str::FromStr;

use crate::config::{OutputMode, SimulationConfig};
use crate::drawers::{entropy_seed, Rng, DRAWER_COUNT};
use crate::error::SimulationError;
use crate::parallel::{run_trial_batches, WorkerPool};
use crate::simulation::{run_trials, trial_line, Summary};

pub const USAGE: &str = "usage: prisoners [TRIALS] [--seed N] [--policy cycle|random-restart] \
[--budget N] [--parallel] [--workers N] [--batches N] [--quiet] [--json]";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Run(SimulationConfig),
    Help,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliError {
    Usage(String),
    InvalidValue { name: &'static str, value: String },
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Usage(message) => write!(f, "{message}\n{USAGE}"),
            Self::InvalidValue { name, value } => write!(f, "invalid {name} '{value}'\n{USAGE}"),
        }
    }
}

impl std::error::Error for CliError {}

/// Parse `args` (program name first) on top of `base`.
pub fn parse_args(args: &[String], base: SimulationConfig) -> Result<Command, CliError> {
    let mut config = base;
    let mut trials_given = false;
    let mut rest = args.iter().skip(1);

    while let Some(arg) = rest.next() {
        match arg.as_str() {
            "-h" | "--help" => return Ok(Command::Help),
            "--seed" => config.seed = Some(parse_value(rest.next(), "seed")?),
            "--policy" => config.trial.policy = parse_value(rest.next(), "policy")?,
            "--budget" => {
                let raw = rest.next();
                let budget: usize = parse_value(raw, "budget")?;
                if budget == 0 || budget > DRAWER_COUNT {
                    return Err(invalid("budget", raw));
                }
                config.trial.attempt_budget = budget;
            }
            "--parallel" => config.parallel = true,
            "--workers" => {
                config.workers = parse_value(rest.next(), "workers")?;
                config.parallel = true;
            }
            "--batches" => {
                let raw = rest.next();
                let batches: usize = parse_value(raw, "batches")?;
                if batches == 0 {
                    return Err(invalid("batches", raw));
                }
                config.batches = batches;
            }
            "--quiet" => {
                if config.output != OutputMode::Json {
                    config.output = OutputMode::Quiet;
                }
            }
            "--json" => config.output = OutputMode::Json,
            flag if flag.starts_with('-') => {
                return Err(CliError::Usage(format!("unknown option '{flag}'")));
            }
            positional => {
                if trials_given {
                    return Err(CliError::Usage(format!(
                        "unexpected argument '{positional}'"
                    )));
                }
                config.trials = parse_value(Some(arg), "trials")?;
                trials_given = true;
            }
        }
    }

    Ok(Command::Run(config))
}

fn parse_value<T: FromStr>(raw: Option<&String>, name: &'static str) -> Result<T, CliError> {
    let Some(raw) = raw else {
        return Err(CliError::Usage(format!("missing value for {name}")));
    };
    raw.parse::<T>().map_err(|_| invalid(name, Some(raw)))
}

fn invalid(name: &'static str, raw: Option<&String>) -> CliError {
    CliError::InvalidValue {
        name,
        value: raw.cloned().unwrap_or_default(),
    }
}

pub fn run_with_args(args: &[String]) -> i32 {
    match parse_args(args, SimulationConfig::default()) {
        Ok(Command::Help) => {
            println!("{USAGE}");
            0
        }
        Ok(Command::Run(config)) => handle_run(&config),
        Err(err) => {
            eprintln!("{err}");
            2
        }
    }
}

pub fn run_from_process_args() -> i32 {
    let args: Vec<String> = env::args().collect();
    run_with_args(&args)
}

fn handle_run(config: &SimulationConfig) -> i32 {
    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    let result = run_simulation(config, &mut out).and_then(|_| out.flush().map_err(Into::into));
    match result {
        Ok(()) => 0,
        Err(err) => {
            eprintln!("simulation failed: {err}");
            1
        }
    }
}

/// Run the configured trials, writing per-trial lines (verbose sequential runs only) and
/// the summary to `out`.
pub fn run_simulation<W: Write>(
    config: &SimulationConfig,
    out: &mut W,
) -> Result<Summary, SimulationError> {
    let seed = match config.seed {
        Some(seed) => seed,
        None => entropy_seed()?,
    };

    let stats = if config.parallel {
        let pool = WorkerPool::with_workers(config.workers);
        run_trial_batches(config.trials, &config.trial, seed, config.batches, &pool)
    } else {
        let mut rng = Rng::new(seed);
        let verbose = config.output == OutputMode::Verbose;
        let mut written: io::Result<()> = Ok(());
        let stats = run_trials(config.trials, &config.trial, &mut rng, |run, outcome| {
            if verbose && written.is_ok() {
                written = writeln!(out, "{}", trial_line(run, outcome));
            }
        });
        written?;
        stats
    };

    let summary = Summary::new(&stats, seed, &config.trial);
    match config.output {
        OutputMode::Json => writeln!(out, "{}", summary.to_json()?)?,
        OutputMode::Verbose | OutputMode::Quiet => write!(out, "{}", summary.to_text())?,
    }
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::SearchPolicy;

    fn args(list: &[&str]) -> Vec<String> {
        std::iter::once("prisoners")
            .chain(list.iter().copied())
            .map(String::from)
            .collect()
    }

    fn parse(list: &[&str]) -> Result<Command, CliError> {
        parse_args(&args(list), SimulationConfig::default())
    }

    #[test]
    fn no_arguments_run_the_default_simulation() {
        assert_eq!(parse(&[]), Ok(Command::Run(SimulationConfig::default())));
    }

    #[test]
    fn flags_and_trial_count_are_applied() {
        let Ok(Command::Run(config)) = parse(&[
            "250",
            "--seed",
            "9",
            "--policy",
            "random-restart",
            "--budget",
            "60",
            "--workers",
            "2",
            "--batches",
            "4",
            "--quiet",
        ]) else {
            panic!("expected a run command");
        };
        assert_eq!(config.trials, 250);
        assert_eq!(config.seed, Some(9));
        assert_eq!(config.trial.policy, SearchPolicy::RandomRestart);
        assert_eq!(config.trial.attempt_budget, 60);
        assert!(config.parallel);
        assert_eq!(config.workers, 2);
        assert_eq!(config.batches, 4);
        assert_eq!(config.output, OutputMode::Quiet);
    }

    #[test]
    fn json_wins_over_quiet() {
        let Ok(Command::Run(config)) = parse(&["--json", "--quiet"]) else {
            panic!("expected a run command");
        };
        assert_eq!(config.output, OutputMode::Json);
    }

    #[test]
    fn bad_input_is_rejected() {
        assert!(matches!(parse(&["--bogus"]), Err(CliError::Usage(_))));
        assert!(matches!(parse(&["10", "20"]), Err(CliError::Usage(_))));
        assert!(matches!(parse(&["--seed"]), Err(CliError::Usage(_))));
        assert_eq!(
            parse(&["many"]),
            Err(CliError::InvalidValue {
                name: "trials",
                value: "many".to_string()
            })
        );
        assert!(matches!(
            parse(&["--budget", "0"]),
            Err(CliError::InvalidValue { name: "budget", .. })
        ));
        assert!(matches!(
            parse(&["--budget", "101"]),
            Err(CliError::InvalidValue { name: "budget", .. })
        ));
        assert!(matches!(
            parse(&["--policy", "guess"]),
            Err(CliError::InvalidValue { name: "policy", .. })
        ));
        assert!(matches!(
            parse(&["--batches", "0"]),
            Err(CliError::InvalidValue { name: "batches", .. })
        ));
    }

    #[test]
    fn help_is_recognised() {
        assert_eq!(parse(&["--help"]), Ok(Command::Help));
        assert!(CliError::Usage("x".into()).to_string().contains("usage: prisoners"));
    }

    #[test]
    fn verbose_run_writes_a_line_per_trial_and_summary() {
        let config = SimulationConfig {
            trials: 5,
            seed: Some(3),
            ..SimulationConfig::default()
        };
        let mut out = Vec::new();
        let summary = run_simulation(&config, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        let lines: Vec<&str> = text.lines().collect();
        for (index, line) in lines.iter().take(5).enumerate() {
            assert!(line.starts_with(&format!("Run: {} ", index + 1)), "line {line}");
        }
        assert_eq!(lines[5], "Simulation Done with 5 runs.");
        assert_eq!(summary.runs, 5);
        assert_eq!(summary.seed, 3);
    }

    #[test]
    fn seeded_runs_repeat_exactly() {
        let config = SimulationConfig {
            trials: 200,
            seed: Some(11),
            output: OutputMode::Quiet,
            ..SimulationConfig::default()
        };
        let mut first = Vec::new();
        let mut second = Vec::new();
        run_simulation(&config, &mut first).unwrap();
        run_simulation(&config, &mut second).unwrap();
        assert_eq!(first, second);
        assert!(!String::from_utf8(first).unwrap().contains("Run: "));
    }

    #[test]
    fn zero_trials_report_no_data() {
        let config = SimulationConfig {
            trials: 0,
            seed: Some(1),
            output: OutputMode::Json,
            ..SimulationConfig::default()
        };
        let mut out = Vec::new();
        let summary = run_simulation(&config, &mut out).unwrap();
        assert_eq!(summary.successes, 0);
        assert_eq!(summary.failures, 0);
        assert_eq!(summary.average_failing_prisoner, None);

        let json: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert!(json["average_failing_prisoner"].is_null());
    }

    #[test]
    fn parallel_run_writes_summary_only() {
        let config = SimulationConfig {
            trials: 300,
            seed: Some(5),
            parallel: true,
            workers: 2,
            batches: 6,
            ..SimulationConfig::default()
        };
        let mut out = Vec::new();
        let summary = run_simulation(&config, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("Simulation Done with 300 runs."));
        assert_eq!(summary.successes + summary.failures, 300);
    }
}
