//! Run trial-throughput benchmark and optionally append one line to a log file for trend tracking.
//!
//! Usage:
//!   cargo run --release --bin benchmark_simulator
//!   cargo run --release --bin benchmark_simulator -- --log
//!
//! --log  Append one row to benchmark_log.csv (date, trials_per_sec, trials_per_min, searches_per_sec, success_rate).

use std::fs::OpenOptions;
use std::time::Instant;

use prisoners::drawers::Rng;
use prisoners::simulation::{run_random_trial, RunStatistics, TrialConfig};

// Run for at least this long or this many trials
const MIN_DURATION_MS: u128 = 2000;
const MIN_TRIALS: usize = 5000;

fn main() {
    let log = std::env::args().any(|a| a == "--log");

    let config = TrialConfig::default();
    let mut rng = Rng::new(7);
    let mut stats = RunStatistics::default();
    let mut searches: usize = 0;

    let start = Instant::now();
    while start.elapsed().as_millis() < MIN_DURATION_MS || stats.runs < MIN_TRIALS {
        let outcome = run_random_trial(&mut rng, &config);
        searches += outcome.failing_prisoner().unwrap_or(100);
        stats.record(outcome);
    }
    let elapsed_secs = start.elapsed().as_secs_f64();

    let trials_per_sec = stats.runs as f64 / elapsed_secs;
    let trials_per_min = trials_per_sec * 60.0;
    let searches_per_sec = searches as f64 / elapsed_secs;
    let success_rate = stats.success_rate().unwrap_or(0.0);

    println!("Trial benchmark ({} drawers/prisoner):", config.attempt_budget);
    println!("  Trials:       {}", stats.runs);
    println!("  Duration:     {:.2} s", elapsed_secs);
    println!("  Trials/s:     {:.2}", trials_per_sec);
    println!("  Trials/min:   {:.2}", trials_per_min);
    println!("  Searches/s:   {:.2}", searches_per_sec);
    println!("  Success rate: {:.2}%", success_rate);

    if log {
        if let Err(err) = append_log(trials_per_sec, trials_per_min, searches_per_sec, success_rate) {
            eprintln!("failed to append benchmark_log.csv: {err}");
            std::process::exit(1);
        }
    }
}

fn append_log(
    trials_per_sec: f64,
    trials_per_min: f64,
    searches_per_sec: f64,
    success_rate: f64,
) -> Result<(), Box<dyn std::error::Error>> {
    let path = "benchmark_log.csv";
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let is_empty = file.metadata().map(|m| m.len() == 0).unwrap_or(true);

    let mut writer = csv::Writer::from_writer(file);
    if is_empty {
        writer.write_record([
            "date",
            "trials_per_sec",
            "trials_per_min",
            "searches_per_sec",
            "success_rate",
        ])?;
    }
    let date = chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string();
    writer.write_record([
        date,
        format!("{trials_per_sec:.4}"),
        format!("{trials_per_min:.4}"),
        format!("{searches_per_sec:.4}"),
        format!("{success_rate:.4}"),
    ])?;
    writer.flush()?;
    println!("Appended to {}", path);
    Ok(())
}
