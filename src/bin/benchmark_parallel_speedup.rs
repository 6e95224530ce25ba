//! Run the trial loop once sequentially and once in parallel, then print timings and speedup.
//!
//! Usage: cargo run --release --bin benchmark_parallel_speedup

use std::time::Instant;

use prisoners::drawers::Rng;
use prisoners::parallel::{run_trial_batches, WorkerPool};
use prisoners::simulation::{run_trials, TrialConfig};

fn main() {
    let seed = 12345u64;
    let trials = 200_000;
    let batches = 256;
    let config = TrialConfig::default();

    println!("Prisoner trials: {} trials of 100 prisoners (budget={})", trials, config.attempt_budget);
    println!();

    // Sequential
    let t0 = Instant::now();
    let seq = run_trials(trials, &config, &mut Rng::new(seed), |_, _| {});
    let elapsed_seq = t0.elapsed();
    let seq_ms = elapsed_seq.as_secs_f64() * 1000.0;
    println!("Sequential:  {:.2} ms  ({:.1} trials/s)", seq_ms, trials as f64 / elapsed_seq.as_secs_f64());

    // Parallel
    let t0 = Instant::now();
    let par = run_trial_batches(trials, &config, seed, batches, &WorkerPool::default_workers());
    let elapsed_par = t0.elapsed();
    let par_ms = elapsed_par.as_secs_f64() * 1000.0;
    println!("Parallel:    {:.2} ms  ({:.1} trials/s)", par_ms, trials as f64 / elapsed_par.as_secs_f64());

    let speedup = seq_ms / par_ms;
    println!();
    println!("Speedup:     {:.2}x faster (parallel vs sequential)", speedup);

    // Streams differ between the two loops, so only the totals and rough rates are comparable
    assert_eq!(seq.runs, par.runs);
    let seq_rate = seq.success_rate().unwrap_or(0.0);
    let par_rate = par.success_rate().unwrap_or(0.0);
    println!("Success rate: sequential {:.2}%, parallel {:.2}%", seq_rate, par_rate);
}
