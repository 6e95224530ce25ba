use rayon::prelude::*;

use crate::drawers::{Rng, DRAWER_COUNT};
use crate::parallel::batch_ranges;
use crate::simulation::trial::{run_random_trial, TrialConfig, TrialOutcome};

/// Tallies over a set of trials.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunStatistics {
    pub runs: usize,
    pub successes: usize,
    pub failures: usize,
    /// Sum of first-failing-prisoner ordinals over failed runs.
    pub failing_prisoner_sum: usize,
}

impl RunStatistics {
    pub fn record(&mut self, outcome: TrialOutcome) {
        self.runs += 1;
        match outcome {
            TrialOutcome::Success => self.successes += 1,
            TrialOutcome::Failure { prisoner } => {
                self.failures += 1;
                self.failing_prisoner_sum += prisoner;
            }
        }
    }

    pub fn merge(&mut self, other: &RunStatistics) {
        self.runs += other.runs;
        self.successes += other.successes;
        self.failures += other.failures;
        self.failing_prisoner_sum += other.failing_prisoner_sum;
    }

    /// Percentage of successful runs, `None` when nothing ran.
    pub fn success_rate(&self) -> Option<f64> {
        if self.runs == 0 {
            return None;
        }
        Some(self.successes as f64 / self.runs as f64 * 100.0)
    }

    /// Mean ordinal of the first failing prisoner, `None` when no run failed.
    pub fn average_failing_prisoner(&self) -> Option<f64> {
        if self.failures == 0 {
            return None;
        }
        Some(self.failing_prisoner_sum as f64 / self.failures as f64)
    }

    /// Normal-approximation 95% interval for the success rate, in percent.
    pub fn success_rate_95_ci(&self) -> Option<[f64; 2]> {
        if self.runs == 0 {
            return None;
        }
        let p = self.successes as f64 / self.runs as f64;
        let z = 1.96;
        let se = (p * (1.0 - p) / self.runs as f64).sqrt();
        let lo = (p - z * se).max(0.0);
        let hi = (p + z * se).min(1.0);
        Some([lo * 100.0, hi * 100.0])
    }
}

/// Exact success probability of cycle following with `attempt_budget` drawers each:
/// `1 - sum(1/k for k in budget+1..=100)`. Only defined when the budget is at least half
/// the drawers, since then a permutation holds at most one cycle that is too long.
pub fn theoretical_success_rate(attempt_budget: usize) -> Option<f64> {
    if attempt_budget.saturating_mul(2) < DRAWER_COUNT {
        return None;
    }
    let too_long: f64 = (attempt_budget + 1..=DRAWER_COUNT)
        .map(|k| 1.0 / k as f64)
        .sum();
    Some(1.0 - too_long)
}

/// Run `trials` trials one after another, calling `on_trial` with the 1-based run number
/// and outcome of each.
pub fn run_trials<F>(
    trials: usize,
    config: &TrialConfig,
    rng: &mut Rng,
    mut on_trial: F,
) -> RunStatistics
where
    F: FnMut(usize, TrialOutcome),
{
    let mut stats = RunStatistics::default();
    for run in 1..=trials {
        let outcome = run_random_trial(rng, config);
        stats.record(outcome);
        on_trial(run, outcome);
    }
    stats
}

/// Like [run_trials] but splits the trials into `batches` batches spread over Rayon's
/// current pool. Batch `i` draws from [Rng::for_batch]`(seed, i)`, so totals depend on
/// `seed` and `batches` and not on how many threads run them. A `batches` of 0 runs
/// everything as one batch.
pub fn run_trials_parallel(
    trials: usize,
    config: &TrialConfig,
    seed: u64,
    batches: usize,
) -> RunStatistics {
    batch_ranges(trials, batches.max(1))
        .into_par_iter()
        .enumerate()
        .map(|(index, (start, end))| {
            let mut rng = Rng::for_batch(seed, index as u64);
            let mut stats = RunStatistics::default();
            for _ in start..end {
                stats.record(run_random_trial(&mut rng, config));
            }
            stats
        })
        .reduce(RunStatistics::default, |mut total, batch| {
            total.merge(&batch);
            total
        })
}
