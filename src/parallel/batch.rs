//! Batch distribution for parallel simulation.
//!
//! Splits trials into batches for parallel execution. Each batch owns its own
//! generator and tallies, so batches are merged only after they all finish.

/// Split `total` items into up to `num_batches` ranges `[start, end)`.
/// Batches are as equal in size as possible; later batches may be smaller.
///
/// # Example
/// ```
/// # use prisoners::parallel::batch_ranges;
/// let ranges = batch_ranges(100, 4);
/// assert_eq!(ranges, vec![(0, 25), (25, 50), (50, 75), (75, 100)]);
/// ```
pub fn batch_ranges(total: usize, num_batches: usize) -> Vec<(usize, usize)> {
    if total == 0 || num_batches == 0 {
        return Vec::new();
    }
    let num_batches = num_batches.min(total);
    let base = total / num_batches;
    let remainder = total % num_batches;
    let mut ranges = Vec::with_capacity(num_batches);
    let mut start = 0;
    for i in 0..num_batches {
        let size = base + if i < remainder { 1 } else { 0 };
        let end = start + size;
        ranges.push((start, end));
        start = end;
    }
    ranges
}

/// Run the batched parallel trial loop inside `pool`.
/// Calls [crate::simulation::monte_carlo::run_trials_parallel] within
/// [crate::parallel::pool::WorkerPool::install] so a custom worker count takes effect.
pub fn run_trial_batches(
    trials: usize,
    config: &crate::simulation::TrialConfig,
    seed: u64,
    batches: usize,
    pool: &crate::parallel::pool::WorkerPool,
) -> crate::simulation::RunStatistics {
    pool.install(|| {
        crate::simulation::monte_carlo::run_trials_parallel(trials, config, seed, batches)
    })
}
