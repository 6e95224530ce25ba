//! Run configuration. Defaults reproduce the classic experiment: 10000 trials,
//! 50 drawers per prisoner, cycle following, one console line per trial.
//! Only command-line arguments change them.

use crate::simulation::TrialConfig;

pub const DEFAULT_TRIALS: usize = 10_000;
pub const DEFAULT_BATCHES: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Per-trial lines followed by the text summary.
    Verbose,
    /// Text summary only.
    Quiet,
    /// JSON summary only.
    Json,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulationConfig {
    pub trials: usize,
    /// Fixed seed for reproducible runs; drawn from OS entropy when `None`.
    pub seed: Option<u64>,
    pub trial: TrialConfig,
    pub parallel: bool,
    /// Worker threads for the parallel loop; 0 means all cores.
    pub workers: usize,
    pub batches: usize,
    pub output: OutputMode,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            trials: DEFAULT_TRIALS,
            seed: None,
            trial: TrialConfig::default(),
            parallel: false,
            workers: 0,
            batches: DEFAULT_BATCHES,
            output: OutputMode::Verbose,
        }
    }
}
