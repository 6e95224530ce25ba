pub mod monte_carlo;
pub mod report;
pub mod trial;

pub use monte_carlo::{run_trials, run_trials_parallel, theoretical_success_rate, RunStatistics};
pub use report::{trial_line, Summary};
pub use trial::{run_random_trial, run_trial, TrialConfig, TrialOutcome};
