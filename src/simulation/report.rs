use serde::Serialize;

use crate::search::SearchPolicy;
use crate::simulation::monte_carlo::{theoretical_success_rate, RunStatistics};
use crate::simulation::trial::{TrialConfig, TrialOutcome};

/// Console line for one finished trial.
pub fn trial_line(run: usize, outcome: TrialOutcome) -> String {
    match outcome {
        TrialOutcome::Success => format!("Run: {run} is a success."),
        TrialOutcome::Failure { prisoner } => {
            format!("Run: {run} failed at: {prisoner} n-th prisonner.")
        }
    }
}

/// End-of-simulation figures. Undefined values stay `None` (and `null` in JSON).
#[derive(Debug, Clone, Serialize)]
pub struct Summary {
    pub runs: usize,
    pub successes: usize,
    pub failures: usize,
    pub success_rate: Option<f64>,
    pub average_failing_prisoner: Option<f64>,
    pub success_rate_95_ci: Option<[f64; 2]>,
    pub theoretical_success_rate: Option<f64>,
    pub seed: u64,
    pub policy: SearchPolicy,
    pub attempt_budget: usize,
}

impl Summary {
    pub fn new(stats: &RunStatistics, seed: u64, config: &TrialConfig) -> Self {
        Self {
            runs: stats.runs,
            successes: stats.successes,
            failures: stats.failures,
            success_rate: stats.success_rate(),
            average_failing_prisoner: stats.average_failing_prisoner(),
            success_rate_95_ci: stats.success_rate_95_ci(),
            theoretical_success_rate: theoretical_success_rate(config.attempt_budget)
                .map(|p| p * 100.0),
            seed,
            policy: config.policy,
            attempt_budget: config.attempt_budget,
        }
    }

    pub fn to_text(&self) -> String {
        let success_rate = match self.success_rate {
            Some(rate) => format!("{rate:.2}%"),
            None => "n/a".to_string(),
        };
        let average = match self.average_failing_prisoner {
            Some(average) => format!("{average:.2}"),
            None => "n/a (no failed runs)".to_string(),
        };

        let mut out = format!(
            "Simulation Done with {} runs.\n\
             Success: {}\n\
             Failed: {}\n\
             Success rate: {success_rate}\n\
             Average prisonners try before failure: {average}\n",
            self.runs, self.successes, self.failures
        );
        if let Some([lo, hi]) = self.success_rate_95_ci {
            out.push_str(&format!("Success rate 95% CI: [{lo:.2}%, {hi:.2}%]\n"));
        }
        if let Some(theory) = self.theoretical_success_rate {
            out.push_str(&format!("Theoretical success rate: {theory:.2}%\n"));
        }
        out
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
