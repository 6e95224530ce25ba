use crate::drawers::{Drawers, Label, Rng};
use crate::search::{search_with_policy, SearchPolicy, ATTEMPT_BUDGET};

/// How each prisoner searches during a trial.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrialConfig {
    pub attempt_budget: usize,
    pub policy: SearchPolicy,
}

impl Default for TrialConfig {
    fn default() -> Self {
        Self {
            attempt_budget: ATTEMPT_BUDGET,
            policy: SearchPolicy::CycleFollowing,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrialOutcome {
    Success,
    /// `prisoner` is the 1-based ordinal of the first prisoner who did not find their number.
    Failure { prisoner: usize },
}

impl TrialOutcome {
    pub fn is_success(self) -> bool {
        matches!(self, Self::Success)
    }

    pub fn failing_prisoner(self) -> Option<usize> {
        match self {
            Self::Success => None,
            Self::Failure { prisoner } => Some(prisoner),
        }
    }
}

/// Send prisoners 1..=100 into the room in order and stop at the first failure;
/// the group is lost the moment any one of them is.
pub fn run_trial(drawers: &Drawers, config: &TrialConfig, rng: &mut Rng) -> TrialOutcome {
    for identity in Label::all() {
        let outcome = search_with_policy(
            drawers,
            identity,
            config.attempt_budget,
            config.policy,
            rng,
        );
        if !outcome.found {
            return TrialOutcome::Failure {
                prisoner: identity.get(),
            };
        }
    }
    TrialOutcome::Success
}

/// Fill a fresh cupboard from `rng` and run one trial against it.
pub fn run_random_trial(rng: &mut Rng, config: &TrialConfig) -> TrialOutcome {
    let drawers = Drawers::shuffled(rng);
    run_trial(&drawers, config, rng)
}
