//! One prisoner's turn in the room.
//!
//! The canonical strategy starts at the drawer carrying the prisoner's own number and
//! treats every label found as a pointer to the next drawer. The walk stays on the
//! single cycle containing the prisoner's number, so it succeeds exactly when that
//! cycle is no longer than the attempt budget.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::drawers::{Drawers, Label, Rng, DRAWER_COUNT};

/// Drawers each prisoner may open.
pub const ATTEMPT_BUDGET: usize = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SearchPolicy {
    /// Follow the cycle from one's own drawer and nothing else.
    #[serde(rename = "cycle")]
    CycleFollowing,
    /// Follow the cycle, and when the walk reaches a drawer already opened, jump to a
    /// uniformly random unopened drawer and keep going on the same budget.
    RandomRestart,
}

impl Default for SearchPolicy {
    fn default() -> Self {
        Self::CycleFollowing
    }
}

impl SearchPolicy {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CycleFollowing => "cycle",
            Self::RandomRestart => "random-restart",
        }
    }
}

impl fmt::Display for SearchPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SearchPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "cycle" | "cycle-following" => Ok(Self::CycleFollowing),
            "random-restart" => Ok(Self::RandomRestart),
            other => Err(format!("unknown policy '{other}'")),
        }
    }
}

/// Bookkeeping for the prisoner currently in the room.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrisonerState {
    pub identity: Label,
    pub found: bool,
    pub remaining_attempts: usize,
    /// Zero-based drawer indices in the order they were opened.
    pub opened: Vec<usize>,
}

impl PrisonerState {
    pub fn new(identity: Label, attempt_budget: usize) -> Self {
        Self {
            identity,
            found: false,
            remaining_attempts: attempt_budget,
            opened: Vec::with_capacity(attempt_budget.min(DRAWER_COUNT)),
        }
    }

    pub fn has_opened(&self, index: usize) -> bool {
        self.opened.contains(&index)
    }

    pub fn can_continue(&self) -> bool {
        !self.found && self.remaining_attempts > 0
    }

    /// Open drawer number `drawer`, spending one attempt.
    fn open(&mut self, drawers: &Drawers, drawer: Label) -> Label {
        let label = drawers.open(drawer);
        self.opened.push(drawer.drawer_index());
        self.remaining_attempts -= 1;
        if label == self.identity {
            self.found = true;
        }
        label
    }

    pub fn outcome(&self) -> SearchOutcome {
        SearchOutcome {
            found: self.found,
            opened: self.opened.len(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchOutcome {
    pub found: bool,
    pub opened: usize,
}

/// Canonical cycle-following search. Pure: depends only on the arrangement, the
/// prisoner and the budget.
pub fn search(drawers: &Drawers, identity: Label, attempt_budget: usize) -> SearchOutcome {
    follow_cycle(drawers, identity, attempt_budget).outcome()
}

/// Run the search under `policy`. Only [SearchPolicy::RandomRestart] draws from `rng`.
pub fn search_with_policy(
    drawers: &Drawers,
    identity: Label,
    attempt_budget: usize,
    policy: SearchPolicy,
    rng: &mut Rng,
) -> SearchOutcome {
    match policy {
        SearchPolicy::CycleFollowing => search(drawers, identity, attempt_budget),
        SearchPolicy::RandomRestart => {
            follow_with_restarts(drawers, identity, attempt_budget, rng).outcome()
        }
    }
}

fn follow_cycle(drawers: &Drawers, identity: Label, attempt_budget: usize) -> PrisonerState {
    let mut state = PrisonerState::new(identity, attempt_budget);
    let mut next = identity;
    while state.can_continue() {
        next = state.open(drawers, next);
    }
    state
}

// On a valid permutation the walk closes on the prisoner's own label before it can
// reach an opened drawer, so the restart branch never fires and this matches
// `follow_cycle` exactly.
fn follow_with_restarts(
    drawers: &Drawers,
    identity: Label,
    attempt_budget: usize,
    rng: &mut Rng,
) -> PrisonerState {
    let state = PrisonerState::new(identity, attempt_budget);
    resume_with_restarts(state, identity, drawers, rng)
}

/// Continue a turn from `state`, heading for drawer `next`.
fn resume_with_restarts(
    mut state: PrisonerState,
    mut next: Label,
    drawers: &Drawers,
    rng: &mut Rng,
) -> PrisonerState {
    while state.can_continue() {
        if state.has_opened(next.drawer_index()) {
            let unopened: Vec<Label> = Label::all()
                .filter(|drawer| !state.has_opened(drawer.drawer_index()))
                .collect();
            if unopened.is_empty() {
                break;
            }
            next = unopened[rng.below(unopened.len())];
        }
        next = state.open(drawers, next);
    }
    state
}
