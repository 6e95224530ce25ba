use std::fmt;

use crate::drawers::label::{Label, LabelError};
use crate::drawers::rng::Rng;
use crate::drawers::DRAWER_COUNT;

/// The cupboard for one trial: drawer `i` holds `labels[i]`.
/// Every label appears exactly once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Drawers {
    labels: [Label; DRAWER_COUNT],
}

impl Drawers {
    /// Draw a uniformly random arrangement: each drawer in turn takes one label
    /// uniformly from the labels not yet placed.
    pub fn shuffled(rng: &mut Rng) -> Self {
        let mut pool: Vec<Label> = Label::all().collect();
        let mut labels = [Label::MIN; DRAWER_COUNT];
        for slot in labels.iter_mut() {
            let pick = rng.below(pool.len());
            *slot = pool.swap_remove(pick);
        }
        Self { labels }
    }

    /// Every drawer holds its own number.
    pub fn identity() -> Self {
        let mut labels = [Label::MIN; DRAWER_COUNT];
        for (slot, label) in labels.iter_mut().zip(Label::all()) {
            *slot = label;
        }
        Self { labels }
    }

    /// Build from raw values, drawer 0 first. Rejects anything that is not a
    /// permutation of `1..=100`.
    pub fn from_labels(values: &[usize]) -> Result<Self, PermutationError> {
        if values.len() != DRAWER_COUNT {
            return Err(PermutationError::WrongLength(values.len()));
        }
        let mut seen = [false; DRAWER_COUNT];
        let mut labels = [Label::MIN; DRAWER_COUNT];
        for (slot, value) in labels.iter_mut().zip(values) {
            let label = Label::new(*value).map_err(PermutationError::Label)?;
            if seen[label.drawer_index()] {
                return Err(PermutationError::Duplicate(label));
            }
            seen[label.drawer_index()] = true;
            *slot = label;
        }
        Ok(Self { labels })
    }

    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    /// Label inside the drawer numbered `drawer`.
    #[inline]
    pub fn open(&self, drawer: Label) -> Label {
        self.labels[drawer.drawer_index()]
    }

    /// Disjoint cycles as lists of drawer indices, ordered by their smallest index.
    pub fn cycles(&self) -> Vec<Vec<usize>> {
        let mut visited = [false; DRAWER_COUNT];
        let mut cycles = Vec::new();
        for start in 0..DRAWER_COUNT {
            if visited[start] {
                continue;
            }
            let mut cycle = Vec::new();
            let mut index = start;
            while !visited[index] {
                visited[index] = true;
                cycle.push(index);
                index = self.labels[index].drawer_index();
            }
            cycles.push(cycle);
        }
        cycles
    }

    /// Length of the cycle that prisoner `label` walks when starting at their own drawer.
    pub fn cycle_length_of(&self, label: Label) -> usize {
        let mut length = 1;
        let mut current = self.open(label);
        while current != label {
            current = self.open(current);
            length += 1;
        }
        length
    }

    pub fn longest_cycle(&self) -> usize {
        self.cycles().iter().map(Vec::len).max().unwrap_or(0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermutationError {
    WrongLength(usize),
    Label(LabelError),
    Duplicate(Label),
}

impl fmt::Display for PermutationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WrongLength(len) => {
                write!(f, "expected {DRAWER_COUNT} drawers, got {len}")
            }
            Self::Label(err) => write!(f, "{err}"),
            Self::Duplicate(label) => write!(f, "label {label} appears more than once"),
        }
    }
}

impl std::error::Error for PermutationError {}
