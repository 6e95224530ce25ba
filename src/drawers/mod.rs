pub mod label;
pub mod permutation;
pub mod rng;

/// Drawers in the cupboard, which is also the number of prisoners.
pub const DRAWER_COUNT: usize = 100;

pub use label::{Label, LabelError};
pub use permutation::{Drawers, PermutationError};
pub use rng::{entropy_seed, Rng};
