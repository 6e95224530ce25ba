//! Monte Carlo simulation of the 100 prisoners problem under the cycle-following strategy.

pub mod cli;
pub mod config;
pub mod drawers;
pub mod error;
pub mod parallel;
pub mod search;
pub mod simulation;
