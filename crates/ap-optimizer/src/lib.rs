//! # ap-optimizer
//!
//! Candidate-generation strategies for AnnealPool.
//!
//! Every strategy implements [`Optimizer`]: it proposes one candidate at a
//! time, consumes evaluated results in completion order, and tracks its best
//! result and calculation budget through a shared [`HistoryTracker`].

mod annealing;
mod config;
mod random;
mod strategy;
mod tracker;

pub use annealing::AnnealingStrategy;
pub use config::{AnnealingConfig, RandomSearchConfig};
pub use random::RandomSearch;
pub use strategy::Optimizer;
pub use tracker::{HistoryTracker, Phase};
