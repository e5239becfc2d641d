//! Independent uniform sampling across the boundary set.

use std::sync::Arc;

use ap_types::{BoundarySet, Candidate, StrategyError};
use rand_chacha::ChaCha8Rng;

use crate::config::{create_rng, RandomSearchConfig};
use crate::strategy::Optimizer;
use crate::tracker::{HistoryTracker, Phase};

/// Baseline strategy: every proposal is a fresh uniform sample.
#[derive(Debug, Clone)]
pub struct RandomSearch {
    boundaries: Arc<BoundarySet>,
    tracker: HistoryTracker,
    rng: ChaCha8Rng,
}

impl RandomSearch {
    pub fn new(boundaries: Arc<BoundarySet>, config: RandomSearchConfig) -> Result<Self, StrategyError> {
        config.validate()?;
        if boundaries.is_empty() {
            return Err(StrategyError::InvalidConfig {
                message: "boundary set is empty".to_string(),
            });
        }
        Ok(Self {
            boundaries,
            tracker: HistoryTracker::new("random", config.objective, config.max_calculations),
            rng: create_rng(config.seed),
        })
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.tracker.set_label(name);
        self
    }
}

impl Optimizer for RandomSearch {
    fn propose(&mut self) -> Candidate {
        self.boundaries.sample_candidate(&mut self.rng)
    }

    fn consume_result(&mut self, candidate: Candidate) -> Result<Phase, StrategyError> {
        self.tracker.record(candidate)
    }

    fn tracker(&self) -> &HistoryTracker {
        &self.tracker
    }
}
