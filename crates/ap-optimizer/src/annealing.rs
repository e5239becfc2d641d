//! Simulated annealing over a continuous boundary set.
//!
//! The strategy keeps a working point (the anchor) and proposes neighbors by
//! perturbing it. Each completed evaluation is either accepted as the new
//! anchor or rejected, in which case the next neighbor is drawn around the
//! best candidate seen so far. A worse result is accepted with probability
//! `start_chance * temperature`, and the temperature is multiplied by the
//! cooling factor after every evaluation, so both the acceptance chance and
//! the perturbation width decay geometrically.

use std::sync::Arc;

use ap_types::{BoundarySet, Candidate, StrategyError};
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use tracing::trace;

use crate::config::{create_rng, AnnealingConfig};
use crate::strategy::Optimizer;
use crate::tracker::{HistoryTracker, Phase};

/// Temperature every strategy starts from.
const INITIAL_TEMPERATURE: f64 = 1.0;

#[derive(Debug, Clone)]
pub struct AnnealingStrategy {
    boundaries: Arc<BoundarySet>,
    config: AnnealingConfig,
    tracker: HistoryTracker,
    temperature: f64,
    anchor: Option<Candidate>,
    rng: ChaCha8Rng,
    accepted_moves: usize,
    improving_moves: usize,
}

impl AnnealingStrategy {
    pub fn new(boundaries: Arc<BoundarySet>, config: AnnealingConfig) -> Result<Self, StrategyError> {
        config.validate()?;
        if boundaries.is_empty() {
            return Err(StrategyError::InvalidConfig {
                message: "boundary set is empty".to_string(),
            });
        }
        Ok(Self {
            tracker: HistoryTracker::new("annealing", config.objective, config.max_calculations),
            rng: create_rng(config.seed),
            boundaries,
            config,
            temperature: INITIAL_TEMPERATURE,
            anchor: None,
            accepted_moves: 0,
            improving_moves: 0,
        })
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.tracker.set_label(name);
        self
    }

    pub fn config(&self) -> &AnnealingConfig {
        &self.config
    }

    pub fn boundaries(&self) -> &BoundarySet {
        &self.boundaries
    }

    pub fn temperature(&self) -> f64 {
        self.temperature
    }

    /// Probability of following a worse candidate at the current temperature.
    pub fn acceptance_chance(&self) -> f64 {
        self.config.start_chance * self.temperature
    }

    /// The point the next neighbor will be drawn around.
    pub fn anchor(&self) -> Option<&Candidate> {
        self.anchor.as_ref()
    }

    /// Number of evaluations adopted as the working point, including
    /// improvements.
    pub fn accepted_moves(&self) -> usize {
        self.accepted_moves
    }

    pub fn improving_moves(&self) -> usize {
        self.improving_moves
    }

    fn neighbor(&mut self, anchor: &Candidate) -> Candidate {
        let mut next = Candidate::new();
        for boundary in self.boundaries.iter() {
            let base = match anchor.get_parameter(&boundary.name) {
                Ok(value) => value,
                Err(_) => self.rng.gen_range(boundary.lower..=boundary.upper),
            };
            let step = (self.rng.gen::<f64>() - 0.5) * boundary.width() * self.temperature;
            next = next.with_parameter(boundary.name.clone(), boundary.clamp(base + step));
        }
        next
    }

    /// Metropolis-style acceptance of a freshly evaluated candidate.
    fn accept(&mut self, candidate: &Candidate) {
        let objective = self.tracker.objective();
        let accepted = match &self.anchor {
            None => true,
            Some(anchor) if objective.better_candidate(candidate, anchor) => {
                self.improving_moves += 1;
                true
            }
            Some(_) => self.rng.gen::<f64>() < self.acceptance_chance(),
        };

        if accepted {
            self.accepted_moves += 1;
            self.anchor = Some(candidate.clone());
        } else {
            self.anchor = self.tracker.best().cloned();
        }
        trace!(
            strategy = %self.tracker.label(),
            accepted,
            temperature = self.temperature,
            "acceptance decided"
        );
    }
}

impl Optimizer for AnnealingStrategy {
    fn propose(&mut self) -> Candidate {
        let anchor = match self.tracker.phase() {
            Phase::Seeded => None,
            Phase::Running | Phase::Exhausted => {
                self.anchor.clone().or_else(|| self.tracker.best().cloned())
            }
        };
        match anchor {
            Some(anchor) => self.neighbor(&anchor),
            None => self.boundaries.sample_candidate(&mut self.rng),
        }
    }

    fn consume_result(&mut self, candidate: Candidate) -> Result<Phase, StrategyError> {
        let phase = self.tracker.record(candidate.clone())?;
        self.accept(&candidate);
        self.temperature *= self.config.cooling_factor;
        Ok(phase)
    }

    fn tracker(&self) -> &HistoryTracker {
        &self.tracker
    }
}
