use ap_types::{Candidate, ObjectiveTarget, StrategyError};

use crate::tracker::{HistoryTracker, Phase};

/// Common trait for all candidate-generation strategies.
///
/// `propose` and `consume_result` of one instance are never called
/// concurrently; the scheduler serializes them behind a per-strategy lock.
pub trait Optimizer: Send {
    /// Produce the next candidate to evaluate.
    fn propose(&mut self) -> Candidate;

    /// Feed back an evaluated candidate and return the phase it leads to.
    fn consume_result(&mut self, candidate: Candidate) -> Result<Phase, StrategyError>;

    fn tracker(&self) -> &HistoryTracker;

    /// Human-readable strategy name.
    fn name(&self) -> &str {
        self.tracker().label()
    }

    fn phase(&self) -> Phase {
        self.tracker().phase()
    }

    fn is_exhausted(&self) -> bool {
        self.phase() == Phase::Exhausted
    }

    fn best(&self) -> Option<&Candidate> {
        self.tracker().best()
    }

    fn history(&self) -> &[Candidate] {
        self.tracker().history()
    }

    fn objective(&self) -> ObjectiveTarget {
        self.tracker().objective()
    }

    fn max_calculations(&self) -> usize {
        self.tracker().max_calculations()
    }
}
