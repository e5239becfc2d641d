//! Evaluation history, best-result tracking and budget accounting.

use ap_types::{Candidate, ObjectiveTarget, StrategyError};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Lifecycle of a strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// No evaluation has completed yet.
    Seeded,
    /// At least one and at most `max_calculations` evaluations completed.
    Running,
    /// More than `max_calculations` evaluations completed. Terminal.
    Exhausted,
}

/// History and best result of one strategy.
///
/// Exhaustion is checked after appending, with `len > max_calculations`,
/// so a strategy always records exactly one result beyond its nominal
/// budget before it stops.
#[derive(Debug, Clone)]
pub struct HistoryTracker {
    label: String,
    objective: ObjectiveTarget,
    max_calculations: usize,
    history: Vec<Candidate>,
    best: Option<Candidate>,
    phase: Phase,
}

impl HistoryTracker {
    pub fn new(label: impl Into<String>, objective: ObjectiveTarget, max_calculations: usize) -> Self {
        Self {
            label: label.into(),
            objective,
            max_calculations,
            history: Vec::new(),
            best: None,
            phase: Phase::Seeded,
        }
    }

    pub fn set_label(&mut self, label: impl Into<String>) {
        self.label = label.into();
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn objective(&self) -> ObjectiveTarget {
        self.objective
    }

    pub fn max_calculations(&self) -> usize {
        self.max_calculations
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn history(&self) -> &[Candidate] {
        &self.history
    }

    pub fn best(&self) -> Option<&Candidate> {
        self.best.as_ref()
    }

    /// Calculations left before the strategy is exhausted, counting the
    /// overshoot evaluation.
    pub fn remaining(&self) -> usize {
        (self.max_calculations + 1).saturating_sub(self.history.len())
    }

    /// Appends an evaluated candidate, updates the best result and returns the
    /// resulting phase.
    pub fn record(&mut self, candidate: Candidate) -> Result<Phase, StrategyError> {
        if self.phase == Phase::Exhausted {
            return Err(StrategyError::PostTerminalConsume {
                strategy: self.label.clone(),
                completed: self.history.len(),
                max_calculations: self.max_calculations,
            });
        }

        let improves = match &self.best {
            None => true,
            Some(current) => self.objective.better_candidate(&candidate, current),
        };
        if improves {
            self.best = Some(candidate.clone());
        }
        self.history.push(candidate);

        self.phase = if self.history.len() > self.max_calculations {
            debug!(
                strategy = %self.label,
                completed = self.history.len(),
                "strategy exhausted"
            );
            Phase::Exhausted
        } else {
            Phase::Running
        };
        Ok(self.phase)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn evaluated(x: f64, result: f64) -> Candidate {
        Candidate::new().with_parameter("X", x).with_result(result)
    }

    #[test]
    fn lifecycle_overshoots_budget_by_one() {
        let mut tracker = HistoryTracker::new("t", ObjectiveTarget::Minimize, 2);
        assert_eq!(tracker.phase(), Phase::Seeded);
        assert_eq!(tracker.remaining(), 3);

        assert_eq!(tracker.record(evaluated(1.0, 1.0)), Ok(Phase::Running));
        assert_eq!(tracker.record(evaluated(2.0, 4.0)), Ok(Phase::Running));
        assert_eq!(tracker.record(evaluated(0.5, 0.25)), Ok(Phase::Exhausted));
        assert_eq!(tracker.history().len(), 3);
        assert_eq!(tracker.remaining(), 0);
    }

    #[test]
    fn zero_budget_still_runs_once() {
        let mut tracker = HistoryTracker::new("t", ObjectiveTarget::Minimize, 0);
        assert_eq!(tracker.record(evaluated(1.0, 1.0)), Ok(Phase::Exhausted));
    }

    #[test]
    fn consume_after_exhaustion_is_rejected_without_side_effects() {
        let mut tracker = HistoryTracker::new("sa-0", ObjectiveTarget::Minimize, 0);
        tracker.record(evaluated(1.0, 1.0)).unwrap();

        let err = tracker.record(evaluated(0.0, 0.0)).unwrap_err();
        assert_eq!(
            err,
            StrategyError::PostTerminalConsume {
                strategy: "sa-0".to_string(),
                completed: 1,
                max_calculations: 0,
            }
        );
        assert_eq!(tracker.history().len(), 1);
        assert_eq!(tracker.best().and_then(Candidate::result), Some(1.0));
    }

    #[test]
    fn best_tracks_each_objective() {
        let results = [3.0, -1.0, 7.0, 2.5, -4.0];
        let cases = [
            (ObjectiveTarget::Minimize, -4.0),
            (ObjectiveTarget::Maximize, 7.0),
            (ObjectiveTarget::Approach(2.0), 2.5),
            (ObjectiveTarget::Diverge(2.0), -4.0),
        ];
        for (objective, expected) in cases {
            let mut tracker = HistoryTracker::new("t", objective, 10);
            for (i, r) in results.iter().enumerate() {
                tracker.record(evaluated(i as f64, *r)).unwrap();
            }
            assert_eq!(
                tracker.best().and_then(Candidate::result),
                Some(expected),
                "{objective:?}"
            );
        }
    }

    #[test]
    fn best_equals_rederived_maximum_of_history() {
        let objective = ObjectiveTarget::Approach(1.0);
        let mut tracker = HistoryTracker::new("t", objective, 50);
        for i in 0..40 {
            let x = ((i * 37) % 23) as f64 - 11.0;
            tracker.record(evaluated(x, x * 0.5)).unwrap();
            let rederived = objective.select_best(tracker.history());
            assert_eq!(tracker.best(), rederived);
        }
    }
}
