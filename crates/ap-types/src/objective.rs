//! Optimization objectives and the better-than relation they induce.

use serde::{Deserialize, Serialize};

use crate::candidate::Candidate;

/// What a strategy is optimizing for.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "target", rename_all = "snake_case")]
pub enum ObjectiveTarget {
    Minimize,
    Maximize,
    /// Get as close as possible to the target value.
    Approach(f64),
    /// Get as far as possible from the target value.
    Diverge(f64),
}

impl Default for ObjectiveTarget {
    fn default() -> Self {
        Self::Minimize
    }
}

impl ObjectiveTarget {
    /// Whether result `a` is strictly better than result `b`.
    pub fn better(&self, a: f64, b: f64) -> bool {
        match *self {
            Self::Minimize => a < b,
            Self::Maximize => a > b,
            Self::Approach(t) => (t - a).abs() < (t - b).abs(),
            Self::Diverge(t) => (t - a).abs() > (t - b).abs(),
        }
    }

    /// A result that loses every `better` comparison against a real result.
    ///
    /// Nothing diverges less from the target than the target itself, so
    /// `Diverge(t)` uses `t`.
    pub fn worst_sentinel(&self) -> f64 {
        match *self {
            Self::Minimize => f64::INFINITY,
            Self::Maximize => f64::NEG_INFINITY,
            Self::Approach(t) if t > 0.0 => f64::NEG_INFINITY,
            Self::Approach(_) => f64::INFINITY,
            Self::Diverge(t) => t,
        }
    }

    /// Candidate comparison; an unevaluated candidate counts as the sentinel.
    pub fn better_candidate(&self, a: &Candidate, b: &Candidate) -> bool {
        let sentinel = self.worst_sentinel();
        self.better(
            a.result().unwrap_or(sentinel),
            b.result().unwrap_or(sentinel),
        )
    }

    /// The `better`-maximal candidate; the earliest one wins ties.
    pub fn select_best<'a, I>(&self, candidates: I) -> Option<&'a Candidate>
    where
        I: IntoIterator<Item = &'a Candidate>,
    {
        candidates.into_iter().fold(None, |best, c| match best {
            Some(current) if !self.better_candidate(c, current) => Some(current),
            _ => Some(c),
        })
    }
}
