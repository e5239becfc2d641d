//! Strategy configuration.

use ap_types::{ObjectiveTarget, StrategyError};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Configuration for a simulated-annealing strategy.
///
/// # Examples
///
/// ```
/// use ap_optimizer::AnnealingConfig;
/// use ap_types::ObjectiveTarget;
///
/// let config = AnnealingConfig::new(300, ObjectiveTarget::Minimize)
///     .with_cooling_factor(0.9)
///     .with_start_chance(0.25)
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnealingConfig {
    /// Nominal calculation budget. The strategy is exhausted once its
    /// history holds more than this many results, so it evaluates
    /// `max_calculations + 1` candidates in total.
    pub max_calculations: usize,

    pub objective: ObjectiveTarget,

    /// Temperature multiplier applied after every completed evaluation,
    /// in (0, 1). Higher = slower cooling.
    pub cooling_factor: f64,

    /// Probability of following a worse candidate while the temperature is
    /// still 1.0.
    pub start_chance: f64,

    /// Random seed for reproducibility.
    pub seed: Option<u64>,
}

impl Default for AnnealingConfig {
    fn default() -> Self {
        Self {
            max_calculations: 100,
            objective: ObjectiveTarget::Minimize,
            cooling_factor: 0.995,
            start_chance: 0.25,
            seed: None,
        }
    }
}

impl AnnealingConfig {
    pub fn new(max_calculations: usize, objective: ObjectiveTarget) -> Self {
        Self {
            max_calculations,
            objective,
            ..Self::default()
        }
    }

    pub fn with_cooling_factor(mut self, factor: f64) -> Self {
        self.cooling_factor = factor;
        self
    }

    pub fn with_start_chance(mut self, chance: f64) -> Self {
        self.start_chance = chance;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn validate(&self) -> Result<(), StrategyError> {
        if !(self.cooling_factor > 0.0 && self.cooling_factor < 1.0) {
            return Err(invalid(format!(
                "cooling_factor must be in (0, 1), got {}",
                self.cooling_factor
            )));
        }
        if !(0.0..=1.0).contains(&self.start_chance) {
            return Err(invalid(format!(
                "start_chance must be in [0, 1], got {}",
                self.start_chance
            )));
        }
        validate_objective(&self.objective)
    }
}

/// Configuration for a uniform random-search strategy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RandomSearchConfig {
    pub max_calculations: usize,
    pub objective: ObjectiveTarget,
    pub seed: Option<u64>,
}

impl Default for RandomSearchConfig {
    fn default() -> Self {
        Self {
            max_calculations: 100,
            objective: ObjectiveTarget::Minimize,
            seed: None,
        }
    }
}

impl RandomSearchConfig {
    pub fn new(max_calculations: usize, objective: ObjectiveTarget) -> Self {
        Self {
            max_calculations,
            objective,
            seed: None,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn validate(&self) -> Result<(), StrategyError> {
        validate_objective(&self.objective)
    }
}

fn validate_objective(objective: &ObjectiveTarget) -> Result<(), StrategyError> {
    match objective {
        ObjectiveTarget::Approach(t) | ObjectiveTarget::Diverge(t) if !t.is_finite() => {
            Err(invalid(format!("objective target must be finite, got {t}")))
        }
        _ => Ok(()),
    }
}

fn invalid(message: String) -> StrategyError {
    StrategyError::InvalidConfig { message }
}

/// Seeded generator, or an entropy-seeded one when no seed is configured.
pub(crate) fn create_rng(seed: Option<u64>) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed.unwrap_or_else(rand::random))
}
