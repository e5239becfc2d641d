//! Search-domain definitions: named, closed numeric intervals.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::candidate::Candidate;
use crate::errors::ParameterError;

/// A single parameter dimension of the search domain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Boundary {
    /// Parameter name (e.g. "X").
    pub name: String,
    pub lower: f64,
    pub upper: f64,
}

impl Boundary {
    pub fn width(&self) -> f64 {
        self.upper - self.lower
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.lower && value <= self.upper
    }

    pub fn clamp(&self, value: f64) -> f64 {
        value.clamp(self.lower, self.upper)
    }
}

/// The full search domain: an ordered list of boundaries with unique names.
///
/// Built once before any strategy starts and read-only afterwards; strategies
/// share it behind an `Arc`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BoundarySet {
    boundaries: Vec<Boundary>,
}

impl BoundarySet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds the closed interval `[lower, upper]` for `name`.
    pub fn add_boundary(
        &mut self,
        lower: f64,
        upper: f64,
        name: impl Into<String>,
    ) -> Result<(), ParameterError> {
        let name = name.into();
        if !lower.is_finite() || !upper.is_finite() {
            return Err(ParameterError::InvalidRange {
                name,
                message: format!("bounds must be finite, got [{lower}, {upper}]"),
            });
        }
        if lower > upper {
            return Err(ParameterError::InvalidRange {
                name,
                message: format!("lower {lower} is greater than upper {upper}"),
            });
        }
        if !(upper - lower).is_finite() {
            return Err(ParameterError::InvalidRange {
                name,
                message: format!("width of [{lower}, {upper}] overflows"),
            });
        }
        if self.get(&name).is_some() {
            return Err(ParameterError::InvalidRange {
                name,
                message: "parameter already defined".to_string(),
            });
        }
        self.boundaries.push(Boundary { name, lower, upper });
        Ok(())
    }

    /// Chainable variant of [`add_boundary`](Self::add_boundary).
    pub fn with_boundary(
        mut self,
        lower: f64,
        upper: f64,
        name: impl Into<String>,
    ) -> Result<Self, ParameterError> {
        self.add_boundary(lower, upper, name)?;
        Ok(self)
    }

    pub fn get(&self, name: &str) -> Option<&Boundary> {
        self.boundaries.iter().find(|b| b.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Boundary> {
        self.boundaries.iter()
    }

    /// Parameter names in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.boundaries.iter().map(|b| b.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.boundaries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.boundaries.is_empty()
    }

    /// Draws a value uniformly from the closed interval of `name`.
    pub fn sample_uniform<R: Rng + ?Sized>(
        &self,
        name: &str,
        rng: &mut R,
    ) -> Result<f64, ParameterError> {
        let boundary = self.require(name)?;
        Ok(rng.gen_range(boundary.lower..=boundary.upper))
    }

    /// Draws every parameter uniformly, producing an unevaluated candidate.
    pub fn sample_candidate<R: Rng + ?Sized>(&self, rng: &mut R) -> Candidate {
        let mut candidate = Candidate::new();
        for boundary in &self.boundaries {
            candidate.set_parameter(
                boundary.name.clone(),
                rng.gen_range(boundary.lower..=boundary.upper),
            );
        }
        candidate
    }

    pub fn clamp(&self, name: &str, value: f64) -> Result<f64, ParameterError> {
        Ok(self.require(name)?.clamp(value))
    }

    /// Whether every boundary's parameter is present in `candidate` and
    /// inside its interval.
    pub fn contains(&self, candidate: &Candidate) -> bool {
        self.boundaries.iter().all(|b| {
            candidate
                .get_parameter(&b.name)
                .map(|v| b.contains(v))
                .unwrap_or(false)
        })
    }

    fn require(&self, name: &str) -> Result<&Boundary, ParameterError> {
        self.get(name).ok_or_else(|| ParameterError::UnknownParameter {
            name: name.to_string(),
        })
    }
}
