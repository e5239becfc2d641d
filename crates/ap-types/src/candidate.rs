//! Candidate parameter assignments and their evaluation results.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::ParameterError;

/// Column separator used by the header/values formatting.
pub const FIELD_SEPARATOR: char = '\t';

/// One proposed parameter assignment plus, once evaluated, its result.
///
/// Parameters keep the order in which they were inserted, which for sampled
/// candidates is the order of the originating [`BoundarySet`](crate::BoundarySet).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Candidate {
    parameters: Vec<(String, f64)>,
    result: Option<f64>,
}

impl Candidate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert. Re-inserting a name overwrites its value in place.
    pub fn with_parameter(mut self, name: impl Into<String>, value: f64) -> Self {
        self.set_parameter(name, value);
        self
    }

    /// Consumes the unevaluated candidate and returns the evaluated one.
    /// A candidate is evaluated at most once.
    pub fn with_result(mut self, result: f64) -> Self {
        debug_assert!(
            self.result.is_none(),
            "candidate {} already carries a result",
            self
        );
        self.result = Some(result);
        self
    }

    pub(crate) fn set_parameter(&mut self, name: impl Into<String>, value: f64) {
        let name = name.into();
        match self.parameters.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = value,
            None => self.parameters.push((name, value)),
        }
    }

    pub fn get_parameter(&self, name: &str) -> Result<f64, ParameterError> {
        self.parameters
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| *v)
            .ok_or_else(|| ParameterError::UnknownParameter {
                name: name.to_string(),
            })
    }

    pub fn parameters(&self) -> impl Iterator<Item = (&str, f64)> {
        self.parameters.iter().map(|(n, v)| (n.as_str(), *v))
    }

    pub fn len(&self) -> usize {
        self.parameters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parameters.is_empty()
    }

    pub fn result(&self) -> Option<f64> {
        self.result
    }

    pub fn is_evaluated(&self) -> bool {
        self.result.is_some()
    }

    /// Parameter names in order followed by `result`.
    pub fn to_string_header(&self) -> String {
        let mut fields: Vec<&str> = self.parameters.iter().map(|(n, _)| n.as_str()).collect();
        fields.push("result");
        fields.join(&FIELD_SEPARATOR.to_string())
    }

    /// Parameter values in header order followed by the result (empty when
    /// not yet evaluated).
    pub fn to_string_values(&self) -> String {
        let mut fields: Vec<String> = self.parameters.iter().map(|(_, v)| v.to_string()).collect();
        fields.push(self.result.map(|r| r.to_string()).unwrap_or_default());
        fields.join(&FIELD_SEPARATOR.to_string())
    }
}

impl fmt::Display for Candidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let params: Vec<String> = self
            .parameters
            .iter()
            .map(|(n, v)| format!("{n}={v}"))
            .collect();
        match self.result {
            Some(r) => write!(f, "[{}] -> {r}", params.join(", ")),
            None => write!(f, "[{}] -> pending", params.join(", ")),
        }
    }
}
