//! The objective-function capability the scheduler dispatches to.

use std::panic::{self, AssertUnwindSafe};

use ap_types::{Candidate, EvaluationError};

/// Turns a candidate's parameters into a numeric result.
///
/// Called concurrently from several worker threads, for distinct candidates
/// of distinct strategies. Implementations must either hold no shared
/// mutable state or synchronize it themselves.
pub trait Evaluator: Send + Sync {
    fn evaluate(&self, candidate: &Candidate) -> Result<f64, EvaluationError>;
}

/// Adapter turning a closure into an [`Evaluator`].
pub struct FnEvaluator<F>(F);

/// Wraps `f` as an evaluator.
///
/// ```
/// use ap_engine::{fn_evaluator, Evaluator};
/// use ap_types::Candidate;
///
/// let square = fn_evaluator(|c: &Candidate| Ok(c.get_parameter("X")?.powi(2)));
/// let c = Candidate::new().with_parameter("X", 3.0);
/// assert_eq!(square.evaluate(&c).unwrap(), 9.0);
/// ```
pub fn fn_evaluator<F>(f: F) -> FnEvaluator<F>
where
    F: Fn(&Candidate) -> Result<f64, EvaluationError> + Send + Sync,
{
    FnEvaluator(f)
}

impl<F> Evaluator for FnEvaluator<F>
where
    F: Fn(&Candidate) -> Result<f64, EvaluationError> + Send + Sync,
{
    fn evaluate(&self, candidate: &Candidate) -> Result<f64, EvaluationError> {
        (self.0)(candidate)
    }
}

/// Runs the evaluator, folding a NaN result or a panic into an error so a
/// misbehaving objective never takes its worker down.
pub(crate) fn evaluate_guarded(
    evaluator: &dyn Evaluator,
    candidate: &Candidate,
) -> Result<f64, EvaluationError> {
    match panic::catch_unwind(AssertUnwindSafe(|| evaluator.evaluate(candidate))) {
        Ok(Ok(value)) if value.is_nan() => Err(EvaluationError::new("evaluator returned NaN")),
        Ok(result) => result,
        Err(_) => Err(EvaluationError::new("evaluator panicked")),
    }
}
