//! Optimizer trait and the trace returned by every run.
//!
//! The optimizers in this workspace are teaching tools: besides the final
//! point, they hand back every iterate they visited so that a plotting layer
//! can replay the descent path. [`OptimizationTrace`] carries that history
//! together with the reason the run stopped and evaluation statistics.
//!
//! # Invariants
//!
//! - `iterates[0]` is the coerced initial point
//! - every iterate has the dimension of `iterates[0]`
//! - `iterates.len() == 1 + steps actually taken`

use crate::core::{
    error::{OptimizerResult, Result},
    objective::Objective,
    point::IntoPoint,
    types::{DVector, Scalar},
};
use std::fmt::Debug;
use std::time::Duration;

/// Why a run stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TerminationReason {
    /// The configured iteration budget was used up
    MaxIterations,
    /// Newton's method produced a candidate with a larger objective value;
    /// the candidate was discarded and the run stopped
    Diverged,
}

/// Iterate history and metadata of one optimization run.
#[derive(Debug, Clone)]
pub struct OptimizationTrace<T>
where
    T: Scalar,
{
    /// Every iterate, starting with the initial point
    pub iterates: Vec<DVector<T>>,

    /// Reason the run stopped
    pub termination_reason: TerminationReason,

    /// Objective value at the discarded candidate, when the run diverged
    pub rejected_value: Option<T>,

    /// Total number of objective evaluations f(w)
    pub function_evaluations: usize,

    /// Total number of gradient evaluations
    pub gradient_evaluations: usize,

    /// Total number of Hessian evaluations
    pub hessian_evaluations: usize,

    /// Wall-clock time spent in the run
    pub duration: Duration,
}

impl<T> OptimizationTrace<T>
where
    T: Scalar,
{
    /// Starts a trace at `initial_point`.
    pub fn new(initial_point: DVector<T>) -> Self {
        Self {
            iterates: vec![initial_point],
            termination_reason: TerminationReason::MaxIterations,
            rejected_value: None,
            function_evaluations: 0,
            gradient_evaluations: 0,
            hessian_evaluations: 0,
            duration: Duration::ZERO,
        }
    }

    /// Appends the iterate produced by one update step.
    pub fn record(&mut self, iterate: DVector<T>) {
        debug_assert_eq!(iterate.len(), self.dimension());
        self.iterates.push(iterate);
    }

    /// Marks the run as diverged at a candidate with objective `value`.
    pub fn mark_diverged(&mut self, value: T) {
        self.termination_reason = TerminationReason::Diverged;
        self.rejected_value = Some(value);
    }

    /// Problem dimension n.
    pub fn dimension(&self) -> usize {
        self.iterates[0].len()
    }

    /// The caller-supplied starting point.
    pub fn initial_point(&self) -> &DVector<T> {
        &self.iterates[0]
    }

    /// The last accepted iterate.
    pub fn final_point(&self) -> &DVector<T> {
        // A trace is never empty: it is created with the initial point.
        &self.iterates[self.iterates.len() - 1]
    }

    /// Number of update steps actually taken.
    pub fn steps_taken(&self) -> usize {
        self.iterates.len() - 1
    }

    /// Length of the iterate history (steps taken + 1).
    pub fn len(&self) -> usize {
        self.iterates.len()
    }

    /// Always false; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.iterates.is_empty()
    }

    /// True if Newton's method stopped on a diverging step.
    pub fn diverged(&self) -> bool {
        self.termination_reason == TerminationReason::Diverged
    }

    /// Iterates the recorded history.
    pub fn iter(&self) -> std::slice::Iter<'_, DVector<T>> {
        self.iterates.iter()
    }

    /// Consumes the trace, returning the iterate history.
    pub fn into_iterates(self) -> Vec<DVector<T>> {
        self.iterates
    }

    /// Objective value at every recorded iterate.
    ///
    /// This is what cost-history plots consume.
    pub fn cost_history<O>(&self, objective: &O) -> Result<Vec<T>>
    where
        O: Objective<T> + ?Sized,
    {
        self.iterates.iter().map(|w| objective.value(w)).collect()
    }
}

impl<'a, T> IntoIterator for &'a OptimizationTrace<T>
where
    T: Scalar,
{
    type Item = &'a DVector<T>;
    type IntoIter = std::slice::Iter<'a, DVector<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iterates.iter()
    }
}

/// Common interface of the descent algorithms.
///
/// `optimize` takes `&self`: an optimizer is an immutable configuration and
/// every run owns its iterate buffer, history and random state, so a single
/// optimizer may be shared between threads.
pub trait Optimizer<T>: Debug
where
    T: Scalar,
{
    /// Human-readable algorithm name, used in logs.
    fn name(&self) -> &str;

    /// Minimizes `objective` from `initial_point`, recording every iterate.
    ///
    /// # Errors
    ///
    /// - invalid configuration or initial point
    /// - gradient/Hessian shapes inconsistent with the iterate
    /// - objective evaluation failures
    fn optimize<O, P>(&self, objective: &O, initial_point: P) -> OptimizerResult<OptimizationTrace<T>>
    where
        O: Objective<T> + ?Sized,
        P: IntoPoint<T>;
}
