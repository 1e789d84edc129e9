//! Step-length rules for gradient descent.
//!
//! A rule decides the multiplier αₖ applied to the descent direction at
//! iteration k:
//!
//! - **Fixed**: αₖ = α, the configured step size. This is the default.
//! - **Backtracking**: αₖ is chosen by [`backtracking_line_search`] at the
//!   current iterate along the current direction.
//! - **Diminishing**: αₖ = 1 / (k + 1), independent of the configured value.
//!
//! Diminishing steps satisfy Σ αₖ = ∞ and Σ αₖ² < ∞, the classical
//! conditions for convergence of subgradient-type methods.

use crate::core::{
    error::OptimizerResult,
    objective::Objective,
    types::{DVector, Scalar},
};
use crate::optimization::line_search::{backtracking_line_search, BacktrackingParams};

/// A chosen step length together with the objective evaluations spent on it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepLength<T>
where
    T: Scalar,
{
    /// The multiplier αₖ
    pub step_size: T,

    /// Objective evaluations performed to choose it (zero unless backtracking)
    pub function_evals: usize,
}

/// Rule used to pick the step length at each gradient descent iteration.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum StepLengthRule<T>
where
    T: Scalar,
{
    /// Use the configured step size at every iteration
    #[default]
    Fixed,

    /// Run a backtracking line search at every iteration
    Backtracking(BacktrackingParams<T>),

    /// Use αₖ = 1 / (k + 1)
    Diminishing,
}

impl<T> StepLengthRule<T>
where
    T: Scalar,
{
    /// Backtracking with the default parameters (α₀ = 1, ρ = 0.8, c = 0.5).
    pub fn backtracking() -> Self {
        Self::Backtracking(BacktrackingParams::default())
    }

    /// Returns the step length for `iteration` (0-based).
    ///
    /// # Arguments
    ///
    /// * `fixed_step` - The configured constant step size
    /// * `iteration` - Index of the step being taken
    /// * `objective` - Objective, consulted only by backtracking
    /// * `w` - Current iterate
    /// * `direction` - Direction the step is taken against
    pub fn step_length<O>(
        &self,
        fixed_step: T,
        iteration: usize,
        objective: &O,
        w: &DVector<T>,
        direction: &DVector<T>,
    ) -> OptimizerResult<StepLength<T>>
    where
        O: Objective<T> + ?Sized,
    {
        let step_length = match self {
            Self::Fixed => StepLength {
                step_size: fixed_step,
                function_evals: 0,
            },
            Self::Backtracking(params) => {
                let search = backtracking_line_search(objective, w, direction, params)?;
                StepLength {
                    step_size: search.step_size,
                    function_evals: search.function_evals,
                }
            }
            Self::Diminishing => StepLength {
                step_size: T::one() / <T as Scalar>::from_usize(iteration + 1),
                function_evals: 0,
            },
        };
        Ok(step_length)
    }

    /// Short name used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Fixed => "fixed",
            Self::Backtracking(_) => "backtracking",
            Self::Diminishing => "diminishing",
        }
    }
}
