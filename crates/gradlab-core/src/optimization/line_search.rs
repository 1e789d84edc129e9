//! Backtracking line search.
//!
//! Given an iterate w, the gradient g evaluated there and an objective f,
//! backtracking starts from a trial step α₀ and shrinks it geometrically,
//! α ← ρα, until the sufficient decrease condition
//!
//! f(w − α g) ≤ f(w) − c · α · ‖g‖²
//!
//! holds. With the classroom defaults (α₀ = 1, ρ = 0.8, c = 0.5) this is the
//! rule used to pick gradient descent step lengths.
//!
//! The search is bounded: after `max_shrinks` reductions without an accepted
//! step it fails with [`OptimizerError::LineSearchFailed`]. Everything the
//! search needs is passed in; there is no shared state between calls.
//!
//! # Examples
//!
//! ```rust
//! # use gradlab_core::prelude::*;
//! let cost = QuadraticCost::<f64>::simple(2);
//! let w = DVector::from_vec(vec![1.0, -2.0]);
//! let grad = cost.gradient(&w)?;
//!
//! let result = backtracking_line_search(&cost, &w, &grad, &BacktrackingParams::default())?;
//! assert!(result.step_size > 0.0);
//! # Ok::<(), OptimizerError>(())
//! ```

use crate::core::{
    error::{OptimizerError, OptimizerResult},
    objective::Objective,
    types::{DVector, Scalar},
};
use num_traits::Float;

/// Outcome of a successful backtracking search.
#[derive(Debug, Clone, PartialEq)]
pub struct LineSearchResult<T>
where
    T: Scalar,
{
    /// The accepted step size α
    pub step_size: T,

    /// The objective value f(w − α g) at the accepted step
    pub new_value: T,

    /// Number of times the trial step was shrunk before acceptance
    pub shrinks: usize,

    /// Total number of objective evaluations, including f(w)
    pub function_evals: usize,
}

/// Parameters of the backtracking rule.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default, deny_unknown_fields)
)]
pub struct BacktrackingParams<T>
where
    T: Scalar,
{
    /// Initial trial step α₀
    pub initial_step_size: T,

    /// Shrink factor ρ ∈ (0, 1): α ← ρα when the condition fails
    pub rho: T,

    /// Sufficient decrease coefficient c > 0
    pub c: T,

    /// Maximum number of shrinks before the search is declared failed
    pub max_shrinks: usize,
}

impl<T> Default for BacktrackingParams<T>
where
    T: Scalar,
{
    fn default() -> Self {
        Self {
            initial_step_size: T::one(),
            rho: <T as Scalar>::from_f64(0.8),
            c: <T as Scalar>::from_f64(0.5),
            max_shrinks: 50,
        }
    }
}

impl<T> BacktrackingParams<T>
where
    T: Scalar,
{
    /// Creates the default parameters (α₀ = 1, ρ = 0.8, c = 0.5, 50 shrinks).
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the initial trial step.
    pub fn with_initial_step_size(mut self, step_size: T) -> Self {
        self.initial_step_size = step_size;
        self
    }

    /// Sets the shrink factor.
    pub fn with_rho(mut self, rho: T) -> Self {
        self.rho = rho;
        self
    }

    /// Sets the sufficient decrease coefficient.
    pub fn with_c(mut self, c: T) -> Self {
        self.c = c;
        self
    }

    /// Sets the shrink budget.
    pub fn with_max_shrinks(mut self, max_shrinks: usize) -> Self {
        self.max_shrinks = max_shrinks;
        self
    }

    /// Validates the parameters.
    ///
    /// # Errors
    ///
    /// Returns `OptimizerError::InvalidConfiguration` if:
    /// - the initial step is not positive and finite
    /// - ρ ∉ (0, 1)
    /// - c is not positive and finite
    pub fn validate(&self) -> OptimizerResult<()> {
        if !(self.initial_step_size > T::zero()) || !Float::is_finite(self.initial_step_size) {
            return Err(OptimizerError::invalid_configuration(
                "Initial step size must be positive and finite",
                "initial_step_size",
                self.initial_step_size.to_string(),
            ));
        }

        if !(self.rho > T::zero() && self.rho < T::one()) {
            return Err(OptimizerError::invalid_configuration(
                "Backtracking factor rho must be in (0, 1)",
                "rho",
                self.rho.to_string(),
            ));
        }

        if !(self.c > T::zero()) || !Float::is_finite(self.c) {
            return Err(OptimizerError::invalid_configuration(
                "Sufficient decrease coefficient must be positive and finite",
                "c",
                self.c.to_string(),
            ));
        }

        Ok(())
    }
}

/// Finds a step α along −`grad_eval` satisfying sufficient decrease.
///
/// # Arguments
///
/// * `objective` - The objective f
/// * `w` - Current iterate
/// * `grad_eval` - Direction to step against (the gradient, possibly normalized)
/// * `params` - Backtracking parameters
///
/// # Errors
///
/// - `InvalidConfiguration` if `params` fail validation
/// - `LineSearchFailed` after `params.max_shrinks` unsuccessful shrinks
/// - any objective evaluation error
pub fn backtracking_line_search<T, O>(
    objective: &O,
    w: &DVector<T>,
    grad_eval: &DVector<T>,
    params: &BacktrackingParams<T>,
) -> OptimizerResult<LineSearchResult<T>>
where
    T: Scalar,
    O: Objective<T> + ?Sized,
{
    params.validate()?;

    let initial_value = objective.value(w)?;
    let grad_norm_sq = grad_eval.norm_squared();
    let mut function_evals = 1;
    let mut step_size = params.initial_step_size;

    for shrinks in 0..=params.max_shrinks {
        let trial = w - grad_eval * step_size;
        let new_value = objective.value(&trial)?;
        function_evals += 1;

        if new_value <= initial_value - params.c * step_size * grad_norm_sq {
            log::trace!(
                "backtracking accepted step {} after {} shrinks",
                step_size,
                shrinks
            );
            return Ok(LineSearchResult {
                step_size,
                new_value,
                shrinks,
                function_evals,
            });
        }

        if shrinks < params.max_shrinks {
            step_size = step_size * params.rho;
        }
    }

    Err(OptimizerError::line_search_failed(
        format!(
            "sufficient decrease not reached after {} shrinks",
            params.max_shrinks
        ),
        params.max_shrinks + 1,
        <T as Scalar>::to_f64(step_size),
        <T as Scalar>::to_f64(initial_value),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::objective::{FnObjective, QuadraticCost};
    use approx::assert_relative_eq;

    #[test]
    fn test_default_params() {
        let params = BacktrackingParams::<f64>::default();
        assert_eq!(params.initial_step_size, 1.0);
        assert_eq!(params.rho, 0.8);
        assert_eq!(params.c, 0.5);
        assert_eq!(params.max_shrinks, 50);
        assert!(params.validate().is_ok());
    }

    #[test]
    fn test_params_validation() {
        assert!(BacktrackingParams::<f64>::new().with_rho(1.0).validate().is_err());
        assert!(BacktrackingParams::<f64>::new().with_rho(0.0).validate().is_err());
        assert!(BacktrackingParams::<f64>::new().with_c(-0.5).validate().is_err());
        assert!(BacktrackingParams::<f64>::new()
            .with_initial_step_size(f64::NAN)
            .validate()
            .is_err());
    }

    #[test]
    fn test_full_step_accepted_when_sufficient() {
        // f(x) = 0.5 ||x||^2, g = x: the unit step lands on the minimizer.
        let cost = QuadraticCost::<f64>::simple(2);
        let w = DVector::from_vec(vec![3.0, -4.0]);
        let grad = cost.gradient(&w).unwrap();

        let result = backtracking_line_search(&cost, &w, &grad, &BacktrackingParams::default())
            .unwrap();

        assert_eq!(result.step_size, 1.0);
        assert_eq!(result.shrinks, 0);
        assert_eq!(result.function_evals, 2);
        assert_relative_eq!(result.new_value, 0.0);
    }

    #[test]
    fn test_step_shrinks_on_steep_objective() {
        // f(w) = 10 w^2 at w = 1: g = 20, unit step overshoots badly.
        let cost = FnObjective::new(|w: &DVector<f64>| 10.0 * w[0] * w[0]);
        let w = DVector::from_element(1, 1.0);
        let grad = DVector::from_element(1, 20.0);

        let result =
            backtracking_line_search(&cost, &w, &grad, &BacktrackingParams::default()).unwrap();

        assert!(result.shrinks > 0);
        let f0 = cost.value(&w).unwrap();
        let fa = cost.value(&(&w - &grad * result.step_size)).unwrap();
        assert!(fa <= f0 - result.step_size * 0.5 * 400.0);
        // The previous, larger trial must have failed.
        let previous = result.step_size / 0.8;
        let fp = cost.value(&(&w - &grad * previous)).unwrap();
        assert!(fp > f0 - previous * 0.5 * 400.0);
    }

    #[test]
    fn test_fails_after_shrink_budget() {
        // Moving along +g on an increasing function never decreases.
        let cost = FnObjective::new(|w: &DVector<f64>| w[0]);
        let w = DVector::from_element(1, 0.0);
        let wrong_direction = DVector::from_element(1, -1.0);

        let params = BacktrackingParams::default().with_max_shrinks(10);
        let err = backtracking_line_search(&cost, &w, &wrong_direction, &params).unwrap_err();

        match err {
            OptimizerError::LineSearchFailed {
                iterations,
                last_step_size,
                ..
            } => {
                assert_eq!(iterations, 11);
                assert_relative_eq!(last_step_size, 0.8_f64.powi(10), epsilon = 1e-12);
            }
            other => panic!("Expected LineSearchFailed, got {other:?}"),
        }
    }
}
