//! Damped Newton's method with a recorded iterate history.
//!
//! Each iteration solves the damped Newton system through the Moore–Penrose
//! pseudo-inverse,
//!
//! w_{k+1} = w_k − (∇²f(w_k) + εI)⁺ ∇f(w_k)
//!
//! The damping ε keeps the system well posed when the Hessian is singular and
//! the pseudo-inverse returns the least-norm solution when it is still not.
//!
//! # Divergence
//!
//! If a candidate has a larger objective value than the last accepted iterate,
//! the local quadratic model is no longer trusted: the candidate is discarded,
//! the run stops, and the trace reports [`TerminationReason::Diverged`] with
//! the rejected objective value.
//!
//! [`TerminationReason::Diverged`]: gradlab_core::optimizer::TerminationReason::Diverged

use crate::utils::pseudo_inverse_solve;
use gradlab_core::{
    error::{OptimizerError, OptimizerResult},
    objective::Objective,
    optimizer::{OptimizationTrace, Optimizer},
    point::{ensure_gradient_shape, ensure_hessian_shape, IntoPoint},
    types::Scalar,
};
use num_traits::Float;
use std::time::Instant;

/// Configuration for Newton's method.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default, deny_unknown_fields)
)]
pub struct NewtonConfig<T>
where
    T: Scalar,
{
    /// Maximum number of Newton steps
    pub max_iterations: usize,

    /// Ridge term ε added to the Hessian diagonal before inversion
    pub damping_epsilon: T,
}

impl<T> Default for NewtonConfig<T>
where
    T: Scalar,
{
    fn default() -> Self {
        Self {
            max_iterations: 20,
            damping_epsilon: <T as Scalar>::from_f64(1e-5),
        }
    }
}

impl<T> NewtonConfig<T>
where
    T: Scalar,
{
    /// Creates a configuration with the default parameters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the maximum number of Newton steps.
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Sets the Hessian damping.
    pub fn with_damping(mut self, damping_epsilon: T) -> Self {
        self.damping_epsilon = damping_epsilon;
        self
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns `OptimizerError::InvalidConfiguration` if `max_iterations` is
    /// zero or `damping_epsilon` is negative or non-finite.
    pub fn validate(&self) -> OptimizerResult<()> {
        if self.max_iterations == 0 {
            return Err(OptimizerError::invalid_configuration(
                "Iteration count must be positive",
                "max_iterations",
                "0",
            ));
        }

        if !(self.damping_epsilon >= T::zero()) || !Float::is_finite(self.damping_epsilon) {
            return Err(OptimizerError::invalid_configuration(
                "Damping must be non-negative and finite",
                "damping_epsilon",
                self.damping_epsilon.to_string(),
            ));
        }

        Ok(())
    }
}

/// Damped Newton's method.
///
/// # Examples
///
/// ```rust
/// use gradlab_core::prelude::*;
/// use gradlab_optim::{Newton, NewtonConfig};
///
/// let a = DMatrix::from_row_slice(2, 2, &[3.0, 1.0, 1.0, 2.0]);
/// let cost = QuadraticCost::new(a, DVector::from_vec(vec![1.0, -1.0]), 0.0);
///
/// let trace = Newton::new(NewtonConfig::new().with_max_iterations(5)).optimize(&cost, [4.0, 4.0])?;
/// let gradient = cost.gradient(trace.final_point())?;
/// assert!(gradient.norm() < 1e-6);
/// # Ok::<(), OptimizerError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Newton<T>
where
    T: Scalar,
{
    config: NewtonConfig<T>,
}

impl<T> Newton<T>
where
    T: Scalar,
{
    /// Creates a Newton optimizer with the given configuration.
    pub fn new(config: NewtonConfig<T>) -> Self {
        Self { config }
    }

    /// Returns the optimizer configuration.
    pub fn config(&self) -> &NewtonConfig<T> {
        &self.config
    }
}

impl<T> Default for Newton<T>
where
    T: Scalar,
{
    fn default() -> Self {
        Self::new(NewtonConfig::default())
    }
}

impl<T> Optimizer<T> for Newton<T>
where
    T: Scalar,
{
    fn name(&self) -> &str {
        "Newton"
    }

    fn optimize<O, P>(&self, objective: &O, initial_point: P) -> OptimizerResult<OptimizationTrace<T>>
    where
        O: Objective<T> + ?Sized,
        P: IntoPoint<T>,
    {
        self.config.validate()?;
        let start_time = Instant::now();

        let mut w = initial_point.into_point()?;
        let n = w.len();
        let mut trace = OptimizationTrace::new(w.clone());

        log::info!(
            "{}: starting optimization (n = {}, max_iterations = {}, damping = {})",
            self.name(),
            n,
            self.config.max_iterations,
            self.config.damping_epsilon
        );

        let mut previous_value = objective.value(&w)?;
        trace.function_evaluations += 1;

        for k in 0..self.config.max_iterations {
            let gradient = objective.gradient(&w)?;
            trace.gradient_evaluations += 1;
            ensure_gradient_shape(n, &gradient)?;

            let mut hessian = objective.hessian(&w)?;
            trace.hessian_evaluations += 1;
            ensure_hessian_shape(n, &hessian)?;

            for i in 0..n {
                hessian[(i, i)] += self.config.damping_epsilon;
            }
            let step = pseudo_inverse_solve(hessian, &gradient)?;
            let candidate = &w - step;

            let value = objective.value(&candidate)?;
            trace.function_evaluations += 1;

            if value > previous_value {
                log::warn!(
                    "{}: singular system reached at iteration {} (f = {} > {}), stopping",
                    self.name(),
                    k + 1,
                    value,
                    previous_value
                );
                trace.mark_diverged(value);
                break;
            }

            log::debug!(
                "{}: iteration {}, f = {}, |g| = {}",
                self.name(),
                k + 1,
                value,
                gradient.norm()
            );
            previous_value = value;
            w = candidate;
            trace.record(w.clone());
        }

        trace.duration = start_time.elapsed();
        log::info!(
            "{}: optimization finished after {} steps ({:?}) in {:?}",
            self.name(),
            trace.steps_taken(),
            trace.termination_reason,
            trace.duration
        );

        Ok(trace)
    }
}

/// Runs Newton's method from `initial_point` and returns the full trace.
///
/// Shorthand for `Newton::new(config).optimize(objective, initial_point)`.
pub fn run_newtons_method<T, O, P>(
    objective: &O,
    initial_point: P,
    config: NewtonConfig<T>,
) -> OptimizerResult<OptimizationTrace<T>>
where
    T: Scalar,
    O: Objective<T> + ?Sized,
    P: IntoPoint<T>,
{
    Newton::new(config).optimize(objective, initial_point)
}
