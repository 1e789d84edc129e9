//! Gradient descent with a recorded iterate history.
//!
//! Starting from w₀, each iteration evaluates the gradient, optionally scales
//! it to unit length, and steps against it:
//!
//! w_{k+1} = w_k − α_k d_k
//!
//! where d_k is the raw or normalized gradient and α_k comes from the
//! configured [`StepLengthRule`]. There is no early stopping: a run always
//! takes `max_iterations` steps, so the history has `max_iterations + 1`
//! entries.
//!
//! # Normalized descent at a stationary point
//!
//! With `normalize` set, a gradient of norm exactly zero is divided by a
//! signed ±1e-6 instead of zero. The sign is drawn from a run-local RNG,
//! seeded from `seed` when given.

use gradlab_core::{
    error::{OptimizerError, OptimizerResult},
    objective::Objective,
    optimizer::{OptimizationTrace, Optimizer},
    point::{ensure_gradient_shape, IntoPoint},
    step_size::StepLengthRule,
    types::{DVector, Scalar},
};
use num_traits::Float;
use rand::{rngs::SmallRng, Rng, SeedableRng};
use std::time::Instant;

/// Configuration for gradient descent.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default, deny_unknown_fields)
)]
pub struct GradientDescentConfig<T>
where
    T: Scalar,
{
    /// Number of update steps to take
    pub max_iterations: usize,

    /// Constant step size used by the `Fixed` rule
    pub step_size: T,

    /// Step along the unit-norm gradient instead of the raw gradient
    pub normalize: bool,

    /// How the step length is chosen at each iteration
    pub step_length_rule: StepLengthRule<T>,

    /// Seed for the zero-norm perturbation sign; entropy-seeded when `None`
    pub seed: Option<u64>,
}

impl<T> Default for GradientDescentConfig<T>
where
    T: Scalar,
{
    fn default() -> Self {
        Self {
            max_iterations: 100,
            step_size: <T as Scalar>::from_f64(1e-4),
            normalize: false,
            step_length_rule: StepLengthRule::Fixed,
            seed: None,
        }
    }
}

impl<T> GradientDescentConfig<T>
where
    T: Scalar,
{
    /// Creates a configuration with the default parameters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the number of update steps.
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Sets the constant step size.
    pub fn with_step_size(mut self, step_size: T) -> Self {
        self.step_size = step_size;
        self
    }

    /// Enables or disables gradient normalization.
    pub fn with_normalize(mut self, normalize: bool) -> Self {
        self.normalize = normalize;
        self
    }

    /// Sets the step-length rule.
    pub fn with_step_length_rule(mut self, rule: StepLengthRule<T>) -> Self {
        self.step_length_rule = rule;
        self
    }

    /// Seeds the perturbation RNG for reproducible runs.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns `OptimizerError::InvalidConfiguration` if:
    /// - `max_iterations` is zero
    /// - `step_size` is not positive and finite
    /// - the backtracking parameters are invalid
    pub fn validate(&self) -> OptimizerResult<()> {
        if self.max_iterations == 0 {
            return Err(OptimizerError::invalid_configuration(
                "Iteration count must be positive",
                "max_iterations",
                "0",
            ));
        }

        if !(self.step_size > T::zero()) || !Float::is_finite(self.step_size) {
            return Err(OptimizerError::invalid_configuration(
                "Step size must be positive and finite",
                "step_size",
                self.step_size.to_string(),
            ));
        }

        if let StepLengthRule::Backtracking(params) = &self.step_length_rule {
            params.validate()?;
        }

        Ok(())
    }
}

/// Gradient descent optimizer.
///
/// # Examples
///
/// ```rust
/// use gradlab_core::prelude::*;
/// use gradlab_optim::{GradientDescent, GradientDescentConfig};
///
/// // f(w) = 0.5 * ||w||^2
/// let cost = QuadraticCost::<f64>::simple(2);
/// let gd = GradientDescent::new(
///     GradientDescentConfig::new()
///         .with_max_iterations(50)
///         .with_step_size(0.1),
/// );
///
/// let trace = gd.optimize(&cost, [3.0, -1.0])?;
/// assert_eq!(trace.len(), 51);
/// assert!(trace.final_point().norm() < 0.1);
/// # Ok::<(), OptimizerError>(())
/// ```
#[derive(Debug, Clone)]
pub struct GradientDescent<T>
where
    T: Scalar,
{
    config: GradientDescentConfig<T>,
}

impl<T> GradientDescent<T>
where
    T: Scalar,
{
    /// Creates a gradient descent optimizer with the given configuration.
    pub fn new(config: GradientDescentConfig<T>) -> Self {
        Self { config }
    }

    /// Returns the optimizer configuration.
    pub fn config(&self) -> &GradientDescentConfig<T> {
        &self.config
    }
}

impl<T> Default for GradientDescent<T>
where
    T: Scalar,
{
    fn default() -> Self {
        Self::new(GradientDescentConfig::default())
    }
}

impl<T> Optimizer<T> for GradientDescent<T>
where
    T: Scalar,
{
    fn name(&self) -> &str {
        "Gradient Descent"
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
        let mut rng = match self.config.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_entropy(),
        };

        let mut trace = OptimizationTrace::new(w.clone());

        log::info!(
            "{}: starting optimization (n = {}, max_iterations = {}, step rule = {}, normalize = {})",
            self.name(),
            n,
            self.config.max_iterations,
            self.config.step_length_rule.name(),
            self.config.normalize
        );

        for k in 0..self.config.max_iterations {
            let mut direction = objective.gradient(&w)?;
            trace.gradient_evaluations += 1;
            ensure_gradient_shape(n, &direction)?;

            if self.config.normalize {
                normalize_direction(&mut direction, &mut rng);
            }

            let step = self.config.step_length_rule.step_length(
                self.config.step_size,
                k,
                objective,
                &w,
                &direction,
            )?;
            trace.function_evaluations += step.function_evals;
            let alpha = step.step_size;
            w -= &direction * alpha;

            log::debug!(
                "{}: iteration {}, step {}, |d| = {}",
                self.name(),
                k + 1,
                alpha,
                direction.norm()
            );
            trace.record(w.clone());
        }

        trace.duration = start_time.elapsed();
        log::info!(
            "{}: optimization complete after {} steps in {:?}",
            self.name(),
            trace.steps_taken(),
            trace.duration
        );

        Ok(trace)
    }
}

/// Scales `direction` to unit Euclidean norm.
///
/// A zero norm is replaced by ±`T::ZERO_NORM_PERTURBATION` with a random
/// sign, which leaves a zero direction at (signed) zero.
pub fn normalize_direction<T, R>(direction: &mut DVector<T>, rng: &mut R)
where
    T: Scalar,
    R: Rng,
{
    let mut norm = direction.norm();
    if norm == T::zero() {
        let sign = if rng.gen::<bool>() { T::one() } else { -T::one() };
        norm = sign * T::ZERO_NORM_PERTURBATION;
        log::debug!("zero gradient norm, dividing by {} instead", norm);
    }
    *direction /= norm;
}

/// Runs gradient descent from `initial_point` and returns the full trace.
///
/// Shorthand for `GradientDescent::new(config).optimize(objective, initial_point)`.
pub fn run_gradient_descent<T, O, P>(
    objective: &O,
    initial_point: P,
    config: GradientDescentConfig<T>,
) -> OptimizerResult<OptimizationTrace<T>>
where
    T: Scalar,
    O: Objective<T> + ?Sized,
    P: IntoPoint<T>,
{
    GradientDescent::new(config).optimize(objective, initial_point)
}
