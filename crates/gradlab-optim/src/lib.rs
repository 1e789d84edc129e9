//! Gradlab Optimization - iterate-recording descent algorithms.
//!
//! This crate provides the two optimizers of the gradlab teaching library.
//! Both return an [`OptimizationTrace`] holding every iterate they visited,
//! so that a plotting layer can replay the path taken.
//!
//! # Available Optimizers
//!
//! - **Gradient descent**: fixed, backtracking or diminishing steps, with
//!   optional gradient normalization
//! - **Newton's method**: damped Hessian, pseudo-inverse solve, early exit on
//!   divergence
//!
//! # Examples
//!
//! ```rust
//! use gradlab_core::prelude::*;
//! use gradlab_optim::{run_gradient_descent, run_newtons_method, GradientDescentConfig, NewtonConfig};
//!
//! let cost = QuadraticCost::<f64>::simple(2);
//!
//! let gd = run_gradient_descent(&cost, [1.0, 1.0], GradientDescentConfig::new().with_step_size(0.5))?;
//! assert_eq!(gd.len(), 101);
//!
//! let newton = run_newtons_method(&cost, [1.0, 1.0], NewtonConfig::new())?;
//! assert!(newton.final_point().norm() < 1e-6);
//! # Ok::<(), OptimizerError>(())
//! ```
//!
//! [`OptimizationTrace`]: gradlab_core::optimizer::OptimizationTrace

pub mod gradient_descent;
pub mod newton;
pub mod utils;

// Re-export main optimizers for convenience
pub use gradient_descent::{
    normalize_direction, run_gradient_descent, GradientDescent, GradientDescentConfig,
};
pub use newton::{run_newtons_method, Newton, NewtonConfig};
pub use utils::{pseudo_inverse, pseudo_inverse_solve};

// Re-export commonly used items from core
pub use gradlab_core::{
    line_search::BacktrackingParams,
    optimizer::{OptimizationTrace, Optimizer, TerminationReason},
    step_size::StepLengthRule,
};
