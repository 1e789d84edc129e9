//! # gradlab
//!
//! Reference implementations of gradient descent and Newton's method that
//! record every iterate, for use in optimization coursework.
//!
//! The optimizers never differentiate anything themselves: derivatives come
//! from the [`Objective`](core::objective::Objective) implementation handed to
//! them, which may be closed-form, forward-mode automatic differentiation
//! (feature `autodiff`), or finite differences.
//!
//! ## Quick Start
//!
//! ```rust
//! use gradlab::prelude::*;
//!
//! // f(w) = w^2 starting at w = 5
//! let objective = FnObjective::new(|w: &DVector<f64>| w[0] * w[0]);
//! let config = GradientDescentConfig::new()
//!     .with_max_iterations(1)
//!     .with_step_size(0.1);
//!
//! let trace = run_gradient_descent(&objective, 5.0, config)?;
//! assert_eq!(trace.len(), 2);
//! assert!((trace.final_point()[0] - 4.0).abs() < 1e-6);
//! # Ok::<(), OptimizerError>(())
//! ```
//!
//! ## Crates
//!
//! - [`core`]: objectives, errors, line search, trace types
//! - [`optim`]: gradient descent and Newton's method
//! - [`autodiff`]: dual and hyper-dual number differentiation

pub use gradlab_core as core;
pub use gradlab_optim as optim;

#[cfg(feature = "autodiff")]
pub use gradlab_autodiff as autodiff;

pub use nalgebra;

// Re-export commonly used items at the crate root
pub use gradlab_core::{ObjectiveError, OptimizationTrace, Optimizer, OptimizerError, TerminationReason};
pub use gradlab_optim::{run_gradient_descent, run_newtons_method};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use gradlab_core::prelude::*;
    pub use gradlab_optim::{
        normalize_direction, pseudo_inverse, run_gradient_descent, run_newtons_method,
        GradientDescent, GradientDescentConfig, Newton, NewtonConfig,
    };

    #[cfg(feature = "autodiff")]
    pub use gradlab_autodiff::prelude::*;
}
