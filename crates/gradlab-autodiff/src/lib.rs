//! Forward-mode automatic differentiation for gradlab objectives.
//!
//! This crate supplies exact first and second derivatives to the optimizers
//! without finite-difference truncation error. Objectives are written once,
//! generically over the [`Real`] number trait, and evaluated on:
//!
//! - plain `f32`/`f64` for values,
//! - [`Dual`] numbers for gradients (one pass per coordinate),
//! - [`HyperDual`] numbers for Hessians (one pass per upper-triangular entry).
//!
//! # Example
//!
//! ```
//! use gradlab_autodiff::prelude::*;
//! use gradlab_core::prelude::*;
//!
//! let objective = AutoDiff::new(Rosenbrock::default());
//! let w = DVector::from_vec(vec![-1.0_f64, 2.0]);
//!
//! let gradient = objective.gradient(&w)?;
//! let hessian = objective.hessian(&w)?;
//! assert_eq!(gradient.len(), 2);
//! assert_eq!(hessian.shape(), (2, 2));
//! # Ok::<(), ObjectiveError>(())
//! ```

pub mod dual;
pub mod functions;
pub mod hyper_dual;
pub mod objective;
pub mod real;

// Re-export key types
pub use dual::Dual;
pub use hyper_dual::HyperDual;
pub use objective::{AutoDiff, DifferentiableFn};
pub use real::Real;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::dual::Dual;
    pub use crate::functions::{QuarticValley, Rosenbrock, SoftplusRidge, SumOfSquares};
    pub use crate::hyper_dual::HyperDual;
    pub use crate::objective::{AutoDiff, DifferentiableFn};
    pub use crate::real::Real;
}
