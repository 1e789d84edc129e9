//! Core traits and types for iterate-recording descent methods.
//!
//! This crate provides the building blocks shared by the optimizers in the
//! `gradlab` workspace: the [`Objective`] abstraction through which an
//! algorithm obtains values, gradients and Hessians, the trace type that
//! records every visited iterate, and the step-length machinery used by
//! gradient descent.
//!
//! # Key Concepts
//!
//! - **Objective**: a scalar function of a weight vector, with gradient and
//!   Hessian supplied analytically, by automatic differentiation, or by
//!   finite differences
//! - **Trace**: the full iterate history of a run, starting at the initial point
//! - **Step-length rules**: fixed, backtracking, or diminishing
//!
//! # Modules
//!
//! - [`core::error`]: Error types for objectives and optimizers
//! - [`core::objective`]: Objective trait and ready-made objectives
//! - [`core::point`]: Coercion of scalars and sequences into iterates
//! - [`core::types`]: Scalar trait, type aliases and numerical constants
//! - [`optimization::line_search`]: Backtracking line search
//! - [`optimization::optimizer`]: Optimizer trait and trace
//! - [`optimization::step_size`]: Step-length rules

pub mod core;
pub mod optimization;

// Flat module paths, e.g. `gradlab_core::types::Scalar`
pub use crate::core::{error, objective, point, types};
pub use crate::optimization::{line_search, optimizer, step_size};

// Re-export commonly used items at the crate root
pub use crate::core::error::{ObjectiveError, OptimizerError, OptimizerResult, Result};
pub use crate::core::objective::Objective;
pub use crate::core::types::Scalar;
pub use crate::optimization::optimizer::{OptimizationTrace, Optimizer, TerminationReason};

/// Prelude module for convenient imports.
///
/// # Example
/// ```
/// use gradlab_core::prelude::*;
/// ```
pub mod prelude {
    pub use crate::core::error::{ObjectiveError, OptimizerError, OptimizerResult, Result};
    pub use crate::core::objective::{
        AnalyticObjective, CountingObjective, DerivativeChecker, FnObjective, Objective,
        QuadraticCost,
    };
    pub use crate::core::point::IntoPoint;
    pub use crate::core::types::{constants, DMatrix, DVector, Iterate, Scalar};
    pub use crate::optimization::line_search::{
        backtracking_line_search, BacktrackingParams, LineSearchResult,
    };
    pub use crate::optimization::optimizer::{OptimizationTrace, Optimizer, TerminationReason};
    pub use crate::optimization::step_size::{StepLength, StepLengthRule};
}
