//! Optimization algorithms and utilities.

pub mod line_search;
pub mod optimizer;
pub mod step_size;

// Re-export optimization components
pub use line_search::*;
pub use optimizer::*;
pub use step_size::*;
