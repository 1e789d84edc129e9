//! Core traits and types shared by every optimizer.

pub mod error;
pub mod objective;
pub mod point;
pub mod types;

// Re-export core types
pub use error::*;
pub use objective::*;
pub use point::*;
pub use types::*;
