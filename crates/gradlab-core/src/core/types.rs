//! Type definitions and aliases for iterate-recording optimizers.
//!
//! This module provides the scalar trait shared by every algorithm, the
//! vector and matrix aliases used for iterates and Hessians, and the
//! precision-dependent numerical constants.

use nalgebra::{Dyn, OMatrix, OVector, RealField, Scalar as NalgebraScalar};
use num_traits::{Float, FromPrimitive};
use std::fmt::{Debug, Display};

/// Trait for scalar types used in optimization (f32 or f64).
///
/// This trait combines all the necessary numeric traits required
/// by the descent algorithms and the differentiation providers.
pub trait Scalar:
    NalgebraScalar
    + RealField
    + Float
    + FromPrimitive
    + Display
    + Debug
    + Default
    + Copy
    + Send
    + Sync
    + 'static
{
    /// Machine epsilon for this scalar type.
    const EPSILON: Self;

    /// Relative cutoff for singular values in the pseudo-inverse.
    ///
    /// Singular values below `PINV_RCOND * sigma_max` are treated as zero.
    const PINV_RCOND: Self;

    /// Magnitude of the signed perturbation applied to a zero gradient norm
    /// in normalized descent.
    const ZERO_NORM_PERTURBATION: Self;

    /// Convert from f64 (for constants).
    ///
    /// # Panics
    ///
    /// Panics if the conversion fails, which cannot happen for f32 or f64.
    fn from_f64(v: f64) -> Self {
        <Self as FromPrimitive>::from_f64(v).expect("Failed to convert from f64")
    }

    /// Convert to f64 (for logging/display).
    fn to_f64(self) -> f64 {
        num_traits::cast(self).expect("Failed to convert to f64")
    }

    /// Convert from usize (for iteration counts).
    fn from_usize(v: usize) -> Self {
        <Self as FromPrimitive>::from_usize(v).expect("Failed to convert from usize")
    }
}

impl Scalar for f32 {
    const EPSILON: Self = f32::EPSILON;
    const PINV_RCOND: Self = 1e-6;
    const ZERO_NORM_PERTURBATION: Self = 1e-6;
}

impl Scalar for f64 {
    const EPSILON: Self = f64::EPSILON;
    const PINV_RCOND: Self = 1e-15;
    const ZERO_NORM_PERTURBATION: Self = 1e-6;
}

/// Type alias for a dynamically-sized matrix.
pub type DMatrix<T> = OMatrix<T, Dyn, Dyn>;

/// Type alias for a dynamically-sized vector.
pub type DVector<T> = OVector<T, Dyn>;

/// A weight vector: the candidate solution at one step of a run.
pub type Iterate<T> = DVector<T>;

/// Numerical constants for different precision levels.
pub mod constants {
    use super::Scalar;
    use num_traits::Float;

    /// Get machine epsilon for the given scalar type.
    pub fn epsilon<T: Scalar>() -> T {
        T::EPSILON
    }

    /// Get the relative singular-value cutoff of the pseudo-inverse.
    pub fn pinv_rcond<T: Scalar>() -> T {
        T::PINV_RCOND
    }

    /// Step used by the central finite-difference formulas: sqrt(eps).
    pub fn finite_difference_step<T: Scalar>() -> T {
        <T as Float>::sqrt(T::EPSILON)
    }
}
