//! Number trait that objectives are written against.
//!
//! A function generic over [`Real`] can be evaluated on plain floats, on
//! [`Dual`](crate::Dual) numbers to obtain a gradient, and on
//! [`HyperDual`](crate::HyperDual) numbers to obtain a Hessian, all from the
//! same source.

use std::fmt::Debug;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Div, Mul, MulAssign, Neg, Sub, SubAssign};

/// Arithmetic and elementary functions needed by differentiable objectives.
pub trait Real:
    Copy
    + Debug
    + PartialOrd
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
    + Neg<Output = Self>
    + AddAssign
    + SubAssign
    + MulAssign
    + Sum
{
    /// Lifts a constant; derivative parts are zero.
    fn constant(value: f64) -> Self;

    /// Value part as `f64`, for branching on the primal value.
    fn primal(&self) -> f64;

    /// Natural exponential.
    fn exp(self) -> Self;

    /// Natural logarithm.
    fn ln(self) -> Self;

    /// Square root.
    fn sqrt(self) -> Self;

    /// Sine.
    fn sin(self) -> Self;

    /// Cosine.
    fn cos(self) -> Self;

    /// Hyperbolic tangent.
    fn tanh(self) -> Self;

    /// `self` raised to an integer power.
    fn powi(self, n: i32) -> Self;

    /// `self` raised to a constant real power.
    fn powf(self, p: f64) -> Self;

    /// Absolute value. Not differentiable at zero; the derivative there is
    /// taken as that of the identity.
    fn abs(self) -> Self {
        if self.primal() < 0.0 {
            -self
        } else {
            self
        }
    }

    /// Logistic function 1 / (1 + e^(-x)).
    fn sigmoid(self) -> Self {
        let one = Self::constant(1.0);
        one / (one + (-self).exp())
    }

    /// `self * self`
    fn square(self) -> Self {
        self * self
    }
}

macro_rules! impl_real_for_float {
    ($t:ty) => {
        impl Real for $t {
            fn constant(value: f64) -> Self {
                value as $t
            }

            fn primal(&self) -> f64 {
                *self as f64
            }

            fn exp(self) -> Self {
                <$t>::exp(self)
            }

            fn ln(self) -> Self {
                <$t>::ln(self)
            }

            fn sqrt(self) -> Self {
                <$t>::sqrt(self)
            }

            fn sin(self) -> Self {
                <$t>::sin(self)
            }

            fn cos(self) -> Self {
                <$t>::cos(self)
            }

            fn tanh(self) -> Self {
                <$t>::tanh(self)
            }

            fn powi(self, n: i32) -> Self {
                <$t>::powi(self, n)
            }

            fn powf(self, p: f64) -> Self {
                <$t>::powf(self, p as $t)
            }

            fn abs(self) -> Self {
                <$t>::abs(self)
            }
        }
    };
}

impl_real_for_float!(f32);
impl_real_for_float!(f64);
