//! Dual numbers for first derivatives.
//!
//! A dual number a + bε with ε² = 0 carries a value and one directional
//! derivative. Evaluating f on x + e_i ε yields f(x) + ∂f/∂x_i ε.

use crate::real::Real;
use gradlab_core::types::Scalar;
use num_traits::Float;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Div, Mul, MulAssign, Neg, Sub, SubAssign};

/// A first-order dual number `re + eps·ε`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dual<T>
where
    T: Scalar,
{
    /// Value part
    pub re: T,
    /// Derivative part
    pub eps: T,
}

impl<T> Dual<T>
where
    T: Scalar,
{
    /// Creates a dual number.
    pub fn new(re: T, eps: T) -> Self {
        Self { re, eps }
    }

    /// A variable with unit derivative.
    pub fn variable(re: T) -> Self {
        Self::new(re, T::one())
    }

    /// A constant with zero derivative.
    pub fn from_real(re: T) -> Self {
        Self::new(re, T::zero())
    }

    /// Applies a scalar function given its value and first derivative at `re`.
    fn chain(self, f: T, df: T) -> Self {
        Self::new(f, df * self.eps)
    }
}

impl<T: Scalar> PartialOrd for Dual<T> {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        self.re.partial_cmp(&other.re)
    }
}

impl<T: Scalar> Add for Dual<T> {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.re + rhs.re, self.eps + rhs.eps)
    }
}

impl<T: Scalar> Sub for Dual<T> {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.re - rhs.re, self.eps - rhs.eps)
    }
}

impl<T: Scalar> Mul for Dual<T> {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        Self::new(self.re * rhs.re, self.re * rhs.eps + self.eps * rhs.re)
    }
}

impl<T: Scalar> Div for Dual<T> {
    type Output = Self;

    fn div(self, rhs: Self) -> Self {
        let inv = T::one() / rhs.re;
        Self::new(
            self.re * inv,
            (self.eps * rhs.re - self.re * rhs.eps) * inv * inv,
        )
    }
}

impl<T: Scalar> Neg for Dual<T> {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(-self.re, -self.eps)
    }
}

impl<T: Scalar> AddAssign for Dual<T> {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl<T: Scalar> SubAssign for Dual<T> {
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl<T: Scalar> MulAssign for Dual<T> {
    fn mul_assign(&mut self, rhs: Self) {
        *self = *self * rhs;
    }
}

impl<T: Scalar> Sum for Dual<T> {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::from_real(T::zero()), |acc, x| acc + x)
    }
}

impl<T: Scalar> Real for Dual<T> {
    fn constant(value: f64) -> Self {
        Self::from_real(<T as Scalar>::from_f64(value))
    }

    fn primal(&self) -> f64 {
        <T as Scalar>::to_f64(self.re)
    }

    fn exp(self) -> Self {
        let e = <T as Float>::exp(self.re);
        self.chain(e, e)
    }

    fn ln(self) -> Self {
        self.chain(<T as Float>::ln(self.re), T::one() / self.re)
    }

    fn sqrt(self) -> Self {
        let s = <T as Float>::sqrt(self.re);
        self.chain(s, T::one() / (s + s))
    }

    fn sin(self) -> Self {
        self.chain(<T as Float>::sin(self.re), <T as Float>::cos(self.re))
    }

    fn cos(self) -> Self {
        self.chain(<T as Float>::cos(self.re), -<T as Float>::sin(self.re))
    }

    fn tanh(self) -> Self {
        let t = <T as Float>::tanh(self.re);
        self.chain(t, T::one() - t * t)
    }

    fn powi(self, n: i32) -> Self {
        if n == 0 {
            return Self::from_real(T::one());
        }
        let df = <T as Scalar>::from_f64(n as f64) * <T as Float>::powi(self.re, n - 1);
        self.chain(<T as Float>::powi(self.re, n), df)
    }

    fn powf(self, p: f64) -> Self {
        let pt = <T as Scalar>::from_f64(p);
        let df = pt * <T as Float>::powf(self.re, pt - T::one());
        self.chain(<T as Float>::powf(self.re, pt), df)
    }
}
