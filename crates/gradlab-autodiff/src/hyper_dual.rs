//! Hyper-dual numbers for exact second derivatives.
//!
//! A hyper-dual number has two independent infinitesimals ε₁, ε₂ with
//! ε₁² = ε₂² = 0 and a cross term ε₁ε₂ ≠ 0. Evaluating f on
//! x + e_i ε₁ + e_j ε₂ gives
//!
//! f(x) + ∂_i f ε₁ + ∂_j f ε₂ + ∂_i∂_j f ε₁ε₂
//!
//! so the cross part is the Hessian entry H_ij with no truncation error.

use crate::real::Real;
use gradlab_core::types::Scalar;
use num_traits::Float;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Div, Mul, MulAssign, Neg, Sub, SubAssign};

/// A hyper-dual number `re + e1·ε₁ + e2·ε₂ + e12·ε₁ε₂`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HyperDual<T>
where
    T: Scalar,
{
    /// Value part
    pub re: T,
    /// First infinitesimal part
    pub e1: T,
    /// Second infinitesimal part
    pub e2: T,
    /// Cross part
    pub e12: T,
}

impl<T> HyperDual<T>
where
    T: Scalar,
{
    /// Creates a hyper-dual number from its four parts.
    pub fn new(re: T, e1: T, e2: T, e12: T) -> Self {
        Self { re, e1, e2, e12 }
    }

    /// A constant: all infinitesimal parts zero.
    pub fn from_real(re: T) -> Self {
        Self::new(re, T::zero(), T::zero(), T::zero())
    }

    /// Seeds coordinate `k` of a point for the Hessian entry `(i, j)`.
    pub fn seeded(re: T, k: usize, i: usize, j: usize) -> Self {
        let unit = |hit: bool| if hit { T::one() } else { T::zero() };
        Self::new(re, unit(k == i), unit(k == j), T::zero())
    }

    /// Applies a scalar function from its value and first two derivatives.
    ///
    /// f(x) = (f(a), f'(a)·b, f'(a)·c, f'(a)·d + f''(a)·b·c)
    fn chain(self, f: T, df: T, d2f: T) -> Self {
        Self::new(
            f,
            df * self.e1,
            df * self.e2,
            df * self.e12 + d2f * self.e1 * self.e2,
        )
    }

    fn recip(self) -> Self {
        let inv = T::one() / self.re;
        let inv2 = inv * inv;
        self.chain(inv, -inv2, (inv2 + inv2) * inv)
    }
}

impl<T: Scalar> PartialOrd for HyperDual<T> {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        self.re.partial_cmp(&other.re)
    }
}

impl<T: Scalar> Add for HyperDual<T> {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(
            self.re + rhs.re,
            self.e1 + rhs.e1,
            self.e2 + rhs.e2,
            self.e12 + rhs.e12,
        )
    }
}

impl<T: Scalar> Sub for HyperDual<T> {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(
            self.re - rhs.re,
            self.e1 - rhs.e1,
            self.e2 - rhs.e2,
            self.e12 - rhs.e12,
        )
    }
}

impl<T: Scalar> Mul for HyperDual<T> {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        Self::new(
            self.re * rhs.re,
            self.re * rhs.e1 + self.e1 * rhs.re,
            self.re * rhs.e2 + self.e2 * rhs.re,
            self.re * rhs.e12 + self.e1 * rhs.e2 + self.e2 * rhs.e1 + self.e12 * rhs.re,
        )
    }
}

impl<T: Scalar> Div for HyperDual<T> {
    type Output = Self;

    #[allow(clippy::suspicious_arithmetic_impl)]
    fn div(self, rhs: Self) -> Self {
        self * rhs.recip()
    }
}

impl<T: Scalar> Neg for HyperDual<T> {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(-self.re, -self.e1, -self.e2, -self.e12)
    }
}

impl<T: Scalar> AddAssign for HyperDual<T> {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl<T: Scalar> SubAssign for HyperDual<T> {
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl<T: Scalar> MulAssign for HyperDual<T> {
    fn mul_assign(&mut self, rhs: Self) {
        *self = *self * rhs;
    }
}

impl<T: Scalar> Sum for HyperDual<T> {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::from_real(T::zero()), |acc, x| acc + x)
    }
}

impl<T: Scalar> Real for HyperDual<T> {
    fn constant(value: f64) -> Self {
        Self::from_real(<T as Scalar>::from_f64(value))
    }

    fn primal(&self) -> f64 {
        <T as Scalar>::to_f64(self.re)
    }

    fn exp(self) -> Self {
        let e = <T as Float>::exp(self.re);
        self.chain(e, e, e)
    }

    fn ln(self) -> Self {
        let inv = T::one() / self.re;
        self.chain(<T as Float>::ln(self.re), inv, -inv * inv)
    }

    fn sqrt(self) -> Self {
        let s = <T as Float>::sqrt(self.re);
        let df = T::one() / (s + s);
        // f'' = -1 / (4 x^(3/2)) = -f' / (2x)
        let d2f = -df / (self.re + self.re);
        self.chain(s, df, d2f)
    }

    fn sin(self) -> Self {
        let (s, c) = <T as Float>::sin_cos(self.re);
        self.chain(s, c, -s)
    }

    fn cos(self) -> Self {
        let (s, c) = <T as Float>::sin_cos(self.re);
        self.chain(c, -s, -c)
    }

    fn tanh(self) -> Self {
        let t = <T as Float>::tanh(self.re);
        let df = T::one() - t * t;
        let two = T::one() + T::one();
        self.chain(t, df, -two * t * df)
    }

    fn powi(self, n: i32) -> Self {
        match n {
            0 => Self::from_real(T::one()),
            1 => self,
            _ => {
                let nf = <T as Scalar>::from_f64(n as f64);
                let df = nf * <T as Float>::powi(self.re, n - 1);
                let d2f = nf * (nf - T::one()) * <T as Float>::powi(self.re, n - 2);
                self.chain(<T as Float>::powi(self.re, n), df, d2f)
            }
        }
    }

    fn powf(self, p: f64) -> Self {
        let pt = <T as Scalar>::from_f64(p);
        let df = pt * <T as Float>::powf(self.re, pt - T::one());
        let two = T::one() + T::one();
        let d2f = pt * (pt - T::one()) * <T as Float>::powf(self.re, pt - two);
        self.chain(<T as Float>::powf(self.re, pt), df, d2f)
    }
}
