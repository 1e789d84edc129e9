//! Objectives differentiated by forward-mode automatic differentiation.
//!
//! A [`DifferentiableFn`] is written once, generically over [`Real`]. Wrapped
//! in [`AutoDiff`] it becomes an [`Objective`] whose gradient is computed with
//! one [`Dual`] pass per coordinate and whose Hessian is computed with one
//! [`HyperDual`] pass per upper-triangular entry. Both are exact up to
//! floating-point rounding.

use crate::{dual::Dual, hyper_dual::HyperDual, real::Real};
use gradlab_core::{
    error::{ObjectiveError, Result},
    objective::Objective,
    types::{DMatrix, DVector, Scalar},
};
use std::fmt::Debug;

/// A scalar function that can be evaluated on any [`Real`] number type.
///
/// # Example
///
/// ```
/// use gradlab_autodiff::{DifferentiableFn, Real};
///
/// #[derive(Debug)]
/// struct Square;
///
/// impl DifferentiableFn for Square {
///     fn eval<R: Real>(&self, w: &[R]) -> R {
///         w[0] * w[0]
///     }
/// }
/// ```
pub trait DifferentiableFn: Debug {
    /// Evaluates the function at `w`.
    fn eval<R: Real>(&self, w: &[R]) -> R;
}

impl<F: DifferentiableFn + ?Sized> DifferentiableFn for &F {
    fn eval<R: Real>(&self, w: &[R]) -> R {
        (**self).eval(w)
    }
}

/// An [`Objective`] with exact derivatives by forward-mode differentiation.
#[derive(Debug, Clone)]
pub struct AutoDiff<F> {
    function: F,
    dimension: Option<usize>,
}

impl<F> AutoDiff<F>
where
    F: DifferentiableFn,
{
    /// Wraps `function`; any input dimension is accepted.
    pub fn new(function: F) -> Self {
        Self {
            function,
            dimension: None,
        }
    }

    /// Restricts evaluation to points of dimension `n`.
    ///
    /// Points of any other length are rejected with a dimension mismatch
    /// instead of reaching the function.
    pub fn with_dimension(mut self, n: usize) -> Self {
        self.dimension = Some(n);
        self
    }

    /// The wrapped function.
    pub fn function(&self) -> &F {
        &self.function
    }

    fn check_dimension<T: Scalar>(&self, point: &DVector<T>) -> Result<()> {
        match self.dimension {
            Some(n) if n != point.len() => Err(ObjectiveError::dimension_mismatch(
                format!("point of length {n}"),
                format!("length {}", point.len()),
            )),
            _ => Ok(()),
        }
    }

    /// One dual pass per coordinate; returns the value alongside.
    fn dual_passes<T: Scalar>(&self, point: &DVector<T>) -> (T, DVector<T>) {
        let n = point.len();
        let mut seeds: Vec<Dual<T>> = point.iter().map(|&x| Dual::from_real(x)).collect();
        let mut gradient = DVector::zeros(n);
        let mut value = T::zero();

        for i in 0..n {
            seeds[i].eps = T::one();
            let out = self.function.eval(&seeds);
            seeds[i].eps = T::zero();

            gradient[i] = out.eps;
            value = out.re;
        }

        (value, gradient)
    }
}

impl<T, F> Objective<T> for AutoDiff<F>
where
    T: Scalar + Real,
    F: DifferentiableFn,
{
    fn value(&self, point: &DVector<T>) -> Result<T> {
        self.check_dimension(point)?;
        Ok(self.function.eval(point.as_slice()))
    }

    fn value_and_gradient(&self, point: &DVector<T>) -> Result<(T, DVector<T>)> {
        self.check_dimension(point)?;
        Ok(self.dual_passes(point))
    }

    fn gradient(&self, point: &DVector<T>) -> Result<DVector<T>> {
        self.check_dimension(point)?;
        Ok(self.dual_passes(point).1)
    }

    fn hessian(&self, point: &DVector<T>) -> Result<DMatrix<T>> {
        self.check_dimension(point)?;
        let n = point.len();
        let mut hessian = DMatrix::zeros(n, n);
        let mut seeds: Vec<HyperDual<T>> =
            point.iter().map(|&x| HyperDual::from_real(x)).collect();

        for i in 0..n {
            for j in i..n {
                seeds[i].e1 = T::one();
                seeds[j].e2 = T::one();
                let out = self.function.eval(&seeds);
                seeds[i].e1 = T::zero();
                seeds[j].e2 = T::zero();

                hessian[(i, j)] = out.e12;
                hessian[(j, i)] = out.e12;
            }
        }

        log::trace!("hyper-dual Hessian used {} passes", n * (n + 1) / 2);
        Ok(hessian)
    }
}
