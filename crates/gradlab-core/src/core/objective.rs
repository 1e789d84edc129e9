//! Objective function interface for the descent algorithms.
//!
//! An [`Objective`] is a scalar function of a column vector together with the
//! derivative information the optimizers need. The trait itself is the
//! differentiation capability handed to an optimizer: gradient and Hessian
//! default to central finite differences, and implementors with exact
//! derivatives (closed forms, automatic differentiation) override them.
//!
//! # Design Philosophy
//!
//! - The optimizers never differentiate anything themselves
//! - Finite differences are always available as a fallback
//! - Closures are first-class through [`FnObjective`] and [`AnalyticObjective`]

use crate::core::{
    error::{ObjectiveError, Result},
    types::{constants, DMatrix, DVector, Scalar},
};
use num_traits::Float;
use std::cell::Cell;
use std::fmt::Debug;

/// Trait for scalar objectives f: R^n -> R.
///
/// Optimizers evaluate `value` for divergence checks and line searches,
/// `gradient` for every step, and `hessian` for Newton's method.
pub trait Objective<T>: Debug
where
    T: Scalar,
{
    /// Evaluates the objective at a point.
    fn value(&self, point: &DVector<T>) -> Result<T>;

    /// Evaluates the objective and its gradient at a point.
    ///
    /// # Default Implementation
    ///
    /// Calls `value` and `gradient` separately.
    fn value_and_gradient(&self, point: &DVector<T>) -> Result<(T, DVector<T>)> {
        let value = self.value(point)?;
        let gradient = self.gradient(point)?;
        Ok((value, gradient))
    }

    /// Computes the gradient at a point.
    ///
    /// # Default Implementation
    ///
    /// Central finite differences, see [`Objective::gradient_fd`].
    fn gradient(&self, point: &DVector<T>) -> Result<DVector<T>> {
        self.gradient_fd(point)
    }

    /// Computes the n x n Hessian at a point.
    ///
    /// # Default Implementation
    ///
    /// Second-order central differences of `value`, see
    /// [`Objective::hessian_fd`].
    fn hessian(&self, point: &DVector<T>) -> Result<DMatrix<T>> {
        self.hessian_fd(point)
    }

    /// Computes the gradient using central finite differences.
    ///
    /// Uses the step h = sqrt(eps) along every coordinate axis:
    /// `g_i = (f(x + h e_i) - f(x - h e_i)) / 2h`.
    fn gradient_fd(&self, point: &DVector<T>) -> Result<DVector<T>> {
        let n = point.len();
        let h = constants::finite_difference_step::<T>();
        let two_h = h + h;
        let mut gradient = DVector::zeros(n);
        let mut probe = point.clone();

        for i in 0..n {
            let original = probe[i];

            probe[i] = original + h;
            let f_plus = self.value(&probe)?;
            probe[i] = original - h;
            let f_minus = self.value(&probe)?;
            probe[i] = original;

            gradient[i] = (f_plus - f_minus) / two_h;
        }

        Ok(gradient)
    }

    /// Computes the Hessian using second-order central differences of `value`.
    ///
    /// Uses h = eps^(1/4) and the four-point stencil
    /// `H_ij = (f(x+he_i+he_j) - f(x+he_i-he_j) - f(x-he_i+he_j) + f(x-he_i-he_j)) / 4h^2`,
    /// evaluated on the upper triangle and mirrored, so the result is exactly
    /// symmetric.
    fn hessian_fd(&self, point: &DVector<T>) -> Result<DMatrix<T>> {
        let n = point.len();
        let h = <T as Float>::sqrt(constants::finite_difference_step::<T>());
        let denom = <T as Scalar>::from_f64(4.0) * h * h;
        let mut hessian = DMatrix::zeros(n, n);
        let mut probe = point.clone();

        for i in 0..n {
            for j in i..n {
                let mut stencil = |si: T, sj: T| -> Result<T> {
                    probe.copy_from(point);
                    probe[i] += si * h;
                    probe[j] += sj * h;
                    self.value(&probe)
                };

                let one = T::one();
                let f_pp = stencil(one, one)?;
                let f_pm = stencil(one, -one)?;
                let f_mp = stencil(-one, one)?;
                let f_mm = stencil(-one, -one)?;

                let h_ij = (f_pp - f_pm - f_mp + f_mm) / denom;
                hessian[(i, j)] = h_ij;
                hessian[(j, i)] = h_ij;
            }
        }

        Ok(hessian)
    }
}

impl<T, O> Objective<T> for &O
where
    T: Scalar,
    O: Objective<T> + ?Sized,
{
    fn value(&self, point: &DVector<T>) -> Result<T> {
        (**self).value(point)
    }

    fn value_and_gradient(&self, point: &DVector<T>) -> Result<(T, DVector<T>)> {
        (**self).value_and_gradient(point)
    }

    fn gradient(&self, point: &DVector<T>) -> Result<DVector<T>> {
        (**self).gradient(point)
    }

    fn hessian(&self, point: &DVector<T>) -> Result<DMatrix<T>> {
        (**self).hessian(point)
    }
}

/// An objective given by a value closure; derivatives come from finite
/// differences.
#[derive(Clone)]
pub struct FnObjective<F> {
    f: F,
}

impl<F> FnObjective<F> {
    /// Wraps a value closure.
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

impl<F> Debug for FnObjective<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FnObjective").finish_non_exhaustive()
    }
}

impl<T, F> Objective<T> for FnObjective<F>
where
    T: Scalar,
    F: Fn(&DVector<T>) -> T,
{
    fn value(&self, point: &DVector<T>) -> Result<T> {
        Ok((self.f)(point))
    }
}

type HessianFn<T> = Box<dyn Fn(&DVector<T>) -> DMatrix<T> + Send + Sync>;

/// An objective with closed-form gradient and, optionally, Hessian.
///
/// Without a Hessian closure, `hessian` falls back to finite differences.
pub struct AnalyticObjective<T, F, G>
where
    T: Scalar,
{
    value: F,
    gradient: G,
    hessian: Option<HessianFn<T>>,
}

impl<T, F, G> AnalyticObjective<T, F, G>
where
    T: Scalar,
    F: Fn(&DVector<T>) -> T,
    G: Fn(&DVector<T>) -> DVector<T>,
{
    /// Creates an objective from value and gradient closures.
    pub fn new(value: F, gradient: G) -> Self {
        Self {
            value,
            gradient,
            hessian: None,
        }
    }

    /// Attaches a closed-form Hessian.
    pub fn with_hessian<H>(mut self, hessian: H) -> Self
    where
        H: Fn(&DVector<T>) -> DMatrix<T> + Send + Sync + 'static,
    {
        self.hessian = Some(Box::new(hessian));
        self
    }
}

impl<T, F, G> Debug for AnalyticObjective<T, F, G>
where
    T: Scalar,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnalyticObjective")
            .field("has_hessian", &self.hessian.is_some())
            .finish_non_exhaustive()
    }
}

impl<T, F, G> Objective<T> for AnalyticObjective<T, F, G>
where
    T: Scalar,
    F: Fn(&DVector<T>) -> T,
    G: Fn(&DVector<T>) -> DVector<T>,
{
    fn value(&self, point: &DVector<T>) -> Result<T> {
        Ok((self.value)(point))
    }

    fn gradient(&self, point: &DVector<T>) -> Result<DVector<T>> {
        Ok((self.gradient)(point))
    }

    fn hessian(&self, point: &DVector<T>) -> Result<DMatrix<T>> {
        match &self.hessian {
            Some(hessian) => Ok(hessian(point)),
            None => self.hessian_fd(point),
        }
    }
}

/// A quadratic objective with exact derivatives.
///
/// Computes f(x) = 0.5 * x^T * A * x + b^T * x + c
#[derive(Debug, Clone)]
pub struct QuadraticCost<T>
where
    T: Scalar,
{
    /// The quadratic form matrix (should be symmetric)
    pub a: DMatrix<T>,
    /// The linear term
    pub b: DVector<T>,
    /// The constant term
    pub c: T,
}

impl<T> QuadraticCost<T>
where
    T: Scalar,
{
    /// Creates a new quadratic cost function.
    pub fn new(a: DMatrix<T>, b: DVector<T>, c: T) -> Self {
        Self { a, b, c }
    }

    /// Creates a simple quadratic with identity matrix: f(x) = 0.5 * ||x||^2
    pub fn simple(n: usize) -> Self {
        Self {
            a: DMatrix::identity(n, n),
            b: DVector::zeros(n),
            c: T::zero(),
        }
    }

    fn check_dimension(&self, point: &DVector<T>) -> Result<()> {
        if point.len() != self.b.len() {
            return Err(ObjectiveError::dimension_mismatch(
                format!("point of length {}", self.b.len()),
                format!("length {}", point.len()),
            ));
        }
        Ok(())
    }
}

impl<T> Objective<T> for QuadraticCost<T>
where
    T: Scalar,
{
    fn value(&self, point: &DVector<T>) -> Result<T> {
        self.check_dimension(point)?;
        let ax = &self.a * point;
        let quad_term = point.dot(&ax) * <T as Scalar>::from_f64(0.5);
        Ok(quad_term + self.b.dot(point) + self.c)
    }

    fn value_and_gradient(&self, point: &DVector<T>) -> Result<(T, DVector<T>)> {
        Ok((self.value(point)?, self.gradient(point)?))
    }

    fn gradient(&self, point: &DVector<T>) -> Result<DVector<T>> {
        self.check_dimension(point)?;
        // Symmetrize so a non-symmetric A still yields the true gradient.
        let half = <T as Scalar>::from_f64(0.5);
        Ok((&self.a * point + self.a.tr_mul(point)) * half + &self.b)
    }

    fn hessian(&self, point: &DVector<T>) -> Result<DMatrix<T>> {
        self.check_dimension(point)?;
        let half = <T as Scalar>::from_f64(0.5);
        Ok((&self.a + self.a.transpose()) * half)
    }
}

/// Wrapper to count objective evaluations for testing and debugging.
#[derive(Debug)]
pub struct CountingObjective<O> {
    /// The underlying objective
    pub inner: O,
    value_count: Cell<usize>,
    gradient_count: Cell<usize>,
    hessian_count: Cell<usize>,
}

impl<O> CountingObjective<O> {
    /// Creates a new counting wrapper around an objective.
    pub fn new(inner: O) -> Self {
        Self {
            inner,
            value_count: Cell::new(0),
            gradient_count: Cell::new(0),
            hessian_count: Cell::new(0),
        }
    }

    /// Resets all counters to zero.
    pub fn reset_counts(&self) {
        self.value_count.set(0);
        self.gradient_count.set(0);
        self.hessian_count.set(0);
    }

    /// Returns the current (value, gradient, hessian) evaluation counts.
    pub fn counts(&self) -> (usize, usize, usize) {
        (
            self.value_count.get(),
            self.gradient_count.get(),
            self.hessian_count.get(),
        )
    }
}

impl<T, O> Objective<T> for CountingObjective<O>
where
    T: Scalar,
    O: Objective<T>,
{
    fn value(&self, point: &DVector<T>) -> Result<T> {
        self.value_count.set(self.value_count.get() + 1);
        self.inner.value(point)
    }

    fn value_and_gradient(&self, point: &DVector<T>) -> Result<(T, DVector<T>)> {
        self.value_count.set(self.value_count.get() + 1);
        self.gradient_count.set(self.gradient_count.get() + 1);
        self.inner.value_and_gradient(point)
    }

    fn gradient(&self, point: &DVector<T>) -> Result<DVector<T>> {
        self.gradient_count.set(self.gradient_count.get() + 1);
        self.inner.gradient(point)
    }

    fn hessian(&self, point: &DVector<T>) -> Result<DMatrix<T>> {
        self.hessian_count.set(self.hessian_count.get() + 1);
        self.inner.hessian(point)
    }
}

/// Utilities for checking gradient and Hessian implementations.
pub struct DerivativeChecker;

impl DerivativeChecker {
    /// Checks if the gradient implementation matches finite differences.
    ///
    /// # Returns
    ///
    /// A tuple of (passes, max_error) where max_error is the maximum
    /// component-wise absolute error.
    pub fn check_gradient<T, O>(objective: &O, point: &DVector<T>, tol: T) -> Result<(bool, T)>
    where
        T: Scalar,
        O: Objective<T> + ?Sized,
    {
        let analytical = objective.gradient(point)?;
        let fd = objective.gradient_fd(point)?;
        if analytical.len() != fd.len() {
            return Err(ObjectiveError::dimension_mismatch(fd.len(), analytical.len()));
        }

        let max_error = max_abs_difference(analytical.iter(), fd.iter());
        Ok((max_error < tol, max_error))
    }

    /// Checks if the Hessian implementation matches finite differences.
    ///
    /// # Returns
    ///
    /// A tuple of (passes, max_error).
    pub fn check_hessian<T, O>(objective: &O, point: &DVector<T>, tol: T) -> Result<(bool, T)>
    where
        T: Scalar,
        O: Objective<T> + ?Sized,
    {
        let analytical = objective.hessian(point)?;
        let fd = objective.hessian_fd(point)?;
        if analytical.shape() != fd.shape() {
            return Err(ObjectiveError::dimension_mismatch(
                format!("{:?}", fd.shape()),
                format!("{:?}", analytical.shape()),
            ));
        }

        let max_error = max_abs_difference(analytical.iter(), fd.iter());
        Ok((max_error < tol, max_error))
    }

    /// Checks if the Hessian is symmetric.
    ///
    /// # Returns
    ///
    /// A tuple of (is_symmetric, max_asymmetry).
    pub fn check_hessian_symmetry<T, O>(
        objective: &O,
        point: &DVector<T>,
        tol: T,
    ) -> Result<(bool, T)>
    where
        T: Scalar,
        O: Objective<T> + ?Sized,
    {
        let hessian = objective.hessian(point)?;
        let n = hessian.nrows();

        let mut max_asymmetry = T::zero();
        for i in 0..n {
            for j in i + 1..n {
                let asymmetry = <T as Float>::abs(hessian[(i, j)] - hessian[(j, i)]);
                max_asymmetry = <T as Float>::max(max_asymmetry, asymmetry);
            }
        }

        Ok((max_asymmetry < tol, max_asymmetry))
    }
}

fn max_abs_difference<'a, T, I>(lhs: I, rhs: I) -> T
where
    T: Scalar,
    I: Iterator<Item = &'a T>,
{
    lhs.zip(rhs)
        .map(|(a, b)| <T as Float>::abs(*a - *b))
        .fold(T::zero(), |acc, e| <T as Float>::max(acc, e))
}
