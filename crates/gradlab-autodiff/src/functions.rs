//! Classic test objectives used in the course notebooks and demos.

use crate::objective::DifferentiableFn;
use crate::real::Real;

/// f(w) = Σ wᵢ²
#[derive(Debug, Clone, Copy, Default)]
pub struct SumOfSquares;

impl DifferentiableFn for SumOfSquares {
    fn eval<R: Real>(&self, w: &[R]) -> R {
        w.iter().map(|&x| x * x).sum()
    }
}

/// The Rosenbrock function f(x, y) = (a − x)² + b(y − x²)².
///
/// Its minimum is at (a, a²). The curved valley makes it a standard stress
/// test for gradient descent.
#[derive(Debug, Clone, Copy)]
pub struct Rosenbrock {
    /// x-coordinate of the minimum
    pub a: f64,
    /// Weight of the valley term
    pub b: f64,
}

impl Default for Rosenbrock {
    fn default() -> Self {
        Self { a: 1.0, b: 100.0 }
    }
}

impl DifferentiableFn for Rosenbrock {
    fn eval<R: Real>(&self, w: &[R]) -> R {
        let a = R::constant(self.a);
        let b = R::constant(self.b);
        (a - w[0]).square() + b * (w[1] - w[0].square()).square()
    }
}

/// f(w) = Σ log(1 + e^(−wᵢ)) + λ/2 ‖w‖², a smooth convex loss.
#[derive(Debug, Clone, Copy)]
pub struct SoftplusRidge {
    /// Ridge penalty λ ≥ 0
    pub lambda: f64,
}

impl DifferentiableFn for SoftplusRidge {
    fn eval<R: Real>(&self, w: &[R]) -> R {
        let one = R::constant(1.0);
        let half_lambda = R::constant(0.5 * self.lambda);
        w.iter()
            .map(|&x| (one + (-x).exp()).ln() + half_lambda * x * x)
            .sum()
    }
}

/// f(w) = w₀⁴ + w₁², whose Hessian vanishes along w₀ at the origin.
#[derive(Debug, Clone, Copy, Default)]
pub struct QuarticValley;

impl DifferentiableFn for QuarticValley {
    fn eval<R: Real>(&self, w: &[R]) -> R {
        w[0].powi(4) + w[1].square()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::objective::AutoDiff;
    use approx::assert_relative_eq;
    use gradlab_core::prelude::*;

    #[test]
    fn test_rosenbrock_at_minimum() {
        let objective = AutoDiff::new(Rosenbrock::default());
        let minimum = DVector::from_vec(vec![1.0_f64, 1.0]);

        assert_eq!(objective.value(&minimum).unwrap(), 0.0);
        assert_relative_eq!(objective.gradient(&minimum).unwrap().norm(), 0.0);

        let hessian = objective.hessian(&minimum).unwrap();
        assert_relative_eq!(hessian[(0, 0)], 802.0);
        assert_relative_eq!(hessian[(0, 1)], -400.0);
        assert_relative_eq!(hessian[(1, 1)], 200.0);
    }

    #[test]
    fn test_sum_of_squares_derivatives() {
        let objective = AutoDiff::new(SumOfSquares);
        let point = DVector::from_vec(vec![1.0_f64, -2.0, 3.0]);

        assert_eq!(objective.value(&point).unwrap(), 14.0);
        assert_eq!(objective.gradient(&point).unwrap(), &point * 2.0);
        assert_eq!(
            objective.hessian(&point).unwrap(),
            DMatrix::identity(3, 3) * 2.0
        );
    }

    #[test]
    fn test_softplus_ridge_matches_finite_differences() {
        let objective = AutoDiff::new(SoftplusRidge { lambda: 0.1 });
        let point = DVector::from_vec(vec![0.3_f64, -1.2]);

        let (ok, err) = DerivativeChecker::check_gradient(&objective, &point, 1e-6).unwrap();
        assert!(ok, "gradient error {err}");
        let (ok, err) = DerivativeChecker::check_hessian(&objective, &point, 1e-4).unwrap();
        assert!(ok, "hessian error {err}");
    }

    #[test]
    fn test_quartic_valley_is_flat_at_origin() {
        let objective = AutoDiff::new(QuarticValley);
        let hessian = objective.hessian(&DVector::from_vec(vec![0.0_f64, 0.0])).unwrap();

        assert_eq!(hessian[(0, 0)], 0.0);
        assert_eq!(hessian[(1, 1)], 2.0);
    }
}
