//! Tests comparing forward-mode derivatives with closed forms and finite
//! differences.

use approx::assert_relative_eq;
use gradlab_autodiff::prelude::*;
use gradlab_core::prelude::*;
use proptest::prelude::*;

/// f(x, y, z) = sin(x) * y + z^3 / y + sqrt(z)
#[derive(Debug)]
struct Trig;

impl DifferentiableFn for Trig {
    fn eval<R: Real>(&self, w: &[R]) -> R {
        w[0].sin() * w[1] + w[2].powi(3) / w[1] + w[2].sqrt()
    }
}

fn trig_gradient(w: &DVector<f64>) -> DVector<f64> {
    let (x, y, z) = (w[0], w[1], w[2]);
    DVector::from_vec(vec![
        x.cos() * y,
        x.sin() - z.powi(3) / (y * y),
        3.0 * z * z / y + 0.5 / z.sqrt(),
    ])
}

fn trig_hessian(w: &DVector<f64>) -> DMatrix<f64> {
    let (x, y, z) = (w[0], w[1], w[2]);
    DMatrix::from_row_slice(
        3,
        3,
        &[
            -x.sin() * y,
            x.cos(),
            0.0,
            x.cos(),
            2.0 * z.powi(3) / y.powi(3),
            -3.0 * z * z / (y * y),
            0.0,
            -3.0 * z * z / (y * y),
            6.0 * z / y - 0.25 * z.powf(-1.5),
        ],
    )
}

proptest! {
    #[test]
    fn gradient_matches_closed_form(
        x in -3.0f64..3.0,
        y in 0.5f64..3.0,
        z in 0.1f64..3.0,
    ) {
        let objective = AutoDiff::new(Trig);
        let w = DVector::from_vec(vec![x, y, z]);

        let gradient = objective.gradient(&w).unwrap();
        let expected = trig_gradient(&w);
        for i in 0..3 {
            prop_assert!((gradient[i] - expected[i]).abs() <= 1e-10 * (1.0 + expected[i].abs()));
        }
    }

    #[test]
    fn hessian_matches_closed_form(
        x in -3.0f64..3.0,
        y in 0.5f64..3.0,
        z in 0.1f64..3.0,
    ) {
        let objective = AutoDiff::new(Trig);
        let w = DVector::from_vec(vec![x, y, z]);

        let hessian = objective.hessian(&w).unwrap();
        let expected = trig_hessian(&w);
        for (h, e) in hessian.iter().zip(expected.iter()) {
            prop_assert!((h - e).abs() <= 1e-9 * (1.0 + e.abs()));
        }
        prop_assert_eq!(hessian.clone(), hessian.transpose());
    }

    #[test]
    fn rosenbrock_agrees_with_finite_differences(
        x in -2.0f64..2.0,
        y in -1.0f64..3.0,
    ) {
        let objective = AutoDiff::new(Rosenbrock::default());
        let w = DVector::from_vec(vec![x, y]);

        let (ok, err) = DerivativeChecker::check_gradient(&objective, &w, 1e-3).unwrap();
        prop_assert!(ok, "gradient error {}", err);
    }
}

#[test]
fn value_and_gradient_is_consistent() {
    let objective = AutoDiff::new(Trig);
    let w = DVector::from_vec(vec![0.4, 1.3, 0.9]);

    let (value, gradient) = objective.value_and_gradient(&w).unwrap();
    assert_relative_eq!(value, objective.value(&w).unwrap(), epsilon = 1e-14);
    assert_relative_eq!(gradient, objective.gradient(&w).unwrap());
}

#[test]
fn counting_wrapper_sees_autodiff_calls() {
    let objective = CountingObjective::new(AutoDiff::new(SumOfSquares));
    let w = DVector::from_vec(vec![1.0_f64, 2.0]);

    objective.gradient(&w).unwrap();
    objective.hessian(&w).unwrap();

    assert_eq!(objective.counts(), (0, 1, 1));
}
