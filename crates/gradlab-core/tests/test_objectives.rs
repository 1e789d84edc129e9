//! Integration tests for the objective implementations and point coercion.

use approx::assert_relative_eq;
use gradlab_core::prelude::*;
use pretty_assertions::assert_eq;

/// Rosenbrock function with closed-form derivatives
fn rosenbrock() -> impl Objective<f64> {
    AnalyticObjective::new(
        |w: &DVector<f64>| (1.0 - w[0]).powi(2) + 100.0 * (w[1] - w[0] * w[0]).powi(2),
        |w: &DVector<f64>| {
            DVector::from_vec(vec![
                -2.0 * (1.0 - w[0]) - 400.0 * w[0] * (w[1] - w[0] * w[0]),
                200.0 * (w[1] - w[0] * w[0]),
            ])
        },
    )
    .with_hessian(|w: &DVector<f64>| {
        DMatrix::from_row_slice(
            2,
            2,
            &[
                2.0 - 400.0 * w[1] + 1200.0 * w[0] * w[0],
                -400.0 * w[0],
                -400.0 * w[0],
                200.0,
            ],
        )
    })
}

#[test]
fn test_rosenbrock_derivatives_match_finite_differences() {
    let objective = rosenbrock();
    let point = DVector::from_vec(vec![-1.2, 1.0]);

    let (grad_ok, grad_err) = DerivativeChecker::check_gradient(&objective, &point, 1e-4).unwrap();
    assert!(grad_ok, "gradient error {grad_err}");

    let (hess_ok, hess_err) = DerivativeChecker::check_hessian(&objective, &point, 1e-2).unwrap();
    assert!(hess_ok, "hessian error {hess_err}");
}

#[test]
fn test_rosenbrock_minimum() {
    let objective = rosenbrock();
    let minimum = DVector::from_vec(vec![1.0, 1.0]);

    assert_eq!(objective.value(&minimum).unwrap(), 0.0);
    assert_relative_eq!(objective.gradient(&minimum).unwrap().norm(), 0.0);
}

#[test]
fn test_fn_objective_in_f32() {
    let objective = FnObjective::new(|w: &DVector<f32>| w.dot(w));
    let point = DVector::from_vec(vec![1.0f32, -2.0]);

    let grad = objective.gradient(&point).unwrap();
    assert_relative_eq!(grad[0], 2.0, epsilon = 1e-2);
    assert_relative_eq!(grad[1], -4.0, epsilon = 1e-2);
}

#[test]
fn test_point_coercion() {
    let scalar: DVector<f64> = 5.0_f64.into_point().unwrap();
    assert_eq!(scalar, DVector::from_element(1, 5.0));

    let array: DVector<f64> = [5.0, 4.0].into_point().unwrap();
    assert_eq!(array, DVector::from_vec(vec![5.0, 4.0]));

    let slice: DVector<f64> = (&[1.0, 2.0, 3.0][..]).into_point().unwrap();
    assert_eq!(slice.len(), 3);

    let empty = IntoPoint::<f64>::into_point(Vec::<f64>::new()).unwrap_err();
    assert!(matches!(empty, ObjectiveError::InvalidPoint { .. }));
}
