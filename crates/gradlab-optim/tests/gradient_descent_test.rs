//! Integration tests for gradient descent.

use approx::assert_relative_eq;
use gradlab_autodiff::prelude::*;
use gradlab_core::prelude::*;
use gradlab_optim::{run_gradient_descent, GradientDescent, GradientDescentConfig};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

/// f(w) = w^2 in one dimension
#[derive(Debug)]
struct Parabola;

impl DifferentiableFn for Parabola {
    fn eval<R: Real>(&self, w: &[R]) -> R {
        w[0] * w[0]
    }
}

#[test]
fn test_parabola_single_step() {
    let objective = AutoDiff::new(Parabola);
    let config = GradientDescentConfig::<f64>::new()
        .with_max_iterations(1)
        .with_step_size(0.1);

    let trace = run_gradient_descent(&objective, 5.0, config).unwrap();

    let history: Vec<f64> = trace.iter().map(|w| w[0]).collect();
    assert_eq!(history, vec![5.0, 4.0]);
    assert_eq!(trace.termination_reason, TerminationReason::MaxIterations);
}

#[test]
fn test_history_length_with_defaults() {
    let objective = AutoDiff::new(Rosenbrock::default());

    let config = GradientDescentConfig::<f64>::new();

    let trace = run_gradient_descent(&objective, [-1.2, 1.0], config).unwrap();

    assert_eq!(trace.len(), 101);
    assert_eq!(trace.steps_taken(), 100);
    assert_eq!(trace.initial_point(), &DVector::from_vec(vec![-1.2, 1.0]));
    assert!(trace.iter().all(|w| w.len() == 2));
}

#[test]
fn test_normalized_steps_have_fixed_length() {
    let objective = AutoDiff::new(SumOfSquares);
    let config = GradientDescentConfig::<f64>::new()
        .with_max_iterations(10)
        .with_step_size(0.25)
        .with_normalize(true);

    let trace = run_gradient_descent(&objective, [3.0, 4.0], config).unwrap();

    for pair in trace.iterates.windows(2) {
        assert_relative_eq!((&pair[1] - &pair[0]).norm(), 0.25, epsilon = 1e-12);
    }
}

#[test]
fn test_normalized_descent_at_stationary_point() {
    let objective = AutoDiff::new(SumOfSquares);
    let config = GradientDescentConfig::<f64>::new()
        .with_max_iterations(5)
        .with_normalize(true);

    let trace = run_gradient_descent(&objective, [0.0, 0.0, 0.0], config).unwrap();

    assert_eq!(trace.len(), 6);
    for w in &trace {
        assert!(w.iter().all(|x| x.is_finite() && *x == 0.0));
    }
}

#[test]
fn test_backtracking_rule_decreases_objective() {
    let objective = AutoDiff::new(Rosenbrock::default());
    let config = GradientDescentConfig::<f64>::new()
        .with_max_iterations(200)
        .with_step_length_rule(StepLengthRule::backtracking());

    let trace = run_gradient_descent(&objective, [-1.2, 1.0], config).unwrap();
    let costs = trace.cost_history(&objective).unwrap();

    for pair in costs.windows(2) {
        assert!(pair[1] <= pair[0]);
    }
    assert!(costs[costs.len() - 1] < costs[0]);
}

#[test]
fn test_diminishing_rule() {
    let objective = AutoDiff::new(SumOfSquares);
    let config = GradientDescentConfig::<f64>::new()
        .with_max_iterations(3)
        .with_step_length_rule(StepLengthRule::Diminishing);

    // g = 2w: w1 = w0 - 1 * 2 w0 = -w0, w2 = w1 - 0.5 * 2 w1 = 0
    let trace = run_gradient_descent(&objective, 1.0, config).unwrap();

    assert_eq!(trace.iterates[1][0], -1.0);
    assert_eq!(trace.iterates[2][0], 0.0);
    assert_eq!(trace.iterates[3][0], 0.0);
}

#[test]
fn test_empty_initial_point_is_rejected() {
    let objective = AutoDiff::new(SumOfSquares);

    let config = GradientDescentConfig::<f64>::new();

    let err = run_gradient_descent(&objective, Vec::<f64>::new(), config).unwrap_err();

    assert!(matches!(
        err,
        OptimizerError::Objective(ObjectiveError::InvalidPoint { .. })
    ));
}

#[test]
fn test_gradient_dimension_mismatch_fails_fast() {
    let objective = AnalyticObjective::new(
        |w: &DVector<f64>| w.norm_squared(),
        |_: &DVector<f64>| DVector::zeros(5),
    );

    let config = GradientDescentConfig::<f64>::new();

    let err = run_gradient_descent(&objective, [1.0, 2.0], config).unwrap_err();

    assert!(matches!(
        err,
        OptimizerError::Objective(ObjectiveError::DimensionMismatch { .. })
    ));
}

#[test]
fn test_huge_iteration_budget_still_fails_on_first_evaluation() {
    let objective = QuadraticCost::<f64>::simple(3);
    let config = GradientDescentConfig::<f64>::new().with_max_iterations(usize::MAX);
    assert!(config.validate().is_ok());

    let err = run_gradient_descent(&objective, [1.0, 2.0], config).unwrap_err();

    assert!(matches!(
        err,
        OptimizerError::Objective(ObjectiveError::DimensionMismatch { .. })
    ));
}

#[test]
fn test_line_search_failure_is_reported() {
    // The gradient points uphill, so no backtracking step decreases f.
    let objective = AnalyticObjective::new(
        |w: &DVector<f64>| w[0],
        |_: &DVector<f64>| DVector::from_element(1, -1.0),
    );
    let config = GradientDescentConfig::<f64>::new()
        .with_step_length_rule(StepLengthRule::Backtracking(
            BacktrackingParams::default().with_max_shrinks(5),
        ));

    let err = run_gradient_descent(&objective, 0.0, config).unwrap_err();

    assert!(matches!(err, OptimizerError::LineSearchFailed { .. }));
    assert!(err.to_string().contains("Line search did not converge"));
}

#[test]
fn test_optimizer_is_shareable_across_threads() {
    let optimizer =
        GradientDescent::new(GradientDescentConfig::<f64>::new().with_max_iterations(20));

    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|i| {
                let optimizer = &optimizer;
                scope.spawn(move || {
                    let objective = AutoDiff::new(SumOfSquares);
                    optimizer.optimize(&objective, [i as f64, 1.0]).unwrap()
                })
            })
            .collect();

        for (i, handle) in handles.into_iter().enumerate() {
            let trace = handle.join().unwrap();
            assert_eq!(trace.len(), 21);
            assert_eq!(trace.iterates[0][0], i as f64);
        }
    });
}

#[cfg(feature = "serde")]
#[test]
fn test_config_from_json() {
    let config: GradientDescentConfig<f64> =
        serde_json::from_str(r#"{ "max_iterations": 10, "normalize": true }"#).unwrap();
    assert_eq!(config.max_iterations, 10);
    assert!(config.normalize);
    assert_eq!(config.step_size, 1e-4);
    assert_eq!(config.step_length_rule, StepLengthRule::Fixed);

    let config: GradientDescentConfig<f64> = serde_json::from_str(
        r#"{ "step_length_rule": { "backtracking": { "rho": 0.5 } } }"#,
    )
    .unwrap();
    assert_eq!(
        config.step_length_rule,
        StepLengthRule::Backtracking(BacktrackingParams::default().with_rho(0.5))
    );
}

#[cfg(feature = "serde")]
#[test]
fn test_unknown_config_fields_are_rejected() {
    let result: std::result::Result<GradientDescentConfig<f64>, _> =
        serde_json::from_str(r#"{ "max_its": 10 }"#);
    assert!(result.is_err());

    let result: std::result::Result<GradientDescentConfig<f64>, _> =
        serde_json::from_str(r#"{ "version": "normalized" }"#);
    assert!(result.is_err());
}

fn start_point() -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(-10.0f64..10.0, 1..4)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn history_starts_at_initial_point_and_has_fixed_length(
        w0 in start_point(),
        max_iterations in 1usize..30,
    ) {
        let objective = AutoDiff::new(SumOfSquares);
        let config = GradientDescentConfig::<f64>::new()
            .with_max_iterations(max_iterations)
            .with_step_size(0.05);

        let trace = run_gradient_descent(&objective, w0.clone(), config).unwrap();

        prop_assert_eq!(trace.len(), max_iterations + 1);
        prop_assert_eq!(trace.iterates[0].as_slice(), w0.as_slice());
    }

    #[test]
    fn every_step_follows_the_update_rule(
        w0 in start_point(),
        normalize in any::<bool>(),
    ) {
        let objective = AutoDiff::new(SoftplusRidge { lambda: 0.5 });
        let step = 0.1;
        let config = GradientDescentConfig::<f64>::new()
            .with_max_iterations(15)
            .with_step_size(step)
            .with_normalize(normalize);

        let trace = run_gradient_descent(&objective, w0, config).unwrap();

        for k in 0..trace.steps_taken() {
            let mut direction = objective.gradient(&trace.iterates[k]).unwrap();
            let norm = direction.norm();
            if normalize && norm > 0.0 {
                direction /= norm;
            }
            if !normalize || norm > 0.0 {
                let expected = &trace.iterates[k] - &direction * step;
                prop_assert_eq!(&trace.iterates[k + 1], &expected);
            }
        }
    }

    #[test]
    fn runs_are_deterministic(w0 in start_point(), normalize in any::<bool>()) {
        let objective = AutoDiff::new(SoftplusRidge { lambda: 0.1 });
        let config = GradientDescentConfig::<f64>::new()
            .with_max_iterations(25)
            .with_step_size(0.2)
            .with_normalize(normalize);

        let first = run_gradient_descent(&objective, w0.clone(), config.clone()).unwrap();
        let second = run_gradient_descent(&objective, w0, config).unwrap();

        prop_assert_eq!(first.iterates, second.iterates);
    }
}
