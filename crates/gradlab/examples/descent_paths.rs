//! Compares gradient descent step-length rules on the Rosenbrock function.
//!
//! Run with `RUST_LOG=debug` to see every iteration:
//!
//! ```text
//! RUST_LOG=info cargo run --example descent_paths
//! ```

use gradlab::prelude::*;

fn main() -> OptimizerResult<()> {
    env_logger::init();

    let objective = AutoDiff::new(Rosenbrock::default());
    let start = [-1.2, 1.0];

    let runs = [
        (
            "fixed",
            GradientDescentConfig::<f64>::new().with_step_size(5e-4),
        ),
        (
            "normalized",
            GradientDescentConfig::new()
                .with_step_size(1e-2)
                .with_normalize(true)
                .with_seed(0),
        ),
        (
            "backtracking",
            GradientDescentConfig::new().with_step_length_rule(StepLengthRule::backtracking()),
        ),
    ];

    println!("{:<14} {:>12} {:>12} {:>24}", "rule", "f(w0)", "f(w_end)", "w_end");
    for (label, config) in runs {
        let trace = run_gradient_descent(&objective, start, config.with_max_iterations(500))?;
        let costs = trace.cost_history(&objective)?;
        let end = trace.final_point();

        println!(
            "{:<14} {:>12.4} {:>12.4e} {:>11.5}, {:>11.5}",
            label,
            costs[0],
            costs[costs.len() - 1],
            end[0],
            end[1]
        );
    }

    // 1 / (k + 1) is too long a first step for the Rosenbrock valley, so the
    // diminishing rule is shown on a gentler convex loss.
    let softplus = AutoDiff::new(SoftplusRidge { lambda: 0.5 });
    let config = GradientDescentConfig::<f64>::new()
        .with_max_iterations(500)
        .with_step_length_rule(StepLengthRule::Diminishing);
    let trace = run_gradient_descent(&softplus, [3.0, -2.0], config)?;
    let costs = trace.cost_history(&softplus)?;
    println!(
        "{:<14} {:>12.4} {:>12.4e} {:>11.5}, {:>11.5}",
        "diminishing",
        costs[0],
        costs[costs.len() - 1],
        trace.final_point()[0],
        trace.final_point()[1]
    );

    Ok(())
}
