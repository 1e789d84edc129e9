//! Shows Newton's method converging on a convex objective and stopping early
//! on a nonconvex one.
//!
//! ```text
//! RUST_LOG=warn cargo run --example newton_divergence
//! ```

use gradlab::prelude::*;

fn report(label: &str, trace: &OptimizationTrace<f64>) {
    println!(
        "{label}: {} steps, stopped by {:?}, final point {:?}",
        trace.steps_taken(),
        trace.termination_reason,
        trace.final_point().as_slice()
    );
    if let Some(rejected) = trace.rejected_value {
        println!("{label}: discarded candidate had f = {rejected:.6}");
    }
}

fn main() -> OptimizerResult<()> {
    env_logger::init();

    // f(w) = w^2 from w = 5: one damped step lands next to 0.
    let parabola = AutoDiff::new(SumOfSquares);
    let config = NewtonConfig::<f64>::new().with_max_iterations(5);
    let trace = run_newtons_method(&parabola, 5.0, config)?;
    report("parabola", &trace);

    // The Rosenbrock valley defeats the raw Newton step after a few iterations.
    let rosenbrock = AutoDiff::new(Rosenbrock::default());
    let trace = run_newtons_method(&rosenbrock, [-1.2, 1.0], NewtonConfig::<f64>::new())?;
    report("rosenbrock", &trace);

    // A flat direction: the Hessian of w0^4 + w1^2 vanishes along w0 near 0.
    let valley = AutoDiff::new(QuarticValley);
    let trace = run_newtons_method(&valley, [1.0, 1.0], NewtonConfig::<f64>::new())?;
    report("quartic valley", &trace);

    Ok(())
}
