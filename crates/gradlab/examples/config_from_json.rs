//! Loads optimizer settings from JSON and shows that misspelled options are
//! rejected rather than ignored.

use gradlab::prelude::*;

fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let config: GradientDescentConfig<f64> = serde_json::from_str(
        r#"{
            "max_iterations": 25,
            "step_size": 0.1,
            "normalize": true,
            "seed": 42
        }"#,
    )?;
    config.validate()?;
    log::info!("loaded {:?}", config);

    let cost = QuadraticCost::<f64>::simple(2);
    let trace = run_gradient_descent(&cost, [2.0, -1.0], config)?;
    println!(
        "normalized descent: {} iterates, final point {:?}",
        trace.len(),
        trace.final_point().as_slice()
    );

    match serde_json::from_str::<NewtonConfig<f64>>(r#"{ "epsilon": 1e-3 }"#) {
        Ok(_) => println!("unexpected: unknown field accepted"),
        Err(err) => println!("rejected Newton config: {err}"),
    }

    Ok(())
}
