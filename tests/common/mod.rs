#![allow(dead_code)]

use convection::{Config, Simulation, StepOutcome};

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init();
}

/// 5 nodes on `[0, 4]` so that `dx == 1` and the CFL number is `c * dt`.
pub fn unit_config(wave_speed: f64, time_step: f64, steps: usize) -> Config<f64> {
    Config::default()
        .with_node_count(5)
        .with_domain_length(4.0)
        .with_wave_speed(wave_speed)
        .with_time_step(time_step)
        .with_step_count(steps)
}

pub fn reference_config(wave_speed: f64, time_step: f64) -> Config<f64> {
    Config::default()
        .with_node_count(201)
        .with_domain_length(2.0)
        .with_wave_speed(wave_speed)
        .with_time_step(time_step)
        .with_step_count(300)
}

pub fn simulation(config: Config<f64>) -> Simulation<f64> {
    init_tracing();
    Simulation::with_config(config).expect("valid configuration")
}

/// Steps until finished, calling `f` after every step.
pub fn run_with(sim: &mut Simulation<f64>, mut f: impl FnMut(&Simulation<f64>)) {
    while let StepOutcome::Advanced(_) = sim.step().expect("initialized simulation") {
        f(sim)
    }
}
