//! Behaviour of the four schemes through the public simulation API.

use convection::{SchemeKind, SimError, Status, StepOutcome};

mod common;
use common::{reference_config, run_with, simulation, unit_config};

#[test]
fn initial_condition_for_every_scheme() {
    let sim = simulation(reference_config(0.5, 0.01));
    let state = sim.current_state();

    assert_eq!(state.coordinates.len(), 201);
    for kind in SchemeKind::ALL {
        let u = state.scheme(kind);
        assert_eq!(u.len(), 201, "{kind}");
        assert_eq!(u[0], 1.0, "{kind}");
        assert!(u[1..].iter().all(|&u| u == 0.0), "{kind}");
    }
}

#[test]
fn boundary_is_preserved_at_every_tick() {
    let mut sim = simulation(reference_config(0.5, 0.01));
    run_with(&mut sim, |sim| {
        let state = sim.current_state();
        for kind in SchemeKind::ALL {
            assert_eq!(state.scheme(kind)[0], 1.0, "{kind} at tick {}", state.tick);
            assert_eq!(state.scheme(kind)[200], 0.0, "{kind} at tick {}", state.tick);
        }
    });
    assert_eq!(sim.tick(), 300);
}

#[test]
fn upwind_unit_cfl_shifts_exactly() {
    let mut sim = simulation(unit_config(1.0, 1.0, 3));
    assert_eq!(sim.sigma(), Some(1.0));

    let mut old = sim.current_state().upwind;
    run_with(&mut sim, |sim| {
        let new = sim.current_state().upwind;
        for i in 1..4 {
            assert_eq!(new[i], old[i - 1]);
        }
        old = new;
    });
}

#[test]
fn upwind_half_cfl_averages() {
    let mut sim = simulation(unit_config(1.0, 0.5, 3));
    assert_eq!(sim.sigma(), Some(0.5));

    let mut old = sim.current_state().upwind;
    run_with(&mut sim, |sim| {
        let new = sim.current_state().upwind;
        for i in 1..4 {
            assert_eq!(new[i], 0.5 * old[i] + 0.5 * old[i - 1]);
        }
        old = new;
    });
}

#[test]
fn leapfrog_first_tick_matches_upwind() {
    for time_step in [0.25, 0.5, 1.0] {
        let mut sim = simulation(unit_config(1.0, time_step, 2));
        sim.step().unwrap();
        let state = sim.current_state();
        assert_eq!(state.leapfrog, state.upwind);

        // from there on the centered update takes over; at unit CFL both
        // are exact shifts and keep agreeing
        sim.step().unwrap();
        let state = sim.current_state();
        if time_step < 1.0 {
            assert_ne!(state.leapfrog, state.upwind);
        } else {
            assert_eq!(state.leapfrog, state.upwind);
        }
    }
}

#[test]
fn lax_wendroff_is_lax_friedrichs_plus_curvature() {
    // one step from identical inputs
    let sigma: f64 = 0.5;
    let mut sim = simulation(reference_config(0.5, 0.01).with_step_count(1));
    let before = sim.current_state().upwind;
    sim.step().unwrap();
    let after = sim.current_state();

    for i in 1..200 {
        let curvature = before[i + 1] - 2.0 * before[i] + before[i - 1];
        let expected = 0.5 * (sigma * sigma - 1.0) * curvature;
        let diff = after.lax_wendroff[i] - after.lax_friedrichs[i];
        assert!((diff - expected).abs() < 1e-12, "node {i}");
    }
}

#[test]
fn stable_monotone_schemes_stay_bounded() {
    let mut sim = simulation(reference_config(0.5, 0.01));
    run_with(&mut sim, |sim| {
        let state = sim.current_state();
        for kind in [SchemeKind::Upwind, SchemeKind::LaxFriedrichs] {
            assert!(state
                .scheme(kind)
                .iter()
                .all(|&u| (-1e-12..=1.0 + 1e-12).contains(&u)));
        }
    });
}

#[test]
fn lax_friedrichs_diffuses_more_than_upwind() {
    // smeared front: more nodes strictly between 0 and 1
    let mut sim = simulation(reference_config(0.5, 0.01).with_step_count(100));
    run_with(&mut sim, |_| {});

    let state = sim.current_state();
    let smeared = |u: &[f64]| u.iter().filter(|&&u| u > 1e-3 && u < 1.0 - 1e-3).count();
    assert!(smeared(&state.lax_friedrichs) > smeared(&state.upwind));
}

#[test]
fn upwind_diverges_above_unit_cfl() {
    // dx == 0.01, so dt == 0.015 gives sigma == 1.5
    let mut sim = simulation(reference_config(1.0, 0.015));
    assert!((sim.sigma().unwrap() - 1.5).abs() < 1e-12);

    let mut amplitudes = vec![sim.current_state().max_abs(SchemeKind::Upwind)];
    run_with(&mut sim, |sim| {
        amplitudes.push(sim.current_state().max_abs(SchemeKind::Upwind));
    });

    assert_eq!(amplitudes.len(), 301);
    assert!(amplitudes.windows(2).all(|w| w[1] > w[0]));
    assert!(amplitudes[300] > 1e80);
}

#[test]
fn upwind_front_grows_slightly_above_unit_cfl() {
    // sigma == 1.005: the front amplitude is sigma^n while it travels
    let mut sim = simulation(reference_config(1.0, 0.01005).with_step_count(150));

    let mut amplitudes = vec![sim.current_state().max_abs(SchemeKind::Upwind)];
    run_with(&mut sim, |sim| {
        amplitudes.push(sim.current_state().max_abs(SchemeKind::Upwind));
    });

    assert!(amplitudes.windows(2).all(|w| w[1] > w[0]));
    assert!(amplitudes[150] > 2.0);
}

#[test]
fn overflowing_scheme_reports_non_finite_amplitude() {
    // sigma == 3: upwind overflows long before 2000 ticks
    let mut sim = simulation(reference_config(1.0, 0.03).with_step_count(2000));
    run_with(&mut sim, |_| {});

    let state = sim.current_state();
    assert!(state.diverged(SchemeKind::Upwind));
    assert!(!state.max_abs(SchemeKind::Upwind).is_finite());
}

#[test]
fn current_state_is_idempotent() {
    let mut sim = simulation(reference_config(0.5, 0.01));
    for _ in 0..10 {
        sim.step().unwrap();
    }
    assert_eq!(sim.current_state(), sim.current_state());
}

#[test]
fn finished_simulation_ignores_further_steps() {
    let mut sim = simulation(unit_config(1.0, 0.5, 5));
    for tick in 1..=5 {
        assert_eq!(sim.status(), Status::Ready);
        assert_eq!(sim.step().unwrap(), StepOutcome::Advanced(tick));
    }
    assert_eq!(sim.status(), Status::Finished);

    let last = sim.current_state();
    assert_eq!(sim.step().unwrap(), StepOutcome::Finished);
    assert_eq!(sim.current_state(), last);
}

#[test]
fn reinitialize_resets_all_schemes() {
    let mut sim = simulation(unit_config(1.0, 0.5, 5));
    run_with(&mut sim, |_| {});
    let fresh = simulation(unit_config(1.0, 0.5, 5)).current_state();

    sim.initialize(unit_config(1.0, 0.5, 5)).unwrap();
    assert_eq!(sim.status(), Status::Ready);
    assert_eq!(sim.current_state(), fresh);
}

#[test]
fn invalid_configuration_is_rejected() {
    let mut sim = convection::Simulation::<f64>::new();
    for config in [
        unit_config(1.0, 0.5, 5).with_node_count(1),
        unit_config(1.0, 0.0, 5),
        unit_config(1.0, -0.5, 5),
        unit_config(1.0, 0.5, 5).with_domain_length(-2.0),
    ] {
        assert!(matches!(
            sim.initialize(config),
            Err(SimError::InvalidConfiguration { .. })
        ));
    }
    assert_eq!(sim.status(), Status::Uninitialized);
    assert!(matches!(sim.step(), Err(SimError::InvalidState(_))));
}
