//! Integration tests for the steady-state solver.

use std::rc::Rc;

use hn_components::{FluidComponent, Pipe};
use hn_core::units::{VolumeRate, m, m3ps, mps, pa};
use hn_fluids::Liquid;
use hn_solver::{NewtonConfig, SolverError, solve, solve_from, solve_warm};
use hn_system::System;
use nalgebra::DVector;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init();
}

fn pipe(name: &str) -> Rc<dyn FluidComponent> {
    Rc::new(Pipe::new(name.into(), m(10.0), m(0.05), m(4.5e-5), 0.5).unwrap())
}

fn loss(component: &Rc<dyn FluidComponent>, flow: VolumeRate) -> f64 {
    component
        .pressure_drop(&Liquid::water(), flow)
        .unwrap()
        .value
}

/// Every terminal speed times its port area matches the flow of its edge,
/// to within the solver tolerance.
fn assert_terminal_continuity(system: &System) {
    let graph = system.graph();
    for v in graph.vertex_ids() {
        let degree = graph.degree(v).unwrap();
        let edge = match (degree.incoming, degree.outgoing) {
            (1, 0) => graph.incoming(v).unwrap()[0],
            (0, 1) => graph.outgoing(v).unwrap()[0],
            _ => continue,
        };
        let edge = graph.edge(edge).unwrap();
        let speed = graph.vertex(v).unwrap().state().speed().unwrap().get().value;
        let q = edge.flow().get().value;
        let through_port = speed * edge.component().cross_section().value;
        assert!(
            (through_port - q).abs() < 1e-6,
            "vertex {v}: s·A = {through_port}, Q = {q}"
        );
    }
}

/// 0 -> 1 -> 2 with only the end pressures fixed.
fn pressure_driven_line(
    p0: f64,
    p2: f64,
) -> (System, Rc<dyn FluidComponent>, Rc<dyn FluidComponent>) {
    let (a, b) = (pipe("a"), pipe("b"));
    let mut system = System::new(Liquid::water());
    system.add_fluid_component(Rc::clone(&a), 0, 1).unwrap();
    system.add_fluid_component(Rc::clone(&b), 1, 2).unwrap();
    system.set_known_static_pressure(0, pa(p0)).unwrap();
    system.set_known_static_pressure(2, pa(p2)).unwrap();
    system.initialize().unwrap();
    (system, a, b)
}

/// `[s0, s2 | p1 | Q]`
fn line_start() -> DVector<f64> {
    DVector::from_vec(vec![2.0, 2.0, 2.5e5, 4.0e-3])
}

#[test]
fn single_pipe_outlet_speed_follows_the_flow() {
    init_tracing();
    let feed = pipe("feed");
    let (p0, s0) = (3.0e5, 1.5);
    let dp = loss(&feed, feed.flow_at(mps(s0)));

    let mut system = System::new(Liquid::water());
    system.add_fluid_component(feed, 0, 1).unwrap();
    system.set_known_speed(0, mps(s0)).unwrap();
    system.set_known_static_pressure(0, pa(p0)).unwrap();
    system.initialize().unwrap();
    assert_eq!(system.n_unknowns(), 2);

    let report = solve(&system, &NewtonConfig::default()).unwrap();
    assert!(report.residual_norm < 1e-6);

    // [s1 | p1]: equal areas keep the speed, the pipe takes its loss
    assert!((report.unknowns[0] - s0).abs() < 1e-9);
    assert!((report.unknowns[1] - (p0 - dp)).abs() < 1e-2);
    assert_terminal_continuity(&system);
}

#[test]
fn pressure_driven_series_line() {
    init_tracing();
    let (p0, p2) = (3.0e5, 1.0e5);

    for central_differences in [false, true] {
        let (system, a, b) = pressure_driven_line(p0, p2);
        assert_eq!(system.n_unknowns(), 4);

        let config = NewtonConfig {
            central_differences,
            ..NewtonConfig::default()
        };
        let report = solve_from(&system, &config, line_start()).unwrap();
        assert!(report.residual_norm < 1e-6);
        assert!(system.return_vec().unwrap().amax() < 1e-6);
        assert_terminal_continuity(&system);

        // the two pipes share the whole pressure difference
        let q = m3ps(report.unknowns[3]);
        assert!(q.value > 0.0);
        assert!((p0 - p2 - loss(&a, q) - loss(&b, q)).abs() < 1.0);
        // equal areas: junction kinetic terms cancel
        assert!((report.unknowns[2] - (p0 - loss(&a, q))).abs() < 1.0);
    }
}

#[test]
fn consistent_boundaries_need_no_iterations() {
    let feed = pipe("feed");
    let (p0, s0) = (2.0e5, 1.0);
    let dp = loss(&feed, feed.flow_at(mps(s0)));

    let mut system = System::new(Liquid::water());
    system.add_fluid_component(feed, 0, 1).unwrap();
    system.set_known_speed(0, mps(s0)).unwrap();
    system.set_known_speed(1, mps(s0)).unwrap();
    system.set_known_static_pressure(0, pa(p0)).unwrap();
    system.set_known_static_pressure(1, pa(p0 - dp)).unwrap();
    system.initialize().unwrap();

    let report = solve(&system, &NewtonConfig::default()).unwrap();
    assert_eq!(report.iterations, 0);
    assert_eq!(report.unknowns.len(), 0);
}

#[test]
fn conflicting_terminal_speeds_are_unsolvable() {
    let mut system = System::new(Liquid::water());
    system.add_fluid_component(pipe("feed"), 0, 1).unwrap();
    system.set_known_speed(0, mps(1.0)).unwrap();
    system.set_known_speed(1, mps(2.0)).unwrap();
    system.set_known_static_pressure(0, pa(2.0e5)).unwrap();
    system.initialize().unwrap();

    // only p1 is free; it cannot repair the outlet mass balance
    assert_eq!(system.n_unknowns(), 1);
    let err = solve(&system, &NewtonConfig::default()).unwrap_err();
    assert!(matches!(err, SolverError::Unsolvable { .. }));
}

#[test]
fn impossible_boundaries_are_unsolvable_and_restore_unknowns() {
    init_tracing();
    // outlet pressure far above inlet: no real outlet speed satisfies the energy row
    let mut system = System::new(Liquid::water());
    system.add_fluid_component(pipe("feed"), 0, 1).unwrap();
    system.set_known_speed(0, mps(1.0)).unwrap();
    system.set_known_static_pressure(0, pa(1.0e5)).unwrap();
    system.set_known_static_pressure(1, pa(9.0e5)).unwrap();
    system.initialize().unwrap();
    let before = system.unknown_values();

    let err = solve(&system, &NewtonConfig::default()).unwrap_err();
    assert!(matches!(err, SolverError::Unsolvable { .. }));
    assert_eq!(system.unknown_values(), before);
}

#[test]
fn warm_start_after_boundary_change() {
    let (mut system, _, _) = pressure_driven_line(3.0e5, 1.5e5);
    let cold = solve_from(&system, &NewtonConfig::default(), line_start()).unwrap();

    system.set_known_static_pressure(2, pa(1.0e5)).unwrap();
    let warm = solve_warm(&system, &NewtonConfig::default()).unwrap();

    assert!(warm.residual_norm < 1e-6);
    // a larger pressure difference drives more flow
    assert!(warm.unknowns[3] > cold.unknowns[3]);
    assert_terminal_continuity(&system);
}

#[test]
fn uninitialized_system_is_rejected() {
    let mut system = System::new(Liquid::water());
    system.add_fluid_component(pipe("feed"), 0, 1).unwrap();
    let err = solve(&system, &NewtonConfig::default()).unwrap_err();
    assert!(matches!(
        err,
        SolverError::System(hn_system::SystemError::NotInitialized)
    ));
}
