//! Property-based tests for the simulation core.
//!
//! These tests use proptest to generate random geometries, gains and
//! waypoints and verify invariants that must hold for any input.
//!
//! Run with: cargo test -p armsim_engine -- proptest

use armsim_common::robot::config::{ActuatorParams, Cyclogram, SimulationConfig, TravelRange};
use armsim_common::robot::kind::RobotKind;
use armsim_engine::Engine;
use armsim_engine::arm::{ArmModel, Cylindrical, Scara};
use armsim_engine::dynamics::fluctuation_filter;
use armsim_engine::planner::spline::NaturalCubicSpline;
use proptest::prelude::*;

// =============================================================================
// Strategies
// =============================================================================

fn arb_kind() -> impl Strategy<Value = RobotKind> {
    prop_oneof![
        Just(RobotKind::Cartesian),
        Just(RobotKind::Scara),
        Just(RobotKind::Cylindrical),
        Just(RobotKind::Mixed),
    ]
}

/// Strictly increasing knot positions starting at `0.1..1.0`.
fn arb_knots(n: usize) -> impl Strategy<Value = Vec<f64>> {
    (0.1..1.0f64, prop::collection::vec(0.05..1.0f64, n - 1)).prop_map(|(first, gaps)| {
        let mut x = vec![first];
        for g in gaps {
            let next = x[x.len() - 1] + g;
            x.push(next);
        }
        x
    })
}

/// Short single-segment run of `kind` with random gains and targets.
fn arb_short_run() -> impl Strategy<Value = SimulationConfig> {
    (
        arb_kind(),
        0.5..50.0f64,
        0.0..5.0f64,
        prop::array::uniform2(-2.0..2.0f64),
        prop::array::uniform2(0.05..0.5f64),
    )
        .prop_map(|(robot, kp, kd, target, half_range)| {
            let actuator = ActuatorParams {
                inertia: 0.5,
                electrical_time_constant: 0.002,
                max_voltage: 48.0,
                flux: 1.0,
                emf_constant: 1.0,
                resistance: 0.1,
                torque_constant: 10.0,
            };
            let mut c = SimulationConfig {
                robot,
                actuators: [actuator; 2],
                cyclogram: Cyclogram::new(vec![0.3], vec![target[0]], vec![target[1]]),
                ..Default::default()
            };
            c.pid.kp = vec![kp, kp, 0.0, 0.0];
            c.pid.kd = vec![kd, kd, 0.0, 0.0];
            let g = c.geometry.for_kind_mut(robot);
            g.link_1 = 0.5;
            g.link_2 = 0.3;
            g.mass_1 = 1.0;
            g.mass_2 = 0.5;
            g.moment_1 = 0.1;
            g.moment_2 = 0.05;
            g.joint_1 = TravelRange::new(-half_range[0], half_range[0]);
            g.joint_2 = TravelRange::new(-half_range[1], half_range[1]);
            c
        })
}

// =============================================================================
// Integrator invariants
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn proptest_positions_stay_within_travel(config in arb_short_run()) {
        let ranges = config.joint_ranges();
        let mut engine = Engine::new(config).unwrap();
        engine.compute().unwrap();
        let result = engine.result().unwrap();
        for j in 0..2 {
            for &q in &result.joints[j].position {
                prop_assert!(q >= ranges[j].min && q <= ranges[j].max);
            }
        }
    }

    #[test]
    fn proptest_runs_are_deterministic(config in arb_short_run()) {
        let mut a = Engine::new(config.clone()).unwrap();
        let mut b = Engine::new(config).unwrap();
        prop_assert_eq!(a.compute().unwrap(), b.compute().unwrap());
    }
}

// =============================================================================
// Kinematics
// =============================================================================

proptest! {
    #[test]
    fn proptest_scara_round_trip(
        a1 in 0.5..1.0f64,
        a2 in 0.1..0.4f64,
        q1 in -3.0..3.0f64,
        q2 in -3.0..3.0f64,
    ) {
        let arm = Scara { a1, a2, ..Default::default() };
        let p = arm.forward([q1, q2]);
        let sol = arm.inverse(p);
        let back = arm.forward(sol.joints);
        prop_assert!((back[0] - p[0]).abs() < 1e-6, "x: {} vs {}", back[0], p[0]);
        prop_assert!((back[1] - p[1]).abs() < 1e-6, "y: {} vs {}", back[1], p[1]);
    }

    #[test]
    fn proptest_cylindrical_round_trip(
        a1 in 0.1..1.0f64,
        q1 in -3.0..3.0f64,
        q2 in 0.0..0.5f64,
    ) {
        let arm = Cylindrical { a1, ..Default::default() };
        let p = arm.forward([q1, q2]);
        let sol = arm.inverse(p);
        prop_assert!(sol.substitutions.is_empty());
        prop_assert!((sol.joints[0] - q1).abs() < 1e-9);
        prop_assert!((sol.joints[1] - q2).abs() < 1e-9);
    }
}

// =============================================================================
// Load conditioning and spline
// =============================================================================

proptest! {
    #[test]
    fn proptest_filtered_load_never_exceeds_motor_torque(
        motor in prop_oneof![-100.0..-0.01f64, 0.01..100.0f64],
        ratio in 0.0..50.0f64,
    ) {
        // Load acting in the motor's direction.
        let load = motor * ratio;
        let m = fluctuation_filter(motor, load, false);
        prop_assert!(m.abs() <= motor.abs());
        prop_assert!(m * motor >= 0.0);
    }

    #[test]
    fn proptest_spline_passes_through_knots(
        x in arb_knots(6),
        y in prop::collection::vec(-2.0..2.0f64, 6),
    ) {
        let spline = NaturalCubicSpline::new(&x, &y);
        for (xi, yi) in x.iter().zip(y.iter()) {
            prop_assert!((spline.eval(*xi) - yi).abs() < 1e-9);
        }
    }
}
