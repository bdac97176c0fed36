//! Positional control: step responses, saturation, degenerate actuators and
//! spline-smoothed cyclograms.

use armsim_common::robot::config::{ActuatorParams, Cyclogram, TravelRange};
use armsim_common::robot::diagnostics::Substitution;
use armsim_common::robot::kind::RobotKind;
use armsim_engine::Engine;

use super::base_config;

#[test]
fn cartesian_step_response_settles_on_target() {
    let mut c = base_config(RobotKind::Cartesian);
    c.cyclogram = Cyclogram::new(vec![1.0], vec![0.5], vec![0.0]);

    let mut engine = Engine::new(c).unwrap();
    let summary = engine.run().unwrap();

    assert_eq!(summary.samples, 1001);
    assert!((summary.duration - 1.0).abs() < 1e-12);
    assert!((summary.final_position[0] - 0.5).abs() < 0.025);
    assert_eq!(summary.final_position[1], 0.0);
    assert!(summary.quality[0].mean_error < 0.025);
    let initial_error = engine.result().unwrap().joints[0].error[0];
    assert_eq!(initial_error, 0.5);
    assert!(summary.quality[0].errors[0] < initial_error);
    // Joint 2 sits on its zero target from the first sample.
    assert_eq!(summary.quality[1].errors, vec![0.0]);
    assert_eq!(summary.quality[1].settling_times, vec![0.0]);
    assert!(engine.diagnostics().is_clean());
}

#[test]
fn voltage_ceiling_slows_the_response() {
    let mut c = base_config(RobotKind::Cartesian);
    c.cyclogram = Cyclogram::new(vec![1.0], vec![0.5], vec![0.0]);
    c.actuators[0].max_voltage = 0.01;

    let mut engine = Engine::new(c).unwrap();
    let summary = engine.run().unwrap();

    let q = summary.final_position[0];
    assert!(q > 0.0 && q < 0.02, "final = {q}");
    assert!(summary.quality[0].settling_times.is_empty());

    let electrical = engine.result().unwrap().electrical_view();
    assert!(electrical.joints[0].voltage.iter().all(|&u| u <= 0.01));
}

#[test]
fn missing_actuator_leaves_joint_motionless() {
    let mut c = base_config(RobotKind::Cartesian);
    c.cyclogram = Cyclogram::new(vec![0.5], vec![0.3], vec![0.3]);
    c.actuators = [ActuatorParams::default(); 2];

    let mut engine = Engine::new(c).unwrap();
    engine.run().unwrap();

    let result = engine.result().unwrap();
    assert_eq!(result.len(), 501);
    assert!(result.joints.iter().all(|j| j.position.iter().all(|&q| q == 0.0)));

    let d = engine.diagnostics();
    assert!(d.seen().contains(
        Substitution::ZERO_RESISTANCE | Substitution::ZERO_TIME_CONSTANT | Substitution::ZERO_INERTIA
    ));
    assert_eq!(d.count(Substitution::ZERO_INERTIA), 2 * 501);
    assert_eq!(engine.summary().unwrap().diagnostics.zero_inertia, 1002);
}

#[test]
fn travel_limits_hold_for_every_kind() {
    for robot in RobotKind::ALL {
        let mut c = base_config(robot);
        let g = c.geometry.for_kind_mut(robot);
        g.link_1 = 0.5;
        g.link_2 = 0.4;
        g.mass_1 = 1.0;
        g.mass_2 = 0.5;
        g.moment_1 = 0.1;
        g.moment_2 = 0.05;
        g.joint_1 = TravelRange::new(-0.1, 0.1);
        g.joint_2 = TravelRange::new(-0.2, 0.2);
        c.cyclogram = Cyclogram::new(vec![1.0, 2.0], vec![0.5, -0.5], vec![-0.5, 0.5]);

        let mut engine = Engine::new(c).unwrap();
        engine.run().unwrap();
        let result = engine.result().unwrap();
        for (j, range) in [(0, (-0.1, 0.1)), (1, (-0.2, 0.2))] {
            assert!(
                result.joints[j]
                    .position
                    .iter()
                    .all(|&q| q >= range.0 && q <= range.1),
                "{robot}: joint {} left its range",
                j + 1
            );
        }
    }
}

#[test]
fn scara_multi_waypoint_run_stays_finite() {
    let mut c = base_config(RobotKind::Scara);
    let g = &mut c.geometry.scara;
    g.link_1 = 0.5;
    g.link_2 = 0.4;
    g.mass_2 = 1.5;
    g.moment_1 = 0.1;
    g.moment_2 = 0.05;
    c.cyclogram = Cyclogram::new(vec![1.0, 2.0, 3.0], vec![0.3, 0.6, 0.0], vec![0.2, -0.4, 0.0]);

    let mut engine = Engine::new(c).unwrap();
    let summary = engine.run().unwrap();

    assert_eq!(summary.samples, 3 * 1001);
    assert_eq!(summary.quality[0].errors.len(), 3);
    assert_eq!(summary.quality[1].errors.len(), 3);
    let result = engine.result().unwrap();
    assert!(result.joints.iter().all(|j| j.position.iter().all(|q| q.is_finite())));

    let task = result.task.as_ref().unwrap();
    assert_eq!(task.x.len(), result.len());
    assert_eq!(task.waypoint_x.len(), 3);
}

#[test]
fn spline_run_tracks_resampled_setpoints() {
    let mut c = base_config(RobotKind::Cartesian);
    c.cyclogram = Cyclogram::new(vec![1.0, 2.0, 3.0], vec![0.3, 0.6, 0.0], vec![0.2, -0.4, 0.0]);
    c.spline.enabled = true;
    c.spline.density = 50;

    let mut engine = Engine::new(c).unwrap();
    let summary = engine.run().unwrap();

    assert!(summary.spline);
    assert_eq!(summary.trajectory_length, 101);
    assert!(summary.samples > 1001);
    // Quality is still measured against the three cyclogram waypoints.
    assert_eq!(summary.quality[0].errors.len(), 3);

    let result = engine.result().unwrap();
    assert_eq!(result.setpoints.len(), 101);
    assert_eq!(result.setpoints.t[0], 1.0);
    assert!((result.setpoints.q[0][50] - 0.6).abs() < 1e-9);

    // The waypoint group describes the cyclogram, not the resampled grid.
    let waypoints = result.trajectory_view().waypoints;
    assert_eq!(waypoints.t, &[1.0, 2.0, 3.0][..]);
    assert_eq!(waypoints.q1, &[0.3, 0.6, 0.0][..]);
    assert_eq!(waypoints.q2.len(), 3);
    assert_eq!(waypoints.x.map(<[f64]>::len), Some(3));
    assert_eq!(waypoints.y.map(<[f64]>::len), Some(3));
    // Cartesian projection is the identity.
    assert_eq!(waypoints.x, Some(waypoints.q1));
}

#[test]
fn recompute_is_deterministic() {
    let mut c = base_config(RobotKind::Cylindrical);
    c.geometry.cylindrical.link_1 = 0.3;
    c.geometry.cylindrical.link_2 = 0.2;
    c.geometry.cylindrical.mass_2 = 1.0;
    c.cyclogram = Cyclogram::new(vec![0.5, 1.0], vec![0.4, -0.2], vec![0.1, 0.0]);

    let mut engine = Engine::new(c).unwrap();
    let first = engine.compute().unwrap().clone();
    let second = engine.compute().unwrap().clone();
    assert_eq!(first, second);
}
