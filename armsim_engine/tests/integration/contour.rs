//! Contour control: inverse kinematics of sampled paths, projection back to
//! task space and analysis against the contour joint setpoints.

use core::f64::consts::PI;

use armsim_common::consts::{CONTOUR_SAMPLES, CONTOUR_T_END, CONTOUR_T_START};
use armsim_common::robot::config::{ContourPath, TravelRange};
use armsim_common::robot::kind::{ControlMode, RobotKind};
use armsim_engine::Engine;
use armsim_engine::planner::contour::linspace;

use super::base_config;

#[test]
fn mixed_circle_closes_on_itself() {
    let mut c = base_config(RobotKind::Mixed);
    c.control = ControlMode::Contour;
    c.geometry.mixed.link_2 = 0.3;
    c.geometry.mixed.mass_2 = 0.5;
    c.geometry.mixed.joint_1 = TravelRange::new(-1.0, 2.0);
    c.geometry.mixed.joint_2 = TravelRange::new(-PI, PI);
    c.contour = Some(ContourPath::Circle {
        center: [0.0, 0.0],
        radius: 0.3,
        speed: 1.0,
    });

    let mut engine = Engine::new(c).unwrap();
    let summary = engine.run().unwrap();

    assert_eq!(summary.trajectory_length, CONTOUR_SAMPLES);
    assert!(engine.diagnostics().is_clean());

    let result = engine.result().unwrap();
    assert_eq!(result.setpoints.t[0], CONTOUR_T_START);
    assert!((result.setpoints.t[CONTOUR_SAMPLES - 1] - CONTOUR_T_END).abs() < 1e-9);

    // Closing is a property of the commanded path: the arm starts at rest
    // away from the circle, so the tracked trajectory's first sample is not
    // on it. The check reads the forward projection of the joint setpoints.
    let task = result.task.as_ref().unwrap();
    let last = CONTOUR_SAMPLES - 1;
    assert!((task.waypoint_x[0] - task.waypoint_x[last]).abs() < 1e-9);
    assert!((task.waypoint_y[0] - task.waypoint_y[last]).abs() < 1e-9);
    // Projected waypoints lie on the requested circle.
    for (x, y) in task.waypoint_x.iter().zip(task.waypoint_y.iter()) {
        let r = x.hypot(*y);
        assert!((r - 0.3).abs() < 1e-9, "r = {r}");
    }

    // One steady-state error per contour sample.
    assert_eq!(summary.quality[0].errors.len(), CONTOUR_SAMPLES);
    assert!(result.joints.iter().all(|j| j.position.iter().all(|q| q.is_finite())));
}

#[test]
fn scara_line_round_trips_through_the_kinematics() {
    let mut c = base_config(RobotKind::Scara);
    c.control = ControlMode::Contour;
    c.geometry.scara.link_1 = 0.5;
    c.geometry.scara.link_2 = 0.4;
    c.contour = Some(ContourPath::Line {
        start: [0.2, 0.5],
        end: [-0.2, 0.6],
        speed: 0.5,
    });

    let mut engine = Engine::new(c).unwrap();
    engine.compute().unwrap();
    let task = engine.project().unwrap().clone();

    let xs = linspace(0.2, -0.2, CONTOUR_SAMPLES);
    let ys = linspace(0.5, 0.6, CONTOUR_SAMPLES);
    for i in 0..CONTOUR_SAMPLES {
        assert!((task.waypoint_x[i] - xs[i]).abs() < 1e-9);
        assert!((task.waypoint_y[i] - ys[i]).abs() < 1e-9);
    }
    assert!(engine.diagnostics().is_clean());
}

#[test]
fn unreachable_contour_is_clamped_and_counted() {
    let mut c = base_config(RobotKind::Scara);
    c.control = ControlMode::Contour;
    c.geometry.scara.link_1 = 0.3;
    c.geometry.scara.link_2 = 0.2;
    // Entirely beyond the 0.5 reach.
    c.contour = Some(ContourPath::Line {
        start: [0.0, 1.0],
        end: [0.0, 2.0],
        speed: 1.0,
    });

    let mut engine = Engine::new(c).unwrap();
    let summary = engine.run().unwrap();
    assert_eq!(summary.diagnostics.ik_domain, CONTOUR_SAMPLES as u64);
    assert_eq!(summary.diagnostics.ik_nan, 0);
}
