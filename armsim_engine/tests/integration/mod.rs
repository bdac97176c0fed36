//! Shared fixtures for the integration suites.

mod budget;
mod contour;
mod from_file;
mod positional;

use armsim_common::robot::config::{ActuatorParams, SimulationConfig, TravelRange};
use armsim_common::robot::kind::RobotKind;

/// Actuator that settles a unit-inertia joint within about a second.
pub fn reference_actuator() -> ActuatorParams {
    ActuatorParams {
        inertia: 1.0,
        electrical_time_constant: 0.002,
        max_voltage: 24.0,
        flux: 1.0,
        emf_constant: 1.0,
        resistance: 0.1,
        torque_constant: 10.0,
    }
}

/// Configuration of `robot` with reference actuators and P-only gains.
pub fn base_config(robot: RobotKind) -> SimulationConfig {
    let mut c = SimulationConfig {
        robot,
        actuators: [reference_actuator(); 2],
        ..Default::default()
    };
    c.pid.kp = vec![5.0, 5.0, 0.0, 0.0];
    let g = c.geometry.for_kind_mut(robot);
    g.joint_1 = TravelRange::new(-10.0, 10.0);
    g.joint_2 = TravelRange::new(-10.0, 10.0);
    c
}
