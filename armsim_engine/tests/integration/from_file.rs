//! Runs driven by configuration files on disk.

use std::fs;

use armsim_common::config::ConfigLoader;
use armsim_common::robot::config::SimulationConfig;
use armsim_common::robot::kind::RobotKind;
use armsim_engine::{Engine, EngineError};
use tempfile::TempDir;

const CYLINDRICAL_FILE: &str = r#"
robot = "cylindrical"

[pid]
kp = [5.0, 5.0, 0.0, 0.0]
ki = [0.0, 0.0, 0.0, 0.0]
kd = [0.0, 0.0, 0.0, 0.0]

[[actuators]]
inertia = 1.0
electrical_time_constant = 0.002
max_voltage = 24.0
flux = 1.0
emf_constant = 1.0
resistance = 0.1
torque_constant = 10.0

[[actuators]]
inertia = 1.0
electrical_time_constant = 0.002
max_voltage = 24.0
flux = 1.0
emf_constant = 1.0
resistance = 0.1
torque_constant = 10.0

[geometry.cylindrical]
link_1 = 0.3
link_2 = 0.2
mass_2 = 1.0
moment_1 = 0.1
moment_2 = 0.05
joint_1 = { min = -3.0, max = 3.0 }
joint_2 = { min = 0.0, max = 0.3 }

[cyclogram]
t = [1.0, 2.0]
q1 = [0.5, -0.5]
q2 = [0.1, 0.2]
"#;

#[test]
fn file_config_runs_end_to_end() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("sim.toml");
    fs::write(&path, CYLINDRICAL_FILE).unwrap();

    let config = SimulationConfig::load(&path).unwrap();
    assert_eq!(config.robot, RobotKind::Cylindrical);

    let mut engine = Engine::new(config).unwrap();
    let summary = engine.run().unwrap();
    assert_eq!(summary.samples, 2002);
    assert_eq!(summary.quality[1].errors.len(), 2);

    let envelope = serde_json::to_value(engine.envelope()).unwrap();
    assert_eq!(envelope["shape"], "annular_sector");
    assert_eq!(envelope["r_max"], 0.6);
}

#[test]
fn contour_mode_without_path_is_rejected_at_load() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("sim.toml");
    fs::write(&path, "control = \"contour\"\n[cyclogram]\nt = [1.0]\nq1 = [0.0]\nq2 = [0.0]\n").unwrap();

    let config = SimulationConfig::load(&path).unwrap();
    let err = Engine::new(config).unwrap_err();
    assert!(matches!(err, EngineError::Config(_)));
    assert!(err.to_string().contains("contour mode requires a contour path"));
}
