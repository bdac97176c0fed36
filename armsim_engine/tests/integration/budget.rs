//! Sub-step ceiling at extreme horizons and spline densities.

use armsim_common::robot::config::Cyclogram;
use armsim_common::robot::kind::RobotKind;
use armsim_engine::{Engine, EngineError};

use super::base_config;

fn compute_with(cyclogram: Cyclogram, spline_density: Option<u32>) -> EngineError {
    let mut c = base_config(RobotKind::Cartesian);
    c.cyclogram = cyclogram;
    if let Some(density) = spline_density {
        c.spline.enabled = true;
        c.spline.density = density;
    }
    let mut engine = Engine::new(c).unwrap();
    let err = engine.compute().unwrap_err();
    assert!(engine.result().is_none());
    err
}

#[test]
fn astronomical_horizon_is_rejected() {
    let err = compute_with(Cyclogram::new(vec![1e17], vec![0.1], vec![0.0]), None);
    assert!(
        matches!(err, EngineError::StepBudgetExceeded { required, .. } if required == u64::MAX),
        "{err:?}"
    );
}

#[test]
fn huge_segments_do_not_overflow_the_total() {
    let err = compute_with(
        Cyclogram::new(vec![1.5e16, 3e16], vec![0.1, 0.2], vec![0.0, 0.0]),
        None,
    );
    assert!(matches!(err, EngineError::StepBudgetExceeded { .. }), "{err:?}");

    let err = compute_with(
        Cyclogram::new(vec![1e17, 2e17, 3e17], vec![0.1, 0.2, 0.3], vec![0.0; 3]),
        None,
    );
    assert!(matches!(err, EngineError::StepBudgetExceeded { .. }), "{err:?}");
}

#[test]
fn dense_spline_is_rejected_without_resampling() {
    let err = compute_with(
        Cyclogram::new(vec![1.0, 2e6], vec![0.1, 0.2], vec![0.0, 0.0]),
        Some(u32::MAX),
    );
    match err {
        EngineError::StepBudgetExceeded { required, limit } => assert!(required > limit),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn engine_recovers_after_a_rejected_plan() {
    let mut c = base_config(RobotKind::Cartesian);
    c.cyclogram = Cyclogram::new(vec![1e17], vec![0.1], vec![0.0]);
    let mut engine = Engine::new(c.clone()).unwrap();
    assert!(engine.compute().is_err());

    c.cyclogram = Cyclogram::new(vec![0.1], vec![0.1], vec![0.0]);
    engine.set_config(c).unwrap();
    assert_eq!(engine.compute().unwrap().len(), 101);
}
