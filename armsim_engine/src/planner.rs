//! Trajectory planning.
//!
//! Turns a configuration record into the joint-space setpoint sequence fed
//! to the integrator, plus the reference sequence the quality analyzer
//! compares against:
//!
//! | Mode                | Setpoints                         | Reference         |
//! |---------------------|-----------------------------------|-------------------|
//! | positional          | cyclogram                         | cyclogram         |
//! | positional + spline | resampled natural cubic spline    | cyclogram         |
//! | contour             | inverse kinematics of the samples | same as setpoints |

pub mod contour;
pub mod spline;

use armsim_common::consts::{STEP, STEP_ROUNDING_EPS};
use armsim_common::robot::config::SimulationConfig;
use armsim_common::robot::diagnostics::Diagnostics;
use armsim_common::robot::kind::ControlMode;
use armsim_common::robot::result::Setpoints;
use tracing::debug;

use crate::arm::{Arm, ArmModel};
use crate::error::EngineError;

/// Output of the planner.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Plan {
    /// Sequence tracked by the integrator.
    pub setpoints: Setpoints,
    /// Sequence the quality analyzer compares against.
    pub reference: Setpoints,
    /// Task-space contour samples (contour mode only).
    pub contour: Option<contour::ContourSamples>,
    /// Substitutions made by the inverse kinematics.
    pub diagnostics: Diagnostics,
}

impl Plan {
    /// Total number of integrator sub-steps this plan requires.
    pub fn sub_steps(&self) -> u64 {
        total_sub_steps(&self.setpoints)
    }
}

/// Sub-steps of a segment from `start` to `end`, both ends included.
///
/// Saturates at `u64::MAX` for spans too long to count.
#[inline]
pub fn segment_sub_steps(start: f64, end: f64) -> u64 {
    // `as` saturates on out-of-range floats.
    let inner = ((end - start) / STEP - STEP_ROUNDING_EPS).ceil().max(0.0) as u64;
    inner.saturating_add(1)
}

/// Sub-steps over all segments of `setpoints`, saturating at `u64::MAX`.
pub fn total_sub_steps(setpoints: &Setpoints) -> u64 {
    (0..setpoints.len())
        .map(|i| segment_sub_steps(setpoints.segment_start(i), setpoints.t[i]))
        .fold(0, u64::saturating_add)
}

fn check_budget(required: u64, limit: u64) -> Result<(), EngineError> {
    // A saturated count stands for any count past u64::MAX.
    if required > limit || required == u64::MAX {
        return Err(EngineError::StepBudgetExceeded { required, limit });
    }
    Ok(())
}

/// Build the plan for a validated configuration.
///
/// # Errors
///
/// `EngineError::Config` when contour mode has no path, and
/// `EngineError::StepBudgetExceeded` when the plan exceeds
/// `config.limits.max_sub_steps`.
pub fn plan(config: &SimulationConfig, arm: &Arm) -> Result<Plan, EngineError> {
    let plan = match config.control {
        ControlMode::Positional => positional(config)?,
        ControlMode::Contour => contour_plan(config, arm)?,
    };

    let required = plan.sub_steps();
    check_budget(required, config.limits.max_sub_steps)?;

    debug!(
        control = %config.control,
        setpoints = plan.setpoints.len(),
        sub_steps = required,
        "plan built"
    );
    Ok(plan)
}

fn positional(config: &SimulationConfig) -> Result<Plan, EngineError> {
    let c = &config.cyclogram;
    let reference = Setpoints::new(c.t.clone(), c.q1.clone(), c.q2.clone());
    let setpoints = if config.spline.enabled {
        // Every resampled point opens a segment of at least one sub-step,
        // so an oversized grid is rejected before it is allocated.
        let (t0, t_last) = (c.t.first().copied(), c.t.last().copied());
        if let (Some(t0), Some(t_last)) = (t0, t_last) {
            let points = spline::resample_count(t0, t_last, config.spline.density);
            check_budget(points, config.limits.max_sub_steps)?;
        }
        spline::smooth(&reference, config.spline.density)
    } else {
        reference.clone()
    };
    Ok(Plan {
        setpoints,
        reference,
        contour: None,
        diagnostics: Diagnostics::default(),
    })
}

fn contour_plan(config: &SimulationConfig, arm: &Arm) -> Result<Plan, EngineError> {
    let path = config.contour.as_ref().ok_or_else(|| {
        armsim_common::config::ConfigError::invalid("contour mode requires a contour path")
    })?;
    let samples = contour::sample(path);

    let mut diagnostics = Diagnostics::default();
    let mut q1 = Vec::with_capacity(samples.len());
    let mut q2 = Vec::with_capacity(samples.len());
    for (&x, &y) in samples.x.iter().zip(samples.y.iter()) {
        let sol = arm.inverse([x, y]);
        if !sol.substitutions.is_empty() {
            diagnostics.record(sol.substitutions);
        }
        q1.push(sol.joints[0]);
        q2.push(sol.joints[1]);
    }

    let setpoints = Setpoints::new(samples.t.clone(), q1, q2);
    Ok(Plan {
        reference: setpoints.clone(),
        setpoints,
        contour: Some(samples),
        diagnostics,
    })
}

// ─── Tests ──────────────────────────────────────────────────────────
