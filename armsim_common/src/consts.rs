//! Numeric constants of the simulation core.
//!
//! Single source of truth for the integrator step, the fixed actuator
//! driver lag and the planner conventions. Imported by all crates.

use static_assertions::const_assert;

/// Number of actively simulated joints.
pub const JOINTS: usize = 2;

/// Number of PID gain slots per vector (slots 2..4 are reserved).
pub const PID_SLOTS: usize = 4;

/// Fixed integration step [s] (1 ms).
pub const STEP: f64 = 1e-3;

/// Voltage driver time constant [s].
pub const DRIVER_TIME_CONSTANT: f64 = 0.07;

/// Voltage driver gain.
pub const DRIVER_GAIN: f64 = 1.0;

/// Symmetric bound on the derivative channel of the PID.
pub const DERIVATIVE_LIMIT: f64 = 10.0;

/// Relative band used by the settling detector.
pub const SETTLING_BAND: f64 = 0.05;

/// Number of samples along a contour path.
pub const CONTOUR_SAMPLES: usize = 1000;

/// First time stamp of the synthetic contour time axis.
pub const CONTOUR_T_START: f64 = 10.0;

/// Last time stamp of the synthetic contour time axis.
pub const CONTOUR_T_END: f64 = 110.0;

/// Default spline resampling density [samples per unit time].
pub const SPLINE_DENSITY_DEFAULT: u32 = 100;

/// Default hard ceiling on the total number of integrator sub-steps.
pub const MAX_SUB_STEPS_DEFAULT: u64 = 5_000_000;

/// Tolerance absorbed when dividing a segment span by [`STEP`].
pub const STEP_ROUNDING_EPS: f64 = 1e-9;

const_assert!(JOINTS <= PID_SLOTS);
const_assert!(CONTOUR_SAMPLES > 1);
