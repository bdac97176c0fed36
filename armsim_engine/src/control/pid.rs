//! PID controller with forward-Euler integration and a bounded derivative.
//!
//! Zero Ki leaves the integral at zero; zero Kd disables the derivative.
//! The derivative is clamped to `±DERIVATIVE_LIMIT` so a setpoint jump at a
//! segment boundary cannot saturate the driver for a whole sub-step.

use armsim_common::consts::DERIVATIVE_LIMIT;
use armsim_common::robot::config::PidGains;

/// Internal state of the PID controller.
///
/// Must be reset (via [`PidState::reset`]) at the start of every run.
#[derive(Debug, Clone, Copy, Default)]
pub struct PidState {
    /// Integral accumulator.
    integral: f64,
    /// Previous position error (for derivative).
    prev_error: f64,
}

impl PidState {
    /// Reset all internal state to zero.
    #[inline]
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Current integral term.
    #[inline]
    pub fn integral(&self) -> f64 {
        self.integral
    }
}

/// Compute one PID cycle.
///
/// # Arguments
/// - `state`: Mutable PID internal state.
/// - `gains`: PID gains for this joint.
/// - `error`: Current position error (setpoint − position).
/// - `dt`: Integration step [s].
///
/// # Returns
/// Sum of the three terms (unsaturated; the driver applies `Umax`).
#[inline]
pub fn pid_compute(state: &mut PidState, gains: &PidGains, error: f64, dt: f64) -> f64 {
    if dt <= 0.0 {
        return 0.0;
    }

    let p_term = gains.kp * error;

    state.integral += gains.ki * error * dt;
    let i_term = state.integral;

    let d_term = if gains.kd != 0.0 {
        (gains.kd * (error - state.prev_error) / dt).clamp(-DERIVATIVE_LIMIT, DERIVATIVE_LIMIT)
    } else {
        0.0
    };

    state.prev_error = error;

    p_term + i_term + d_term
}

// ─── Tests ──────────────────────────────────────────────────────────
