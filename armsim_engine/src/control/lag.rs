//! First-order lag element.
//!
//! ```text
//! y[n] = y[n-1] + (k·x[n] - y[n-1]) / T · dt
//! ```
//!
//! Forward Euler, matching the integrator's fixed step. A non-positive time
//! constant freezes the output at its current value.

/// Internal state of a first-order lag.
#[derive(Debug, Clone, Copy, Default)]
pub struct LagState {
    output: f64,
}

impl LagState {
    /// Reset the output to zero.
    #[inline]
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Last output.
    #[inline]
    pub fn output(&self) -> f64 {
        self.output
    }
}

/// Advance the lag by one step towards `gain · input`.
#[inline]
pub fn lag_apply(state: &mut LagState, input: f64, gain: f64, time_constant: f64, dt: f64) -> f64 {
    if time_constant > 0.0 {
        state.output += (gain * input - state.output) / time_constant * dt;
    }
    state.output
}
