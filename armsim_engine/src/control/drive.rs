//! Voltage driver, armature current and motor torque of one joint.
//!
//! ```text
//! U_need = min(PID · K_U, Umax)
//! U      = lag(U_need, T_U)
//! U*     = U - ω·Ce·Fi
//! I      = lag(U* / Ra, T_e)
//! M_ed   = I·Cm·Fi
//! ```
//!
//! `Ra = 0` yields a zero target current and `T_e = 0` keeps the current at
//! zero; both are reported as substitutions.

use armsim_common::consts::{DRIVER_GAIN, DRIVER_TIME_CONSTANT};
use armsim_common::robot::config::ActuatorParams;
use armsim_common::robot::diagnostics::Substitution;

use super::lag::{LagState, lag_apply};

/// Per-joint electrical state.
#[derive(Debug, Clone, Copy, Default)]
pub struct DriveState {
    voltage: LagState,
    current: LagState,
}

impl DriveState {
    /// Reset voltage and current to zero.
    #[inline]
    pub fn reset(&mut self) {
        self.voltage.reset();
        self.current.reset();
    }
}

/// Outputs of one drive step.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DriveOutput {
    /// Lagged driver voltage.
    pub voltage: f64,
    /// Voltage after back-EMF subtraction.
    pub corrected_voltage: f64,
    /// Armature current.
    pub current: f64,
    /// Motor torque.
    pub motor_torque: f64,
    /// Substitutions made during this step.
    pub substitutions: Substitution,
}

/// Run the driver and armature for one step.
#[inline]
pub fn drive_step(
    state: &mut DriveState,
    params: &ActuatorParams,
    pid_output: f64,
    velocity: f64,
    dt: f64,
) -> DriveOutput {
    let mut substitutions = Substitution::empty();

    let demand = (pid_output * DRIVER_GAIN).min(params.max_voltage);
    let voltage = lag_apply(&mut state.voltage, demand, 1.0, DRIVER_TIME_CONSTANT, dt);
    let corrected_voltage = voltage - velocity * params.emf_constant * params.flux;

    let target_current = if params.resistance != 0.0 {
        corrected_voltage / params.resistance
    } else {
        substitutions |= Substitution::ZERO_RESISTANCE;
        0.0
    };
    if params.electrical_time_constant == 0.0 {
        substitutions |= Substitution::ZERO_TIME_CONSTANT;
    }
    let current = lag_apply(
        &mut state.current,
        target_current,
        1.0,
        params.electrical_time_constant,
        dt,
    );

    DriveOutput {
        voltage,
        corrected_voltage,
        current,
        motor_torque: current * params.torque_constant * params.flux,
        substitutions,
    }
}
