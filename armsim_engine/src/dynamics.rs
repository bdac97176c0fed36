//! Load torque conditioning.
//!
//! The raw coupled load torque from [`crate::arm::ArmModel::load_torque`] is
//! passed through a fluctuation filter before it is subtracted from the motor
//! torque. The filter soft-saturates a load that would otherwise dominate the
//! motor torque and produce non-physical acceleration spikes.

use crate::arm::{ArmModel, JointMotion, JointPair};

/// Sign with `sign(0) = 0`.
#[inline]
fn sign(v: f64) -> f64 {
    if v > 0.0 {
        1.0
    } else if v < 0.0 {
        -1.0
    } else {
        0.0
    }
}

/// Soft-saturation remap `M_ed·k / (1 + k)` with `k = 2·M / M_ed`.
///
/// `motor` must be non-zero.
#[inline]
fn remap(motor: f64, load: f64) -> f64 {
    let k = 2.0 * load / motor;
    motor * k / (1.0 + k)
}

/// Filter the load torque of one joint against its motor torque.
///
/// With `strict` set, a load opposing the motor in sign is replaced with
/// half the motor torque, and the remap is applied once unconditionally
/// before the shared conditional remap.
pub fn fluctuation_filter(motor: f64, load: f64, strict: bool) -> f64 {
    let mut m = load;

    if strict {
        if sign(motor) != sign(m) {
            m = 0.5 * motor;
        }
        if motor != 0.0 {
            m = remap(motor, m);
        }
    }

    if sign(motor) == sign(m) && motor != 0.0 {
        let half = 0.5 * motor;
        if (m >= 0.0 && m > half) || (m < 0.0 && m < half) {
            m = remap(motor, m);
        }
    }

    m
}

/// Raw and filtered load torque of both joints.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LoadTorque {
    pub raw: JointPair,
    pub filtered: JointPair,
}

/// Evaluate the arm's load torque for `motion` and filter it against `motor`.
pub fn load_torque<A: ArmModel + ?Sized>(arm: &A, motion: &JointMotion, motor: JointPair) -> LoadTorque {
    let raw = arm.load_torque(motion);
    let strict = arm.strict_fluctuation_filter();
    LoadTorque {
        raw,
        filtered: [
            fluctuation_filter(motor[0], raw[0], strict),
            fluctuation_filter(motor[1], raw[1], strict),
        ],
    }
}

// ─── Tests ──────────────────────────────────────────────────────────
