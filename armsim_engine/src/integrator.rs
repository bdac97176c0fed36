//! Fixed-step closed-loop integrator.
//!
//! For every setpoint segment the integrator advances in steps of
//! [`STEP`] from the segment start to its end, both included. One sub-step
//! runs, for both joints:
//!
//! 1. error → PID ([`pid_compute`])
//! 2. driver voltage, armature current, motor torque ([`drive_step`])
//! 3. coupled load torque and fluctuation filter ([`load_torque`])
//! 4. acceleration → velocity → position (forward Euler)
//! 5. travel-limit clamp (inelastic stop)
//!
//! The joints share the time axis and couple only through step 3.

use armsim_common::consts::{JOINTS, STEP};
use armsim_common::robot::config::{ActuatorParams, PidGains, SimulationConfig, TravelRange};
use armsim_common::robot::diagnostics::{Diagnostics, Substitution};
use armsim_common::robot::result::{JointSample, ResultBuffer, Setpoints};
use tracing::trace;

use crate::arm::{Arm, JointMotion, JointPair};
use crate::control::drive::{DriveState, drive_step};
use crate::control::pid::{PidState, pid_compute};
use crate::dynamics::load_torque;
use crate::planner::{segment_sub_steps, total_sub_steps};

// ─── Joint State ────────────────────────────────────────────────────

/// Per-joint simulation state. Reset at the start of each run.
#[derive(Debug, Clone, Copy, Default)]
struct JointState {
    pid: PidState,
    drive: DriveState,
    position: f64,
    velocity: f64,
    acceleration: f64,
}

/// Per-joint constants captured from the configuration.
#[derive(Debug, Clone, Copy)]
struct JointParams {
    gains: PidGains,
    actuator: ActuatorParams,
    range: TravelRange,
}

// ─── Integrator ─────────────────────────────────────────────────────

/// Owns the simulation state of one run.
#[derive(Debug, Clone)]
pub struct Integrator {
    arm: Arm,
    params: [JointParams; JOINTS],
    joints: [JointState; JOINTS],
    diagnostics: Diagnostics,
}

impl Integrator {
    /// Capture gains, actuator constants and travel ranges from `config`.
    pub fn new(config: &SimulationConfig, arm: Arm) -> Self {
        let ranges = config.joint_ranges();
        let params = [0, 1].map(|j| JointParams {
            gains: config.pid_gains(j),
            actuator: config.actuators[j],
            range: ranges[j],
        });
        Self {
            arm,
            params,
            joints: [JointState::default(); JOINTS],
            diagnostics: Diagnostics::default(),
        }
    }

    /// Zero all joint state and counters.
    pub fn reset(&mut self) {
        self.joints = [JointState::default(); JOINTS];
        self.diagnostics.clear();
    }

    /// Substitutions made since the last reset.
    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    fn motion(&self) -> JointMotion {
        JointMotion {
            position: self.joints.map(|j| j.position),
            velocity: self.joints.map(|j| j.velocity),
            acceleration: self.joints.map(|j| j.acceleration),
        }
    }

    /// Advance both joints by one sub-step towards `setpoint`.
    pub fn step(&mut self, setpoint: JointPair) -> [JointSample; JOINTS] {
        let mut samples = [JointSample::default(); JOINTS];

        // Control chain up to motor torque.
        let mut motor = [0.0; JOINTS];
        for j in 0..JOINTS {
            let p = &self.params[j];
            let state = &mut self.joints[j];
            let s = &mut samples[j];

            s.error = setpoint[j] - state.position;
            s.pid_output = pid_compute(&mut state.pid, &p.gains, s.error, STEP);

            let out = drive_step(&mut state.drive, &p.actuator, s.pid_output, state.velocity, STEP);
            if !out.substitutions.is_empty() {
                self.diagnostics.record(out.substitutions);
            }
            s.voltage = out.voltage;
            s.corrected_voltage = out.corrected_voltage;
            s.current = out.current;
            s.motor_torque = out.motor_torque;
            motor[j] = out.motor_torque;
        }

        // Coupled load on the state before this step's update.
        let load = load_torque(&self.arm, &self.motion(), motor);

        for j in 0..JOINTS {
            let p = &self.params[j];
            let state = &mut self.joints[j];
            let s = &mut samples[j];

            s.load_torque = load.filtered[j];
            s.corrected_torque = s.motor_torque - s.load_torque;

            state.acceleration = if p.actuator.inertia != 0.0 {
                s.corrected_torque / p.actuator.inertia
            } else {
                self.diagnostics.record(Substitution::ZERO_INERTIA);
                0.0
            };
            state.velocity += state.acceleration * STEP;
            state.position += state.velocity * STEP;

            if state.position < p.range.min || state.position > p.range.max {
                state.position = state.position.clamp(p.range.min, p.range.max);
                state.velocity = 0.0;
                state.acceleration = 0.0;
            }

            s.acceleration = state.acceleration;
            s.velocity = state.velocity;
            s.position = state.position;
        }

        samples
    }

    /// Run every segment of `setpoints` from a zeroed state.
    pub fn run(&mut self, setpoints: &Setpoints) -> ResultBuffer {
        self.reset();

        let capacity = usize::try_from(total_sub_steps(setpoints)).unwrap_or(0);
        let mut buffer = ResultBuffer::with_capacity(capacity, setpoints.clone());

        for i in 0..setpoints.len() {
            let start = setpoints.segment_start(i);
            let end = setpoints.t[i];
            let target = [setpoints.q[0][i], setpoints.q[1][i]];
            let steps = segment_sub_steps(start, end);

            trace!(segment = i, start, end, steps, "segment");
            for k in 0..steps {
                let time = start + k as f64 * STEP;
                let samples = self.step(target);
                buffer.push(time, &samples);
            }
        }

        buffer
    }
}

// ─── Tests ──────────────────────────────────────────────────────────
