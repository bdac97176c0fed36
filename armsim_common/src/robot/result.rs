//! Time series, quality report and grouped views produced by the engine.
//!
//! [`ResultBuffer`] is one cohesive struct of named, equal-length sequences.
//! It is cleared at the start of a run, appended to once per integrator
//! sub-step and frozen when the run returns. Task-space arrays are attached
//! later by the projection step.

use serde::Serialize;

use crate::consts::JOINTS;

use super::diagnostics::DiagnosticsSummary;
use super::kind::{ControlMode, RobotKind};

// ─── Setpoints ──────────────────────────────────────────────────────

/// Time-indexed joint-space setpoint sequence fed to the integrator.
///
/// `t[i]` is the end of segment `i`; segment 0 starts at time 0.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Setpoints {
    pub t: Vec<f64>,
    pub q: [Vec<f64>; JOINTS],
}

impl Setpoints {
    /// Build from parallel sequences.
    pub fn new(t: Vec<f64>, q1: Vec<f64>, q2: Vec<f64>) -> Self {
        Self { t, q: [q1, q2] }
    }

    /// Number of setpoints.
    #[inline]
    pub fn len(&self) -> usize {
        self.t.len()
    }

    /// Whether the sequence is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.t.is_empty()
    }

    /// Start time of segment `i`.
    #[inline]
    pub fn segment_start(&self, i: usize) -> f64 {
        if i == 0 { 0.0 } else { self.t[i - 1] }
    }
}

// ─── Per-Step Records ───────────────────────────────────────────────

/// Every intermediate quantity of one joint at one sub-step.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct JointSample {
    pub error: f64,
    pub pid_output: f64,
    pub voltage: f64,
    pub corrected_voltage: f64,
    pub current: f64,
    pub motor_torque: f64,
    pub load_torque: f64,
    pub corrected_torque: f64,
    pub acceleration: f64,
    pub velocity: f64,
    pub position: f64,
}

/// Recorded time series of one joint.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct JointTrace {
    pub error: Vec<f64>,
    pub pid_output: Vec<f64>,
    pub voltage: Vec<f64>,
    pub corrected_voltage: Vec<f64>,
    pub current: Vec<f64>,
    pub motor_torque: Vec<f64>,
    pub load_torque: Vec<f64>,
    pub corrected_torque: Vec<f64>,
    pub acceleration: Vec<f64>,
    pub velocity: Vec<f64>,
    pub position: Vec<f64>,
}

impl JointTrace {
    fn with_capacity(n: usize) -> Self {
        Self {
            error: Vec::with_capacity(n),
            pid_output: Vec::with_capacity(n),
            voltage: Vec::with_capacity(n),
            corrected_voltage: Vec::with_capacity(n),
            current: Vec::with_capacity(n),
            motor_torque: Vec::with_capacity(n),
            load_torque: Vec::with_capacity(n),
            corrected_torque: Vec::with_capacity(n),
            acceleration: Vec::with_capacity(n),
            velocity: Vec::with_capacity(n),
            position: Vec::with_capacity(n),
        }
    }

    fn push(&mut self, s: &JointSample) {
        self.error.push(s.error);
        self.pid_output.push(s.pid_output);
        self.voltage.push(s.voltage);
        self.corrected_voltage.push(s.corrected_voltage);
        self.current.push(s.current);
        self.motor_torque.push(s.motor_torque);
        self.load_torque.push(s.load_torque);
        self.corrected_torque.push(s.corrected_torque);
        self.acceleration.push(s.acceleration);
        self.velocity.push(s.velocity);
        self.position.push(s.position);
    }
}

/// Task-space projection of the trajectory and of the reference waypoints.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct TaskTrace {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub waypoint_x: Vec<f64>,
    pub waypoint_y: Vec<f64>,
}

// ─── Result Buffer ──────────────────────────────────────────────────

/// Full output of one run.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct ResultBuffer {
    /// Shared time axis of both joints.
    pub time: Vec<f64>,
    /// Per-joint traces, index 0 = joint 1.
    pub joints: [JointTrace; JOINTS],
    /// Setpoints the run tracked.
    pub setpoints: Setpoints,
    /// Waypoints the run is measured against. Differs from `setpoints`
    /// when a spline resampled the cyclogram.
    pub reference: Setpoints,
    /// Present once the projection step has run.
    pub task: Option<TaskTrace>,
}

impl ResultBuffer {
    /// Empty buffer with room for `samples` sub-steps.
    ///
    /// The reference starts out as a copy of `setpoints`; see
    /// [`Self::with_reference`].
    pub fn with_capacity(samples: usize, setpoints: Setpoints) -> Self {
        Self {
            time: Vec::with_capacity(samples),
            joints: [
                JointTrace::with_capacity(samples),
                JointTrace::with_capacity(samples),
            ],
            reference: setpoints.clone(),
            setpoints,
            task: None,
        }
    }

    /// Replace the reference waypoints.
    pub fn with_reference(mut self, reference: Setpoints) -> Self {
        self.reference = reference;
        self
    }

    /// Append one sub-step.
    pub fn push(&mut self, time: f64, samples: &[JointSample; JOINTS]) {
        self.time.push(time);
        for (trace, s) in self.joints.iter_mut().zip(samples.iter()) {
            trace.push(s);
        }
    }

    /// Number of recorded sub-steps.
    #[inline]
    pub fn len(&self) -> usize {
        self.time.len()
    }

    /// Whether nothing was recorded.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }

    /// Last recorded position of `joint`.
    pub fn final_position(&self, joint: usize) -> Option<f64> {
        self.joints.get(joint)?.position.last().copied()
    }

    /// Simulated duration (time stamp of the last sample).
    pub fn duration(&self) -> f64 {
        self.time.last().copied().unwrap_or(0.0)
    }

    /// Trajectory group: positions, task-space path and reference waypoints.
    pub fn trajectory_view(&self) -> TrajectoryView<'_> {
        TrajectoryView {
            time: &self.time,
            q1: &self.joints[0].position,
            q2: &self.joints[1].position,
            x: self.task.as_ref().map(|t| t.x.as_slice()),
            y: self.task.as_ref().map(|t| t.y.as_slice()),
            waypoints: WaypointView {
                t: &self.reference.t,
                q1: &self.reference.q[0],
                q2: &self.reference.q[1],
                x: self.task.as_ref().map(|t| t.waypoint_x.as_slice()),
                y: self.task.as_ref().map(|t| t.waypoint_y.as_slice()),
            },
        }
    }

    /// Electrical group: voltages and current per joint.
    pub fn electrical_view(&self) -> ElectricalView<'_> {
        ElectricalView {
            time: &self.time,
            joints: [
                ElectricalJoint::of(&self.joints[0]),
                ElectricalJoint::of(&self.joints[1]),
            ],
        }
    }

    /// Mechanical group: torques and motion derivatives per joint.
    pub fn mechanical_view(&self) -> MechanicalView<'_> {
        MechanicalView {
            time: &self.time,
            joints: [
                MechanicalJoint::of(&self.joints[0]),
                MechanicalJoint::of(&self.joints[1]),
            ],
        }
    }
}

// ─── Grouped Views ──────────────────────────────────────────────────

/// Positions and reference waypoints, plus task-space arrays when projected.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct TrajectoryView<'a> {
    pub time: &'a [f64],
    pub q1: &'a [f64],
    pub q2: &'a [f64],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<&'a [f64]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<&'a [f64]>,
    pub waypoints: WaypointView<'a>,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct WaypointView<'a> {
    pub t: &'a [f64],
    pub q1: &'a [f64],
    pub q2: &'a [f64],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<&'a [f64]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<&'a [f64]>,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct ElectricalView<'a> {
    pub time: &'a [f64],
    pub joints: [ElectricalJoint<'a>; JOINTS],
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct ElectricalJoint<'a> {
    pub voltage: &'a [f64],
    pub corrected_voltage: &'a [f64],
    pub current: &'a [f64],
}

impl<'a> ElectricalJoint<'a> {
    fn of(j: &'a JointTrace) -> Self {
        Self {
            voltage: &j.voltage,
            corrected_voltage: &j.corrected_voltage,
            current: &j.current,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct MechanicalView<'a> {
    pub time: &'a [f64],
    pub joints: [MechanicalJoint<'a>; JOINTS],
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct MechanicalJoint<'a> {
    pub motor_torque: &'a [f64],
    pub load_torque: &'a [f64],
    pub corrected_torque: &'a [f64],
    pub velocity: &'a [f64],
    pub acceleration: &'a [f64],
}

impl<'a> MechanicalJoint<'a> {
    fn of(j: &'a JointTrace) -> Self {
        Self {
            motor_torque: &j.motor_torque,
            load_torque: &j.load_torque,
            corrected_torque: &j.corrected_torque,
            velocity: &j.velocity,
            acceleration: &j.acceleration,
        }
    }
}

// ─── Quality Report ─────────────────────────────────────────────────

/// Regulation quality of one joint.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct JointQuality {
    /// Steady-state error per waypoint.
    pub errors: Vec<f64>,
    /// Settling time per waypoint that settled.
    pub settling_times: Vec<f64>,
    pub mean_error: f64,
    pub median_error: f64,
    pub mean_settling_time: f64,
    pub median_settling_time: f64,
}

impl JointQuality {
    /// Aggregate the raw lists. Empty lists aggregate to 0.
    pub fn from_lists(errors: Vec<f64>, settling_times: Vec<f64>) -> Self {
        Self {
            mean_error: mean(&errors),
            median_error: median(&errors),
            mean_settling_time: mean(&settling_times),
            median_settling_time: median(&settling_times),
            errors,
            settling_times,
        }
    }
}

/// Quality of both joints.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct QualityReport {
    pub joints: [JointQuality; JOINTS],
}

/// Arithmetic mean; 0 for an empty slice.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Median (mean of the two middle values for even length); 0 for an empty slice.
pub fn median(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}

// ─── Run Summary ────────────────────────────────────────────────────

/// Compact description of a finished run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunSummary {
    pub robot: RobotKind,
    pub control: ControlMode,
    pub spline: bool,
    /// Number of setpoints tracked.
    pub trajectory_length: usize,
    /// Number of recorded sub-steps.
    pub samples: usize,
    pub duration: f64,
    pub final_position: [f64; JOINTS],
    pub quality: [JointQuality; JOINTS],
    pub diagnostics: DiagnosticsSummary,
}

// ─── Tests ──────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(position: f64) -> JointSample {
        JointSample {
            position,
            ..Default::default()
        }
    }

    #[test]
    fn push_keeps_series_aligned() {
        let sp = Setpoints::new(vec![1.0], vec![0.5], vec![0.0]);
        let mut buf = ResultBuffer::with_capacity(4, sp);
        buf.push(0.0, &[sample(0.0), sample(1.0)]);
        buf.push(0.001, &[sample(0.1), sample(1.1)]);
        assert_eq!(buf.len(), 2);
        assert_eq!(buf.joints[0].velocity.len(), 2);
        assert_eq!(buf.final_position(0), Some(0.1));
        assert_eq!(buf.final_position(1), Some(1.1));
        assert_eq!(buf.final_position(2), None);
        assert_eq!(buf.duration(), 0.001);
    }

    #[test]
    fn segment_start_of_first_segment_is_zero() {
        let sp = Setpoints::new(vec![1.0, 3.0], vec![0.0; 2], vec![0.0; 2]);
        assert_eq!(sp.segment_start(0), 0.0);
        assert_eq!(sp.segment_start(1), 1.0);
    }

    #[test]
    fn mean_and_median() {
        assert_eq!(mean(&[]), 0.0);
        assert_eq!(median(&[]), 0.0);
        assert_eq!(mean(&[1.0, 2.0, 6.0]), 3.0);
        assert_eq!(median(&[6.0, 1.0, 2.0]), 2.0);
        assert_eq!(median(&[4.0, 1.0, 3.0, 2.0]), 2.5);
    }

    #[test]
    fn quality_aggregates_empty_lists_to_zero() {
        let q = JointQuality::from_lists(vec![0.2, 0.4], Vec::new());
        assert!((q.mean_error - 0.3).abs() < 1e-12);
        assert_eq!(q.mean_settling_time, 0.0);
        assert_eq!(q.median_settling_time, 0.0);
    }

    #[test]
    fn trajectory_view_omits_task_space_until_projected() {
        let sp = Setpoints::new(vec![1.0], vec![0.5], vec![0.0]);
        let mut buf = ResultBuffer::with_capacity(1, sp);
        buf.push(0.0, &[sample(0.0), sample(0.0)]);
        assert!(buf.trajectory_view().x.is_none());

        buf.task = Some(TaskTrace {
            x: vec![0.0],
            y: vec![0.0],
            waypoint_x: vec![0.5],
            waypoint_y: vec![0.0],
        });
        let view = buf.trajectory_view();
        assert_eq!(view.waypoints.x, Some(&[0.5][..]));
        assert_eq!(buf.electrical_view().joints[1].current.len(), 1);
        assert_eq!(buf.mechanical_view().joints[0].velocity.len(), 1);
    }

    #[test]
    fn waypoint_view_follows_the_reference() {
        let resampled = Setpoints::new(
            vec![1.0, 1.5, 2.0, 2.5, 3.0],
            vec![0.3, 0.5, 0.6, 0.3, 0.0],
            vec![0.0; 5],
        );
        let cyclogram = Setpoints::new(vec![1.0, 2.0, 3.0], vec![0.3, 0.6, 0.0], vec![0.0; 3]);
        let mut buf = ResultBuffer::with_capacity(1, resampled).with_reference(cyclogram);
        buf.push(0.0, &[sample(0.0), sample(0.0)]);
        buf.task = Some(TaskTrace {
            x: vec![0.0],
            y: vec![0.0],
            waypoint_x: vec![0.3, 0.6, 0.0],
            waypoint_y: vec![0.0; 3],
        });

        let w = buf.trajectory_view().waypoints;
        assert_eq!(w.t, &[1.0, 2.0, 3.0][..]);
        assert_eq!(w.q1.len(), 3);
        assert_eq!(w.x.map(<[f64]>::len), Some(w.t.len()));
        assert_eq!(buf.setpoints.len(), 5);
    }
}
