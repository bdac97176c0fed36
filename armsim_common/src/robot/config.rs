//! The configuration record consumed by the simulation engine.
//!
//! All config types use `serde::Deserialize` for TOML loading. Every field
//! carries `#[serde(default)]` so a partially populated file is accepted;
//! numeric fields that are left out default to zero. Semantic checks live in
//! [`SimulationConfig::validate`], which must pass before a run starts.
//!
//! # TOML Example
//!
//! ```toml
//! robot = "scara"
//! control = "positional"
//!
//! [pid]
//! kp = [5.0, 5.0, 0.0, 0.0]
//! ki = [0.0, 0.0, 0.0, 0.0]
//! kd = [0.1, 0.1, 0.0, 0.0]
//!
//! [[actuators]]
//! inertia = 1.0
//! electrical_time_constant = 0.002
//! max_voltage = 24.0
//! flux = 1.0
//! emf_constant = 1.0
//! resistance = 0.1
//! torque_constant = 10.0
//!
//! [[actuators]]
//! inertia = 1.0
//! electrical_time_constant = 0.002
//! max_voltage = 24.0
//! flux = 1.0
//! emf_constant = 1.0
//! resistance = 0.1
//! torque_constant = 10.0
//!
//! [geometry.scara]
//! link_1 = 0.5
//! link_2 = 0.5
//! mass_2 = 1.0
//! joint_1 = { min = -1.57, max = 1.57 }
//! joint_2 = { min = -2.0, max = 2.0 }
//!
//! [cyclogram]
//! t = [1.0, 2.0]
//! q1 = [0.3, 0.6]
//! q2 = [0.2, -0.4]
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::ConfigError;
use crate::consts::{JOINTS, MAX_SUB_STEPS_DEFAULT, PID_SLOTS, SPLINE_DENSITY_DEFAULT};

use super::kind::{ControlMode, RobotKind};

// ─── Top-Level Record ───────────────────────────────────────────────

/// Every tunable parameter of one simulation. Pure data, no behavior
/// beyond validation and per-kind accessors.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Robot archetype.
    #[serde(default)]
    pub robot: RobotKind,

    /// Setpoint generation mode.
    #[serde(default)]
    pub control: ControlMode,

    /// PID gains per joint.
    #[serde(default)]
    pub pid: PidConfig,

    /// Actuator constants, index 0 = joint 1.
    #[serde(default)]
    pub actuators: [ActuatorParams; JOINTS],

    /// Geometry sections for every robot kind; [`Self::robot`] selects one.
    #[serde(default)]
    pub geometry: Geometry,

    /// Waypoint list used in positional mode.
    #[serde(default)]
    pub cyclogram: Cyclogram,

    /// Cartesian path used in contour mode.
    #[serde(default)]
    pub contour: Option<ContourPath>,

    /// Spline smoothing of the cyclogram (positional mode only).
    #[serde(default)]
    pub spline: SplineConfig,

    /// Resource ceilings.
    #[serde(default)]
    pub limits: Limits,
}

impl SimulationConfig {
    /// Geometry section of the selected robot kind.
    pub fn active_geometry(&self) -> &LinkGeometry {
        self.geometry.for_kind(self.robot)
    }

    /// Travel bounds of the two simulated joints.
    ///
    /// For the mixed kind joint 1 is the vertical slide and joint 2 the
    /// revolute link, matching the order of the forward transform.
    pub fn joint_ranges(&self) -> [TravelRange; JOINTS] {
        let g = self.active_geometry();
        [g.joint_1, g.joint_2]
    }

    /// Characteristic link lengths `(a1, a2)` used by the kinematics.
    ///
    /// The Cartesian kind has no links; its working area extent
    /// (upper bounds of both axes) is reported instead.
    pub fn link_lengths(&self) -> (f64, f64) {
        let g = self.active_geometry();
        match self.robot {
            RobotKind::Cartesian => (g.joint_1.max, g.joint_2.max),
            _ => (g.link_1, g.link_2),
        }
    }

    /// PID gains of `joint` (0-based).
    pub fn pid_gains(&self, joint: usize) -> PidGains {
        PidGains {
            kp: self.pid.kp.get(joint).copied().unwrap_or(0.0),
            ki: self.pid.ki.get(joint).copied().unwrap_or(0.0),
            kd: self.pid.kd.get(joint).copied().unwrap_or(0.0),
        }
    }

    /// Validate the record before a run.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ValidationError` naming the violated invariant.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.pid.validate()?;
        for (i, a) in self.actuators.iter().enumerate() {
            a.validate()
                .map_err(|e| ConfigError::invalid(format!("actuator {}: {e}", i + 1)))?;
        }
        for (i, r) in self.joint_ranges().iter().enumerate() {
            r.validate()
                .map_err(|e| ConfigError::invalid(format!("joint {} range: {e}", i + 1)))?;
        }

        match self.control {
            ControlMode::Positional => {
                self.cyclogram.validate()?;
                if self.spline.enabled && self.spline.density == 0 {
                    return Err(ConfigError::invalid(
                        "spline density must be positive when spline is enabled",
                    ));
                }
            }
            ControlMode::Contour => match &self.contour {
                Some(path) => path.validate()?,
                None => {
                    return Err(ConfigError::invalid(
                        "contour mode requires a contour path",
                    ));
                }
            },
        }

        if self.limits.max_sub_steps == 0 {
            return Err(ConfigError::invalid("max_sub_steps must be positive"));
        }

        debug!(robot = %self.robot, control = %self.control, "configuration validated");
        Ok(())
    }
}

fn check_finite(values: &[f64], what: &str) -> Result<(), ConfigError> {
    if values.iter().all(|v| v.is_finite()) {
        Ok(())
    } else {
        Err(ConfigError::invalid(format!("{what} must contain only finite values")))
    }
}

// ─── PID ────────────────────────────────────────────────────────────

/// PID gain vectors; index 0 = joint 1, index 1 = joint 2, 2..4 reserved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PidConfig {
    #[serde(default)]
    pub kp: Vec<f64>,
    #[serde(default)]
    pub ki: Vec<f64>,
    #[serde(default)]
    pub kd: Vec<f64>,
}

impl Default for PidConfig {
    fn default() -> Self {
        Self {
            kp: vec![0.0; PID_SLOTS],
            ki: vec![0.0; PID_SLOTS],
            kd: vec![0.0; PID_SLOTS],
        }
    }
}

impl PidConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        for (name, v) in [("kp", &self.kp), ("ki", &self.ki), ("kd", &self.kd)] {
            if v.len() < JOINTS {
                return Err(ConfigError::invalid(format!(
                    "PID vector {name} must have at least {JOINTS} entries"
                )));
            }
            check_finite(v, name)?;
        }
        Ok(())
    }
}

/// Gains of one joint, extracted from [`PidConfig`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PidGains {
    /// Proportional gain.
    pub kp: f64,
    /// Integral gain (0 = disabled).
    pub ki: f64,
    /// Derivative gain (0 = disabled).
    pub kd: f64,
}

// ─── Actuators ──────────────────────────────────────────────────────

/// DC actuator constants of one joint.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ActuatorParams {
    /// Reduced moment of inertia `J`. Zero disables acceleration.
    #[serde(default)]
    pub inertia: f64,
    /// Electrical time constant `T_e` [s]. Zero keeps the current at zero.
    #[serde(default)]
    pub electrical_time_constant: f64,
    /// Maximum driver voltage `Umax` [V].
    #[serde(default)]
    pub max_voltage: f64,
    /// Magnetic flux `Fi`.
    #[serde(default)]
    pub flux: f64,
    /// Back-EMF constant `Ce`.
    #[serde(default)]
    pub emf_constant: f64,
    /// Armature resistance `Ra` [Ohm]. Zero yields zero target current.
    #[serde(default)]
    pub resistance: f64,
    /// Torque constant `Cm`.
    #[serde(default)]
    pub torque_constant: f64,
}

impl ActuatorParams {
    fn validate(&self) -> Result<(), String> {
        let values = [
            self.inertia,
            self.electrical_time_constant,
            self.max_voltage,
            self.flux,
            self.emf_constant,
            self.resistance,
            self.torque_constant,
        ];
        if values.iter().any(|v| !v.is_finite()) {
            return Err("constants must be finite".to_string());
        }
        if self.inertia < 0.0 || self.electrical_time_constant < 0.0 || self.resistance < 0.0 {
            return Err("inertia, time constant and resistance must not be negative".to_string());
        }
        Ok(())
    }
}

// ─── Geometry ───────────────────────────────────────────────────────

/// Inclusive travel bounds of one joint.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TravelRange {
    #[serde(default)]
    pub min: f64,
    #[serde(default)]
    pub max: f64,
}

impl TravelRange {
    /// Create a range.
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Whether `value` lies within the bounds.
    #[inline]
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    fn validate(&self) -> Result<(), String> {
        if !self.min.is_finite() || !self.max.is_finite() {
            return Err("bounds must be finite".to_string());
        }
        if self.min > self.max {
            return Err(format!("min {} exceeds max {}", self.min, self.max));
        }
        Ok(())
    }
}

/// Geometry, mass and travel parameters of one robot kind.
///
/// Joint 3 and the vertical `z` stroke are carried for completeness of the
/// record; the two-joint core does not simulate them.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LinkGeometry {
    #[serde(default)]
    pub joint_1: TravelRange,
    #[serde(default)]
    pub joint_2: TravelRange,
    #[serde(default)]
    pub joint_3: TravelRange,
    #[serde(default)]
    pub z: TravelRange,
    /// First characteristic length `a1`.
    #[serde(default)]
    pub link_1: f64,
    /// Second characteristic length `a2`.
    #[serde(default)]
    pub link_2: f64,
    /// Vertical offset of the tool flange.
    #[serde(default)]
    pub offset: f64,
    #[serde(default)]
    pub mass_1: f64,
    #[serde(default)]
    pub mass_2: f64,
    #[serde(default)]
    pub mass_3: f64,
    #[serde(default)]
    pub moment_1: f64,
    #[serde(default)]
    pub moment_2: f64,
    #[serde(default)]
    pub moment_3: f64,
}

/// Geometry sections of all four robot kinds.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Geometry {
    #[serde(default)]
    pub cartesian: LinkGeometry,
    #[serde(default)]
    pub scara: LinkGeometry,
    #[serde(default)]
    pub cylindrical: LinkGeometry,
    #[serde(default)]
    pub mixed: LinkGeometry,
}

impl Geometry {
    /// Section belonging to `kind`.
    pub fn for_kind(&self, kind: RobotKind) -> &LinkGeometry {
        match kind {
            RobotKind::Cartesian => &self.cartesian,
            RobotKind::Scara => &self.scara,
            RobotKind::Cylindrical => &self.cylindrical,
            RobotKind::Mixed => &self.mixed,
        }
    }

    /// Mutable section belonging to `kind`.
    pub fn for_kind_mut(&mut self, kind: RobotKind) -> &mut LinkGeometry {
        match kind {
            RobotKind::Cartesian => &mut self.cartesian,
            RobotKind::Scara => &mut self.scara,
            RobotKind::Cylindrical => &mut self.cylindrical,
            RobotKind::Mixed => &mut self.mixed,
        }
    }
}

// ─── Cyclogram ──────────────────────────────────────────────────────

/// Time-stamped joint-space waypoints.
///
/// `t[0]` is the end of the first segment, which starts at time 0.
/// `q3` and `q4` are accepted but unused by the two-joint core.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Cyclogram {
    #[serde(default)]
    pub t: Vec<f64>,
    #[serde(default)]
    pub q1: Vec<f64>,
    #[serde(default)]
    pub q2: Vec<f64>,
    #[serde(default)]
    pub q3: Vec<f64>,
    #[serde(default)]
    pub q4: Vec<f64>,
}

impl Cyclogram {
    /// Build a two-joint cyclogram.
    pub fn new(t: Vec<f64>, q1: Vec<f64>, q2: Vec<f64>) -> Self {
        Self {
            t,
            q1,
            q2,
            q3: Vec::new(),
            q4: Vec::new(),
        }
    }

    /// Number of waypoints.
    pub fn len(&self) -> usize {
        self.t.len()
    }

    /// Whether the waypoint list is empty.
    pub fn is_empty(&self) -> bool {
        self.t.is_empty()
    }

    /// Validate lengths, finiteness and time ordering.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.t.is_empty() {
            return Err(ConfigError::invalid("waypoint list must not be empty"));
        }
        let n = self.t.len();
        if self.q1.len() != n || self.q2.len() != n {
            return Err(ConfigError::invalid("waypoint arrays must have equal length"));
        }
        for extra in [&self.q3, &self.q4] {
            if !extra.is_empty() && extra.len() != n {
                return Err(ConfigError::invalid("waypoint arrays must have equal length"));
            }
        }
        check_finite(&self.t, "waypoint times")?;
        check_finite(&self.q1, "q1")?;
        check_finite(&self.q2, "q2")?;
        if self.t[0] < 0.0 {
            return Err(ConfigError::invalid("waypoint times must not be negative"));
        }
        if self.t.windows(2).any(|w| w[1] <= w[0]) {
            return Err(ConfigError::invalid("waypoint times must be strictly increasing"));
        }
        Ok(())
    }
}

// ─── Contour ────────────────────────────────────────────────────────

/// Parametric Cartesian path tracked in contour mode.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "lowercase")]
pub enum ContourPath {
    /// Straight segment from `start` to `end`.
    Line {
        start: [f64; 2],
        end: [f64; 2],
        #[serde(default)]
        speed: f64,
    },
    /// Full circle around `center`.
    Circle {
        center: [f64; 2],
        radius: f64,
        #[serde(default)]
        speed: f64,
    },
}

impl ContourPath {
    fn validate(&self) -> Result<(), ConfigError> {
        match *self {
            Self::Line { start, end, speed } => {
                check_finite(&[start[0], start[1], end[0], end[1], speed], "line contour")
            }
            Self::Circle {
                center,
                radius,
                speed,
            } => {
                check_finite(&[center[0], center[1], radius, speed], "circle contour")?;
                if radius < 0.0 {
                    return Err(ConfigError::invalid("circle radius must not be negative"));
                }
                Ok(())
            }
        }
    }
}

// ─── Spline & Limits ────────────────────────────────────────────────

/// Cubic-spline smoothing of the cyclogram.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SplineConfig {
    #[serde(default)]
    pub enabled: bool,
    /// Resampling density [samples per unit time].
    #[serde(default = "default_spline_density")]
    pub density: u32,
}

fn default_spline_density() -> u32 {
    SPLINE_DENSITY_DEFAULT
}

impl Default for SplineConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            density: SPLINE_DENSITY_DEFAULT,
        }
    }
}

/// Resource ceilings enforced before integration starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Limits {
    /// Hard ceiling on the total number of integrator sub-steps.
    #[serde(default = "default_max_sub_steps")]
    pub max_sub_steps: u64,
}

fn default_max_sub_steps() -> u64 {
    MAX_SUB_STEPS_DEFAULT
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_sub_steps: MAX_SUB_STEPS_DEFAULT,
        }
    }
}

// ─── Tests ──────────────────────────────────────────────────────────
