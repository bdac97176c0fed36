//! Prelude module for common re-exports.
//!
//! ```rust
//! use armsim_common::prelude::*;
//! ```

// ─── Logging ────────────────────────────────────────────────────────
pub use crate::config::LogLevel;

// ─── Configuration ──────────────────────────────────────────────────
pub use crate::config::{ConfigError, ConfigLoader, SharedConfig};
pub use crate::robot::config::{
    ActuatorParams, ContourPath, Cyclogram, Geometry, Limits, LinkGeometry, PidConfig, PidGains,
    SimulationConfig, SplineConfig, TravelRange,
};
pub use crate::robot::kind::{ControlMode, RobotKind};

// ─── Constants ──────────────────────────────────────────────────────
pub use crate::consts::{JOINTS, STEP};

// ─── Results ────────────────────────────────────────────────────────
pub use crate::robot::diagnostics::{Diagnostics, DiagnosticsSummary, Substitution};
pub use crate::robot::result::{
    JointQuality, JointSample, QualityReport, ResultBuffer, RunSummary, Setpoints, TaskTrace,
};
