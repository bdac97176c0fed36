//! Robot archetype and control mode selectors.
//!
//! Both are closed variant sets. Labels are parsed through [`FromStr`] so an
//! unknown label in a configuration file surfaces as a structured
//! [`ConfigError`] instead of a generic deserialization failure.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::config::ConfigError;

// ─── RobotKind ──────────────────────────────────────────────────────

/// Two-link robot archetype.
///
/// Selects the kinematic transform, the load torque expression and the
/// geometry section of the configuration record that applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum RobotKind {
    /// Two orthogonal prismatic joints.
    #[default]
    Cartesian,
    /// Two revolute joints in a horizontal plane.
    Scara,
    /// Revolute base joint plus a radial prismatic joint.
    Cylindrical,
    /// Vertical prismatic joint carrying a revolute link ("Coler").
    Mixed,
}

impl RobotKind {
    /// All variants, in declaration order.
    pub const ALL: [Self; 4] = [Self::Cartesian, Self::Scara, Self::Cylindrical, Self::Mixed];

    /// Lowercase label used in configuration files.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Cartesian => "cartesian",
            Self::Scara => "scara",
            Self::Cylindrical => "cylindrical",
            Self::Mixed => "mixed",
        }
    }
}

impl fmt::Display for RobotKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for RobotKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "cartesian" => Ok(Self::Cartesian),
            "scara" => Ok(Self::Scara),
            "cylindrical" => Ok(Self::Cylindrical),
            "mixed" | "coler" => Ok(Self::Mixed),
            _ => Err(ConfigError::UnknownRobotKind(s.to_string())),
        }
    }
}

impl TryFrom<String> for RobotKind {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

// ─── ControlMode ────────────────────────────────────────────────────

/// How the setpoint sequence is produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum ControlMode {
    /// Track the waypoint list (cyclogram), optionally spline-smoothed.
    #[default]
    Positional,
    /// Track a sampled Cartesian path through inverse kinematics.
    Contour,
}

impl ControlMode {
    /// Lowercase label used in configuration files.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Positional => "positional",
            Self::Contour => "contour",
        }
    }
}

impl fmt::Display for ControlMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ControlMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "positional" | "position" => Ok(Self::Positional),
            "contour" => Ok(Self::Contour),
            _ => Err(ConfigError::UnknownControlMode(s.to_string())),
        }
    }
}

impl TryFrom<String> for ControlMode {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

// ─── Tests ──────────────────────────────────────────────────────────
