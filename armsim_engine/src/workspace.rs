//! Reachable workspace of each robot kind.
//!
//! Pure geometry for a plotting layer; nothing is rendered here. Angles of
//! annular sectors are joint-1 angles, measured from the +y axis
//! counter-clockwise, matching the forward transforms.

use core::f64::consts::TAU;

use armsim_common::robot::config::{SimulationConfig, TravelRange};
use armsim_common::robot::kind::RobotKind;
use serde::Serialize;

use crate::arm::{Arm, ArmModel};
use crate::planner::contour::linspace;

/// Samples along the mixed kind's slide.
pub const CLOUD_SLIDE_SAMPLES: usize = 50;
/// Samples along the mixed kind's link angle.
pub const CLOUD_ANGLE_SAMPLES: usize = 100;

/// Geometric description of a reachable region.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum Envelope {
    /// Axis-aligned rectangle.
    Rectangle { x: TravelRange, y: TravelRange },
    /// Ring between two radii, limited to a range of joint-1 angles.
    AnnularSector {
        r_min: f64,
        r_max: f64,
        angle: TravelRange,
    },
    /// Forward transform sampled over both joint ranges.
    PointCloud { x: Vec<f64>, y: Vec<f64> },
}

impl Envelope {
    /// Envelope of the configured robot kind.
    pub fn of(config: &SimulationConfig) -> Self {
        let [r1, r2] = config.joint_ranges();
        let (a1, a2) = config.link_lengths();
        match config.robot {
            RobotKind::Cartesian => Self::Rectangle { x: r1, y: r2 },
            RobotKind::Scara => Self::AnnularSector {
                r_min: (a1 - a2).abs(),
                r_max: a1 + a2,
                angle: r1,
            },
            RobotKind::Cylindrical => Self::AnnularSector {
                r_min: (a1 + r2.min).max(0.0),
                r_max: a1 + r2.max,
                angle: r1,
            },
            RobotKind::Mixed => {
                let arm = Arm::from_config(config);
                let mut x = Vec::with_capacity(CLOUD_SLIDE_SAMPLES * CLOUD_ANGLE_SAMPLES);
                let mut y = Vec::with_capacity(CLOUD_SLIDE_SAMPLES * CLOUD_ANGLE_SAMPLES);
                for q1 in linspace(r1.min, r1.max, CLOUD_SLIDE_SAMPLES) {
                    for q2 in linspace(r2.min, r2.max, CLOUD_ANGLE_SAMPLES) {
                        let [px, py] = arm.forward([q1, q2]);
                        x.push(px);
                        y.push(py);
                    }
                }
                Self::PointCloud { x, y }
            }
        }
    }

    /// Whether `(x, y)` lies inside an analytic envelope.
    ///
    /// `None` for a point cloud.
    pub fn contains(&self, x: f64, y: f64) -> Option<bool> {
        match self {
            Self::Rectangle { x: rx, y: ry } => Some(rx.contains(x) && ry.contains(y)),
            Self::AnnularSector {
                r_min,
                r_max,
                angle,
            } => {
                let r = x.hypot(y);
                if r < *r_min || r > *r_max {
                    return Some(false);
                }
                if r == 0.0 {
                    return Some(true);
                }
                let q = (-x).atan2(y);
                Some([q, q - TAU, q + TAU].iter().any(|&a| angle.contains(a)))
            }
            Self::PointCloud { .. } => None,
        }
    }
}
