//! Per-kind arm models.
//!
//! Each robot kind provides its forward and inverse transforms and its
//! coupled load-torque expression through [`ArmModel`]. [`Arm`] selects the
//! model from a configuration record and dispatches statically, so the
//! integrator never branches on the kind itself.

pub mod cartesian;
pub mod cylindrical;
pub mod mixed;
pub mod scara;

use armsim_common::consts::JOINTS;
use armsim_common::robot::config::SimulationConfig;
use armsim_common::robot::diagnostics::Substitution;
use armsim_common::robot::kind::RobotKind;

pub use cartesian::Cartesian;
pub use cylindrical::Cylindrical;
pub use mixed::Mixed;
pub use scara::Scara;

/// One value per simulated joint.
pub type JointPair = [f64; JOINTS];

/// Task-space point `(x, y)`.
pub type Point = [f64; 2];

/// Joint state the load torque depends on.
///
/// Accelerations are those of the previous sub-step.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct JointMotion {
    pub position: JointPair,
    pub velocity: JointPair,
    pub acceleration: JointPair,
}

/// Result of an inverse transform together with the substitutions it needed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InverseSolution {
    pub joints: JointPair,
    pub substitutions: Substitution,
}

impl InverseSolution {
    /// Solution that needed no substitution.
    pub fn exact(joints: JointPair) -> Self {
        Self {
            joints,
            substitutions: Substitution::empty(),
        }
    }

    /// Replace NaN components with 0 and flag them.
    pub(crate) fn sanitized(mut self) -> Self {
        for q in &mut self.joints {
            if q.is_nan() {
                *q = 0.0;
                self.substitutions |= Substitution::IK_NAN;
            }
        }
        self
    }
}

/// Kinematics and load dynamics of one robot kind.
pub trait ArmModel {
    /// Joint space to task space.
    fn forward(&self, q: JointPair) -> Point;

    /// Task space to joint space. Never yields NaN.
    fn inverse(&self, p: Point) -> InverseSolution;

    /// Raw coupled load torque of both joints.
    fn load_torque(&self, motion: &JointMotion) -> JointPair;

    /// Whether the fluctuation filter applies its sign substitution and the
    /// extra unconditional remap for this kind.
    fn strict_fluctuation_filter(&self) -> bool {
        false
    }
}

/// Arm model selected by [`RobotKind`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Arm {
    Cartesian(Cartesian),
    Scara(Scara),
    Cylindrical(Cylindrical),
    Mixed(Mixed),
}

impl Arm {
    /// Build the model of the configured kind from its geometry section.
    pub fn from_config(config: &SimulationConfig) -> Self {
        let g = config.active_geometry();
        let (a1, a2) = config.link_lengths();
        match config.robot {
            RobotKind::Cartesian => Self::Cartesian(Cartesian {
                mass_1: g.mass_1,
                mass_2: g.mass_2,
            }),
            RobotKind::Scara => Self::Scara(Scara {
                a1,
                a2,
                mass_2: g.mass_2,
                moment_1: g.moment_1,
                moment_2: g.moment_2,
            }),
            RobotKind::Cylindrical => Self::Cylindrical(Cylindrical {
                a1,
                a2,
                mass_2: g.mass_2,
                moment_1: g.moment_1,
                moment_2: g.moment_2,
            }),
            RobotKind::Mixed => Self::Mixed(Mixed {
                a2,
                mass_2: g.mass_2,
                moment_2: g.moment_2,
            }),
        }
    }

    /// Kind this model belongs to.
    pub fn kind(&self) -> RobotKind {
        match self {
            Self::Cartesian(_) => RobotKind::Cartesian,
            Self::Scara(_) => RobotKind::Scara,
            Self::Cylindrical(_) => RobotKind::Cylindrical,
            Self::Mixed(_) => RobotKind::Mixed,
        }
    }

    fn model(&self) -> &dyn ArmModel {
        match self {
            Self::Cartesian(m) => m,
            Self::Scara(m) => m,
            Self::Cylindrical(m) => m,
            Self::Mixed(m) => m,
        }
    }
}

impl ArmModel for Arm {
    #[inline]
    fn forward(&self, q: JointPair) -> Point {
        self.model().forward(q)
    }

    #[inline]
    fn inverse(&self, p: Point) -> InverseSolution {
        self.model().inverse(p).sanitized()
    }

    #[inline]
    fn load_torque(&self, motion: &JointMotion) -> JointPair {
        self.model().load_torque(motion)
    }

    #[inline]
    fn strict_fluctuation_filter(&self) -> bool {
        self.model().strict_fluctuation_filter()
    }
}
