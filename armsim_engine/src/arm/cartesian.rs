//! Two orthogonal prismatic joints.

use super::{ArmModel, InverseSolution, JointMotion, JointPair, Point};

/// Cartesian gantry: joint 1 moves along x, joint 2 along y.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Cartesian {
    pub mass_1: f64,
    pub mass_2: f64,
}

impl ArmModel for Cartesian {
    fn forward(&self, q: JointPair) -> Point {
        q
    }

    fn inverse(&self, p: Point) -> InverseSolution {
        InverseSolution::exact(p)
    }

    /// Effective-mass terms only; the axes do not couple.
    fn load_torque(&self, m: &JointMotion) -> JointPair {
        let d1 = (self.mass_1 + self.mass_2) / 2.0;
        let d3 = self.mass_2 / 2.0;
        [2.0 * d1 * m.acceleration[0], 2.0 * d3 * m.acceleration[1]]
    }
}
