//! Revolute base joint carrying a radial prismatic joint.
//!
//! ```text
//! x = -(a1 + q2)·sin(q1)
//! y =  (a1 + q2)·cos(q1)
//! ```

use armsim_common::robot::diagnostics::Substitution;

use super::{ArmModel, InverseSolution, JointMotion, JointPair, Point};

/// Cylindrical arm: `a1` is the fixed radial offset of the slide.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Cylindrical {
    pub a1: f64,
    pub a2: f64,
    pub mass_2: f64,
    pub moment_1: f64,
    pub moment_2: f64,
}

impl Cylindrical {
    /// Radius of the slide's centre of mass for extension `q2`.
    #[inline]
    fn mass_radius(&self, q2: f64) -> f64 {
        self.a1 - 0.5 * self.a2 + q2
    }
}

impl ArmModel for Cylindrical {
    fn forward(&self, q: JointPair) -> Point {
        let [q1, q2] = q;
        let reach = self.a1 + q2;
        [-reach * q1.sin(), reach * q1.cos()]
    }

    fn inverse(&self, p: Point) -> InverseSolution {
        let [x, y] = p;
        let r = x.hypot(y);
        if r == 0.0 {
            return InverseSolution {
                joints: [0.0, -self.a1],
                substitutions: Substitution::IK_ORIGIN,
            };
        }
        InverseSolution::exact([-x.atan2(y), r - self.a1])
    }

    fn load_torque(&self, m: &JointMotion) -> JointPair {
        let rc = self.mass_radius(m.position[1]);
        let [w1, w2] = m.velocity;
        let e1 = m.acceleration[0];

        let d1 = 0.5 * (self.moment_1 + (self.moment_2 / 2.0 + self.mass_2 * rc * rc));
        let d3 = self.mass_2 / 2.0;

        [
            2.0 * d1 * e1 + 2.0 * self.mass_2 * rc * w1 * w2,
            2.0 * d3 * e1 - self.mass_2 * rc * w1 * w1,
        ]
    }
}
