//! Vertical prismatic joint carrying a revolute link.
//!
//! Joint 1 is the slide, joint 2 the link angle:
//!
//! ```text
//! x = -a2·sin(q2)
//! y =  q1 + a2·cos(q2)
//! ```

use armsim_common::robot::diagnostics::Substitution;

use super::{ArmModel, InverseSolution, JointMotion, JointPair, Point};

/// Mixed ("Coler") arm with link length `a2`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Mixed {
    pub a2: f64,
    pub mass_2: f64,
    pub moment_2: f64,
}

impl ArmModel for Mixed {
    fn forward(&self, q: JointPair) -> Point {
        let [q1, q2] = q;
        [-self.a2 * q2.sin(), q1 + self.a2 * q2.cos()]
    }

    fn inverse(&self, p: Point) -> InverseSolution {
        let [x, y] = p;
        if self.a2 == 0.0 {
            return InverseSolution {
                joints: [y, 0.0],
                substitutions: Substitution::IK_DOMAIN,
            };
        }

        let mut substitutions = Substitution::empty();
        let s = x / self.a2;
        if !(-1.0..=1.0).contains(&s) {
            substitutions |= Substitution::IK_DOMAIN;
        }
        let s = s.clamp(-1.0, 1.0);
        let cos = (1.0 - s * s).max(0.0).sqrt();

        InverseSolution {
            joints: [y - self.a2 * cos, -s.asin()],
            substitutions,
        }
    }

    fn load_torque(&self, m: &JointMotion) -> JointPair {
        let (a2, m2) = (self.a2, self.mass_2);
        let q2 = m.position[1];
        let w2 = m.velocity[1];
        let e1 = m.acceleration[0];

        // Carriage mass is normalised to 1.
        let d1 = (1.0 + m2) / 2.0;
        let d2 = m2 * a2 * q2.sin() / 2.0;
        let d3 = (self.moment_2 + m2 * a2 * a2) / 2.0;

        [
            4.0 * d1 * e1 + m2 * a2 * q2.cos() * w2 * w2,
            2.0 * d2 * e1 + 2.0 * d3 * e1,
        ]
    }
}
