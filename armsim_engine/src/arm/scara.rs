//! Two revolute joints in a horizontal plane.
//!
//! Angles are measured from the +y axis, counter-clockwise positive:
//!
//! ```text
//! x = -a1·sin(q1) - a2·sin(q1 + q2)
//! y =  a1·cos(q1) + a2·cos(q1 + q2)
//! ```

use core::f64::consts::FRAC_PI_2;

use armsim_common::robot::diagnostics::Substitution;

use super::{ArmModel, InverseSolution, JointMotion, JointPair, Point};

/// SCARA arm with link lengths `a1`, `a2`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Scara {
    pub a1: f64,
    pub a2: f64,
    pub mass_2: f64,
    pub moment_1: f64,
    pub moment_2: f64,
}

impl ArmModel for Scara {
    fn forward(&self, q: JointPair) -> Point {
        let [q1, q2] = q;
        [
            -self.a1 * q1.sin() - self.a2 * (q1 + q2).sin(),
            self.a1 * q1.cos() + self.a2 * (q1 + q2).cos(),
        ]
    }

    fn inverse(&self, p: Point) -> InverseSolution {
        let [x, y] = p;
        let mut substitutions = Substitution::empty();

        let r = x.hypot(y);
        let polar = if r == 0.0 {
            substitutions |= Substitution::IK_ORIGIN;
            0.0
        } else {
            y.atan2(x)
        };

        // Shoulder offset from the law of cosines.
        let g1 = if r == 0.0 || self.a1 == 0.0 {
            0.0
        } else {
            let c = (self.a1 * self.a1 - self.a2 * self.a2 + r * r) / (2.0 * self.a1 * r);
            if c.is_nan() {
                substitutions |= Substitution::IK_NAN;
                0.0
            } else {
                if !(-1.0..=1.0).contains(&c) {
                    substitutions |= Substitution::IK_DOMAIN;
                }
                c.clamp(-1.0, 1.0).acos()
            }
        };

        // Angle at the target between the base line and the second link.
        let g2 = (self.a1 * g1.sin()).atan2(r - self.a1 * g1.cos());

        InverseSolution {
            joints: [-FRAC_PI_2 + polar + g1, -(g1 + g2)],
            substitutions,
        }
    }

    fn load_torque(&self, m: &JointMotion) -> JointPair {
        let (a1, a2, m2) = (self.a1, self.a2, self.mass_2);
        let [q1, q2] = m.position;
        let [w1, w2] = m.velocity;
        let [e1, e2] = m.acceleration;

        let d1 = (self.moment_1
            + m2 * a1 * a1
            + 2.0 * m2 * a2 * a2 * a1 * q1.cos()
            + m2 * a2 * a2
            + self.moment_2 / 2.0)
            / 2.0;
        let d2 = (2.0 * m2 * a2 * a2 * a1 + m2 * a2 * a2 + self.moment_2 / 2.0) / 2.0;
        let d3 = (m2 * a2 * a2 + self.moment_2 / 2.0) / 2.0;
        let coupling = m2 * a2 * a1 * q2.sin();

        [
            2.0 * d1 * e1 + 2.0 * d2 * e2 - 2.0 * coupling * w1 * w2 - coupling * w2 * w2,
            2.0 * d1 * e1 + 2.0 * d3 * e2 + coupling * w1 * w1,
        ]
    }

    fn strict_fluctuation_filter(&self) -> bool {
        true
    }
}
