//! Joint control chain.
//!
//! PID on the position error, a fixed-bandwidth voltage driver, the armature
//! current lag and the motor torque. Each stage is a pure function over a
//! small state struct so the integrator can run them per joint.

pub mod drive;
pub mod lag;
pub mod pid;
