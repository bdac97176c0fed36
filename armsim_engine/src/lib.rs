//! # armsim Engine
//!
//! Closed-loop simulation of a two-link robot arm. A run turns a validated
//! [`SimulationConfig`](armsim_common::robot::config::SimulationConfig) into
//! a time-indexed result buffer by stepping a fixed 1 ms loop through the
//! full drive chain of both joints.
//!
//! ## Pipeline
//!
//! 1. **Planner**: cyclogram, natural-spline resample or contour IK
//! 2. **Integrator**: PID → voltage driver → armature → coupled load → Euler
//! 3. **Projection**: forward kinematics of trajectory and waypoints
//! 4. **Quality**: steady-state error and settling time per waypoint
//!
//! ## Robot Kinds
//!
//! Cartesian, SCARA, Cylindrical and Mixed ("Coler") arms share one
//! integrator; each kind plugs in through [`arm::ArmModel`].
//!
//! ## Sessions
//!
//! [`Engine`] is a plain value type. [`session::SessionRegistry`] keeps
//! independent engines keyed by session id for hosts that serve several
//! clients.

pub mod arm;
pub mod control;
pub mod dynamics;
pub mod engine;
pub mod error;
pub mod integrator;
pub mod planner;
pub mod quality;
pub mod session;
pub mod workspace;

pub use engine::Engine;
pub use error::EngineError;
