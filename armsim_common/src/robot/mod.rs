//! Robot simulation data model.
//!
//! - [`kind`] - Robot archetype and control mode selectors
//! - [`config`] - The configuration record consumed by the engine
//! - [`result`] - Time series, quality report and grouped views produced by the engine
//! - [`diagnostics`] - Silent numerical substitution counters

pub mod config;
pub mod diagnostics;
pub mod kind;
pub mod result;
