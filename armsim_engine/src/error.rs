//! Engine error type.
//!
//! Numerical substitutions inside a run are never errors; they are counted
//! in [`armsim_common::robot::diagnostics::Diagnostics`]. Errors are raised
//! only before integration starts or when an operation is called out of
//! order.

use armsim_common::config::ConfigError;
use thiserror::Error;

/// Error types for engine operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    /// The configuration record was rejected.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Projection or analysis requested before a successful compute.
    #[error("No result available: run compute first")]
    NotComputed,

    /// The planned run exceeds the sub-step ceiling.
    #[error("Run requires {required} sub-steps, limit is {limit}")]
    StepBudgetExceeded { required: u64, limit: u64 },

    /// No engine is registered under the given session id.
    #[error("Session not found: {0}")]
    SessionNotFound(String),

    /// A session with the given id is already open.
    #[error("Session already open: {0}")]
    SessionExists(String),
}
