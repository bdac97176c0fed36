//! Simulation file loading.
//!
//! A simulation file is one TOML document: a `[shared]` section read by every
//! front end (log level, instance name) next to the front end's own sections.
//! Any deserializable record gets [`ConfigLoader`] for free.
//!
//! ```rust,no_run
//! use armsim_common::config::{ConfigError, ConfigLoader, SharedConfig};
//! use armsim_common::robot::config::SimulationConfig;
//! use serde::Deserialize;
//! use std::path::Path;
//!
//! #[derive(Debug, Deserialize)]
//! struct BenchFile {
//!     shared: SharedConfig,
//!     simulation: SimulationConfig,
//! }
//!
//! fn main() -> Result<(), ConfigError> {
//!     let file = BenchFile::load(Path::new("bench.toml"))?;
//!     file.simulation.validate()?;
//!     println!("{} drives a {} arm", file.shared.service_name, file.simulation.robot);
//!     Ok(())
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Why a simulation file or record was rejected.
///
/// Validation messages name the violated invariant and can be shown as is.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// No file at the given path.
    #[error("Configuration file not found")]
    FileNotFound,

    /// Unreadable file, bad TOML, or a field of the wrong shape.
    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    /// Well-formed record that breaks an invariant.
    #[error("Configuration validation failed: {0}")]
    ValidationError(String),

    /// Robot kind label not recognised.
    #[error("Unknown robot kind: {0}")]
    UnknownRobotKind(String),

    /// Control mode label not recognised.
    #[error("Unknown control mode: {0}")]
    UnknownControlMode(String),
}

impl ConfigError {
    /// Shorthand for a [`ConfigError::ValidationError`].
    pub fn invalid(msg: impl Into<String>) -> Self {
        Self::ValidationError(msg.into())
    }
}

/// Verbosity of a run, written in lowercase in the file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Per-segment integrator progress.
    Trace,
    /// Plans and substitution summaries.
    Debug,
    /// Run start and finish.
    #[default]
    Info,
    Warn,
    Error,
}

impl LogLevel {
    /// Directive string understood by `tracing_subscriber::EnvFilter`.
    pub fn as_directive(&self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

/// `[shared]` section of a simulation file.
///
/// ```toml
/// [shared]
/// log_level = "debug"
/// service_name = "scara-bench"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SharedConfig {
    #[serde(default)]
    pub log_level: LogLevel,

    /// Name shown in the run banner.
    pub service_name: String,
}

impl SharedConfig {
    /// Reject an empty `service_name`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.service_name.is_empty() {
            return Err(ConfigError::invalid("service_name cannot be empty"));
        }
        Ok(())
    }
}

/// TOML loading for any deserializable record.
///
/// Loading only parses; call the record's own `validate` afterwards.
pub trait ConfigLoader: Sized + serde::de::DeserializeOwned {
    /// Read and parse `path`. A missing file is `FileNotFound`, any other
    /// read or parse failure is `ParseError`.
    fn load(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(text) => Self::from_toml(&text),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(ConfigError::FileNotFound),
            Err(e) => Err(ConfigError::ParseError(format!("{}: {e}", path.display()))),
        }
    }

    /// Parse an in-memory document.
    fn from_toml(text: &str) -> Result<Self, ConfigError> {
        toml::from_str(text).map_err(|e| ConfigError::ParseError(e.to_string()))
    }
}

impl<T: serde::de::DeserializeOwned> ConfigLoader for T {}

// ─── Tests ──────────────────────────────────────────────────────────
