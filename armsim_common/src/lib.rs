//! armsim Common Library
//!
//! This crate provides the shared data model for all armsim workspace crates:
//! the simulation configuration record, the result buffer produced by the
//! engine, the regulation-quality report and the numeric diagnostics.
//!
//! # Module Structure
//!
//! - [`config`] - Configuration loading traits and types
//! - [`consts`] - Numeric constants of the simulation core
//! - [`robot`] - Robot kinds, configuration record, results, diagnostics
//! - [`prelude`] - Common re-exports for convenience
//!
//! # Usage
//!
//! ```rust,no_run
//! use armsim_common::config::ConfigLoader;
//! use armsim_common::robot::config::SimulationConfig;
//! use std::path::Path;
//!
//! let config = SimulationConfig::load(Path::new("sim.toml")).unwrap();
//! config.validate().unwrap();
//! ```

pub mod config;
pub mod consts;
pub mod prelude;
pub mod robot;
