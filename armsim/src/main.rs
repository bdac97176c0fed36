//! # armsim
//!
//! Runs one closed-loop simulation of a two-link robot from a TOML file
//! and writes the results as JSON.
//!
//! # Usage
//!
//! ```bash
//! # Full result document to stdout
//! armsim --config config/armsim.toml
//!
//! # Write to a file, debug logging
//! armsim --config config/armsim.toml --output run.json -v
//!
//! # Summary only, JSON logs
//! armsim --config config/armsim.toml --summary-only --json
//! ```
//!
//! # File Layout
//!
//! ```toml
//! [shared]
//! log_level = "info"
//! service_name = "armsim"
//!
//! [simulation]
//! robot = "scara"
//! # ... see SimulationConfig
//! ```

#![deny(warnings)]

mod report;

use armsim_common::config::{ConfigLoader, LogLevel, SharedConfig};
use armsim_common::robot::config::SimulationConfig;
use armsim_engine::Engine;
use clap::Parser;
use serde::Deserialize;
use std::path::PathBuf;
use tracing::{Level, error, info, warn};
use tracing_subscriber::EnvFilter;

use report::{RunReport, write_json};

/// armsim - two-link robot closed-loop simulation
#[derive(Parser, Debug)]
#[command(name = "armsim")]
#[command(version)]
#[command(about = "Closed-loop simulation of a two-link robot arm")]
#[command(long_about = None)]
struct Args {
    /// Path to the simulation file ([shared] + [simulation]).
    #[arg(short, long, default_value = "config/armsim.toml")]
    config: PathBuf,

    /// Write the JSON document here instead of stdout.
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Write only the run summary.
    #[arg(long)]
    summary_only: bool,

    /// Enable verbose logging (overrides the file's log level)
    #[arg(short, long)]
    verbose: bool,

    /// Output logs in JSON format
    #[arg(long)]
    json: bool,
}

/// Top-level layout of the simulation file.
#[derive(Debug, Deserialize)]
struct ArmsimFile {
    shared: SharedConfig,
    #[serde(default)]
    simulation: SimulationConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    if let Err(e) = run() {
        error!("armsim failed: {}", e);
        std::process::exit(1);
    }
    Ok(())
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Logging needs the file's level, so load before initializing tracing.
    let file = ArmsimFile::load(&args.config);
    setup_tracing(&args, file.as_ref().ok().map(|f| f.shared.log_level));
    let file = file?;
    file.shared.validate()?;

    info!(
        "armsim v{} ({}) loading {}",
        env!("CARGO_PKG_VERSION"),
        file.shared.service_name,
        args.config.display()
    );

    let mut engine = Engine::new(file.simulation)?;
    let summary = engine.run()?;

    let diagnostics = engine.diagnostics();
    if !diagnostics.is_clean() {
        warn!(
            substitutions = diagnostics.total(),
            "run completed with numerical substitutions"
        );
    }
    info!(
        samples = summary.samples,
        duration = summary.duration,
        mean_error_1 = summary.quality[0].mean_error,
        mean_error_2 = summary.quality[1].mean_error,
        "simulation complete"
    );

    let report = if args.summary_only {
        RunReport::summary_only(&engine)?
    } else {
        RunReport::full(&engine)?
    };
    write_json(&report, args.output.as_deref())?;
    if let Some(path) = &args.output {
        info!("results written to {}", path.display());
    }

    Ok(())
}

/// Setup tracing subscriber based on CLI arguments and the file's level.
fn setup_tracing(args: &Args, file_level: Option<LogLevel>) {
    let filter = EnvFilter::from_default_env();
    let filter = if args.verbose {
        filter.add_directive(Level::DEBUG.into())
    } else {
        let level = file_level.unwrap_or_default();
        match level.as_directive().parse() {
            Ok(directive) => filter.add_directive(directive),
            Err(_) => filter.add_directive(Level::INFO.into()),
        }
    };

    // Logs go to stderr; stdout may carry the JSON document.
    if args.json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn bundled_config_loads_and_validates() {
        let path = concat!(env!("CARGO_MANIFEST_DIR"), "/config/armsim.toml");
        let file = ArmsimFile::load(std::path::Path::new(path)).unwrap();
        file.shared.validate().unwrap();
        file.simulation.validate().unwrap();
    }

    #[test]
    fn missing_simulation_section_uses_defaults() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("armsim.toml");
        fs::write(&path, "[shared]\nservice_name = \"t\"\n").unwrap();
        let file = ArmsimFile::load(&path).unwrap();
        assert_eq!(file.shared.log_level, LogLevel::Info);
        assert!(file.simulation.cyclogram.is_empty());
    }

    #[test]
    fn args_parse() {
        let args = Args::parse_from(["armsim", "-c", "x.toml", "--summary-only", "-v"]);
        assert_eq!(args.config, PathBuf::from("x.toml"));
        assert!(args.summary_only);
        assert!(args.verbose);
        assert!(args.output.is_none());
    }
}
