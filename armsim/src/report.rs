//! JSON output document of one run.
//!
//! The document groups the result buffer the way a plotting front end reads
//! it: trajectory, electrical and mechanical views, the run summary (which
//! carries the quality report) and the workspace envelope.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use armsim_common::robot::result::{ElectricalView, MechanicalView, RunSummary, TrajectoryView};
use armsim_engine::workspace::Envelope;
use armsim_engine::{Engine, EngineError};
use serde::Serialize;

/// Serializable output of a finished run.
#[derive(Debug, Serialize)]
pub struct RunReport<'a> {
    pub summary: RunSummary,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trajectory: Option<TrajectoryView<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub electrical: Option<ElectricalView<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mechanical: Option<MechanicalView<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub envelope: Option<Envelope>,
}

impl<'a> RunReport<'a> {
    /// Every group of an analyzed engine.
    pub fn full(engine: &'a Engine) -> Result<Self, EngineError> {
        let summary = engine.summary()?;
        let result = engine.result().ok_or(EngineError::NotComputed)?;
        Ok(Self {
            summary,
            trajectory: Some(result.trajectory_view()),
            electrical: Some(result.electrical_view()),
            mechanical: Some(result.mechanical_view()),
            envelope: Some(engine.envelope()),
        })
    }

    /// Summary only.
    pub fn summary_only(engine: &Engine) -> Result<Self, EngineError> {
        Ok(Self {
            summary: engine.summary()?,
            trajectory: None,
            electrical: None,
            mechanical: None,
            envelope: None,
        })
    }
}

/// Write `value` as pretty JSON to `output`, or to stdout when `None`.
pub fn write_json<T: Serialize>(value: &T, output: Option<&Path>) -> io::Result<()> {
    match output {
        Some(path) => {
            let mut w = BufWriter::new(File::create(path)?);
            serde_json::to_writer_pretty(&mut w, value)?;
            w.flush()
        }
        None => {
            let mut w = io::stdout().lock();
            serde_json::to_writer_pretty(&mut w, value)?;
            writeln!(w)
        }
    }
}
