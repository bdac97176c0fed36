//! The simulation engine value type.
//!
//! An [`Engine`] owns one configuration and at most one result buffer and
//! quality report. Starting a new compute (or replacing the configuration)
//! invalidates both until they are recomputed. The engine is synchronous
//! and not shared between threads; see [`crate::session`] for per-session
//! isolation.

use armsim_common::robot::config::SimulationConfig;
use armsim_common::robot::diagnostics::Diagnostics;
use armsim_common::robot::result::{QualityReport, ResultBuffer, RunSummary, TaskTrace};
use tracing::{debug, info};

use crate::arm::{Arm, ArmModel};
use crate::error::EngineError;
use crate::integrator::Integrator;
use crate::planner::{self, Plan};
use crate::quality;
use crate::workspace::Envelope;

/// Stateful simulation of one configuration.
#[derive(Debug, Clone)]
pub struct Engine {
    config: SimulationConfig,
    arm: Arm,
    plan: Option<Plan>,
    result: Option<ResultBuffer>,
    report: Option<QualityReport>,
    diagnostics: Diagnostics,
}

impl Engine {
    /// Validate `config` and build an engine for it.
    ///
    /// # Errors
    ///
    /// `EngineError::Config` naming the violated invariant.
    pub fn new(config: SimulationConfig) -> Result<Self, EngineError> {
        config.validate()?;
        let arm = Arm::from_config(&config);
        Ok(Self {
            config,
            arm,
            plan: None,
            result: None,
            report: None,
            diagnostics: Diagnostics::default(),
        })
    }

    /// Active configuration.
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Replace the configuration. Invalidates any previous result.
    ///
    /// On error the previous configuration and result are kept.
    pub fn set_config(&mut self, config: SimulationConfig) -> Result<(), EngineError> {
        config.validate()?;
        self.arm = Arm::from_config(&config);
        self.config = config;
        self.invalidate();
        Ok(())
    }

    fn invalidate(&mut self) {
        self.plan = None;
        self.result = None;
        self.report = None;
        self.diagnostics.clear();
    }

    /// Plan and integrate. Replaces the result buffer.
    ///
    /// # Errors
    ///
    /// `EngineError::StepBudgetExceeded` when the run would exceed the
    /// configured sub-step ceiling; nothing is integrated in that case.
    pub fn compute(&mut self) -> Result<&ResultBuffer, EngineError> {
        self.invalidate();

        let plan = planner::plan(&self.config, &self.arm)?;
        let mut integrator = Integrator::new(&self.config, self.arm);
        let buffer = integrator
            .run(&plan.setpoints)
            .with_reference(plan.reference.clone());

        self.diagnostics.merge(&plan.diagnostics);
        self.diagnostics.merge(integrator.diagnostics());
        if !self.diagnostics.is_clean() {
            debug!(summary = ?self.diagnostics.summary(), "numerical substitutions");
        }
        info!(
            robot = %self.config.robot,
            control = %self.config.control,
            samples = buffer.len(),
            duration = buffer.duration(),
            "run finished"
        );

        self.plan = Some(plan);
        Ok(self.result.insert(buffer))
    }

    /// Attach task-space arrays to the computed result.
    ///
    /// Projects the trajectory and the reference waypoints through the
    /// forward transform.
    pub fn project(&mut self) -> Result<&TaskTrace, EngineError> {
        let (Some(plan), Some(result)) = (self.plan.as_ref(), self.result.as_mut()) else {
            return Err(EngineError::NotComputed);
        };
        let arm = &self.arm;

        let (x, y) = result.joints[0]
            .position
            .iter()
            .zip(result.joints[1].position.iter())
            .map(|(&q1, &q2)| {
                let [x, y] = arm.forward([q1, q2]);
                (x, y)
            })
            .unzip();
        let (waypoint_x, waypoint_y) = plan.reference.q[0]
            .iter()
            .zip(plan.reference.q[1].iter())
            .map(|(&q1, &q2)| {
                let [x, y] = arm.forward([q1, q2]);
                (x, y)
            })
            .unzip();

        Ok(result.task.insert(TaskTrace {
            x,
            y,
            waypoint_x,
            waypoint_y,
        }))
    }

    /// Compute the quality report against the reference waypoints.
    pub fn analyze(&mut self) -> Result<&QualityReport, EngineError> {
        let (Some(plan), Some(result)) = (self.plan.as_ref(), self.result.as_ref()) else {
            return Err(EngineError::NotComputed);
        };
        let report = quality::analyze(&plan.reference, result);
        Ok(self.report.insert(report))
    }

    /// Compute, project and analyze in one call.
    pub fn run(&mut self) -> Result<RunSummary, EngineError> {
        self.compute()?;
        self.project()?;
        self.analyze()?;
        self.summary()
    }

    /// Last result buffer, if computed.
    pub fn result(&self) -> Option<&ResultBuffer> {
        self.result.as_ref()
    }

    /// Last quality report, if analyzed.
    pub fn report(&self) -> Option<&QualityReport> {
        self.report.as_ref()
    }

    /// Substitutions made by the last compute.
    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    /// Reachable workspace of the configured kind.
    pub fn envelope(&self) -> Envelope {
        Envelope::of(&self.config)
    }

    /// Summary of the last run. Requires compute and analyze.
    pub fn summary(&self) -> Result<RunSummary, EngineError> {
        let (Some(plan), Some(result), Some(report)) =
            (self.plan.as_ref(), self.result.as_ref(), self.report.as_ref())
        else {
            return Err(EngineError::NotComputed);
        };
        Ok(RunSummary {
            robot: self.config.robot,
            control: self.config.control,
            spline: self.config.spline.enabled,
            trajectory_length: plan.setpoints.len(),
            samples: result.len(),
            duration: result.duration(),
            final_position: [0, 1].map(|j| result.final_position(j).unwrap_or(0.0)),
            quality: report.joints.clone(),
            diagnostics: self.diagnostics.summary(),
        })
    }
}

// ─── Tests ──────────────────────────────────────────────────────────
