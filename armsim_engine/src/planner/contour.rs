//! Sampling of parametric Cartesian contours.
//!
//! Every contour is sampled at [`CONTOUR_SAMPLES`] points on the synthetic
//! time axis `CONTOUR_T_START..=CONTOUR_T_END`. The traversal speed stored in
//! the path does not alter the time axis.

use core::f64::consts::TAU;

use armsim_common::consts::{CONTOUR_SAMPLES, CONTOUR_T_END, CONTOUR_T_START};
use armsim_common::robot::config::ContourPath;

/// `n` evenly spaced values from `start` to `end`, both included.
pub fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (n - 1) as f64;
            (0..n)
                .map(|i| if i == n - 1 { end } else { start + step * i as f64 })
                .collect()
        }
    }
}

/// Task-space samples of a contour.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ContourSamples {
    pub t: Vec<f64>,
    pub x: Vec<f64>,
    pub y: Vec<f64>,
}

impl ContourSamples {
    /// Number of samples.
    pub fn len(&self) -> usize {
        self.t.len()
    }

    /// Whether there are no samples.
    pub fn is_empty(&self) -> bool {
        self.t.is_empty()
    }
}

/// Sample `path` on the contour time axis.
pub fn sample(path: &ContourPath) -> ContourSamples {
    let t = linspace(CONTOUR_T_START, CONTOUR_T_END, CONTOUR_SAMPLES);
    let (x, y) = match *path {
        ContourPath::Line { start, end, .. } => (
            linspace(start[0], end[0], CONTOUR_SAMPLES),
            linspace(start[1], end[1], CONTOUR_SAMPLES),
        ),
        ContourPath::Circle { center, radius, .. } => linspace(0.0, TAU, CONTOUR_SAMPLES)
            .into_iter()
            .map(|phi| (center[0] + radius * phi.cos(), center[1] + radius * phi.sin()))
            .unzip(),
    };
    ContourSamples { t, x, y }
}
