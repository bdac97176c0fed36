//! Regulation quality analysis.
//!
//! For each reference waypoint `w` of a joint:
//!
//! - **Window**: samples from the end of the previous window up to and
//!   including the first sample with `time >= t[w]`. The last waypoint's
//!   window runs to the end of the buffer.
//! - **Settling time**: time of the first in-band sample in the window minus
//!   the segment start (`t[w-1]`, or 0). A later out-of-band sample in the
//!   same window discards it and the search resumes. The band is
//!   `SETTLING_BAND·|target|`; a zero target needs an exact match.
//! - **Steady-state error**: `|target - position|` at the sample nearest to
//!   `t[w]` (first of ties).

use armsim_common::consts::{JOINTS, SETTLING_BAND, STEP_ROUNDING_EPS};
use armsim_common::robot::result::{JointQuality, QualityReport, ResultBuffer, Setpoints};
use tracing::debug;

/// Index of the sample nearest to `t`, first of ties. `None` for no samples.
pub fn nearest_sample(time: &[f64], t: f64) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (i, &ti) in time.iter().enumerate() {
        let d = (ti - t).abs();
        if d.is_nan() {
            continue;
        }
        match best {
            Some((_, bd)) if d >= bd => {}
            _ => best = Some((i, d)),
        }
    }
    best.map(|(i, _)| i).or(time.len().checked_sub(1))
}

#[inline]
fn in_band(value: f64, target: f64) -> bool {
    if target == 0.0 {
        value == target
    } else {
        (value - target).abs() <= SETTLING_BAND * target.abs()
    }
}

/// Settling time within one window, if the joint settled and stayed.
fn settling_time(time: &[f64], position: &[f64], target: f64, segment_start: f64) -> Option<f64> {
    let mut settled: Option<f64> = None;
    for (&ti, &qi) in time.iter().zip(position.iter()) {
        match (settled, in_band(qi, target)) {
            (None, true) => settled = Some(ti - segment_start),
            (Some(_), false) => settled = None,
            _ => {}
        }
    }
    settled
}

/// Analyze one joint against its reference waypoints.
pub fn analyze_joint(reference_t: &[f64], target: &[f64], time: &[f64], position: &[f64]) -> JointQuality {
    let n = time.len().min(position.len());
    let waypoints = reference_t.len().min(target.len());
    if n == 0 || waypoints == 0 {
        return JointQuality::default();
    }
    let (time, position) = (&time[..n], &position[..n]);

    let mut errors = Vec::with_capacity(waypoints);
    let mut settling = Vec::with_capacity(waypoints);
    let mut begin = 0usize;

    for w in 0..waypoints {
        let t_w = reference_t[w];
        let segment_start = if w == 0 { 0.0 } else { reference_t[w - 1] };

        if let Some(idx) = nearest_sample(time, t_w) {
            errors.push((target[w] - position[idx]).abs());
        }

        if begin >= n {
            continue;
        }
        let end = if w + 1 == waypoints {
            n
        } else {
            time[begin..]
                .iter()
                .position(|&ti| ti >= t_w - STEP_ROUNDING_EPS)
                .map_or(n, |off| begin + off + 1)
        };

        if let Some(ts) = settling_time(&time[begin..end], &position[begin..end], target[w], segment_start) {
            settling.push(ts);
        }
        begin = end;
    }

    JointQuality::from_lists(errors, settling)
}

/// Analyze both joints of `buffer` against `reference`.
pub fn analyze(reference: &Setpoints, buffer: &ResultBuffer) -> QualityReport {
    let joints: [JointQuality; JOINTS] = [0, 1].map(|j| {
        analyze_joint(
            &reference.t,
            &reference.q[j],
            &buffer.time,
            &buffer.joints[j].position,
        )
    });
    debug!(
        mean_error_1 = joints[0].mean_error,
        mean_error_2 = joints[1].mean_error,
        settled_1 = joints[0].settling_times.len(),
        settled_2 = joints[1].settling_times.len(),
        "analysis finished"
    );
    QualityReport { joints }
}

// ─── Tests ──────────────────────────────────────────────────────────
