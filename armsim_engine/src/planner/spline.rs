//! Natural cubic spline through time-stamped samples.
//!
//! Second derivatives at the knots solve the tridiagonal system
//!
//! ```text
//! h[i-1]·M[i-1] + 2(h[i-1] + h[i])·M[i] + h[i]·M[i+1]
//!     = 6·((y[i+1] - y[i]) / h[i] - (y[i] - y[i-1]) / h[i-1])
//! ```
//!
//! with `M[0] = M[n-1] = 0`, solved by the Thomas algorithm.

use armsim_common::consts::STEP_ROUNDING_EPS;
use armsim_common::robot::result::Setpoints;

/// Interpolating natural cubic spline.
#[derive(Debug, Clone, PartialEq)]
pub struct NaturalCubicSpline {
    x: Vec<f64>,
    y: Vec<f64>,
    /// Second derivative at each knot.
    m: Vec<f64>,
}

impl NaturalCubicSpline {
    /// Fit through `(x[i], y[i])`.
    ///
    /// `x` must be strictly increasing and as long as `y`. One knot yields a
    /// constant, two knots a straight line.
    pub fn new(x: &[f64], y: &[f64]) -> Self {
        debug_assert_eq!(x.len(), y.len());
        let n = x.len().min(y.len());
        let x = x[..n].to_vec();
        let y = y[..n].to_vec();
        let m = second_derivatives(&x, &y);
        Self { x, y, m }
    }

    /// Evaluate at `t`. Outside the knot range the end polynomials extend.
    pub fn eval(&self, t: f64) -> f64 {
        match self.x.len() {
            0 => 0.0,
            1 => self.y[0],
            n => {
                // Index of the interval [x[i], x[i+1]] holding t.
                let i = self.x.partition_point(|&xi| xi <= t).clamp(1, n - 1) - 1;
                let (x0, x1) = (self.x[i], self.x[i + 1]);
                let (y0, y1) = (self.y[i], self.y[i + 1]);
                let (m0, m1) = (self.m[i], self.m[i + 1]);
                let h = x1 - x0;
                let a = x1 - t;
                let b = t - x0;
                m0 * a * a * a / (6.0 * h)
                    + m1 * b * b * b / (6.0 * h)
                    + (y0 / h - m0 * h / 6.0) * a
                    + (y1 / h - m1 * h / 6.0) * b
            }
        }
    }
}

fn second_derivatives(x: &[f64], y: &[f64]) -> Vec<f64> {
    let n = x.len();
    let mut m = vec![0.0; n];
    if n < 3 {
        return m;
    }

    let h: Vec<f64> = x.windows(2).map(|w| w[1] - w[0]).collect();
    let inner = n - 2;
    let mut diag = vec![0.0; inner];
    let mut rhs = vec![0.0; inner];
    for k in 0..inner {
        let i = k + 1;
        diag[k] = 2.0 * (h[i - 1] + h[i]);
        rhs[k] = 6.0 * ((y[i + 1] - y[i]) / h[i] - (y[i] - y[i - 1]) / h[i - 1]);
    }

    // Forward sweep. Sub-diagonal of row k is h[k], super-diagonal h[k+1].
    for k in 1..inner {
        let w = h[k] / diag[k - 1];
        diag[k] -= w * h[k];
        rhs[k] -= w * rhs[k - 1];
    }

    // Back substitution.
    m[inner] = rhs[inner - 1] / diag[inner - 1];
    for k in (0..inner - 1).rev() {
        m[k + 1] = (rhs[k] - h[k + 1] * m[k + 2]) / diag[k];
    }
    m
}

/// Number of points [`resample_times`] yields, saturating at `u64::MAX`.
pub fn resample_count(t0: f64, t_last: f64, density: u32) -> u64 {
    let density = f64::from(density.max(1));
    let inner = ((t_last - t0) * density + STEP_ROUNDING_EPS).floor().max(0.0) as u64;
    inner.saturating_add(1)
}

/// Sample times `t0 + k / density` up to and including `t_last`.
///
/// Callers bound [`resample_count`] first; the grid is allocated in full.
pub fn resample_times(t0: f64, t_last: f64, density: u32) -> Vec<f64> {
    let count = usize::try_from(resample_count(t0, t_last, density)).unwrap_or(usize::MAX);
    let density = f64::from(density.max(1));
    (0..count).map(|k| t0 + k as f64 / density).collect()
}

/// Spline both joint sequences through the waypoints and resample them.
pub fn smooth(waypoints: &Setpoints, density: u32) -> Setpoints {
    let (Some(&t0), Some(&t_last)) = (waypoints.t.first(), waypoints.t.last()) else {
        return Setpoints::default();
    };
    let t = resample_times(t0, t_last, density);
    let q = [0, 1].map(|j| {
        let spline = NaturalCubicSpline::new(&waypoints.t, &waypoints.q[j]);
        t.iter().map(|&ti| spline.eval(ti)).collect::<Vec<_>>()
    });
    Setpoints { t, q }
}

// ─── Tests ──────────────────────────────────────────────────────────
