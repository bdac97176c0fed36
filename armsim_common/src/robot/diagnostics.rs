//! Silent numerical substitution counters.
//!
//! The integrator and the kinematics replace undefined arithmetic (division
//! by a zero constant, inverse kinematics at a singular point) with zero and
//! keep going. Each replacement is recorded here so a caller can tell a
//! motionless joint from a misconfigured one.

use bitflags::bitflags;
use serde::Serialize;

bitflags! {
    /// Kinds of silent substitution performed during a run.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Substitution: u8 {
        /// `Ra = 0`: target current forced to 0.
        const ZERO_RESISTANCE    = 0x01;
        /// `T_e = 0`: actuator current forced to 0.
        const ZERO_TIME_CONSTANT = 0x02;
        /// `J = 0`: acceleration forced to 0.
        const ZERO_INERTIA       = 0x04;
        /// Inverse kinematics at the origin: polar angle taken as 0.
        const IK_ORIGIN          = 0x08;
        /// Inverse kinematics argument outside [-1, 1]: clamped.
        const IK_DOMAIN          = 0x10;
        /// Inverse kinematics produced NaN: replaced with 0.
        const IK_NAN             = 0x20;
    }
}

impl Default for Substitution {
    fn default() -> Self {
        Self::empty()
    }
}

/// Number of distinct substitution kinds.
const KINDS: usize = 6;

/// Substitutions observed during the last compute and projection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Diagnostics {
    seen: Substitution,
    counts: [u64; KINDS],
}

impl Diagnostics {
    /// Record one occurrence of each kind in `kind`.
    pub fn record(&mut self, kind: Substitution) {
        self.seen |= kind;
        for (i, flag) in Substitution::all().iter().enumerate() {
            if kind.contains(flag) {
                self.counts[i] += 1;
            }
        }
    }

    /// Fold another record into this one.
    pub fn merge(&mut self, other: &Diagnostics) {
        self.seen |= other.seen;
        for (a, b) in self.counts.iter_mut().zip(other.counts.iter()) {
            *a += b;
        }
    }

    /// Set of kinds seen at least once.
    #[inline]
    pub fn seen(&self) -> Substitution {
        self.seen
    }

    /// Occurrences of a single kind. Returns 0 for a composite flag.
    pub fn count(&self, kind: Substitution) -> u64 {
        Substitution::all()
            .iter()
            .position(|f| f == kind)
            .map_or(0, |i| self.counts[i])
    }

    /// Total number of substitutions of any kind.
    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// Whether nothing was substituted.
    pub fn is_clean(&self) -> bool {
        self.seen.is_empty()
    }

    /// Forget everything recorded so far.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Serializable per-kind counts.
    pub fn summary(&self) -> DiagnosticsSummary {
        DiagnosticsSummary {
            zero_resistance: self.count(Substitution::ZERO_RESISTANCE),
            zero_time_constant: self.count(Substitution::ZERO_TIME_CONSTANT),
            zero_inertia: self.count(Substitution::ZERO_INERTIA),
            ik_origin: self.count(Substitution::IK_ORIGIN),
            ik_domain: self.count(Substitution::IK_DOMAIN),
            ik_nan: self.count(Substitution::IK_NAN),
        }
    }
}

/// Flat view of [`Diagnostics`] for JSON output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct DiagnosticsSummary {
    pub zero_resistance: u64,
    pub zero_time_constant: u64,
    pub zero_inertia: u64,
    pub ik_origin: u64,
    pub ik_domain: u64,
    pub ik_nan: u64,
}
