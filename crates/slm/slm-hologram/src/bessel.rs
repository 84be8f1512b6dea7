//! Inverse modulation-depth responses
//!
//! The encoder needs `M` such that a response `f(M)` equals the target
//! amplitude. Both responses are monotonic on their principal branch, so each
//! inverse is a sampled table read back by linear interpolation. Tables are
//! built once per process and shared.

use crate::interp::interpolate_clamped;
use core::f64::consts::PI;
use std::sync::OnceLock;

/// First maximum of the Bessel function J1
pub const M_MAX: f64 = 1.841_183_781_340_659_3;

/// Samples in the shared inverse tables
pub const TABLE_SAMPLES: usize = 4096;

/// J1 at its first maximum (≈ 0.5819), the largest encodable amplitude
pub fn j1_max() -> f64 {
    libm::j1(M_MAX)
}

/// Inverse of `M ↦ J1(M)` on `[0, M_MAX]`
#[derive(Debug, Clone, PartialEq)]
pub struct BesselInverse {
    responses: Vec<f64>,
    depths: Vec<f64>,
}

impl BesselInverse {
    /// Sample `J1` at `samples` evenly spaced depths (at least two)
    pub fn build(samples: usize) -> Self {
        let samples = samples.max(2);
        let last = samples - 1;
        let mut depths: Vec<f64> = (0..last)
            .map(|i| M_MAX * fraction(i, last))
            .collect();
        depths.push(M_MAX);
        let responses = depths.iter().map(|&m| libm::j1(m)).collect();
        Self { responses, depths }
    }

    /// Process-wide table with [`TABLE_SAMPLES`] entries
    pub fn shared() -> &'static Self {
        static TABLE: OnceLock<BesselInverse> = OnceLock::new();
        TABLE.get_or_init(|| Self::build(TABLE_SAMPLES))
    }

    /// Largest amplitude the table can invert without clamping
    pub fn max_amplitude(&self) -> f64 {
        self.responses.last().copied().unwrap_or(0.0)
    }

    /// Modulation depth `M ∈ [0, M_MAX]` with `J1(M) ≈ amplitude`
    ///
    /// Amplitude ≤ 0 yields exactly 0; amplitude ≥ `J1(M_MAX)` yields exactly
    /// `M_MAX`.
    pub fn invert(&self, amplitude: f64) -> f64 {
        interpolate_clamped(&self.responses, &self.depths, amplitude)
    }

    /// True when `amplitude` lies above the invertible range
    pub fn clamps(&self, amplitude: f64) -> bool {
        amplitude > self.max_amplitude()
    }
}

/// Inverse of `s ↦ sin(s)/s` on `[-π, 0]`, returned as `M = 1 + s/π ∈ [0, 1]`
#[derive(Debug, Clone, PartialEq)]
pub struct SincInverse {
    responses: Vec<f64>,
    depths: Vec<f64>,
}

impl SincInverse {
    /// Sample sinc at `samples` evenly spaced points (at least two)
    pub fn build(samples: usize) -> Self {
        let samples = samples.max(2);
        let last = samples - 1;
        let mut depths: Vec<f64> = (0..last).map(|i| fraction(i, last)).collect();
        depths.push(1.0);
        let mut responses: Vec<f64> = depths
            .iter()
            .map(|&m| {
                let s = (m - 1.0) * PI;
                if s == 0.0 {
                    1.0
                } else {
                    s.sin() / s
                }
            })
            .collect();
        // sin(-π) is not exactly zero in floating point
        if let Some(first) = responses.first_mut() {
            *first = 0.0;
        }
        Self { responses, depths }
    }

    /// Process-wide table with [`TABLE_SAMPLES`] entries
    pub fn shared() -> &'static Self {
        static TABLE: OnceLock<SincInverse> = OnceLock::new();
        TABLE.get_or_init(|| Self::build(TABLE_SAMPLES))
    }

    /// Depth `M ∈ [0, 1]`; amplitude ≤ 0 yields 0, amplitude ≥ 1 yields 1
    pub fn invert(&self, amplitude: f64) -> f64 {
        interpolate_clamped(&self.responses, &self.depths, amplitude)
    }
}

// SAFETY: callers pass index < total and total ≥ 1 table sizes (≤ 2^53), so
// both convert to f64 exactly.
#[allow(clippy::cast_precision_loss)]
fn fraction(index: usize, total: usize) -> f64 {
    index as f64 / total as f64
}
