//! Gaussian beam geometry shared by the analytic families

use super::ComplexField;
use crate::error::{HologramError, Result, Stage};
use crate::grid::SamplingGrid;
use crate::mode::{Displacement, Propagation};
use crate::phase::principal_phase;
use core::f64::consts::{PI, TAU};
use num_complex::Complex64;
use tracing::warn;

/// Beam radius, wavefront curvature and Gouy phase at one plane
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct BeamGeometry {
    /// Beam radius w(z)
    pub waist: f64,
    /// w0 / w(z)
    pub scale: f64,
    /// 1 / R(z), zero at the waist
    pub inverse_radius: f64,
    /// Gouy phase ζ(z)
    pub gouy: f64,
    /// 2π / λ, zero at the waist
    pub wavenumber: f64,
}

impl BeamGeometry {
    pub fn at(w0: f64, propagation: Option<Propagation>) -> Self {
        match propagation {
            Some(Propagation {
                distance,
                wavelength,
            }) if distance != 0.0 => {
                let rayleigh = PI * w0 * w0 / wavelength;
                let ratio = distance / rayleigh;
                let stretch = (1.0 + ratio * ratio).sqrt();
                Self {
                    waist: w0 * stretch,
                    scale: 1.0 / stretch,
                    inverse_radius: distance / (distance * distance + rayleigh * rayleigh),
                    gouy: ratio.atan(),
                    wavenumber: TAU / wavelength,
                }
            }
            _ => Self {
                waist: w0,
                scale: 1.0,
                inverse_radius: 0.0,
                gouy: 0.0,
                wavenumber: 0.0,
            },
        }
    }

    /// w(z)², rejected when it leaves the normal `f64` range
    pub fn squared_waist(&self) -> Result<f64> {
        let w2 = self.waist * self.waist;
        if w2.is_normal() {
            Ok(w2)
        } else {
            Err(HologramError::invalid(
                "w0",
                format!("beam radius {} cannot be squared in f64", self.waist),
            ))
        }
    }

    /// Curvature and Gouy phase at squared radius `r2` for a mode of total order `order`
    pub fn envelope_phase(&self, r2: f64, order: u32) -> f64 {
        -self.wavenumber * r2 * self.inverse_radius / 2.0 + (f64::from(order) + 1.0) * self.gouy
    }
}

/// Squared distance from the beam centre, in units of w²/2, past which a
/// sample is taken as zero. Keeps the scaled recurrences far from overflow.
pub(crate) const FAR_FIELD: f64 = 1e200;

/// Complex logarithm of an exact zero
pub(crate) const ZERO_SAMPLE: Complex64 = Complex64::new(f64::NEG_INFINITY, 0.0);

/// Evaluate `ln_sample(dx, dy)` over the grid relative to `centre`, then
/// normalize amplitude by the largest magnitude.
///
/// Each sample is the complex logarithm `ln|u| + i·arg u` of the field, so a
/// high-order polynomial and its Gaussian envelope are combined as a sum of
/// logarithms and never overflow against each other. `ln|u| = -∞` is an exact
/// zero; any other non-finite part fails with the pixel it occurred at. An
/// all-zero field yields zero amplitude and zero phase.
pub(crate) fn sample_normalized<F>(
    grid: &SamplingGrid,
    centre: Displacement,
    ln_sample: F,
) -> Result<ComplexField>
where
    F: Fn(f64, f64) -> Complex64,
{
    let mut values = Vec::with_capacity(grid.len());
    let mut peak = f64::NEG_INFINITY;
    for (row, col, x, y) in grid.points() {
        let ln_u = ln_sample(x - centre.x, y - centre.y);
        let bad = if ln_u.re.is_nan() || ln_u.re == f64::INFINITY {
            Some(ln_u.re)
        } else if !ln_u.im.is_finite() {
            Some(ln_u.im)
        } else {
            None
        };
        if let Some(value) = bad {
            return Err(HologramError::Numeric {
                stage: Stage::Field,
                row,
                col,
                value,
            });
        }
        peak = peak.max(ln_u.re);
        values.push(ln_u);
    }

    if peak == f64::NEG_INFINITY {
        warn!(
            width = grid.width(),
            height = grid.height(),
            "field is zero everywhere on the grid"
        );
        return Ok(ComplexField::zeros(grid.width(), grid.height()));
    }

    let mut amplitude = Vec::with_capacity(values.len());
    let mut phase = Vec::with_capacity(values.len());
    for ln_u in values {
        if ln_u.re == f64::NEG_INFINITY {
            amplitude.push(0.0);
            phase.push(0.0);
        } else {
            amplitude.push((ln_u.re - peak).exp().min(1.0));
            phase.push(principal_phase(ln_u.im));
        }
    }
    ComplexField::from_parts(grid.width(), grid.height(), amplitude, phase)
}
