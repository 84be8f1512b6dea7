//! Laguerre-Gaussian beams

use super::beam::{sample_normalized, BeamGeometry, FAR_FIELD, ZERO_SAMPLE};
use super::{beam_index, ComplexField, FieldMode, MAX_ORDER};
use crate::error::{ensure_positive, HologramError, Result};
use crate::grid::SamplingGrid;
use crate::mode::Placement;
use crate::polynomial::generalized_laguerre_scaled;
use core::f64::consts::PI;
use num_complex::Complex64;
use serde::{Deserialize, Serialize};

/// Laguerre-Gaussian beam LG(l, p) with waist `w0`
///
/// `l` is the azimuthal index (topological charge) and `p` the radial index.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LaguerreGaussian {
    /// Azimuthal index
    pub l: i32,
    /// Radial index (≥ 0)
    pub p: i32,
    /// Waist radius
    pub w0: f64,
}

impl FieldMode for LaguerreGaussian {
    fn validate(&self) -> Result<()> {
        if !(-MAX_ORDER..=MAX_ORDER).contains(&self.l) {
            return Err(HologramError::invalid(
                "l",
                format!("must be in -{MAX_ORDER}..={MAX_ORDER}, got {}", self.l),
            ));
        }
        beam_index("p", self.p)?;
        ensure_positive("w0", self.w0)
    }

    fn evaluate(&self, grid: &SamplingGrid, placement: &Placement) -> Result<ComplexField> {
        self.validate()?;
        let p = beam_index("p", self.p)?;
        let charge = self.l.unsigned_abs();
        let order = p.saturating_mul(2).saturating_add(charge);
        let alpha = f64::from(charge);
        let l = f64::from(self.l);

        let geometry = BeamGeometry::at(self.w0, placement.propagation);
        let w2 = geometry.squared_waist()?;
        let ln_scale = geometry.scale.ln();

        sample_normalized(grid, placement.displacement, |dx, dy| {
            let r2 = dx * dx + dy * dy;
            let rho2 = 2.0 * r2 / w2;
            if rho2 > FAR_FIELD {
                return ZERO_SAMPLE;
            }
            let laguerre = generalized_laguerre_scaled(p, alpha, rho2);
            // (√ρ²)^|l|, with 0^0 = 1
            let ln_power = if charge == 0 { 0.0 } else { 0.5 * alpha * rho2.ln() };
            let ln_radial = ln_power + laguerre.ln_abs() - r2 / w2 + ln_scale;
            let sign = if laguerre.is_negative() { PI } else { 0.0 };
            let phase = l * dy.atan2(dx) + geometry.envelope_phase(r2, order) + sign;
            Complex64::new(ln_radial, phase)
        })
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::mode::Displacement;

    fn evaluate(mode: LaguerreGaussian, placement: Placement) -> ComplexField {
        let grid = SamplingGrid::new(64, 64, 0.05).unwrap();
        mode.evaluate(&grid, &placement).unwrap()
    }

    #[test]
    fn test_fundamental_mode_peaks_at_centre() {
        let field = evaluate(
            LaguerreGaussian { l: 0, p: 0, w0: 0.5 },
            Placement::default(),
        );
        // Four pixels straddle the centre of an even grid
        let centre = field.get(31, 31).unwrap().0;
        assert!((centre - 1.0).abs() < 1e-12);
        assert!(field.get(0, 0).unwrap().0 < 1e-6);
        assert!(field.phase().iter().all(|&phi| phi == 0.0));
    }

    #[test]
    fn test_vortex_has_dark_core_and_bright_ring() {
        let field = evaluate(LaguerreGaussian { l: 1, p: 0, w0: 0.5 }, Placement::default());
        let core = field.get(31, 31).unwrap().0;
        let peak = field.amplitude().iter().copied().fold(0.0, f64::max);
        assert!(core < 0.2, "core amplitude {core}");
        assert!((peak - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_vortex_phase_follows_azimuth() {
        let grid = SamplingGrid::new(65, 65, 0.05).unwrap();
        let field = LaguerreGaussian { l: 1, p: 0, w0: 0.5 }
            .evaluate(&grid, &Placement::default())
            .unwrap();
        // Directly right of centre θ = 0; directly above θ = π/2
        let right = field.get(32, 40).unwrap().1;
        let above = field.get(24, 32).unwrap().1;
        assert!(right.abs() < 1e-9, "{right}");
        assert!((above - PI / 2.0).abs() < 1e-9, "{above}");
    }

    #[test]
    fn test_displacement_moves_the_core() {
        let grid = SamplingGrid::new(65, 65, 0.05).unwrap();
        let placement = Placement {
            displacement: Displacement { x: 0.4, y: 0.0 },
            propagation: None,
        };
        let field = LaguerreGaussian { l: 2, p: 0, w0: 0.5 }
            .evaluate(&grid, &placement)
            .unwrap();
        // x = 0.4 lies 8 columns right of centre
        assert!(field.get(32, 40).unwrap().0 < 1e-9);
        assert!(field.get(32, 32).unwrap().0 > 0.5);
    }

    #[test]
    fn test_rejects_bad_parameters() {
        assert!(LaguerreGaussian { l: 1, p: -1, w0: 1.0 }.validate().is_err());
        assert!(LaguerreGaussian { l: 1, p: 0, w0: -1.0 }.validate().is_err());
        assert!(LaguerreGaussian { l: i32::MIN, p: 0, w0: 1.0 }.validate().is_err());
    }
}
