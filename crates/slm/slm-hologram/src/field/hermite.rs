//! Hermite-Gaussian beams

use super::beam::{sample_normalized, BeamGeometry, FAR_FIELD, ZERO_SAMPLE};
use super::{beam_index, ComplexField, FieldMode};
use crate::error::{ensure_positive, Result};
use crate::grid::SamplingGrid;
use crate::mode::Placement;
use crate::polynomial::hermite_scaled;
use core::f64::consts::{PI, SQRT_2};
use num_complex::Complex64;
use serde::{Deserialize, Serialize};

/// Hermite-Gaussian beam HG(m, n) with waist `w0`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HermiteGaussian {
    /// Horizontal index (≥ 0)
    pub m: i32,
    /// Vertical index (≥ 0)
    pub n: i32,
    /// Waist radius
    pub w0: f64,
}

impl FieldMode for HermiteGaussian {
    fn validate(&self) -> Result<()> {
        beam_index("m", self.m)?;
        beam_index("n", self.n)?;
        ensure_positive("w0", self.w0)
    }

    fn evaluate(&self, grid: &SamplingGrid, placement: &Placement) -> Result<ComplexField> {
        let m = beam_index("m", self.m)?;
        let n = beam_index("n", self.n)?;
        ensure_positive("w0", self.w0)?;
        let order = m.saturating_add(n);

        let geometry = BeamGeometry::at(self.w0, placement.propagation);
        let w2 = geometry.squared_waist()?;
        let ln_scale = geometry.scale.ln();
        let scale = SQRT_2 / geometry.waist;

        sample_normalized(grid, placement.displacement, |dx, dy| {
            let r2 = dx * dx + dy * dy;
            if 2.0 * r2 / w2 > FAR_FIELD {
                return ZERO_SAMPLE;
            }
            let hx = hermite_scaled(m, scale * dx);
            let hy = hermite_scaled(n, scale * dy);
            let ln_envelope = hx.ln_abs() + hy.ln_abs() - r2 / w2 + ln_scale;
            let sign = if hx.is_negative() != hy.is_negative() { PI } else { 0.0 };
            Complex64::new(ln_envelope, geometry.envelope_phase(r2, order) + sign)
        })
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    fn evaluate(m: i32, n: i32) -> ComplexField {
        let grid = SamplingGrid::new(65, 65, 0.05).unwrap();
        HermiteGaussian { m, n, w0: 0.5 }
            .evaluate(&grid, &Placement::default())
            .unwrap()
    }

    #[test]
    fn test_hg00_is_gaussian() {
        let field = evaluate(0, 0);
        assert_eq!(field.get(32, 32).unwrap(), (1.0, 0.0));
    }

    #[test]
    fn test_hg10_has_vertical_node_and_opposite_lobes() {
        let field = evaluate(1, 0);
        // Node along x = 0
        assert!(field.get(10, 32).unwrap().0 < 1e-12);
        // Lobes left and right differ by π
        let left = field.get(32, 26).unwrap().1;
        let right = field.get(32, 38).unwrap().1;
        assert!((left - PI).abs() < 1e-12, "{left}");
        assert!(right.abs() < 1e-12, "{right}");
    }

    #[test]
    fn test_hg01_has_horizontal_node() {
        let field = evaluate(0, 1);
        assert!(field.get(32, 10).unwrap().0 < 1e-12);
        assert!(field.get(26, 32).unwrap().0 > 0.5);
    }

    #[test]
    fn test_rejects_negative_indices() {
        assert!(HermiteGaussian { m: -1, n: 0, w0: 1.0 }.validate().is_err());
        assert!(HermiteGaussian { m: 0, n: -1, w0: 1.0 }.validate().is_err());
        assert!(HermiteGaussian { m: 0, n: 0, w0: 0.0 }.validate().is_err());
    }
}
