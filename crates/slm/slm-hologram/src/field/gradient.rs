//! Linear phase ramp

use super::{ComplexField, FieldMode};
use crate::error::{ensure_finite, HologramError, Result, Stage};
use crate::grid::SamplingGrid;
use crate::mode::Placement;
use crate::phase::principal_phase;
use serde::{Deserialize, Serialize};

/// Phase ramp φ = slope_x·(x − X) + slope_y·(y − Y) with unit amplitude
///
/// Slopes are in radians per unit length.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Gradient {
    /// Phase slope along x
    pub slope_x: f64,
    /// Phase slope along y
    pub slope_y: f64,
}

impl FieldMode for Gradient {
    fn validate(&self) -> Result<()> {
        ensure_finite("slope_x", self.slope_x)?;
        ensure_finite("slope_y", self.slope_y)
    }

    fn evaluate(&self, grid: &SamplingGrid, placement: &Placement) -> Result<ComplexField> {
        self.validate()?;
        let centre = placement.displacement;
        let mut phase = Vec::with_capacity(grid.len());
        for (row, col, x, y) in grid.points() {
            let value = self.slope_x * (x - centre.x) + self.slope_y * (y - centre.y);
            if !value.is_finite() {
                return Err(HologramError::Numeric {
                    stage: Stage::Field,
                    row,
                    col,
                    value,
                });
            }
            phase.push(principal_phase(value));
        }
        let amplitude = vec![1.0; phase.len()];
        ComplexField::from_parts(grid.width(), grid.height(), amplitude, phase)
    }
}
