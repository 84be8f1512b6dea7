//! Field Generator
//!
//! Evaluates a closed-form complex field over a [`SamplingGrid`]. Each beam
//! family implements [`FieldMode`]; [`generate_field`] validates the mode
//! parameters and dispatches on [`BeamFamily`](crate::BeamFamily).

mod beam;
mod gradient;
mod hermite;
mod laguerre;
mod noise;

pub use gradient::Gradient;
pub use hermite::HermiteGaussian;
pub use laguerre::LaguerreGaussian;
pub use noise::{Noise, NoiseDistribution};

use crate::error::{HologramError, Result};
use crate::grid::SamplingGrid;
use crate::mode::{ModeParameters, Placement};
use tracing::debug;

/// Highest |l|, p, m or n accepted by the analytic beams
///
/// Every order up to this renders on any grid; it bounds the per-pixel
/// recurrence length.
pub const MAX_ORDER: i32 = 200;

/// One evaluation capability per beam family
pub trait FieldMode {
    /// Reject malformed parameters. Called before any array work.
    fn validate(&self) -> Result<()>;

    /// Evaluate the field over `grid`
    fn evaluate(&self, grid: &SamplingGrid, placement: &Placement) -> Result<ComplexField>;
}

/// Normalized amplitude and phase over a grid
///
/// Amplitude lies in `[0, 1]`, phase in `(-π, π]` for every generated field.
#[derive(Debug, Clone, PartialEq)]
pub struct ComplexField {
    width: u32,
    height: u32,
    amplitude: Vec<f64>,
    phase: Vec<f64>,
}

impl ComplexField {
    /// Build from row-major amplitude and phase planes
    ///
    /// Values are not range-checked here; the encoder clamps amplitude and
    /// rejects non-finite samples.
    pub fn from_parts(
        width: u32,
        height: u32,
        amplitude: Vec<f64>,
        phase: Vec<f64>,
    ) -> Result<Self> {
        let expected = (width as usize).saturating_mul(height as usize);
        if amplitude.len() != expected || phase.len() != expected {
            return Err(HologramError::invalid(
                "field",
                format!(
                    "{width}×{height} field needs {expected} samples, got {} amplitude and {} phase",
                    amplitude.len(),
                    phase.len()
                ),
            ));
        }
        Ok(Self {
            width,
            height,
            amplitude,
            phase,
        })
    }

    /// Zero amplitude and zero phase everywhere
    pub fn zeros(width: u32, height: u32) -> Self {
        let len = (width as usize).saturating_mul(height as usize);
        Self {
            width,
            height,
            amplitude: vec![0.0; len],
            phase: vec![0.0; len],
        }
    }

    /// Width in pixels
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Row-major amplitude plane
    pub fn amplitude(&self) -> &[f64] {
        &self.amplitude
    }

    /// Row-major phase plane
    pub fn phase(&self) -> &[f64] {
        &self.phase
    }

    /// (amplitude, phase) at a pixel
    pub fn get(&self, row: u32, col: u32) -> Option<(f64, f64)> {
        if row >= self.height || col >= self.width {
            return None;
        }
        let idx = (row as usize)
            .checked_mul(self.width as usize)?
            .checked_add(col as usize)?;
        Some((*self.amplitude.get(idx)?, *self.phase.get(idx)?))
    }

    /// Iterate `(amplitude, phase)` in row-major order
    pub fn samples(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.amplitude
            .iter()
            .copied()
            .zip(self.phase.iter().copied())
    }
}

/// Zero field: A ≡ 0, φ ≡ 0
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ZeroField;

impl FieldMode for ZeroField {
    fn validate(&self) -> Result<()> {
        Ok(())
    }

    fn evaluate(&self, grid: &SamplingGrid, _placement: &Placement) -> Result<ComplexField> {
        Ok(ComplexField::zeros(grid.width(), grid.height()))
    }
}

/// Validate `mode` and evaluate its field over `grid`
pub fn generate_field(mode: &ModeParameters, grid: &SamplingGrid) -> Result<ComplexField> {
    mode.validate()?;
    let field = mode
        .family
        .field_mode()
        .evaluate(grid, &mode.placement())?;
    debug!(
        family = mode.family.name(),
        width = field.width(),
        height = field.height(),
        "field generated"
    );
    Ok(field)
}

/// Check a signed beam index is in `0..=MAX_ORDER` and return it unsigned
pub(crate) fn beam_index(parameter: &'static str, value: i32) -> Result<u32> {
    if (0..=MAX_ORDER).contains(&value) {
        u32::try_from(value)
            .map_err(|_| HologramError::invalid(parameter, format!("got {value}")))
    } else {
        Err(HologramError::invalid(
            parameter,
            format!("must be in 0..={MAX_ORDER}, got {value}"),
        ))
    }
}
