//! Hologram Encoder
//!
//! Folds a complex field into one real phase pattern. Amplitude sets a
//! modulation depth `M`, the field phase rides on a carrier grating, and the
//! result is wrapped into `[-π, π)`:
//!
//! ```text
//! M = J1⁻¹(A)
//! ψ = 2π (x cos θ + y sin θ) / Λ + φ
//! H = wrap(M · sin ψ)
//! ```
//!
//! The target field reconstructs in the first diffraction order of the carrier.

use crate::bessel::{BesselInverse, SincInverse};
use crate::error::{HologramError, Result, Stage};
use crate::field::ComplexField;
use crate::grid::SamplingGrid;
use crate::mode::Carrier;
use crate::phase::wrap_phase;
use core::f64::consts::{PI, TAU};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// How amplitude becomes a modulation depth
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EncodingScheme {
    /// `H = M sin ψ` with `J1(M) = A` (exact single-hologram encoding)
    #[default]
    Bessel,
    /// `H = M · mod(ψ − πM, 2π)` with `sinc(π(M − 1)) = A`
    Sinc,
}

/// What happens to amplitudes above `J1(M_MAX)` in the Bessel scheme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AmplitudeMapping {
    /// Clamp to `J1(M_MAX)`; every amplitude above it encodes as `M_MAX`
    #[default]
    Clamp,
    /// Multiply amplitude by `J1(M_MAX)` first, keeping `[0, 1]` distinguishable
    Scale,
}

/// Encoder settings
///
/// The Sinc scheme already spans amplitudes `[0, 1]`, so the mapping only
/// affects the Bessel scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct HologramEncoder {
    /// Depth response to invert
    #[serde(default)]
    pub scheme: EncodingScheme,
    /// Policy for amplitudes outside the Bessel branch
    #[serde(default)]
    pub amplitude_mapping: AmplitudeMapping,
}

impl HologramEncoder {
    /// Bessel scheme with clamping
    pub const DEFAULT: Self = Self {
        scheme: EncodingScheme::Bessel,
        amplitude_mapping: AmplitudeMapping::Clamp,
    };

    /// Bessel scheme with amplitude scaling
    pub const SCALED: Self = Self {
        scheme: EncodingScheme::Bessel,
        amplitude_mapping: AmplitudeMapping::Scale,
    };

    /// Sinc scheme
    pub const SINC: Self = Self {
        scheme: EncodingScheme::Sinc,
        amplitude_mapping: AmplitudeMapping::Clamp,
    };

    /// Modulation depth for a normalized amplitude
    pub fn modulation_depth(&self, amplitude: f64) -> f64 {
        match self.scheme {
            EncodingScheme::Bessel => {
                let table = BesselInverse::shared();
                match self.amplitude_mapping {
                    AmplitudeMapping::Clamp => table.invert(amplitude),
                    AmplitudeMapping::Scale => {
                        table.invert(amplitude.clamp(0.0, 1.0) * table.max_amplitude())
                    }
                }
            }
            EncodingScheme::Sinc => SincInverse::shared().invert(amplitude),
        }
    }

    /// Encode `field` over `grid` with carrier `carrier`
    ///
    /// Every sample is checked before any output is produced, so a non-finite
    /// amplitude or phase fails without a partial hologram.
    pub fn encode(
        &self,
        field: &ComplexField,
        grid: &SamplingGrid,
        carrier: &Carrier,
    ) -> Result<PhaseHologram> {
        carrier.validate()?;
        if (field.width(), field.height()) != grid.dimensions() {
            return Err(HologramError::invalid(
                "field",
                format!(
                    "field is {}×{} but the grid is {}×{}",
                    field.width(),
                    field.height(),
                    grid.width(),
                    grid.height()
                ),
            ));
        }

        for ((row, col, _, _), (amplitude, phase)) in grid.points().zip(field.samples()) {
            for value in [amplitude, phase] {
                if !value.is_finite() {
                    return Err(HologramError::Numeric {
                        stage: Stage::Encoder,
                        row,
                        col,
                        value,
                    });
                }
            }
        }

        let (kx, ky) = carrier.wave_vector();
        let bessel = BesselInverse::shared();
        let mut clamped = 0_usize;
        let mut values = Vec::with_capacity(grid.len());
        for ((row, col, x, y), (amplitude, phase)) in grid.points().zip(field.samples()) {
            let psi = kx * x + ky * y + phase;
            if !psi.is_finite() {
                return Err(HologramError::Numeric {
                    stage: Stage::Encoder,
                    row,
                    col,
                    value: psi,
                });
            }
            let depth = self.modulation_depth(amplitude);
            let raw = match self.scheme {
                EncodingScheme::Bessel => {
                    if self.amplitude_mapping == AmplitudeMapping::Clamp
                        && bessel.clamps(amplitude)
                    {
                        clamped = clamped.saturating_add(1);
                    }
                    depth * psi.sin()
                }
                EncodingScheme::Sinc => depth * (psi - PI * depth).rem_euclid(TAU),
            };
            values.push(wrap_phase(raw));
        }

        debug!(
            scheme = ?self.scheme,
            width = grid.width(),
            height = grid.height(),
            clamped,
            "hologram encoded"
        );

        Ok(PhaseHologram {
            width: grid.width(),
            height: grid.height(),
            values,
        })
    }
}

/// Real phase pattern with every entry in `[-π, π)`
#[derive(Debug, Clone, PartialEq)]
pub struct PhaseHologram {
    width: u32,
    height: u32,
    values: Vec<f64>,
}

impl PhaseHologram {
    /// Wrap row-major values into a hologram
    ///
    /// Values are wrapped into `[-π, π)`; non-finite values are rejected.
    pub fn from_values(width: u32, height: u32, values: Vec<f64>) -> Result<Self> {
        let expected = (width as usize).saturating_mul(height as usize);
        if values.len() != expected {
            return Err(HologramError::invalid(
                "hologram",
                format!(
                    "{width}×{height} hologram needs {expected} values, got {}",
                    values.len()
                ),
            ));
        }
        let width_px = (width as usize).max(1);
        let mut wrapped = Vec::with_capacity(values.len());
        for (idx, value) in values.into_iter().enumerate() {
            if !value.is_finite() {
                return Err(HologramError::Numeric {
                    stage: Stage::Encoder,
                    row: idx / width_px,
                    col: idx % width_px,
                    value,
                });
            }
            wrapped.push(wrap_phase(value));
        }
        Ok(Self {
            width,
            height,
            values: wrapped,
        })
    }

    /// Width in pixels
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels
    pub fn height(&self) -> u32 {
        self.height
    }

    /// (width, height) in pixels
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Row-major phase values
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Phase at a pixel
    pub fn get(&self, row: u32, col: u32) -> Option<f64> {
        if row >= self.height || col >= self.width {
            return None;
        }
        let idx = (row as usize)
            .checked_mul(self.width as usize)?
            .checked_add(col as usize)?;
        self.values.get(idx).copied()
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::panic, clippy::indexing_slicing)]
    use super::*;
    use crate::bessel::{j1_max, M_MAX};

    fn grid() -> SamplingGrid {
        SamplingGrid::new(32, 16, 0.01).unwrap()
    }

    fn uniform_field(amplitude: f64, phase: f64) -> ComplexField {
        ComplexField::from_parts(32, 16, vec![amplitude; 512], vec![phase; 512]).unwrap()
    }

    #[test]
    fn test_depth_endpoints() {
        let encoder = HologramEncoder::DEFAULT;
        assert_eq!(encoder.modulation_depth(0.0), 0.0);
        assert_eq!(encoder.modulation_depth(j1_max()), M_MAX);
        assert_eq!(encoder.modulation_depth(1.0), M_MAX);
    }

    #[test]
    fn test_scaled_mapping_keeps_amplitudes_apart() {
        let clamp = HologramEncoder::DEFAULT;
        let scale = HologramEncoder::SCALED;
        assert_eq!(clamp.modulation_depth(0.7), clamp.modulation_depth(0.9));
        assert!(scale.modulation_depth(0.7) < scale.modulation_depth(0.9));
        assert_eq!(scale.modulation_depth(1.0), M_MAX);
        assert_eq!(scale.modulation_depth(0.0), 0.0);
    }

    #[test]
    fn test_zero_amplitude_gives_flat_hologram() {
        let holo = HologramEncoder::DEFAULT
            .encode(&uniform_field(0.0, 1.2), &grid(), &Carrier::DEFAULT)
            .unwrap();
        assert!(holo.values().iter().all(|&h| h == 0.0));
    }

    #[test]
    fn test_unit_amplitude_is_carrier_only() {
        let grid = grid();
        let carrier = Carrier {
            period: 0.05,
            angle: 0.3,
        };
        let holo = HologramEncoder::DEFAULT
            .encode(&uniform_field(1.0, 0.0), &grid, &carrier)
            .unwrap();
        let (kx, ky) = carrier.wave_vector();
        for ((_, _, x, y), &h) in grid.points().zip(holo.values()) {
            let expected = M_MAX * (kx * x + ky * y + 0.0).sin();
            assert_eq!(h, expected);
        }
    }

    #[test]
    fn test_output_range_for_adversarial_phase() {
        let grid = grid();
        for &phase in &[PI, -PI, 1e6, -1e6, 3.0 * PI] {
            for encoder in [HologramEncoder::DEFAULT, HologramEncoder::SINC] {
                let holo = encoder
                    .encode(&uniform_field(0.8, phase), &grid, &Carrier::DEFAULT)
                    .unwrap();
                assert!(holo.values().iter().all(|&h| (-PI..PI).contains(&h)));
            }
        }
    }

    #[test]
    fn test_sinc_scheme_unit_amplitude_is_sawtooth() {
        let grid = SamplingGrid::new(8, 1, 0.01).unwrap();
        let field = ComplexField::from_parts(8, 1, vec![1.0; 8], vec![0.0; 8]).unwrap();
        let holo = HologramEncoder::SINC
            .encode(&field, &grid, &Carrier::DEFAULT)
            .unwrap();
        // M = 1 gives a blazed grating: wrap(mod(ψ − π, 2π))
        let (kx, _) = Carrier::DEFAULT.wave_vector();
        for (&x, &h) in grid.x_axis().iter().zip(holo.values()) {
            let expected = wrap_phase((kx * x + 0.0 - PI).rem_euclid(TAU));
            assert!((h - expected).abs() < 1e-12);
        }
    }

    #[test]
    fn test_non_finite_input_names_pixel() {
        let mut amplitude = vec![0.5; 512];
        amplitude[3 * 32 + 5] = f64::NAN;
        let field = ComplexField::from_parts(32, 16, amplitude, vec![0.0; 512]).unwrap();
        match HologramEncoder::DEFAULT.encode(&field, &grid(), &Carrier::DEFAULT) {
            Err(HologramError::Numeric { stage, row, col, .. }) => {
                assert_eq!(stage, Stage::Encoder);
                assert_eq!((row, col), (3, 5));
            }
            other => panic!("expected NumericError, got {other:?}"),
        }

        let field =
            ComplexField::from_parts(32, 16, vec![0.5; 512], vec![f64::INFINITY; 512]).unwrap();
        let err = HologramEncoder::DEFAULT
            .encode(&field, &grid(), &Carrier::DEFAULT)
            .unwrap_err();
        assert_eq!(err.kind(), "NumericError");
    }

    #[test]
    fn test_rejects_bad_carrier_and_shape() {
        let field = uniform_field(0.5, 0.0);
        let bad = Carrier {
            period: 0.0,
            angle: 0.0,
        };
        assert_eq!(
            HologramEncoder::DEFAULT
                .encode(&field, &grid(), &bad)
                .unwrap_err()
                .kind(),
            "InvalidParameter"
        );

        let other_grid = SamplingGrid::new(16, 16, 0.01).unwrap();
        assert!(HologramEncoder::DEFAULT
            .encode(&field, &other_grid, &Carrier::DEFAULT)
            .is_err());
    }

    #[test]
    fn test_phase_hologram_from_values() {
        let holo = PhaseHologram::from_values(2, 1, vec![0.5, PI]).unwrap();
        assert_eq!(holo.get(0, 0), Some(0.5));
        assert_eq!(holo.get(0, 1), Some(-PI));
        assert!(PhaseHologram::from_values(2, 1, vec![0.5]).is_err());
        assert!(PhaseHologram::from_values(2, 1, vec![0.5, f64::NAN]).is_err());
    }

    #[test]
    fn test_encoder_json() {
        let encoder: HologramEncoder =
            serde_json::from_str(r#"{"scheme": "sinc"}"#).unwrap();
        assert_eq!(encoder, HologramEncoder::SINC);
        let encoder: HologramEncoder = serde_json::from_str("{}").unwrap();
        assert_eq!(encoder, HologramEncoder::DEFAULT);
    }
}
