//! Mode parameters: which field to synthesize and where
//!
//! All lengths share the unit of the sampling grid (millimetres throughout
//! this crate's docs and tests).

use crate::error::{ensure_finite, ensure_positive, Result};
use crate::field::{
    FieldMode, Gradient, HermiteGaussian, LaguerreGaussian, Noise, ZeroField,
};
use serde::{Deserialize, Serialize};

/// Complete description of one hologram frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModeParameters {
    /// Beam family and its own parameters
    pub family: BeamFamily,
    /// Beam centre offset from the grid origin
    #[serde(default)]
    pub displacement: Displacement,
    /// Carrier grating that separates the encoded diffraction order
    #[serde(default)]
    pub carrier: Carrier,
    /// Propagation distance for the analytic beams (None = waist plane)
    #[serde(default)]
    pub propagation: Option<Propagation>,
}

impl ModeParameters {
    /// Parameters for `family` centred on the grid with the default carrier
    pub fn new(family: BeamFamily) -> Self {
        Self {
            family,
            displacement: Displacement::default(),
            carrier: Carrier::default(),
            propagation: None,
        }
    }

    /// Replace the displacement
    pub fn with_displacement(mut self, x: f64, y: f64) -> Self {
        self.displacement = Displacement { x, y };
        self
    }

    /// Replace the carrier grating
    pub fn with_carrier(mut self, period: f64, angle: f64) -> Self {
        self.carrier = Carrier { period, angle };
        self
    }

    /// Evaluate the beam at distance `distance` from its waist
    pub fn with_propagation(mut self, distance: f64, wavelength: f64) -> Self {
        self.propagation = Some(Propagation {
            distance,
            wavelength,
        });
        self
    }

    /// Check every parameter before any array work
    pub fn validate(&self) -> Result<()> {
        ensure_finite("displacement.x", self.displacement.x)?;
        ensure_finite("displacement.y", self.displacement.y)?;
        self.carrier.validate()?;
        if let Some(propagation) = &self.propagation {
            propagation.validate()?;
        }
        self.family.field_mode().validate()
    }

    /// Where the beam sits on the grid
    pub fn placement(&self) -> Placement {
        Placement {
            displacement: self.displacement,
            propagation: self.propagation,
        }
    }
}

/// Supported beam families
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BeamFamily {
    /// Laguerre-Gaussian beam LG(l, p)
    LaguerreGaussian(LaguerreGaussian),
    /// Hermite-Gaussian beam HG(m, n)
    HermiteGaussian(HermiteGaussian),
    /// Linear phase ramp with unit amplitude
    Gradient(Gradient),
    /// Random phase screen with unit amplitude
    Noise(Noise),
    /// Zero amplitude, zero phase
    Zero,
}

impl BeamFamily {
    /// The generator for this family
    pub fn field_mode(&self) -> &dyn FieldMode {
        match self {
            BeamFamily::LaguerreGaussian(mode) => mode,
            BeamFamily::HermiteGaussian(mode) => mode,
            BeamFamily::Gradient(mode) => mode,
            BeamFamily::Noise(mode) => mode,
            BeamFamily::Zero => &ZeroField,
        }
    }

    /// Short display name
    pub fn name(&self) -> &'static str {
        match self {
            BeamFamily::LaguerreGaussian(_) => "laguerre-gaussian",
            BeamFamily::HermiteGaussian(_) => "hermite-gaussian",
            BeamFamily::Gradient(_) => "gradient",
            BeamFamily::Noise(_) => "noise",
            BeamFamily::Zero => "zero",
        }
    }
}

/// Beam centre offset (X, Y)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Displacement {
    /// Horizontal offset
    pub x: f64,
    /// Vertical offset (positive is up)
    pub y: f64,
}

/// Carrier grating
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Carrier {
    /// Grating period Λ
    pub period: f64,
    /// Grating angle θ in radians, measured from the x axis
    pub angle: f64,
}

impl Carrier {
    /// Ten pixels at 8 µm pitch, horizontal fringes along x
    pub const DEFAULT: Self = Self {
        period: 0.08,
        angle: 0.0,
    };

    /// Carrier with a period given in pixels of a grid with pitch `pitch`
    pub fn from_pixels(period_px: f64, angle: f64, pitch: f64) -> Self {
        Self {
            period: period_px * pitch,
            angle,
        }
    }

    /// Spatial frequency components (kx, ky) in radians per unit length
    pub fn wave_vector(&self) -> (f64, f64) {
        let k = core::f64::consts::TAU / self.period;
        (k * self.angle.cos(), k * self.angle.sin())
    }

    /// Reject non-positive or non-finite period and non-finite angle
    pub fn validate(&self) -> Result<()> {
        ensure_positive("carrier.period", self.period)?;
        ensure_finite("carrier.angle", self.angle)
    }
}

impl Default for Carrier {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Propagation from the beam waist
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Propagation {
    /// Distance z from the waist (0 = waist plane)
    pub distance: f64,
    /// Wavelength λ
    pub wavelength: f64,
}

impl Propagation {
    /// Reject non-finite distance and non-positive wavelength
    pub fn validate(&self) -> Result<()> {
        ensure_finite("propagation.distance", self.distance)?;
        ensure_positive("propagation.wavelength", self.wavelength)
    }
}

/// Placement of a beam on the grid
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Placement {
    /// Beam centre
    pub displacement: Displacement,
    /// Optional propagation distance
    pub propagation: Option<Propagation>,
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::panic)]
    use super::*;
    use crate::field::NoiseDistribution;
    use crate::HologramError;

    fn lg(l: i32, p: i32, w0: f64) -> ModeParameters {
        ModeParameters::new(BeamFamily::LaguerreGaussian(LaguerreGaussian { l, p, w0 }))
    }

    fn assert_invalid(mode: &ModeParameters, parameter: &str) {
        match mode.validate() {
            Err(HologramError::InvalidParameter { parameter: p, .. }) => assert_eq!(p, parameter),
            other => panic!("expected InvalidParameter({parameter}), got {other:?}"),
        }
    }

    #[test]
    fn test_valid_modes_pass() {
        assert!(lg(1, 0, 1.0).validate().is_ok());
        assert!(lg(-3, 2, 0.5).validate().is_ok());
        assert!(ModeParameters::new(BeamFamily::Zero).validate().is_ok());
    }

    #[test]
    fn test_invalid_beam_parameters() {
        assert_invalid(&lg(1, -1, 1.0), "p");
        assert_invalid(&lg(1, 0, 0.0), "w0");
        assert_invalid(&lg(1, 0, f64::NAN), "w0");

        let hg = ModeParameters::new(BeamFamily::HermiteGaussian(HermiteGaussian {
            m: -1,
            n: 0,
            w0: 1.0,
        }));
        assert_invalid(&hg, "m");
    }

    #[test]
    fn test_invalid_placement_and_carrier() {
        assert_invalid(&lg(1, 0, 1.0).with_displacement(f64::INFINITY, 0.0), "displacement.x");
        assert_invalid(&lg(1, 0, 1.0).with_carrier(0.0, 0.0), "carrier.period");
        assert_invalid(&lg(1, 0, 1.0).with_carrier(-0.1, 0.0), "carrier.period");
        assert_invalid(&lg(1, 0, 1.0).with_carrier(0.1, f64::NAN), "carrier.angle");
        assert_invalid(&lg(1, 0, 1.0).with_propagation(10.0, 0.0), "propagation.wavelength");
    }

    #[test]
    fn test_invalid_noise_parameters() {
        let noise = ModeParameters::new(BeamFamily::Noise(Noise {
            seed: Some(1),
            distribution: NoiseDistribution::Normal {
                mean: 0.0,
                std_dev: -1.0,
            },
        }));
        assert_invalid(&noise, "std_dev");
    }

    #[test]
    fn test_carrier_wave_vector() {
        let carrier = Carrier {
            period: 0.5,
            angle: core::f64::consts::FRAC_PI_2,
        };
        let (kx, ky) = carrier.wave_vector();
        assert!(kx.abs() < 1e-12);
        assert!((ky - 4.0 * core::f64::consts::PI).abs() < 1e-12);

        let px = Carrier::from_pixels(8.0, 0.0, 0.008);
        assert!((px.period - 0.064).abs() < 1e-12);
    }

    #[test]
    fn test_mode_json_round_trip() {
        let json = r#"{
            "family": {"type": "laguerre_gaussian", "l": 2, "p": 1, "w0": 0.8},
            "displacement": {"x": 0.1, "y": -0.2},
            "carrier": {"period": 0.064, "angle": 0.5}
        }"#;
        let mode: ModeParameters = serde_json::from_str(json).unwrap();
        assert_eq!(mode.family.name(), "laguerre-gaussian");
        assert_eq!(mode.displacement, Displacement { x: 0.1, y: -0.2 });
        assert!(mode.propagation.is_none());

        let back: ModeParameters =
            serde_json::from_str(&serde_json::to_string(&mode).unwrap()).unwrap();
        assert_eq!(back, mode);
    }

    #[test]
    fn test_zero_mode_json_uses_defaults() {
        let mode: ModeParameters = serde_json::from_str(r#"{"family": {"type": "zero"}}"#).unwrap();
        assert_eq!(mode.family, BeamFamily::Zero);
        assert_eq!(mode.carrier, Carrier::DEFAULT);
    }
}
