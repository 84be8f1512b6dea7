//! Renderer configuration

use crate::encoder::HologramEncoder;
use crate::error::{ensure_positive, Result};
use serde::{Deserialize, Serialize};

/// Settings shared by every render of a [`Renderer`](crate::Renderer)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RendererConfig {
    /// Pixel pitch in millimetres for screens that do not carry their own
    #[serde(default = "default_pitch")]
    pub pixel_pitch_mm: f64,
    /// Encoder used when a request does not name one
    #[serde(default)]
    pub encoder: HologramEncoder,
}

fn default_pitch() -> f64 {
    RendererConfig::DEFAULT.pixel_pitch_mm
}

impl RendererConfig {
    /// Default configuration: 8 µm pitch, Bessel encoding with clamping
    pub const DEFAULT: Self = Self {
        pixel_pitch_mm: 0.008,
        encoder: HologramEncoder::DEFAULT,
    };

    /// 8 µm pitch with the sinc encoding
    pub const SINC: Self = Self {
        pixel_pitch_mm: 0.008,
        encoder: HologramEncoder::SINC,
    };

    /// Load from JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Reject a non-positive or non-finite pitch
    pub fn validate(&self) -> Result<()> {
        ensure_positive("pixel_pitch_mm", self.pixel_pitch_mm)
    }
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}
