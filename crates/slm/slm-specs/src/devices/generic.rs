//! Generic screen-class specifications
//!
//! For SLMs that present themselves as an ordinary monitor and have no
//! template of their own.

use crate::{Manufacturer, Modulation, SlmSpec};

/// Generic 1080p phase-only panel (1920×1080, 8.0 µm)
pub const GENERIC_1080P: SlmSpec = SlmSpec {
    id: "generic-1080p",
    name: "Generic 1080p SLM",
    width: 1920,
    height: 1080,
    pixel_pitch_um: 8.0,
    manufacturer: Manufacturer::Generic,
    modulation: Modulation::ReflectiveLcos,
    bit_depth: 8,
    fill_factor: 0.9,
    refresh_hz: 60,
    wavelength_min_nm: 400,
    wavelength_max_nm: 1100,
    phase_response: None,
};

/// Generic XGA transmissive panel (1024×768, 36 µm)
///
/// Matches the repurposed projector panels used on teaching benches.
pub const GENERIC_XGA: SlmSpec = SlmSpec {
    id: "generic-xga",
    name: "Generic XGA SLM",
    width: 1024,
    height: 768,
    pixel_pitch_um: 36.0,
    manufacturer: Manufacturer::Generic,
    modulation: Modulation::TransmissiveLc,
    bit_depth: 8,
    fill_factor: 0.6,
    refresh_hz: 60,
    wavelength_min_nm: 400,
    wavelength_max_nm: 800,
    phase_response: None,
};
