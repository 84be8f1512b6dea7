//! Thorlabs EXULUS phase-only SLM specifications

use crate::{phase_response::THORLABS_780NM, Manufacturer, Modulation, SlmSpec};

/// Thorlabs EXULUS-HD1 (1920×1080, 6.4 µm)
///
/// Visible-range model.
pub const THORLABS_EXULUS_HD1: SlmSpec = SlmSpec {
    id: "exulus-hd1",
    name: "Thorlabs EXULUS-HD1",
    width: 1920,
    height: 1080,
    pixel_pitch_um: 6.4,
    manufacturer: Manufacturer::Thorlabs,
    modulation: Modulation::ReflectiveLcos,
    bit_depth: 8,
    fill_factor: 0.93,
    refresh_hz: 60,
    wavelength_min_nm: 400,
    wavelength_max_nm: 700,
    phase_response: None,
};

/// Thorlabs EXULUS-HD2 (1920×1200, 8.0 µm)
///
/// Near-infrared model.
/// - Calibrated at 780 nm
pub const THORLABS_EXULUS_HD2: SlmSpec = SlmSpec {
    id: "exulus-hd2",
    name: "Thorlabs EXULUS-HD2",
    width: 1920,
    height: 1200,
    pixel_pitch_um: 8.0,
    manufacturer: Manufacturer::Thorlabs,
    modulation: Modulation::ReflectiveLcos,
    bit_depth: 8,
    fill_factor: 0.95,
    refresh_hz: 60,
    wavelength_min_nm: 700,
    wavelength_max_nm: 1100,
    phase_response: Some(&THORLABS_780NM),
};
