//! Hamamatsu LCOS-SLM specifications

use crate::{Manufacturer, Modulation, SlmSpec};

/// Hamamatsu X13138 (1272×1024, 12.5 µm)
pub const HAMAMATSU_X13138: SlmSpec = SlmSpec {
    id: "x13138",
    name: "Hamamatsu X13138",
    width: 1272,
    height: 1024,
    pixel_pitch_um: 12.5,
    manufacturer: Manufacturer::Hamamatsu,
    modulation: Modulation::ReflectiveLcos,
    bit_depth: 8,
    fill_factor: 0.96,
    refresh_hz: 60,
    wavelength_min_nm: 620,
    wavelength_max_nm: 1100,
    phase_response: None,
};
