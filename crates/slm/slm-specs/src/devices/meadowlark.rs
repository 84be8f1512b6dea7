//! Meadowlark Optics phase-only SLM specifications

use crate::{Manufacturer, Modulation, SlmSpec};

/// Meadowlark E-Series 1920×1152 (9.2 µm)
///
/// Driven here through its 8-bit video path.
pub const MEADOWLARK_E_SERIES_1920: SlmSpec = SlmSpec {
    id: "meadowlark-e1920",
    name: "Meadowlark E-Series 1920x1152",
    width: 1920,
    height: 1152,
    pixel_pitch_um: 9.2,
    manufacturer: Manufacturer::Meadowlark,
    modulation: Modulation::ReflectiveLcos,
    bit_depth: 8,
    fill_factor: 0.957,
    refresh_hz: 60,
    wavelength_min_nm: 400,
    wavelength_max_nm: 1650,
    phase_response: None,
};
