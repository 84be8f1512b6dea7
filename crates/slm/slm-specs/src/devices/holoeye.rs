//! HOLOEYE phase-only SLM specifications
//!
//! PLUTO, LETO and GAEA families. All are reflective LCOS panels driven over
//! an 8-bit DVI/HDMI video input.

use crate::{phase_response::PLUTO_405NM, Manufacturer, Modulation, SlmSpec};

/// HOLOEYE PLUTO-2.1 UV-099 (1920×1080, 8.0 µm)
///
/// The UV coating of the PLUTO-2.1 backplane.
/// - Wavelength: 380–420 nm
/// - Calibrated at 405 nm
pub const HOLOEYE_PLUTO_2_1_UV: SlmSpec = SlmSpec {
    id: "pluto-2.1-uv",
    name: "Holoeye PLUTO-2.1 UV-099",
    width: 1920,
    height: 1080,
    pixel_pitch_um: 8.0,
    manufacturer: Manufacturer::Holoeye,
    modulation: Modulation::ReflectiveLcos,
    bit_depth: 8,
    fill_factor: 0.93,
    refresh_hz: 60,
    wavelength_min_nm: 380,
    wavelength_max_nm: 420,
    phase_response: Some(&PLUTO_405NM),
};

/// HOLOEYE PLUTO-2.1 NIR-011 (1920×1080, 8.0 µm)
///
/// Broadband visible/NIR coating. No measured response shipped.
pub const HOLOEYE_PLUTO_2_1_NIR: SlmSpec = SlmSpec {
    id: "pluto-2.1-nir",
    name: "Holoeye PLUTO-2.1 NIR-011",
    width: 1920,
    height: 1080,
    pixel_pitch_um: 8.0,
    manufacturer: Manufacturer::Holoeye,
    modulation: Modulation::ReflectiveLcos,
    bit_depth: 8,
    fill_factor: 0.93,
    refresh_hz: 60,
    wavelength_min_nm: 420,
    wavelength_max_nm: 1100,
    phase_response: None,
};

/// HOLOEYE LETO-3 (1920×1080, 6.4 µm)
pub const HOLOEYE_LETO_3: SlmSpec = SlmSpec {
    id: "leto-3",
    name: "Holoeye LETO-3",
    width: 1920,
    height: 1080,
    pixel_pitch_um: 6.4,
    manufacturer: Manufacturer::Holoeye,
    modulation: Modulation::ReflectiveLcos,
    bit_depth: 8,
    fill_factor: 0.93,
    refresh_hz: 60,
    wavelength_min_nm: 420,
    wavelength_max_nm: 1100,
    phase_response: None,
};

/// HOLOEYE GAEA-2 (4160×2464, 3.74 µm)
///
/// 10-megapixel panel; the video input is still 8-bit per pixel.
pub const HOLOEYE_GAEA_2: SlmSpec = SlmSpec {
    id: "gaea-2",
    name: "Holoeye GAEA-2",
    width: 4160,
    height: 2464,
    pixel_pitch_um: 3.74,
    manufacturer: Manufacturer::Holoeye,
    modulation: Modulation::ReflectiveLcos,
    bit_depth: 8,
    fill_factor: 0.90,
    refresh_hz: 60,
    wavelength_min_nm: 420,
    wavelength_max_nm: 1100,
    phase_response: None,
};
