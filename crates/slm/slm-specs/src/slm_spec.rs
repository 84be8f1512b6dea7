//! SLM specification types
//!
//! Defines the physical characteristics of a phase-only modulator that the
//! hologram pipeline needs: the exact native resolution (buffers are never
//! resampled), the pixel pitch that sets the sampling grid, and the measured
//! phase response used for calibration.

use crate::phase_response::PhaseResponse;

/// Complete specification of a spatial light modulator
///
/// Contains everything the renderer needs to size and sample a hologram:
/// - Native resolution and pixel pitch
/// - Drive depth and refresh rate
/// - Usable wavelength range
/// - Measured phase response (optional)
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct SlmSpec {
    /// Short identifier used on the command line (e.g., "pluto-2.1-uv")
    pub id: &'static str,

    /// Device name (e.g., "Holoeye PLUTO-2.1 UV-099")
    pub name: &'static str,

    /// Width in pixels
    pub width: u32,

    /// Height in pixels
    pub height: u32,

    /// Pixel pitch in micrometres
    pub pixel_pitch_um: f32,

    /// Device manufacturer
    pub manufacturer: Manufacturer,

    /// Modulator technology
    pub modulation: Modulation,

    /// Bits per pixel on the video input (8 → 256 drive levels)
    pub bit_depth: u8,

    /// Fraction of the pixel area that modulates light (0.0-1.0)
    pub fill_factor: f32,

    /// Frame rate of the video input in Hz
    pub refresh_hz: u16,

    /// Shortest usable wavelength in nanometres
    pub wavelength_min_nm: u16,

    /// Longest usable wavelength in nanometres
    pub wavelength_max_nm: u16,

    /// Measured drive-level response for this device (optional)
    ///
    /// Set to None for an uncalibrated device (the renderer falls back to a
    /// linear ramp).
    #[cfg_attr(feature = "serde", serde(skip))]
    pub phase_response: Option<&'static PhaseResponse>,
}

impl SlmSpec {
    /// Get aspect ratio (width / height)
    pub fn aspect_ratio(&self) -> f32 {
        self.width as f32 / self.height as f32
    }

    /// Total number of pixels
    pub fn pixel_count(&self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }

    /// Pixel pitch in millimetres
    ///
    /// The hologram pipeline works in millimetres, so this is the value a
    /// sampling grid for this device is built with.
    pub fn pixel_pitch_mm(&self) -> f64 {
        f64::from(self.pixel_pitch_um) / 1000.0
    }

    /// Active area (width, height) in millimetres
    pub fn active_area_mm(&self) -> (f64, f64) {
        let pitch = self.pixel_pitch_mm();
        (f64::from(self.width) * pitch, f64::from(self.height) * pitch)
    }

    /// Diagonal of the active area in inches
    pub fn diagonal_inches(&self) -> f64 {
        const MM_PER_INCH: f64 = 25.4;
        let (w, h) = self.active_area_mm();
        libm::sqrt(w * w + h * h) / MM_PER_INCH
    }

    /// Number of drive levels on the video input
    pub fn drive_levels(&self) -> u32 {
        1u32.checked_shl(u32::from(self.bit_depth)).unwrap_or(u32::MAX)
    }

    /// Check if a wavelength is inside the usable range
    pub fn supports_wavelength(&self, wavelength_nm: u16) -> bool {
        wavelength_nm >= self.wavelength_min_nm && wavelength_nm <= self.wavelength_max_nm
    }

    /// Check if this device ships with a measured phase response
    pub fn is_calibrated(&self) -> bool {
        self.phase_response.is_some()
    }
}

/// SLM manufacturers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum Manufacturer {
    /// HOLOEYE Photonics AG
    Holoeye,
    /// Thorlabs Inc. (EXULUS series)
    Thorlabs,
    /// Meadowlark Optics
    Meadowlark,
    /// Hamamatsu Photonics (LCOS-SLM X series)
    Hamamatsu,
    /// Generic/unknown manufacturer
    Generic,
}

/// Modulator technology
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum Modulation {
    /// Reflective liquid-crystal-on-silicon, phase-only
    ReflectiveLcos,
    /// Transmissive liquid-crystal panel, phase-only
    TransmissiveLc,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_spec() -> SlmSpec {
        SlmSpec {
            id: "test",
            name: "Test SLM",
            width: 1920,
            height: 1080,
            pixel_pitch_um: 8.0,
            manufacturer: Manufacturer::Generic,
            modulation: Modulation::ReflectiveLcos,
            bit_depth: 8,
            fill_factor: 0.93,
            refresh_hz: 60,
            wavelength_min_nm: 420,
            wavelength_max_nm: 1100,
            phase_response: None,
        }
    }

    #[test]
    fn test_aspect_ratio() {
        let spec = test_spec();
        assert!((spec.aspect_ratio() - 1.777).abs() < 0.01);
    }

    #[test]
    fn test_active_area() {
        let spec = test_spec();
        let (w, h) = spec.active_area_mm();
        assert!((w - 15.36).abs() < 1e-9);
        assert!((h - 8.64).abs() < 1e-9);
    }

    #[test]
    fn test_diagonal_inches() {
        let spec = test_spec();
        // sqrt(15.36² + 8.64²) = 17.62mm ≈ 0.69"
        let diagonal = spec.diagonal_inches();
        assert!(diagonal > 0.6 && diagonal < 0.8);
    }

    #[test]
    fn test_drive_levels() {
        let spec = test_spec();
        assert_eq!(spec.drive_levels(), 256);

        let deep = SlmSpec {
            bit_depth: 10,
            ..test_spec()
        };
        assert_eq!(deep.drive_levels(), 1024);
    }

    #[test]
    fn test_wavelength_range() {
        let spec = test_spec();
        assert!(spec.supports_wavelength(633));
        assert!(spec.supports_wavelength(420));
        assert!(spec.supports_wavelength(1100));
        assert!(!spec.supports_wavelength(405));
        assert!(!spec.supports_wavelength(1550));
    }

    #[test]
    fn test_pitch_in_millimetres() {
        let spec = test_spec();
        assert!((spec.pixel_pitch_mm() - 0.008).abs() < 1e-12);
        assert!(!spec.is_calibrated());
    }

    #[cfg(feature = "serde")]
    #[test]
    #[allow(clippy::unwrap_used)]
    fn test_serialize_skips_phase_response() {
        let json = serde_json::to_string(&test_spec()).unwrap();
        assert!(json.contains(r#""id":"test""#), "{json}");
        assert!(json.contains(r#""manufacturer":"Generic""#), "{json}");
        assert!(!json.contains("phase_response"), "{json}");
    }
}
