//! Measured phase responses per device
//!
//! A liquid-crystal SLM does not retard phase linearly with drive level. Each
//! response here is a polynomial fitted to a bench measurement: evaluated at
//! the normalized phase `t = φ/π ∈ [-1, 1]` it returns the drive level (0–255)
//! that physically produces φ at the stated wavelength.
//!
//! # Sources
//!
//! - Thorlabs EXULUS at 780 nm: cubic fit from an interferometric sweep
//! - Holoeye PLUTO-2.1 at 405 nm: sixth-order fit from a diffraction-efficiency sweep

use core::f64::consts::PI;

/// Drive-level response of a calibrated device
#[derive(Debug, Clone, PartialEq)]
pub struct PhaseResponse {
    /// Human-readable name (e.g., "Thorlabs 780nm")
    pub name: &'static str,

    /// Wavelength the fit was measured at, in nanometres
    pub wavelength_nm: u16,

    /// Polynomial coefficients in drive units, lowest order first
    pub coefficients: &'static [f64],
}

impl PhaseResponse {
    /// Highest drive level a response may return
    pub const MAX_LEVEL: f64 = 255.0;

    /// Drive level (0.0–255.0) for a phase in radians
    ///
    /// Phases outside `[-π, π]` are clamped to the fitted domain. The fit is
    /// rectified (`|p(t)|`) because the measured curves touch zero at `t = -1`
    /// and rounding noise must not produce negative drive levels.
    pub fn drive_level(&self, phase: f64) -> f64 {
        let t = (phase / PI).clamp(-1.0, 1.0);
        let value = self
            .coefficients
            .iter()
            .rev()
            .fold(0.0, |acc, &c| acc * t + c);
        libm::fabs(value).min(Self::MAX_LEVEL)
    }

    /// Polynomial order of the fit
    pub fn order(&self) -> usize {
        self.coefficients.len().saturating_sub(1)
    }
}

/// Thorlabs EXULUS response at 780 nm
pub const THORLABS_780NM: PhaseResponse = PhaseResponse {
    name: "Thorlabs 780nm",
    wavelength_nm: 780,
    coefficients: &[123.0, 69.5, -29.8, 19.5],
};

/// Holoeye PLUTO-2.1 response at 405 nm
pub const PLUTO_405NM: PhaseResponse = PhaseResponse {
    name: "Pluto 405nm",
    wavelength_nm: 405,
    coefficients: &[33.1, 51.7, -2.57, -14.3, 16.7, 5.81, -4.02],
};

/// Every measured response shipped with this crate
pub const ALL_RESPONSES: &[&PhaseResponse] = &[&THORLABS_780NM, &PLUTO_405NM];

/// Find the response measured closest to `wavelength_nm`, within `tolerance_nm`
pub fn response_for_wavelength(
    wavelength_nm: u16,
    tolerance_nm: u16,
) -> Option<&'static PhaseResponse> {
    ALL_RESPONSES
        .iter()
        .copied()
        .filter(|r| r.wavelength_nm.abs_diff(wavelength_nm) <= tolerance_nm)
        .min_by_key(|r| r.wavelength_nm.abs_diff(wavelength_nm))
}
