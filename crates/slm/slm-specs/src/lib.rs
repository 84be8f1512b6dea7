//! Spatial Light Modulator Specifications
//!
//! Static specifications for phase-only SLMs: native resolution, pixel pitch,
//! drive depth, usable wavelength range, and the measured phase response a
//! device needs for grayscale calibration.
//!
//! # Features
//!
//! - **no_std compatible** - Pure data and `libm` math
//! - **Device templates** - Pre-configured specs for Holoeye, Thorlabs, Meadowlark and Hamamatsu panels
//! - **Serde support** - Optional serialization/deserialization for TOML/JSON configs
//! - **Phase responses** - Measured drive-level polynomials for calibrated devices
//!
//! # Example
//!
//! ```
//! use slm_specs::devices::HOLOEYE_PLUTO_2_1_UV;
//!
//! let spec = HOLOEYE_PLUTO_2_1_UV;
//! println!("Device: {}", spec.name);
//! println!("Resolution: {}×{}", spec.width, spec.height);
//! println!("Active area: {:.2} × {:.2} mm", spec.active_area_mm().0, spec.active_area_mm().1);
//! assert!(spec.supports_wavelength(405));
//! assert!(spec.phase_response.is_some());
//! ```
//!
//! # Custom Device Specs
//!
//! ```
//! use slm_specs::{Manufacturer, Modulation, SlmSpec};
//!
//! const BENCH_SLM: SlmSpec = SlmSpec {
//!     id: "bench",
//!     name: "Bench SLM",
//!     width: 1024,
//!     height: 768,
//!     pixel_pitch_um: 9.0,
//!     manufacturer: Manufacturer::Generic,
//!     modulation: Modulation::ReflectiveLcos,
//!     bit_depth: 8,
//!     fill_factor: 0.9,
//!     refresh_hz: 60,
//!     wavelength_min_nm: 400,
//!     wavelength_max_nm: 1100,
//!     phase_response: None,
//! };
//! assert_eq!(BENCH_SLM.pixel_count(), 1024 * 768);
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

pub mod devices;
pub mod phase_response;
mod slm_spec;

pub use phase_response::{PhaseResponse, PLUTO_405NM, THORLABS_780NM};
pub use slm_spec::{Manufacturer, Modulation, SlmSpec};
