//! Phase-Only Hologram Synthesis
//!
//! Turns an analytically defined complex field into the 8-bit drive levels of
//! a phase-only spatial light modulator, so that the field reconstructs in the
//! first diffraction order of a carrier grating.
//!
//! # Pipeline
//!
//! 1. **Field Generator** ([`generate_field`]) - Laguerre-Gaussian,
//!    Hermite-Gaussian, phase gradient, noise or zero field over a
//!    [`SamplingGrid`]
//! 2. **Hologram Encoder** ([`HologramEncoder`]) - amplitude via an inverted
//!    Bessel response, phase via the carrier, wrapped into `[-π, π)`
//! 3. **Calibration Mapper** ([`CalibrationTable`]) - phase to device gray level
//! 4. **Canvas Composer** ([`Canvas`]) - checks the buffer against its target
//!    screen and places it on the virtual desktop
//!
//! [`Renderer`] runs all four for a [`RenderRequest`] and caches grids per
//! screen.
//!
//! # Example
//!
//! ```
//! use slm_hologram::{
//!     BeamFamily, CalibrationTable, Canvas, LaguerreGaussian, ModeParameters, RenderRequest,
//!     Renderer, RendererConfig, Screen,
//! };
//! use slm_specs::devices::GENERIC_XGA;
//! use std::sync::Arc;
//!
//! let canvas = Canvas::new().with_screen(Screen::from_spec("slm", &GENERIC_XGA))?;
//! let mut renderer = Renderer::new(
//!     canvas,
//!     Arc::new(CalibrationTable::linear()),
//!     RendererConfig::DEFAULT,
//! )?;
//!
//! let vortex = ModeParameters::new(BeamFamily::LaguerreGaussian(LaguerreGaussian {
//!     l: 1,
//!     p: 0,
//!     w0: 4.0,
//! }))
//! .with_carrier(0.36, 0.0);
//!
//! let frame = renderer.render(&RenderRequest::new("slm", vortex))?;
//! assert_eq!(frame.buffer().dimensions(), (1024, 768));
//! # Ok::<(), slm_hologram::HologramError>(())
//! ```

pub mod bessel;
mod buffer;
pub mod calibration;
mod canvas;
mod config;
pub mod encoder;
mod error;
pub mod field;
mod grid;
mod interp;
pub mod mode;
pub mod phase;
mod pipeline;
pub mod polynomial;

pub use buffer::ScreenBuffer;
pub use calibration::{CalibrationError, CalibrationPoint, CalibrationTable};
pub use canvas::{Canvas, Screen, ScreenFrame, ScreenId};
pub use config::RendererConfig;
pub use encoder::{AmplitudeMapping, EncodingScheme, HologramEncoder, PhaseHologram};
pub use error::{HologramError, Result, Stage};
pub use field::{
    generate_field, ComplexField, FieldMode, Gradient, HermiteGaussian, LaguerreGaussian, Noise,
    NoiseDistribution, ZeroField,
};
pub use grid::{GridCache, SamplingGrid};
pub use mode::{BeamFamily, Carrier, Displacement, ModeParameters, Placement, Propagation};
pub use phase::{principal_phase, wrap_phase};
pub use pipeline::{render_buffer, RenderRequest, Renderer};
