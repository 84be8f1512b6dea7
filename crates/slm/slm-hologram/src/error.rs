//! Error types for the hologram pipeline.
//!
//! Every failure is raised before a [`ScreenBuffer`](crate::ScreenBuffer) is
//! produced, so a caller never sees a partially rendered frame.

use crate::calibration::CalibrationError;
use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = core::result::Result<T, HologramError>;

/// Pipeline stage that produced a non-finite value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Field Generator (closed-form beam evaluation)
    Field,
    /// Hologram Encoder (amplitude/phase input)
    Encoder,
}

impl Stage {
    /// Short lowercase name used in error messages.
    pub fn as_str(self) -> &'static str {
        match self {
            Stage::Field => "field generator",
            Stage::Encoder => "hologram encoder",
        }
    }
}

impl core::fmt::Display for Stage {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors surfaced by the hologram pipeline.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum HologramError {
    /// Malformed or out-of-domain mode, grid, or screen parameter.
    #[error("invalid parameter `{parameter}`: {reason}")]
    InvalidParameter {
        /// Name of the offending parameter.
        parameter: &'static str,
        /// What is wrong with it.
        reason: String,
    },

    /// A non-finite value appeared at a pixel.
    #[error("non-finite value {value} in {stage} at pixel (row {row}, col {col})")]
    Numeric {
        /// Stage that detected the value.
        stage: Stage,
        /// Pixel row.
        row: usize,
        /// Pixel column.
        col: usize,
        /// The offending value.
        value: f64,
    },

    /// The calibration table is malformed.
    #[error("calibration table rejected: {0}")]
    Configuration(#[from] CalibrationError),

    /// Buffer and screen sizes disagree.
    #[error(
        "screen `{screen}` is {expected_width}×{expected_height} \
         but the buffer is {actual_width}×{actual_height}"
    )]
    ResolutionMismatch {
        /// Target screen id.
        screen: String,
        /// Native screen width.
        expected_width: u32,
        /// Native screen height.
        expected_height: u32,
        /// Buffer width.
        actual_width: u32,
        /// Buffer height.
        actual_height: u32,
    },
}

impl HologramError {
    /// Shorthand for [`HologramError::InvalidParameter`].
    pub fn invalid(parameter: &'static str, reason: impl Into<String>) -> Self {
        HologramError::InvalidParameter {
            parameter,
            reason: reason.into(),
        }
    }

    /// Stable kind name, for logs and tooling.
    pub fn kind(&self) -> &'static str {
        match self {
            HologramError::InvalidParameter { .. } => "InvalidParameter",
            HologramError::Numeric { .. } => "NumericError",
            HologramError::Configuration(_) => "ConfigurationError",
            HologramError::ResolutionMismatch { .. } => "ResolutionMismatch",
        }
    }
}

/// Fail with [`HologramError::InvalidParameter`] unless `value` is finite.
pub(crate) fn ensure_finite(parameter: &'static str, value: f64) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(HologramError::invalid(
            parameter,
            format!("must be finite, got {value}"),
        ))
    }
}

/// Fail with [`HologramError::InvalidParameter`] unless `value` is finite and > 0.
pub(crate) fn ensure_positive(parameter: &'static str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(HologramError::invalid(
            parameter,
            format!("must be positive and finite, got {value}"),
        ))
    }
}
