//! Calibration Mapper
//!
//! A liquid-crystal SLM does not retard phase linearly with drive level. A
//! [`CalibrationTable`] records measured `(phase, gray)` pairs for one device
//! and wavelength; [`CalibrationTable::map`] turns a wrapped phase hologram
//! into the 8-bit drive levels that reproduce it.
//!
//! # Example
//!
//! ```
//! use slm_hologram::{CalibrationPoint, CalibrationTable, PhaseHologram};
//! use std::f64::consts::PI;
//!
//! let table = CalibrationTable::new(vec![
//!     CalibrationPoint { phase: -PI, gray: 10 },
//!     CalibrationPoint { phase: 0.0, gray: 90 },
//!     CalibrationPoint { phase: PI, gray: 210 },
//! ])
//! .unwrap();
//!
//! assert_eq!(table.gray_level(0.0), 90);
//! assert_eq!(table.gray_level(PI / 2.0), 150);
//!
//! let hologram = PhaseHologram::from_values(2, 1, vec![-PI, 0.0]).unwrap();
//! assert_eq!(table.map(&hologram).as_slice(), &[10, 90]);
//! ```

use crate::buffer::ScreenBuffer;
use crate::encoder::PhaseHologram;
use crate::interp::interpolate_clamped;
use core::f64::consts::PI;
use serde::{Deserialize, Serialize};
use slm_specs::PhaseResponse;
use thiserror::Error;
use tracing::warn;

/// Calibration table format version written by [`CalibrationTable::to_json`]
pub const FORMAT_VERSION: u8 = 1;

/// Phase slack when checking that a table spans the wrapped range
const COVERAGE_TOLERANCE: f64 = 1e-9;

/// One measured `(phase, gray)` pair
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CalibrationPoint {
    /// Phase retardation in radians
    pub phase: f64,
    /// Drive level that produces it
    pub gray: u8,
}

/// Monotonic phase → gray lookup for one device
///
/// Phases strictly increase and gray levels never decrease. Tables are
/// validated on construction and never repaired.
#[derive(Debug, Clone, PartialEq)]
pub struct CalibrationTable {
    phases: Vec<f64>,
    levels: Vec<f64>,
    grays: Vec<u8>,
}

impl CalibrationTable {
    /// Validate and build a table
    pub fn new(points: Vec<CalibrationPoint>) -> Result<Self, CalibrationError> {
        if points.is_empty() {
            return Err(CalibrationError::Empty);
        }

        let mut previous: Option<CalibrationPoint> = None;
        for (index, point) in points.iter().enumerate() {
            if !point.phase.is_finite() {
                return Err(CalibrationError::NonFinitePhase {
                    index,
                    phase: point.phase,
                });
            }
            if let Some(prev) = previous {
                if point.phase <= prev.phase {
                    return Err(CalibrationError::PhaseNotIncreasing {
                        index,
                        phase: point.phase,
                        previous: prev.phase,
                    });
                }
                if point.gray < prev.gray {
                    return Err(CalibrationError::GrayDecreasing {
                        index,
                        gray: point.gray,
                        previous: prev.gray,
                    });
                }
            }
            previous = Some(*point);
        }

        Ok(Self {
            phases: points.iter().map(|p| p.phase).collect(),
            levels: points.iter().map(|p| f64::from(p.gray)).collect(),
            grays: points.iter().map(|p| p.gray).collect(),
        })
    }

    /// Build from `(phase, gray)` tuples
    pub fn from_pairs<I>(pairs: I) -> Result<Self, CalibrationError>
    where
        I: IntoIterator<Item = (f64, u8)>,
    {
        Self::new(
            pairs
                .into_iter()
                .map(|(phase, gray)| CalibrationPoint { phase, gray })
                .collect(),
        )
    }

    /// Ideal linear device: −π → 0, π → 255
    pub fn linear() -> Self {
        Self {
            phases: vec![-PI, PI],
            levels: vec![0.0, 255.0],
            grays: vec![0, 255],
        }
    }

    /// Sample a measured response at `samples` phases evenly spread over `[-π, π]`
    pub fn from_response(
        response: &PhaseResponse,
        samples: usize,
    ) -> Result<Self, CalibrationError> {
        if samples < 2 {
            return Err(CalibrationError::TooFewSamples(samples));
        }
        let last = samples - 1;
        let points = (0..samples)
            .map(|i| {
                let phase = if i == last {
                    PI
                } else {
                    -PI + 2.0 * PI * sample_fraction(i, last)
                };
                CalibrationPoint {
                    phase,
                    gray: round_level(response.drive_level(phase)),
                }
            })
            .collect();
        Self::new(points)
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.phases.len()
    }

    /// Always false; empty tables are rejected
    pub fn is_empty(&self) -> bool {
        self.phases.is_empty()
    }

    /// Iterate the entries in phase order
    pub fn points(&self) -> impl Iterator<Item = CalibrationPoint> + '_ {
        self.phases
            .iter()
            .zip(&self.grays)
            .map(|(&phase, &gray)| CalibrationPoint { phase, gray })
    }

    /// Lowest and highest calibrated phase
    pub fn domain(&self) -> (f64, f64) {
        (
            self.phases.first().copied().unwrap_or(0.0),
            self.phases.last().copied().unwrap_or(0.0),
        )
    }

    /// True when the table spans the whole wrapped range `[-π, π]`
    ///
    /// Logs a warning otherwise; phases outside the domain clamp to the
    /// nearest endpoint.
    pub fn covers_wrap_range(&self) -> bool {
        let (low, high) = self.domain();
        let covered = low <= -PI + COVERAGE_TOLERANCE && high >= PI - COVERAGE_TOLERANCE;
        if !covered {
            warn!(
                low,
                high, "calibration table does not span [-π, π]; edge phases will clamp"
            );
        }
        covered
    }

    /// Drive level for one phase
    ///
    /// Linear interpolation between the bracketing entries, rounded to the
    /// nearest level. Phases beyond the table clamp to its endpoints.
    pub fn gray_level(&self, phase: f64) -> u8 {
        round_level(interpolate_clamped(&self.phases, &self.levels, phase))
    }

    /// Map every pixel of a hologram to a drive level
    pub fn map(&self, hologram: &PhaseHologram) -> ScreenBuffer {
        let pixels = hologram
            .values()
            .iter()
            .map(|&phase| self.gray_level(phase))
            .collect();
        ScreenBuffer::from_parts(hologram.width(), hologram.height(), pixels)
    }
}

// SAFETY: the value is clamped to 0.0..=255.0 and rounded first, so the cast
// is exact.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn round_level(level: f64) -> u8 {
    if level.is_nan() {
        return 0;
    }
    level.round().clamp(0.0, 255.0) as u8
}

// SAFETY: sample counts are far below 2^53, so both convert exactly.
#[allow(clippy::cast_precision_loss)]
fn sample_fraction(index: usize, total: usize) -> f64 {
    index as f64 / total as f64
}

/// Calibration table loading/validation errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CalibrationError {
    /// No entries
    #[error("calibration table is empty")]
    Empty,

    /// A phase is NaN or infinite
    #[error("entry {index} has non-finite phase {phase}")]
    NonFinitePhase {
        /// Entry index
        index: usize,
        /// Offending phase
        phase: f64,
    },

    /// Phases must strictly increase
    #[error("phase must strictly increase: entry {index} ({phase}) follows {previous}")]
    PhaseNotIncreasing {
        /// Entry index
        index: usize,
        /// Offending phase
        phase: f64,
        /// Phase of the entry before it
        previous: f64,
    },

    /// Gray levels must not decrease
    #[error("gray level decreases at entry {index}: {gray} after {previous}")]
    GrayDecreasing {
        /// Entry index
        index: usize,
        /// Offending level
        gray: u8,
        /// Level of the entry before it
        previous: u8,
    },

    /// A sampled table needs at least two points
    #[error("need at least 2 samples, got {0}")]
    TooFewSamples(usize),

    /// JSON version this build cannot read
    #[error("unsupported calibration format version {0}")]
    UnsupportedVersion(u8),

    /// Malformed JSON or text
    #[error("parse error: {0}")]
    Parse(String),
}

#[derive(Debug, Deserialize, Serialize)]
struct JsonCalibration {
    version: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    points: Vec<CalibrationPoint>,
}

impl CalibrationTable {
    /// Load from JSON
    ///
    /// # Example JSON
    /// ```json
    /// {
    ///   "version": 1,
    ///   "name": "bench SLM @ 633nm",
    ///   "points": [
    ///     {"phase": -3.14159, "gray": 0},
    ///     {"phase": 3.14159, "gray": 255}
    ///   ]
    /// }
    /// ```
    pub fn from_json(json: &str) -> Result<Self, CalibrationError> {
        let parsed: JsonCalibration =
            serde_json::from_str(json).map_err(|e| CalibrationError::Parse(e.to_string()))?;

        if parsed.version != FORMAT_VERSION {
            return Err(CalibrationError::UnsupportedVersion(parsed.version));
        }

        Self::new(parsed.points)
    }

    /// Convert to JSON
    pub fn to_json(&self) -> Result<String, CalibrationError> {
        let json = JsonCalibration {
            version: FORMAT_VERSION,
            name: None,
            points: self.points().collect(),
        };
        serde_json::to_string_pretty(&json).map_err(|e| CalibrationError::Parse(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use slm_specs::{PLUTO_405NM, THORLABS_780NM};

    fn three_point() -> CalibrationTable {
        CalibrationTable::from_pairs([(-PI, 10), (0.0, 90), (PI, 210)]).unwrap()
    }

    #[test]
    fn test_exact_entries() {
        let table = three_point();
        assert_eq!(table.gray_level(-PI), 10);
        assert_eq!(table.gray_level(0.0), 90);
        assert_eq!(table.gray_level(PI), 210);
    }

    #[test]
    fn test_interpolates_and_rounds() {
        let table = CalibrationTable::from_pairs([(0.0, 0), (1.0, 3)]).unwrap();
        // 0.5 → 1.5 rounds away from zero
        assert_eq!(table.gray_level(0.5), 2);
        assert_eq!(table.gray_level(0.4), 1);
        assert_eq!(table.gray_level(0.1), 0);
    }

    #[test]
    fn test_clamps_outside_domain() {
        let table = CalibrationTable::from_pairs([(-1.0, 40), (1.0, 60)]).unwrap();
        assert_eq!(table.gray_level(-3.0), 40);
        assert_eq!(table.gray_level(3.0), 60);
        assert!(!table.covers_wrap_range());
    }

    #[test]
    fn test_linear_table() {
        let table = CalibrationTable::linear();
        assert_eq!(table.gray_level(-PI), 0);
        assert_eq!(table.gray_level(0.0), 128);
        assert_eq!(table.gray_level(PI), 255);
        assert!(table.covers_wrap_range());
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_single_entry_table_is_constant() {
        let table = CalibrationTable::from_pairs([(0.0, 77)]).unwrap();
        assert_eq!(table.gray_level(-PI), 77);
        assert_eq!(table.gray_level(2.0), 77);
    }

    #[test]
    fn test_rejects_malformed_tables() {
        assert_eq!(CalibrationTable::new(vec![]), Err(CalibrationError::Empty));
        assert!(matches!(
            CalibrationTable::from_pairs([(0.0, 1), (f64::NAN, 2)]),
            Err(CalibrationError::NonFinitePhase { index: 1, .. })
        ));
        assert!(matches!(
            CalibrationTable::from_pairs([(0.0, 1), (0.0, 2)]),
            Err(CalibrationError::PhaseNotIncreasing { index: 1, .. })
        ));
        assert!(matches!(
            CalibrationTable::from_pairs([(0.0, 5), (1.0, 4)]),
            Err(CalibrationError::GrayDecreasing {
                index: 1,
                gray: 4,
                previous: 5
            })
        ));
    }

    #[test]
    fn test_flat_gray_segments_allowed() {
        let table = CalibrationTable::from_pairs([(0.0, 5), (1.0, 5), (2.0, 9)]).unwrap();
        assert_eq!(table.gray_level(0.5), 5);
    }

    #[test]
    fn test_from_measured_responses() {
        let thorlabs = CalibrationTable::from_response(&THORLABS_780NM, 256).unwrap();
        assert_eq!(thorlabs.len(), 256);
        assert!(thorlabs.covers_wrap_range());
        assert_eq!(thorlabs.gray_level(-PI), 4);
        assert_eq!(thorlabs.gray_level(0.0), 123);
        assert_eq!(thorlabs.gray_level(PI), 182);

        let pluto = CalibrationTable::from_response(&PLUTO_405NM, 256).unwrap();
        assert_eq!(pluto.gray_level(-PI), 0);
        assert_eq!(pluto.gray_level(PI), 86);

        assert_eq!(
            CalibrationTable::from_response(&THORLABS_780NM, 1),
            Err(CalibrationError::TooFewSamples(1))
        );
    }

    #[test]
    fn test_map_preserves_shape() {
        let hologram =
            PhaseHologram::from_values(3, 2, vec![-PI, 0.0, 1.0, -1.0, 2.0, 3.0]).unwrap();
        let buffer = three_point().map(&hologram);
        assert_eq!(buffer.dimensions(), (3, 2));
        assert_eq!(buffer.get_pixel(0, 0), Some(10));
        assert_eq!(buffer.get_pixel(1, 0), Some(90));
    }

    #[test]
    fn test_json_parsing_valid() {
        let json = r#"{
            "version": 1,
            "name": "bench",
            "points": [
                {"phase": -3.0, "gray": 0},
                {"phase": 3.0, "gray": 200}
            ]
        }"#;
        let table = CalibrationTable::from_json(json).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.gray_level(0.0), 100);
    }

    #[test]
    fn test_json_parsing_invalid_version() {
        let json = r#"{"version": 2, "points": [{"phase": 0.0, "gray": 0}]}"#;
        assert_eq!(
            CalibrationTable::from_json(json),
            Err(CalibrationError::UnsupportedVersion(2))
        );
    }

    #[test]
    fn test_json_rejects_unsorted_points() {
        let json = r#"{"version": 1, "points": [
            {"phase": 1.0, "gray": 0},
            {"phase": 0.0, "gray": 10}
        ]}"#;
        assert!(matches!(
            CalibrationTable::from_json(json),
            Err(CalibrationError::PhaseNotIncreasing { .. })
        ));
        assert!(matches!(
            CalibrationTable::from_json("not json"),
            Err(CalibrationError::Parse(_))
        ));
    }

    #[test]
    fn test_json_roundtrip() {
        let table = CalibrationTable::from_response(&THORLABS_780NM, 32).unwrap();
        let json = table.to_json().unwrap();
        let back = CalibrationTable::from_json(&json).unwrap();
        assert_eq!(back.len(), table.len());
        for (a, b) in back.points().zip(table.points()) {
            assert_eq!(a.gray, b.gray);
            assert!((a.phase - b.phase).abs() < 1e-12);
        }
    }
}
