//! SLM Render Testing Utilities
//!
//! Headless harness around [`Renderer`] for end-to-end tests: render a mode
//! onto a single test screen, then assert on drive levels, histograms and
//! field phase winding.
//!
//! # Quick start
//!
//! ```
//! use slm_hologram::{BeamFamily, ModeParameters};
//! use slm_testing::TestRenderer;
//!
//! let mut t = TestRenderer::new(64, 48).unwrap();
//! t.render(ModeParameters::new(BeamFamily::Zero)).unwrap();
//!
//! let level = t.table().gray_level(0.0);
//! t.assert_uniform(level).unwrap();
//! ```
//!
//! # Golden screenshot testing
//!
//! ```no_run
//! # use slm_testing::TestRenderer;
//! # let t = TestRenderer::new(64, 48).unwrap();
//! // First run: set UPDATE_GOLDEN=1 to create/update the reference file.
//! t.assert_matches_golden("tests/golden/vortex.png", 0).unwrap();
//! ```

#![warn(clippy::all)]
#![warn(clippy::dbg_macro)]
#![warn(clippy::print_stdout)]
#![allow(clippy::module_name_repetitions)]

use std::f64::consts::{PI, TAU};
use std::path::Path;
use std::sync::Arc;

pub use slm_hologram::{
    CalibrationTable, ComplexField, HologramEncoder, HologramError, ModeParameters, Renderer,
    ScreenBuffer,
};
use slm_hologram::{
    generate_field, principal_phase, Canvas, RenderRequest, RendererConfig, SamplingGrid, Screen,
    ScreenFrame, ScreenId,
};
use slm_specs::SlmSpec;

/// Id of the single screen a [`TestRenderer`] drives
pub const TEST_SCREEN: &str = "test-slm";

/// Samples per measured response when a device template carries one
const RESPONSE_SAMPLES: usize = 256;

// ─────────────────────────────────────────────────────────────────────────────
// TestRenderer
// ─────────────────────────────────────────────────────────────────────────────

/// Headless renderer for pipeline testing.
///
/// Wraps a [`Renderer`] with one screen and keeps the last rendered frame so
/// assertions can run against it.
#[derive(Debug)]
pub struct TestRenderer {
    inner: Renderer,
    screen: ScreenId,
    frame: Option<ScreenFrame>,
}

impl TestRenderer {
    /// Renderer for a `width × height` screen with the linear table and the
    /// default configuration
    pub fn new(width: u32, height: u32) -> Result<Self, HologramError> {
        Self::with_screen(
            Screen::new(TEST_SCREEN, width, height),
            CalibrationTable::linear(),
        )
    }

    /// Renderer sized to a device spec
    ///
    /// Uses the device's measured phase response when it has one, otherwise
    /// the linear table.
    pub fn with_spec(spec: &SlmSpec) -> Result<Self, HologramError> {
        let table = match spec.phase_response {
            Some(response) => CalibrationTable::from_response(response, RESPONSE_SAMPLES)?,
            None => CalibrationTable::linear(),
        };
        Self::with_screen(Screen::from_spec(TEST_SCREEN, spec), table)
    }

    fn with_screen(screen: Screen, table: CalibrationTable) -> Result<Self, HologramError> {
        let id = screen.id.clone();
        let canvas = Canvas::new().with_screen(screen)?;
        Ok(Self {
            inner: Renderer::new(canvas, Arc::new(table), RendererConfig::DEFAULT)?,
            screen: id,
            frame: None,
        })
    }

    /// Replace the calibration table
    pub fn with_table(mut self, table: CalibrationTable) -> Self {
        self.inner.set_table(Arc::new(table));
        self
    }

    /// Active calibration table
    pub fn table(&self) -> &CalibrationTable {
        self.inner.table()
    }

    /// Sampling grid of the test screen
    pub fn grid(&self) -> Result<SamplingGrid, HologramError> {
        let screen = self.inner.canvas().screen(&self.screen)?;
        let pitch = screen
            .pixel_pitch_mm
            .unwrap_or(self.inner.config().pixel_pitch_mm);
        SamplingGrid::new(screen.width, screen.height, pitch)
    }

    /// Generate `mode`'s field over the test screen's grid without encoding it
    pub fn field(&self, mode: &ModeParameters) -> Result<ComplexField, HologramError> {
        generate_field(mode, &self.grid()?)
    }

    // ── Rendering ────────────────────────────────────────────────────────────

    /// Render `mode` with the default encoder
    pub fn render(&mut self, mode: ModeParameters) -> Result<&ScreenBuffer, HologramError> {
        self.render_request(RenderRequest::new(self.screen.clone(), mode))
    }

    /// Render `mode` with `encoder`
    pub fn render_with(
        &mut self,
        mode: ModeParameters,
        encoder: HologramEncoder,
    ) -> Result<&ScreenBuffer, HologramError> {
        self.render_request(RenderRequest::new(self.screen.clone(), mode).with_encoder(encoder))
    }

    fn render_request(&mut self, request: RenderRequest) -> Result<&ScreenBuffer, HologramError> {
        let frame = self.inner.render(&request)?;
        Ok(self.frame.insert(frame).buffer())
    }

    /// Last rendered buffer
    pub fn buffer(&self) -> Option<&ScreenBuffer> {
        self.frame.as_ref().map(ScreenFrame::buffer)
    }

    fn rendered(&self) -> Result<&ScreenBuffer, String> {
        self.buffer()
            .ok_or_else(|| "nothing rendered yet".to_string())
    }

    /// Drive level at `(x, y)` of the last render
    pub fn pixel_at(&self, x: u32, y: u32) -> Option<u8> {
        self.buffer()?.get_pixel(x, y)
    }

    // ── Pixel assertions ─────────────────────────────────────────────────────

    /// Assert that pixel `(x, y)` has the expected drive level.
    pub fn assert_pixel(&self, x: u32, y: u32, expected: u8) -> Result<(), String> {
        let actual = self
            .rendered()?
            .get_pixel(x, y)
            .ok_or_else(|| format!("Pixel ({x}, {y}) is out of bounds"))?;
        if actual == expected {
            Ok(())
        } else {
            Err(format!(
                "assert_pixel({x}, {y}): expected level {expected}, got {actual}"
            ))
        }
    }

    /// Assert that every pixel has drive level `level`.
    pub fn assert_uniform(&self, level: u8) -> Result<(), String> {
        let buffer = self.rendered()?;
        self.assert_region_uniform(0, 0, buffer.width(), buffer.height(), level)
    }

    /// Assert that every pixel of the `width × height` region at `(x, y)` has
    /// drive level `level`.
    pub fn assert_region_uniform(
        &self,
        x: u32,
        y: u32,
        width: u32,
        height: u32,
        level: u8,
    ) -> Result<(), String> {
        for dy in 0..height {
            for dx in 0..width {
                self.assert_pixel(x.saturating_add(dx), y.saturating_add(dy), level)
                    .map_err(|e| {
                        format!("assert_region_uniform failed in {width}×{height} at ({x}, {y}): {e}")
                    })?;
            }
        }
        Ok(())
    }

    /// Assert the last render equals `expected` pixel for pixel.
    pub fn assert_matches(&self, expected: &ScreenBuffer) -> Result<(), String> {
        let actual = self.rendered()?;
        if actual.dimensions() != expected.dimensions() {
            let (aw, ah) = actual.dimensions();
            let (ew, eh) = expected.dimensions();
            return Err(format!(
                "Dimension mismatch: rendered {aw}×{ah}, expected {ew}×{eh}"
            ));
        }
        let width = actual.width().max(1) as usize;
        let first = actual
            .as_slice()
            .iter()
            .zip(expected.as_slice())
            .enumerate()
            .find(|(_, (a, e))| a != e);
        match first {
            None => Ok(()),
            Some((idx, (a, e))) => Err(format!(
                "first differing pixel at ({}, {}): rendered {a}, expected {e}",
                idx % width,
                idx / width
            )),
        }
    }

    /// Count of pixels per drive level in the last render (all zero before
    /// the first render)
    pub fn histogram(&self) -> [u32; 256] {
        self.buffer()
            .map(ScreenBuffer::histogram)
            .unwrap_or([0; 256])
    }

    /// Number of distinct drive levels in the last render
    pub fn distinct_levels(&self) -> usize {
        self.histogram().iter().filter(|&&count| count > 0).count()
    }

    // ── Screenshot utilities ─────────────────────────────────────────────────

    /// Save the last render as an 8-bit grayscale PNG.
    pub fn screenshot(&self, path: impl AsRef<Path>) -> Result<(), Box<dyn std::error::Error>> {
        let buffer = self.rendered()?;
        save_png(buffer, path.as_ref())
    }

    /// Assert the last render matches a golden reference PNG.
    ///
    /// `threshold` is the largest per-pixel level difference still counted as
    /// equal. Set `UPDATE_GOLDEN=1` to write the golden file instead:
    ///
    /// ```bash
    /// UPDATE_GOLDEN=1 cargo test -p slm-testing
    /// ```
    pub fn assert_matches_golden(
        &self,
        golden_path: impl AsRef<Path>,
        threshold: u8,
    ) -> Result<(), String> {
        let golden_path = golden_path.as_ref();
        let buffer = self.rendered()?;

        if std::env::var("UPDATE_GOLDEN").is_ok() {
            if let Some(parent) = golden_path.parent() {
                std::fs::create_dir_all(parent)
                    .map_err(|e| format!("Failed to create '{}': {e}", parent.display()))?;
            }
            return save_png(buffer, golden_path).map_err(|e| {
                format!(
                    "Failed to save golden '{p}': {e}",
                    p = golden_path.display()
                )
            });
        }

        let golden = image::open(golden_path)
            .map_err(|e| {
                format!(
                    "Failed to open golden '{}': {e}\nRun with UPDATE_GOLDEN=1 to create it.",
                    golden_path.display()
                )
            })?
            .to_luma8();

        if golden.dimensions() != buffer.dimensions() {
            let (cw, ch) = buffer.dimensions();
            let (gw, gh) = golden.dimensions();
            return Err(format!(
                "Dimension mismatch: render is {cw}×{ch}, golden is {gw}×{gh}"
            ));
        }

        let diff_pixels = buffer
            .as_slice()
            .iter()
            .zip(golden.as_raw())
            .filter(|&(&a, &b)| a.abs_diff(b) > threshold)
            .count();
        if diff_pixels > 0 {
            Err(format!(
                "{diff_pixels} pixels differ from golden '{}' (threshold={threshold})",
                golden_path.display()
            ))
        } else {
            Ok(())
        }
    }

    // ── Renderer access ──────────────────────────────────────────────────────

    /// Wrapped renderer
    pub fn renderer(&self) -> &Renderer {
        &self.inner
    }

    /// Wrapped renderer, mutably
    pub fn renderer_mut(&mut self) -> &mut Renderer {
        &mut self.inner
    }
}

/// Write a buffer as an 8-bit grayscale PNG
pub fn save_png(buffer: &ScreenBuffer, path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let (width, height) = buffer.dimensions();
    let img = image::GrayImage::from_raw(width, height, buffer.as_slice().to_vec())
        .ok_or("buffer length does not match its dimensions")?;
    img.save(path)?;
    Ok(())
}

// ─────────────────────────────────────────────────────────────────────────────
// Phase winding
// ─────────────────────────────────────────────────────────────────────────────

/// Net phase winding of `field` around the boundary of a pixel rectangle, in
/// turns.
///
/// The rectangle spans rows `top..=bottom` and columns `left..=right`; its
/// boundary is walked counter-clockwise as seen with y pointing up, summing
/// the wrapped phase step between neighbours. A Laguerre-Gaussian vortex of
/// charge `l` enclosed by the rectangle gives `l`.
pub fn winding_number(
    field: &ComplexField,
    top: u32,
    left: u32,
    bottom: u32,
    right: u32,
) -> Result<i64, String> {
    if top >= bottom || left >= right {
        return Err(format!(
            "rectangle rows {top}..={bottom}, cols {left}..={right} encloses nothing"
        ));
    }

    // Bottom edge rightwards, right edge upwards, top edge leftwards, left
    // edge downwards, ending back at the start.
    let path = (left..=right)
        .map(|col| (bottom, col))
        .chain((top..bottom).rev().map(|row| (row, right)))
        .chain((left..right).rev().map(|col| (top, col)))
        .chain((top + 1..=bottom).map(|row| (row, left)));

    let mut total = 0.0;
    let mut previous: Option<f64> = None;
    for (row, col) in path {
        let (_, phase) = field
            .get(row, col)
            .ok_or_else(|| format!("pixel (row {row}, col {col}) is outside the field"))?;
        if let Some(prev) = previous {
            total += principal_phase(phase - prev);
        }
        previous = Some(phase);
    }

    let turns = (total / TAU).round();
    if (total - turns * TAU).abs() > PI / 4.0 {
        return Err(format!(
            "accumulated phase {total:.4} rad is not a whole number of turns"
        ));
    }
    // SAFETY: `turns` is a rounded count bounded by the path length.
    #[allow(clippy::cast_possible_truncation)]
    let turns = turns as i64;
    Ok(turns)
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
