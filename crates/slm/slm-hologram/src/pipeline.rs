//! Render pipeline: field → hologram → drive levels → screen
//!
//! [`render_buffer`] is the pure pipeline over one grid. [`Renderer`] adds the
//! canvas, a shared calibration table and a per-screen grid cache.

use crate::buffer::ScreenBuffer;
use crate::calibration::CalibrationTable;
use crate::canvas::{Canvas, Screen, ScreenFrame, ScreenId};
use crate::config::RendererConfig;
use crate::encoder::HologramEncoder;
use crate::error::Result;
use crate::field::generate_field;
use crate::grid::{GridCache, SamplingGrid};
use crate::mode::ModeParameters;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

/// Run field generation, encoding and calibration over `grid`
///
/// Deterministic for every mode except unseeded noise.
pub fn render_buffer(
    mode: &ModeParameters,
    encoder: &HologramEncoder,
    grid: &SamplingGrid,
    table: &CalibrationTable,
) -> Result<ScreenBuffer> {
    let field = generate_field(mode, grid)?;
    let hologram = encoder.encode(&field, grid, &mode.carrier)?;
    let buffer = table.map(&hologram);
    debug!(
        family = mode.family.name(),
        width = buffer.width(),
        height = buffer.height(),
        "buffer rendered"
    );
    Ok(buffer)
}

/// One frame to render
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderRequest {
    /// Target screen
    pub screen: ScreenId,
    /// Field to synthesize
    pub mode: ModeParameters,
    /// Encoder override (None = renderer default)
    #[serde(default)]
    pub encoder: Option<HologramEncoder>,
}

impl RenderRequest {
    /// Request `mode` on `screen` with the renderer's encoder
    pub fn new(screen: impl Into<ScreenId>, mode: ModeParameters) -> Self {
        Self {
            screen: screen.into(),
            mode,
            encoder: None,
        }
    }

    /// Override the encoder
    pub fn with_encoder(mut self, encoder: HologramEncoder) -> Self {
        self.encoder = Some(encoder);
        self
    }

    /// Load from JSON
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

/// Renders requests onto the screens of a canvas
#[derive(Debug)]
pub struct Renderer {
    canvas: Canvas,
    table: Arc<CalibrationTable>,
    config: RendererConfig,
    grids: GridCache,
}

impl Renderer {
    /// Create a renderer
    ///
    /// Fails on an invalid config. A table that does not span `[-π, π]` is
    /// accepted with a warning.
    pub fn new(
        canvas: Canvas,
        table: Arc<CalibrationTable>,
        config: RendererConfig,
    ) -> Result<Self> {
        config.validate()?;
        table.covers_wrap_range();
        Ok(Self {
            canvas,
            table,
            config,
            grids: GridCache::new(),
        })
    }

    /// Screens this renderer targets
    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    /// Mutable access to the canvas
    ///
    /// Grids cached for screens removed or resized here are dropped on the
    /// next render.
    pub fn canvas_mut(&mut self) -> &mut Canvas {
        &mut self.canvas
    }

    /// Register a screen on the canvas
    pub fn add_screen(&mut self, screen: Screen) -> Result<()> {
        self.canvas.add_screen(screen)
    }

    /// Remove a screen and every grid cached for it
    pub fn remove_screen(&mut self, id: &ScreenId) -> Option<Screen> {
        let screen = self.canvas.remove_screen(id)?;
        let evicted = self.grids.evict(id);
        debug!(screen = %id, evicted, "screen removed");
        Some(screen)
    }

    /// Shared calibration table
    pub fn table(&self) -> &Arc<CalibrationTable> {
        &self.table
    }

    /// Replace the calibration table
    pub fn set_table(&mut self, table: Arc<CalibrationTable>) {
        table.covers_wrap_range();
        self.table = table;
    }

    /// Active configuration
    pub fn config(&self) -> &RendererConfig {
        &self.config
    }

    /// Number of cached sampling grids
    pub fn cached_grids(&self) -> usize {
        self.grids.len()
    }

    /// Drop every cached grid; later renders rebuild them
    pub fn clear_cache(&mut self) {
        self.grids.clear();
    }

    /// Render one request and compose it onto its screen
    pub fn render(&mut self, request: &RenderRequest) -> Result<ScreenFrame> {
        self.prune_cache();
        let screen = self.canvas.screen(&request.screen)?;
        let pitch = screen.pixel_pitch_mm.unwrap_or(self.config.pixel_pitch_mm);
        let grid = self
            .grids
            .get_or_build(&screen.id, screen.width, screen.height, pitch)?;
        let encoder = request.encoder.unwrap_or(self.config.encoder);
        let buffer = render_buffer(&request.mode, &encoder, &grid, &self.table)?;
        self.canvas.compose(&request.screen, buffer)
    }

    /// Drop grids whose screen is gone or no longer has the cached size
    fn prune_cache(&mut self) {
        let canvas = &self.canvas;
        self.grids.retain(|id, width, height| {
            canvas
                .screens()
                .iter()
                .any(|s| &s.id == id && s.dimensions() == (width, height))
        });
    }

    /// Render independent requests; each result stands alone
    pub fn render_all(&mut self, requests: &[RenderRequest]) -> Vec<Result<ScreenFrame>> {
        requests.iter().map(|request| self.render(request)).collect()
    }
}
