//! Physical sampling grid for a screen
//!
//! Pixel `(row, col)` maps to physical coordinates `(x, y)` in millimetres,
//! centred on the panel. `x` grows with the column; `y` points up, so row 0
//! is the top edge. The grid is separable: it stores one axis vector per
//! direction instead of a full coordinate array.

use crate::canvas::ScreenId;
use crate::error::{ensure_positive, HologramError, Result};
use slm_specs::SlmSpec;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::trace;

/// Physical coordinates of every pixel on a screen
#[derive(Debug, Clone, PartialEq)]
pub struct SamplingGrid {
    width: u32,
    height: u32,
    pitch: f64,
    x_axis: Vec<f64>,
    y_axis: Vec<f64>,
}

impl SamplingGrid {
    /// Build a centred grid of `width × height` pixels spaced `pitch` mm apart.
    pub fn new(width: u32, height: u32, pitch: f64) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(HologramError::invalid(
                "resolution",
                format!("grid must be non-empty, got {width}×{height}"),
            ));
        }
        ensure_positive("pixel_pitch", pitch)?;

        let x_centre = f64::from(width - 1) / 2.0;
        let y_centre = f64::from(height - 1) / 2.0;
        let x_axis = (0..width)
            .map(|col| (f64::from(col) - x_centre) * pitch)
            .collect();
        let y_axis = (0..height)
            .map(|row| (y_centre - f64::from(row)) * pitch)
            .collect();

        Ok(Self {
            width,
            height,
            pitch,
            x_axis,
            y_axis,
        })
    }

    /// Grid at the native resolution and pitch of a device
    pub fn for_spec(spec: &SlmSpec) -> Result<Self> {
        Self::new(spec.width, spec.height, spec.pixel_pitch_mm())
    }

    /// Width in pixels
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels
    pub fn height(&self) -> u32 {
        self.height
    }

    /// (width, height) in pixels
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Pixel pitch in millimetres
    pub fn pitch(&self) -> f64 {
        self.pitch
    }

    /// Number of pixels
    pub fn len(&self) -> usize {
        self.x_axis.len().saturating_mul(self.y_axis.len())
    }

    /// Always false; a grid has at least one pixel.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// x coordinate of each column
    pub fn x_axis(&self) -> &[f64] {
        &self.x_axis
    }

    /// y coordinate of each row
    pub fn y_axis(&self) -> &[f64] {
        &self.y_axis
    }

    /// Physical coordinates of a pixel, or None when out of bounds
    pub fn coords(&self, row: u32, col: u32) -> Option<(f64, f64)> {
        let x = self.x_axis.get(col as usize)?;
        let y = self.y_axis.get(row as usize)?;
        Some((*x, *y))
    }

    /// Half the active area (x, y) in millimetres, measured between pixel centres
    pub fn half_extent(&self) -> (f64, f64) {
        (
            self.x_axis.last().copied().unwrap_or(0.0),
            self.y_axis.first().copied().unwrap_or(0.0),
        )
    }

    /// Iterate `(row, col, x, y)` in row-major order
    pub fn points(&self) -> impl Iterator<Item = (usize, usize, f64, f64)> + '_ {
        self.y_axis.iter().enumerate().flat_map(move |(row, &y)| {
            self.x_axis
                .iter()
                .enumerate()
                .map(move |(col, &x)| (row, col, x, y))
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct GridKey {
    screen: ScreenId,
    width: u32,
    height: u32,
}

/// Per-screen cache of sampling grids
///
/// Keyed by screen id and resolution. A cached grid is rebuilt when the
/// requested pitch differs from the one it was built with.
#[derive(Debug, Default)]
pub struct GridCache {
    grids: HashMap<GridKey, Arc<SamplingGrid>>,
}

impl GridCache {
    /// Create an empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached grid for a screen, building it on first use
    pub fn get_or_build(
        &mut self,
        screen: &ScreenId,
        width: u32,
        height: u32,
        pitch: f64,
    ) -> Result<Arc<SamplingGrid>> {
        let key = GridKey {
            screen: screen.clone(),
            width,
            height,
        };
        if let Some(grid) = self.grids.get(&key) {
            if grid.pitch() == pitch {
                return Ok(Arc::clone(grid));
            }
        }

        trace!(screen = %screen, width, height, pitch, "building sampling grid");
        let grid = Arc::new(SamplingGrid::new(width, height, pitch)?);
        self.grids.insert(key, Arc::clone(&grid));
        Ok(grid)
    }

    /// Number of cached grids
    pub fn len(&self) -> usize {
        self.grids.len()
    }

    /// True when nothing is cached
    pub fn is_empty(&self) -> bool {
        self.grids.is_empty()
    }

    /// Drop every cached grid
    pub fn clear(&mut self) {
        self.grids.clear();
    }

    /// Drop every grid cached for `screen`, returning how many were dropped
    pub fn evict(&mut self, screen: &ScreenId) -> usize {
        let before = self.grids.len();
        self.grids.retain(|key, _| &key.screen != screen);
        before - self.grids.len()
    }

    /// Keep only the grids for which `keep(screen, width, height)` holds
    pub fn retain<F>(&mut self, mut keep: F)
    where
        F: FnMut(&ScreenId, u32, u32) -> bool,
    {
        self.grids
            .retain(|key, _| keep(&key.screen, key.width, key.height));
    }
}
