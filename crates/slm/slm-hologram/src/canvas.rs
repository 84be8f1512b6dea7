//! Canvas Composer
//!
//! A [`Canvas`] names the physical screens a host drives and where each sits
//! on the virtual desktop. Composition only checks and places: a buffer whose
//! shape differs from its screen is rejected, never resampled.

use crate::buffer::ScreenBuffer;
use crate::error::{HologramError, Result};
use serde::{Deserialize, Serialize};
use slm_specs::SlmSpec;
use tracing::{debug, warn};

/// Screen identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScreenId(String);

impl ScreenId {
    /// Create from any string
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The id as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ScreenId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl From<String> for ScreenId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl core::fmt::Display for ScreenId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A physical output at a fixed resolution and desktop offset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Screen {
    /// Unique id on the canvas
    pub id: ScreenId,
    /// Display name
    #[serde(default)]
    pub name: String,
    /// Native width in pixels
    pub width: u32,
    /// Native height in pixels
    pub height: u32,
    /// Top-left corner on the virtual desktop
    #[serde(default)]
    pub offset: (i32, i32),
    /// Pixel pitch in millimetres, when known
    #[serde(default)]
    pub pixel_pitch_mm: Option<f64>,
}

impl Screen {
    /// Screen of `width × height` at the desktop origin
    pub fn new(id: impl Into<ScreenId>, width: u32, height: u32) -> Self {
        let id = id.into();
        Self {
            name: id.to_string(),
            id,
            width,
            height,
            offset: (0, 0),
            pixel_pitch_mm: None,
        }
    }

    /// Screen sized and named after a device
    pub fn from_spec(id: impl Into<ScreenId>, spec: &SlmSpec) -> Self {
        Self {
            name: spec.name.to_owned(),
            pixel_pitch_mm: Some(spec.pixel_pitch_mm()),
            ..Self::new(id, spec.width, spec.height)
        }
    }

    /// Move the screen on the virtual desktop
    pub fn with_offset(mut self, x: i32, y: i32) -> Self {
        self.offset = (x, y);
        self
    }

    /// (width, height) in pixels
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Desktop rectangle as `(left, top, right, bottom)`, right/bottom exclusive
    pub fn bounds(&self) -> (i64, i64, i64, i64) {
        let left = i64::from(self.offset.0);
        let top = i64::from(self.offset.1);
        (
            left,
            top,
            left + i64::from(self.width),
            top + i64::from(self.height),
        )
    }

    /// True when the two desktop rectangles share any pixel
    pub fn overlaps(&self, other: &Screen) -> bool {
        let (l1, t1, r1, b1) = self.bounds();
        let (l2, t2, r2, b2) = other.bounds();
        l1 < r2 && l2 < r1 && t1 < b2 && t2 < b1
    }
}

/// A buffer placed on its screen
#[derive(Debug, Clone, PartialEq)]
pub struct ScreenFrame {
    screen: Screen,
    buffer: ScreenBuffer,
}

impl ScreenFrame {
    /// Target screen
    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    /// Drive levels, bit-identical to the composed buffer
    pub fn buffer(&self) -> &ScreenBuffer {
        &self.buffer
    }

    /// Top-left corner on the virtual desktop
    pub fn offset(&self) -> (i32, i32) {
        self.screen.offset
    }

    /// Split into screen and buffer
    pub fn into_parts(self) -> (Screen, ScreenBuffer) {
        (self.screen, self.buffer)
    }
}

/// The set of screens a host drives
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Canvas {
    screens: Vec<Screen>,
}

impl Canvas {
    /// Canvas with no screens
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a screen
    ///
    /// Fails on a duplicate id or a zero-sized screen. Overlapping screens are
    /// accepted with a warning.
    pub fn add_screen(&mut self, screen: Screen) -> Result<()> {
        if screen.width == 0 || screen.height == 0 {
            return Err(HologramError::invalid(
                "screen",
                format!(
                    "screen `{}` has zero size {}×{}",
                    screen.id, screen.width, screen.height
                ),
            ));
        }
        if let Some(pitch) = screen.pixel_pitch_mm {
            crate::error::ensure_positive("pixel_pitch_mm", pitch)?;
        }
        if self.screens.iter().any(|s| s.id == screen.id) {
            return Err(HologramError::invalid(
                "screen",
                format!("duplicate screen id `{}`", screen.id),
            ));
        }
        for other in self.screens.iter().filter(|s| s.overlaps(&screen)) {
            warn!(
                screen = %screen.id,
                other = %other.id,
                "screens overlap on the virtual desktop"
            );
        }
        debug!(screen = %screen.id, width = screen.width, height = screen.height, "screen added");
        self.screens.push(screen);
        Ok(())
    }

    /// Builder form of [`add_screen`](Self::add_screen)
    pub fn with_screen(mut self, screen: Screen) -> Result<Self> {
        self.add_screen(screen)?;
        Ok(self)
    }

    /// Remove a screen, returning it
    pub fn remove_screen(&mut self, id: &ScreenId) -> Option<Screen> {
        let position = self.screens.iter().position(|s| &s.id == id)?;
        Some(self.screens.remove(position))
    }

    /// Look up a screen by id
    pub fn screen(&self, id: &ScreenId) -> Result<&Screen> {
        self.screens
            .iter()
            .find(|s| &s.id == id)
            .ok_or_else(|| HologramError::invalid("screen", format!("unknown screen id `{id}`")))
    }

    /// All screens in insertion order
    pub fn screens(&self) -> &[Screen] {
        &self.screens
    }

    /// Number of screens
    pub fn len(&self) -> usize {
        self.screens.len()
    }

    /// True when no screen is registered
    pub fn is_empty(&self) -> bool {
        self.screens.is_empty()
    }

    /// Smallest rectangle covering every screen, or None for an empty canvas
    pub fn virtual_bounds(&self) -> Option<(i64, i64, i64, i64)> {
        self.screens.iter().map(Screen::bounds).reduce(|a, b| {
            (a.0.min(b.0), a.1.min(b.1), a.2.max(b.2), a.3.max(b.3))
        })
    }

    /// Place `buffer` on screen `id`
    ///
    /// The buffer must match the screen's native resolution exactly.
    pub fn compose(&self, id: &ScreenId, buffer: ScreenBuffer) -> Result<ScreenFrame> {
        let screen = self.screen(id)?;
        if buffer.dimensions() != screen.dimensions() {
            return Err(HologramError::ResolutionMismatch {
                screen: screen.id.to_string(),
                expected_width: screen.width,
                expected_height: screen.height,
                actual_width: buffer.width(),
                actual_height: buffer.height(),
            });
        }
        Ok(ScreenFrame {
            screen: screen.clone(),
            buffer,
        })
    }
}
