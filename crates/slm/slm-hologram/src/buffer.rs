//! 8-bit drive-level buffer for one screen
//!
//! Pixels are shared behind an `Arc`; cloning a buffer is cheap and a write
//! to a clone copies the pixels first, so a rendered frame is never changed
//! through another handle.

use crate::error::{HologramError, Result};
use std::sync::Arc;

/// Row-major 8-bit drive levels
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScreenBuffer {
    width: u32,
    height: u32,
    pixels: Arc<Vec<u8>>,
}

impl ScreenBuffer {
    /// Wrap row-major pixels, checking the length matches `width × height`
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self> {
        let expected = pixel_count(width, height);
        if pixels.len() != expected {
            return Err(HologramError::invalid(
                "pixels",
                format!(
                    "{width}×{height} buffer needs {expected} pixels, got {}",
                    pixels.len()
                ),
            ));
        }
        Ok(Self::from_parts(width, height, pixels))
    }

    /// Buffer with every pixel at `level`
    pub fn filled(width: u32, height: u32, level: u8) -> Self {
        Self::from_parts(width, height, vec![level; pixel_count(width, height)])
    }

    pub(crate) fn from_parts(width: u32, height: u32, pixels: Vec<u8>) -> Self {
        Self {
            width,
            height,
            pixels: Arc::new(pixels),
        }
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

    /// Row-major pixels
    pub fn as_slice(&self) -> &[u8] {
        &self.pixels
    }

    /// Iterate rows top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[u8]> {
        self.pixels.chunks_exact((self.width as usize).max(1))
    }

    /// Get pixel at coordinates
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<u8> {
        self.index(x, y).and_then(|idx| self.pixels.get(idx).copied())
    }

    /// Set pixel at coordinates; out-of-bounds writes are ignored
    ///
    /// Copies the pixels first if another handle shares them.
    pub fn set_pixel(&mut self, x: u32, y: u32, level: u8) {
        if let Some(idx) = self.index(x, y) {
            if let Some(pixel) = Arc::make_mut(&mut self.pixels).get_mut(idx) {
                *pixel = level;
            }
        }
    }

    /// True when both buffers point at the same pixel storage
    pub fn shares_pixels(&self, other: &ScreenBuffer) -> bool {
        Arc::ptr_eq(&self.pixels, &other.pixels)
    }

    /// Count of pixels at each drive level
    pub fn histogram(&self) -> [u32; 256] {
        let mut counts = [0_u32; 256];
        for &level in self.pixels.iter() {
            if let Some(count) = counts.get_mut(usize::from(level)) {
                *count = count.saturating_add(1);
            }
        }
        counts
    }

    /// Consume the buffer, returning its pixels
    pub fn into_pixels(self) -> Vec<u8> {
        Arc::try_unwrap(self.pixels).unwrap_or_else(|shared| (*shared).clone())
    }

    fn index(&self, x: u32, y: u32) -> Option<usize> {
        if x < self.width && y < self.height {
            (y as usize)
                .checked_mul(self.width as usize)?
                .checked_add(x as usize)
        } else {
            None
        }
    }
}

fn pixel_count(width: u32, height: u32) -> usize {
    (width as usize).saturating_mul(height as usize)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::indexing_slicing)]
    use super::*;

    #[test]
    fn test_buffer_creation() {
        let buffer = ScreenBuffer::filled(250, 122, 0);
        assert_eq!(buffer.width(), 250);
        assert_eq!(buffer.height(), 122);
        assert_eq!(buffer.as_slice().len(), 250 * 122);
        assert!(buffer.as_slice().iter().all(|&p| p == 0));
    }

    #[test]
    fn test_new_checks_length() {
        assert!(ScreenBuffer::new(4, 2, vec![0; 8]).is_ok());
        let err = ScreenBuffer::new(4, 2, vec![0; 7]).unwrap_err();
        assert_eq!(err.kind(), "InvalidParameter");
    }

    #[test]
    fn test_set_get_pixel() {
        let mut buffer = ScreenBuffer::filled(10, 10, 0);
        buffer.set_pixel(5, 5, 200);
        assert_eq!(buffer.get_pixel(5, 5), Some(200));
        assert_eq!(buffer.get_pixel(0, 0), Some(0));
    }

    #[test]
    fn test_out_of_bounds() {
        let mut buffer = ScreenBuffer::filled(10, 10, 1);
        buffer.set_pixel(100, 100, 9);
        assert_eq!(buffer.get_pixel(100, 100), None);
        assert_eq!(buffer.get_pixel(10, 0), None);
        assert!(buffer.as_slice().iter().all(|&p| p == 1));
    }

    #[test]
    fn test_clone_is_copy_on_write() {
        let original = ScreenBuffer::filled(4, 4, 7);
        let mut copy = original.clone();
        assert!(copy.shares_pixels(&original));

        copy.set_pixel(1, 1, 99);
        assert!(!copy.shares_pixels(&original));
        assert_eq!(original.get_pixel(1, 1), Some(7));
        assert_eq!(copy.get_pixel(1, 1), Some(99));
    }

    #[test]
    fn test_rows_and_histogram() {
        let buffer = ScreenBuffer::new(3, 2, vec![0, 1, 1, 2, 2, 2]).unwrap();
        let rows: Vec<&[u8]> = buffer.rows().collect();
        assert_eq!(rows, vec![&[0, 1, 1][..], &[2, 2, 2][..]]);

        let histogram = buffer.histogram();
        assert_eq!(&histogram[..3], &[1, 2, 3]);
        assert_eq!(histogram.iter().sum::<u32>(), 6);
    }

    #[test]
    fn test_into_pixels() {
        let buffer = ScreenBuffer::new(2, 1, vec![3, 4]).unwrap();
        let shared = buffer.clone();
        assert_eq!(buffer.into_pixels(), vec![3, 4]);
        assert_eq!(shared.into_pixels(), vec![3, 4]);
    }
}
