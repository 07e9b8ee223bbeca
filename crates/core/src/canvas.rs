//! Poster canvas: pixel dimensions, background color, and the mapping from
//! unit poster space to pixel space.
//!
//! Shapes are generated in unit space [0, 1] x [0, 1] with y pointing up
//! (origin at the bottom-left of the poster). Surfaces draw in pixel space
//! with y pointing down. [`Canvas::to_pixel`] is the only place that flip
//! happens.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::color::Srgb;
use crate::error::PosterError;

/// Default poster background, a very light gray.
pub const DEFAULT_BACKGROUND: Srgb = Srgb::gray(0.97);

/// A canvas with pixel dimensions and a background color.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Canvas {
    width: u32,
    height: u32,
    background: Srgb,
}

impl Canvas {
    /// Creates a new canvas with the given dimensions and background color.
    ///
    /// Returns `PosterError::InvalidDimensions` if width or height is zero.
    pub fn new(width: u32, height: u32, background: Srgb) -> Result<Self, PosterError> {
        if width == 0 || height == 0 {
            return Err(PosterError::InvalidDimensions);
        }
        Ok(Self {
            width,
            height,
            background,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn background(&self) -> Srgb {
        self.background
    }

    /// Maps a unit-space point (y up) to pixel space (y down).
    pub fn to_pixel(&self, p: DVec2) -> DVec2 {
        DVec2::new(
            p.x * f64::from(self.width),
            (1.0 - p.y) * f64::from(self.height),
        )
    }

    /// Maps a whole polygon to pixel space, preserving point order.
    pub fn polygon_to_pixels(&self, points: &[DVec2]) -> Vec<DVec2> {
        points.iter().map(|&p| self.to_pixel(p)).collect()
    }

    /// Converts a size in typographic points to pixels for this canvas.
    ///
    /// The reference poster is 6 inches wide at 100 dpi (600 px); text
    /// scales with the canvas width relative to that.
    pub fn points_to_pixels(&self, pt: f64) -> f64 {
        const REFERENCE_WIDTH: f64 = 600.0;
        const PIXELS_PER_POINT: f64 = 100.0 / 72.0;
        pt * PIXELS_PER_POINT * f64::from(self.width) / REFERENCE_WIDTH
    }
}
