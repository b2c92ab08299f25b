//! Pixel rectangles covered by a drawn label.

use serde::{Deserialize, Serialize};

/// An axis-aligned pixel rectangle in raster (top-left) space.
///
/// `x` and `y` may be negative or beyond the canvas: labels are allowed to
/// hang off the edge and are clipped when drawn.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Extent {
    pub x: i64,
    pub y: i64,
    pub width: u32,
    pub height: u32,
}

/// How an extent relates to a canvas.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Coverage {
    /// The extent has no area.
    Empty,
    /// Every pixel of the extent lies on the canvas.
    Inside,
    /// Part of the extent lies on the canvas.
    Partial,
    /// No pixel of the extent lies on the canvas.
    Outside,
}

impl Extent {
    /// Creates a new extent.
    #[inline]
    pub fn new(x: i64, y: i64, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Returns true if the extent covers no pixels.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Exclusive right edge.
    #[inline]
    pub fn right(&self) -> i64 {
        self.x + i64::from(self.width)
    }

    /// Exclusive bottom edge.
    #[inline]
    pub fn bottom(&self) -> i64 {
        self.y + i64::from(self.height)
    }

    /// Classifies the extent against a `width` x `height` canvas.
    pub fn coverage(&self, width: u32, height: u32) -> Coverage {
        if self.is_empty() {
            return Coverage::Empty;
        }

        let (w, h) = (i64::from(width), i64::from(height));
        let overlaps = self.x < w && self.right() > 0 && self.y < h && self.bottom() > 0;
        if !overlaps {
            return Coverage::Outside;
        }

        let contained = self.x >= 0 && self.y >= 0 && self.right() <= w && self.bottom() <= h;
        if contained {
            Coverage::Inside
        } else {
            Coverage::Partial
        }
    }

    /// Returns true if the pixel at `(px, py)` lies inside the extent.
    #[inline]
    pub fn contains(&self, px: i64, py: i64) -> bool {
        px >= self.x && px < self.right() && py >= self.y && py < self.bottom()
    }
}
