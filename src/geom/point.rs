//! Typed label positions using PhantomData for compile-time safety.

use std::marker::PhantomData;

use super::space::{BottomLeft, TopLeft};

/// A 2D position with a type-level marker for its origin corner.
///
/// The `TSpace` parameter is either [`TopLeft`] or [`BottomLeft`]. Only
/// `Point<TopLeft>` can be turned into raster pixel offsets, so a
/// bottom-left position has to be flipped explicitly before drawing.
#[derive(Clone, Copy, PartialEq)]
pub struct Point<TSpace> {
    pub x: f64,
    pub y: f64,
    _space: PhantomData<TSpace>,
}

impl<TSpace> Point<TSpace> {
    /// Creates a new point with the given x and y values.
    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            _space: PhantomData,
        }
    }
}

impl Point<BottomLeft> {
    /// Flips a bottom-left anchored position into raster space.
    ///
    /// The bottom-left point names the lower-left corner of a box that is
    /// `box_height` pixels tall; the result names that box's upper-left
    /// corner measured from the top of a canvas `canvas_height` rows tall.
    #[inline]
    pub fn to_top_left(self, canvas_height: u32, box_height: u32) -> Point<TopLeft> {
        Point::new(
            self.x,
            f64::from(canvas_height) - self.y - f64::from(box_height),
        )
    }
}

impl Point<TopLeft> {
    /// Rounds the position to whole pixel offsets.
    ///
    /// Values beyond the `i32` range saturate; anything that far away is
    /// off-canvas either way.
    #[inline]
    pub fn to_pixel(self) -> (i32, i32) {
        (self.x.round() as i32, self.y.round() as i32)
    }
}

impl<TSpace> std::fmt::Debug for Point<TSpace> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Point")
            .field("x", &self.x)
            .field("y", &self.y)
            .finish()
    }
}
