//! Origin marker types.
//!
//! These are zero-sized types (ZSTs) used as type parameters to distinguish
//! positions measured from different image corners at compile time.

use std::fmt;

/// Marker for positions measured from the top-left corner, y growing down.
///
/// This is the raster's native space: row 0 is the first row of pixel data.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub enum TopLeft {}

/// Marker for positions measured from the bottom-left corner, y growing up.
///
/// This is the convention of desktop drawing frameworks that flip the
/// raster vertically.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub enum BottomLeft {}

impl fmt::Debug for TopLeft {
    fn fmt(&self, _: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {}
    }
}

impl fmt::Debug for BottomLeft {
    fn fmt(&self, _: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {}
    }
}
