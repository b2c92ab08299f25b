//! Geometry for label placement.
//!
//! Positions carry their origin corner as a type parameter so that a
//! bottom-left anchored label cannot be drawn with top-left offsets by
//! mistake. [`Extent`] describes the pixels a label covers once placed.

mod extent;
mod point;
mod space;

pub use extent::{Coverage, Extent};
pub use point::Point;
pub use space::{BottomLeft, TopLeft};
