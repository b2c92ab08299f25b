//! Label description and argument validation.
//!
//! A [`LabelSpec`] is the immutable value handed to
//! [`sign_with`](crate::sign::sign_with): the text, where to put it, how big
//! to draw it, which corner the position is measured from, and the fill
//! color.

mod color;

pub use color::Color;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SignError;
use crate::geom::{BottomLeft, Point, TopLeft};

/// Text size used when the caller does not pick one.
pub const DEFAULT_TEXT_SIZE: f32 = 24.0;

/// Largest accepted text size, in pixels.
///
/// Glyphs that reach the image are rasterized whole, so the cost of each
/// one grows with the square of the size even when only a corner shows.
pub const MAX_TEXT_SIZE: f32 = 4096.0;

/// The image corner a label position is measured from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Origin {
    /// `(x, y)` is the label's top-left corner, y grows downward.
    #[default]
    TopLeft,
    /// `(x, y)` is the label's bottom-left corner, y grows upward.
    BottomLeft,
}

impl Origin {
    /// Stable name, as accepted on the command line.
    pub fn name(&self) -> &'static str {
        match self {
            Origin::TopLeft => "top-left",
            Origin::BottomLeft => "bottom-left",
        }
    }
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Origin {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "top-left" | "tl" => Ok(Origin::TopLeft),
            "bottom-left" | "bl" => Ok(Origin::BottomLeft),
            other => Err(format!(
                "unknown origin '{}' (expected top-left or bottom-left)",
                other
            )),
        }
    }
}

/// What to draw and where.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LabelSpec {
    /// The label text. Empty text draws nothing.
    pub text: String,
    pub x: f64,
    pub y: f64,
    /// Pixel height of the font's line, ascent to descent.
    pub size: f32,
    #[serde(default)]
    pub origin: Origin,
    #[serde(default)]
    pub color: Color,
}

impl LabelSpec {
    /// Creates a top-left anchored label in the default color.
    pub fn new(text: impl Into<String>, x: f64, y: f64, size: f32) -> Self {
        Self {
            text: text.into(),
            x,
            y,
            size,
            origin: Origin::default(),
            color: Color::default(),
        }
    }

    /// Sets the origin corner.
    pub fn with_origin(mut self, origin: Origin) -> Self {
        self.origin = origin;
        self
    }

    /// Sets the fill color.
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    /// Checks the numeric arguments.
    ///
    /// Positions only need to be finite; anything off-canvas is clipped
    /// when drawn.
    pub fn validate(&self) -> Result<(), SignError> {
        if !self.size.is_finite() || self.size <= 0.0 {
            return Err(SignError::InvalidArgument(format!(
                "text size must be a positive number, got {}",
                self.size
            )));
        }
        if self.size > MAX_TEXT_SIZE {
            return Err(SignError::InvalidArgument(format!(
                "text size {} exceeds the maximum of {}",
                self.size, MAX_TEXT_SIZE
            )));
        }
        if !self.x.is_finite() || !self.y.is_finite() {
            return Err(SignError::InvalidArgument(format!(
                "label position must be finite, got ({}, {})",
                self.x, self.y
            )));
        }
        Ok(())
    }

    /// Resolves the position into raster space.
    ///
    /// `box_height` is the height of the label's layout box, needed to turn
    /// a bottom-left anchor into a top-left one.
    pub fn anchor(&self, canvas_height: u32, box_height: u32) -> Point<TopLeft> {
        match self.origin {
            Origin::TopLeft => Point::new(self.x, self.y),
            Origin::BottomLeft => {
                Point::<BottomLeft>::new(self.x, self.y).to_top_left(canvas_height, box_height)
            }
        }
    }

    /// Returns true if drawing this label cannot change any pixel.
    pub fn is_noop(&self) -> bool {
        self.text.is_empty() || self.color.is_transparent()
    }
}
