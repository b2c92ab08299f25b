//! Text rendering.
//!
//! Labels are laid out glyph by glyph with `ab_glyph`, rasterized into a
//! coverage mask the size of the visible part of the label, then
//! composited onto the image with source-over blending. Working through a
//! mask keeps alpha handling correct for translucent colors and transparent
//! images, and tells us exactly which pixels were inked. Measuring and
//! drawing share one layout, so the reported box matches the drawn glyphs.

mod font;

pub use font::{default_font, DEFAULT_FONT_NAME};

use ab_glyph::{point, Font, Glyph, OutlinedGlyph, PxScale, ScaleFont};
use image::{DynamicImage, GenericImage, GenericImageView, GrayImage, Rgba};

use crate::geom::{Extent, Point, TopLeft};
use crate::label::Color;

/// Pixel size of a label's layout box.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TextMetrics {
    /// Sum of advances and kerning along the line.
    pub width: u32,
    /// Ascent plus descent of the scaled font.
    pub height: u32,
}

/// A single line of positioned glyphs.
struct Line {
    /// Glyph origins relative to the layout box's top-left, on the baseline.
    glyphs: Vec<Glyph>,
    metrics: TextMetrics,
}

fn layout_line(font: &impl Font, text: &str, size: f32) -> Line {
    if text.is_empty() {
        return Line {
            glyphs: Vec::new(),
            metrics: TextMetrics::default(),
        };
    }

    let scale = PxScale::from(size);
    let scaled = font.as_scaled(scale);
    let mut glyphs = Vec::with_capacity(text.len());
    let mut caret = 0.0f32;
    let mut previous = None;
    for c in text.chars() {
        let id = scaled.glyph_id(c);
        if let Some(prev) = previous {
            caret += scaled.kern(prev, id);
        }
        glyphs.push(id.with_scale_and_position(scale, point(caret, scaled.ascent())));
        caret += scaled.h_advance(id);
        previous = Some(id);
    }

    Line {
        glyphs,
        metrics: TextMetrics {
            width: caret.max(0.0).ceil() as u32,
            height: (scaled.ascent() - scaled.descent()).ceil() as u32,
        },
    }
}

/// Measures `text` set at `size` pixels in `font`.
///
/// The height is the font's line box, not the ink of these particular
/// glyphs, so labels of equal size stack evenly. Empty text measures zero.
pub fn measure(font: &impl Font, text: &str, size: f32) -> TextMetrics {
    layout_line(font, text, size).metrics
}

/// The layout box of a label whose top-left corner sits at `anchor`.
pub fn layout_extent(anchor: Point<TopLeft>, metrics: TextMetrics) -> Extent {
    let (x, y) = anchor.to_pixel();
    Extent::new(i64::from(x), i64::from(y), metrics.width, metrics.height)
}

/// Draws `text` onto `image` with its layout box's top-left at `anchor`.
///
/// Pixels outside the image are skipped, and glyphs that miss the image
/// entirely are never rasterized. Returns the bounds of the pixels that
/// were actually changed, or `None` if nothing landed on the canvas.
pub fn draw_label(
    image: &mut DynamicImage,
    font: &impl Font,
    text: &str,
    anchor: Point<TopLeft>,
    size: f32,
    color: Color,
) -> Option<Extent> {
    if text.is_empty() || color.is_transparent() {
        return None;
    }

    let line = layout_line(font, text, size);
    let layout = layout_extent(anchor, line.metrics);

    // Glyph outlines may overhang the advance box (negative side bearings,
    // accents), so the mask gets a margin on every side.
    let margin = (size / 4.0).ceil() as u32 + 2;
    let padded = Extent::new(
        layout.x - i64::from(margin),
        layout.y - i64::from(margin),
        line.metrics.width.saturating_add(margin.saturating_mul(2)),
        line.metrics.height.saturating_add(margin.saturating_mul(2)),
    );
    let visible = intersect(padded, image.width(), image.height())?;

    let offset = (layout.x - visible.x, layout.y - visible.y);
    let outlines = outlines_on_mask(font, line.glyphs, offset, visible.width, visible.height);
    let mask = rasterize(&outlines, visible.width, visible.height);

    composite(image, &mask, visible, color)
}

/// Outlines the glyphs that reach a `width` x `height` mask. The layout
/// box's top-left sits at `offset` in mask coordinates.
fn outlines_on_mask(
    font: &impl Font,
    glyphs: Vec<Glyph>,
    offset: (i64, i64),
    width: u32,
    height: u32,
) -> Vec<OutlinedGlyph> {
    let (dx, dy) = (offset.0 as f64, offset.1 as f64);
    glyphs
        .into_iter()
        .filter_map(|mut glyph| {
            glyph.position = point(
                (f64::from(glyph.position.x) + dx) as f32,
                (f64::from(glyph.position.y) + dy) as f32,
            );
            font.outline_glyph(glyph)
        })
        .filter(|outlined| {
            let bounds = outlined.px_bounds();
            bounds.max.x > 0.0
                && bounds.max.y > 0.0
                && bounds.min.x < width as f32
                && bounds.min.y < height as f32
        })
        .collect()
}

fn rasterize(outlines: &[OutlinedGlyph], width: u32, height: u32) -> GrayImage {
    let mut mask = GrayImage::new(width, height);
    for outlined in outlines {
        let bounds = outlined.px_bounds();
        let (left, top) = (bounds.min.x as i64, bounds.min.y as i64);
        outlined.draw(|gx, gy, coverage| {
            let (mx, my) = (left + i64::from(gx), top + i64::from(gy));
            if (0..i64::from(width)).contains(&mx) && (0..i64::from(height)).contains(&my) {
                let value = (coverage.clamp(0.0, 1.0) * 255.0).round() as u8;
                let pixel = mask.get_pixel_mut(mx as u32, my as u32);
                pixel.0[0] = pixel.0[0].max(value);
            }
        });
    }
    mask
}

/// Blends `color` onto `image` through `mask`, placed at `at`.
fn composite(
    image: &mut DynamicImage,
    mask: &GrayImage,
    at: Extent,
    color: Color,
) -> Option<Extent> {
    let [cr, cg, cb, ca] = color.0;
    let color_alpha = f32::from(ca) / 255.0;

    let mut inked: Option<(u32, u32, u32, u32)> = None;
    for (mx, my, coverage) in mask.enumerate_pixels() {
        let coverage = coverage.0[0];
        if coverage == 0 {
            continue;
        }

        // `at` lies within the image, so these fit.
        let px = (at.x + i64::from(mx)) as u32;
        let py = (at.y + i64::from(my)) as u32;

        let t = f32::from(coverage) / 255.0 * color_alpha;
        let Rgba([r, g, b, a]) = image.get_pixel(px, py);
        image.put_pixel(
            px,
            py,
            Rgba([mix(r, cr, t), mix(g, cg, t), mix(b, cb, t), mix(a, 255, t)]),
        );

        inked = Some(match inked {
            None => (px, py, px, py),
            Some((x0, y0, x1, y1)) => (x0.min(px), y0.min(py), x1.max(px), y1.max(py)),
        });
    }

    inked.map(|(x0, y0, x1, y1)| {
        Extent::new(i64::from(x0), i64::from(y0), x1 - x0 + 1, y1 - y0 + 1)
    })
}

fn mix(dst: u8, src: u8, t: f32) -> u8 {
    (f32::from(dst) + (f32::from(src) - f32::from(dst)) * t).round() as u8
}

/// Clips `extent` to a `width` x `height` canvas.
fn intersect(extent: Extent, width: u32, height: u32) -> Option<Extent> {
    let x0 = extent.x.max(0);
    let y0 = extent.y.max(0);
    let x1 = extent.right().min(i64::from(width));
    let y1 = extent.bottom().min(i64::from(height));
    if x0 >= x1 || y0 >= y1 {
        return None;
    }
    Some(Extent::new(x0, y0, (x1 - x0) as u32, (y1 - y0) as u32))
}
