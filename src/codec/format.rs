//! Output format selection.

use std::borrow::Cow;
use std::path::Path;

use image::{ColorType, DynamicImage, ImageFormat};

/// The encoder chosen for an output path.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OutputFormat {
    pub format: ImageFormat,
    /// True if the extension was missing or not writable and PNG was used.
    pub fallback: bool,
}

impl OutputFormat {
    /// Short lowercase name, e.g. `png`.
    pub fn name(&self) -> &'static str {
        self.format.extensions_str().first().copied().unwrap_or("unknown")
    }
}

/// Picks the encoder for `path` from its extension, falling back to PNG.
pub fn select_output_format(path: &Path) -> OutputFormat {
    match ImageFormat::from_path(path) {
        Ok(format) if format.writing_enabled() => OutputFormat {
            format,
            fallback: false,
        },
        _ => OutputFormat {
            format: ImageFormat::Png,
            fallback: true,
        },
    }
}

/// Converts `image` into a color type `format` can encode.
///
/// Returns the image to encode and whether an alpha channel was dropped.
/// Images the encoder already accepts are passed through untouched.
pub fn prepare_for_format(
    image: &DynamicImage,
    format: ImageFormat,
) -> (Cow<'_, DynamicImage>, bool) {
    let color = image.color();
    let target = encodable_color(color, format);
    if target == color {
        return (Cow::Borrowed(image), false);
    }

    let alpha_dropped = color.has_alpha() && !target.has_alpha();
    (Cow::Owned(convert(image, target)), alpha_dropped)
}

/// The color type closest to `color` that the `format` encoder accepts.
pub fn encodable_color(color: ColorType, format: ImageFormat) -> ColorType {
    let gray = !color.has_color();
    let alpha = color.has_alpha();
    let wide = color.bytes_per_pixel() > color.channel_count();

    match format {
        ImageFormat::Png => match color {
            ColorType::Rgb32F => ColorType::Rgb16,
            ColorType::Rgba32F => ColorType::Rgba16,
            ColorType::L8
            | ColorType::La8
            | ColorType::Rgb8
            | ColorType::Rgba8
            | ColorType::L16
            | ColorType::La16
            | ColorType::Rgb16
            | ColorType::Rgba16 => color,
            _ => ColorType::Rgba16,
        },
        ImageFormat::Tiff => match color {
            ColorType::La8 => ColorType::Rgba8,
            ColorType::La16 => ColorType::Rgba16,
            ColorType::L8
            | ColorType::Rgb8
            | ColorType::Rgba8
            | ColorType::L16
            | ColorType::Rgb16
            | ColorType::Rgba16
            | ColorType::Rgb32F
            | ColorType::Rgba32F => color,
            _ => ColorType::Rgba16,
        },
        // JPEG and PNM have no alpha channel.
        ImageFormat::Jpeg if gray => ColorType::L8,
        ImageFormat::Jpeg => ColorType::Rgb8,
        ImageFormat::Pnm => match (gray, wide) {
            (true, false) => ColorType::L8,
            (true, true) => ColorType::L16,
            (false, false) => ColorType::Rgb8,
            (false, true) => ColorType::Rgb16,
        },
        ImageFormat::Gif | ImageFormat::Qoi if alpha => ColorType::Rgba8,
        ImageFormat::Gif | ImageFormat::Qoi => ColorType::Rgb8,
        ImageFormat::OpenExr if alpha => ColorType::Rgba32F,
        ImageFormat::OpenExr | ImageFormat::Hdr => ColorType::Rgb32F,
        ImageFormat::Farbfeld => ColorType::Rgba16,
        // BMP, ICO, TGA, WebP and AVIF take 8-bit gray or color.
        _ => match (gray, alpha) {
            (true, false) => ColorType::L8,
            (true, true) => ColorType::La8,
            (false, false) => ColorType::Rgb8,
            (false, true) => ColorType::Rgba8,
        },
    }
}

fn convert(image: &DynamicImage, color: ColorType) -> DynamicImage {
    match color {
        ColorType::L8 => DynamicImage::ImageLuma8(image.to_luma8()),
        ColorType::La8 => DynamicImage::ImageLumaA8(image.to_luma_alpha8()),
        ColorType::Rgb8 => DynamicImage::ImageRgb8(image.to_rgb8()),
        ColorType::L16 => DynamicImage::ImageLuma16(image.to_luma16()),
        ColorType::La16 => DynamicImage::ImageLumaA16(image.to_luma_alpha16()),
        ColorType::Rgb16 => DynamicImage::ImageRgb16(image.to_rgb16()),
        ColorType::Rgba16 => DynamicImage::ImageRgba16(image.to_rgba16()),
        ColorType::Rgb32F => DynamicImage::ImageRgb32F(image.to_rgb32f()),
        ColorType::Rgba32F => DynamicImage::ImageRgba32F(image.to_rgba32f()),
        _ => DynamicImage::ImageRgba8(image.to_rgba8()),
    }
}
