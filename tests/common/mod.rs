#![allow(dead_code)]

use std::fs;
use std::path::Path;

use image::{ColorType, DynamicImage, Rgb, RgbImage, Rgba, RgbaImage};

/// A 24-bit uncompressed BMP filled with a single color.
pub fn bmp_bytes(width: u32, height: u32, bgr: [u8; 3]) -> Vec<u8> {
    let row_stride = (width * 3).div_ceil(4) * 4;
    let pixel_array_size = row_stride * height;
    let file_size = 54 + pixel_array_size;

    let mut bytes = Vec::with_capacity(file_size as usize);
    bytes.extend_from_slice(b"BM");
    bytes.extend_from_slice(&file_size.to_le_bytes());
    bytes.extend_from_slice(&[0, 0, 0, 0]);
    bytes.extend_from_slice(&54u32.to_le_bytes());

    bytes.extend_from_slice(&40u32.to_le_bytes());
    bytes.extend_from_slice(&(width as i32).to_le_bytes());
    bytes.extend_from_slice(&(height as i32).to_le_bytes());
    bytes.extend_from_slice(&1u16.to_le_bytes());
    bytes.extend_from_slice(&24u16.to_le_bytes());
    bytes.extend_from_slice(&0u32.to_le_bytes());
    bytes.extend_from_slice(&pixel_array_size.to_le_bytes());
    bytes.extend_from_slice(&2835u32.to_le_bytes());
    bytes.extend_from_slice(&2835u32.to_le_bytes());
    bytes.extend_from_slice(&0u32.to_le_bytes());
    bytes.extend_from_slice(&0u32.to_le_bytes());

    for _ in 0..height {
        for _ in 0..width {
            bytes.extend_from_slice(&bgr);
        }
        bytes.resize(bytes.len() + (row_stride - width * 3) as usize, 0);
    }
    bytes
}

pub fn write_bmp(path: &Path, width: u32, height: u32, bgr: [u8; 3]) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create parent dir");
    }
    fs::write(path, bmp_bytes(width, height, bgr)).expect("write bmp file");
}

/// A dark RGB gradient, so drawn white text is always visible.
pub fn gradient(width: u32, height: u32) -> DynamicImage {
    DynamicImage::ImageRgb8(RgbImage::from_fn(width, height, |x, y| {
        Rgb([(x % 64) as u8, (y % 64) as u8, 32])
    }))
}

/// The gradient converted to `color`.
pub fn gradient_as(width: u32, height: u32, color: ColorType) -> DynamicImage {
    let base = gradient(width, height);
    match color {
        ColorType::L8 => DynamicImage::ImageLuma8(base.to_luma8()),
        ColorType::La8 => DynamicImage::ImageLumaA8(base.to_luma_alpha8()),
        ColorType::Rgba8 => DynamicImage::ImageRgba8(base.to_rgba8()),
        ColorType::L16 => DynamicImage::ImageLuma16(base.to_luma16()),
        ColorType::La16 => DynamicImage::ImageLumaA16(base.to_luma_alpha16()),
        ColorType::Rgb16 => DynamicImage::ImageRgb16(base.to_rgb16()),
        ColorType::Rgba16 => DynamicImage::ImageRgba16(base.to_rgba16()),
        ColorType::Rgb32F => DynamicImage::ImageRgb32F(base.to_rgb32f()),
        ColorType::Rgba32F => DynamicImage::ImageRgba32F(base.to_rgba32f()),
        _ => base,
    }
}

pub fn write_png(path: &Path, width: u32, height: u32) -> DynamicImage {
    let image = gradient(width, height);
    image.save(path).expect("write png file");
    image
}

pub fn write_transparent_png(path: &Path, width: u32, height: u32) -> DynamicImage {
    let image = DynamicImage::ImageRgba8(RgbaImage::from_pixel(width, height, Rgba([0, 0, 0, 0])));
    image.save(path).expect("write png file");
    image
}

pub fn dir_entries(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .expect("read dir")
        .map(|e| e.expect("dir entry").file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}
