//! Image decoding and encoding.
//!
//! [`Raster`] owns the decoded pixels for the duration of one call. The
//! output side picks an encoder from the destination extension and writes
//! through a temporary file in the destination directory, so a failed call
//! never leaves a truncated image behind.

mod format;

pub use format::{encodable_color, prepare_for_format, select_output_format, OutputFormat};

use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use image::{ColorType, DynamicImage, ImageFormat, ImageReader};

use crate::error::SignError;

/// A decoded image, in the color type it was stored with.
#[derive(Clone, Debug)]
pub struct Raster {
    image: DynamicImage,
}

impl Raster {
    /// Decodes the image at `path`.
    ///
    /// The container format is sniffed from the file contents, so a PNG
    /// saved as `icon.jpg` still decodes.
    pub fn decode(path: &Path) -> Result<Self, SignError> {
        let input_error = |source: image::ImageError| SignError::Input {
            path: path.to_path_buf(),
            source,
        };

        let reader = ImageReader::open(path)
            .and_then(|r| r.with_guessed_format())
            .map_err(|e| input_error(image::ImageError::IoError(e)))?;
        let image = reader.decode().map_err(input_error)?;

        Ok(Self { image })
    }

    /// Wraps an already decoded image.
    pub fn from_image(image: DynamicImage) -> Self {
        Self { image }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.image.width(), self.image.height())
    }

    pub fn color_type(&self) -> ColorType {
        self.image.color()
    }

    pub fn image(&self) -> &DynamicImage {
        &self.image
    }

    pub fn image_mut(&mut self) -> &mut DynamicImage {
        &mut self.image
    }
}

/// Encodes `image` as `format` and atomically places it at `path`.
///
/// The bytes go to a temporary file next to `path` which is renamed over
/// `path` once fully written. On any failure the temporary file is removed
/// and `path` is left as it was.
pub fn encode_atomic(
    image: &DynamicImage,
    path: &Path,
    format: ImageFormat,
) -> Result<(), SignError> {
    let output_error = |source: std::io::Error| SignError::Output {
        path: path.to_path_buf(),
        source,
    };

    let dir = parent_dir(path);
    let mut temp = tempfile::Builder::new()
        .prefix(".imgsign-")
        .suffix(".tmp")
        .tempfile_in(&dir)
        .map_err(output_error)?;

    {
        let mut writer = BufWriter::new(temp.as_file_mut());
        image
            .write_to(&mut writer, format)
            .map_err(|source| SignError::Encode {
                path: path.to_path_buf(),
                source,
            })?;
        writer.flush().map_err(output_error)?;
    }
    temp.as_file().sync_all().map_err(output_error)?;

    // Temporary files are created owner-only; the result is a regular
    // image file.
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        temp.as_file()
            .set_permissions(fs::Permissions::from_mode(0o644))
            .map_err(output_error)?;
    }

    temp.persist(path).map_err(|e| output_error(e.error))?;
    Ok(())
}

/// Returns true if both paths name the same existing file.
pub fn same_file(a: &Path, b: &Path) -> bool {
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

fn parent_dir(path: &Path) -> PathBuf {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};

    fn checkerboard(width: u32, height: u32) -> DynamicImage {
        let img = RgbImage::from_fn(width, height, |x, y| {
            if (x + y) % 2 == 0 {
                Rgb([10, 20, 30])
            } else {
                Rgb([200, 210, 220])
            }
        });
        DynamicImage::ImageRgb8(img)
    }

    #[test]
    fn encode_then_decode_keeps_pixels() {
        let temp = tempfile::tempdir().expect("create temp dir");
        let path = temp.path().join("board.png");
        let image = checkerboard(7, 5);

        encode_atomic(&image, &path, ImageFormat::Png).expect("encode");
        let raster = Raster::decode(&path).expect("decode");

        assert_eq!(raster.dimensions(), (7, 5));
        assert_eq!(raster.color_type(), ColorType::Rgb8);
        assert_eq!(raster.image().to_rgb8(), image.to_rgb8());
    }

    #[test]
    fn encode_leaves_no_temp_files() {
        let temp = tempfile::tempdir().expect("create temp dir");
        let path = temp.path().join("board.png");

        encode_atomic(&checkerboard(3, 3), &path, ImageFormat::Png).expect("encode");

        let names: Vec<_> = fs::read_dir(temp.path())
            .expect("read dir")
            .map(|e| e.expect("entry").file_name())
            .collect();
        assert_eq!(names, vec![std::ffi::OsString::from("board.png")]);
    }

    #[test]
    fn encode_into_missing_dir_is_output_error() {
        let temp = tempfile::tempdir().expect("create temp dir");
        let path = temp.path().join("missing").join("board.png");

        let err = encode_atomic(&checkerboard(3, 3), &path, ImageFormat::Png).unwrap_err();
        assert!(err.is_output_error(), "unexpected error: {err}");
        assert!(!path.exists());
    }

    #[test]
    fn decode_sniffs_content_over_extension() {
        let temp = tempfile::tempdir().expect("create temp dir");
        let path = temp.path().join("actually_png.jpg");
        checkerboard(4, 4)
            .save_with_format(&path, ImageFormat::Png)
            .expect("save");

        let raster = Raster::decode(&path).expect("decode");
        assert_eq!(raster.dimensions(), (4, 4));
    }

    #[test]
    fn decode_garbage_is_input_error() {
        let temp = tempfile::tempdir().expect("create temp dir");
        let path = temp.path().join("garbage.png");
        fs::write(&path, b"definitely not an image").expect("write");

        let err = Raster::decode(&path).unwrap_err();
        assert!(err.is_input_error());
    }

    #[test]
    fn same_file_resolves_relative_segments() {
        let temp = tempfile::tempdir().expect("create temp dir");
        let path = temp.path().join("a.png");
        fs::write(&path, b"x").expect("write");
        let dotted = temp.path().join(".").join("a.png");

        assert!(same_file(&path, &dotted));
        assert!(!same_file(&path, &temp.path().join("b.png")));
    }

    #[test]
    fn parent_of_bare_file_name_is_cwd() {
        assert_eq!(parent_dir(Path::new("out.png")), PathBuf::from("."));
        assert_eq!(parent_dir(Path::new("dir/out.png")), PathBuf::from("dir"));
    }
}
