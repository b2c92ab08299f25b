//! The sign operation: load an image, draw a label, write the result.

mod report;

pub use report::{IssueCode, Severity, SignIssue, SignReport};

use std::path::Path;

use ab_glyph::Font;
use tracing::{debug, warn};

use crate::codec::{encode_atomic, prepare_for_format, same_file, select_output_format, Raster};
use crate::error::SignError;
use crate::geom::{Coverage, Extent};
use crate::label::LabelSpec;
use crate::render::{self, default_font};

/// Where a label ended up on a raster.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Placement {
    /// Layout box in raster space.
    pub layout: Extent,
    /// Bounds of the changed pixels.
    pub ink: Option<Extent>,
    pub coverage: Coverage,
}

/// Draws `label` onto `input` at `(x, y)` and writes the result to `output`.
///
/// The position is the top-left corner of the label, in pixels from the
/// top-left corner of the image, and `text_size` is the label's pixel
/// height. The label is drawn in opaque white with the embedded
/// [`DEFAULT_FONT_NAME`](crate::render::DEFAULT_FONT_NAME). Use
/// [`sign_with`] for other colors or a bottom-left origin.
///
/// # Errors
/// - [`SignError::InvalidArgument`] if `text_size` is not positive, a
///   coordinate is not finite, or `output` is the input file.
/// - [`SignError::Input`] if `input` cannot be read or decoded.
/// - [`SignError::Output`] / [`SignError::Encode`] if the result cannot be
///   written. `output` is left untouched in that case.
pub fn sign(
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
    label: &str,
    x: f64,
    y: f64,
    text_size: f32,
) -> Result<SignReport, SignError> {
    sign_with(input, output, &LabelSpec::new(label, x, y, text_size))
}

/// Like [`sign`], with every label option spelled out.
pub fn sign_with(
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
    spec: &LabelSpec,
) -> Result<SignReport, SignError> {
    let (input, output) = (input.as_ref(), output.as_ref());

    spec.validate()?;
    if same_file(input, output) {
        return Err(SignError::InvalidArgument(format!(
            "output {} is the input file; refusing to overwrite it",
            output.display()
        )));
    }

    let mut raster = Raster::decode(input)?;
    debug!(
        path = %input.display(),
        width = raster.width(),
        height = raster.height(),
        color = ?raster.color_type(),
        "decoded input"
    );

    let font = default_font()?;
    let placement = annotate(&mut raster, &font, spec);
    debug!(layout = ?placement.layout, ink = ?placement.ink, "drew label");

    let target = select_output_format(output);
    let (prepared, alpha_dropped) = prepare_for_format(raster.image(), target.format);
    encode_atomic(&prepared, output, target.format)?;
    debug!(path = %output.display(), format = target.name(), "wrote output");

    let mut report = SignReport {
        input: input.to_path_buf(),
        output: output.to_path_buf(),
        format: target.name().to_string(),
        width: raster.width(),
        height: raster.height(),
        label: spec.clone(),
        layout: placement.layout,
        ink: placement.ink,
        issues: Vec::new(),
    };
    collect_issues(&mut report, spec, &placement, target.fallback, alpha_dropped);

    for issue in report.issues.iter().filter(|i| i.severity == Severity::Warning) {
        warn!(code = ?issue.code, "{}", issue.message);
    }

    Ok(report)
}

/// Draws `spec` onto `raster` in memory.
///
/// Arguments are assumed valid; see [`LabelSpec::validate`].
pub fn annotate(raster: &mut Raster, font: &impl Font, spec: &LabelSpec) -> Placement {
    let metrics = render::measure(font, &spec.text, spec.size);
    let anchor = spec.anchor(raster.height(), metrics.height);
    let layout = render::layout_extent(anchor, metrics);
    let coverage = layout.coverage(raster.width(), raster.height());

    let ink = match coverage {
        Coverage::Empty | Coverage::Outside => None,
        Coverage::Inside | Coverage::Partial => render::draw_label(
            raster.image_mut(),
            font,
            &spec.text,
            anchor,
            spec.size,
            spec.color,
        ),
    };

    Placement {
        layout,
        ink,
        coverage,
    }
}

fn collect_issues(
    report: &mut SignReport,
    spec: &LabelSpec,
    placement: &Placement,
    format_fallback: bool,
    alpha_dropped: bool,
) {
    if spec.text.is_empty() {
        report.add(SignIssue::info(
            IssueCode::EmptyLabel,
            "label is empty; image written unchanged",
        ));
    } else if spec.color.is_transparent() {
        report.add(SignIssue::info(
            IssueCode::TransparentColor,
            format!("label color {} is fully transparent", spec.color),
        ));
    }

    match placement.coverage {
        Coverage::Outside => report.add(SignIssue::warning(
            IssueCode::LabelOutOfBounds,
            format!(
                "label box at ({}, {}) size {}x{} lies outside the {}x{} image",
                placement.layout.x,
                placement.layout.y,
                placement.layout.width,
                placement.layout.height,
                report.width,
                report.height
            ),
        )),
        Coverage::Partial => report.add(SignIssue::warning(
            IssueCode::LabelPartiallyClipped,
            format!(
                "label box at ({}, {}) size {}x{} extends past the {}x{} image",
                placement.layout.x,
                placement.layout.y,
                placement.layout.width,
                placement.layout.height,
                report.width,
                report.height
            ),
        )),
        Coverage::Empty | Coverage::Inside => {}
    }

    if format_fallback {
        report.add(SignIssue::info(
            IssueCode::FormatFallback,
            format!(
                "no writable image format for extension of {}; wrote PNG",
                report.output.display()
            ),
        ));
    }

    if alpha_dropped {
        report.add(SignIssue::warning(
            IssueCode::AlphaDropped,
            format!("{} cannot store transparency; alpha was dropped", report.format),
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::label::Origin;
    use image::{DynamicImage, Rgb, RgbImage};

    fn raster(width: u32, height: u32) -> Raster {
        Raster::from_image(DynamicImage::ImageRgb8(RgbImage::from_pixel(
            width,
            height,
            Rgb([0, 0, 0]),
        )))
    }

    #[test]
    fn annotate_inside() {
        let font = default_font().unwrap();
        let mut r = raster(200, 60);
        let placement = annotate(&mut r, &font, &LabelSpec::new("DRAFT", 10.0, 10.0, 24.0));

        assert_eq!(placement.coverage, Coverage::Inside);
        assert_eq!((placement.layout.x, placement.layout.y), (10, 10));
        assert!(placement.ink.is_some());
    }

    #[test]
    fn annotate_bottom_left_sits_on_last_row() {
        let font = default_font().unwrap();
        let mut r = raster(200, 60);
        let spec = LabelSpec::new("DRAFT", 0.0, 0.0, 24.0).with_origin(Origin::BottomLeft);
        let placement = annotate(&mut r, &font, &spec);

        assert_eq!(placement.layout.bottom(), 60);
        assert_eq!(placement.layout.x, 0);
        let ink = placement.ink.expect("label is on canvas");
        assert!(ink.bottom() <= 60 && ink.y > 60 - i64::from(placement.layout.height) - 1);
    }

    #[test]
    fn annotate_outside_leaves_raster_alone() {
        let font = default_font().unwrap();
        let mut r = raster(50, 50);
        let before = r.image().clone();
        let placement = annotate(&mut r, &font, &LabelSpec::new("DRAFT", -400.0, 10.0, 24.0));

        assert_eq!(placement.coverage, Coverage::Outside);
        assert!(placement.ink.is_none());
        assert_eq!(r.image(), &before);
    }

    #[test]
    fn annotate_empty_text() {
        let font = default_font().unwrap();
        let mut r = raster(50, 50);
        let placement = annotate(&mut r, &font, &LabelSpec::new("", 10.0, 10.0, 24.0));
        assert_eq!(placement.coverage, Coverage::Empty);
        assert!(placement.ink.is_none());
    }

    #[test]
    fn sign_rejects_bad_size_before_touching_files() {
        let temp = tempfile::tempdir().unwrap();
        let out = temp.path().join("out.png");
        let err = sign(temp.path().join("missing.png"), &out, "x", 0.0, 0.0, 0.0).unwrap_err();

        assert!(matches!(err, SignError::InvalidArgument(_)));
        assert!(!out.exists());
    }

    #[test]
    fn sign_refuses_to_overwrite_input() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("in.png");
        raster(8, 8).image().save(&path).unwrap();
        let before = std::fs::read(&path).unwrap();

        let err = sign(&path, &path, "x", 0.0, 0.0, 12.0).unwrap_err();
        assert!(matches!(err, SignError::InvalidArgument(_)));
        assert_eq!(std::fs::read(&path).unwrap(), before);
    }
}
