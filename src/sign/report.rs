//! Sign report types.
//!
//! A successful call returns a [`SignReport`] describing what was written
//! and anything worth a second look: labels that fell off the canvas, an
//! output extension that was not understood, an alpha channel the encoder
//! could not keep.

use std::fmt;
use std::path::PathBuf;

use serde::Serialize;

use crate::geom::Extent;
use crate::label::LabelSpec;

/// The result of signing one image.
#[derive(Clone, Debug, Serialize)]
pub struct SignReport {
    pub input: PathBuf,
    pub output: PathBuf,
    /// Encoder used for the output, e.g. `png`.
    pub format: String,
    pub width: u32,
    pub height: u32,
    /// The label as it was requested.
    pub label: LabelSpec,
    /// The label's layout box in raster space. May lie partly or wholly
    /// off the canvas.
    pub layout: Extent,
    /// Bounds of the pixels that were changed, if any.
    pub ink: Option<Extent>,
    pub issues: Vec<SignIssue>,
}

impl SignReport {
    /// Adds an issue to the report.
    pub fn add(&mut self, issue: SignIssue) {
        self.issues.push(issue);
    }

    /// Returns the number of warnings in the report.
    pub fn warning_count(&self) -> usize {
        self.issues
            .iter()
            .filter(|i| i.severity == Severity::Warning)
            .count()
    }

    /// Returns true if the report carries an issue with `code`.
    pub fn has(&self, code: IssueCode) -> bool {
        self.issues.iter().any(|i| i.code == code)
    }

    /// Returns true if there are no issues at all.
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }
}

impl fmt::Display for SignReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Signed {} -> {} ({}x{}, {})",
            self.input.display(),
            self.output.display(),
            self.width,
            self.height,
            self.format
        )?;
        writeln!(
            f,
            "  label {:?} at ({}, {}) {} size {}",
            self.label.text, self.label.x, self.label.y, self.label.origin, self.label.size
        )?;
        match self.ink {
            Some(ink) => writeln!(
                f,
                "  inked {}x{} pixels at ({}, {})",
                ink.width, ink.height, ink.x, ink.y
            )?,
            None => writeln!(f, "  no pixels changed")?,
        }

        for issue in &self.issues {
            writeln!(f, "  {}", issue)?;
        }

        Ok(())
    }
}

/// A single note or warning about a sign call.
#[derive(Clone, Debug, Serialize)]
pub struct SignIssue {
    pub severity: Severity,
    pub code: IssueCode,
    pub message: String,
}

impl SignIssue {
    /// Creates a new issue.
    pub fn new(severity: Severity, code: IssueCode, message: impl Into<String>) -> Self {
        Self {
            severity,
            code,
            message: message.into(),
        }
    }

    /// Creates an informational note.
    pub fn info(code: IssueCode, message: impl Into<String>) -> Self {
        Self::new(Severity::Info, code, message)
    }

    /// Creates a new warning.
    pub fn warning(code: IssueCode, message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, code, message)
    }
}

impl fmt::Display for SignIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let severity = match self.severity {
            Severity::Info => "INFO ",
            Severity::Warning => "WARN ",
        };
        write!(f, "[{}] {:?}: {}", severity, self.code, self.message)
    }
}

/// How much attention an issue deserves.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Expected behavior the caller may not have intended.
    Info,
    /// The output differs from what the arguments suggest.
    Warning,
}

/// A stable code identifying the type of issue.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum IssueCode {
    /// The label text was empty; the image was copied unchanged.
    EmptyLabel,
    /// The label color is fully transparent; nothing was drawn.
    TransparentColor,
    /// The label's layout box lies entirely outside the image.
    LabelOutOfBounds,
    /// Part of the label's layout box lies outside the image.
    LabelPartiallyClipped,
    /// The output extension was missing or unknown; PNG was written.
    FormatFallback,
    /// The output format cannot store alpha; transparency was flattened.
    AlphaDropped,
}
