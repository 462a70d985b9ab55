//! Summaries returned by load and save.

use std::path::PathBuf;

/// Result of writing the polygon data file.
#[derive(Debug, Default)]
pub struct ExportResult {
    /// Number of image records written.
    pub images_exported: usize,

    /// Number of regions written across all images.
    pub regions_exported: usize,

    /// Files created during export.
    pub files_created: Vec<PathBuf>,
}

impl ExportResult {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Result of reading the polygon data file.
#[derive(Debug, Default)]
pub struct ImportResult {
    /// Number of image records turned into collections.
    pub images_restored: usize,

    /// Number of regions restored across all images.
    pub regions_restored: usize,

    /// Records or regions that were skipped, and why.
    pub warnings: Vec<FormatWarning>,
}

impl ImportResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a warning to the result.
    pub fn add_warning(&mut self, warning: FormatWarning) {
        self.warnings.push(warning);
    }

    /// Check if there were any warnings.
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Check if whole records were dropped.
    pub fn has_errors(&self) -> bool {
        self.warnings
            .iter()
            .any(|w| matches!(w.severity, WarningSeverity::Error))
    }
}

/// Warning generated while loading.
#[derive(Debug, Clone)]
pub struct FormatWarning {
    /// Image record this warning relates to (if known).
    pub image: Option<String>,

    /// Human-readable warning message.
    pub message: String,

    /// Severity level of the warning.
    pub severity: WarningSeverity,
}

impl FormatWarning {
    pub fn new(message: impl Into<String>, severity: WarningSeverity) -> Self {
        Self {
            image: None,
            message: message.into(),
            severity,
        }
    }

    /// A region inside a record was dropped.
    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(message, WarningSeverity::Warning)
    }

    /// A whole record was dropped.
    pub fn error(message: impl Into<String>) -> Self {
        Self::new(message, WarningSeverity::Error)
    }

    /// Set the image record this warning relates to.
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }
}

/// Severity level for format warnings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WarningSeverity {
    /// Something inside a record was skipped.
    Warning,
    /// A record was skipped entirely.
    Error,
}
