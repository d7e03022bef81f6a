//! Configuration for report generation.

use std::path::PathBuf;

/// Default suffix appended to every generated report file name.
pub const DEFAULT_FILE_SUFFIX: &str = "_Annotations.pdf";

/// Default maximum length (in characters) of a sanitized file stem.
pub const DEFAULT_MAX_STEM_LEN: usize = 200;

/// Where extracted annotations go.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputMode {
    /// Print every record as a plain text block
    #[default]
    Console,
    /// Write one PDF report per book
    Pdf,
}

/// Report configuration.
#[derive(Debug, Clone)]
pub struct ReportConfig {
    /// Output mode.
    pub mode: OutputMode,

    /// Directory PDF reports are written to.
    pub output_dir: PathBuf,

    /// Compress PDF content streams.
    pub compress: bool,

    /// Suffix appended to the sanitized book title.
    pub file_suffix: String,

    /// Maximum sanitized title length before the suffix.
    pub max_stem_len: usize,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportConfig {
    /// Create new configuration with defaults.
    pub fn new() -> Self {
        Self {
            mode: OutputMode::Console,
            output_dir: PathBuf::from("."),
            compress: false,
            file_suffix: DEFAULT_FILE_SUFFIX.to_string(),
            max_stem_len: DEFAULT_MAX_STEM_LEN,
        }
    }

    /// Set the output mode.
    pub fn with_mode(mut self, mode: OutputMode) -> Self {
        self.mode = mode;
        self
    }

    /// Switch to per-book PDF output.
    pub fn with_pdf(self, enable: bool) -> Self {
        self.with_mode(if enable {
            OutputMode::Pdf
        } else {
            OutputMode::Console
        })
    }

    /// Set the directory PDF reports are written to.
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    /// Enable stream compression.
    pub fn with_compress(mut self, enable: bool) -> Self {
        self.compress = enable;
        self
    }

    /// Override the file name suffix.
    pub fn with_file_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.file_suffix = suffix.into();
        self
    }
}
