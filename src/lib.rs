//! # Annotation Report
//!
//! Turns a JSON export of book annotations into readable summaries: a
//! plain text listing on the console, or one formatted PDF per book.
//!
//! ## Pipeline
//!
//! ```text
//! export.json
//!     ↓
//! [extractor] (docs → citations → AnnotationRecord[])
//!     ↓
//! [report] (console text, or group by book → one document per book)
//!     ↓
//! [writer] (table layout, pagination, PDF assembly)
//! ```
//!
//! ## Quick Start
//!
//! ```ignore
//! use annotation_report::{extract_from_path, report, ReportConfig};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let records = extract_from_path("export.json")?;
//! let config = ReportConfig::new().with_pdf(true).with_output_dir("reports");
//! let summary = report::run(&records, &config, &mut std::io::stdout())?;
//! println!("{} reports written", summary.written.len());
//! # Ok(())
//! # }
//! ```
//!
//! PDF output uses only the Base-14 Helvetica fonts; characters outside
//! WinAnsiEncoding are shown as `?`.

#![warn(missing_docs)]

// Error handling
pub mod error;

// Configuration
pub mod config;

// Annotation extraction
pub mod extractor;

// Console and PDF reports
pub mod report;

// PDF object model and writer
pub mod object;
pub mod writer;

// Re-exports
pub use config::{OutputMode, ReportConfig};
pub use error::{Error, Result};
pub use extractor::{
    extract_annotations, extract_from_path, extract_from_str, extract_from_value,
    AnnotationRecord, PageNumber,
};
pub use report::{BookGroups, ReportSummary};

// Version info
/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
