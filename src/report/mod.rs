//! Rendering of extracted annotations.
//!
//! [`run`] is the entry point: in console mode every record is printed as
//! a text block; in PDF mode records are grouped by book and each book is
//! written to its own PDF. A book that fails to render is reported and
//! skipped, so one bad title never stops the others.

mod console;
mod filename;
mod grouping;
mod pdf;

pub use console::{write_console, CONSOLE_HEADING};
pub use filename::{report_file_name, sanitize_filename, EMPTY_STEM};
pub use grouping::BookGroups;
pub use pdf::{
    annotation_table, build_book_document, save_book_pdf, COLUMN_WIDTHS, EMPTY_NOTICE,
    HEADER_LABELS, REPORT_SUBJECT,
};

use crate::config::{OutputMode, ReportConfig};
use crate::error::{Error, Result};
use crate::extractor::AnnotationRecord;
use std::io::Write;
use std::path::PathBuf;

/// Outcome of a report run.
#[derive(Debug, Default)]
pub struct ReportSummary {
    /// Reports written, in book order
    pub written: Vec<PathBuf>,
    /// Books that could not be rendered, with the cause
    pub failures: Vec<(String, Error)>,
}

impl ReportSummary {
    /// Whether every book was rendered.
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Render `records` according to `config`, writing user-facing messages
/// to `out`.
///
/// Only failures to write to `out` are returned as errors; per-book
/// rendering failures end up in the summary.
pub fn run<W: Write>(
    records: &[AnnotationRecord],
    config: &ReportConfig,
    out: &mut W,
) -> Result<ReportSummary> {
    match config.mode {
        OutputMode::Console => {
            write_console(out, records)?;
            Ok(ReportSummary::default())
        },
        OutputMode::Pdf => render_pdfs(records, config, out),
    }
}

fn render_pdfs<W: Write>(
    records: &[AnnotationRecord],
    config: &ReportConfig,
    out: &mut W,
) -> Result<ReportSummary> {
    let groups = BookGroups::from_records(records);
    let mut summary = ReportSummary::default();

    if groups.is_empty() {
        writeln!(out, "No books found to generate PDFs for.")?;
        return Ok(summary);
    }

    log::info!(
        "Generating {} PDF reports in {}",
        groups.len(),
        config.output_dir.display()
    );

    for (title, book_records) in groups.iter() {
        match save_book_pdf(title, book_records, config) {
            Ok(path) => {
                writeln!(out, "Successfully generated PDF: {}", path.display())?;
                summary.written.push(path);
            },
            Err(e) => {
                log::warn!("Skipping '{}': {}", title, e);
                let cause = match &e {
                    Error::Render { reason, .. } => reason.clone(),
                    other => other.to_string(),
                };
                writeln!(out, "Error generating PDF for {}: {}", title, cause)?;
                summary.failures.push((title.to_string(), e));
            },
        }
    }

    Ok(summary)
}
