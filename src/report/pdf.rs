//! Per-book PDF reports.
//!
//! Each book becomes one document: a centered title, a gap, then a
//! three-column table of page, quote and annotation. A book without
//! records gets a one-line notice instead of the table.

use crate::config::ReportConfig;
use crate::error::Result;
use crate::extractor::AnnotationRecord;
use crate::report::filename::report_file_name;
use crate::writer::{
    CellAlign, DocumentBuilder, DocumentMetadata, Table, TableCell, TableRow,
};
use std::path::PathBuf;

/// Column widths in points: 0.75in, 3in, 3in.
pub const COLUMN_WIDTHS: [f32; 3] = [54.0, 216.0, 216.0];

/// Table header labels.
pub const HEADER_LABELS: [&str; 3] = ["Page No.", "Quote", "Annotation"];

/// Notice shown for a book without records.
pub const EMPTY_NOTICE: &str = "No annotations found for this book.";

/// Subject written to every report's info dictionary.
pub const REPORT_SUBJECT: &str = "Book annotations";

/// Gap between the title and the table, in points.
const TITLE_GAP: f32 = 18.0;

/// Table of one book's records.
pub fn annotation_table(records: &[&AnnotationRecord]) -> Table {
    let header = TableRow::header(HEADER_LABELS.iter().map(|l| TableCell::text(*l)).collect());
    let mut table = Table::new(COLUMN_WIDTHS.to_vec())
        .with_column_aligns(vec![CellAlign::Center, CellAlign::Left, CellAlign::Left])
        .with_header(header);
    for record in records {
        table.add_row(TableRow::new(vec![
            TableCell::text(record.page_label()),
            TableCell::text(record.quote.as_str()),
            TableCell::text(record.annotation.as_str()),
        ]));
    }
    table
}

/// Lay out the report document for one book.
pub fn build_book_document(
    title: &str,
    records: &[&AnnotationRecord],
    config: &ReportConfig,
) -> DocumentBuilder {
    let metadata = DocumentMetadata::new()
        .title(title)
        .subject(REPORT_SUBJECT)
        .creator(crate::NAME);
    let mut doc = DocumentBuilder::new()
        .with_metadata(metadata)
        .with_compress(config.compress);

    doc.heading(title).spacer(TITLE_GAP);
    if records.is_empty() {
        doc.paragraph(EMPTY_NOTICE);
    } else {
        doc.table(annotation_table(records));
    }
    doc
}

/// Render and save one book's report into the configured directory.
///
/// Errors carry the book title.
pub fn save_book_pdf(
    title: &str,
    records: &[&AnnotationRecord],
    config: &ReportConfig,
) -> Result<PathBuf> {
    let path = config.output_dir.join(report_file_name(title, config));
    log::debug!("Rendering {} annotations for '{}'", records.len(), title);
    build_book_document(title, records, config)
        .save(&path)
        .map_err(|e| e.for_book(title))?;
    log::info!("Wrote {}", path.display());
    Ok(path)
}
