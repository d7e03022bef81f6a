//! Plain text output of annotation records.

use crate::extractor::AnnotationRecord;
use std::io::{self, Write};

/// Heading printed before the records.
pub const CONSOLE_HEADING: &str = "Extracted Annotations (Console Output):";

/// Write every record as an indented block followed by a separator line.
pub fn write_console<W: Write>(out: &mut W, records: &[AnnotationRecord]) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "{}", CONSOLE_HEADING)?;
    for record in records {
        writeln!(out, "  Book: {}", record.book_name)?;
        writeln!(out, "  Page: {}", record.page_label())?;
        writeln!(out, "  Quote: \"{}\"", record.quote)?;
        writeln!(out, "  Annotation: \"{}\"", record.annotation)?;
        writeln!(out, "{}", "-".repeat(20))?;
    }
    Ok(())
}
