//! PDF writing module for generating report documents.
//!
//! ## Architecture
//!
//! ```text
//! headings / paragraphs / tables
//!     ↓
//! [DocumentBuilder] (flowing layout, page breaks)
//!     ↓
//! [Table] (wrapping, pagination)   [ContentStreamBuilder] (operators)
//!     ↓
//! [PdfWriter] (assembles complete PDF structure)
//!     ↓
//! [ObjectSerializer] (serializes PDF objects)
//!     ↓
//! PDF bytes
//! ```
//!
//! ## High-Level API (DocumentBuilder)
//!
//! ```ignore
//! use annotation_report::writer::{DocumentBuilder, DocumentMetadata};
//!
//! let mut doc = DocumentBuilder::new()
//!     .with_metadata(DocumentMetadata::new().title("My Book"));
//! doc.heading("My Book").spacer(12.0).paragraph("Hello, World!");
//! let bytes = doc.build()?;
//! ```
//!
//! ## Low-Level API (PdfWriter)
//!
//! ```ignore
//! use annotation_report::writer::{PdfWriter, StandardFont};
//!
//! let mut writer = PdfWriter::new();
//! writer
//!     .add_page(612.0, 792.0)
//!     .set_font(StandardFont::Helvetica, 12.0)
//!     .text("Hello, World!", 72.0, 720.0);
//! let bytes = writer.finish()?;
//! ```
//!
//! Text is limited to the Base-14 Helvetica faces with WinAnsiEncoding.

mod content_stream;
mod document_builder;
mod font_metrics;
mod object_serializer;
mod pdf_writer;
mod table_renderer;

pub use content_stream::{ContentStreamBuilder, ContentStreamOp};
pub use document_builder::{DocumentBuilder, DocumentMetadata, TextAlign, TextStyle};
pub use font_metrics::{encode_win_ansi, line_height, wrap_text, FontMetrics, StandardFont};
pub use object_serializer::ObjectSerializer;
pub use pdf_writer::{PdfWriter, PdfWriterConfig};
pub use table_renderer::{
    CellAlign, CellPadding, RowLayout, RowSlice, Table, TableBorderStyle, TableCell, TablePage,
    TableRow, TableStyle,
};
