//! Table rendering for PDF generation.
//!
//! Tables have fixed column widths. Body cell text is word-wrapped to the
//! column while header labels are kept on a single line. Rows grow to fit their tallest cell, and a table longer than
//! the page is split into per-page slices with the header row repeated.
//!
//! # Example
//!
//! ```ignore
//! use annotation_report::writer::{CellAlign, Table, TableCell, TableRow};
//!
//! let table = Table::new(vec![54.0, 216.0, 216.0])
//!     .with_column_aligns(vec![CellAlign::Center, CellAlign::Left, CellAlign::Left])
//!     .with_header(TableRow::header(vec![
//!         TableCell::text("Page No."),
//!         TableCell::text("Quote"),
//!         TableCell::text("Annotation"),
//!     ]));
//! ```

use super::content_stream::ContentStreamBuilder;
use super::font_metrics::{line_height, wrap_text, FontMetrics, StandardFont};
use crate::error::{Error, Result};
use std::ops::Range;

/// Horizontal alignment for cell content.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CellAlign {
    /// Align to the left
    #[default]
    Left,
    /// Center horizontally
    Center,
}

/// Border style for table grid lines.
#[derive(Debug, Clone, Copy)]
pub struct TableBorderStyle {
    /// Border width in points
    pub width: f32,
    /// Border color (RGB, 0.0-1.0)
    pub color: (f32, f32, f32),
}

impl Default for TableBorderStyle {
    fn default() -> Self {
        Self {
            width: 1.0,
            color: (0.0, 0.0, 0.0),
        }
    }
}

/// Cell padding configuration.
#[derive(Debug, Clone, Copy)]
pub struct CellPadding {
    /// Top padding in points
    pub top: f32,
    /// Right padding in points
    pub right: f32,
    /// Bottom padding in points
    pub bottom: f32,
    /// Left padding in points
    pub left: f32,
}

impl Default for CellPadding {
    fn default() -> Self {
        Self::uniform(6.0)
    }
}

impl CellPadding {
    /// Create uniform padding.
    pub fn uniform(padding: f32) -> Self {
        Self {
            top: padding,
            right: padding,
            bottom: padding,
            left: padding,
        }
    }

    /// Total horizontal padding.
    pub fn horizontal(&self) -> f32 {
        self.left + self.right
    }

    /// Total vertical padding.
    pub fn vertical(&self) -> f32 {
        self.top + self.bottom
    }
}

/// A single table cell, aligned by its column.
#[derive(Debug, Clone)]
pub struct TableCell {
    /// Cell content (text)
    pub content: String,
}

impl TableCell {
    /// Create a new text cell.
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
        }
    }
}

/// A table row.
#[derive(Debug, Clone)]
pub struct TableRow {
    /// Cells in this row
    pub cells: Vec<TableCell>,
    /// Whether this is a header row
    pub is_header: bool,
}

impl TableRow {
    /// Create a body row from cells.
    pub fn new(cells: Vec<TableCell>) -> Self {
        Self {
            cells,
            is_header: false,
        }
    }

    /// Create a header row.
    pub fn header(cells: Vec<TableCell>) -> Self {
        Self {
            cells,
            is_header: true,
        }
    }
}

/// Table style configuration.
#[derive(Debug, Clone)]
pub struct TableStyle {
    /// Cell padding
    pub cell_padding: CellPadding,
    /// Body font
    pub font: StandardFont,
    /// Header font
    pub header_font: StandardFont,
    /// Font size for all cells
    pub font_size: f32,
    /// Header row background color
    pub header_background: Option<(f32, f32, f32)>,
    /// Header text color
    pub header_text_color: (f32, f32, f32),
    /// Body row background color
    pub body_background: Option<(f32, f32, f32)>,
    /// Body text color
    pub text_color: (f32, f32, f32),
    /// Grid drawn around every cell
    pub grid: Option<TableBorderStyle>,
}

impl Default for TableStyle {
    fn default() -> Self {
        Self {
            cell_padding: CellPadding::default(),
            font: StandardFont::Helvetica,
            header_font: StandardFont::HelveticaBold,
            font_size: 10.0,
            header_background: Some((0.5, 0.5, 0.5)),
            header_text_color: (0.96, 0.96, 0.96),
            body_background: Some((0.96, 0.96, 0.86)),
            text_color: (0.0, 0.0, 0.0),
            grid: Some(TableBorderStyle::default()),
        }
    }
}

/// A complete table.
#[derive(Debug, Clone)]
pub struct Table {
    /// Optional header row, drawn first and repeated on continuation pages
    pub header: Option<TableRow>,
    /// Body rows
    pub rows: Vec<TableRow>,
    /// Column widths in points
    pub column_widths: Vec<f32>,
    /// Default alignment per column
    pub column_aligns: Vec<CellAlign>,
    /// Table style
    pub style: TableStyle,
    /// Repeat the header row at the top of every continuation page
    pub repeat_header: bool,
}

impl Table {
    /// Create an empty table with fixed column widths.
    pub fn new(column_widths: Vec<f32>) -> Self {
        let num_cols = column_widths.len();
        Self {
            header: None,
            rows: Vec::new(),
            column_widths,
            column_aligns: vec![CellAlign::Left; num_cols],
            style: TableStyle::default(),
            repeat_header: true,
        }
    }

    /// Set the header row.
    pub fn with_header(mut self, mut row: TableRow) -> Self {
        row.is_header = true;
        self.header = Some(row);
        self
    }

    /// Set column alignments.
    pub fn with_column_aligns(mut self, aligns: Vec<CellAlign>) -> Self {
        self.column_aligns = aligns;
        self
    }

    /// Add a body row.
    pub fn add_row(&mut self, row: TableRow) {
        self.rows.push(row);
    }

    /// Number of columns.
    pub fn num_columns(&self) -> usize {
        self.column_widths.len()
    }

    /// Total width of the table in points.
    pub fn total_width(&self) -> f32 {
        self.column_widths.iter().sum()
    }

    /// Whether the table has no body rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn line_height(&self) -> f32 {
        line_height(self.style.font_size)
    }

    /// Wrap every cell and compute the height of each row.
    ///
    /// Index 0 of the result is the header when there is one.
    pub fn calculate_layout(&self) -> Result<Vec<RowLayout>> {
        let num_cols = self.num_columns();
        let padding = self.style.cell_padding;

        self.header
            .iter()
            .chain(self.rows.iter())
            .enumerate()
            .map(|(idx, row)| {
                if row.cells.len() > num_cols {
                    return Err(Error::Layout(format!(
                        "row {} has {} cells but the table has {} columns",
                        idx,
                        row.cells.len(),
                        num_cols
                    )));
                }
                let font = if row.is_header {
                    self.style.header_font
                } else {
                    self.style.font
                };
                let cell_lines: Vec<Vec<String>> = row
                    .cells
                    .iter()
                    .zip(&self.column_widths)
                    .map(|(cell, width)| {
                        // Header labels stay on one line.
                        if row.is_header {
                            return vec![cell.content.clone()];
                        }
                        let content_width = (width - padding.horizontal()).max(1.0);
                        wrap_text(&cell.content, content_width, self.style.font_size, &font)
                    })
                    .collect();
                let line_count = cell_lines.iter().map(Vec::len).max().unwrap_or(1).max(1);
                Ok(RowLayout {
                    cell_lines,
                    line_count,
                    is_header: row.is_header,
                })
            })
            .collect()
    }

    /// Height of a slice of `lines` lines of some row.
    pub fn slice_height(&self, lines: usize) -> f32 {
        lines as f32 * self.line_height() + self.style.cell_padding.vertical()
    }

    /// Split the table into per-page slices.
    ///
    /// `first_available` is the vertical space left on the page where the
    /// table starts; `page_available` is the space on a fresh page. The
    /// first returned page is empty when nothing fits in `first_available`.
    pub fn paginate(
        &self,
        layout: &[RowLayout],
        first_available: f32,
        page_available: f32,
    ) -> Result<Vec<TablePage>> {
        let lh = self.line_height();
        let pad = self.style.cell_padding.vertical();
        let header_height = match (self.header.is_some(), layout.first()) {
            (true, Some(row)) => self.slice_height(row.line_count),
            _ => 0.0,
        };

        if header_height + self.slice_height(1) > page_available {
            return Err(Error::Layout(format!(
                "page height {:.1}pt cannot hold the table header and one line",
                page_available
            )));
        }

        let mut pages = Vec::new();
        let mut current = TablePage::default();
        let mut remaining = first_available;

        let mut new_page = |current: &mut TablePage, remaining: &mut f32, with_header: bool| {
            pages.push(std::mem::take(current));
            *remaining = page_available;
            if with_header && self.repeat_header && self.header.is_some() {
                if let Some(row) = layout.first() {
                    current.slices.push(RowSlice {
                        row: 0,
                        lines: 0..row.line_count,
                    });
                    *remaining -= header_height;
                }
            }
        };

        for (idx, row) in layout.iter().enumerate() {
            if row.is_header {
                if header_height + self.slice_height(1) > remaining {
                    new_page(&mut current, &mut remaining, false);
                }
                current.slices.push(RowSlice {
                    row: idx,
                    lines: 0..row.line_count,
                });
                remaining -= header_height;
                continue;
            }

            let mut start = 0;
            while start < row.line_count {
                let left = row.line_count - start;
                let needed = self.slice_height(left);
                if needed <= remaining {
                    current.slices.push(RowSlice {
                        row: idx,
                        lines: start..row.line_count,
                    });
                    remaining -= needed;
                    break;
                }

                let fresh = page_available - if self.repeat_header { header_height } else { 0.0 };
                let fitting = if remaining > pad {
                    ((remaining - pad) / lh).floor() as usize
                } else {
                    0
                };

                if needed <= fresh || fitting == 0 {
                    new_page(&mut current, &mut remaining, true);
                    continue;
                }

                // Taller than a page: fill this page, continue on the next.
                let end = start + fitting.min(left);
                current.slices.push(RowSlice {
                    row: idx,
                    lines: start..end,
                });
                start = end;
                new_page(&mut current, &mut remaining, true);
            }
        }

        pages.push(current);
        Ok(pages)
    }

    /// Render one page worth of slices with the table's top-left at (x, y).
    ///
    /// Returns the height drawn.
    pub fn render_page(
        &self,
        builder: &mut ContentStreamBuilder,
        x: f32,
        y: f32,
        layout: &[RowLayout],
        page: &TablePage,
    ) -> Result<f32> {
        let padding = self.style.cell_padding;
        let font_size = self.style.font_size;
        let lh = self.line_height();
        let mut top = y;

        for slice in &page.slices {
            let row = layout.get(slice.row).ok_or_else(|| {
                Error::Layout(format!("row slice {} is outside the table", slice.row))
            })?;
            let height = self.slice_height(slice.lines.len());
            let bottom = top - height;

            let (background, text_color, font) = if row.is_header {
                (self.style.header_background, self.style.header_text_color, self.style.header_font)
            } else {
                (self.style.body_background, self.style.text_color, self.style.font)
            };

            if let Some(color) = background {
                builder
                    .set_fill_color(color)
                    .fill_rect(x, bottom, self.total_width(), height);
            }

            if let Some(grid) = self.style.grid {
                builder
                    .set_stroke_color(grid.color)
                    .set_line_width(grid.width);
                let mut cell_x = x;
                for width in &self.column_widths {
                    builder.stroke_rect(cell_x, bottom, *width, height);
                    cell_x += width;
                }
            }

            builder.set_fill_color(text_color);
            let baseline_offset = padding.top + font.ascender() * font_size / 1000.0;
            let mut cell_x = x;
            for (col, width) in self.column_widths.iter().enumerate() {
                let align = self.column_aligns.get(col).copied().unwrap_or_default();
                let content_width = width - padding.horizontal();
                let lines = row.cell_lines.get(col).map(Vec::as_slice).unwrap_or(&[]);

                for (offset, line_idx) in slice.lines.clone().enumerate() {
                    let Some(line) = lines.get(line_idx) else {
                        break;
                    };
                    if line.is_empty() {
                        continue;
                    }
                    let text_width = font.text_width(line, font_size);
                    let text_x = match align {
                        CellAlign::Left => cell_x + padding.left,
                        CellAlign::Center => cell_x + padding.left + (content_width - text_width) / 2.0,
                    };
                    let text_y = top - baseline_offset - offset as f32 * lh;
                    builder
                        .begin_text()
                        .set_font(font, font_size)
                        .text(line, text_x, text_y);
                }
                builder.end_text();
                cell_x += width;
            }

            top = bottom;
        }

        Ok(y - top)
    }

}

/// Wrapped content of one row.
#[derive(Debug, Clone)]
pub struct RowLayout {
    /// Wrapped lines per cell
    pub cell_lines: Vec<Vec<String>>,
    /// Number of lines of the tallest cell
    pub line_count: usize,
    /// Whether this row is the header
    pub is_header: bool,
}

/// A contiguous range of lines of one row placed on a page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowSlice {
    /// Row index into the layout
    pub row: usize,
    /// Line range of the row drawn in this slice
    pub lines: Range<usize>,
}

/// Rows (or parts of rows) placed on one page.
#[derive(Debug, Clone, Default)]
pub struct TablePage {
    /// Slices in drawing order
    pub slices: Vec<RowSlice>,
}
