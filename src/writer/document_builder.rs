//! High-level document builder with a flowing layout.
//!
//! Blocks (headings, paragraphs, spacers and tables) are queued with a
//! fluent API and laid out top to bottom inside the page margins when the
//! document is built. A block that does not fit on the current page
//! continues on the next one.
//!
//! ```ignore
//! use annotation_report::writer::{DocumentBuilder, DocumentMetadata};
//!
//! let mut doc = DocumentBuilder::new().with_metadata(DocumentMetadata::new().title("Dune"));
//! doc.heading("Dune").spacer(12.0).paragraph("No annotations found for this book.");
//! let bytes = doc.build()?;
//! ```

use super::content_stream::ContentStreamBuilder;
use super::font_metrics::{line_height, wrap_text, FontMetrics, StandardFont};
use super::pdf_writer::{PdfWriter, PdfWriterConfig};
use super::table_renderer::Table;
use crate::error::Result;
use std::path::Path;

/// Metadata for a PDF document.
#[derive(Debug, Clone, Default)]
pub struct DocumentMetadata {
    /// Document title
    pub title: Option<String>,
    /// Document subject
    pub subject: Option<String>,
    /// Creator application
    pub creator: Option<String>,
}

impl DocumentMetadata {
    /// Create new empty metadata.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set document title.
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set document subject.
    pub fn subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    /// Set creator application.
    pub fn creator(mut self, creator: impl Into<String>) -> Self {
        self.creator = Some(creator.into());
        self
    }
}

/// US Letter page size in points (8.5" x 11").
const LETTER: (f32, f32) = (612.0, 792.0);

/// Margin on all four sides, in points.
const MARGIN: f32 = 72.0;

/// Text alignment options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TextAlign {
    /// Left-aligned text (default)
    #[default]
    Left,
    /// Center-aligned text
    Center,
}

/// Font, size and alignment of a text block.
#[derive(Debug, Clone, Copy)]
pub struct TextStyle {
    /// Font face
    pub font: StandardFont,
    /// Font size in points
    pub size: f32,
    /// Horizontal alignment within the frame
    pub align: TextAlign,
    /// Extra space after the block
    pub space_after: f32,
}

impl TextStyle {
    /// Centered bold title.
    pub fn title() -> Self {
        Self {
            font: StandardFont::HelveticaBold,
            size: 18.0,
            align: TextAlign::Center,
            space_after: 6.0,
        }
    }

    /// Left-aligned body text.
    pub fn body() -> Self {
        Self {
            font: StandardFont::Helvetica,
            size: 10.0,
            align: TextAlign::Left,
            space_after: 6.0,
        }
    }
}

#[derive(Debug, Clone)]
enum Block {
    Text { text: String, style: TextStyle },
    Spacer(f32),
    Table(Table),
}

/// Builder for flowing multi-page documents.
#[derive(Debug, Clone)]
pub struct DocumentBuilder {
    metadata: DocumentMetadata,
    compress: bool,
    blocks: Vec<Block>,
}

impl Default for DocumentBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentBuilder {
    /// Create a builder for US Letter pages with one-inch margins.
    pub fn new() -> Self {
        Self {
            metadata: DocumentMetadata::default(),
            compress: false,
            blocks: Vec::new(),
        }
    }

    /// Set document metadata.
    pub fn with_metadata(mut self, metadata: DocumentMetadata) -> Self {
        self.metadata = metadata;
        self
    }

    /// Compress page content streams.
    pub fn with_compress(mut self, compress: bool) -> Self {
        self.compress = compress;
        self
    }

    /// Add a centered title heading.
    pub fn heading(&mut self, text: &str) -> &mut Self {
        self.text(text, TextStyle::title())
    }

    /// Add a paragraph of body text.
    pub fn paragraph(&mut self, text: &str) -> &mut Self {
        self.text(text, TextStyle::body())
    }

    /// Add a word-wrapped text block with an explicit style.
    pub fn text(&mut self, text: &str, style: TextStyle) -> &mut Self {
        self.blocks.push(Block::Text {
            text: text.to_string(),
            style,
        });
        self
    }

    /// Add vertical space.
    pub fn spacer(&mut self, points: f32) -> &mut Self {
        self.blocks.push(Block::Spacer(points));
        self
    }

    /// Add a table.
    pub fn table(&mut self, table: Table) -> &mut Self {
        self.blocks.push(Block::Table(table));
        self
    }

    /// Lay out all blocks and produce the PDF bytes.
    pub fn build(&self) -> Result<Vec<u8>> {
        self.layout()?.finish()
    }

    /// Build the document and write it to `path`.
    ///
    /// Nothing is written unless the whole document lays out.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        self.layout()?.save(path)
    }

    fn layout(&self) -> Result<PdfWriter> {
        let (width, height) = LETTER;
        let mut flow = Flow::new(width, height, MARGIN);

        for block in &self.blocks {
            match block {
                Block::Text { text, style } => flow.text(text, style),
                Block::Spacer(points) => flow.space(*points),
                Block::Table(table) => flow.table(table)?,
            }
        }

        let mut writer = PdfWriter::with_config(self.writer_config());
        for page in flow.finish() {
            writer.push_page(width, height, page);
        }
        log::debug!(
            "Laid out {} blocks on {} pages",
            self.blocks.len(),
            writer.page_count()
        );
        Ok(writer)
    }

    fn writer_config(&self) -> PdfWriterConfig {
        let mut config = PdfWriterConfig::default().with_compress(self.compress);
        config.title = self.metadata.title.clone();
        config.subject = self.metadata.subject.clone();
        if let Some(creator) = &self.metadata.creator {
            config.creator = Some(creator.clone());
        }
        config
    }
}

/// Layout state: finished pages plus the cursor on the current page.
struct Flow {
    page_height: f32,
    margin: f32,
    frame_width: f32,
    pages: Vec<ContentStreamBuilder>,
    current: ContentStreamBuilder,
    /// Cursor, measured from the page bottom
    y: f32,
    /// Whether anything has been drawn on the current page
    dirty: bool,
}

impl Flow {
    fn new(page_width: f32, page_height: f32, margin: f32) -> Self {
        Self {
            page_height,
            margin,
            frame_width: page_width - 2.0 * margin,
            pages: Vec::new(),
            current: ContentStreamBuilder::new(),
            y: page_height - margin,
            dirty: false,
        }
    }

    fn top(&self) -> f32 {
        self.page_height - self.margin
    }

    fn frame_height(&self) -> f32 {
        self.page_height - 2.0 * self.margin
    }

    fn available(&self) -> f32 {
        self.y - self.margin
    }

    fn new_page(&mut self) {
        self.pages.push(std::mem::take(&mut self.current));
        self.y = self.top();
        self.dirty = false;
    }

    fn space(&mut self, points: f32) {
        // Space at the top of a page is dropped.
        if self.dirty {
            self.y = (self.y - points).max(self.margin);
        }
    }

    fn text(&mut self, text: &str, style: &TextStyle) {
        let leading = line_height(style.size);
        let ascent = style.font.ascender() * style.size / 1000.0;

        for line in wrap_text(text, self.frame_width, style.size, &style.font) {
            if leading > self.available() && self.dirty {
                self.new_page();
            }
            let line_width = style.font.text_width(&line, style.size);
            let x = match style.align {
                TextAlign::Left => self.margin,
                TextAlign::Center => self.margin + (self.frame_width - line_width) / 2.0,
            };
            self.current
                .set_fill_color((0.0, 0.0, 0.0))
                .begin_text()
                .set_font(style.font, style.size)
                .text(&line, x, self.y - ascent)
                .end_text();
            self.y -= leading;
            self.dirty = true;
        }
        self.space(style.space_after);
    }

    fn table(&mut self, table: &Table) -> Result<()> {
        let layout = table.calculate_layout()?;
        let pages = table.paginate(&layout, self.available(), self.frame_height())?;
        let x = self.margin + (self.frame_width - table.total_width()) / 2.0;

        for (idx, page) in pages.iter().enumerate() {
            if idx > 0 {
                self.new_page();
            }
            if page.slices.is_empty() {
                continue;
            }
            let drawn = table.render_page(&mut self.current, x, self.y, &layout, page)?;
            self.y -= drawn;
            self.dirty = true;
        }
        Ok(())
    }

    fn finish(mut self) -> Vec<ContentStreamBuilder> {
        self.pages.push(self.current);
        self.pages
    }
}
