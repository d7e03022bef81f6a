//! PDF document writer.
//!
//! Assembles complete PDF documents with proper structure:
//! header, body, xref table, and trailer.

use super::content_stream::ContentStreamBuilder;
use super::font_metrics::StandardFont;
use super::object_serializer::ObjectSerializer;
use crate::error::Result;
use crate::object::{Dictionary, Object, ObjectRef};
use std::io::Write;
use std::path::Path;

/// Configuration for PDF generation.
#[derive(Debug, Clone)]
pub struct PdfWriterConfig {
    /// PDF version (e.g., "1.7")
    pub version: String,
    /// Document title
    pub title: Option<String>,
    /// Document subject
    pub subject: Option<String>,
    /// Creator application
    pub creator: Option<String>,
    /// Whether to compress content streams
    pub compress: bool,
}

impl Default for PdfWriterConfig {
    fn default() -> Self {
        Self {
            version: "1.7".to_string(),
            title: None,
            subject: None,
            creator: Some(crate::NAME.to_string()),
            compress: false,
        }
    }
}

impl PdfWriterConfig {
    /// Enable or disable FlateDecode compression of content streams.
    pub fn with_compress(mut self, compress: bool) -> Self {
        self.compress = compress;
        self
    }
}

/// Compress data using Flate/Deflate compression.
fn compress_data(data: &[u8]) -> std::io::Result<Vec<u8>> {
    use flate2::write::ZlibEncoder;
    use flate2::Compression;

    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data)?;
    encoder.finish()
}

/// Internal page data.
struct PageData {
    width: f32,
    height: f32,
    content: ContentStreamBuilder,
}

/// PDF document writer.
///
/// Collects pages in memory; nothing touches the filesystem until
/// [`PdfWriter::save`].
pub struct PdfWriter {
    config: PdfWriterConfig,
    pages: Vec<PageData>,
}

impl PdfWriter {
    /// Create a new PDF writer with default config.
    pub fn new() -> Self {
        Self::with_config(PdfWriterConfig::default())
    }

    /// Create a PDF writer with custom config.
    pub fn with_config(config: PdfWriterConfig) -> Self {
        Self {
            config,
            pages: Vec::new(),
        }
    }

    /// Add a page with the given dimensions and return its content stream.
    pub fn add_page(&mut self, width: f32, height: f32) -> &mut ContentStreamBuilder {
        self.pages.push(PageData {
            width,
            height,
            content: ContentStreamBuilder::new(),
        });
        let last = self.pages.len() - 1;
        &mut self.pages[last].content
    }

    /// Append a page whose content stream was built elsewhere.
    pub fn push_page(&mut self, width: f32, height: f32, content: ContentStreamBuilder) {
        self.pages.push(PageData {
            width,
            height,
            content,
        });
    }

    /// Number of pages added so far.
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Build the complete PDF document.
    pub fn finish(self) -> Result<Vec<u8>> {
        let serializer = ObjectSerializer::compact();
        let mut output = Vec::new();
        let mut offsets: Vec<usize> = Vec::new();

        writeln!(output, "%PDF-{}", self.config.version)?;
        output.extend_from_slice(b"%\xE2\xE3\xCF\xD3\n");

        // Object numbering: catalog, pages tree, fonts, then (page, content)
        // pairs, then the info dictionary.
        let catalog_ref = ObjectRef::new(1, 0);
        let pages_ref = ObjectRef::new(2, 0);
        let font_refs: Vec<(StandardFont, ObjectRef)> = StandardFont::ALL
            .iter()
            .enumerate()
            .map(|(i, font)| (*font, ObjectRef::new(3 + i as u32, 0)))
            .collect();
        let first_page_id = 3 + font_refs.len() as u32;
        let page_refs: Vec<(ObjectRef, ObjectRef)> = (0..self.pages.len() as u32)
            .map(|i| {
                let id = first_page_id + 2 * i;
                (ObjectRef::new(id, 0), ObjectRef::new(id + 1, 0))
            })
            .collect();
        let info_ref = ObjectRef::new(first_page_id + 2 * self.pages.len() as u32, 0);

        let mut emit = |output: &mut Vec<u8>, obj_ref: ObjectRef, obj: &Object| {
            offsets.push(output.len());
            output.extend_from_slice(&serializer.serialize_indirect(obj_ref.id, obj_ref.gen, obj));
        };

        let catalog = ObjectSerializer::dict(vec![
            ("Type", ObjectSerializer::name("Catalog")),
            ("Pages", ObjectSerializer::reference(pages_ref)),
        ]);
        emit(&mut output, catalog_ref, &catalog);

        let kids = page_refs
            .iter()
            .map(|(page_ref, _)| ObjectSerializer::reference(*page_ref))
            .collect();
        let pages_obj = ObjectSerializer::dict(vec![
            ("Type", ObjectSerializer::name("Pages")),
            ("Kids", ObjectSerializer::array(kids)),
            ("Count", ObjectSerializer::integer(self.pages.len() as i64)),
        ]);
        emit(&mut output, pages_ref, &pages_obj);

        let mut font_resources = Dictionary::new();
        for (font, font_ref) in &font_refs {
            let font_obj = ObjectSerializer::dict(vec![
                ("Type", ObjectSerializer::name("Font")),
                ("Subtype", ObjectSerializer::name("Type1")),
                ("BaseFont", ObjectSerializer::name(font.base_name())),
                ("Encoding", ObjectSerializer::name("WinAnsiEncoding")),
            ]);
            emit(&mut output, *font_ref, &font_obj);
            font_resources.insert(font.resource_name().to_string(), Object::Reference(*font_ref));
        }

        for (page, (page_ref, content_ref)) in self.pages.iter().zip(&page_refs) {
            let page_obj = ObjectSerializer::dict(vec![
                ("Type", ObjectSerializer::name("Page")),
                ("Parent", ObjectSerializer::reference(pages_ref)),
                (
                    "MediaBox",
                    ObjectSerializer::rect(0.0, 0.0, page.width as f64, page.height as f64),
                ),
                (
                    "Resources",
                    ObjectSerializer::dict(vec![("Font", Object::Dictionary(font_resources.clone()))]),
                ),
                ("Contents", ObjectSerializer::reference(*content_ref)),
            ]);
            emit(&mut output, *page_ref, &page_obj);

            let raw = page.content.build()?;
            let mut dict = Dictionary::new();
            let data = if self.config.compress {
                match compress_data(&raw) {
                    Ok(compressed) => {
                        dict.insert("Filter".to_string(), ObjectSerializer::name("FlateDecode"));
                        compressed
                    },
                    Err(e) => {
                        log::warn!("Content stream compression failed, writing uncompressed: {}", e);
                        raw
                    },
                }
            } else {
                raw
            };
            let stream = Object::Stream {
                dict,
                data: bytes::Bytes::from(data),
            };
            emit(&mut output, *content_ref, &stream);
        }

        let mut info_entries = Vec::new();
        if let Some(title) = &self.config.title {
            info_entries.push(("Title", ObjectSerializer::text(title)));
        }
        if let Some(subject) = &self.config.subject {
            info_entries.push(("Subject", ObjectSerializer::text(subject)));
        }
        if let Some(creator) = &self.config.creator {
            info_entries.push(("Creator", ObjectSerializer::text(creator)));
        }
        info_entries.push(("Producer", ObjectSerializer::text(&producer())));
        emit(&mut output, info_ref, &ObjectSerializer::dict(info_entries));

        let size = info_ref.id + 1;
        let xref_start = output.len();
        writeln!(output, "xref")?;
        writeln!(output, "0 {}", size)?;
        writeln!(output, "0000000000 65535 f ")?;
        for offset in &offsets {
            writeln!(output, "{:010} 00000 n ", offset)?;
        }

        let trailer = ObjectSerializer::dict(vec![
            ("Size", ObjectSerializer::integer(size as i64)),
            ("Root", ObjectSerializer::reference(catalog_ref)),
            ("Info", ObjectSerializer::reference(info_ref)),
        ]);
        writeln!(output, "trailer")?;
        output.extend_from_slice(&serializer.serialize(&trailer));
        writeln!(output)?;
        writeln!(output, "startxref")?;
        writeln!(output, "{}", xref_start)?;
        write!(output, "%%EOF")?;

        log::debug!("Assembled PDF: {} pages, {} bytes", self.pages.len(), output.len());
        Ok(output)
    }

    /// Save the PDF to a file.
    ///
    /// The document is written to a sibling temporary file and renamed
    /// into place, so `path` is either a complete PDF or untouched.
    pub fn save(self, path: impl AsRef<Path>) -> Result<()> {
        let bytes = self.finish()?;
        write_atomically(path.as_ref(), &bytes)
    }
}

impl Default for PdfWriter {
    fn default() -> Self {
        Self::new()
    }
}

fn producer() -> String {
    format!("{} {}", crate::NAME, crate::VERSION)
}

/// Write `bytes` to `path` through a temporary sibling and a rename.
fn write_atomically(path: &Path, bytes: &[u8]) -> Result<()> {
    let mut tmp_name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    tmp_name.push(".part");
    let tmp_path = path.with_file_name(tmp_name);

    let result = std::fs::write(&tmp_path, bytes).and_then(|_| std::fs::rename(&tmp_path, path));
    if let Err(e) = result {
        let _ = std::fs::remove_file(&tmp_path);
        return Err(e.into());
    }
    Ok(())
}
