//! Annotation extraction from JSON exports.
//!
//! An export is a JSON object with a `docs` array. Each document carries a
//! `data` object with its title and a `citations` array; every citation
//! holds a highlighted passage (`note_body`), the reader's note
//! (`note_extra`) and an optional page (`note_page`). Extraction flattens
//! this into [`AnnotationRecord`]s in document order, then citation order.
//!
//! Quotes and notes are normally strings. A non-zero number or `true` is
//! kept as its JSON text; empty strings, zero, `false`, `null`, arrays and
//! objects mark the citation as incomplete.
//!
//! Malformed documents and citations are skipped rather than rejected.
//! Only a missing file, unreadable content, invalid JSON, or a missing
//! top-level `docs` array is an error.

use crate::error::{Error, Result};
use serde::Serialize;
use serde_json::Value;
use std::fmt;
use std::path::{Path, PathBuf};

/// Title used when a document names none of the known title fields.
pub const UNKNOWN_TITLE: &str = "Unknown Title";

/// Placeholder shown for an absent page number.
pub const MISSING_PAGE: &str = "N/A";

/// A page reference exactly as it appeared in the export.
///
/// Exports use numbers, strings such as `"xii"`, or occasionally other
/// JSON values, so the value is kept opaque and displayed as given.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct PageNumber(Value);

impl PageNumber {
    /// Wrap a JSON value. `null` yields `None`.
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Null => None,
            other => Some(Self(other.clone())),
        }
    }

    /// The underlying JSON value.
    pub fn as_value(&self) -> &Value {
        &self.0
    }
}

impl fmt::Display for PageNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Value::String(s) => f.write_str(s),
            other => write!(f, "{}", other),
        }
    }
}

impl From<i64> for PageNumber {
    fn from(page: i64) -> Self {
        Self(Value::from(page))
    }
}

impl From<&str> for PageNumber {
    fn from(page: &str) -> Self {
        Self(Value::from(page))
    }
}

/// One annotated passage of a book.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnnotationRecord {
    /// Title of the book the passage belongs to
    pub book_name: String,
    /// Page of the passage, if the export has one
    pub page_number: Option<PageNumber>,
    /// Highlighted passage, never empty
    pub quote: String,
    /// Reader's note on the passage, never empty
    pub annotation: String,
}

impl AnnotationRecord {
    /// Page number for display, `N/A` when absent.
    pub fn page_label(&self) -> String {
        self.page_number
            .as_ref()
            .map(ToString::to_string)
            .unwrap_or_else(|| MISSING_PAGE.to_string())
    }
}

/// Reads one candidate title out of a document's `data` object.
type TitleAccessor = fn(&serde_json::Map<String, Value>) -> Option<&str>;

fn doc_title(data: &serde_json::Map<String, Value>) -> Option<&str> {
    data.get("doc_title").and_then(Value::as_str)
}

fn doc_file_name_title(data: &serde_json::Map<String, Value>) -> Option<&str> {
    data.get("doc_file_name_title").and_then(Value::as_str)
}

/// Title candidates in priority order.
const TITLE_ACCESSORS: &[TitleAccessor] = &[doc_title, doc_file_name_title];

/// Resolve the book title of a document.
///
/// The first candidate holding a non-empty string wins; otherwise the
/// title is [`UNKNOWN_TITLE`]. Whitespace is kept as-is.
pub fn resolve_title(doc: &Value) -> String {
    let Some(data) = doc.get("data").and_then(Value::as_object) else {
        return UNKNOWN_TITLE.to_string();
    };
    TITLE_ACCESSORS
        .iter()
        .filter_map(|accessor| accessor(data))
        .find(|title| !title.is_empty())
        .unwrap_or(UNKNOWN_TITLE)
        .to_string()
}

fn note_text(citation: &Value, key: &str) -> Option<String> {
    match citation.get(key)? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) if n.as_f64() != Some(0.0) => Some(n.to_string()),
        Value::Bool(true) => Some("true".to_string()),
        _ => None,
    }
}

fn record_from_citation(book_name: &str, citation: &Value) -> Option<AnnotationRecord> {
    if !citation.is_object() {
        return None;
    }
    let quote = note_text(citation, "note_body")?;
    let annotation = note_text(citation, "note_extra")?;
    Some(AnnotationRecord {
        book_name: book_name.to_string(),
        page_number: citation.get("note_page").and_then(PageNumber::from_value),
        quote,
        annotation,
    })
}

/// Extract annotation records from a parsed export.
pub fn extract_from_value(root: &Value) -> Result<Vec<AnnotationRecord>> {
    let docs = root
        .get("docs")
        .and_then(Value::as_array)
        .ok_or_else(|| Error::UnexpectedShape("Missing 'docs' array.".to_string()))?;

    let mut records = Vec::new();
    for (idx, doc) in docs.iter().enumerate() {
        if !doc.is_object() {
            log::debug!("Skipping docs[{}]: not an object", idx);
            continue;
        }
        let citations = match doc.get("citations").and_then(Value::as_array) {
            Some(citations) if !citations.is_empty() => citations,
            _ => {
                log::debug!("Skipping docs[{}]: no citations", idx);
                continue;
            },
        };

        let book_name = resolve_title(doc);
        let before = records.len();
        records.extend(
            citations
                .iter()
                .filter_map(|citation| record_from_citation(&book_name, citation)),
        );
        log::debug!(
            "docs[{}] '{}': kept {} of {} citations",
            idx,
            book_name,
            records.len() - before,
            citations.len()
        );
    }

    log::info!("Extracted {} annotations from {} documents", records.len(), docs.len());
    Ok(records)
}

/// Extract annotation records from JSON text.
pub fn extract_from_str(json: &str) -> Result<Vec<AnnotationRecord>> {
    let root: Value = serde_json::from_str(json).map_err(|source| Error::InvalidJson {
        path: PathBuf::from("<input>"),
        source,
    })?;
    extract_from_value(&root)
}

/// Extract annotation records from a JSON file.
pub fn extract_from_path(path: impl AsRef<Path>) -> Result<Vec<AnnotationRecord>> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(Error::FileNotFound(path.to_path_buf()));
    }
    log::debug!("Reading annotation export {}", path.display());
    let text = std::fs::read_to_string(path)?;
    let root: Value = serde_json::from_str(&text).map_err(|source| Error::InvalidJson {
        path: path.to_path_buf(),
        source,
    })?;
    extract_from_value(&root)
}

/// Extract annotation records, reporting any error and returning nothing.
///
/// This never fails: an unreadable or malformed export is logged, a short
/// message goes to stderr, and the result is empty.
pub fn extract_annotations(path: impl AsRef<Path>) -> Vec<AnnotationRecord> {
    match extract_from_path(path) {
        Ok(records) => records,
        Err(e) => {
            log::error!("Annotation extraction failed: {}", e);
            eprintln!("Error: {}", e);
            Vec::new()
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_resolve_title_prefers_doc_title() {
        let doc = json!({"data": {"doc_title": "A", "doc_file_name_title": "B"}});
        assert_eq!(resolve_title(&doc), "A");
    }

    #[test]
    fn test_resolve_title_falls_back() {
        assert_eq!(resolve_title(&json!({"data": {"doc_file_name_title": "B"}})), "B");
        assert_eq!(
            resolve_title(&json!({"data": {"doc_title": "", "doc_file_name_title": "B"}})),
            "B"
        );
        assert_eq!(resolve_title(&json!({"data": {}})), UNKNOWN_TITLE);
        assert_eq!(resolve_title(&json!({})), UNKNOWN_TITLE);
        assert_eq!(resolve_title(&json!({"data": "oops"})), UNKNOWN_TITLE);
        assert_eq!(resolve_title(&json!({"data": {"doc_title": 42}})), UNKNOWN_TITLE);
    }

    #[test]
    fn test_resolve_title_keeps_whitespace() {
        assert_eq!(resolve_title(&json!({"data": {"doc_title": " Dune "}})), " Dune ");
    }

    #[test]
    fn test_page_number_display() {
        assert_eq!(PageNumber::from(5i64).to_string(), "5");
        assert_eq!(PageNumber::from("xii").to_string(), "xii");
        assert_eq!(PageNumber::from_value(&json!(12.5)).unwrap().to_string(), "12.5");
        assert!(PageNumber::from_value(&Value::Null).is_none());
        let roman = PageNumber::from_value(&json!("iv")).unwrap();
        assert_eq!(roman.as_value(), &json!("iv"));
    }

    #[test]
    fn test_page_label_placeholder() {
        let record = AnnotationRecord {
            book_name: "T".to_string(),
            page_number: None,
            quote: "Q".to_string(),
            annotation: "A".to_string(),
        };
        assert_eq!(record.page_label(), "N/A");
    }

    #[test]
    fn test_citation_filtering() {
        let root = json!({"docs": [{
            "data": {"doc_title": "T"},
            "citations": [
                {"note_page": 1, "note_body": "q1", "note_extra": "a1"},
                {"note_page": 2, "note_body": "", "note_extra": "a2"},
                {"note_page": 3, "note_body": "q3"},
                {"note_page": 4, "note_body": "q4", "note_extra": null},
                {"note_page": 5, "note_body": [], "note_extra": "a5"},
                "not an object",
                {"note_body": "q6", "note_extra": "a6"}
            ]
        }]});
        let records = extract_from_value(&root).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].quote, "q1");
        assert_eq!(records[0].page_number, Some(PageNumber::from(1i64)));
        assert_eq!(records[1].quote, "q6");
        assert_eq!(records[1].page_number, None);
    }

    #[test]
    fn test_scalar_notes_become_text() {
        let root = json!({"docs": [{
            "data": {"doc_title": "T"},
            "citations": [
                {"note_body": 7, "note_extra": "a1"},
                {"note_body": "q2", "note_extra": 12.5},
                {"note_body": true, "note_extra": "a3"},
                {"note_body": 0, "note_extra": "a4"},
                {"note_body": "q5", "note_extra": false},
                {"note_body": {"text": "q6"}, "note_extra": "a6"}
            ]
        }]});
        let records = extract_from_value(&root).unwrap();
        let quotes: Vec<(&str, &str)> = records
            .iter()
            .map(|r| (r.quote.as_str(), r.annotation.as_str()))
            .collect();
        assert_eq!(quotes, vec![("7", "a1"), ("q2", "12.5"), ("true", "a3")]);
    }

    #[test]
    fn test_documents_without_citations_are_skipped() {
        let root = json!({"docs": [
            {"data": {"doc_title": "NoKey"}},
            {"data": {"doc_title": "Empty"}, "citations": []},
            {"data": {"doc_title": "Wrong"}, "citations": {"note_body": "q"}},
            "not a doc",
            {"data": {"doc_title": "Kept"}, "citations": [{"note_body": "q", "note_extra": "a"}]}
        ]});
        let records = extract_from_value(&root).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].book_name, "Kept");
    }

    #[test]
    fn test_missing_docs_is_an_error() {
        assert!(matches!(
            extract_from_value(&json!({"items": []})),
            Err(Error::UnexpectedShape(_))
        ));
        assert!(matches!(
            extract_from_value(&json!({"docs": {}})),
            Err(Error::UnexpectedShape(_))
        ));
        assert!(matches!(extract_from_value(&json!([1, 2])), Err(Error::UnexpectedShape(_))));
    }

    #[test]
    fn test_extract_from_str_invalid_json() {
        assert!(matches!(extract_from_str("{nope"), Err(Error::InvalidJson { .. })));
    }

    #[test]
    fn test_record_serializes_page_as_given() {
        let record = AnnotationRecord {
            book_name: "T".to_string(),
            page_number: Some(PageNumber::from("iv")),
            quote: "Q".to_string(),
            annotation: "A".to_string(),
        };
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["page_number"], json!("iv"));
    }
}
