//! Grouping of records by book.

use crate::extractor::AnnotationRecord;
use indexmap::IndexMap;

/// Records grouped by book title.
///
/// Books keep the order in which they were first seen, and each book
/// keeps the order of its records.
#[derive(Debug, Clone, Default)]
pub struct BookGroups<'a> {
    groups: IndexMap<&'a str, Vec<&'a AnnotationRecord>>,
}

impl<'a> BookGroups<'a> {
    /// Group `records` by `book_name`.
    pub fn from_records(records: &'a [AnnotationRecord]) -> Self {
        records.iter().collect()
    }

    /// Add a record to its book's group.
    pub fn push(&mut self, record: &'a AnnotationRecord) {
        self.groups
            .entry(record.book_name.as_str())
            .or_default()
            .push(record);
    }

    /// Number of books.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Whether there are no books.
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Records of one book.
    pub fn get(&self, title: &str) -> Option<&[&'a AnnotationRecord]> {
        self.groups.get(title).map(Vec::as_slice)
    }

    /// Book titles in first-seen order.
    pub fn titles(&self) -> impl Iterator<Item = &'a str> + '_ {
        self.groups.keys().copied()
    }

    /// Iterate over `(title, records)` in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&'a str, &[&'a AnnotationRecord])> + '_ {
        self.groups.iter().map(|(title, records)| (*title, records.as_slice()))
    }
}

impl<'a> FromIterator<&'a AnnotationRecord> for BookGroups<'a> {
    fn from_iter<I: IntoIterator<Item = &'a AnnotationRecord>>(iter: I) -> Self {
        let mut groups = BookGroups::default();
        for record in iter {
            groups.push(record);
        }
        groups
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(book: &str, quote: &str) -> AnnotationRecord {
        AnnotationRecord {
            book_name: book.to_string(),
            page_number: None,
            quote: quote.to_string(),
            annotation: "note".to_string(),
        }
    }

    #[test]
    fn test_first_seen_book_order() {
        let records = vec![record("B", "1"), record("A", "2"), record("B", "3")];
        let groups = BookGroups::from_records(&records);
        assert_eq!(groups.titles().collect::<Vec<_>>(), vec!["B", "A"]);
        assert_eq!(groups.len(), 2);
    }

    #[test]
    fn test_per_book_order() {
        let records = vec![record("B", "1"), record("A", "2"), record("B", "3")];
        let groups = BookGroups::from_records(&records);
        let quotes: Vec<&str> = groups
            .get("B")
            .unwrap()
            .iter()
            .map(|r| r.quote.as_str())
            .collect();
        assert_eq!(quotes, vec!["1", "3"]);
    }

    #[test]
    fn test_empty_input() {
        let groups = BookGroups::from_records(&[]);
        assert!(groups.is_empty());
        assert!(groups.get("A").is_none());
    }
}
