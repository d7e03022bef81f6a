//! Integration tests for console and PDF reports.

#[cfg(test)]
mod report_tests {
    use annotation_report::report::{self, build_book_document, sanitize_filename, BookGroups};
    use annotation_report::{extract_from_str, AnnotationRecord, ReportConfig};

    const EXPORT: &str = r#"{"docs":[
        {"data":{"doc_title":"Dune"},"citations":[
            {"note_page":12,"note_body":"Fear is the mind-killer.","note_extra":"Litany"},
            {"note_body":"The spice must flow.","note_extra":"Economy"}]},
        {"data":{"doc_title":"My/Book Title"},"citations":[
            {"note_page":"iv","note_body":"Preface quote","note_extra":"Nice"}]},
        {"data":{"doc_title":"Dune"},"citations":[
            {"note_page":99,"note_body":"Later quote","note_extra":"Later note"}]}
    ]}"#;

    fn records() -> Vec<AnnotationRecord> {
        extract_from_str(EXPORT).unwrap()
    }

    #[test]
    fn test_console_report() {
        let mut out = Vec::new();
        report::run(&records(), &ReportConfig::default(), &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.starts_with("\nExtracted Annotations (Console Output):\n"));
        assert!(text.contains("  Book: Dune\n  Page: 12\n"));
        assert!(text.contains("  Page: N/A\n"));
        assert!(text.contains("  Page: iv\n"));
        assert!(text.contains("  Quote: \"Fear is the mind-killer.\"\n"));
        assert_eq!(text.matches("--------------------\n").count(), 4);
    }

    #[test]
    fn test_grouping_merges_repeated_titles() {
        let records = records();
        let groups = BookGroups::from_records(&records);
        assert_eq!(groups.titles().collect::<Vec<_>>(), vec!["Dune", "My/Book Title"]);
        assert_eq!(groups.get("Dune").map(|g| g.len()), Some(3));
    }

    #[test]
    fn test_pdf_reports_written() {
        let dir = tempfile::tempdir().unwrap();
        let config = ReportConfig::new().with_pdf(true).with_output_dir(dir.path());
        let mut out = Vec::new();
        let summary = report::run(&records(), &config, &mut out).unwrap();

        assert!(summary.is_success());
        let dune = dir.path().join("Dune_Annotations.pdf");
        let other = dir.path().join("MyBook_Title_Annotations.pdf");
        assert_eq!(summary.written, vec![dune.clone(), other.clone()]);

        let bytes = std::fs::read(&dune).unwrap();
        let content = String::from_utf8_lossy(&bytes);
        assert!(content.starts_with("%PDF-1.7"));
        assert!(content.contains("(Later quote) Tj"));
        assert!(content.contains("/Title (Dune)"));

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains(&format!("Successfully generated PDF: {}", dune.display())));
    }

    #[test]
    fn test_rerun_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let config = ReportConfig::new().with_pdf(true).with_output_dir(dir.path());
        report::run(&records(), &config, &mut std::io::sink()).unwrap();
        let first = std::fs::read(dir.path().join("Dune_Annotations.pdf")).unwrap();
        report::run(&records(), &config, &mut std::io::sink()).unwrap();
        let second = std::fs::read(dir.path().join("Dune_Annotations.pdf")).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_compressed_reports() {
        let dir = tempfile::tempdir().unwrap();
        let config = ReportConfig::new()
            .with_pdf(true)
            .with_compress(true)
            .with_output_dir(dir.path());
        report::run(&records(), &config, &mut std::io::sink()).unwrap();
        let bytes = std::fs::read(dir.path().join("Dune_Annotations.pdf")).unwrap();
        let content = String::from_utf8_lossy(&bytes);
        assert!(content.contains("/Filter /FlateDecode"));
    }

    #[test]
    fn test_empty_book_document() {
        let bytes = build_book_document("Lonely", &[], &ReportConfig::default())
            .build()
            .unwrap();
        let content = String::from_utf8_lossy(&bytes);
        assert!(content.contains("(Lonely) Tj"));
        assert!(content.contains("(No annotations found for this book.) Tj"));
    }

    #[test]
    fn test_long_book_spans_pages_with_repeated_header() {
        let records: Vec<AnnotationRecord> = (0..80i64)
            .map(|i| AnnotationRecord {
                book_name: "Long".to_string(),
                page_number: Some(i.into()),
                quote: format!("Quote number {} with a few more words to wrap", i),
                annotation: "note".to_string(),
            })
            .collect();
        let refs: Vec<&AnnotationRecord> = records.iter().collect();
        let bytes = build_book_document("Long", &refs, &ReportConfig::default())
            .build()
            .unwrap();
        let content = String::from_utf8_lossy(&bytes);
        let pages = content.matches("/Type /Page ").count();
        assert!(pages > 1);
        assert_eq!(content.matches("(Page No.) Tj").count(), pages);
    }

    #[test]
    fn test_sanitize_examples() {
        assert_eq!(sanitize_filename("My/Book Title", 200), "MyBook_Title");
        assert_eq!(sanitize_filename("What? Why: How", 200), "What_Why_How");
    }
}

#[cfg(test)]
mod sanitize_property_tests {
    use annotation_report::report::sanitize_filename;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn sanitized_stems_are_safe(title in ".*") {
            let stem = sanitize_filename(&title, 200);
            prop_assert!(!stem.is_empty());
            prop_assert!(stem.chars().count() <= 200);
            prop_assert!(!stem.contains(|c: char| r#"\/*?:"<>| "#.contains(c)));
        }

        #[test]
        fn safe_titles_only_change_spaces(title in "[A-Za-z0-9 ]{1,150}") {
            let stem = sanitize_filename(&title, 200);
            prop_assert_eq!(stem.replace('_', " "), title);
        }
    }
}
