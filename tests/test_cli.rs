//! End-to-end tests for the `extract_annotations` binary.

#[cfg(test)]
mod cli_tests {
    use std::path::Path;
    use std::process::{Command, Output};

    const EXPORT: &str = r#"{"docs":[{"data":{"doc_title":"T"},"citations":[{"note_page":5,"note_body":"Q","note_extra":"A"}]}]}"#;

    fn run(args: &[&str], cwd: &Path) -> Output {
        Command::new(env!("CARGO_BIN_EXE_extract_annotations"))
            .args(args)
            .current_dir(cwd)
            .env_remove("RUST_LOG")
            .output()
            .unwrap()
    }

    fn stdout(output: &Output) -> String {
        String::from_utf8_lossy(&output.stdout).to_string()
    }

    #[test]
    fn test_console_output() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("export.json"), EXPORT).unwrap();

        let output = run(&["export.json"], dir.path());
        assert!(output.status.success());
        let text = stdout(&output);
        assert!(text.contains("Book: T"));
        assert!(text.contains("Page: 5"));
        assert!(text.contains("Quote: \"Q\""));
        assert!(text.contains("Annotation: \"A\""));
        assert!(!dir.path().join("T_Annotations.pdf").exists());
    }

    #[test]
    fn test_pdf_output_in_working_directory() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("export.json"), EXPORT).unwrap();

        let output = run(&["export.json", "--pdf"], dir.path());
        assert!(output.status.success());
        assert!(stdout(&output).contains("Successfully generated PDF: "));
        let bytes = std::fs::read(dir.path().join("T_Annotations.pdf")).unwrap();
        assert!(bytes.starts_with(b"%PDF-"));
    }

    #[test]
    fn test_pdf_output_dir() {
        let dir = tempfile::tempdir().unwrap();
        let reports = dir.path().join("reports");
        std::fs::create_dir(&reports).unwrap();
        std::fs::write(dir.path().join("export.json"), EXPORT).unwrap();

        let output = run(
            &["export.json", "--pdf", "--compress", "--output-dir", "reports"],
            dir.path(),
        );
        assert!(output.status.success());
        assert!(reports.join("T_Annotations.pdf").exists());
    }

    #[test]
    fn test_pdf_failure_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("export.json"), EXPORT).unwrap();

        let output = run(
            &["export.json", "--pdf", "--output-dir", "does-not-exist"],
            dir.path(),
        );
        assert!(output.status.success());
        assert!(stdout(&output).contains("Error generating PDF for T: "));
    }

    #[test]
    fn test_missing_file_reports_no_annotations() {
        let dir = tempfile::tempdir().unwrap();
        let output = run(&["missing.json"], dir.path());
        assert!(output.status.success());
        assert!(stdout(&output)
            .contains("No annotations found or an error occurred while reading the JSON."));
        assert!(String::from_utf8_lossy(&output.stderr).contains("File not found"));
    }

    #[test]
    fn test_missing_docs_reports_no_annotations() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("export.json"), r#"{"items": []}"#).unwrap();
        let output = run(&["export.json"], dir.path());
        assert!(output.status.success());
        assert!(stdout(&output).contains("No annotations found"));
    }

    #[test]
    fn test_missing_argument_is_usage_error() {
        let dir = tempfile::tempdir().unwrap();
        let output = run(&[], dir.path());
        assert!(!output.status.success());
    }
}
