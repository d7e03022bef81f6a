//! Report file naming.

use crate::config::ReportConfig;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Characters that are rejected or reserved by common filesystems
    static ref RE_FORBIDDEN: Regex = Regex::new(r#"[\\/*?:"<>|]"#).unwrap();
}

/// Stem used when a title has nothing left after sanitizing.
pub const EMPTY_STEM: &str = "Untitled";

/// Turn a book title into a safe file stem.
///
/// Drops `\ / * ? : " < > |`, replaces spaces with underscores and keeps at
/// most `max_len` characters.
pub fn sanitize_filename(title: &str, max_len: usize) -> String {
    let stripped = RE_FORBIDDEN.replace_all(title, "");
    let stem: String = stripped.replace(' ', "_").chars().take(max_len).collect();
    if stem.is_empty() {
        EMPTY_STEM.to_string()
    } else {
        stem
    }
}

/// File name of the report for a book, e.g. `Dune_Annotations.pdf`.
pub fn report_file_name(title: &str, config: &ReportConfig) -> String {
    format!(
        "{}{}",
        sanitize_filename(title, config.max_stem_len),
        config.file_suffix
    )
}
