//! Resolution of the comments column within a single row.
//!
//! Both decoders funnel every row through [`extract_comment`], so "what counts as a comment" has
//! exactly one definition regardless of the upload format.

use crate::types::RowRecord;

/// Normalized header name of the extracted column.
pub const COMMENTS_COLUMN: &str = "comments";

/// Normalize a header for lookup: trim surrounding whitespace, then lower-case.
pub fn normalize_header(header: &str) -> String {
    trim_blank(header).to_lowercase()
}

/// Trim whitespace and byte-order marks (U+FEFF) from both ends.
fn trim_blank(s: &str) -> &str {
    s.trim_matches(|c: char| c.is_whitespace() || c == '\u{FEFF}')
}

/// Extract the comment from `record`, if it has a non-blank one.
///
/// - The first key whose normalized form is [`COMMENTS_COLUMN`] wins; later duplicates are
///   ignored even when the first one is blank.
/// - Only keys are case-folded. Values are returned as written, minus surrounding whitespace.
/// - A null value, or one that trims to nothing, yields `None`.
pub fn extract_comment(record: &RowRecord) -> Option<String> {
    let (_, value) = record
        .iter()
        .find(|(key, _)| normalize_header(key) == COMMENTS_COLUMN)?;
    if value.is_null() {
        return None;
    }

    let text = value.to_string();
    let trimmed = trim_blank(&text);
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_owned())
    }
}
