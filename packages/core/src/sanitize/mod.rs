//! Text Sanitization
//!
//! Cleanup helpers for untrusted text fields and search input.

/// Trim a text field, rejecting values that are empty after trimming
pub fn clean_field(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Normalize a search term for case-insensitive matching
pub fn normalize_query(value: &str) -> Option<String> {
    clean_field(value).map(|v| v.to_lowercase())
}

/// Whether `haystack` contains an already-normalized `needle`, ignoring case
pub fn contains_ignore_case(haystack: &str, normalized_needle: &str) -> bool {
    haystack.to_lowercase().contains(normalized_needle)
}
