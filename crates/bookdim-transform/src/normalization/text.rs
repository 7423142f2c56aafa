//! Free-text cleanup.

/// Collapse whitespace runs to a single space and trim both ends.
pub fn clean_string(value: &str) -> String {
    let mut parts = value.split_whitespace();
    let mut cleaned = String::with_capacity(value.len());
    if let Some(first) = parts.next() {
        cleaned.push_str(first);
        for part in parts {
            cleaned.push(' ');
            cleaned.push_str(part);
        }
    }
    cleaned
}

/// Lowercase a title and keep only ASCII letters, digits and whitespace.
///
/// Used for the hash identity fallback, so the output must be stable:
/// `"Clean Code: A Handbook"` becomes `"clean code a handbook"`.
pub fn normalize_title(title: &str) -> String {
    let kept: String = title
        .to_lowercase()
        .chars()
        .filter(|ch| ch.is_ascii_lowercase() || ch.is_ascii_digit() || ch.is_whitespace())
        .collect();
    clean_string(&kept)
}

/// Split a comma-joined author list into cleaned, non-empty names.
pub fn split_authors(authors: &str) -> Vec<String> {
    authors
        .split(',')
        .map(clean_string)
        .filter(|name| !name.is_empty())
        .collect()
}
