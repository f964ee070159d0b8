//! Case-insensitive substring search over a single text field
//!
//! Matching is a plain substring test on lowercased text: it is neither
//! prefix-only nor tokenized, and the needle is never interpreted as a
//! pattern.

/// Whether `needle` occurs anywhere in `haystack`, ignoring case
pub fn matches(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Normalize a submitted query: a missing or blank query means "no filter"
pub fn normalize(query: Option<&str>) -> Option<&str> {
    query.map(str::trim).filter(|q| !q.is_empty())
}

/// Keep the records whose `field` matches `query`
pub fn filter<T, F>(records: Vec<T>, query: Option<&str>, field: F) -> Vec<T>
where
    F: Fn(&T) -> &str,
{
    match normalize(query) {
        Some(needle) => records
            .into_iter()
            .filter(|r| matches(field(r), needle))
            .collect(),
        None => records,
    }
}
