/// Splits a comma-separated tag field, trimming entries and dropping blanks.
pub fn split_tags(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect()
}

/// Renders tags back into the single text input used by the quote form.
pub fn join_tags(tags: &[String]) -> String {
    tags.join(", ")
}

/// Trims a submitted field, treating whitespace-only input as missing.
pub fn non_blank(raw: Option<&str>) -> Option<String> {
    raw.map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}
