//! Path helpers shared by the host and renderer.

/// Returns the label shown for a favorite folder.
///
/// The label is the text after the last `separator`, or the whole path when it contains no
/// separator. A trailing separator is ignored so `/home/alice/` still reads `alice`; a path made
/// only of separators (the filesystem root) is returned unchanged.
pub fn folder_display_name(path: &str, separator: &str) -> String {
    if separator.is_empty() {
        return path.to_string();
    }
    let trimmed = path.trim_end_matches(separator);
    if trimmed.is_empty() {
        return path.to_string();
    }
    match trimmed.rfind(separator) {
        Some(idx) => trimmed[idx + separator.len()..].to_string(),
        None => trimmed.to_string(),
    }
}

/// Returns `true` when `path` contains `separator`, i.e. the favorites bar shows it with a
/// folder glyph and its tail name rather than verbatim.
pub fn has_separator(path: &str, separator: &str) -> bool {
    !separator.is_empty() && path.contains(separator)
}
