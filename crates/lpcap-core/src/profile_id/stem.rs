//! File stems for capture outputs (`<stem>.png`, `<stem>.txt`).

/// Linux NAME_MAX minus room for the longest extension we append.
const STEM_MAX: usize = 250;

/// Turns a decoded identifier into a file stem that is safe on Linux.
///
/// - Replaces NUL, `/`, `\`, control characters and whitespace with `_`
/// - Collapses runs of `_`
/// - Trims leading/trailing dots and underscores
/// - Caps the length at a char boundary
///
/// Returns `None` when nothing usable is left (e.g. `".."`).
pub fn file_stem(identifier: &str) -> Option<String> {
    let mut out = String::with_capacity(identifier.len());
    let mut prev_underscore = false;

    for c in identifier.chars() {
        let unsafe_char = c == '\0' || c == '/' || c == '\\' || c.is_control() || c.is_whitespace();
        if unsafe_char || c == '_' {
            if !prev_underscore {
                out.push('_');
            }
            prev_underscore = true;
        } else {
            out.push(c);
            prev_underscore = false;
        }
    }

    let trimmed = out.trim_matches(|c| c == '.' || c == '_');
    if trimmed.is_empty() {
        return None;
    }

    let mut take = trimmed.len().min(STEM_MAX);
    while !trimmed.is_char_boundary(take) {
        take -= 1;
    }
    Some(trimmed[..take].to_string())
}
