//! Filename sanitization.
//!
//! Uploaded filenames come straight from the client and may contain path
//! separators, characters illegal on common filesystems, or control
//! characters. Sanitization keeps only the final path component, replaces
//! unsafe characters, and bounds the length.

/// Maximum filename length in bytes, matching common filesystem limits.
const MAX_FILENAME_BYTES: usize = 255;

/// Fallback name when sanitization leaves nothing usable.
const FALLBACK_NAME: &str = "unnamed_file";

/// Sanitize a client-supplied filename.
///
/// - Strips any directory components (both `/` and `\` separators).
/// - Replaces `< > : " | ? *` and control characters with `_`.
/// - Trims surrounding whitespace.
/// - Truncates to 255 bytes, preserving the extension when possible.
/// - Falls back to `"unnamed_file"` if nothing usable remains.
pub fn sanitize_filename(name: &str) -> String {
    let base = name.rsplit(['/', '\\']).next().unwrap_or("");

    let cleaned: String = base
        .chars()
        .map(|c| {
            if matches!(c, '<' | '>' | ':' | '"' | '|' | '?' | '*') || c.is_control() {
                '_'
            } else {
                c
            }
        })
        .collect();
    let cleaned = cleaned.trim();

    if cleaned.is_empty() || cleaned.chars().all(|c| c == '.') {
        return FALLBACK_NAME.to_string();
    }

    truncate_preserving_extension(cleaned, MAX_FILENAME_BYTES)
}

/// Truncate a filename to at most `max_bytes`, keeping the extension intact
/// when the stem leaves room for it.
fn truncate_preserving_extension(name: &str, max_bytes: usize) -> String {
    if name.len() <= max_bytes {
        return name.to_string();
    }

    match name.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() && !ext.is_empty() && ext.len() + 1 < max_bytes => {
            let stem_budget = max_bytes - ext.len() - 1;
            format!("{}.{ext}", truncate_on_char_boundary(stem, stem_budget))
        }
        _ => truncate_on_char_boundary(name, max_bytes).to_string(),
    }
}

fn truncate_on_char_boundary(s: &str, max_bytes: usize) -> &str {
    if s.len() <= max_bytes {
        return s;
    }
    let mut end = max_bytes;
    while end > 0 && !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}
