// gha-bump - Literal text substitution of bumped action references

use std::collections::BTreeMap;
use std::path::Path;

/// Full original reference (`owner/repo@v2`) → new major tag (`v4`).
pub type Replacements = BTreeMap<String, String>;

/// Characters that can continue an action reference. A match bordered by one
/// of these is part of a different reference and is left alone.
fn is_ref_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | '/' | '@')
}

/// Apply every replacement to the raw file text.
///
/// The text is not re-serialized, so comments, anchors and formatting stay
/// as they were; matching references inside comments are bumped too.
pub fn apply_replacements(content: &str, replacements: &Replacements) -> String {
    let mut out = content.to_string();
    for (old, tag) in replacements {
        let path = old.rsplit_once('@').map_or(old.as_str(), |(path, _)| path);
        let new = format!("{}@{}", path, tag);
        out = replace_exact(&out, old, &new);
    }
    out
}

/// Whether the text right after a match continues the reference. A `.` only
/// does when followed by an alphanumeric (`@v2.1`), not at a sentence end.
fn continues_ref(rest: &str) -> bool {
    let mut chars = rest.chars();
    match chars.next() {
        Some('.') => chars.next().is_some_and(|c| c.is_ascii_alphanumeric()),
        Some(c) => is_ref_char(c),
        None => false,
    }
}

fn replace_exact(haystack: &str, old: &str, new: &str) -> String {
    let mut out = String::with_capacity(haystack.len());
    let mut last = 0;

    for (idx, _) in haystack.match_indices(old) {
        let end = idx + old.len();
        let before = haystack[..idx].chars().next_back();
        if before.is_some_and(is_ref_char) || continues_ref(&haystack[end..]) {
            continue;
        }
        out.push_str(&haystack[last..idx]);
        out.push_str(new);
        last = end;
    }

    out.push_str(&haystack[last..]);
    out
}

/// Rewrite `path` with the replacements applied. Returns `false` without
/// touching the file when there is nothing to replace.
pub fn write_replacements(
    path: &Path,
    content: &str,
    replacements: &Replacements,
) -> std::io::Result<bool> {
    if replacements.is_empty() {
        return Ok(false);
    }

    std::fs::write(path, apply_replacements(content, replacements))?;
    tracing::debug!(path = %path.display(), count = replacements.len(), "Wrote replacements");
    Ok(true)
}
