//! User-supplied name sanitization.
//!
//! Reduces a raw name to a single safe path component: traversal components
//! (`.`, `..`) and separators are removed, and only alphanumerics, space,
//! `.`, `_` and `-` survive. Nothing is escaped; everything else is dropped.
//! An all-invalid input yields `""`, which callers must reject.

/// Characters allowed besides alphanumerics.
const EXTRA_ALLOWED: [char; 4] = [' ', '.', '_', '-'];

#[inline]
fn is_allowed(c: char) -> bool {
    c.is_alphanumeric() || EXTRA_ALLOWED.contains(&c)
}

#[inline]
fn is_traversal(component: &str) -> bool {
    component.is_empty() || component == "." || component == ".."
}

/// Sanitize a raw, untrusted name into a bare filename.
///
/// Both `/` and `\` count as separators regardless of platform. `..` cancels
/// the component before it, so `"a/../b.txt"` is `"b.txt"`. Surviving
/// components are joined without a separator, so `"dir/file.txt"` becomes
/// `"dirfile.txt"`. The result never contains a separator and is never `.`
/// or `..`, which makes the function idempotent.
pub fn sanitize(raw: &str) -> String {
    normalize(raw)
        .into_iter()
        .map(|c| c.chars().filter(|&ch| is_allowed(ch)).collect::<String>())
        .filter(|c| !is_traversal(c))
        .collect()
}

/// Lexically resolve `.` and `..`; a `..` with nothing before it is dropped.
fn normalize(raw: &str) -> Vec<&str> {
    let mut kept = Vec::new();
    for component in raw.split(['/', '\\']) {
        match component {
            "" | "." => {}
            ".." => {
                kept.pop();
            }
            other => kept.push(other),
        }
    }
    kept
}
