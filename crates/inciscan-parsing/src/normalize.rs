use once_cell::sync::Lazy;
use regex::Regex;

/// Characters stripped from both ends of a candidate ingredient string.
const BOUNDARY_CHARS: &[char] = &[' ', '\t', '\n', '\r', ';', ',', '.'];

static WS_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Normalize a candidate ingredient string: collapse whitespace runs to a
/// single space and strip boundary whitespace/punctuation.
///
/// Idempotent. An empty result means the candidate should be treated as
/// "not found" by callers.
pub fn normalize_ingredients(s: &str) -> String {
    let collapsed = WS_RE.replace_all(s, " ");
    collapsed.trim_matches(BOUNDARY_CHARS).to_string()
}
