//! Boolean canonicalization.

use super::whitespace::normalize_whitespace;

/// Canonical truthy value.
pub const TRUE_VALUE: &str = "true";

/// Canonical falsy value.
pub const FALSE_VALUE: &str = "false";

/// Lowercase tokens read as true.
pub const TRUTHY_TOKENS: [&str; 8] = ["verdadero", "true", "t", "si", "sí", "1", "y", "yes"];

/// Lowercase tokens read as false.
pub const FALSY_TOKENS: [&str; 6] = ["falso", "false", "f", "no", "0", "n"];

/// Maps a boolean-like cell to `true` or `false`.
///
/// Matching is on the trimmed, lowercased value. Empty stays empty and
/// unrecognized tokens pass through lowercased.
pub fn normalize_boolean(value: &str) -> String {
    let token = normalize_whitespace(value).to_lowercase();
    if TRUTHY_TOKENS.contains(&token.as_str()) {
        TRUE_VALUE.to_string()
    } else if FALSY_TOKENS.contains(&token.as_str()) {
        FALSE_VALUE.to_string()
    } else {
        token
    }
}
