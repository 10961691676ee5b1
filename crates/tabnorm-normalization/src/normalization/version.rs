//! Version default substitution.

use super::whitespace::normalize_whitespace;

/// Value assigned to rows with no version.
pub const DEFAULT_VERSION: &str = "V1";

/// Returns the trimmed version, or [`DEFAULT_VERSION`] when empty.
pub fn normalize_version(value: &str) -> String {
    let trimmed = normalize_whitespace(value);
    if trimmed.is_empty() {
        DEFAULT_VERSION.to_string()
    } else {
        trimmed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_when_empty() {
        assert_eq!(normalize_version(""), "V1");
        assert_eq!(normalize_version("   "), "V1");
    }

    #[test]
    fn test_keeps_trimmed_value() {
        assert_eq!(normalize_version("  v2 "), "v2");
        assert_eq!(normalize_version("V3"), "V3");
    }
}
