//! Whitespace trimming, applied to every cell before any column rule.

/// Removes leading and trailing whitespace.
///
/// Missing cells reach this function as `""` after row reconciliation, so an
/// absent value normalizes to the empty string.
pub fn normalize_whitespace(value: &str) -> String {
    value.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trims_both_ends() {
        assert_eq!(normalize_whitespace("  hello  "), "hello");
        assert_eq!(normalize_whitespace("\thello\n"), "hello");
    }

    #[test]
    fn test_keeps_inner_whitespace() {
        assert_eq!(normalize_whitespace(" a  b "), "a  b");
    }

    #[test]
    fn test_empty_and_blank() {
        assert_eq!(normalize_whitespace(""), "");
        assert_eq!(normalize_whitespace("   "), "");
    }
}
