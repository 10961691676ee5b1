//! Multi-format date parsing and `YYYY-MM-DD` formatting.
//!
//! Input is tried against [`DATE_PATTERNS`] in order and the first pattern
//! that parses wins. There is no day/month disambiguation: `01/02/2024` is
//! always 1 February because the day-first pattern is tried first.

use chrono::{Datelike, NaiveDate};

use super::whitespace::normalize_whitespace;

/// Position of the year field within a three-part date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FieldOrder {
    DayMonthYear,
    YearMonthDay,
}

/// One accepted input date layout.
#[derive(Debug, Clone, Copy)]
pub struct DatePattern {
    /// `chrono` format string (e.g. `%d/%m/%Y`).
    pub format: &'static str,
    separator: char,
    order: FieldOrder,
}

/// Accepted layouts, in priority order.
pub const DATE_PATTERNS: [DatePattern; 5] = [
    DatePattern::new("%d/%m/%Y", '/', FieldOrder::DayMonthYear), // 05/03/2024
    DatePattern::new("%d-%m-%Y", '-', FieldOrder::DayMonthYear), // 05-03-2024
    DatePattern::new("%Y-%m-%d", '-', FieldOrder::YearMonthDay), // 2024-03-05
    DatePattern::new("%Y/%m/%d", '/', FieldOrder::YearMonthDay), // 2024/03/05
    DatePattern::new("%d.%m.%Y", '.', FieldOrder::DayMonthYear), // 05.03.2024
];

impl DatePattern {
    const fn new(format: &'static str, separator: char, order: FieldOrder) -> Self {
        Self {
            format,
            separator,
            order,
        }
    }

    /// Parses `value` if it has exactly this layout.
    ///
    /// The year must be four digits in `1..=9999`; day and month may be one
    /// or two digits.
    pub fn parse(&self, value: &str) -> Option<NaiveDate> {
        if !self.has_shape(value) {
            return None;
        }
        NaiveDate::parse_from_str(value, self.format)
            .ok()
            .filter(|date| date.year() >= 1)
    }

    fn has_shape(&self, value: &str) -> bool {
        let parts: Vec<&str> = value.split(self.separator).collect();
        let [first, month, last] = parts.as_slice() else {
            return false;
        };
        let (year, day) = match self.order {
            FieldOrder::DayMonthYear => (last, first),
            FieldOrder::YearMonthDay => (first, last),
        };
        is_digits(year, 4, 4) && is_digits(month, 1, 2) && is_digits(day, 1, 2)
    }
}

fn is_digits(value: &str, min: usize, max: usize) -> bool {
    (min..=max).contains(&value.len()) && value.bytes().all(|b| b.is_ascii_digit())
}

/// Parses a trimmed value against [`DATE_PATTERNS`], first match wins.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    DATE_PATTERNS.iter().find_map(|pattern| pattern.parse(value))
}

/// Formats a date as `YYYY-MM-DD`.
pub fn format_iso8601_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Normalizes a date cell to `YYYY-MM-DD`.
///
/// - Empty (after trim) stays empty
/// - Parseable values are reformatted
/// - Anything else is returned trimmed and otherwise unchanged
pub fn normalize_date(value: &str) -> String {
    let trimmed = normalize_whitespace(value);
    if trimmed.is_empty() {
        return trimmed;
    }
    match parse_date(&trimmed) {
        Some(date) => format_iso8601_date(date),
        None => trimmed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_each_pattern() {
        assert_eq!(normalize_date("05/03/2024"), "2024-03-05");
        assert_eq!(normalize_date("05-03-2024"), "2024-03-05");
        assert_eq!(normalize_date("2024-03-05"), "2024-03-05");
        assert_eq!(normalize_date("2024/03/05"), "2024-03-05");
        assert_eq!(normalize_date("05.03.2024"), "2024-03-05");
    }

    #[test]
    fn test_unpadded_day_and_month() {
        assert_eq!(normalize_date("5/3/2024"), "2024-03-05");
        assert_eq!(normalize_date("2024-3-5"), "2024-03-05");
    }

    #[test]
    fn test_day_first_wins() {
        assert_eq!(normalize_date("01/02/2024"), "2024-02-01");
        // Not a valid day-first date, and no month-first pattern exists.
        assert_eq!(normalize_date("02/13/2024"), "02/13/2024");
    }

    #[test]
    fn test_two_digit_year_is_not_a_date() {
        assert_eq!(normalize_date("05/03/24"), "05/03/24");
    }

    #[test]
    fn test_year_zero_is_not_a_date() {
        assert_eq!(normalize_date("05/03/0000"), "05/03/0000");
        assert_eq!(normalize_date("0000-03-05"), "0000-03-05");
        assert_eq!(normalize_date("05/03/0001"), "0001-03-05");
    }

    #[test]
    fn test_invalid_calendar_date() {
        assert_eq!(normalize_date("31/02/2024"), "31/02/2024");
        assert_eq!(normalize_date("29/02/2024"), "2024-02-29");
    }

    #[test]
    fn test_unparseable_and_empty() {
        assert_eq!(normalize_date("unparseable"), "unparseable");
        assert_eq!(normalize_date("  soon "), "soon");
        assert_eq!(normalize_date(""), "");
        assert_eq!(normalize_date("   "), "");
    }

    #[test]
    fn test_shape_rejects_extra_parts() {
        assert!(parse_date("05/03/2024/1").is_none());
        assert!(parse_date("2024-03-05T10:00").is_none());
    }
}
