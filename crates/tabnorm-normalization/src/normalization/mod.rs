//! Field normalizers.
//!
//! Each normalizer maps one raw cell to its canonical text form:
//! - **whitespace**: trim leading and trailing whitespace
//! - **date**: day/month/year variants to `YYYY-MM-DD`
//! - **boolean**: Spanish and English tokens to `true` / `false`
//! - **version**: empty values default to `V1`
//!
//! All four are total: unrecognized input is returned trimmed, never an error.

pub mod boolean;
pub mod date;
pub mod version;
pub mod whitespace;

pub use boolean::{FALSE_VALUE, FALSY_TOKENS, TRUE_VALUE, TRUTHY_TOKENS, normalize_boolean};
pub use date::{DATE_PATTERNS, DatePattern, format_iso8601_date, normalize_date, parse_date};
pub use version::{DEFAULT_VERSION, normalize_version};
pub use whitespace::normalize_whitespace;
