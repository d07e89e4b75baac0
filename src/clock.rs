//! Timestamps and correlation identifiers
//!
//! Records carry UTC wall-clock time as `YYYY-MM-DD HH:MM:SS.ffffff` and a
//! random v4 UUID as their correlation id.

use chrono::{NaiveDateTime, Utc};
use uuid::Uuid;

/// chrono format string for the `Date` field
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";

/// Lenient variant used for parsing (any number of fractional digits)
const PARSE_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";

/// Current UTC time in wire format
pub fn now_timestamp() -> String {
    format_timestamp(Utc::now().naive_utc())
}

/// Format a UTC instant in wire format
pub fn format_timestamp(at: NaiveDateTime) -> String {
    at.format(TIMESTAMP_FORMAT).to_string()
}

/// Parse a wire-format timestamp, `None` if it does not match
pub fn parse_timestamp(s: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(s.trim(), PARSE_FORMAT).ok()
}

/// Fresh globally-unique correlation id
pub fn new_correlation_id() -> String {
    Uuid::new_v4().to_string()
}
