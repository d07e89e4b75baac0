//! Wire record: one JSON object per emitted line
//!
//! ```text
//! {"UUID":"..","Date":"2025-06-25 01:26:02.408736","Error":"EOF","Args":[..],
//!  "Msg":"..","Function":"app::conn::handle","Line":276,"Level":3}
//! ```
//!
//! Empty strings, a zero line, the Debug level and absent args are omitted
//! when encoding. Decoding defaults every missing field and ignores unknown
//! keys, so records written by older or newer emitters still parse.

use crate::clock;
use crate::error::Result;
use crate::severity::Severity;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// One emitted log line
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputRecord {
    /// Correlation id shared by every record of one chain
    #[serde(rename = "UUID", skip_serializing_if = "String::is_empty")]
    pub correlation_id: String,

    /// UTC emission time, see [`clock::TIMESTAMP_FORMAT`]
    #[serde(rename = "Date", skip_serializing_if = "String::is_empty")]
    pub timestamp: String,

    /// Rendered text of the wrapped root error
    #[serde(rename = "Error", skip_serializing_if = "String::is_empty")]
    pub error_text: String,

    /// Structured payload attached by the caller
    #[serde(rename = "Args", skip_serializing_if = "Option::is_none")]
    pub args: Option<serde_json::Value>,

    #[serde(rename = "Msg", skip_serializing_if = "String::is_empty")]
    pub message: String,

    /// Function that emitted the record (stack capture only)
    #[serde(rename = "Function", skip_serializing_if = "String::is_empty")]
    pub caller_function: String,

    /// Source line that emitted the record (stack capture only)
    #[serde(rename = "Line", skip_serializing_if = "is_zero")]
    pub caller_line: u32,

    #[serde(rename = "Level", skip_serializing_if = "is_debug")]
    pub severity: Severity,
}

fn is_zero(line: &u32) -> bool {
    *line == 0
}

fn is_debug(severity: &Severity) -> bool {
    *severity == Severity::Debug
}

impl OutputRecord {
    /// Minimal record written in place of one that could not be encoded
    ///
    /// Carries a fresh correlation id so it never merges into the chain whose
    /// record failed.
    pub fn fallback(failure_text: impl Into<String>) -> Self {
        Self {
            correlation_id: clock::new_correlation_id(),
            timestamp: clock::now_timestamp(),
            error_text: failure_text.into(),
            severity: Severity::Fatal,
            ..Self::default()
        }
    }

    /// Encode as a single JSON line (no trailing newline)
    pub fn to_json_line(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Decode one line, `None` for blank, partial or non-object input
    pub fn from_json_line(line: &str) -> Option<Self> {
        let line = line.trim();
        // Derived struct decoding also accepts sequences; a record is an object
        if !line.starts_with('{') {
            return None;
        }
        serde_json::from_str(line).ok()
    }

    /// Parsed `Date`, `None` when missing or malformed
    pub fn parsed_timestamp(&self) -> Option<NaiveDateTime> {
        clock::parse_timestamp(&self.timestamp)
    }

    /// Whether this record belongs to a chain
    pub fn is_correlated(&self) -> bool {
        !self.correlation_id.is_empty()
    }
}
