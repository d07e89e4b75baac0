//! Human-readable rendering of reconstructed logs
//!
//! ```text
//! 2025-06-24 18:16:08.835372 info  Sample [A]
//!
//! trace a3a17cc1-8481-4454-bff4-1fcec8398d6c: EOF (2 frames)
//!   2025-06-25 01:26:02.408736 error app::node::handle_connection:276
//!   2025-06-25 01:26:02.408897 fatal app::node::handle_errors:396 connection dropped
//! ```

use crate::parser::{ParsedErrorTrace, ParsedLogs};
use crate::record::OutputRecord;

/// Text formatter for [`ParsedLogs`]
#[derive(Debug, Clone, Copy, Default)]
pub struct TextOutput {
    /// Append each record's `Args` as compact JSON
    pub include_args: bool,
}

impl TextOutput {
    pub fn new(include_args: bool) -> Self {
        Self { include_args }
    }

    /// Render entries first, then one block per trace
    pub fn render(&self, parsed: &ParsedLogs) -> String {
        let mut out = String::new();

        for entry in &parsed.entries {
            out.push_str(&self.format_record(entry));
            out.push('\n');
        }

        for trace in &parsed.traces {
            if !out.is_empty() {
                out.push('\n');
            }
            out.push_str(&Self::format_header(trace));
            out.push('\n');
            for frame in &trace.frames {
                out.push_str("  ");
                out.push_str(&self.format_record(frame));
                out.push('\n');
            }
        }

        out
    }

    fn format_header(trace: &ParsedErrorTrace) -> String {
        let frames = match trace.frames.len() {
            1 => "1 frame".to_string(),
            n => format!("{} frames", n),
        };
        if trace.error.is_empty() {
            format!("trace {} ({})", trace.correlation_id, frames)
        } else {
            format!("trace {}: {} ({})", trace.correlation_id, trace.error, frames)
        }
    }

    fn format_record(&self, record: &OutputRecord) -> String {
        let mut parts: Vec<String> = Vec::with_capacity(5);

        if !record.timestamp.is_empty() {
            parts.push(record.timestamp.clone());
        }
        parts.push(format!("{:<5}", record.severity.name()));

        if !record.caller_function.is_empty() {
            if record.caller_line > 0 {
                parts.push(format!("{}:{}", record.caller_function, record.caller_line));
            } else {
                parts.push(record.caller_function.clone());
            }
        }
        if !record.error_text.is_empty() {
            parts.push(format!("error={}", record.error_text));
        }
        if !record.message.is_empty() {
            parts.push(record.message.clone());
        }
        if self.include_args {
            if let Some(args) = &record.args {
                parts.push(format!("args={}", args));
            }
        }

        parts.join(" ").trim_end().to_string()
    }
}
