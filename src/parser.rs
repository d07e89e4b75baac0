//! Offline trace reconstruction
//!
//! Reads previously emitted lines back and splits them into standalone
//! entries (no correlation id) and traces (one per correlation id). Each
//! trace gets the first error text seen for its id hoisted to the trace, and
//! its frames sorted oldest first.
//!
//! Malformed lines are skipped, never reported as errors: a log file cut off
//! mid-write must still parse up to the damage.
//!
//! ```
//! use chainlog::TraceParser;
//!
//! let parsed = TraceParser::new()
//!     .add_lines([
//!         r#"{"Msg":"boot","Level":1}"#,
//!         r#"{"UUID":"x","Date":"2025-06-25 01:26:02.408897","Line":396,"Level":4}"#,
//!         r#"{"UUID":"x","Date":"2025-06-25 01:26:02.408736","Error":"EOF","Line":276,"Level":3}"#,
//!         "{\"UUID\":\"x\",\"Da",
//!     ])
//!     .parse();
//!
//! assert_eq!(parsed.entries.len(), 1);
//! let trace = parsed.trace("x").unwrap();
//! assert_eq!(trace.error, "EOF");
//! assert_eq!(trace.frames[0].caller_line, 276);
//! ```

use crate::clock;
use crate::error::{ChainlogError, Result};
use crate::record::OutputRecord;
use chrono::NaiveDateTime;
use serde::Serialize;
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

/// One reconstructed chain
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParsedErrorTrace {
    pub correlation_id: String,
    /// First non-empty error text seen for this id, in input order
    pub error: String,
    /// Records of the chain, oldest first; their own error text is cleared
    pub frames: Vec<OutputRecord>,
}

impl ParsedErrorTrace {
    /// Oldest frame (the chain root when the clock was monotonic)
    pub fn first(&self) -> Option<&OutputRecord> {
        self.frames.first()
    }

    /// Newest frame
    pub fn last(&self) -> Option<&OutputRecord> {
        self.frames.last()
    }
}

/// Result of a parse run
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ParsedLogs {
    /// Records without a correlation id, in input order
    pub entries: Vec<OutputRecord>,
    /// One trace per correlation id; order across traces is not meaningful
    pub traces: Vec<ParsedErrorTrace>,
}

impl ParsedLogs {
    pub fn trace(&self, correlation_id: &str) -> Option<&ParsedErrorTrace> {
        self.traces
            .iter()
            .find(|t| t.correlation_id == correlation_id)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty() && self.traces.is_empty()
    }

    /// Total frames across all traces
    pub fn frame_count(&self) -> usize {
        self.traces.iter().map(|t| t.frames.len()).sum()
    }
}

/// Accumulates raw lines and reconstructs traces from them
#[derive(Debug, Clone, Default)]
pub struct TraceParser {
    lines: Vec<String>,
    after: Option<NaiveDateTime>,
}

impl TraceParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append every line readable from `reader`
    ///
    /// Invalid UTF-8 is replaced rather than rejected. A read error ends
    /// ingestion; lines read before it are kept.
    pub fn add_reader<R: Read>(mut self, reader: R) -> Self {
        let mut reader = BufReader::new(reader);
        let mut buf = Vec::new();
        loop {
            buf.clear();
            match reader.read_until(b'\n', &mut buf) {
                Ok(0) => break,
                Ok(_) => self.lines.push(String::from_utf8_lossy(&buf).into_owned()),
                Err(e) => {
                    tracing::debug!("stopped reading log input: {}", e);
                    break;
                }
            }
        }
        self
    }

    /// Append every line of the file at `path`
    pub fn add_file(self, path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| ChainlogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(self.add_reader(file))
    }

    /// Append the lines of `content`
    pub fn add_string(mut self, content: &str) -> Self {
        self.lines.extend(content.lines().map(str::to_string));
        self
    }

    /// Append pre-split lines
    pub fn add_lines<I, S>(mut self, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.lines.extend(lines.into_iter().map(Into::into));
        self
    }

    /// Keep only records stamped strictly after `threshold`
    ///
    /// Records whose timestamp is missing or malformed are dropped as well.
    pub fn after(mut self, threshold: NaiveDateTime) -> Self {
        self.after = Some(threshold);
        self
    }

    /// [`TraceParser::after`] with a wire-format timestamp
    pub fn after_timestamp(self, threshold: &str) -> Result<Self> {
        let threshold = clock::parse_timestamp(threshold)
            .ok_or_else(|| ChainlogError::InvalidTimestamp(threshold.to_string()))?;
        Ok(self.after(threshold))
    }

    /// Number of raw lines accumulated so far
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Rebuild entries and traces from the accumulated lines
    pub fn parse(&self) -> ParsedLogs {
        let mut parsed = ParsedLogs::default();
        let mut groups: Vec<ParsedErrorTrace> = Vec::new();
        let mut index: HashMap<String, usize> = HashMap::new();
        let mut skipped = 0usize;

        for line in &self.lines {
            if line.trim().is_empty() {
                continue;
            }
            let Some(mut record) = OutputRecord::from_json_line(line) else {
                skipped += 1;
                continue;
            };
            if !self.passes_threshold(&record) {
                continue;
            }

            if !record.is_correlated() {
                parsed.entries.push(record);
                continue;
            }

            let slot = *index
                .entry(record.correlation_id.clone())
                .or_insert_with(|| {
                    groups.push(ParsedErrorTrace {
                        correlation_id: record.correlation_id.clone(),
                        error: String::new(),
                        frames: Vec::new(),
                    });
                    groups.len() - 1
                });
            let group = &mut groups[slot];
            let error_text = std::mem::take(&mut record.error_text);
            if group.error.is_empty() {
                group.error = error_text;
            }
            group.frames.push(record);
        }

        for group in &mut groups {
            sort_frames(&mut group.frames);
        }
        parsed.traces = groups;

        if skipped > 0 {
            tracing::debug!(skipped, "ignored undecodable log lines");
        }
        parsed
    }

    fn passes_threshold(&self, record: &OutputRecord) -> bool {
        match self.after {
            None => true,
            Some(threshold) => record
                .parsed_timestamp()
                .is_some_and(|at| at > threshold),
        }
    }
}

/// Oldest first; stable, so equal timestamps keep input order. Frames whose
/// timestamp does not parse sort before every dated frame.
fn sort_frames(frames: &mut [OutputRecord]) {
    frames.sort_by_cached_key(|frame| frame.parsed_timestamp());
}
