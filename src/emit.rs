//! Emission pipeline
//!
//! `LogEntry::log` filters by severity, skips error entries that carry no
//! error, builds the [`OutputRecord`] and writes exactly one line to the
//! configured sink. Building the record is pure; the sink write is the only
//! side effect.

use crate::caller::{self, CallerLocation};
use crate::clock;
use crate::config;
use crate::entry::{find_entry, Args, LogEntry, Origin};
use crate::error::{self, ChainlogError};
use crate::record::OutputRecord;
use crate::sink;
use std::panic::Location;

impl LogEntry {
    /// Emit this entry and hand it back as an error value
    ///
    /// Nothing is written when the severity is below the configured level or
    /// when an error entry has no error to report. The returned entry is
    /// meant to be propagated (`return Err(entry.log())`), not reconfigured.
    ///
    /// ```
    /// use chainlog::{config, sink, LogEntry};
    ///
    /// config::set_output(config::Output::Memory);
    /// sink::clear_captured_output();
    ///
    /// let err = LogEntry::from_error(std::io::Error::other("EOF")).log();
    /// assert_eq!(err.to_string(), "EOF");
    /// assert!(sink::captured_output().contains("\"Error\":\"EOF\""));
    /// ```
    #[track_caller]
    pub fn log(self) -> LogEntry {
        let Some(output) = config::should_emit(self.severity()) else {
            return self;
        };
        if self.origin() == Origin::FromError && self.wrapped_error().is_none() {
            return self;
        }

        let site = Location::caller();
        let caller = self.stack_trace_enabled().then(|| caller::capture(site));
        let line = self
            .to_record(clock::now_timestamp(), caller)
            .and_then(|record| record.to_json_line())
            .unwrap_or_else(|failure| {
                tracing::warn!(
                    correlation_id = %self.correlation_id(),
                    "record could not be encoded, writing fallback: {}",
                    failure
                );
                fallback_line(&failure.to_string())
            });

        sink::write_line(output, &line);
        self
    }

    /// Build the record this entry would emit at `timestamp`
    ///
    /// Fails with [`ChainlogError::UnencodableArgs`] when the attached args
    /// could not be serialized.
    pub fn to_record(
        &self,
        timestamp: String,
        caller: Option<CallerLocation>,
    ) -> error::Result<OutputRecord> {
        let args = match self.raw_args() {
            Args::None => None,
            Args::Value(value) => Some(value.clone()),
            Args::Unencodable(failure) => {
                return Err(ChainlogError::UnencodableArgs(failure.clone()))
            }
        };

        // An entry wrapping another entry repeats nothing: the inner one
        // already reported the root error text when it was logged.
        let error_text = match self.wrapped_error() {
            Some(err) if find_entry(err).is_none() => err.to_string(),
            _ => String::new(),
        };

        let (caller_function, caller_line) = caller
            .map(|c| (c.function, c.line))
            .unwrap_or_default();

        Ok(OutputRecord {
            correlation_id: self.correlation_id().to_string(),
            timestamp,
            error_text,
            args,
            message: self.message().to_string(),
            caller_function,
            caller_line,
            severity: self.severity(),
        })
    }

    /// `Err(self)`, for `return entry.log().into_result()` call sites
    pub fn into_result<T>(self) -> Result<T, LogEntry> {
        Err(self)
    }
}

fn fallback_line(failure: &str) -> String {
    let record = OutputRecord::fallback(failure);
    record.to_json_line().unwrap_or_else(|_| {
        // Only strings and fixed fields remain; serde_json cannot fail here
        // but the line must still be written.
        format!(
            r#"{{"UUID":"{}","Date":"{}","Level":4}}"#,
            record.correlation_id, record.timestamp
        )
    })
}
