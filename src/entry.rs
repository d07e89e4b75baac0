//! Log entries and error-chain correlation
//!
//! A [`LogEntry`] is built at a call site, emitted once with
//! [`LogEntry::log`], and then travels up the stack as an ordinary
//! `std::error::Error`. Each caller that wraps it in a new entry inherits its
//! correlation id, so the N records written while one failure propagates can
//! later be regrouped into a single trace by [`crate::parser::TraceParser`].
//!
//! ```
//! use chainlog::LogEntry;
//!
//! fn read_config() -> Result<String, LogEntry> {
//!     std::fs::read_to_string("/definitely/missing.toml")
//!         .map_err(|e| LogEntry::from_error(e).with_message("reading config"))
//! }
//!
//! fn start() -> Result<(), LogEntry> {
//!     read_config().map_err(|e| LogEntry::from_error(e).with_message("startup"))?;
//!     Ok(())
//! }
//!
//! let root = read_config().unwrap_err();
//! let root_id = root.correlation_id().to_string();
//! let wrapped = LogEntry::from_error(root);
//! assert_eq!(wrapped.correlation_id(), root_id);
//! assert!(start().is_err());
//! ```

use crate::clock;
use crate::severity::Severity;
use serde::Serialize;
use std::error::Error;
use std::fmt;

/// Boxed error carried by an entry
pub type BoxError = Box<dyn Error + Send + Sync + 'static>;

/// How an entry was constructed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    /// Built around an error; emitting without one is a no-op
    FromError,
    /// Built around a message
    FromMessage,
}

/// Structured payload attached to an entry
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) enum Args {
    #[default]
    None,
    Value(serde_json::Value),
    /// Encoder failure text, surfaced as a fallback record at emission
    Unencodable(String),
}

/// One log emission under construction
///
/// Fluent setters consume and return the entry:
///
/// ```
/// use chainlog::{LogEntry, Severity};
///
/// let entry = LogEntry::from_message("cache warmed")
///     .with_args(serde_json::json!({"keys": 1204}))
///     .warn();
/// assert_eq!(entry.severity(), Severity::Warn);
/// assert_eq!(entry.message(), "cache warmed");
/// ```
#[derive(Debug)]
pub struct LogEntry {
    correlation_id: String,
    message: String,
    args: Args,
    severity: Severity,
    wrapped: Option<BoxError>,
    origin: Origin,
    stack_trace: bool,
}

impl LogEntry {
    /// Empty message entry with a fresh correlation id
    pub fn new() -> Self {
        Self {
            correlation_id: clock::new_correlation_id(),
            message: String::new(),
            args: Args::None,
            severity: Severity::Info,
            wrapped: None,
            origin: Origin::FromMessage,
            stack_trace: false,
        }
    }

    /// Informational entry carrying `msg`
    pub fn from_message(msg: impl Into<String>) -> Self {
        Self::new().with_message(msg)
    }

    /// Error entry wrapping `err`
    ///
    /// If `err` is, or wraps, a previously built entry the new entry joins its
    /// chain (same correlation id); otherwise it starts a new chain. Caller
    /// capture is enabled.
    pub fn from_error<E>(err: E) -> Self
    where
        E: Into<BoxError>,
    {
        Self::from_optional_error(Some(err))
    }

    /// Error entry for a possibly absent cause
    ///
    /// With `None` the entry wraps nothing and [`LogEntry::log`] will not write
    /// anything for it.
    pub fn from_optional_error<E>(err: Option<E>) -> Self
    where
        E: Into<BoxError>,
    {
        let mut entry = Self::new();
        entry.origin = Origin::FromError;
        entry.severity = Severity::Error;

        let Some(err) = err else {
            return entry;
        };
        let err: BoxError = err.into();

        if let Some(prior) = find_entry(&*err) {
            entry.correlation_id = prior.correlation_id.clone();
        }
        entry.wrapped = Some(err);
        entry.stack_trace = true;
        entry
    }

    /// Set or replace the message
    pub fn with_message(mut self, msg: impl Into<String>) -> Self {
        self.message = msg.into();
        self
    }

    /// Attach a structured payload, serialized verbatim under `Args`
    pub fn with_args<T: Serialize>(mut self, args: T) -> Self {
        self.args = match serde_json::to_value(args) {
            Ok(value) => Args::Value(value),
            Err(e) => Args::Unencodable(e.to_string()),
        };
        self
    }

    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    pub fn debug(self) -> Self {
        self.with_severity(Severity::Debug)
    }

    pub fn info(self) -> Self {
        self.with_severity(Severity::Info)
    }

    pub fn warn(self) -> Self {
        self.with_severity(Severity::Warn)
    }

    pub fn error(self) -> Self {
        self.with_severity(Severity::Error)
    }

    pub fn fatal(self) -> Self {
        self.with_severity(Severity::Fatal)
    }

    /// Record the emitting function and line even for message entries
    pub fn with_stack_trace(mut self) -> Self {
        self.stack_trace = true;
        self
    }

    /// Use an externally supplied correlation id (e.g. from another service)
    ///
    /// Empty ids are ignored so every entry keeps a usable id.
    pub fn with_correlation_id(mut self, id: impl Into<String>) -> Self {
        let id = id.into();
        if !id.is_empty() {
            self.correlation_id = id;
        }
        self
    }

    pub fn correlation_id(&self) -> &str {
        &self.correlation_id
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Attached payload, `None` if absent or unencodable
    pub fn args(&self) -> Option<&serde_json::Value> {
        match &self.args {
            Args::Value(value) => Some(value),
            _ => None,
        }
    }

    pub(crate) fn raw_args(&self) -> &Args {
        &self.args
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn origin(&self) -> Origin {
        self.origin
    }

    pub fn stack_trace_enabled(&self) -> bool {
        self.stack_trace
    }

    /// The wrapped cause, if any
    pub fn wrapped_error(&self) -> Option<&(dyn Error + Send + Sync + 'static)> {
        self.wrapped.as_deref()
    }

    /// This entry followed by every error below it in the `source()` chain
    pub fn chain(&self) -> Chain<'_> {
        Chain {
            next: Some(self as &(dyn Error + 'static)),
        }
    }

    /// Whether any link of the chain is an `E`
    ///
    /// Walks arbitrarily deep, through entries and foreign wrappers alike, so
    /// sentinel errors stay detectable after any number of `from_error` wraps.
    pub fn has_cause<E: Error + 'static>(&self) -> bool {
        self.chain().any(|err| err.is::<E>())
    }
}

impl Default for LogEntry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.wrapped {
            Some(err) => fmt::Display::fmt(err, f),
            None => Ok(()),
        }
    }
}

impl Error for LogEntry {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.wrapped
            .as_deref()
            .map(|err| err as &(dyn Error + 'static))
    }
}

/// Iterator over an error and its sources
pub struct Chain<'a> {
    next: Option<&'a (dyn Error + 'static)>,
}

impl<'a> Iterator for Chain<'a> {
    type Item = &'a (dyn Error + 'static);

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = current.source();
        Some(current)
    }
}

/// First [`LogEntry`] found in `err`'s `source()` chain, `err` included
pub fn find_entry<'a>(err: &'a (dyn Error + 'static)) -> Option<&'a LogEntry> {
    let mut current = Some(err);
    while let Some(err) = current {
        if let Some(entry) = err.downcast_ref::<LogEntry>() {
            return Some(entry);
        }
        current = err.source();
    }
    None
}
