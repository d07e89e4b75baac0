//! Chainlog - structured JSON logging with error-chain correlation
//!
//! Every emission writes one JSON line. Entries built from an error that is
//! itself a previously emitted entry share its correlation id and omit its
//! error text, so a failure logged at each level of the call stack can be
//! rebuilt offline into one ordered trace with [`TraceParser`].

pub mod caller;
pub mod cli;
pub mod clock;
pub mod config;
mod emit;
pub mod entry;
pub mod error;
pub mod parser;
pub mod record;
pub mod severity;
pub mod sink;
pub mod text_output;

pub use config::{set_level, set_output, Output};
pub use entry::{BoxError, LogEntry, Origin};
pub use error::{ChainlogError, Result};
pub use parser::{ParsedErrorTrace, ParsedLogs, TraceParser};
pub use record::OutputRecord;
pub use severity::Severity;
