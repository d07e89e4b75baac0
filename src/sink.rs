//! Output sinks for serialized records
//!
//! Every emission performs exactly one append. Standard streams are written
//! through a locked handle so concurrent emitters never interleave within a
//! line; the memory buffer is a process-wide `Mutex<String>`.

use crate::config::Output;
use std::io::Write;
use std::sync::{Mutex, PoisonError};

static CAPTURE: Mutex<String> = Mutex::new(String::new());

/// Append one serialized record to `output`
pub fn write_line(output: Output, line: &str) {
    match output {
        Output::Stderr => {
            let mut handle = std::io::stderr().lock();
            if let Err(e) = writeln!(handle, "{}", line) {
                tracing::trace!("stderr write failed: {}", e);
            }
        }
        Output::Stdout => {
            let mut handle = std::io::stdout().lock();
            if let Err(e) = writeln!(handle, "{}", line) {
                tracing::trace!("stdout write failed: {}", e);
            }
        }
        Output::Memory => {
            let mut buffer = CAPTURE.lock().unwrap_or_else(PoisonError::into_inner);
            buffer.push_str(line.trim());
            buffer.push('\n');
        }
        Output::Discard => {}
    }
}

/// Copy of everything written to [`Output::Memory`] so far
pub fn captured_output() -> String {
    CAPTURE
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .clone()
}

/// Drain the memory buffer, returning its contents
pub fn take_captured_output() -> String {
    std::mem::take(&mut *CAPTURE.lock().unwrap_or_else(PoisonError::into_inner))
}

pub fn clear_captured_output() {
    CAPTURE.lock().unwrap_or_else(PoisonError::into_inner).clear();
}
