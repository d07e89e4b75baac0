//! Caller capture for emitted records
//!
//! Only the immediate caller of the emitting call is recorded. The emission
//! entry point is `#[track_caller]`, which pins the exact source line; the
//! enclosing function name is recovered by walking the live stack with the
//! `backtrace` crate and picking the first symbol resolved to that line.
//!
//! Binaries built without symbols (e.g. `strip = true`) cannot name the
//! function; the call site's file path is recorded instead.

use std::panic::Location;
use std::path::Path;

/// Function and line that emitted a record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallerLocation {
    pub function: String,
    pub line: u32,
}

/// Resolve the function enclosing `site`
pub fn capture(site: &'static Location<'static>) -> CallerLocation {
    let function = resolve_function(site).unwrap_or_else(|| site.file().to_string());
    CallerLocation {
        function,
        line: site.line(),
    }
}

fn resolve_function(site: &Location<'_>) -> Option<String> {
    let site_file = Path::new(site.file());
    let mut found: Option<String> = None;

    backtrace::trace(|frame| {
        backtrace::resolve_frame(frame, |symbol| {
            if found.is_some() {
                return;
            }
            let (Some(file), Some(line)) = (symbol.filename(), symbol.lineno()) else {
                return;
            };
            if line == site.line() && file.ends_with(site_file) {
                // `{:#}` drops the trailing `::h<hash>` disambiguator
                found = symbol.name().map(|name| format!("{:#}", name));
            }
        });
        found.is_none()
    });

    found
}
