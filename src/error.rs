//! Crate error type
//!
//! The chain builder, the emission pipeline and the trace parser never fail;
//! these errors only come out of configuration parsing, file-backed parser
//! input and the record codec.

use std::path::PathBuf;
use thiserror::Error;

/// Errors produced by configuration, codec and file input
#[derive(Error, Debug)]
pub enum ChainlogError {
    #[error("Invalid severity: {0} (expected debug, info, warn, error, fatal or 0-4)")]
    InvalidSeverity(String),

    #[error("Invalid output: {0} (expected stderr, stdout, memory or discard)")]
    InvalidOutput(String),

    #[error("Invalid timestamp: {0} (expected YYYY-MM-DD HH:MM:SS.ffffff)")]
    InvalidTimestamp(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Args could not be encoded: {0}")]
    UnencodableArgs(String),

    #[error("Failed to encode record: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, ChainlogError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = ChainlogError::InvalidSeverity("loud".to_string());
        assert!(err.to_string().contains("loud"));

        let err = ChainlogError::Io {
            path: PathBuf::from("/missing/app.log"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
        };
        let msg = err.to_string();
        assert!(msg.contains("/missing/app.log"));
        assert!(msg.contains("no such file"));
    }

    #[test]
    fn test_io_error_exposes_source() {
        use std::error::Error;

        let err = ChainlogError::Io {
            path: PathBuf::from("x"),
            source: std::io::Error::other("boom"),
        };
        assert_eq!(err.source().unwrap().to_string(), "boom");
    }
}
