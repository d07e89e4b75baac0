//! Severity tiers for emitted records
//!
//! Tiers are totally ordered (Debug < Info < Warn < Error < Fatal) and travel
//! on the wire as their integer code under the `Level` key.

use crate::error::ChainlogError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Severity of a log entry
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(into = "u8", try_from = "u8")]
pub enum Severity {
    /// Verbose debugging information
    #[default]
    Debug,
    /// General progress information
    Info,
    /// Non-critical issues that may need attention
    Warn,
    /// Failures affecting normal operation
    Error,
    /// Critical failures, usually followed by termination
    Fatal,
}

impl Severity {
    /// All tiers, lowest first
    pub const ALL: [Severity; 5] = [
        Severity::Debug,
        Severity::Info,
        Severity::Warn,
        Severity::Error,
        Severity::Fatal,
    ];

    /// Integer code used on the wire (Debug=0 .. Fatal=4)
    pub fn as_code(self) -> u8 {
        self as u8
    }

    /// Inverse of [`Severity::as_code`]
    pub fn from_code(code: u8) -> Option<Self> {
        Self::ALL.get(code as usize).copied()
    }

    /// Lowercase name used by `Display` and accepted by `FromStr`
    pub fn name(self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
            Self::Fatal => "fatal",
        }
    }
}

impl From<Severity> for u8 {
    fn from(severity: Severity) -> Self {
        severity.as_code()
    }
}

impl TryFrom<u8> for Severity {
    type Error = ChainlogError;

    fn try_from(code: u8) -> Result<Self, ChainlogError> {
        Severity::from_code(code).ok_or_else(|| ChainlogError::InvalidSeverity(code.to_string()))
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Severity {
    type Err = ChainlogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Ok(code) = trimmed.parse::<u8>() {
            return Severity::try_from(code);
        }
        match trimmed.to_ascii_lowercase().as_str() {
            "debug" => Ok(Self::Debug),
            "info" => Ok(Self::Info),
            "warn" | "warning" => Ok(Self::Warn),
            "error" => Ok(Self::Error),
            "fatal" => Ok(Self::Fatal),
            _ => Err(ChainlogError::InvalidSeverity(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_ordering() {
        assert!(Severity::Debug < Severity::Info);
        assert!(Severity::Info < Severity::Warn);
        assert!(Severity::Warn < Severity::Error);
        assert!(Severity::Error < Severity::Fatal);
    }

    #[test]
    fn test_severity_codes() {
        for (code, severity) in Severity::ALL.iter().enumerate() {
            assert_eq!(severity.as_code() as usize, code);
            assert_eq!(Severity::from_code(code as u8), Some(*severity));
        }
        assert_eq!(Severity::from_code(5), None);
    }

    #[test]
    fn test_severity_default_is_debug() {
        assert_eq!(Severity::default(), Severity::Debug);
    }

    #[test]
    fn test_severity_from_str() {
        assert_eq!("warn".parse::<Severity>().unwrap(), Severity::Warn);
        assert_eq!("WARNING".parse::<Severity>().unwrap(), Severity::Warn);
        assert_eq!(" Fatal ".parse::<Severity>().unwrap(), Severity::Fatal);
        assert_eq!("3".parse::<Severity>().unwrap(), Severity::Error);
        assert!("9".parse::<Severity>().is_err());
        assert!("loud".parse::<Severity>().is_err());
    }

    #[test]
    fn test_severity_serializes_as_integer() {
        assert_eq!(serde_json::to_string(&Severity::Warn).unwrap(), "2");
        let parsed: Severity = serde_json::from_str("4").unwrap();
        assert_eq!(parsed, Severity::Fatal);
        assert!(serde_json::from_str::<Severity>("7").is_err());
        assert!(serde_json::from_str::<Severity>("\"info\"").is_err());
    }

    #[test]
    fn test_severity_display() {
        assert_eq!(Severity::Error.to_string(), "error");
        assert_eq!(format!("{}", Severity::Debug), "debug");
    }
}
