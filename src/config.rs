//! Process-wide logger configuration
//!
//! The minimum severity and the output sink are read on every emission and
//! changed rarely, so they live behind a single `RwLock`. Poisoning is
//! recovered: a panic in one writer must not silence logging everywhere.
//!
//! Defaults: every severity is emitted, output goes to stderr.

use crate::error::{ChainlogError, Result};
use crate::severity::Severity;
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;
use std::sync::{PoisonError, RwLock};

/// Environment variable holding the minimum severity
pub const LEVEL_ENV: &str = "CHAINLOG_LEVEL";

/// Environment variable holding the output sink
pub const OUTPUT_ENV: &str = "CHAINLOG_OUTPUT";

/// Where emitted lines are written
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "String")]
pub enum Output {
    /// Standard error stream
    #[default]
    Stderr,
    /// Standard output stream
    Stdout,
    /// In-memory capture buffer, see [`crate::sink::captured_output`]
    Memory,
    /// Dropped
    Discard,
}

impl FromStr for Output {
    type Err = ChainlogError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "stderr" => Ok(Self::Stderr),
            "stdout" => Ok(Self::Stdout),
            "memory" => Ok(Self::Memory),
            "discard" => Ok(Self::Discard),
            _ => Err(ChainlogError::InvalidOutput(s.to_string())),
        }
    }
}

impl TryFrom<String> for Output {
    type Error = ChainlogError;

    fn try_from(s: String) -> std::result::Result<Self, Self::Error> {
        s.parse()
    }
}

impl fmt::Display for Output {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Stderr => "stderr",
            Self::Stdout => "stdout",
            Self::Memory => "memory",
            Self::Discard => "discard",
        })
    }
}

/// Snapshot of the logger configuration
///
/// # Example
///
/// ```
/// use chainlog::config::{Config, Output};
/// use chainlog::Severity;
///
/// let config = Config::from_toml_str("level = \"warn\"\noutput = \"stdout\"").unwrap();
/// assert_eq!(config.level, Severity::Warn);
/// assert_eq!(config.output, Output::Stdout);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Entries below this severity are not emitted
    #[serde(deserialize_with = "deserialize_severity")]
    pub level: Severity,
    pub output: Output,
}

// TOML users write `level = "warn"`, the wire format uses integer codes.
fn deserialize_severity<'de, D>(deserializer: D) -> std::result::Result<Severity, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Name(String),
        Code(u8),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Name(name) => name.parse().map_err(serde::de::Error::custom),
        Raw::Code(code) => Severity::try_from(code).map_err(serde::de::Error::custom),
    }
}

impl Config {
    pub const fn new(level: Severity, output: Output) -> Self {
        Self { level, output }
    }

    /// Parse a TOML document with optional `level` and `output` keys
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| ChainlogError::Config(e.to_string()))
    }

    /// Read `CHAINLOG_LEVEL` / `CHAINLOG_OUTPUT`, unset variables keep defaults
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();
        if let Some(level) = lookup(LEVEL_ENV) {
            config.level = level.parse()?;
        }
        if let Some(output) = lookup(OUTPUT_ENV) {
            config.output = output.parse()?;
        }
        Ok(config)
    }

    /// Whether an entry of this severity passes the threshold
    pub fn allows(&self, severity: Severity) -> bool {
        severity >= self.level
    }
}

static CONFIG: RwLock<Config> = RwLock::new(Config::new(Severity::Debug, Output::Stderr));

/// Current configuration snapshot
pub fn current() -> Config {
    *CONFIG.read().unwrap_or_else(PoisonError::into_inner)
}

/// Replace the whole configuration
pub fn apply(config: Config) {
    *CONFIG.write().unwrap_or_else(PoisonError::into_inner) = config;
    tracing::debug!(level = %config.level, output = %config.output, "logger configuration applied");
}

/// Set the minimum severity that will be emitted
pub fn set_level(level: Severity) {
    CONFIG.write().unwrap_or_else(PoisonError::into_inner).level = level;
}

/// Set where emitted lines are written
pub fn set_output(output: Output) {
    CONFIG.write().unwrap_or_else(PoisonError::into_inner).output = output;
}

pub fn level() -> Severity {
    current().level
}

pub fn output() -> Output {
    current().output
}

/// Sink for a record at `severity`, `None` when below the threshold
///
/// Level and sink come from one read of the configuration.
pub(crate) fn should_emit(severity: Severity) -> Option<Output> {
    let config = current();
    config.allows(severity).then_some(config.output)
}
