//! Error types for configuration loading.
//!
//! Responsibilities:
//! - Define error variants for every pipeline stage failure.
//! - Carry enough context (paths, variable names, violated rules) for
//!   callers to react programmatically, not just log.
//!
//! Does NOT handle:
//! - Recovery or retries; every stage is fail-fast and the first error is
//!   returned verbatim (see load.rs).
//!
//! Invariants:
//! - Validation failures aggregate every violated field so callers can
//!   display all problems in a single response.
//! - No variant terminates the process; all failures are ordinary values.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during a configuration load.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A configuration file could not be read. Includes the not-found case.
    #[error("failed to read configuration file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The home directory could not be determined for a reference that
    /// requires it (leading `~`).
    #[error("unable to determine home directory: {0}")]
    HomeDirUnavailable(String),

    /// The configuration file exists but its payload is malformed, or a
    /// supplied value does not fit the field's type.
    #[error("failed to parse configuration file {file}: {message}")]
    Decode { file: String, message: String },

    /// An environment variable is set but cannot be parsed into the bound
    /// field's type.
    #[error("invalid value for {var}: {message}")]
    EnvOverlay { var: String, message: String },

    /// One or more field values violate their declared rules.
    #[error("configuration failed validation: {}", format_violations(.violations))]
    Validation { violations: Vec<Violation> },
}

/// A single violated validation rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// Dotted path to the field, e.g. `server.port`.
    pub field: String,
    /// The violated rule token, e.g. `gt=0`.
    pub rule: String,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.field, self.rule)
    }
}

fn format_violations(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(Violation::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
