//! Environment overlay engine.
//!
//! Responsibilities:
//! - Apply environment variables onto the record's bindings, composing the
//!   global prefix with nested-record prefixes.
//! - Provide `env_var_or_none` for reading variables with empty/whitespace
//!   filtering.
//!
//! Does NOT handle:
//! - File decoding (see decode.rs) or validation (see validate.rs).
//! - Mutating the process environment; it is read-only here.
//!
//! Invariants:
//! - A variable bound with `overwrite` replaces any value already present;
//!   without it, the variable only fills a field still at its zero value.
//! - Empty or whitespace-only variables count as unset; values are trimmed.
//! - Prefixes compose outermost-first: global prefix, then each enclosing
//!   nested-record prefix, then the field's variable name.

use super::error::ConfigError;
use crate::record::{Record, Target};

/// Read an environment variable, returning None if unset, empty, or
/// whitespace-only. Returns the trimmed value if present.
pub fn env_var_or_none(key: &str) -> Option<String> {
    std::env::var(key).ok().and_then(|s| {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            None
        } else if trimmed.len() == s.len() {
            Some(s)
        } else {
            Some(trimmed.to_string())
        }
    })
}

/// Overlay environment variables onto the record.
pub(crate) fn overlay(record: &mut dyn Record, prefix: &str) -> Result<(), ConfigError> {
    for binding in record.bindings() {
        match binding.target {
            Target::Value(field) => {
                let Some(name) = binding.env else {
                    continue;
                };
                let var = format!("{prefix}{name}");
                let Some(raw) = env_var_or_none(&var) else {
                    continue;
                };
                if binding.overwrite || field.is_zero() {
                    field.parse_env(&raw).map_err(|e| ConfigError::EnvOverlay {
                        var,
                        message: e.to_string(),
                    })?;
                }
            }
            Target::Record(nested) => {
                let nested_prefix = match binding.prefix {
                    Some(p) => format!("{prefix}{p}"),
                    None => prefix.to_string(),
                };
                overlay(nested, &nested_prefix)?;
            }
        }
    }
    Ok(())
}
