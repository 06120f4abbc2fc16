//! Format dispatch and field application for configuration files.
//!
//! Responsibilities:
//! - Pick the parser from the file reference's suffix (`.json` → JSON,
//!   `.yaml`/`.yml` → YAML).
//! - Apply the parsed document onto the record's bindings, key by key.
//!
//! Does NOT handle:
//! - Locating or reading the file (see file.rs).
//! - Environment overlay or validation (see env.rs, validate.rs).
//!
//! Invariants:
//! - Any other suffix is a silent pass-through: the bytes were read but the
//!   record is left untouched and the load continues.
//! - Only keys present in the payload touch the record; absent keys and
//!   explicit nulls leave the pre-decode value in place.
//! - The document must be a mapping at the top level.

use serde_json::Value;

use super::error::ConfigError;
use crate::record::{Record, Target};

/// Decode file bytes onto the record, dispatching on the reference suffix.
pub(crate) fn apply(
    record: &mut dyn Record,
    reference: &str,
    bytes: &[u8],
) -> Result<(), ConfigError> {
    let document = if reference.ends_with(".json") {
        serde_json::from_slice::<Value>(bytes).map_err(|e| decode_error(reference, e))?
    } else if reference.ends_with(".yaml") || reference.ends_with(".yml") {
        serde_yaml::from_slice::<Value>(bytes).map_err(|e| decode_error(reference, e))?
    } else {
        tracing::debug!(file = reference, "unrecognized suffix, leaving record untouched");
        return Ok(());
    };

    let Value::Object(mapping) = document else {
        return Err(ConfigError::Decode {
            file: reference.to_string(),
            message: "expected a mapping at the top level".to_string(),
        });
    };

    apply_mapping(record, reference, &mapping)
}

fn apply_mapping(
    record: &mut dyn Record,
    reference: &str,
    mapping: &serde_json::Map<String, Value>,
) -> Result<(), ConfigError> {
    for binding in record.bindings() {
        let Some(value) = mapping.get(binding.key) else {
            continue;
        };
        if value.is_null() {
            continue;
        }
        match binding.target {
            Target::Value(field) => {
                field.set_decoded(value).map_err(|e| ConfigError::Decode {
                    file: reference.to_string(),
                    message: format!("key `{}`: {e}", binding.key),
                })?;
            }
            Target::Record(nested) => {
                let Value::Object(sub) = value else {
                    return Err(ConfigError::Decode {
                        file: reference.to_string(),
                        message: format!("key `{}`: expected a mapping", binding.key),
                    });
                };
                apply_mapping(nested, reference, sub)?;
            }
        }
    }
    Ok(())
}

fn decode_error(reference: &str, error: impl std::fmt::Display) -> ConfigError {
    ConfigError::Decode {
        file: reference.to_string(),
        message: error.to_string(),
    }
}
