//! Validation rule engine.
//!
//! Responsibilities:
//! - Evaluate each binding's comma-separated rule expression against the
//!   populated record, recursing into nested records with dotted paths.
//! - Aggregate every violation into a single `Validation` error.
//!
//! Does NOT handle:
//! - Populating values; validation runs last and only reads.
//!
//! Invariants:
//! - Numeric comparison rules (`gt`, `gte`, `lt`, `lte`) compare numbers
//!   numerically and strings by character count; on booleans they are
//!   violations.
//! - Unknown or malformed rule tokens are reported as violations of that
//!   token rather than panicking.

use super::error::{ConfigError, Violation};
use crate::record::{Record, Target, Value};

/// Validate the record; `Ok(())` means every declared rule passed.
pub(crate) fn run(record: &mut dyn Record) -> Result<(), ConfigError> {
    let mut violations = Vec::new();
    collect(record, "", &mut violations);
    if violations.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::Validation { violations })
    }
}

fn collect(record: &mut dyn Record, path: &str, violations: &mut Vec<Violation>) {
    for binding in record.bindings() {
        match binding.target {
            Target::Value(field) => {
                let Some(rules) = binding.rules else {
                    continue;
                };
                let value = field.value();
                let is_zero = field.is_zero();
                for rule in rules.split(',').map(str::trim).filter(|r| !r.is_empty()) {
                    if !passes(rule, &value, is_zero) {
                        violations.push(Violation {
                            field: format!("{path}{}", binding.name),
                            rule: rule.to_string(),
                        });
                    }
                }
            }
            Target::Record(nested) => {
                let nested_path = format!("{path}{}.", binding.name);
                collect(nested, &nested_path, violations);
            }
        }
    }
}

fn passes(rule: &str, value: &Value<'_>, is_zero: bool) -> bool {
    let (name, param) = match rule.split_once('=') {
        Some((name, param)) => (name, Some(param)),
        None => (rule, None),
    };

    match (name, param) {
        ("required", None) => !is_zero,
        ("alphanum", None) => match value {
            Value::Str(s) => !s.is_empty() && s.chars().all(|c| c.is_ascii_alphanumeric()),
            _ => false,
        },
        ("hostname", None) => match value {
            Value::Str(s) => is_hostname(s),
            _ => false,
        },
        ("oneof", Some(param)) => {
            let rendered = value.to_string();
            param.split_whitespace().any(|option| option == rendered)
        }
        ("gt" | "gte" | "lt" | "lte", Some(param)) => {
            let Ok(bound) = param.parse::<f64>() else {
                return false;
            };
            let Some(measured) = measure(value) else {
                return false;
            };
            match name {
                "gt" => measured > bound,
                "gte" => measured >= bound,
                "lt" => measured < bound,
                _ => measured <= bound,
            }
        }
        _ => false,
    }
}

/// The magnitude a comparison rule applies to: the numeric value for
/// numbers, the character count for strings.
fn measure(value: &Value<'_>) -> Option<f64> {
    match value {
        Value::Int(n) => Some(*n as f64),
        Value::Uint(n) => Some(*n as f64),
        Value::Float(n) => Some(*n),
        Value::Str(s) => Some(s.chars().count() as f64),
        Value::Bool(_) => None,
    }
}

/// RFC 952-style hostname check: dot-separated labels of letters, digits,
/// and hyphens, no label empty, longer than 63 bytes, or hyphen-edged.
fn is_hostname(s: &str) -> bool {
    if s.is_empty() || s.len() > 253 {
        return false;
    }
    s.split('.').all(|label| {
        !label.is_empty()
            && label.len() <= 63
            && !label.starts_with('-')
            && !label.ends_with('-')
            && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
    })
}
