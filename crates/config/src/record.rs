//! Generic record schema used by the loader.
//!
//! Responsibilities:
//! - Define the `Record` trait: an ordered list of field bindings the loader
//!   walks for decoding, environment overlay, and validation.
//! - Define `Binding`, the per-field schema entry (decode key, environment
//!   annotation, validation rules, or a nested sub-record).
//! - Define `FieldValue`, the primitive-value access used by the engines.
//!
//! Does NOT handle:
//! - Any of the pipeline stages themselves (see the `loader` modules).
//! - Deriving implementations (see the `anyconfig-derive` crate).
//!
//! Invariants:
//! - A binding borrows exactly one field; all bindings of a record are
//!   disjoint borrows produced by a single `bindings()` call.
//! - A field may carry zero or more of the three annotations (decode key,
//!   environment binding, validation rules) independently.

use std::fmt;

/// A configuration record the loader can populate.
///
/// Implementations expose the record's fields as an ordered list of
/// [`Binding`]s. The `#[derive(Record)]` macro generates this from
/// `#[conf(...)]` attributes; hand-written implementations are equally
/// supported:
///
/// ```
/// use anyconfig::{Binding, Record};
///
/// #[derive(Default)]
/// struct MyConfig {
///     port: i64,
///     username: String,
/// }
///
/// impl Record for MyConfig {
///     fn bindings(&mut self) -> Vec<Binding<'_>> {
///         vec![
///             Binding::field("port", &mut self.port).env("PORT").rules("gt=0"),
///             Binding::field("username", &mut self.username).env("USERNAME"),
///         ]
///     }
/// }
/// ```
pub trait Record {
    /// The record's field schema. Each call re-borrows the fields; the
    /// loader walks the returned bindings once per pipeline stage.
    fn bindings(&mut self) -> Vec<Binding<'_>>;
}

/// What a binding points at: a primitive leaf value or a nested record.
pub(crate) enum Target<'a> {
    Value(&'a mut dyn FieldValue),
    Record(&'a mut dyn Record),
}

/// Schema entry for one field of a [`Record`].
///
/// Created with [`Binding::field`] or [`Binding::nested`] and refined with
/// the builder methods. The decode key defaults to the field name.
pub struct Binding<'a> {
    pub(crate) name: &'static str,
    pub(crate) key: &'static str,
    pub(crate) target: Target<'a>,
    pub(crate) env: Option<&'static str>,
    pub(crate) overwrite: bool,
    pub(crate) prefix: Option<&'static str>,
    pub(crate) rules: Option<&'static str>,
}

impl<'a> Binding<'a> {
    /// A leaf binding for a primitive field.
    pub fn field(name: &'static str, value: &'a mut dyn FieldValue) -> Self {
        Self {
            name,
            key: name,
            target: Target::Value(value),
            env: None,
            overwrite: false,
            prefix: None,
            rules: None,
        }
    }

    /// A binding for a nested sub-record.
    pub fn nested(name: &'static str, record: &'a mut dyn Record) -> Self {
        Self {
            name,
            key: name,
            target: Target::Record(record),
            env: None,
            overwrite: false,
            prefix: None,
            rules: None,
        }
    }

    /// Override the decode key used to look the field up in a parsed
    /// JSON/YAML mapping. Defaults to the field name.
    pub fn key(mut self, key: &'static str) -> Self {
        self.key = key;
        self
    }

    /// Bind the field to an environment variable.
    pub fn env(mut self, name: &'static str) -> Self {
        self.env = Some(name);
        self
    }

    /// Let the environment variable replace a value the file already set.
    /// Without this, the variable only fills a field still at its zero value.
    pub fn overwrite(mut self) -> Self {
        self.overwrite = true;
        self
    }

    /// Prefix prepended to the environment-variable names of all bindings
    /// of a nested record.
    pub fn prefix(mut self, prefix: &'static str) -> Self {
        self.prefix = Some(prefix);
        self
    }

    /// Comma-separated validation rule expression, e.g. `"required,alphanum"`
    /// or `"gt=0"`.
    pub fn rules(mut self, rules: &'static str) -> Self {
        self.rules = Some(rules);
        self
    }
}

/// Raised when a raw value cannot be converted into a field's type.
#[derive(Debug)]
pub struct ValueError(String);

impl ValueError {
    pub(crate) fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

impl fmt::Display for ValueError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for ValueError {}

/// Read-only typed view of a field, consumed by the validation engine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Value<'a> {
    Str(&'a str),
    Int(i64),
    Uint(u64),
    Float(f64),
    Bool(bool),
}

impl fmt::Display for Value<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Str(s) => f.write_str(s),
            Value::Int(n) => write!(f, "{n}"),
            Value::Uint(n) => write!(f, "{n}"),
            Value::Float(n) => write!(f, "{n}"),
            Value::Bool(b) => write!(f, "{b}"),
        }
    }
}

/// A primitive value the loader knows how to populate.
///
/// Implemented for `String`, `bool`, the integer widths, and the float
/// widths. Each primitive knows its zero value, parses itself from an
/// environment string, sets itself from a decoded document value, and
/// exposes a typed view for the rule engine.
pub trait FieldValue {
    /// Whether the field still holds its zero value (`0`, `0.0`, `false`,
    /// or the empty string).
    fn is_zero(&self) -> bool;

    /// Parse an environment-variable string into the field.
    fn parse_env(&mut self, raw: &str) -> Result<(), ValueError>;

    /// Set the field from a decoded JSON/YAML value.
    fn set_decoded(&mut self, value: &serde_json::Value) -> Result<(), ValueError>;

    /// Typed read-only view of the current value.
    fn value(&self) -> Value<'_>;
}

macro_rules! impl_field_value_signed {
    ($($ty:ty),* $(,)?) => {$(
        impl FieldValue for $ty {
            fn is_zero(&self) -> bool {
                *self == 0
            }

            fn parse_env(&mut self, raw: &str) -> Result<(), ValueError> {
                *self = raw
                    .parse()
                    .map_err(|_| ValueError::new("must be an integer"))?;
                Ok(())
            }

            fn set_decoded(&mut self, value: &serde_json::Value) -> Result<(), ValueError> {
                let n = value
                    .as_i64()
                    .ok_or_else(|| ValueError::new("expected an integer"))?;
                *self = <$ty>::try_from(n).map_err(|_| ValueError::new("integer out of range"))?;
                Ok(())
            }

            fn value(&self) -> Value<'_> {
                Value::Int(i64::from(*self))
            }
        }
    )*};
}

macro_rules! impl_field_value_unsigned {
    ($($ty:ty),* $(,)?) => {$(
        impl FieldValue for $ty {
            fn is_zero(&self) -> bool {
                *self == 0
            }

            fn parse_env(&mut self, raw: &str) -> Result<(), ValueError> {
                *self = raw
                    .parse()
                    .map_err(|_| ValueError::new("must be a non-negative integer"))?;
                Ok(())
            }

            fn set_decoded(&mut self, value: &serde_json::Value) -> Result<(), ValueError> {
                let n = value
                    .as_u64()
                    .ok_or_else(|| ValueError::new("expected a non-negative integer"))?;
                *self = <$ty>::try_from(n).map_err(|_| ValueError::new("integer out of range"))?;
                Ok(())
            }

            fn value(&self) -> Value<'_> {
                Value::Uint(u64::from(*self))
            }
        }
    )*};
}

macro_rules! impl_field_value_float {
    ($($ty:ty),* $(,)?) => {$(
        impl FieldValue for $ty {
            fn is_zero(&self) -> bool {
                *self == 0.0
            }

            fn parse_env(&mut self, raw: &str) -> Result<(), ValueError> {
                *self = raw
                    .parse()
                    .map_err(|_| ValueError::new("must be a number"))?;
                Ok(())
            }

            fn set_decoded(&mut self, value: &serde_json::Value) -> Result<(), ValueError> {
                let n = value
                    .as_f64()
                    .ok_or_else(|| ValueError::new("expected a number"))?;
                *self = n as $ty;
                Ok(())
            }

            fn value(&self) -> Value<'_> {
                Value::Float(f64::from(*self))
            }
        }
    )*};
}

impl_field_value_signed!(i8, i16, i32, i64);
impl_field_value_unsigned!(u8, u16, u32, u64);
impl_field_value_float!(f32, f64);

impl FieldValue for isize {
    fn is_zero(&self) -> bool {
        *self == 0
    }

    fn parse_env(&mut self, raw: &str) -> Result<(), ValueError> {
        *self = raw
            .parse()
            .map_err(|_| ValueError::new("must be an integer"))?;
        Ok(())
    }

    fn set_decoded(&mut self, value: &serde_json::Value) -> Result<(), ValueError> {
        let n = value
            .as_i64()
            .ok_or_else(|| ValueError::new("expected an integer"))?;
        *self = isize::try_from(n).map_err(|_| ValueError::new("integer out of range"))?;
        Ok(())
    }

    fn value(&self) -> Value<'_> {
        Value::Int(*self as i64)
    }
}

impl FieldValue for usize {
    fn is_zero(&self) -> bool {
        *self == 0
    }

    fn parse_env(&mut self, raw: &str) -> Result<(), ValueError> {
        *self = raw
            .parse()
            .map_err(|_| ValueError::new("must be a non-negative integer"))?;
        Ok(())
    }

    fn set_decoded(&mut self, value: &serde_json::Value) -> Result<(), ValueError> {
        let n = value
            .as_u64()
            .ok_or_else(|| ValueError::new("expected a non-negative integer"))?;
        *self = usize::try_from(n).map_err(|_| ValueError::new("integer out of range"))?;
        Ok(())
    }

    fn value(&self) -> Value<'_> {
        Value::Uint(*self as u64)
    }
}

impl FieldValue for bool {
    fn is_zero(&self) -> bool {
        !*self
    }

    fn parse_env(&mut self, raw: &str) -> Result<(), ValueError> {
        *self = raw
            .parse()
            .map_err(|_| ValueError::new("must be true or false"))?;
        Ok(())
    }

    fn set_decoded(&mut self, value: &serde_json::Value) -> Result<(), ValueError> {
        *self = value
            .as_bool()
            .ok_or_else(|| ValueError::new("expected a boolean"))?;
        Ok(())
    }

    fn value(&self) -> Value<'_> {
        Value::Bool(*self)
    }
}

impl FieldValue for String {
    fn is_zero(&self) -> bool {
        self.is_empty()
    }

    fn parse_env(&mut self, raw: &str) -> Result<(), ValueError> {
        *self = raw.to_string();
        Ok(())
    }

    fn set_decoded(&mut self, value: &serde_json::Value) -> Result<(), ValueError> {
        *self = value
            .as_str()
            .ok_or_else(|| ValueError::new("expected a string"))?
            .to_string();
        Ok(())
    }

    fn value(&self) -> Value<'_> {
        Value::Str(self)
    }
}
