//! Layered configuration loading for annotated records.
//!
//! This crate populates a caller-defined configuration record from up to
//! three sources, applied in a fixed precedence order: a JSON or YAML file
//! supplies defaults, environment variables override them (per-field, unless
//! a field opts out), and validation rules gate the final result.
//!
//! ```no_run
//! use anyconfig::{Record, load_opts, with_file};
//!
//! #[derive(Default, Record)]
//! struct MyConfig {
//!     #[conf(env = "PORT", rule = "gt=0")]
//!     port: u16,
//!     #[conf(env = "USERNAME", overwrite, rule = "required,alphanum")]
//!     username: String,
//! }
//!
//! let mut conf = MyConfig::default();
//! load_opts(&mut conf, [with_file(".myapp.yaml")])?;
//! # Ok::<(), anyconfig::ConfigError>(())
//! ```
//!
//! A relative file reference is looked up in the user's home directory
//! first and falls back to the current working directory, so a short name
//! like `.myapp.yaml` resolves the same from a packaged install and a
//! project checkout. References starting with `~` are home-only; references
//! starting with the path separator are read as-is.

mod loader;
pub mod record;

pub use anyconfig_derive::Record;
pub use loader::{
    ConfigError, LoadOption, LoadOptions, Violation, env_var_or_none, load, load_opts, load_with,
    with_env_prefix, with_file,
};
pub use record::{Binding, FieldValue, Record, Value, ValueError};
