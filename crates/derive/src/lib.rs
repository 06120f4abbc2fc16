//! Procedural macros for the anyconfig loader.
//!
//! This crate provides:
//!
//! - `#[derive(Record)]` - Generates the field-binding schema the loader
//!   walks for decoding, environment overlay, and validation.
//!
//! # Record Derive Macro
//!
//! ```rust,ignore
//! use anyconfig::Record;
//!
//! #[derive(Default, Record)]
//! struct MyConfig {
//!     #[conf(env = "PORT", rule = "gt=0")]
//!     port: u16,
//!     #[conf(key = "user", env = "USERNAME", overwrite, rule = "required,alphanum")]
//!     username: String,
//!     #[conf(nested, prefix = "SERVER_")]
//!     server: ServerConfig,
//! }
//! ```

mod record;

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

/// Derives the `Record` implementation for a struct with named fields.
///
/// # Attributes
///
/// Field-level `#[conf(...)]` keys:
///
/// - `key = "..."` - Decode key in JSON/YAML mappings (default: field name)
/// - `env = "NAME"` - Bind the field to an environment variable
/// - `overwrite` - Let the variable replace a value the file already set
///   (without it, the variable only fills a field still at its zero value)
/// - `rule = "..."` - Comma-separated validation rules, e.g. `"gt=0"`
/// - `nested` - The field is a sub-record implementing `Record`
/// - `prefix = "..."` - Prefix for all environment variables of a `nested`
///   field's sub-record
#[proc_macro_derive(Record, attributes(conf))]
pub fn derive_record(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    match record::derive_record(&input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}
