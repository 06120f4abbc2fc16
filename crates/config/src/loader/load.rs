//! Load entry points and stage sequencing.
//!
//! Responsibilities:
//! - Resolve load options, then run the stages in strict order:
//!   file resolution → decode → environment overlay → validation.
//!
//! Does NOT handle:
//! - The stages themselves (file.rs, decode.rs, env.rs, validate.rs).
//!
//! Invariants:
//! - Fail-fast: the first error anywhere aborts the pipeline and is
//!   returned verbatim; no retries, no rollback. On failure the record is
//!   left in whatever partial state the failing stage produced.
//! - Each call is independent and idempotent given identical file contents,
//!   environment, and starting record.

use super::decode;
use super::env;
use super::error::ConfigError;
use super::file;
use super::options::{LoadOption, LoadOptions};
use super::validate;
use crate::record::Record;

/// Load the record using default options: no file, environment overlay and
/// validation only.
pub fn load<T: Record>(record: &mut T) -> Result<(), ConfigError> {
    load_with(record, LoadOptions::default())
}

/// Load the record with a fixed settings value.
pub fn load_with<T: Record>(record: &mut T, options: LoadOptions) -> Result<(), ConfigError> {
    if let Some(reference) = options.file() {
        let bytes = file::read_reference(reference)?;
        decode::apply(record, reference, &bytes)?;
        tracing::debug!(file = reference, "configuration file applied");
    }

    env::overlay(record, options.env_prefix())?;
    validate::run(record)?;
    Ok(())
}

/// Load the record with ordered functional options; later options override
/// earlier ones for the same setting.
///
/// ```no_run
/// use anyconfig::{Record, load_opts, with_file};
///
/// #[derive(Default, Record)]
/// struct MyConfig {
///     #[conf(env = "PORT")]
///     port: u16,
/// }
///
/// let mut conf = MyConfig::default();
/// load_opts(&mut conf, [with_file(".myapp.yaml")])?;
/// # Ok::<(), anyconfig::ConfigError>(())
/// ```
pub fn load_opts<T, I>(record: &mut T, options: I) -> Result<(), ConfigError>
where
    T: Record,
    I: IntoIterator<Item = LoadOption>,
{
    let mut resolved = LoadOptions::default();
    for option in options {
        option.apply(&mut resolved);
    }
    load_with(record, resolved)
}
