//! Tests for the configuration load pipeline.
//!
//! Responsibilities:
//! - Test file reference resolution across the three resolution classes.
//! - Test format dispatch, merge-on-decode, and decode failures.
//! - Test environment overlay precedence and prefix composition.
//! - Test validation gating and violation aggregation.
//!
//! Invariants:
//! - Tests use `serial_test` to prevent environment variable pollution.
//! - Tests use `env_lock()` for additional synchronization.
//! - Temporary directories are cleaned up automatically via `tempfile`.
//! - Fixtures implement `Record` by hand; the derive macro is covered by
//!   the integration tests.

use std::sync::Mutex;

use crate::record::{Binding, Record};


/// Returns the global test lock for environment variable isolation.
pub fn env_lock() -> &'static Mutex<()> {
    crate::test_util::global_test_lock()
}

/// Runs `f` with every fixture-bound environment variable unset, so values
/// from the ambient test environment cannot leak into assertions.
pub fn without_fixture_env<R>(f: impl FnOnce() -> R) -> R {
    temp_env::with_vars(
        [
            ("PORT", None::<&str>),
            ("USERNAME", None),
            ("NAME", None),
            ("SERVICE_PORT", None),
            ("SERVICE_USERNAME", None),
        ],
        f,
    )
}

/// Leaf-only fixture mirroring a small service configuration.
#[derive(Debug, Default, PartialEq)]
pub struct ServiceConf {
    pub port: i64,
    pub username: String,
}

impl Record for ServiceConf {
    fn bindings(&mut self) -> Vec<Binding<'_>> {
        vec![
            Binding::field("port", &mut self.port).env("PORT"),
            Binding::field("username", &mut self.username)
                .env("USERNAME")
                .overwrite(),
        ]
    }
}

/// Fixture with validation rules on every field.
#[derive(Debug, Default, PartialEq)]
pub struct ValidatedConf {
    pub port: i64,
    pub username: String,
}

impl Record for ValidatedConf {
    fn bindings(&mut self) -> Vec<Binding<'_>> {
        vec![
            Binding::field("port", &mut self.port).env("PORT").rules("gt=0"),
            Binding::field("username", &mut self.username)
                .env("USERNAME")
                .rules("required,alphanum"),
        ]
    }
}

/// Fixture with a nested sub-record carrying an env prefix.
#[derive(Debug, Default, PartialEq)]
pub struct NestedConf {
    pub name: String,
    pub service: ServiceConf,
}

impl Record for NestedConf {
    fn bindings(&mut self) -> Vec<Binding<'_>> {
        vec![
            Binding::field("name", &mut self.name).env("NAME"),
            Binding::nested("service", &mut self.service).prefix("SERVICE_"),
        ]
    }
}
