//! Property-based tests for the validation rule engine.
//!
//! These tests drive validation through the public load path with records
//! populated directly (no file, no environment bindings), using randomly
//! generated values to catch edge cases the unit tests miss.
//!
//! Test coverage:
//! - Comparison rules: outcome matches the numeric predicate for any value
//! - alphanum: accepts exactly the non-empty ASCII-alphanumeric strings
//! - oneof: accepts exactly the listed options
//! - Loading never mutates a record without env annotations

use proptest::prelude::*;

use anyconfig::{ConfigError, Record, load};

#[derive(Debug, Default, PartialEq, Record)]
struct PortRec {
    #[conf(rule = "gte=0")]
    port: i64,
}

#[derive(Debug, Default, PartialEq, Record)]
struct NameRec {
    #[conf(rule = "alphanum")]
    name: String,
}

#[derive(Debug, Default, PartialEq, Record)]
struct ModeRec {
    #[conf(rule = "oneof=prod staging dev")]
    mode: String,
}

fn violated(result: Result<(), ConfigError>) -> bool {
    match result {
        Ok(()) => false,
        Err(ConfigError::Validation { .. }) => true,
        Err(other) => panic!("unexpected error kind: {other:?}"),
    }
}

proptest! {
    #[test]
    fn gte_zero_matches_the_numeric_predicate(port in any::<i64>()) {
        let mut rec = PortRec { port };
        prop_assert_eq!(violated(load(&mut rec)), port < 0);
        // Validation only reads; the value must survive the load.
        prop_assert_eq!(rec.port, port);
    }

    #[test]
    fn alphanum_accepts_exactly_ascii_alphanumerics(name in "[ -~]{0,12}") {
        let expected_ok = !name.is_empty() && name.chars().all(|c| c.is_ascii_alphanumeric());
        let mut rec = NameRec { name };
        prop_assert_eq!(violated(load(&mut rec)), !expected_ok);
    }

    #[test]
    fn oneof_accepts_exactly_the_listed_options(
        mode in prop_oneof![
            Just("prod".to_string()),
            Just("staging".to_string()),
            Just("dev".to_string()),
            "[a-z]{1,8}",
        ]
    ) {
        let expected_ok = matches!(mode.as_str(), "prod" | "staging" | "dev");
        let mut rec = ModeRec { mode };
        prop_assert_eq!(violated(load(&mut rec)), !expected_ok);
    }
}
