//! Integration tests for the full load pipeline through the public API.
//!
//! These tests exercise the derive macro, the three load entry points, and
//! the precedence contract end to end: file values as defaults, environment
//! variables on top, validation as the final gate.

use std::fs;

use serial_test::serial;
use tempfile::TempDir;

use anyconfig::{ConfigError, LoadOptions, Record, load, load_opts, load_with, with_env_prefix, with_file};

#[derive(Debug, Default, PartialEq, Record)]
struct Server {
    #[conf(env = "PORT", rule = "gte=0")]
    port: i64,
    #[conf(key = "host", env = "USERNAME", rule = "hostname")]
    hostname: String,
}

#[derive(Debug, Default, PartialEq, Record)]
struct Logging {
    #[conf(key = "env", env = "ENV", overwrite, rule = "oneof=prod staging dev")]
    environment: String,
    #[conf(env = "LEVEL", rule = "oneof=debug info warn error")]
    level: String,
}

#[derive(Debug, Default, PartialEq, Record)]
struct AppConfig {
    #[conf(nested, prefix = "SERVER_")]
    server: Server,
    #[conf(nested, prefix = "LOGGING_")]
    logging: Logging,
}

#[derive(Debug, Default, PartialEq, Record)]
struct MyConfig {
    #[conf(env = "PORT")]
    port: i64,
    #[conf(env = "USERNAME")]
    username: String,
}

#[test]
#[serial]
fn environment_only_load() {
    temp_env::with_vars(
        [("PORT", Some("8080")), ("USERNAME", Some("sustainyfacts"))],
        || {
            let mut conf = MyConfig::default();
            load(&mut conf).unwrap();
            assert_eq!(
                conf,
                MyConfig {
                    port: 8080,
                    username: "sustainyfacts".to_string(),
                }
            );
        },
    );
}

#[test]
#[serial]
fn file_and_environment_compose_across_nested_records() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.yaml");
    fs::write(
        &path,
        "# This is an example yaml config file\nserver:\n  host: example.com\nlogging:\n  env: dev\n  level: debug",
    )
    .unwrap();
    let file = path.to_str().unwrap().to_string();

    temp_env::with_vars(
        [
            ("LOGGING_ENV", Some("prod")),
            ("SERVER_PORT", Some("8080")),
            ("SERVER_USERNAME", None),
            ("LOGGING_LEVEL", None),
        ],
        || {
            let mut conf = AppConfig::default();
            load_opts(&mut conf, [with_file(file.clone())]).unwrap();
            assert_eq!(
                conf,
                AppConfig {
                    server: Server {
                        port: 8080,
                        hostname: "example.com".to_string(),
                    },
                    logging: Logging {
                        environment: "prod".to_string(),
                        level: "debug".to_string(),
                    },
                }
            );
        },
    );
}

#[test]
#[serial]
fn functional_options_match_plain_settings() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.json");
    fs::write(&path, r#"{"port":8080,"username":"sustainyfacts"}"#).unwrap();
    let file = path.to_str().unwrap().to_string();

    temp_env::with_vars([("PORT", None::<&str>), ("USERNAME", None)], || {
        let mut via_options = MyConfig::default();
        load_with(&mut via_options, LoadOptions::new().with_file(file.clone())).unwrap();

        let mut via_functions = MyConfig::default();
        load_opts(&mut via_functions, [with_file(file.clone())]).unwrap();

        assert_eq!(via_options, via_functions);
    });
}

#[test]
#[serial]
fn later_functional_options_override_earlier_ones() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.json");
    fs::write(&path, r#"{"port":8080}"#).unwrap();
    let file = path.to_str().unwrap().to_string();

    temp_env::with_vars([("PORT", None::<&str>), ("USERNAME", None)], || {
        let mut conf = MyConfig::default();
        load_opts(
            &mut conf,
            [with_file("does-not-exist.json"), with_file(file.clone())],
        )
        .unwrap();
        assert_eq!(conf.port, 8080);
    });
}

#[test]
#[serial]
fn bare_relative_reference_resolves_in_home_directory() {
    let home = TempDir::new().unwrap();
    fs::write(
        home.path().join(".mysecretconfig.json"),
        r#"{"port":8080,"username":"sustainyfacts"}"#,
    )
    .unwrap();

    temp_env::with_vars(
        [
            ("HOME", Some(home.path().to_str().unwrap())),
            ("PORT", None),
            ("USERNAME", None),
        ],
        || {
            let mut conf = MyConfig::default();
            load_opts(&mut conf, [with_file(".mysecretconfig.json")]).unwrap();
            assert_eq!(conf.port, 8080);
            assert_eq!(conf.username, "sustainyfacts");
        },
    );
}

#[test]
#[serial]
fn global_env_prefix_is_prepended_outermost() {
    temp_env::with_vars(
        [
            ("MYAPP_SERVER_PORT", Some("8080")),
            ("MYAPP_LOGGING_ENV", Some("prod")),
            ("MYAPP_LOGGING_LEVEL", Some("info")),
            ("MYAPP_SERVER_USERNAME", Some("example.com")),
        ],
        || {
            let mut conf = AppConfig::default();
            load_opts(&mut conf, [with_env_prefix("MYAPP_")]).unwrap();
            assert_eq!(conf.server.port, 8080);
            assert_eq!(conf.server.hostname, "example.com");
            assert_eq!(conf.logging.environment, "prod");
            assert_eq!(conf.logging.level, "info");
        },
    );
}

#[test]
#[serial]
fn missing_file_surfaces_an_io_error() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("missing.json");

    let mut conf = MyConfig::default();
    let err = load_with(
        &mut conf,
        LoadOptions::new().with_file(file.to_str().unwrap()),
    )
    .unwrap_err();
    assert!(matches!(err, ConfigError::Io { .. }));
}

#[test]
#[serial]
fn validation_gates_the_final_result() {
    temp_env::with_vars(
        [("SERVER_PORT", Some("-1")), ("SERVER_USERNAME", Some("example.com")),
         ("LOGGING_ENV", Some("prod")), ("LOGGING_LEVEL", Some("debug"))],
        || {
            let mut conf = AppConfig::default();
            let err = load(&mut conf).unwrap_err();
            match err {
                ConfigError::Validation { violations } => {
                    assert_eq!(violations.len(), 1);
                    assert_eq!(violations[0].field, "server.port");
                    assert_eq!(violations[0].rule, "gte=0");
                }
                other => panic!("expected Validation error, got {other:?}"),
            }
        },
    );
}
