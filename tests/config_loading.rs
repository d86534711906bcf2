// tests/config_loading.rs

use std::io::Write;

use tempfile::NamedTempFile;

use execwrap::config::{capture, load_and_validate, CONFIG_ENV_VAR};
use execwrap::errors::WrapperError;
use execwrap::types::{Environment, RecordFailurePolicy};

#[test]
fn full_settings_file_is_loaded() {
    let mut file = NamedTempFile::new().unwrap();
    write!(
        file,
        r#"
marker_suffix = ".orig"
path_var = "TOOL_PATH"
intercept_vars = ["BUILD_TRACE"]
on_record_error = "abort"
"#
    )
    .unwrap();

    let settings = load_and_validate(file.path()).unwrap();

    assert_eq!(settings.marker_suffix, ".orig");
    assert_eq!(settings.path_var, "TOOL_PATH");
    assert_eq!(settings.intercept_vars, vec!["BUILD_TRACE".to_string()]);
    assert_eq!(settings.on_record_error, RecordFailurePolicy::Abort);
}

#[test]
fn missing_keys_take_defaults() {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "on_record_error = \"continue\"\n").unwrap();

    let settings = load_and_validate(file.path()).unwrap();

    assert_eq!(settings.marker_suffix, ".clade");
    assert_eq!(settings.path_var, "PATH");
    assert_eq!(
        settings.intercept_vars,
        vec!["CLADE_INTERCEPT".to_string(), "CLADE_INTERCEPT_FALLBACK".to_string()]
    );
}

#[test]
fn unknown_key_is_a_toml_error() {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "marker = \".clade\"\n").unwrap();

    match load_and_validate(file.path()) {
        Err(WrapperError::TomlError(_)) => {}
        other => panic!("expected TomlError, got {other:?}"),
    }
}

#[test]
fn invalid_value_is_a_config_error() {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "marker_suffix = \"\"\n").unwrap();

    match load_and_validate(file.path()) {
        Err(WrapperError::ConfigError(msg)) => assert!(msg.contains("marker_suffix")),
        other => panic!("expected ConfigError, got {other:?}"),
    }
}

#[test]
fn bad_policy_is_rejected() {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "on_record_error = \"retry\"\n").unwrap();

    assert!(load_and_validate(file.path()).is_err());
}

#[test]
fn capture_reads_file_named_in_environment() {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "marker_suffix = \".real\"\n").unwrap();
    let env: Environment = [(CONFIG_ENV_VAR, file.path().as_os_str())]
        .into_iter()
        .collect();

    let settings = capture(None, &env).unwrap();

    assert_eq!(settings.file.marker_suffix, ".real");
    assert!(settings.cwd.unwrap().is_absolute());
}

#[test]
fn explicit_path_beats_environment() {
    let mut from_env = NamedTempFile::new().unwrap();
    write!(from_env, "marker_suffix = \".env\"\n").unwrap();
    let mut explicit = NamedTempFile::new().unwrap();
    write!(explicit, "marker_suffix = \".cli\"\n").unwrap();
    let env: Environment = [(CONFIG_ENV_VAR, from_env.path().as_os_str())]
        .into_iter()
        .collect();

    let settings = capture(Some(explicit.path()), &env).unwrap();

    assert_eq!(settings.file.marker_suffix, ".cli");
}

#[test]
fn capture_without_file_uses_defaults() {
    let settings = capture(None, &Environment::default()).unwrap();
    assert_eq!(settings.file.marker_suffix, ".clade");
}

#[test]
fn missing_settings_file_is_an_io_error() {
    let env: Environment = [(CONFIG_ENV_VAR, "/definitely/not/a/settings.toml")]
        .into_iter()
        .collect();

    assert!(matches!(capture(None, &env), Err(WrapperError::IoError(_))));
}
