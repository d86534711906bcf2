// src/config/validate.rs

use std::path::MAIN_SEPARATOR;

use crate::config::model::{RawSettings, SettingsFile};
use crate::errors::{Result, WrapperError};

impl TryFrom<RawSettings> for SettingsFile {
    type Error = crate::errors::WrapperError;

    fn try_from(raw: RawSettings) -> std::result::Result<Self, Self::Error> {
        validate_raw_settings(&raw)?;
        Ok(SettingsFile::new_unchecked(raw))
    }
}

fn validate_raw_settings(raw: &RawSettings) -> Result<()> {
    validate_marker_suffix(&raw.marker_suffix)?;
    validate_var_name("path_var", &raw.path_var)?;
    validate_intercept_vars(&raw.intercept_vars)?;
    Ok(())
}

fn validate_marker_suffix(suffix: &str) -> Result<()> {
    if suffix.is_empty() {
        // An empty suffix would make every wrapper its own marker.
        return Err(WrapperError::ConfigError(
            "marker_suffix must not be empty".to_string(),
        ));
    }
    if suffix.contains('/') || suffix.contains(MAIN_SEPARATOR) || suffix.contains('\0') {
        return Err(WrapperError::ConfigError(format!(
            "marker_suffix {suffix:?} must not contain path separators or NUL"
        )));
    }
    Ok(())
}

fn validate_var_name(key: &str, name: &str) -> Result<()> {
    if name.is_empty() || name.contains('=') || name.contains('\0') {
        return Err(WrapperError::ConfigError(format!(
            "{key} {name:?} is not a valid environment variable name"
        )));
    }
    Ok(())
}

fn validate_intercept_vars(vars: &[String]) -> Result<()> {
    if vars.is_empty() {
        return Err(WrapperError::ConfigError(
            "intercept_vars must name at least one variable".to_string(),
        ));
    }
    for var in vars {
        validate_var_name("intercept_vars entry", var)?;
    }
    Ok(())
}
