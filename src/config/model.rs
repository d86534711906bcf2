// src/config/model.rs

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::types::{Environment, RecordFailurePolicy};

/// Settings file as read from TOML. Every key is optional:
///
/// ```toml
/// marker_suffix = ".clade"
/// path_var = "PATH"
/// intercept_vars = ["CLADE_INTERCEPT", "CLADE_INTERCEPT_FALLBACK"]
/// on_record_error = "continue"
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawSettings {
    /// Suffix appended to a real executable when a wrapper takes its place.
    #[serde(default = "default_marker_suffix")]
    pub marker_suffix: String,

    /// Variable holding the directory search list for search mode.
    #[serde(default = "default_path_var")]
    pub path_var: String,

    /// Variables that switch recording on, checked in order. The first one
    /// present and non-empty wins and its value names the record log.
    #[serde(default = "default_intercept_vars")]
    pub intercept_vars: Vec<String>,

    #[serde(default)]
    pub on_record_error: RecordFailurePolicy,
}

fn default_marker_suffix() -> String {
    ".clade".to_string()
}

fn default_path_var() -> String {
    "PATH".to_string()
}

fn default_intercept_vars() -> Vec<String> {
    vec![
        "CLADE_INTERCEPT".to_string(),
        "CLADE_INTERCEPT_FALLBACK".to_string(),
    ]
}

impl Default for RawSettings {
    fn default() -> Self {
        Self {
            marker_suffix: default_marker_suffix(),
            path_var: default_path_var(),
            intercept_vars: default_intercept_vars(),
            on_record_error: RecordFailurePolicy::default(),
        }
    }
}

/// Validated settings file. Build it with `SettingsFile::try_from(raw)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingsFile {
    pub marker_suffix: String,
    pub path_var: String,
    pub intercept_vars: Vec<String>,
    pub on_record_error: RecordFailurePolicy,
}

impl SettingsFile {
    pub(crate) fn new_unchecked(raw: RawSettings) -> Self {
        Self {
            marker_suffix: raw.marker_suffix,
            path_var: raw.path_var,
            intercept_vars: raw.intercept_vars,
            on_record_error: raw.on_record_error,
        }
    }
}

impl Default for SettingsFile {
    fn default() -> Self {
        Self::new_unchecked(RawSettings::default())
    }
}

/// An enabled interception flag: which variable switched it on and its value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Interception<'a> {
    pub var: &'a str,
    pub value: &'a OsStr,
}

/// Everything the resolver and dispatcher need to know about the outside
/// world, captured once at start-up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub file: SettingsFile,
    /// Working directory relative invoked paths are taken against. `None`
    /// when it could not be determined, e.g. it was removed under us.
    pub cwd: Option<PathBuf>,
    /// Canonical path of the running wrapper binary, if known. Search mode
    /// skips candidates that resolve to it.
    pub self_exe: Option<PathBuf>,
}

impl Settings {
    pub fn new(file: SettingsFile, cwd: impl Into<PathBuf>) -> Self {
        Self {
            file,
            cwd: Some(cwd.into()),
            self_exe: None,
        }
    }

    /// Same settings, but with the working directory unknown.
    pub fn without_cwd(mut self) -> Self {
        self.cwd = None;
        self
    }

    pub fn with_self_exe(mut self, self_exe: impl Into<PathBuf>) -> Self {
        self.self_exe = Some(self_exe.into());
        self
    }

    /// `path` made absolute against the working directory. `None` for a
    /// relative path when the working directory is unknown.
    pub fn absolute(&self, path: &Path) -> Option<PathBuf> {
        if path.is_absolute() {
            Some(path.to_path_buf())
        } else {
            self.cwd.as_ref().map(|cwd| cwd.join(path))
        }
    }

    /// The interception flag as seen in `env`, or `None` when recording is off.
    pub fn interception<'a>(&'a self, env: &'a Environment) -> Option<Interception<'a>> {
        self.file.intercept_vars.iter().find_map(|var| {
            env.get_non_empty(var).map(|value| Interception {
                var: var.as_str(),
                value,
            })
        })
    }
}
