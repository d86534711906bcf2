// src/config/loader.rs

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::model::{RawSettings, Settings, SettingsFile};
use crate::errors::Result;
use crate::types::Environment;

/// Variable that may point at a settings file.
pub const CONFIG_ENV_VAR: &str = "EXECWRAP_CONFIG";

/// Load a settings file and return the raw `RawSettings`.
///
/// This only performs TOML deserialization; use [`load_and_validate`] to
/// also check the values.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<RawSettings> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)?;

    let raw: RawSettings = toml::from_str(&contents)?;

    Ok(raw)
}

/// Load a settings file from path and validate it.
pub fn load_and_validate(path: impl AsRef<Path>) -> Result<SettingsFile> {
    let raw = load_from_path(&path)?;
    let file = SettingsFile::try_from(raw)?;
    Ok(file)
}

/// Settings file named by [`CONFIG_ENV_VAR`] in `env`, if any.
pub fn settings_path(env: &Environment) -> Option<PathBuf> {
    env.get_non_empty(CONFIG_ENV_VAR).map(PathBuf::from)
}

/// Build the [`Settings`] for this process.
///
/// `explicit` (from `--config`) beats [`CONFIG_ENV_VAR`]; with neither, the
/// built-in defaults apply. This is the only place besides
/// [`crate::types::Invocation::capture`] that looks at process state.
pub fn capture(explicit: Option<&Path>, env: &Environment) -> Result<Settings> {
    let source = explicit.map(Path::to_path_buf).or_else(|| settings_path(env));
    let file = match source {
        Some(path) => {
            debug!(path = ?path, "loading settings file");
            load_and_validate(&path)?
        }
        None => SettingsFile::default(),
    };

    // A removed working directory only matters for relative paths.
    let cwd = match std::env::current_dir() {
        Ok(cwd) => Some(cwd),
        Err(err) => {
            debug!(error = %err, "working directory unavailable");
            None
        }
    };

    // Best effort: without it search mode simply cannot skip itself.
    let self_exe = std::env::current_exe()
        .and_then(fs::canonicalize)
        .ok();

    Ok(Settings {
        file,
        cwd,
        self_exe,
    })
}
