// src/config/mod.rs

//! Wrapper settings: defaults, optional TOML file, and the captured process
//! state (working directory, own executable) bundled into [`Settings`].

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{capture, load_and_validate, load_from_path, settings_path, CONFIG_ENV_VAR};
pub use model::{Interception, RawSettings, Settings, SettingsFile};
