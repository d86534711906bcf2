// src/errors.rs

//! Crate-wide error types.
//!
//! Every stage of an invocation has its own enum so tests can match on the
//! exact failure. [`WrapperError`] folds them together for `main`, which maps
//! it to a process exit status via [`WrapperError::exit_code`].

use std::ffi::OsString;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failure to determine the genuine executable.
#[derive(Error, Debug)]
pub enum ResolutionError {
    #[error("marker {marker:?} exists but cannot be resolved: {reason}")]
    MarkerUnusable { marker: PathBuf, reason: String },

    #[error("search path variable `{var}` is unset or empty")]
    SearchPathUnset { var: String },

    #[error("no executable named {name:?} found in `{var}`")]
    NotFound { name: OsString, var: String },

    #[error("invoked name {0:?} has no file name component")]
    NoBaseName(OsString),
}

/// The OS refused to replace the process image.
#[derive(Error, Debug)]
#[error("failed to execute {program:?}: {source}")]
pub struct ExecError {
    pub program: PathBuf,
    #[source]
    pub source: io::Error,
}

/// The recording collaborator could not persist an invocation.
#[derive(Error, Debug)]
#[error("cannot record invocation to {destination:?}: {reason}")]
pub struct RecordError {
    pub destination: PathBuf,
    pub reason: String,
}

/// Why [`crate::dispatch::Dispatcher::dispatch`] returned at all.
#[derive(Error, Debug)]
pub enum DispatchError {
    #[error(transparent)]
    Exec(#[from] ExecError),

    #[error("recording failed and on_record_error = \"abort\": {0}")]
    Record(#[from] RecordError),
}

#[derive(Error, Debug)]
pub enum WrapperError {
    #[error(transparent)]
    Resolution(#[from] ResolutionError),

    #[error(transparent)]
    Dispatch(#[from] DispatchError),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl WrapperError {
    /// Exit status for a wrapper that failed before (or instead of) handing
    /// off. Follows the shell conventions for "not found" and "not
    /// executable".
    pub fn exit_code(&self) -> i32 {
        match self {
            WrapperError::Resolution(_) => 127,
            WrapperError::Dispatch(DispatchError::Exec(_)) => 126,
            _ => 1,
        }
    }
}

pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, WrapperError>;
