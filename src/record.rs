// src/record.rs

//! Recording collaborator: persists "this tool was invoked with these
//! arguments" before the hand-off.
//!
//! The dispatcher only relies on the [`Recorder`] contract. [`FileRecorder`]
//! is the default and appends one line per invocation in the format the
//! intercept tooling reads back:
//!
//! ```text
//! <cwd>||<target>||<argv0>||<argv1>||...
//! ```

use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};

use crate::errors::RecordError;
use crate::fs::FileSystem;

/// Field separator within a record line.
pub const DELIMITER: &str = "||";

pub trait Recorder {
    /// Record one invocation of `target` with the full argument vector.
    fn record(&self, target: &Path, argv: &[OsString]) -> Result<(), RecordError>;
}

/// Recorder that drops everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullRecorder;

impl Recorder for NullRecorder {
    fn record(&self, _target: &Path, _argv: &[OsString]) -> Result<(), RecordError> {
        Ok(())
    }
}

/// One line of the record log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandRecord {
    pub cwd: PathBuf,
    pub target: PathBuf,
    pub argv: Vec<OsString>,
}

impl CommandRecord {
    /// Encode as a newline-terminated record line.
    pub fn to_line(&self) -> Vec<u8> {
        let mut line = Vec::new();
        push_field(&mut line, self.cwd.as_os_str());
        line.extend_from_slice(DELIMITER.as_bytes());
        push_field(&mut line, self.target.as_os_str());
        for arg in &self.argv {
            line.extend_from_slice(DELIMITER.as_bytes());
            push_field(&mut line, arg);
        }
        line.push(b'\n');
        line
    }

    /// Decode a line produced by [`CommandRecord::to_line`]. Returns `None`
    /// for lines with fewer than two fields.
    pub fn parse(line: &str) -> Option<Self> {
        let mut fields = line.trim_end_matches('\n').split(DELIMITER);
        let cwd = PathBuf::from(fields.next()?);
        let target = PathBuf::from(fields.next()?);
        let argv = fields.map(OsString::from).collect();
        Some(Self { cwd, target, argv })
    }
}

fn push_field(line: &mut Vec<u8>, field: &OsStr) {
    line.extend_from_slice(field.as_encoded_bytes());
}

/// Appends a [`CommandRecord`] per call to a log file.
#[derive(Debug)]
pub struct FileRecorder<'a> {
    fs: &'a dyn FileSystem,
    log: PathBuf,
    cwd: Option<PathBuf>,
}

impl<'a> FileRecorder<'a> {
    /// `log` is taken relative to `cwd` when it is not absolute. Without a
    /// working directory every record fails, since the line cannot name one.
    pub fn new(fs: &'a dyn FileSystem, log: impl Into<PathBuf>, cwd: Option<PathBuf>) -> Self {
        let log = log.into();
        let log = match &cwd {
            Some(cwd) if !log.is_absolute() => cwd.join(log),
            _ => log,
        };
        Self { fs, log, cwd }
    }

    pub fn log_path(&self) -> &Path {
        &self.log
    }
}

impl Recorder for FileRecorder<'_> {
    fn record(&self, target: &Path, argv: &[OsString]) -> Result<(), RecordError> {
        let cwd = self.cwd.clone().ok_or_else(|| RecordError {
            destination: self.log.clone(),
            reason: "working directory unavailable".to_string(),
        })?;

        let record = CommandRecord {
            cwd,
            target: target.to_path_buf(),
            argv: argv.to_vec(),
        };

        self.fs
            .append(&self.log, &record.to_line())
            .map_err(|e| RecordError {
                destination: self.log.clone(),
                reason: format!("{e:#}"),
            })
    }
}
