// src/resolve/marker.rs

//! Marker mode: `<invoked path><suffix>` holds the real executable.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use crate::config::Settings;
use crate::errors::ResolutionError;
use crate::fs::FileSystem;
use crate::types::{Invocation, ResolutionMode, ResolvedTarget};

use super::ResolutionStrategy;

pub struct MarkerStrategy<'a> {
    fs: &'a dyn FileSystem,
    settings: &'a Settings,
}

impl<'a> MarkerStrategy<'a> {
    pub fn new(fs: &'a dyn FileSystem, settings: &'a Settings) -> Self {
        Self { fs, settings }
    }

    /// Where the marker for `program` would live. Relative programs are
    /// taken against the captured working directory; `None` if it is unknown.
    pub fn marker_path(&self, program: &OsStr) -> Option<PathBuf> {
        let mut raw = program.to_os_string();
        raw.push(&self.settings.file.marker_suffix);
        self.settings.absolute(Path::new(&raw))
    }
}

impl ResolutionStrategy for MarkerStrategy<'_> {
    fn mode(&self) -> ResolutionMode {
        ResolutionMode::Marker
    }

    fn applies(&self, invocation: &Invocation) -> bool {
        let program = invocation.program();
        !program.is_empty()
            && self
                .marker_path(program)
                .is_some_and(|marker| self.fs.has_entry(&marker))
    }

    fn resolve(&self, invocation: &Invocation) -> Result<ResolvedTarget, ResolutionError> {
        let program = invocation.program();
        let marker = self.marker_path(program).ok_or_else(|| {
            let mut raw = program.to_os_string();
            raw.push(&self.settings.file.marker_suffix);
            ResolutionError::MarkerUnusable {
                marker: PathBuf::from(raw),
                reason: "working directory unavailable".to_string(),
            }
        })?;

        let image = self
            .fs
            .canonicalize(&marker)
            .map_err(|e| ResolutionError::MarkerUnusable {
                marker: marker.clone(),
                reason: format!("{e:#}"),
            })?;

        let suffix = &self.settings.file.marker_suffix;
        let path = strip_suffix(&image, suffix).ok_or_else(|| {
            ResolutionError::MarkerUnusable {
                marker: marker.clone(),
                reason: format!("resolved to {image:?}, which does not end in {suffix:?}"),
            }
        })?;

        Ok(ResolvedTarget::marker(path, image))
    }
}

/// `/x/foo.clade` -> `/x/foo`. `None` if the file name does not end in
/// `suffix`, is exactly `suffix`, or is not valid UTF-8.
fn strip_suffix(path: &Path, suffix: &str) -> Option<PathBuf> {
    let name = path.file_name()?.to_str()?;
    let stem = name.strip_suffix(suffix).filter(|s| !s.is_empty())?;
    Some(path.with_file_name(stem))
}
