// src/resolve/search.rs

//! Search mode: the first match for the invoked base name in the search list.

use std::path::{Path, PathBuf};

use tracing::{debug, trace};

use crate::config::Settings;
use crate::errors::ResolutionError;
use crate::fs::FileSystem;
use crate::types::{Invocation, ResolutionMode, ResolvedTarget};

use super::ResolutionStrategy;

pub struct SearchStrategy<'a> {
    fs: &'a dyn FileSystem,
    settings: &'a Settings,
}

impl<'a> SearchStrategy<'a> {
    pub fn new(fs: &'a dyn FileSystem, settings: &'a Settings) -> Self {
        Self { fs, settings }
    }

    /// Whether `candidate` is the running wrapper itself (typically a symlink
    /// to it in the wrapper directory).
    fn is_self(&self, candidate: &Path) -> bool {
        let Some(own) = self.settings.self_exe.as_deref() else {
            return false;
        };
        self.fs
            .canonicalize(candidate)
            .is_ok_and(|resolved| resolved == own)
    }
}

impl ResolutionStrategy for SearchStrategy<'_> {
    fn mode(&self) -> ResolutionMode {
        ResolutionMode::Search
    }

    /// Search mode is what remains when there is no marker.
    fn applies(&self, _invocation: &Invocation) -> bool {
        true
    }

    fn resolve(&self, invocation: &Invocation) -> Result<ResolvedTarget, ResolutionError> {
        let var = &self.settings.file.path_var;
        let program = invocation.program();

        let name = Path::new(program)
            .file_name()
            .ok_or_else(|| ResolutionError::NoBaseName(program.to_os_string()))?;

        let search_list = invocation
            .env()
            .get_non_empty(var)
            .ok_or_else(|| ResolutionError::SearchPathUnset { var: var.clone() })?;

        for dir in std::env::split_paths(search_list) {
            if dir.as_os_str().is_empty() {
                continue;
            }
            let Some(dir) = self.settings.absolute(&dir) else {
                trace!(dir = ?dir, "relative entry without a working directory");
                continue;
            };

            let candidate: PathBuf = dir.join(name);
            if !self.fs.is_file(&candidate) {
                trace!(candidate = ?candidate, "no match");
                continue;
            }
            if self.is_self(&candidate) {
                debug!(candidate = ?candidate, "skipping the wrapper's own executable");
                continue;
            }
            return Ok(ResolvedTarget::search(candidate));
        }

        Err(ResolutionError::NotFound {
            name: name.to_os_string(),
            var: var.clone(),
        })
    }
}
