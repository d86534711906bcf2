// src/resolve/mod.rs

//! Path resolution: find the genuine executable behind a wrapper.
//!
//! Two installation conventions exist and exactly one applies per call:
//!
//! - [`marker`]: the real binary was renamed to `<path><suffix>` and the
//!   wrapper put in its place. Checked first; if the marker exists, this is
//!   the answer or the error, never a fallback to search.
//! - [`search`]: wrappers live in a directory early in PATH; the real tool is
//!   the first other match in the search list.

pub mod marker;
pub mod search;

use tracing::debug;

use crate::config::Settings;
use crate::errors::ResolutionError;
use crate::fs::FileSystem;
use crate::types::{Invocation, ResolutionMode, ResolvedTarget};

pub use marker::MarkerStrategy;
pub use search::SearchStrategy;

/// One installation convention.
pub trait ResolutionStrategy {
    fn mode(&self) -> ResolutionMode;

    /// Whether this convention is in effect for `invocation`. Must not fail:
    /// errors belong to [`ResolutionStrategy::resolve`].
    fn applies(&self, invocation: &Invocation) -> bool;

    fn resolve(&self, invocation: &Invocation) -> Result<ResolvedTarget, ResolutionError>;
}

/// Picks the strategy for an invocation and runs it.
pub struct Resolver<'a> {
    marker: MarkerStrategy<'a>,
    search: SearchStrategy<'a>,
}

impl<'a> Resolver<'a> {
    pub fn new(fs: &'a dyn FileSystem, settings: &'a Settings) -> Self {
        Self {
            marker: MarkerStrategy::new(fs, settings),
            search: SearchStrategy::new(fs, settings),
        }
    }

    /// The strategy that governs `invocation`.
    pub fn select(&self, invocation: &Invocation) -> &dyn ResolutionStrategy {
        if self.marker.applies(invocation) {
            &self.marker
        } else {
            &self.search
        }
    }

    pub fn resolve(&self, invocation: &Invocation) -> Result<ResolvedTarget, ResolutionError> {
        let strategy = self.select(invocation);
        debug!(
            program = ?invocation.program(),
            mode = ?strategy.mode(),
            "selected resolution strategy"
        );

        let target = strategy.resolve(invocation)?;
        debug!(
            path = ?target.path,
            image = ?target.image,
            "resolved target"
        );
        Ok(target)
    }
}
