// src/dispatch/mod.rs

//! Interception dispatcher: optionally record, then hand off.
//!
//! - [`Dispatcher::dispatch`] checks the interception flag, calls the
//!   [`Recorder`] at most once, rewrites argv[0] and asks the
//!   [`ProcessReplacer`] to become the target.
//! - [`replace`] holds the replacer trait and the production backend.

pub mod replace;

use std::convert::Infallible;
use std::ffi::OsString;

use tracing::{debug, error, info, warn};

use crate::config::Settings;
use crate::errors::DispatchError;
use crate::record::Recorder;
use crate::types::{Invocation, RecordFailurePolicy, ResolvedTarget};

pub use replace::{ProcessReplacer, RealReplacer};

/// The argument vector handed to the target: `args` with slot zero replaced
/// by the target's absolute path. Nothing else is touched.
pub fn replacement_argv(target: &ResolvedTarget, args: &[OsString]) -> Vec<OsString> {
    let mut argv = Vec::with_capacity(args.len().max(1));
    argv.push(target.path.clone().into_os_string());
    argv.extend(args.iter().skip(1).cloned());
    argv
}

pub struct Dispatcher<'a> {
    settings: &'a Settings,
    recorder: &'a dyn Recorder,
    replacer: &'a dyn ProcessReplacer,
}

impl<'a> Dispatcher<'a> {
    pub fn new(
        settings: &'a Settings,
        recorder: &'a dyn Recorder,
        replacer: &'a dyn ProcessReplacer,
    ) -> Self {
        Self {
            settings,
            recorder,
            replacer,
        }
    }

    /// Become `target`. Only returns if that did not happen.
    pub fn dispatch(&self, target: &ResolvedTarget, invocation: &Invocation) -> DispatchError {
        match self.try_dispatch(target, invocation) {
            Ok(never) => match never {},
            Err(err) => err,
        }
    }

    fn try_dispatch(
        &self,
        target: &ResolvedTarget,
        invocation: &Invocation,
    ) -> Result<Infallible, DispatchError> {
        if let Some(flag) = self.settings.interception(invocation.env()) {
            debug!(var = flag.var, "interception enabled");
            self.record(target, invocation)?;
        }

        let argv = replacement_argv(target, invocation.args());
        info!(
            target = ?target.path,
            mode = ?target.mode,
            args = argv.len(),
            "handing off to target"
        );

        Ok(self.replacer.replace(&target.image, &argv, invocation.env())?)
    }

    fn record(&self, target: &ResolvedTarget, invocation: &Invocation) -> Result<(), DispatchError> {
        match self.recorder.record(&target.path, invocation.args()) {
            Ok(()) => Ok(()),
            Err(err) => match self.settings.file.on_record_error {
                RecordFailurePolicy::Continue => {
                    warn!(error = %err, "recording failed; continuing with hand-off");
                    Ok(())
                }
                RecordFailurePolicy::Abort => {
                    error!(error = %err, "recording failed; not handing off");
                    Err(err.into())
                }
            },
        }
    }
}
