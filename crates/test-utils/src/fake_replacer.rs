use std::convert::Infallible;
use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use execwrap::dispatch::ProcessReplacer;
use execwrap::errors::ExecError;
use execwrap::types::Environment;

/// What a replacement would have executed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Replacement {
    pub image: PathBuf,
    pub argv: Vec<OsString>,
    pub env: Environment,
}

/// A fake replacer that:
/// - records every replacement it is asked to perform
/// - never replaces anything, returning an `ExecError` of the configured kind
///   so the caller's "exec failed" path runs.
#[derive(Clone)]
pub struct FakeReplacer {
    calls: Arc<Mutex<Vec<Replacement>>>,
    kind: io::ErrorKind,
}

impl FakeReplacer {
    pub fn new() -> Self {
        Self::failing_with(io::ErrorKind::Other)
    }

    pub fn failing_with(kind: io::ErrorKind) -> Self {
        Self {
            calls: Arc::new(Mutex::new(Vec::new())),
            kind,
        }
    }

    pub fn calls(&self) -> Vec<Replacement> {
        self.calls.lock().unwrap().clone()
    }

    /// The single replacement performed. Panics on zero or several.
    pub fn only_call(&self) -> Replacement {
        let calls = self.calls();
        assert_eq!(calls.len(), 1, "expected exactly one replacement, got {calls:?}");
        calls.into_iter().next().unwrap()
    }
}

impl Default for FakeReplacer {
    fn default() -> Self {
        Self::new()
    }
}

impl ProcessReplacer for FakeReplacer {
    fn replace(
        &self,
        image: &Path,
        argv: &[OsString],
        env: &Environment,
    ) -> Result<Infallible, ExecError> {
        {
            let mut guard = self.calls.lock().unwrap();
            guard.push(Replacement {
                image: image.to_path_buf(),
                argv: argv.to_vec(),
                env: env.clone(),
            });
        }

        Err(ExecError {
            program: image.to_path_buf(),
            source: io::Error::new(self.kind, "fake replacer does not exec"),
        })
    }
}
