use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use execwrap::errors::RecordError;
use execwrap::record::Recorder;

/// One call into a recorder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCall {
    pub target: PathBuf,
    pub argv: Vec<OsString>,
}

/// A recorder that keeps calls in memory and can be told to fail.
#[derive(Clone, Default)]
pub struct MemoryRecorder {
    calls: Arc<Mutex<Vec<RecordedCall>>>,
    fail: bool,
}

impl MemoryRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// A recorder whose every call fails (after being counted).
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

impl Recorder for MemoryRecorder {
    fn record(&self, target: &Path, argv: &[OsString]) -> Result<(), RecordError> {
        self.calls.lock().unwrap().push(RecordedCall {
            target: target.to_path_buf(),
            argv: argv.to_vec(),
        });

        if self.fail {
            return Err(RecordError {
                destination: PathBuf::from("<memory>"),
                reason: "configured to fail".to_string(),
            });
        }
        Ok(())
    }
}
