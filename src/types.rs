// src/types.rs

//! Plain data types shared by the resolver, the dispatcher and the front end.

use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::Deserialize;

/// Ordered snapshot of environment variables.
///
/// Order and duplicates are preserved exactly as captured so the program we
/// hand off to sees the same environment block we were started with.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Environment {
    vars: Vec<(OsString, OsString)>,
}

impl Environment {
    /// Snapshot the environment of the current process.
    pub fn capture() -> Self {
        std::env::vars_os().collect()
    }

    /// Look up a variable. When a name occurs more than once, the last
    /// occurrence wins. That is the value `std::process::Command` passes on
    /// to the target, so resolution sees what the target will see. glibc
    /// `getenv` would return the first one instead.
    pub fn get(&self, name: impl AsRef<OsStr>) -> Option<&OsStr> {
        let name = name.as_ref();
        self.vars
            .iter()
            .rev()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_os_str())
    }

    /// Like [`Environment::get`], but treats an empty value as unset.
    pub fn get_non_empty(&self, name: impl AsRef<OsStr>) -> Option<&OsStr> {
        self.get(name).filter(|v| !v.is_empty())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&OsStr, &OsStr)> {
        self.vars.iter().map(|(k, v)| (k.as_os_str(), v.as_os_str()))
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for Environment
where
    K: Into<OsString>,
    V: Into<OsString>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            vars: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// One call of a wrapped executable: argument vector plus environment.
///
/// `args[0]` is the name or path the wrapper was invoked as.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    args: Vec<OsString>,
    env: Environment,
}

impl Invocation {
    pub fn new(args: Vec<OsString>, env: Environment) -> Self {
        Self { args, env }
    }

    /// Capture argv and the environment of the current process.
    pub fn capture() -> Self {
        Self::new(std::env::args_os().collect(), Environment::capture())
    }

    /// The invoked name or path (argv[0]); empty when argv itself is empty.
    pub fn program(&self) -> &OsStr {
        self.args.first().map(OsString::as_os_str).unwrap_or_default()
    }

    /// Full argument vector, including slot zero.
    pub fn args(&self) -> &[OsString] {
        &self.args
    }

    pub fn env(&self) -> &Environment {
        &self.env
    }
}

/// Which installation convention produced a [`ResolvedTarget`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolutionMode {
    /// The real executable was renamed to `<path><suffix>`.
    Marker,
    /// Wrappers live in a directory that precedes the real tools in PATH.
    Search,
}

/// The genuine executable for one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedTarget {
    /// Absolute path the genuine program is known by. This is what gets
    /// recorded and what the program sees as argv[0].
    pub path: PathBuf,
    /// File whose bytes are executed. Differs from `path` in marker mode,
    /// where `path` holds the wrapper and the real program sits in the marker.
    pub image: PathBuf,
    pub mode: ResolutionMode,
}

impl ResolvedTarget {
    pub fn marker(path: PathBuf, image: PathBuf) -> Self {
        Self {
            path,
            image,
            mode: ResolutionMode::Marker,
        }
    }

    pub fn search(path: PathBuf) -> Self {
        Self {
            image: path.clone(),
            path,
            mode: ResolutionMode::Search,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// What to do when the recording collaborator fails.
///
/// - `Continue`: log a warning and still hand off to the real program, so a
///   broken log never breaks the build being observed (default).
/// - `Abort`: stop without replacing the process and exit non-zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordFailurePolicy {
    #[default]
    Continue,
    Abort,
}

impl FromStr for RecordFailurePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "continue" => Ok(RecordFailurePolicy::Continue),
            "abort" => Ok(RecordFailurePolicy::Abort),
            other => Err(format!(
                "invalid on_record_error: {other} (expected \"continue\" or \"abort\")"
            )),
        }
    }
}
