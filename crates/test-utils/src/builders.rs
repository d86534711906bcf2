#![allow(dead_code)]

use std::ffi::OsString;
use std::path::PathBuf;

use execwrap::config::{Settings, SettingsFile};
use execwrap::types::{Environment, Invocation, RecordFailurePolicy};

/// Builder for `Invocation` to simplify test setup.
pub struct InvocationBuilder {
    args: Vec<OsString>,
    env: Vec<(OsString, OsString)>,
}

impl InvocationBuilder {
    /// Start with argv = `[program]` and an empty environment.
    pub fn new(program: &str) -> Self {
        Self {
            args: vec![OsString::from(program)],
            env: Vec::new(),
        }
    }

    /// Start with an empty argv, as `execve(path, {NULL}, envp)` would give.
    pub fn empty() -> Self {
        Self {
            args: Vec::new(),
            env: Vec::new(),
        }
    }

    pub fn arg(mut self, arg: &str) -> Self {
        self.args.push(OsString::from(arg));
        self
    }

    pub fn args(mut self, args: &[&str]) -> Self {
        self.args.extend(args.iter().map(OsString::from));
        self
    }

    pub fn env(mut self, name: &str, value: &str) -> Self {
        self.env.push((OsString::from(name), OsString::from(value)));
        self
    }

    pub fn path(self, value: &str) -> Self {
        self.env("PATH", value)
    }

    /// Switch recording on via the primary interception variable.
    pub fn intercept(self, log: &str) -> Self {
        self.env("CLADE_INTERCEPT", log)
    }

    pub fn build(self) -> Invocation {
        Invocation::new(self.args, self.env.into_iter().collect::<Environment>())
    }
}

/// Builder for `Settings`.
pub struct SettingsBuilder {
    file: SettingsFile,
    cwd: Option<PathBuf>,
    self_exe: Option<PathBuf>,
}

impl SettingsBuilder {
    pub fn new() -> Self {
        Self {
            file: SettingsFile::default(),
            cwd: Some(PathBuf::from("/")),
            self_exe: None,
        }
    }

    pub fn cwd(mut self, cwd: &str) -> Self {
        self.cwd = Some(PathBuf::from(cwd));
        self
    }

    /// As if the working directory had been removed.
    pub fn no_cwd(mut self) -> Self {
        self.cwd = None;
        self
    }

    pub fn self_exe(mut self, path: &str) -> Self {
        self.self_exe = Some(PathBuf::from(path));
        self
    }

    pub fn marker_suffix(mut self, suffix: &str) -> Self {
        self.file.marker_suffix = suffix.to_string();
        self
    }

    pub fn path_var(mut self, var: &str) -> Self {
        self.file.path_var = var.to_string();
        self
    }

    pub fn intercept_vars(mut self, vars: &[&str]) -> Self {
        self.file.intercept_vars = vars.iter().map(|v| v.to_string()).collect();
        self
    }

    pub fn on_record_error(mut self, policy: RecordFailurePolicy) -> Self {
        self.file.on_record_error = policy;
        self
    }

    pub fn build(self) -> Settings {
        Settings {
            file: self.file,
            cwd: self.cwd,
            self_exe: self.self_exe,
        }
    }
}

impl Default for SettingsBuilder {
    fn default() -> Self {
        Self::new()
    }
}
