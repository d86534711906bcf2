// src/dispatch/replace.rs

//! Process replacement backend.
//!
//! The dispatcher talks to a [`ProcessReplacer`] instead of calling `exec`
//! directly, so tests can capture what would have been executed.

use std::convert::Infallible;
use std::ffi::OsString;
use std::path::Path;
use std::process::Command;

use tracing::debug;

use crate::errors::ExecError;
use crate::types::Environment;

/// Replaces the current process image.
///
/// The success type is uninhabited: a real implementation only ever returns
/// an error.
pub trait ProcessReplacer {
    /// Execute `image` with exactly `argv` (including slot zero) and exactly
    /// `env`.
    fn replace(
        &self,
        image: &Path,
        argv: &[OsString],
        env: &Environment,
    ) -> Result<Infallible, ExecError>;
}

/// Replacer used in production.
///
/// On Unix this is `execve`: same pid, no child. Elsewhere the target runs
/// as a child and the wrapper exits with its status.
#[derive(Debug, Clone, Copy, Default)]
pub struct RealReplacer;

impl RealReplacer {
    fn command(image: &Path, argv: &[OsString], env: &Environment) -> Command {
        let mut cmd = Command::new(image);
        if let Some((_, rest)) = argv.split_first() {
            cmd.args(rest);
        }
        cmd.env_clear().envs(env.iter());
        cmd
    }
}

impl ProcessReplacer for RealReplacer {
    #[cfg(unix)]
    fn replace(
        &self,
        image: &Path,
        argv: &[OsString],
        env: &Environment,
    ) -> Result<Infallible, ExecError> {
        use std::os::unix::process::CommandExt;

        let mut cmd = Self::command(image, argv, env);
        if let Some(arg0) = argv.first() {
            cmd.arg0(arg0);
        }

        debug!(image = ?image, argv = ?argv, "exec");
        let source = cmd.exec();

        // exec() only returns if there's an error
        Err(ExecError {
            program: image.to_path_buf(),
            source,
        })
    }

    #[cfg(not(unix))]
    fn replace(
        &self,
        image: &Path,
        argv: &[OsString],
        env: &Environment,
    ) -> Result<Infallible, ExecError> {
        debug!(image = ?image, argv = ?argv, "spawning (no exec on this platform)");
        let status = Self::command(image, argv, env)
            .status()
            .map_err(|source| ExecError {
                program: image.to_path_buf(),
                source,
            })?;
        std::process::exit(status.code().unwrap_or(1))
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn missing_image_returns_exec_error() {
        let env = Environment::default();
        let argv = vec![OsString::from("/definitely/not/here")];

        let err = RealReplacer
            .replace(Path::new("/definitely/not/here"), &argv, &env)
            .unwrap_err();

        assert_eq!(err.source.kind(), io::ErrorKind::NotFound);
        assert_eq!(err.program, Path::new("/definitely/not/here"));
    }
}
