// src/cli.rs

//! Diagnostic CLI, only reachable when the binary runs under its own name.
//!
//! Under any other name the binary is a wrapper and never parses arguments:
//! they all belong to the wrapped tool.

use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};

/// File name that switches the binary into CLI mode.
pub const SELF_NAME: &str = "execwrap";

/// Command-line arguments for `execwrap`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "execwrap",
    version,
    about = "Transparent exec wrapper that records which tools a build runs.",
    long_about = None
)]
pub struct CliArgs {
    /// Settings file (TOML). Overrides `EXECWRAP_CONFIG`.
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `EXECWRAP_LOG` or `warn` will be used.
    #[arg(long, value_enum, value_name = "LEVEL", global = true)]
    pub log_level: Option<LogLevel>,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Clone, Subcommand)]
pub enum CliCommand {
    /// Print the target NAME would be handed off to, without running it.
    Resolve {
        /// Name or path, exactly as a wrapper would see it in argv[0].
        name: OsString,
    },

    /// Behave as if invoked as NAME with ARGS.
    Exec {
        name: OsString,

        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<OsString>,
    },
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// True when argv[0] names the `execwrap` binary itself rather than a
/// wrapped tool.
pub fn is_self_invocation(program: &OsStr) -> bool {
    Path::new(program).file_name() == Some(OsStr::new(SELF_NAME))
}

/// Parse a full argv (including slot zero).
pub fn try_parse_from<I, T>(argv: I) -> Result<CliArgs, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    CliArgs::try_parse_from(argv)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn self_detection_uses_file_name_only() {
        assert!(is_self_invocation(OsStr::new("/usr/local/bin/execwrap")));
        assert!(is_self_invocation(OsStr::new("execwrap")));
        assert!(!is_self_invocation(OsStr::new("/usr/bin/gcc")));
        assert!(!is_self_invocation(OsStr::new("/opt/execwrap/gcc")));
    }

    #[test]
    fn exec_keeps_hyphenated_args_for_the_tool() {
        let args = try_parse_from(["execwrap", "exec", "gcc", "-O2", "-c", "x.c"]).unwrap();
        match args.command {
            CliCommand::Exec { name, args } => {
                assert_eq!(name, OsString::from("gcc"));
                let expected: Vec<OsString> =
                    ["-O2", "-c", "x.c"].iter().map(OsString::from).collect();
                assert_eq!(args, expected);
            }
            other => panic!("expected exec, got {other:?}"),
        }
    }

    #[test]
    fn global_flags_parse_before_subcommand() {
        let args =
            try_parse_from(["execwrap", "--log-level", "debug", "resolve", "make"]).unwrap();
        assert_eq!(args.log_level, Some(LogLevel::Debug));
        assert!(matches!(args.command, CliCommand::Resolve { .. }));
    }
}
