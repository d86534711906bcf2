// src/lib.rs

pub mod cli;
pub mod config;
pub mod dispatch;
pub mod errors;
pub mod fs;
pub mod logging;
pub mod record;
pub mod resolve;
pub mod types;

use tracing::debug;

use crate::cli::{CliArgs, CliCommand};
use crate::config::Settings;
use crate::dispatch::{Dispatcher, ProcessReplacer};
use crate::errors::{Result, WrapperError};
use crate::fs::FileSystem;
use crate::record::{FileRecorder, NullRecorder, Recorder};
use crate::resolve::Resolver;
use crate::types::{Environment, Invocation, ResolvedTarget};

/// High-level entry point used by `main.rs` in wrapper mode.
///
/// Picks the recorder from the interception flag (a [`FileRecorder`] writing
/// to the flag's value, or nothing) and then runs [`run_with`]. Only returns
/// if the hand-off did not happen.
pub fn run(
    invocation: &Invocation,
    settings: &Settings,
    fs: &dyn FileSystem,
    replacer: &dyn ProcessReplacer,
) -> WrapperError {
    let file_recorder = settings
        .interception(invocation.env())
        .map(|flag| FileRecorder::new(fs, flag.value, settings.cwd.clone()));

    let recorder: &dyn Recorder = match &file_recorder {
        Some(r) => {
            debug!(log = ?r.log_path(), "recording to file");
            r
        }
        None => &NullRecorder,
    };

    run_with(invocation, settings, fs, recorder, replacer)
}

/// Resolve, optionally record, replace. Every collaborator is injected.
pub fn run_with(
    invocation: &Invocation,
    settings: &Settings,
    fs: &dyn FileSystem,
    recorder: &dyn Recorder,
    replacer: &dyn ProcessReplacer,
) -> WrapperError {
    let target = match Resolver::new(fs, settings).resolve(invocation) {
        Ok(target) => target,
        Err(err) => return err.into(),
    };

    Dispatcher::new(settings, recorder, replacer)
        .dispatch(&target, invocation)
        .into()
}

/// Entry point for the diagnostic CLI (`execwrap resolve|exec ...`).
pub fn run_cli(
    args: CliArgs,
    env: Environment,
    settings: &Settings,
    fs: &dyn FileSystem,
    replacer: &dyn ProcessReplacer,
) -> Result<()> {
    match args.command {
        CliCommand::Resolve { name } => {
            let invocation = Invocation::new(vec![name], env);
            let target = Resolver::new(fs, settings).resolve(&invocation)?;
            print_resolution(&target, settings, &invocation);
            Ok(())
        }
        CliCommand::Exec { name, args } => {
            let mut argv = Vec::with_capacity(args.len() + 1);
            argv.push(name);
            argv.extend(args);
            Err(run(&Invocation::new(argv, env), settings, fs, replacer))
        }
    }
}

/// Dry-run output for `execwrap resolve`.
fn print_resolution(target: &ResolvedTarget, settings: &Settings, invocation: &Invocation) {
    println!("path:  {}", target.path.display());
    println!("image: {}", target.image.display());
    println!("mode:  {:?}", target.mode);
    match settings.interception(invocation.env()) {
        Some(flag) => println!(
            "record: {} ({})",
            flag.value.to_string_lossy(),
            flag.var
        ),
        None => println!("record: off"),
    }
}
