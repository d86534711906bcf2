// src/main.rs

use execwrap::dispatch::RealReplacer;
use execwrap::errors::WrapperError;
use execwrap::fs::RealFileSystem;
use execwrap::types::Invocation;
use execwrap::{cli, config, logging};

fn main() {
    let invocation = Invocation::capture();

    let code = if cli::is_self_invocation(invocation.program()) {
        cli_main(invocation)
    } else {
        wrapper_main(invocation)
    };

    std::process::exit(code);
}

/// Invoked under a wrapped tool's name: every argument belongs to the tool.
fn wrapper_main(invocation: Invocation) -> i32 {
    if let Err(err) = logging::init_logging(None, invocation.env()) {
        eprintln!("execwrap: {err:#}");
    }

    let settings = match config::capture(None, invocation.env()) {
        Ok(settings) => settings,
        Err(err) => return report(&err),
    };

    let err = execwrap::run(&invocation, &settings, &RealFileSystem, &RealReplacer);
    report(&err)
}

fn cli_main(invocation: Invocation) -> i32 {
    let args = match cli::try_parse_from(invocation.args()) {
        Ok(args) => args,
        Err(err) => err.exit(),
    };

    if let Err(err) = logging::init_logging(args.log_level, invocation.env()) {
        eprintln!("execwrap: {err:#}");
    }

    let settings = match config::capture(args.config.as_deref(), invocation.env()) {
        Ok(settings) => settings,
        Err(err) => return report(&err),
    };

    let env = invocation.env().clone();
    match execwrap::run_cli(args, env, &settings, &RealFileSystem, &RealReplacer) {
        Ok(()) => 0,
        Err(err) => report(&err),
    }
}

fn report(err: &WrapperError) -> i32 {
    eprintln!("execwrap: {err}");
    err.exit_code()
}
