#![allow(dead_code)]

pub use execwrap_test_utils::builders::{InvocationBuilder, SettingsBuilder};
pub use execwrap_test_utils::init_tracing;

use execwrap::fs::mock::MockFileSystem;

/// Where the wrapper binary lives in the mock filesystems below.
pub const WRAPPER_EXE: &str = "/opt/execwrap/bin/execwrap";

/// A small toolchain installed both ways:
///
/// - marker mode: `/usr/bin/gcc` is the wrapper, `/usr/bin/gcc.clade` the
///   real compiler;
/// - search mode: `/wrappers/{make,ar}` link to the wrapper and precede
///   `/usr/bin` and `/usr/local/bin` in PATH.
pub fn toolchain_fs() -> MockFileSystem {
    let fs = MockFileSystem::new();
    fs.add_file(WRAPPER_EXE, b"wrapper");

    fs.add_file("/usr/bin/gcc", b"wrapper");
    fs.add_file("/usr/bin/gcc.clade", b"gcc");

    fs.add_symlink("/wrappers/make", WRAPPER_EXE);
    fs.add_symlink("/wrappers/ar", WRAPPER_EXE);
    fs.add_file("/usr/bin/make", b"make");
    fs.add_file("/usr/bin/ar", b"ar");
    fs.add_file("/usr/local/bin/ar", b"newer ar");

    fs.add_dir("/build");
    fs
}

/// PATH with the wrapper directory first, as the intercept tool sets it up.
pub const WRAPPED_PATH: &str = "/wrappers:/usr/bin:/usr/local/bin";
