// tests/resolve_marker.rs

mod common;
use crate::common::{init_tracing, toolchain_fs, InvocationBuilder, SettingsBuilder, WRAPPED_PATH};

use std::path::PathBuf;

use execwrap::errors::ResolutionError;
use execwrap::fs::mock::MockFileSystem;
use execwrap::resolve::Resolver;
use execwrap::types::ResolutionMode;

#[test]
fn marker_suffix_is_stripped_exactly() {
    init_tracing();
    let fs = toolchain_fs();
    let settings = SettingsBuilder::new().build();

    let target = Resolver::new(&fs, &settings)
        .resolve(&InvocationBuilder::new("/usr/bin/gcc").build())
        .unwrap();

    assert_eq!(target.mode, ResolutionMode::Marker);
    assert_eq!(target.path, PathBuf::from("/usr/bin/gcc"));
    assert_eq!(target.image, PathBuf::from("/usr/bin/gcc.clade"));
}

#[test]
fn marker_beats_a_path_match_for_the_same_name() {
    let fs = toolchain_fs();
    fs.add_file("/usr/local/bin/gcc", b"other gcc");
    let settings = SettingsBuilder::new().build();

    let target = Resolver::new(&fs, &settings)
        .resolve(
            &InvocationBuilder::new("/usr/bin/gcc")
                .path("/usr/local/bin")
                .build(),
        )
        .unwrap();

    assert_eq!(target.mode, ResolutionMode::Marker);
    assert_eq!(target.path, PathBuf::from("/usr/bin/gcc"));
}

#[test]
fn marker_applies_even_without_path() {
    let fs = toolchain_fs();
    let settings = SettingsBuilder::new().build();

    let target = Resolver::new(&fs, &settings)
        .resolve(&InvocationBuilder::new("/usr/bin/gcc").build())
        .unwrap();

    assert_eq!(target.path, PathBuf::from("/usr/bin/gcc"));
}

#[test]
fn relative_invocation_uses_working_directory() {
    let fs = MockFileSystem::new();
    fs.add_file("/src/proj/tools/gen", b"wrapper");
    fs.add_file("/src/proj/tools/gen.clade", b"gen");
    let settings = SettingsBuilder::new().cwd("/src/proj").build();

    let target = Resolver::new(&fs, &settings)
        .resolve(&InvocationBuilder::new("./tools/gen").build())
        .unwrap();

    assert_eq!(target.path, PathBuf::from("/src/proj/tools/gen"));
    assert_eq!(target.image, PathBuf::from("/src/proj/tools/gen.clade"));
}

#[test]
fn symlinked_directory_is_canonicalized() {
    let fs = MockFileSystem::new();
    fs.add_file("/usr/lib/ccache/cc.clade", b"cc");
    fs.add_symlink("/usr/bin", "/usr/lib/ccache");
    let settings = SettingsBuilder::new().build();

    let target = Resolver::new(&fs, &settings)
        .resolve(&InvocationBuilder::new("/usr/bin/cc").build())
        .unwrap();

    assert_eq!(target.path, PathBuf::from("/usr/lib/ccache/cc"));
}

#[test]
fn broken_marker_link_fails_without_searching() {
    let fs = toolchain_fs();
    fs.add_symlink("/usr/bin/make.clade", "/removed/make.clade");
    let settings = SettingsBuilder::new().build();

    let err = Resolver::new(&fs, &settings)
        .resolve(
            &InvocationBuilder::new("/usr/bin/make")
                .path(WRAPPED_PATH)
                .build(),
        )
        .unwrap_err();

    match err {
        ResolutionError::MarkerUnusable { marker, reason } => {
            assert_eq!(marker, PathBuf::from("/usr/bin/make.clade"));
            assert!(reason.contains("No such file"), "reason: {reason}");
        }
        other => panic!("expected MarkerUnusable, got {other:?}"),
    }
}

#[test]
fn permission_denied_on_marker_target_fails() {
    let fs = MockFileSystem::new();
    fs.add_file("/vendor/sdk/bin/cc.clade", b"cc");
    fs.add_symlink("/usr/bin/cc.clade", "/vendor/sdk/bin/cc.clade");
    fs.forbid("/vendor/sdk");
    let settings = SettingsBuilder::new().build();

    let err = Resolver::new(&fs, &settings)
        .resolve(&InvocationBuilder::new("/usr/bin/cc").build())
        .unwrap_err();

    assert!(matches!(err, ResolutionError::MarkerUnusable { .. }));
}

#[test]
fn custom_suffix_is_used_for_detection_and_stripping() {
    let fs = MockFileSystem::new();
    fs.add_file("/bin/as.real", b"as");
    fs.add_file("/bin/as.clade", b"not this one");
    let settings = SettingsBuilder::new().marker_suffix(".real").build();

    let target = Resolver::new(&fs, &settings)
        .resolve(&InvocationBuilder::new("/bin/as").build())
        .unwrap();

    assert_eq!(target.path, PathBuf::from("/bin/as"));
    assert_eq!(target.image, PathBuf::from("/bin/as.real"));
}
