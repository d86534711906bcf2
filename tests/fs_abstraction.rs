// tests/fs_abstraction.rs
//
// The resolver only sees `FileSystem`; the real and mock implementations
// must agree on the cases it depends on.

#![cfg(unix)]

use std::fs;
use std::os::unix::fs::symlink;
use std::path::Path;

use tempfile::TempDir;

use execwrap::fs::mock::MockFileSystem;
use execwrap::fs::{FileSystem, RealFileSystem};

/// Same layout on disk and in the mock:
/// `bin/tool`, `bin/link -> tool`, `bin/dangling -> missing`, `bin/sub/`.
fn layouts() -> (TempDir, MockFileSystem) {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path();
    fs::create_dir_all(root.join("bin/sub")).unwrap();
    fs::write(root.join("bin/tool"), b"tool").unwrap();
    symlink("tool", root.join("bin/link")).unwrap();
    symlink("missing", root.join("bin/dangling")).unwrap();

    let mock = MockFileSystem::new();
    mock.add_file("/bin/tool", b"tool");
    mock.add_symlink("/bin/link", "tool");
    mock.add_symlink("/bin/dangling", "missing");
    mock.add_dir("/bin/sub");

    (tmp, mock)
}

fn check(fs: &dyn FileSystem, root: &Path) {
    let at = |rel: &str| root.join(rel);

    assert!(fs.has_entry(&at("bin/tool")));
    assert!(fs.has_entry(&at("bin/dangling")));
    assert!(!fs.has_entry(&at("bin/missing")));

    assert!(fs.is_file(&at("bin/tool")));
    assert!(fs.is_file(&at("bin/link")));
    assert!(!fs.is_file(&at("bin/dangling")));
    assert!(!fs.is_file(&at("bin/sub")));

    let canonical_root = fs.canonicalize(root).unwrap();
    assert_eq!(
        fs.canonicalize(&at("bin/link")).unwrap(),
        canonical_root.join("bin/tool")
    );
    assert!(fs.canonicalize(&at("bin/dangling")).is_err());
}

#[test]
fn real_and_mock_agree_on_entries_and_links() {
    let (tmp, mock) = layouts();
    check(&RealFileSystem, tmp.path());
    check(&mock, Path::new("/"));
}

#[test]
fn real_append_accumulates_lines() {
    let tmp = TempDir::new().unwrap();
    let log = tmp.path().join("cmds.txt");

    RealFileSystem.append(&log, b"one\n").unwrap();
    RealFileSystem.append(&log, b"two\n").unwrap();

    assert_eq!(RealFileSystem.read_to_string(&log).unwrap(), "one\ntwo\n");
}

#[test]
fn real_append_into_missing_directory_fails() {
    let tmp = TempDir::new().unwrap();
    let log = tmp.path().join("nope/cmds.txt");

    assert!(RealFileSystem.append(&log, b"x\n").is_err());
}
