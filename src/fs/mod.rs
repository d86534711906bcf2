// src/fs/mod.rs

//! Filesystem capability used by the resolver and the default recorder.
//!
//! Everything that touches the disk goes through [`FileSystem`] so tests can
//! swap in [`mock::MockFileSystem`] instead of creating real files.

use std::fmt::Debug;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

pub mod mock;

/// Abstract filesystem interface.
pub trait FileSystem: Send + Sync + Debug {
    /// True if anything (file, directory, or symlink, even a dangling one)
    /// sits at `path`. Symlinks are not followed.
    fn has_entry(&self, path: &Path) -> bool;

    /// True if `path` resolves, following symlinks, to a regular file.
    fn is_file(&self, path: &Path) -> bool;

    /// Absolute path with every symlink resolved. Fails if any link on the
    /// way dangles or the final target does not exist.
    fn canonicalize(&self, path: &Path) -> Result<PathBuf>;

    /// Read back what [`FileSystem::append`] wrote. Production code never
    /// reads through this trait (the settings loader uses `std::fs`
    /// directly); tests use it to inspect record logs on either backend.
    fn read_to_string(&self, path: &Path) -> Result<String>;

    /// Append `contents` to `path` in one write, creating the file if needed.
    fn append(&self, path: &Path, contents: &[u8]) -> Result<()>;
}

/// Implementation that uses `std::fs`.
#[derive(Debug, Clone, Default)]
pub struct RealFileSystem;

impl FileSystem for RealFileSystem {
    fn has_entry(&self, path: &Path) -> bool {
        fs::symlink_metadata(path).is_ok()
    }

    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn canonicalize(&self, path: &Path) -> Result<PathBuf> {
        fs::canonicalize(path).with_context(|| format!("canonicalizing {:?}", path))
    }

    fn read_to_string(&self, path: &Path) -> Result<String> {
        fs::read_to_string(path).with_context(|| format!("reading file {:?}", path))
    }

    fn append(&self, path: &Path, contents: &[u8]) -> Result<()> {
        // O_APPEND plus a single write keeps concurrent records from
        // interleaving for lines below PIPE_BUF on local filesystems.
        let mut file = fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("opening {:?} for append", path))?;
        file.write_all(contents)
            .with_context(|| format!("appending to {:?}", path))?;
        Ok(())
    }
}
