// src/fs/mock.rs

use super::FileSystem;
use anyhow::{anyhow, bail, Result};
use std::collections::{HashMap, HashSet};
use std::ffi::OsString;
use std::path::{Component, Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

/// Same limit Linux applies before returning `ELOOP`.
const MAX_SYMLINK_HOPS: usize = 40;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockEntry {
    File(Vec<u8>),
    Dir,
    Symlink(PathBuf),
}

#[derive(Debug, Default)]
struct State {
    entries: HashMap<PathBuf, MockEntry>,
    forbidden: HashSet<PathBuf>,
}

/// In-memory filesystem rooted at `/`.
///
/// Relative paths are taken relative to `/`. Symlinks are resolved component
/// by component like the kernel does, so dangling links, loops and
/// permission-denied directories fail `canonicalize` the same way they would
/// on disk.
#[derive(Debug, Clone)]
pub struct MockFileSystem {
    state: Arc<Mutex<State>>,
}

impl Default for MockFileSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl MockFileSystem {
    pub fn new() -> Self {
        let mut state = State::default();
        state.entries.insert(PathBuf::from("/"), MockEntry::Dir);
        Self {
            state: Arc::new(Mutex::new(state)),
        }
    }

    pub fn add_file(&self, path: impl AsRef<Path>, content: impl Into<Vec<u8>>) {
        let path = absolute(path.as_ref());
        let mut state = self.lock();
        ensure_parents(&mut state.entries, &path);
        state.entries.insert(path, MockEntry::File(content.into()));
    }

    pub fn add_dir(&self, path: impl AsRef<Path>) {
        let path = absolute(path.as_ref());
        let mut state = self.lock();
        ensure_parents(&mut state.entries, &path);
        state.entries.insert(path, MockEntry::Dir);
    }

    /// Create `link` pointing at `target`. The target need not exist.
    pub fn add_symlink(&self, link: impl AsRef<Path>, target: impl AsRef<Path>) {
        let link = absolute(link.as_ref());
        let mut state = self.lock();
        ensure_parents(&mut state.entries, &link);
        state
            .entries
            .insert(link, MockEntry::Symlink(target.as_ref().to_path_buf()));
    }

    /// Make any lookup that passes through `path` fail with "permission denied".
    pub fn forbid(&self, path: impl AsRef<Path>) {
        let path = absolute(path.as_ref());
        self.lock().forbidden.insert(path);
    }

    /// Raw bytes stored at `path`, following symlinks.
    pub fn contents(&self, path: impl AsRef<Path>) -> Option<Vec<u8>> {
        let state = self.lock();
        let resolved = resolve(&state, path.as_ref()).ok()?;
        match state.entries.get(&resolved) {
            Some(MockEntry::File(bytes)) => Some(bytes.clone()),
            _ => None,
        }
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        // A panic in another test thread must not hide this one's result.
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl FileSystem for MockFileSystem {
    fn has_entry(&self, path: &Path) -> bool {
        let state = self.lock();
        let path = absolute(path);
        let (Some(parent), Some(name)) = (path.parent(), path.file_name()) else {
            return true; // "/"
        };
        match resolve(&state, parent) {
            Ok(parent) => state.entries.contains_key(&parent.join(name)),
            Err(_) => false,
        }
    }

    fn is_file(&self, path: &Path) -> bool {
        let state = self.lock();
        match resolve(&state, path) {
            Ok(resolved) => matches!(state.entries.get(&resolved), Some(MockEntry::File(_))),
            Err(_) => false,
        }
    }

    fn canonicalize(&self, path: &Path) -> Result<PathBuf> {
        let state = self.lock();
        resolve(&state, path)
    }

    fn read_to_string(&self, path: &Path) -> Result<String> {
        let state = self.lock();
        let resolved = resolve(&state, path)?;
        match state.entries.get(&resolved) {
            Some(MockEntry::File(content)) => {
                String::from_utf8(content.clone()).map_err(|e| anyhow!("Invalid UTF-8: {}", e))
            }
            _ => Err(anyhow!("Is a directory: {:?}", path)),
        }
    }

    fn append(&self, path: &Path, contents: &[u8]) -> Result<()> {
        let mut state = self.lock();
        let target = match resolve(&state, path) {
            Ok(existing) => existing,
            Err(_) => {
                let path = absolute(path);
                let parent = path
                    .parent()
                    .ok_or_else(|| anyhow!("cannot append to {:?}", path))?;
                let parent = resolve(&state, parent)?;
                if state.entries.get(&parent) != Some(&MockEntry::Dir) {
                    bail!("Not a directory: {:?}", parent);
                }
                let name = path
                    .file_name()
                    .ok_or_else(|| anyhow!("cannot append to {:?}", path))?;
                parent.join(name)
            }
        };

        match state
            .entries
            .entry(target.clone())
            .or_insert_with(|| MockEntry::File(Vec::new()))
        {
            MockEntry::File(bytes) => {
                bytes.extend_from_slice(contents);
                Ok(())
            }
            _ => Err(anyhow!("Is a directory: {:?}", target)),
        }
    }
}

fn absolute(path: &Path) -> PathBuf {
    if path.has_root() {
        path.to_path_buf()
    } else {
        Path::new("/").join(path)
    }
}

fn ensure_parents(entries: &mut HashMap<PathBuf, MockEntry>, path: &Path) {
    let mut current = path.parent();
    while let Some(dir) = current {
        entries.entry(dir.to_path_buf()).or_insert(MockEntry::Dir);
        current = dir.parent();
    }
}

/// Walk `path` one component at a time, expanding symlinks as they appear.
fn resolve(state: &State, path: &Path) -> Result<PathBuf> {
    let mut pending: Vec<OsString> = Vec::new();
    push_components(&mut pending, &absolute(path));

    let mut resolved = PathBuf::from("/");
    let mut hops = 0;

    while let Some(part) = pending.pop() {
        if part == "." {
            continue;
        }
        if part == ".." {
            resolved.pop();
            continue;
        }

        let next = resolved.join(&part);
        if state.forbidden.contains(&next) {
            bail!("Permission denied: {:?}", next);
        }

        match state.entries.get(&next) {
            None => bail!("No such file or directory: {:?}", next),
            Some(MockEntry::Symlink(target)) => {
                hops += 1;
                if hops > MAX_SYMLINK_HOPS {
                    bail!("Too many levels of symbolic links: {:?}", path);
                }
                if target.has_root() {
                    resolved = PathBuf::from("/");
                }
                push_components(&mut pending, target);
            }
            Some(MockEntry::File(_)) if !pending.is_empty() => {
                bail!("Not a directory: {:?}", next);
            }
            Some(_) => resolved = next,
        }
    }

    Ok(resolved)
}

/// Push the components of `path` so that the first one is popped first.
fn push_components(pending: &mut Vec<OsString>, path: &Path) {
    for component in path.components().rev() {
        match component {
            Component::Normal(name) => pending.push(name.to_os_string()),
            Component::CurDir => pending.push(OsString::from(".")),
            Component::ParentDir => pending.push(OsString::from("..")),
            Component::RootDir | Component::Prefix(_) => {}
        }
    }
}
