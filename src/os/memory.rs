//! This module provides an in-memory OS layer: [`OsPrimitives`] over an ordered map.

use std::collections::BTreeMap;
use std::io::{self, ErrorKind};

use crate::core::{OsPrimitives, WriteMode};
use crate::os::{Entry, EntryType};
use crate::path;

/// An [`OsPrimitives`] implementation that keeps file and directory entries in memory.
///
/// It answers exactly like a host filesystem would for the primitives the virtual
/// filesystem relies on, which makes every higher-level operation testable without disk
/// access.
///
/// ### Internal state
///
/// * `entries` - key: normalized native path (`/a/b`, `C:/x`), value: [`Entry`].
///   Uses `BTreeMap` for deterministic iteration and cheap prefix queries.
/// * `cwd` - reported by `current_working_directory()`; default `/`.
/// * `user_data_dir` - reported by `user_data_directory()`; default `None`.
///
/// ### Invariants
///
/// 1. **Root existence**: `/` is always present and is a directory. Drive roots (`C:/`)
///    come into existence when a directory is first created directly below them.
/// 2. **Parent consistency**: every entry other than a root has a `Directory` parent.
///
/// ### Example
///
/// ```
/// use resfs_kit::os::MemoryOs;
/// use resfs_kit::OsPrimitives;
///
/// let mut os = MemoryOs::new();
/// os.make_one_directory("/docs").unwrap();
/// assert!(os.is_directory("/docs"));
/// ```
#[derive(Debug, Clone)]
pub struct MemoryOs {
    entries: BTreeMap<String, Entry>,
    cwd: String,
    user_data_dir: Option<String>,
}

impl Default for MemoryOs {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryOs {
    /// Creates an empty tree holding the root directory only.
    pub fn new() -> Self {
        let root = path::SEPARATOR.to_string();
        let mut entries = BTreeMap::new();
        entries.insert(root.clone(), Entry::new(EntryType::Directory));

        Self {
            entries,
            cwd: root,
            user_data_dir: None,
        }
    }

    /// Sets the working directory reported to callers. It is not created.
    pub fn with_cwd(mut self, cwd: &str) -> Self {
        self.cwd = path::normalize(cwd);
        self
    }

    /// Sets the per-user data root reported to callers. It is not created.
    pub fn with_user_data_directory(mut self, dir: &str) -> Self {
        self.user_data_dir = Some(path::normalize(dir));
        self
    }

    /// Creates `dir` and all its missing parents.
    pub fn with_directories(mut self, dir: &str) -> io::Result<Self> {
        let target = path::normalize(dir);
        // normalized paths start with their root: `/` or `X:/`
        let Some(root_len) = target.find(path::SEPARATOR).map(|index| index + 1) else {
            return Ok(self);
        };
        let mut built = target[..root_len].to_string();
        self.entries
            .entry(built.clone())
            .or_insert_with(|| Entry::new(EntryType::Directory));

        for part in target[root_len..].split(path::SEPARATOR).filter(|part| !part.is_empty()) {
            path::join_in_place(&mut built, part);
            if !self.is_directory(&built) {
                self.make_one_directory(&built)?;
            }
        }
        Ok(self)
    }

    /// Returns the entry stored at `path`, if any.
    pub fn entry(&self, path: &str) -> Option<&Entry> {
        self.entries.get(&path::normalize(path))
    }

    /// Number of entries, root included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn key(path: &str) -> io::Result<String> {
        let key = path::normalize(path);
        if key.is_empty() {
            return Err(io::Error::new(ErrorKind::InvalidInput, "empty path"));
        }
        Ok(key)
    }

    fn parent_key(key: &str) -> String {
        let parent = path::parent_directory(key);
        if parent.is_empty() || path::is_volume(parent) {
            // parent of `/a` is `/`, parent of `C:/a` is `C:/`
            format!("{}{}", parent, path::SEPARATOR)
        } else {
            parent.to_string()
        }
    }

    fn children<'a>(&'a self, key: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.entries
            .keys()
            .map(String::as_str)
            .filter(move |&candidate| candidate != key && Self::parent_key(candidate) == key)
    }

    fn require_parent_directory(&self, key: &str) -> io::Result<()> {
        let parent = Self::parent_key(key);
        if path::is_root(&parent) && parent != "/" {
            // drive roots always accept children
            return Ok(());
        }
        match self.entries.get(&parent) {
            Some(entry) if entry.is_dir() => Ok(()),
            Some(_) => Err(io::Error::new(
                ErrorKind::Other,
                format!("not a directory: {}", parent),
            )),
            None => Err(io::Error::new(
                ErrorKind::NotFound,
                format!("no such directory: {}", parent),
            )),
        }
    }
}

impl OsPrimitives for MemoryOs {
    fn exists(&self, path: &str) -> bool {
        Self::key(path).is_ok_and(|key| self.entries.contains_key(&key))
    }

    fn is_file(&self, path: &str) -> bool {
        Self::key(path).is_ok_and(|key| self.entries.get(&key).is_some_and(Entry::is_file))
    }

    fn is_directory(&self, path: &str) -> bool {
        Self::key(path).is_ok_and(|key| self.entries.get(&key).is_some_and(Entry::is_dir))
    }

    fn is_symlink(&self, _path: &str) -> bool {
        false
    }

    fn list_entries(&self, path: &str) -> io::Result<Vec<String>> {
        let key = Self::key(path)?;
        if !self.is_directory(&key) {
            return Err(io::Error::new(
                ErrorKind::NotFound,
                format!("no such directory: {}", key),
            ));
        }
        Ok(self
            .children(&key)
            .map(|child| child[child.rfind(path::SEPARATOR).map_or(0, |i| i + 1)..].to_string())
            .collect())
    }

    fn make_one_directory(&mut self, path: &str) -> io::Result<()> {
        let key = Self::key(path)?;
        if self.entries.contains_key(&key) {
            return Err(io::Error::new(
                ErrorKind::AlreadyExists,
                format!("already exists: {}", key),
            ));
        }
        if !path::is_root(&key) {
            self.require_parent_directory(&key)?;
            let parent = Self::parent_key(&key);
            self.entries
                .entry(parent)
                .or_insert_with(|| Entry::new(EntryType::Directory));
        }
        self.entries.insert(key, Entry::new(EntryType::Directory));
        Ok(())
    }

    fn remove_one_directory(&mut self, path: &str) -> io::Result<()> {
        let key = Self::key(path)?;
        if !self.is_directory(&key) {
            return Err(io::Error::new(
                ErrorKind::NotFound,
                format!("no such directory: {}", key),
            ));
        }
        if key == "/" {
            return Err(io::Error::new(
                ErrorKind::PermissionDenied,
                "the root cannot be removed",
            ));
        }
        if self.children(&key).next().is_some() {
            return Err(io::Error::new(
                ErrorKind::Other,
                format!("directory not empty: {}", key),
            ));
        }
        self.entries.remove(&key);
        Ok(())
    }

    fn remove_one_file(&mut self, path: &str) -> io::Result<()> {
        let key = Self::key(path)?;
        if !self.is_file(&key) {
            return Err(io::Error::new(
                ErrorKind::NotFound,
                format!("no such file: {}", key),
            ));
        }
        self.entries.remove(&key);
        Ok(())
    }

    fn read_file(&self, path: &str) -> io::Result<Vec<u8>> {
        let key = Self::key(path)?;
        match self.entries.get(&key) {
            Some(entry) if entry.is_file() => Ok(entry.content().cloned().unwrap_or_default()),
            Some(_) => Err(io::Error::new(
                ErrorKind::Other,
                format!("is a directory: {}", key),
            )),
            None => Err(io::Error::new(
                ErrorKind::NotFound,
                format!("no such file: {}", key),
            )),
        }
    }

    fn write_file(&mut self, path: &str, data: &[u8], mode: WriteMode) -> io::Result<()> {
        let key = Self::key(path)?;
        if self.is_directory(&key) {
            return Err(io::Error::new(
                ErrorKind::Other,
                format!("is a directory: {}", key),
            ));
        }
        self.require_parent_directory(&key)?;

        let entry = self
            .entries
            .entry(key)
            .or_insert_with(|| Entry::new(EntryType::File));
        match mode {
            WriteMode::Truncate => entry.set_content(data),
            WriteMode::Append => entry.append_content(data),
        }
        Ok(())
    }

    fn current_working_directory(&self) -> Option<String> {
        Some(self.cwd.clone())
    }

    fn user_data_directory(&self) -> Option<String> {
        self.user_data_dir.clone()
    }
}
