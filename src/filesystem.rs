//! This module provides the protocol-aware filesystem facade.
//!
//! ### Key Features:
//! - **Virtual paths**: `res://`, `user://`, `temp://` (and any protocol registered with
//!   [`Filesystem::associate`]) are resolved to native paths before touching the OS.
//! - **Owned configuration**: application name and association table live in the
//!   [`Filesystem`] value itself, so independent configurations can coexist.
//! - **Recursive directory handling**: missing parents are created on demand, directories
//!   are removed depth-first.
//! - **Compatible error policy**: reads that cannot open a file return empty content,
//!   writes and removals report every failure.

use std::collections::VecDeque;
use std::sync::Arc;

use crate::associations::Associations;
use crate::core::{OsPrimitives, Result, WriteMode};
use crate::error::FsError;
use crate::os::HostOs;
use crate::path::{self, DEFAULT_APPLICATION_NAME, SEPARATOR};
use crate::resolver::Resolver;

/// Read-only application assets.
pub const ASSETS_PROTOCOL: &str = "res://";
/// Alias of [`ASSETS_PROTOCOL`].
pub const ASSETS_ALIAS_PROTOCOL: &str = "assets://";
/// Writable per-user application data.
pub const USER_PROTOCOL: &str = "user://";
/// Alias of [`USER_PROTOCOL`].
pub const USER_ALIAS_PROTOCOL: &str = "usr://";
/// Writable scratch space inside the user data directory.
pub const TEMP_PROTOCOL: &str = "temp://";
/// Name of the scratch directory below the user data directory.
pub const TEMP_DIRECTORY_NAME: &str = "temp";

/// Protocol-aware filesystem over an [`OsPrimitives`] layer.
///
/// ### Usage notes:
/// - Call [`Filesystem::initialize`] once at startup to register the reserved protocols.
///   Reserved protocols may be overwritten later with [`Filesystem::associate`].
/// - Everything is blocking and runs on the calling thread.
/// - Not thread‑safe: mutation requires `&mut self`; wrap in a `Mutex` to share.
///
/// ### Example:
/// ```
/// use resfs_kit::Filesystem;
/// use resfs_kit::os::MemoryOs;
///
/// let os = MemoryOs::new()
///     .with_cwd("/opt/game")
///     .with_user_data_directory("/home/me/.config");
/// let mut fs = Filesystem::new(os);
/// fs.initialize("my_game", "assets").unwrap();
///
/// fs.write_text("user://saves/slot1.txt", "level 3").unwrap();
/// assert_eq!(fs.read_text("user://saves/slot1.txt").unwrap(), "level 3");
/// assert_eq!(fs.resolve("res://maps/a.map"), "/opt/game/assets/maps/a.map");
/// ```
#[derive(Debug, Clone)]
pub struct Filesystem<O: OsPrimitives = HostOs> {
    os: O,
    resolver: Resolver,
    application_name: String,
}

impl Filesystem<HostOs> {
    /// Creates a filesystem over the host OS, with no association registered yet.
    pub fn host() -> Self {
        Self::new(HostOs::new())
    }
}

impl Default for Filesystem<HostOs> {
    fn default() -> Self {
        Self::host()
    }
}

impl<O: OsPrimitives> Filesystem<O> {
    pub fn new(os: O) -> Self {
        Self {
            os,
            resolver: Resolver::new(),
            application_name: DEFAULT_APPLICATION_NAME.to_string(),
        }
    }

    pub fn os(&self) -> &O {
        &self.os
    }

    pub fn os_mut(&mut self) -> &mut O {
        &mut self.os
    }

    pub fn resolver(&self) -> &Resolver {
        &self.resolver
    }

    /// Sets the application name and registers the reserved protocols.
    ///
    /// * `res://`, `assets://` – `assets_hint` as is when absolute, otherwise relative to
    ///   the current working directory. The directory is created.
    /// * `user://`, `usr://` – `<OS user data directory>/<application name>`.
    /// * `temp://` – `<user data directory>/temp`.
    ///
    /// Failing to create the assets directory aborts immediately. Failing to compute one of
    /// the locations is reported once both have been attempted.
    pub fn initialize(&mut self, application_name: &str, assets_hint: &str) -> Result<()> {
        self.set_application_name(application_name);

        let mut failures = Vec::new();

        match self.setup_assets_directory(assets_hint) {
            Some(assets_dir) => {
                self.associate(ASSETS_PROTOCOL, assets_dir.clone());
                self.associate(ASSETS_ALIAS_PROTOCOL, assets_dir);
                self.make_directory(ASSETS_PROTOCOL)?;
            }
            None => failures.push(String::from("cannot setup the assets directory")),
        }

        match self.setup_user_data_directory() {
            Some(user_dir) => {
                self.associate(TEMP_PROTOCOL, path::join(&user_dir, TEMP_DIRECTORY_NAME));
                self.associate(USER_ALIAS_PROTOCOL, user_dir.clone());
                self.associate(USER_PROTOCOL, user_dir);
            }
            None => failures.push(format!(
                "cannot setup the '{}' user data directory",
                self.application_name
            )),
        }

        if failures.is_empty() {
            Ok(())
        } else {
            Err(FsError::Initialization(failures.join(" and ")))
        }
    }

    /// An empty name resets to [`DEFAULT_APPLICATION_NAME`].
    pub fn set_application_name(&mut self, application_name: &str) {
        self.application_name = if application_name.is_empty() {
            DEFAULT_APPLICATION_NAME.to_string()
        } else {
            application_name.to_string()
        };
    }

    /// Maps `protocol` to `prefix`, overwriting any previous association.
    /// See [`Associations::associate`].
    pub fn associate(&mut self, protocol: &str, prefix: impl Into<String>) {
        self.resolver.associate(protocol, prefix);
    }

    pub fn application_name(&self) -> &str {
        &self.application_name
    }

    /// Returns the prefix of `protocol` (e.g. `"user://"`), or an empty string.
    pub fn get_association(&self, protocol: &str) -> &str {
        self.resolver.get_association(protocol)
    }

    pub fn associations(&self) -> &Associations {
        self.resolver.associations()
    }

    pub fn assets_directory(&self) -> &str {
        self.get_association(ASSETS_PROTOCOL)
    }

    pub fn user_data_directory(&self) -> &str {
        self.get_association(USER_PROTOCOL)
    }

    /// Normalized current working directory, empty if the OS cannot report one.
    pub fn current_directory(&self) -> String {
        self.os
            .current_working_directory()
            .map(|cwd| path::normalize(&cwd))
            .unwrap_or_default()
    }

    /// See [`Resolver::resolve`].
    pub fn resolve(&self, path: &str) -> String {
        self.resolver.resolve(path)
    }

    pub fn exists(&self, path: &str) -> bool {
        !path.is_empty() && self.os.exists(&self.resolve(path))
    }

    pub fn is_file(&self, path: &str) -> bool {
        !path.is_empty() && self.os.is_file(&self.resolve(path))
    }

    pub fn is_directory(&self, path: &str) -> bool {
        !path.is_empty() && self.os.is_directory(&self.resolve(path))
    }

    /// Reads the whole file at `path`.
    ///
    /// # Returns
    /// * `Ok(Vec<u8>)` - file content; **empty** if the file cannot be opened or read.
    /// * `Err(FsError::InvalidArgument)` - `path` carries no protocol prefix.
    pub fn read_binary(&self, path: &str) -> Result<Vec<u8>> {
        self.read_data("read_binary", path)
    }

    /// Reads the whole file at `path` as text. Invalid UTF-8 sequences are replaced with
    /// `U+FFFD`. Same error policy as [`Filesystem::read_binary`].
    pub fn read_text(&self, path: &str) -> Result<String> {
        let content = self.read_data("read_text", path)?;
        Ok(String::from_utf8(content)
            .unwrap_or_else(|err| String::from_utf8_lossy(err.as_bytes()).into_owned()))
    }

    /// Builds a `T` from the bytes of `path`.
    pub fn read_binary_as<T: From<Vec<u8>>>(&self, path: &str) -> Result<T> {
        self.read_binary(path).map(T::from)
    }

    /// Builds a `T` from the text of `path`.
    pub fn read_text_as<T: From<String>>(&self, path: &str) -> Result<T> {
        self.read_text(path).map(T::from)
    }

    pub fn read_shared_binary<T: From<Vec<u8>>>(&self, path: &str) -> Result<Arc<T>> {
        self.read_binary_as(path).map(Arc::new)
    }

    pub fn read_shared_text<T: From<String>>(&self, path: &str) -> Result<Arc<T>> {
        self.read_text_as(path).map(Arc::new)
    }

    pub fn read_boxed_binary<T: From<Vec<u8>>>(&self, path: &str) -> Result<Box<T>> {
        self.read_binary_as(path).map(Box::new)
    }

    pub fn read_boxed_text<T: From<String>>(&self, path: &str) -> Result<Box<T>> {
        self.read_text_as(path).map(Box::new)
    }

    /// Replaces the content of the file at `path`, creating it and its parents if needed.
    ///
    /// # Returns
    /// * `Err(FsError::InvalidArgument)` - no protocol prefix in `path`, or `data` is empty.
    /// * `Err(FsError::ParentDirectory)` - the parent chain could not be created.
    /// * `Err(FsError::Io)` - the file could not be opened or written.
    pub fn write_binary(&mut self, path: &str, data: &[u8]) -> Result<()> {
        self.write_data("write_binary", path, data, WriteMode::Truncate)
    }

    /// Like [`Filesystem::write_binary`], but adds `data` to the end of the file.
    pub fn append_binary(&mut self, path: &str, data: &[u8]) -> Result<()> {
        self.write_data("append_binary", path, data, WriteMode::Append)
    }

    pub fn write_text(&mut self, path: &str, text: &str) -> Result<()> {
        self.write_data("write_text", path, text.as_bytes(), WriteMode::Truncate)
    }

    pub fn append_text(&mut self, path: &str, text: &str) -> Result<()> {
        self.write_data("append_text", path, text.as_bytes(), WriteMode::Append)
    }

    /// Creates the directory at `path` together with every missing ancestor.
    ///
    /// Succeeds without doing anything when the directory already exists and fails with
    /// [`FsError::PathIsFile`] when a file occupies `path`. Ancestors are created from the
    /// root down; the first failing segment aborts the operation and is named in the
    /// error. Segments created before the failure are left in place.
    pub fn make_directory(&mut self, path: &str) -> Result<()> {
        if path.is_empty() {
            return Err(FsError::EmptyPath);
        }
        if self.is_directory(path) {
            return Ok(());
        }
        if self.is_file(path) {
            return Err(FsError::PathIsFile(path.to_string()));
        }

        let native = self.resolve(path);
        self.make_native_directory(&native)
    }

    /// Removes the directory at `path` and everything below it.
    ///
    /// A missing directory is not an error. Children are removed depth-first and the
    /// first failure stops the whole operation.
    pub fn remove_directory(&mut self, path: &str) -> Result<()> {
        if path.is_empty() {
            return Err(FsError::EmptyPath);
        }
        if !self.exists(path) {
            return Ok(());
        }
        if !self.is_directory(path) {
            return Err(FsError::NotADirectory(path.to_string()));
        }

        let native = self.resolve(path);
        self.remove_native_directory(&native)
    }

    /// Removes the file at `path`. Missing files and non-files are left alone.
    pub fn remove_file(&mut self, path: &str) -> Result<()> {
        if path.is_empty() {
            return Err(FsError::EmptyPath);
        }
        if !self.is_file(path) {
            return Ok(());
        }

        let native = self.resolve(path);
        log::debug!("removing file '{}'", native);
        self.os
            .remove_one_file(&native)
            .map_err(|source| FsError::io("cannot remove file", path, source))
    }

    /// Removes whatever lives at `path`: a directory recursively, otherwise a file.
    /// An empty or missing path is not an error.
    pub fn remove(&mut self, path: &str) -> Result<()> {
        if !self.exists(path) {
            return Ok(());
        }
        if self.is_directory(path) {
            self.remove_directory(path)
        } else {
            self.remove_file(path)
        }
    }

    /// Lists the children of the directory at `path` as virtual paths (`path` + name).
    /// Anything but a readable directory yields an empty list.
    pub fn entries(&self, path: &str) -> Vec<String> {
        if !self.is_directory(path) {
            return Vec::new();
        }

        let native = self.resolve(path);
        match self.os.list_entries(&native) {
            Ok(names) => names.iter().map(|name| path::join(path, name)).collect(),
            Err(e) => {
                log::warn!("cannot list '{}' ({}): {}", path, native, e);
                Vec::new()
            }
        }
    }

    fn require_protocol(operation: &str, path: &str) -> Result<()> {
        if Resolver::protocol_of(path).is_none() {
            return Err(FsError::InvalidArgument(format!(
                "[{}] protocol prefix expected in the path: '{}'",
                operation, path
            )));
        }
        Ok(())
    }

    fn read_data(&self, operation: &str, path: &str) -> Result<Vec<u8>> {
        Self::require_protocol(operation, path)?;

        let native = self.resolve(path);
        match self.os.read_file(&native) {
            Ok(content) => Ok(content),
            Err(e) => {
                log::warn!("cannot read '{}' ({}): {}", path, native, e);
                Ok(Vec::new())
            }
        }
    }

    fn write_data(
        &mut self,
        operation: &str,
        path: &str,
        data: &[u8],
        mode: WriteMode,
    ) -> Result<()> {
        Self::require_protocol(operation, path)?;
        if data.is_empty() {
            return Err(FsError::InvalidArgument(format!(
                "[{}] nothing to write to '{}'",
                operation, path
            )));
        }

        let native = self.resolve(path);
        self.make_native_directory(path::parent_directory(&native))
            .map_err(|source| FsError::ParentDirectory {
                path: path.to_string(),
                source: Box::new(source),
            })?;

        self.os
            .write_file(&native, data, mode)
            .map_err(|source| FsError::io("cannot write file", path, source))
    }

    fn setup_assets_directory(&self, assets_hint: &str) -> Option<String> {
        let assets_dir = if path::is_absolute(assets_hint) {
            path::normalize(assets_hint)
        } else {
            let cwd = self.os.current_working_directory()?;
            path::normalize(&path::join(&cwd, assets_hint))
        };
        (!assets_dir.is_empty()).then_some(assets_dir)
    }

    fn setup_user_data_directory(&self) -> Option<String> {
        match self.os.user_data_directory() {
            Some(dir) if !dir.is_empty() => {
                Some(path::normalize(&path::join(&dir, &self.application_name)))
            }
            _ => {
                log::warn!("the OS reports no user data directory");
                None
            }
        }
    }

    /// `native` is a resolved path; an empty one means "nothing to create".
    fn make_native_directory(&mut self, native: &str) -> Result<()> {
        let target = path::normalize(native);
        if target.is_empty() || self.os.is_directory(&target) {
            return Ok(());
        }
        if self.os.is_file(&target) {
            return Err(FsError::PathIsFile(target));
        }

        // walk up to the closest existing directory, remembering the missing segments
        let mut existing = target;
        let mut missing = VecDeque::new();
        while !self.os.is_directory(&existing) && !path::is_root(&existing) {
            let Some(index) = existing.rfind(path::is_separator) else {
                break;
            };
            missing.push_front(existing[index + 1..].to_string());
            existing.truncate(index);
            if existing.is_empty() || path::is_volume(&existing) {
                existing.push(SEPARATOR);
            }
        }

        let mut built = existing;
        for segment in missing {
            path::join_in_place(&mut built, &segment);
            log::debug!("creating directory '{}'", built);
            if let Err(source) = self.os.make_one_directory(&built) {
                return Err(FsError::io("cannot create directory", built, source));
            }
        }
        Ok(())
    }

    /// A symlink is removed as a link; its target is never entered.
    fn remove_native_directory(&mut self, native: &str) -> Result<()> {
        if self.os.is_symlink(native) {
            log::debug!("removing link '{}'", native);
            return self
                .os
                .remove_one_file(native)
                .map_err(|source| FsError::io("cannot remove link", native, source));
        }

        let names = self
            .os
            .list_entries(native)
            .map_err(|source| FsError::io("cannot list directory", native, source))?;

        for name in names {
            let mut child = native.to_string();
            path::join_in_place(&mut child, &name);

            if self.os.is_directory(&child) {
                self.remove_native_directory(&child)?;
            } else {
                log::debug!("removing file '{}'", child);
                if let Err(source) = self.os.remove_one_file(&child) {
                    return Err(FsError::io("cannot remove file", child, source));
                }
            }
        }

        log::debug!("removing directory '{}'", native);
        self.os
            .remove_one_directory(native)
            .map_err(|source| FsError::io("cannot remove directory", native, source))
    }
}
