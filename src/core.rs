use std::io;

pub use crate::error::Result;

/// How [`OsPrimitives::write_file`] treats existing content.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum WriteMode {
    /// Create the file or replace its content.
    Truncate,
    /// Create the file or add to the end of its content.
    Append,
}

/// Blocking OS primitives that the virtual filesystem is built upon.
///
/// Every `path` handed to an implementation is a *native* path, already resolved and
/// normalized (`/` separators, optional `X:/` drive prefix). Implementations do no
/// protocol handling and no recursion: one call, one OS operation.
pub trait OsPrimitives {
    fn exists(&self, path: &str) -> bool;
    fn is_file(&self, path: &str) -> bool;
    fn is_directory(&self, path: &str) -> bool;
    /// True when `path` itself is a symbolic link, whatever it points to.
    /// The other checks follow links.
    fn is_symlink(&self, path: &str) -> bool;

    /// Names (not paths) of the direct children of the directory at `path`.
    fn list_entries(&self, path: &str) -> io::Result<Vec<String>>;

    /// Creates a single directory. The parent must already exist.
    fn make_one_directory(&mut self, path: &str) -> io::Result<()>;
    /// Removes a single, empty directory.
    fn remove_one_directory(&mut self, path: &str) -> io::Result<()>;
    /// Removes a single file, or a symbolic link without touching its target.
    fn remove_one_file(&mut self, path: &str) -> io::Result<()>;

    fn read_file(&self, path: &str) -> io::Result<Vec<u8>>;
    fn write_file(&mut self, path: &str, data: &[u8], mode: WriteMode) -> io::Result<()>;

    fn current_working_directory(&self) -> Option<String>;
    /// Per-user application data root (e.g. `~/.config`), without the application name.
    fn user_data_directory(&self) -> Option<String>;
}
