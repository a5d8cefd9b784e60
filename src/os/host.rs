//! This module provides the native OS layer: [`OsPrimitives`] implemented over `std::fs`.
//!
//! ### Key Features:
//! - **Thin**: every method is one OS call, no recursion and no protocol handling.
//! - **Cross‑platform**: `std` accepts `/` separated paths on every supported host, so the
//!   normalized native paths produced by the resolver are used verbatim.
//! - **Per-user data root**: taken from `dirs::config_dir()` (`$XDG_CONFIG_HOME` or
//!   `~/.config` on Linux, `~/Library/Application Support` on macOS, roaming `AppData`
//!   on Windows).

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::Path;

use crate::core::{OsPrimitives, WriteMode};

/// [`OsPrimitives`] implementation backed by the host filesystem.
///
/// ### Usage notes:
/// - Type checks follow symlinks; removal removes the link, not the target.
/// - Permissions are not adjusted; directories are created with the process umask.
/// - Stateless, so it is `Copy` and can be shared freely.
#[derive(Debug, Default, Clone, Copy)]
pub struct HostOs;

impl HostOs {
    pub fn new() -> Self {
        HostOs
    }
}

fn to_native_string(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

impl OsPrimitives for HostOs {
    fn exists(&self, path: &str) -> bool {
        Path::new(path).exists()
    }

    fn is_file(&self, path: &str) -> bool {
        Path::new(path).is_file()
    }

    fn is_directory(&self, path: &str) -> bool {
        Path::new(path).is_dir()
    }

    fn is_symlink(&self, path: &str) -> bool {
        fs::symlink_metadata(path).is_ok_and(|metadata| metadata.file_type().is_symlink())
    }

    fn list_entries(&self, path: &str) -> io::Result<Vec<String>> {
        fs::read_dir(path)?
            .map(|entry| entry.map(|entry| entry.file_name().to_string_lossy().into_owned()))
            .collect()
    }

    fn make_one_directory(&mut self, path: &str) -> io::Result<()> {
        fs::create_dir(path)
    }

    fn remove_one_directory(&mut self, path: &str) -> io::Result<()> {
        fs::remove_dir(path)
    }

    fn remove_one_file(&mut self, path: &str) -> io::Result<()> {
        match fs::remove_file(path) {
            // directory links on Windows are removed like directories
            Err(_) if cfg!(windows) && self.is_symlink(path) => fs::remove_dir(path),
            result => result,
        }
    }

    fn read_file(&self, path: &str) -> io::Result<Vec<u8>> {
        fs::read(path)
    }

    fn write_file(&mut self, path: &str, data: &[u8], mode: WriteMode) -> io::Result<()> {
        let mut options = OpenOptions::new();
        options.create(true);
        match mode {
            WriteMode::Truncate => {
                options.write(true).truncate(true);
            }
            WriteMode::Append => {
                options.append(true);
            }
        }
        let mut file = options.open(path)?;
        file.write_all(data)
    }

    fn current_working_directory(&self) -> Option<String> {
        std::env::current_dir()
            .ok()
            .map(|cwd| to_native_string(&cwd))
    }

    fn user_data_directory(&self) -> Option<String> {
        dirs::config_dir().map(|dir| to_native_string(&dir))
    }
}
