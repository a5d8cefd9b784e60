//! Protocol-prefixed virtual paths for applications and games.
//!
//! ### Overview
//!
//! `resfs-kit` lets an application address its files through virtual paths such as
//! `res://textures/wall.png` or `user://saves/slot1.sav`. Each protocol is associated with a
//! native directory prefix; the [`Filesystem`] resolves virtual paths and performs the
//! actual I/O through an [`OsPrimitives`] layer.
//!
//! **Key ideas**:
//! - **Reserved locations**: [`Filesystem::initialize`] registers `res://` / `assets://`
//!   (read-only assets), `user://` / `usr://` (per-user data) and `temp://`.
//! - **Canonical paths**: [`path::normalize`] makes paths slash-agnostic and strips `.`,
//!   `..` and redundant separators, clamping at the root.
//! - **Testability**: [`os::MemoryOs`] answers like a real disk, so everything above the OS
//!   layer can be exercised without side effects.
//!
//! ### Example
//!
//! ```
//! use resfs_kit::path::normalize;
//!
//! assert_eq!(normalize("/a/./b/../c/"), "/a/c");
//! assert_eq!(normalize("C:\\Users\\..\\Games"), "C:/Games");
//! assert_eq!(normalize("/a/../../b"), "/");
//! ```

mod associations;
mod core;
mod error;
mod filesystem;
pub mod os;
pub mod path;
mod resolver;

pub use associations::Associations;
pub use core::{OsPrimitives, Result, WriteMode};
pub use error::FsError;
pub use filesystem::{
    ASSETS_ALIAS_PROTOCOL, ASSETS_PROTOCOL, Filesystem, TEMP_DIRECTORY_NAME, TEMP_PROTOCOL,
    USER_ALIAS_PROTOCOL, USER_PROTOCOL,
};
pub use os::{Entry, EntryType, HostOs, MemoryOs};
pub use resolver::Resolver;
