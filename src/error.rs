use thiserror::Error;

/// The single failure type returned by every fallible operation of the crate.
#[derive(Error, Debug)]
pub enum FsError {
    /// A caller-supplied argument is unusable, e.g. a read without a protocol prefix.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("empty path")]
    EmptyPath,

    /// An OS primitive failed on `path`.
    #[error("{context}: '{path}' ({source})")]
    Io {
        context: &'static str,
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// A directory was requested where a file already lives.
    #[error("path is a file: '{0}'")]
    PathIsFile(String),

    #[error("not a directory: '{0}'")]
    NotADirectory(String),

    /// Creating the parent chain of a file about to be written failed.
    #[error("cannot create parent directory for '{path}': {source}")]
    ParentDirectory {
        path: String,
        #[source]
        source: Box<FsError>,
    },

    #[error("initialization failed: {0}")]
    Initialization(String),
}

impl FsError {
    pub(crate) fn io(context: &'static str, path: impl Into<String>, source: std::io::Error) -> Self {
        FsError::Io {
            context,
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, FsError>;
