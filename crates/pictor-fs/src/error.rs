//! Error types for the privileged side.
//!
//! Filesystem failures never reach the display side as distinguishable
//! values: [`DirectoryLister::list`](crate::DirectoryLister::list) turns every
//! [`ListError`] into an empty listing and drops entries that fail with an
//! [`EntryError`]. The types exist so the lister, its logs and its tests can
//! tell the causes apart.

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

/// Error type for a single filesystem operation.
#[derive(Debug)]
pub struct FsError {
    /// The kind of error that occurred.
    kind: FsErrorKind,
    /// The path involved in the error, if any.
    path: Option<PathBuf>,
    /// The underlying source error, if any.
    source: Option<io::Error>,
}

/// The kind of filesystem error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FsErrorKind {
    /// File or directory not found.
    NotFound,
    /// Permission denied by the OS.
    PermissionDenied,
    /// The path is a file, not a directory.
    NotDirectory,
    /// An unknown or unclassified error occurred.
    Other,
}

impl FsErrorKind {
    fn from_io_kind(kind: io::ErrorKind) -> Self {
        match kind {
            io::ErrorKind::NotFound => FsErrorKind::NotFound,
            io::ErrorKind::PermissionDenied => FsErrorKind::PermissionDenied,
            io::ErrorKind::NotADirectory => FsErrorKind::NotDirectory,
            _ => FsErrorKind::Other,
        }
    }
}

impl FsError {
    /// Creates an error from an I/O error and the path it concerns.
    pub fn from_io(err: io::Error, path: impl AsRef<Path>) -> Self {
        Self {
            kind: FsErrorKind::from_io_kind(err.kind()),
            path: Some(path.as_ref().to_path_buf()),
            source: Some(err),
        }
    }

    /// Creates a "permission denied" error for the given path.
    pub fn permission_denied(path: impl Into<PathBuf>) -> Self {
        Self {
            kind: FsErrorKind::PermissionDenied,
            path: Some(path.into()),
            source: None,
        }
    }

    /// Returns the kind of error.
    pub fn kind(&self) -> FsErrorKind {
        self.kind
    }

    /// Returns the path involved in the error, if any.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Returns true if this error indicates the path was not found.
    pub fn is_not_found(&self) -> bool {
        self.kind == FsErrorKind::NotFound
    }

    /// Returns true if this error indicates permission was denied.
    pub fn is_permission_denied(&self) -> bool {
        self.kind == FsErrorKind::PermissionDenied
    }
}

impl fmt::Display for FsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.path {
            Some(path) => write!(f, "{}: {}", self.kind, path.display()),
            None => write!(f, "{}", self.kind),
        }
    }
}

impl fmt::Display for FsErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FsErrorKind::NotFound => write!(f, "file not found"),
            FsErrorKind::PermissionDenied => write!(f, "permission denied"),
            FsErrorKind::NotDirectory => write!(f, "not a directory"),
            FsErrorKind::Other => write!(f, "filesystem error"),
        }
    }
}

impl std::error::Error for FsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e as &(dyn std::error::Error + 'static))
    }
}

/// A specialized Result type for filesystem operations.
pub type FsResult<T> = Result<T, FsError>;

/// Why a whole directory listing came back empty.
#[derive(Debug, thiserror::Error)]
pub enum ListError {
    /// The directory failed the access check.
    #[error("directory is not accessible: {0}")]
    Inaccessible(#[source] FsError),

    /// The path does not exist, could not be stat'ed, or is not a directory.
    #[error("not a directory: {}", path.display())]
    NotDirectory { path: PathBuf },

    /// The children of the directory could not be enumerated.
    #[error("failed to read directory {}: {source}", path.display())]
    ReadDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Why a single child was dropped from a listing.
#[derive(Debug, thiserror::Error)]
pub enum EntryError {
    /// The child failed the access check.
    #[error("entry is not accessible: {0}")]
    Inaccessible(#[source] FsError),

    /// The child passed the access check but could not be stat'ed.
    #[error("failed to stat entry: {0}")]
    Stat(#[source] FsError),

    /// The child is neither a regular file nor a directory.
    #[error("unsupported entry type: {}", path.display())]
    Unsupported { path: PathBuf },
}

/// Failure of a call across the `fs:dir` boundary.
#[derive(Debug, thiserror::Error)]
pub enum BridgeError {
    /// The privileged side is no longer accepting requests.
    #[error("bridge is closed")]
    Closed,

    /// The privileged side dropped the request without replying.
    #[error("bridge dropped the request without a reply")]
    NoReply,

    /// No handler is registered for the channel.
    #[error("unknown channel: {0}")]
    UnknownChannel(String),

    /// A request or reply could not be serialized.
    #[error("failed to encode bridge message: {0}")]
    Encode(#[source] serde_json::Error),

    /// A request or reply could not be deserialized.
    #[error("failed to decode bridge message: {0}")]
    Decode(#[source] serde_json::Error),

    /// The handler rejected the call.
    #[error("call rejected: {0}")]
    Rejected(String),
}

/// Failure reported by a [`DirectoryService`](crate::DirectoryService).
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// The call crossed the bridge and the bridge failed.
    #[error(transparent)]
    Bridge(#[from] BridgeError),

    /// The service could not serve the request.
    #[error("directory service unavailable: {0}")]
    Unavailable(String),
}
