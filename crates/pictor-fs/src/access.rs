//! Read/write accessibility checks.
//!
//! On unix the check is `access(2)`, so it answers for the calling process's
//! real user and groups: owner, group and other bits all count, and root
//! passes where the kernel lets it. Elsewhere a path is readable when it can
//! be opened and writable when it is not marked read-only. The check never
//! opens anything for writing and never creates files.

use std::path::Path;

use crate::error::{FsError, FsResult};

/// Which kinds of access a path must allow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccessMode {
    /// The path must be readable.
    pub read: bool,
    /// The path must be writable.
    pub write: bool,
}

impl AccessMode {
    /// Read access only.
    pub const READ: Self = Self {
        read: true,
        write: false,
    };

    /// Read and write access.
    pub const READ_WRITE: Self = Self {
        read: true,
        write: true,
    };

    #[cfg(unix)]
    fn flags(self) -> rustix::fs::Access {
        use rustix::fs::Access;

        let mut flags = Access::EXISTS;
        if self.read {
            flags |= Access::READ_OK;
        }
        if self.write {
            flags |= Access::WRITE_OK;
        }
        flags
    }
}

impl Default for AccessMode {
    fn default() -> Self {
        Self::READ_WRITE
    }
}

/// Checks that `path` exists and allows the requested access.
///
/// Symlinks are followed, so a dangling symlink fails with a not-found error.
#[cfg(unix)]
pub async fn check_access(path: &Path, mode: AccessMode) -> FsResult<()> {
    let owned = path.to_path_buf();
    let flags = mode.flags();
    tokio::task::spawn_blocking(move || rustix::fs::access(owned.as_path(), flags))
        .await
        .map_err(|e| FsError::from_io(std::io::Error::other(e), path))?
        .map_err(|errno| FsError::from_io(errno.into(), path))
}

/// Checks that `path` exists and allows the requested access.
///
/// Symlinks are followed, so a dangling symlink fails with a not-found error.
#[cfg(not(unix))]
pub async fn check_access(path: &Path, mode: AccessMode) -> FsResult<()> {
    use tokio::fs;

    let metadata = fs::metadata(path)
        .await
        .map_err(|e| FsError::from_io(e, path))?;

    if mode.write && metadata.permissions().readonly() {
        return Err(FsError::permission_denied(path));
    }

    if mode.read {
        if metadata.is_dir() {
            fs::read_dir(path)
                .await
                .map_err(|e| FsError::from_io(e, path))?;
        } else if metadata.is_file() {
            fs::File::open(path)
                .await
                .map_err(|e| FsError::from_io(e, path))?;
        }
    }

    Ok(())
}
