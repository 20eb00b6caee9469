//! Directory listing for the privileged side.
//!
//! [`DirectoryLister::list`] answers the `fs:dir` request: it normalizes the
//! requested path, checks that the directory is readable and writable,
//! enumerates its immediate children, checks every child concurrently and
//! returns the children that are accessible regular files or directories.
//!
//! # Example
//!
//! ```ignore
//! use pictor_fs::{DirectoryLister, ListerConfig};
//!
//! let lister = DirectoryLister::new(ListerConfig::new().with_asset_root("/opt/pictor/renderer"));
//! for entry in lister.list("~/Pictures/../Pictures").await {
//!     println!("{} dir={} file={}", entry.filename, entry.is_directory, entry.is_file);
//! }
//! ```
//!
//! The listing never fails from the caller's point of view. An inaccessible
//! path, a path that is not a directory and a directory that cannot be read
//! all produce an empty listing; [`DirectoryLister::try_list`] reports which
//! of those happened.

use std::path::{Path, PathBuf};

use futures_util::future::join_all;
use tokio::fs;
use tracing::Instrument;

use pictor_core::logging::targets;

use crate::access::{AccessMode, check_access};
use crate::entry::{DirEntry, Listing};
use crate::error::{EntryError, FsError, ListError};
use crate::path;

/// Name of the asset directory installed next to the executable's directory.
pub const DEFAULT_ASSET_DIR: &str = "renderer";

/// Returns `<exe dir>/../renderer`, the install-relative asset root.
///
/// Falls back to a bare `renderer`, resolved against the working directory,
/// when the executable's location is unknown.
pub fn default_asset_root() -> PathBuf {
    match std::env::current_exe() {
        Ok(exe) => match exe.parent() {
            Some(dir) => path::normalize(dir.join("..").join(DEFAULT_ASSET_DIR)),
            None => PathBuf::from(DEFAULT_ASSET_DIR),
        },
        Err(err) => {
            tracing::warn!(target: targets::LISTER, error = %err, "executable location unknown, asset root falls back to the working directory");
            PathBuf::from(DEFAULT_ASSET_DIR)
        }
    }
}

/// Configuration for a [`DirectoryLister`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListerConfig {
    /// Base directory file entries are made relative to.
    ///
    /// A relative asset root is resolved against the working directory at
    /// listing time.
    pub asset_root: PathBuf,
    /// Access the listed directory and each child must allow.
    pub access: AccessMode,
}

impl Default for ListerConfig {
    fn default() -> Self {
        Self {
            asset_root: default_asset_root(),
            access: AccessMode::READ_WRITE,
        }
    }
}

impl ListerConfig {
    /// Create a configuration with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the asset root.
    pub fn with_asset_root(mut self, asset_root: impl Into<PathBuf>) -> Self {
        self.asset_root = asset_root.into();
        self
    }

    /// Set the required access mode.
    pub fn with_access(mut self, access: AccessMode) -> Self {
        self.access = access;
        self
    }
}

/// Lists immediate children of a directory.
#[derive(Debug, Clone, Default)]
pub struct DirectoryLister {
    config: ListerConfig,
}

impl DirectoryLister {
    /// Create a lister with the given configuration.
    pub fn new(config: ListerConfig) -> Self {
        Self { config }
    }

    /// Returns the lister configuration.
    pub fn config(&self) -> &ListerConfig {
        &self.config
    }

    /// Lists `raw_path`, degrading every failure to an empty listing.
    pub async fn list(&self, raw_path: &str) -> Listing {
        match self.try_list(raw_path).await {
            Ok(listing) => listing,
            Err(err) => {
                tracing::debug!(target: targets::LISTER, path = raw_path, error = %err, "listing degraded to empty");
                Listing::new()
            }
        }
    }

    /// Lists `raw_path`, reporting why the listing is empty when it fails.
    ///
    /// Children that fail their own check are dropped and never fail the
    /// listing.
    pub async fn try_list(&self, raw_path: &str) -> Result<Listing, ListError> {
        let span = tracing::debug_span!(target: targets::LISTER, "list", path = raw_path);
        self.list_normalized(path::normalize(raw_path))
            .instrument(span)
            .await
    }

    async fn list_normalized(&self, dir: PathBuf) -> Result<Listing, ListError> {
        check_access(&dir, self.config.access)
            .await
            .map_err(ListError::Inaccessible)?;

        let is_dir = fs::metadata(&dir)
            .await
            .map(|metadata| metadata.is_dir())
            .unwrap_or(false);
        if !is_dir {
            return Err(ListError::NotDirectory { path: dir });
        }

        let names = read_child_names(&dir)
            .await
            .map_err(|source| ListError::ReadDir {
                path: dir.clone(),
                source,
            })?;

        let checks = names
            .iter()
            .map(|name| self.classify(path::join_normalized(&dir, name)));
        let results = join_all(checks).await;

        let total = results.len();
        let listing: Listing = results
            .into_iter()
            .filter_map(|result| match result {
                Ok(entry) => Some(entry),
                Err(err) => {
                    tracing::debug!(target: targets::LISTER, error = %err, "dropping entry");
                    None
                }
            })
            .collect();

        tracing::debug!(
            target: targets::LISTER,
            kept = listing.len(),
            dropped = total - listing.len(),
            "listed directory"
        );
        Ok(listing)
    }

    /// Checks and classifies a single path.
    ///
    /// Directories keep their absolute normalized path; regular files are
    /// expressed relative to the asset root.
    pub async fn classify(&self, entry_path: PathBuf) -> Result<DirEntry, EntryError> {
        check_access(&entry_path, self.config.access)
            .await
            .map_err(EntryError::Inaccessible)?;

        let metadata = fs::metadata(&entry_path)
            .await
            .map_err(|e| EntryError::Stat(FsError::from_io(e, &entry_path)))?;

        if metadata.is_dir() {
            let absolute = path::absolute(&entry_path).map_err(EntryError::Stat)?;
            Ok(DirEntry::directory(absolute.to_string_lossy()))
        } else if metadata.is_file() {
            let relative = self.asset_relative(&entry_path).map_err(EntryError::Stat)?;
            Ok(DirEntry::file(relative.to_string_lossy()))
        } else {
            Err(EntryError::Unsupported { path: entry_path })
        }
    }

    fn asset_relative(&self, entry_path: &Path) -> Result<PathBuf, FsError> {
        let root = path::absolute(&self.config.asset_root)?;
        let target = path::absolute(entry_path)?;
        Ok(path::relative_to(root, target))
    }
}

async fn read_child_names(dir: &Path) -> std::io::Result<Vec<std::ffi::OsString>> {
    let mut reader = fs::read_dir(dir).await?;
    let mut names = Vec::new();
    while let Some(entry) = reader.next_entry().await? {
        names.push(entry.file_name());
    }
    Ok(names)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn lister_for(root: &Path) -> DirectoryLister {
        DirectoryLister::new(ListerConfig::new().with_asset_root(root))
    }

    #[test]
    fn test_default_asset_root_sits_beside_the_exe_dir() {
        let exe = std::env::current_exe().unwrap();
        let install = exe.parent().unwrap().parent().unwrap();

        let root = default_asset_root();
        assert_eq!(root, path::normalize(install.join(DEFAULT_ASSET_DIR)));
        assert_eq!(ListerConfig::default().asset_root, root);
    }

    #[tokio::test]
    async fn test_classify_directory_is_absolute() {
        let temp = TempDir::new().unwrap();
        let sub = temp.path().join("sub");
        std::fs::create_dir(&sub).unwrap();

        let entry = lister_for(temp.path()).classify(sub.clone()).await.unwrap();
        assert_eq!(entry, DirEntry::directory(sub.to_string_lossy()));
    }

    #[tokio::test]
    async fn test_classify_file_is_asset_relative() {
        let temp = TempDir::new().unwrap();
        let assets = temp.path().join("renderer");
        let images = temp.path().join("images");
        std::fs::create_dir(&assets).unwrap();
        std::fs::create_dir(&images).unwrap();
        std::fs::write(images.join("cat.png"), b"png").unwrap();

        let entry = lister_for(&assets)
            .classify(images.join("cat.png"))
            .await
            .unwrap();
        let expected = Path::new("..").join("images").join("cat.png");
        assert_eq!(entry, DirEntry::file(expected.to_string_lossy()));
    }

    #[tokio::test]
    async fn test_classify_missing_is_inaccessible() {
        let temp = TempDir::new().unwrap();
        let err = lister_for(temp.path())
            .classify(temp.path().join("gone.png"))
            .await
            .unwrap_err();
        assert!(matches!(err, EntryError::Inaccessible(e) if e.is_not_found()));
    }

    #[tokio::test]
    async fn test_try_list_reports_not_directory() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("a.png");
        std::fs::write(&file, b"png").unwrap();

        let err = lister_for(temp.path())
            .try_list(&file.to_string_lossy())
            .await
            .unwrap_err();
        assert!(matches!(err, ListError::NotDirectory { .. }));
    }

    #[tokio::test]
    async fn test_try_list_reports_inaccessible() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("missing");

        let err = lister_for(temp.path())
            .try_list(&missing.to_string_lossy())
            .await
            .unwrap_err();
        assert!(matches!(err, ListError::Inaccessible(_)));
    }
}
