//! Privileged filesystem side of Pictor.
//!
//! This crate owns every filesystem access the image browser makes:
//!
//! - **Listing**: [`DirectoryLister`] lists the immediate children of one
//!   directory, keeping accessible files and directories only
//! - **Paths**: lexical normalization and relative-path helpers in [`path`]
//! - **Access checks**: read/write accessibility in [`access`]
//! - **Bridge**: the `fs:dir` channel the display side calls through
//!   ([`Bridge`], [`BridgeClient`])
//! - **Service seam**: the [`DirectoryService`] trait the display side is
//!   written against
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use pictor_fs::{Bridge, DirectoryLister, ListerConfig};
//!
//! let lister = DirectoryLister::new(ListerConfig::new().with_asset_root("renderer"));
//! let client = Bridge::spawn(Arc::new(lister));
//! for entry in client.dir("./").await? {
//!     println!("{}", entry.filename);
//! }
//! ```

pub mod access;
mod bridge;
mod entry;
mod error;
mod lister;
pub mod path;
mod service;

pub use access::AccessMode;
pub use bridge::{Bridge, BridgeClient, FS_DIR, Invocation, Reply};
pub use entry::{DirEntry, Listing};
pub use error::{BridgeError, EntryError, FsError, FsErrorKind, FsResult, ListError, ServiceError};
pub use lister::{DEFAULT_ASSET_DIR, DirectoryLister, ListerConfig, default_asset_root};
pub use service::DirectoryService;
