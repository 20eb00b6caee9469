//! The directory service seam between the display side and the filesystem.

use std::sync::Arc;

use futures_util::FutureExt;
use futures_util::future::BoxFuture;

use crate::entry::Listing;
use crate::error::ServiceError;
use crate::lister::DirectoryLister;

/// Something that can list a directory for the display side.
///
/// The image viewer receives an implementation at construction. In the
/// application this is a [`BridgeClient`](crate::BridgeClient) talking to the
/// privileged side; tests substitute fakes.
pub trait DirectoryService: Send + Sync {
    /// Lists the directory at `path`.
    ///
    /// `Err` means the call itself failed, not that the directory was
    /// missing or unreadable: those produce `Ok` with an empty listing.
    fn list<'a>(&'a self, path: &'a str) -> BoxFuture<'a, Result<Listing, ServiceError>>;
}

impl DirectoryService for DirectoryLister {
    fn list<'a>(&'a self, path: &'a str) -> BoxFuture<'a, Result<Listing, ServiceError>> {
        async move { Ok(DirectoryLister::list(self, path).await) }.boxed()
    }
}

impl<S: DirectoryService + ?Sized> DirectoryService for Arc<S> {
    fn list<'a>(&'a self, path: &'a str) -> BoxFuture<'a, Result<Listing, ServiceError>> {
        (**self).list(path)
    }
}
