//! Resource store interface.
//!
//! A store maps canonical paths to files and collections. It is the only
//! owner of resource state; the handler mutates resources exclusively
//! through this interface.

use std::io;
use std::time::SystemTime;

use bytes::Bytes;
use futures_util::future::{self, BoxFuture, FutureExt};
use futures_util::stream::BoxStream;

use crate::davpath::DavPath;

#[cfg(any(docsrs, feature = "localfs"))]
pub(crate) mod localfs;
#[cfg(any(docsrs, feature = "memfs"))]
pub(crate) mod memfs;

pub type FsResult<T> = Result<T, FsError>;
pub type FsFuture<'a, T> = BoxFuture<'a, FsResult<T>>;
pub type FsStream<T> = BoxStream<'static, T>;

/// Errors a store operation can report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FsError {
    NotFound,
    /// A collection-only operation targeted a file, or a file stands
    /// where a parent collection is required.
    NotACollection,
    Exists,
    Forbidden,
    NotImplemented,
    GeneralFailure,
}

impl From<io::Error> for FsError {
    fn from(e: io::Error) -> Self {
        match e.kind() {
            io::ErrorKind::NotFound => FsError::NotFound,
            io::ErrorKind::PermissionDenied => FsError::Forbidden,
            io::ErrorKind::AlreadyExists => FsError::Exists,
            _ => FsError::GeneralFailure,
        }
    }
}

/// What a store knows about a resource.
#[derive(Debug, Clone)]
pub struct ResourceMeta {
    pub len: u64,
    pub is_collection: bool,
    pub created: Option<SystemTime>,
    pub modified: Option<SystemTime>,
}

impl ResourceMeta {
    pub fn is_file(&self) -> bool {
        !self.is_collection
    }
}

/// One entry of a collection listing.
#[derive(Debug, Clone)]
pub struct FsDirEntry {
    pub name: String,
    pub meta: ResourceMeta,
}

/// Backend storage for resources.
///
/// Mirrors the store contract: existence and metadata, content reads and
/// writes, collection creation and listing, recursive removal, and the
/// single-file copy / rename primitives the dispatcher builds COPY and
/// MOVE from. Implementations report `NotFound` for absent resources and
/// `NotACollection` when a collection-only operation targets a file.
pub trait ResourceStore: Send + Sync + 'static {
    fn metadata<'a>(&'a self, path: &'a DavPath) -> FsFuture<'a, ResourceMeta>;

    /// Full content of a file.
    fn read<'a>(&'a self, path: &'a DavPath) -> FsFuture<'a, Bytes>;

    /// Create or truncate a file. Returns `true` if the leaf was created.
    fn write<'a>(&'a self, path: &'a DavPath, data: Bytes) -> FsFuture<'a, bool>;

    fn create_collection<'a>(&'a self, path: &'a DavPath) -> FsFuture<'a, ()>;

    /// Remove a resource, recursively for collections.
    fn remove<'a>(&'a self, path: &'a DavPath) -> FsFuture<'a, ()>;

    /// List a collection. Entry order is stable between calls.
    fn read_dir<'a>(&'a self, path: &'a DavPath) -> FsFuture<'a, FsStream<FsDirEntry>>;

    /// Duplicate a single file. Collection copies are driven by the caller.
    fn copy_file<'a>(&'a self, from: &'a DavPath, to: &'a DavPath) -> FsFuture<'a, ()>;

    /// Atomically rename a file or collection.
    fn rename<'a>(&'a self, from: &'a DavPath, to: &'a DavPath) -> FsFuture<'a, ()>;

    /// Dead properties of a resource, as (name, value) pairs.
    fn get_props<'a>(&'a self, path: &'a DavPath) -> FsFuture<'a, Vec<(String, String)>> {
        let _ = path;
        future::ready(Err(FsError::NotImplemented)).boxed()
    }

    /// Set (`Some`) or remove (`None`) one dead property.
    fn patch_prop<'a>(
        &'a self,
        path: &'a DavPath,
        name: &'a str,
        value: Option<&'a str>,
    ) -> FsFuture<'a, ()> {
        let _ = (path, name, value);
        future::ready(Err(FsError::NotImplemented)).boxed()
    }
}
