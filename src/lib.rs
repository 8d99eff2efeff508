//! ## Webdav resource and lock management core
//!
//! Webdav (RFC4918) is defined as
//! HTTP (GET/HEAD/PUT/DELETE) plus a bunch of extension methods (PROPFIND, etc).
//! These extension methods are used to manage collections (like unix directories),
//! get information on collections (like unix `ls` or `readdir`), rename and
//! copy items, lock/unlock items, etc.
//!
//! This library is the engine of such a server: it maps canonical request
//! paths to filesystem-backed resources, enforces the collection/ancestor
//! invariants, arbitrates exclusive locks, and runs each method's
//! precondition chain in a fixed order. Transport framing and XML
//! (de)serialization stay outside: a collaborator hands in a parsed
//! [`DavRequest`] (method, path, depth/overwrite/token parameters, raw
//! body) and renders the returned [`DavResponse`] (status code from one
//! closed set, plus structured multi-status or lockdiscovery fragments).
//!
//! ## Backend interfaces.
//!
//! The backend interfaces are similar to the ones from the Go `x/net/webdav package`:
//!
//! - the library contains a [request handler][DavHandler].
//! - you supply a [filesystem][FileSystem] for backend storage.
//! - you can supply a [locksystem][LockSystem] that handles webdav locks.
//!
//! Included are two filesystems:
//!
//! - `LocalFs`: serves a directory on the local filesystem
//! - `MemFs`: ephemeral in-memory filesystem
//!
//! and one locksystem, `MemLs`, an ephemeral in-memory lock table.
//!
//! ## Example.
//!
//! ```
//! use davcore::{DavHandler, DavMethod, DavPath, DavRequest, FileSystem, LockSystem, StatusCode};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() {
//!     let dav = DavHandler::builder(FileSystem::Mem)
//!         .locksystem(LockSystem::Mem)
//!         .build();
//!
//!     let path = DavPath::new("/folder").unwrap();
//!     let resp = dav.handle(DavRequest::new(DavMethod::MkCol, path)).await;
//!     assert_eq!(resp.status, StatusCode::Created);
//! }
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]

#[macro_use]
extern crate log;
#[macro_use]
extern crate lazy_static;

mod davhandler;
mod errors;
mod pathlock;
mod resolver;
mod util;

pub mod body;
pub mod davpath;
pub mod multistatus;
pub mod status;
mod fs;
mod ls;

use crate::errors::{DavError, DavResult};

pub use crate::body::DavBody;
pub use crate::davhandler::{
    DavBuilder, DavHandler, DavRequest, DavResponse, FileSystem, LockSystem, PropUpdate,
};
pub use crate::davpath::DavPath;
pub use crate::status::StatusCode;
pub use crate::util::{DavMethod, DavMethodSet, Depth};
