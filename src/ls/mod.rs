//! Lock table interface.
//!
//! This is webdav-level locking (LOCK/UNLOCK), a protocol feature that
//! clients drive explicitly. It is not the internal per-path mutation
//! serialization, which lives in `pathlock`.

use std::time::SystemTime;

use crate::davpath::DavPath;

pub(crate) mod memls;

/// An active lock on a resource.
#[derive(Debug, Clone)]
pub struct DavLock {
    /// Opaque token, a `urn:uuid:` URI.
    pub token: String,
    pub path: DavPath,
    /// Free-text owner descriptor (the configured principal).
    pub owner: Option<String>,
    pub created: SystemTime,
}

/// Exclusive-only lock table; at most one active lock per resource.
pub trait DavLockSystem: Send + Sync + 'static {
    /// Take the lock. On conflict the current holder is returned in `Err`.
    fn lock(&self, path: &DavPath, owner: Option<&str>) -> Result<DavLock, DavLock>;

    /// Re-issue an existing lock identified by its token.
    fn refresh(&self, path: &DavPath, token: &str) -> Result<DavLock, ()>;

    /// Release. `None` releases whatever lock is held on the path;
    /// `Some` must match the active token.
    fn unlock(&self, path: &DavPath, token: Option<&str>) -> Result<(), ()>;

    /// The active lock on the path, if any.
    fn locked(&self, path: &DavPath) -> Option<DavLock>;

    /// Discard all locks at or below the path (resource deleted or moved).
    fn delete(&self, path: &DavPath);
}
