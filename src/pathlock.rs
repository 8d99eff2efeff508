//! Internal per-path mutation serialization.
//!
//! One writer at a time per canonical path, concurrent readers allowed.
//! This is request-scoped plumbing, invisible in the protocol; webdav
//! LOCK/UNLOCK is a separate, client-driven mechanism (see `ls`).
//!
//! Two-path operations (COPY/MOVE) claim both paths in lexicographic
//! order so that concurrent pairs on swapped paths cannot deadlock.
//! Acquisition is fail-fast: a bounded number of short sleeps, then the
//! request errors out instead of queueing indefinitely.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;

use crate::davpath::DavPath;
use crate::status::StatusCode;
use crate::DavResult;

const CLAIM_ATTEMPTS: u32 = 100;
const CLAIM_BACKOFF: Duration = Duration::from_millis(1);

#[derive(Default)]
pub(crate) struct PathLocks {
    claims: Mutex<HashMap<String, Claim>>,
}

struct Claim {
    writer: bool,
    readers: usize,
}

/// RAII claim on one or two paths; released on drop, so an abandoned
/// request cannot strand its paths.
pub(crate) struct PathGuard {
    locks: Arc<PathLocks>,
    keys: Vec<String>,
    write: bool,
}

impl PathLocks {
    pub fn new() -> Arc<PathLocks> {
        Arc::new(PathLocks::default())
    }

    fn try_claim_all(&self, keys: &[String], write: bool) -> bool {
        let mut claims = self.claims.lock();
        let free = keys.iter().all(|key| match claims.get(key) {
            None => true,
            Some(c) => !write && !c.writer,
        });
        if !free {
            return false;
        }
        for key in keys {
            let claim = claims.entry(key.clone()).or_insert(Claim {
                writer: false,
                readers: 0,
            });
            if write {
                claim.writer = true;
            } else {
                claim.readers += 1;
            }
        }
        true
    }

    fn release_all(&self, keys: &[String], write: bool) {
        let mut claims = self.claims.lock();
        for key in keys {
            if let Some(claim) = claims.get_mut(key) {
                if write {
                    claim.writer = false;
                } else {
                    claim.readers = claim.readers.saturating_sub(1);
                }
                if !claim.writer && claim.readers == 0 {
                    claims.remove(key);
                }
            }
        }
    }

    /// Claim the paths, or fail with 500 after the bounded spin.
    pub async fn claim(
        self: Arc<Self>,
        paths: &[&DavPath],
        write: bool,
    ) -> DavResult<PathGuard> {
        let mut keys: Vec<String> = paths.iter().map(|p| p.key()).collect();
        keys.sort();
        keys.dedup();
        for attempt in 0..CLAIM_ATTEMPTS {
            if self.try_claim_all(&keys, write) {
                return Ok(PathGuard {
                    locks: self,
                    keys,
                    write,
                });
            }
            if attempt + 1 < CLAIM_ATTEMPTS {
                tokio::time::sleep(CLAIM_BACKOFF).await;
            }
        }
        debug!("path claim failed after {CLAIM_ATTEMPTS} attempts: {keys:?}");
        Err(StatusCode::InternalServerError.into())
    }
}

impl Drop for PathGuard {
    fn drop(&mut self) {
        self.locks.release_all(&self.keys, self.write);
    }
}
