//! Ephemeral in-memory locksystem.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::SystemTime;

use parking_lot::Mutex;
use uuid::Uuid;

use crate::davpath::DavPath;
use crate::ls::{DavLock, DavLockSystem};

/// In-memory lock table, keyed by canonical path.
pub(crate) struct MemLs {
    locks: Mutex<HashMap<String, DavLock>>,
}

impl MemLs {
    pub fn new() -> Arc<MemLs> {
        Arc::new(MemLs {
            locks: Mutex::new(HashMap::new()),
        })
    }
}

fn new_token() -> String {
    format!("urn:uuid:{}", Uuid::new_v4())
}

impl DavLockSystem for MemLs {
    fn lock(&self, path: &DavPath, owner: Option<&str>) -> Result<DavLock, DavLock> {
        let mut locks = self.locks.lock();
        let key = path.key();
        if let Some(cur) = locks.get(&key) {
            debug!("lock {path}: already locked by {}", cur.token);
            return Err(cur.clone());
        }
        let lock = DavLock {
            token: new_token(),
            path: path.clone(),
            owner: owner.map(|s| s.to_string()),
            created: SystemTime::now(),
        };
        debug!("lock {path}: issued {}", lock.token);
        locks.insert(key, lock.clone());
        Ok(lock)
    }

    fn refresh(&self, path: &DavPath, token: &str) -> Result<DavLock, ()> {
        let mut locks = self.locks.lock();
        match locks.get_mut(&path.key()) {
            Some(lock) if lock.token == token => {
                lock.created = SystemTime::now();
                Ok(lock.clone())
            }
            _ => Err(()),
        }
    }

    fn unlock(&self, path: &DavPath, token: Option<&str>) -> Result<(), ()> {
        let mut locks = self.locks.lock();
        let key = path.key();
        match (locks.get(&key), token) {
            (Some(cur), Some(token)) if cur.token != token => Err(()),
            (Some(_), _) => {
                locks.remove(&key);
                Ok(())
            }
            (None, _) => Err(()),
        }
    }

    fn locked(&self, path: &DavPath) -> Option<DavLock> {
        self.locks.lock().get(&path.key()).cloned()
    }

    fn delete(&self, path: &DavPath) {
        let mut locks = self.locks.lock();
        let key = path.key();
        let prefix = format!("{}/", key.trim_end_matches('/'));
        locks.retain(|k, _| k != &key && !k.starts_with(&prefix));
    }
}
