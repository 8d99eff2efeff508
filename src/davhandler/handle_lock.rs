use bytes::Bytes;
use regex::Regex;

use crate::davhandler::{DavRequest, DavResponse};
use crate::ls::DavLock;
use crate::multistatus::LockDiscovery;
use crate::resolver::{resolve, Resolved};
use crate::status::StatusCode;
use crate::{DavError, DavResult};

lazy_static! {
    // Lock tokens travel as a "Coded-URL": <urn:uuid:...>
    static ref CODED_URL: Regex = Regex::new(r"^\s*<([^>]+)>\s*$").unwrap();
}

pub(crate) fn submitted_token(token: &Option<String>) -> Option<&str> {
    token.as_deref().map(|t| {
        CODED_URL
            .captures(t)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str())
            .unwrap_or_else(|| t.trim())
    })
}

fn lock_response(status: StatusCode, lock: DavLock) -> DavResponse {
    let mut resp = DavResponse::with_body(status, LockDiscovery::new(&lock));
    resp.lock_token = Some(lock.token);
    resp
}

impl crate::DavHandler {
    pub(crate) async fn handle_lock(&self, req: &DavRequest) -> DavResult<DavResponse> {
        let ls = self
            .ls
            .as_ref()
            .ok_or(DavError::Status(StatusCode::MethodNotAllowed))?;

        // the lockinfo body is required; its XML content is the
        // collaborator's business, only presence matters here.
        if req.body.as_ref().map_or(true, |b| b.is_empty()) {
            return Err(StatusCode::PreconditionFailed.into());
        }

        let principal = self.principal.as_ref().map(|p| p.as_str());
        match resolve(&*self.fs, &req.path).await? {
            Resolved::MissingAncestor => Err(StatusCode::Conflict.into()),
            Resolved::Found(_) => {
                if let Some(cur) = ls.locked(&req.path) {
                    // only the holder's token refreshes; anyone else is
                    // refused.
                    match submitted_token(&req.lock_token) {
                        Some(token) if token == cur.token => {
                            let lock = ls
                                .refresh(&req.path, &cur.token)
                                .map_err(|_| StatusCode::PreconditionFailed)?;
                            Ok(lock_response(StatusCode::Ok, lock))
                        }
                        _ => Err(StatusCode::PreconditionFailed.into()),
                    }
                } else {
                    let lock = ls
                        .lock(&req.path, principal)
                        .map_err(|_| StatusCode::PreconditionFailed)?;
                    Ok(lock_response(StatusCode::Ok, lock))
                }
            }
            Resolved::MissingLeaf => {
                // lock-null resource: reserve the name with an empty file,
                // then lock it.
                self.fs.write(&req.path, Bytes::new()).await?;
                let lock = ls
                    .lock(&req.path, principal)
                    .map_err(|_| StatusCode::PreconditionFailed)?;
                Ok(lock_response(StatusCode::Created, lock))
            }
        }
    }

    pub(crate) async fn handle_unlock(&self, req: &DavRequest) -> DavResult<DavResponse> {
        let ls = self
            .ls
            .as_ref()
            .ok_or(DavError::Status(StatusCode::MethodNotAllowed))?;
        match ls.unlock(&req.path, submitted_token(&req.lock_token)) {
            Ok(()) => Ok(DavResponse::new(StatusCode::NoContent)),
            // nothing to release, or a stale token: deterministic refusal.
            Err(()) => Err(StatusCode::Conflict.into()),
        }
    }
}
