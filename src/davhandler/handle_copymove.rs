use futures_util::StreamExt;

use crate::davhandler::{DavRequest, DavResponse};
use crate::davpath::DavPath;
use crate::fs::ResourceMeta;
use crate::resolver::{resolve, Resolved};
use crate::status::StatusCode;
use crate::util::DavMethod;
use crate::{DavError, DavResult};

impl crate::DavHandler {
    pub(crate) async fn handle_copymove(&self, req: &DavRequest) -> DavResult<DavResponse> {
        let dst = req.destination.as_ref().ok_or(DavError::InvalidPath)?;

        // a resource cannot be copied or moved onto itself,
        // whatever else is going on.
        if *dst == req.path {
            return Err(StatusCode::Forbidden.into());
        }
        // nor into or over its own subtree.
        if req.path.is_ancestor_of(dst) || dst.is_ancestor_of(&req.path) {
            return Err(StatusCode::Forbidden.into());
        }

        // the source must exist,
        let smeta = match resolve(&*self.fs, &req.path).await? {
            Resolved::MissingAncestor => return Err(StatusCode::Conflict.into()),
            Resolved::MissingLeaf => return Err(StatusCode::NotFound.into()),
            Resolved::Found(meta) => meta,
        };

        // and the destination's parent chain as well.
        let dst_exists = match resolve(&*self.fs, dst).await? {
            Resolved::MissingAncestor => return Err(StatusCode::Conflict.into()),
            Resolved::MissingLeaf => false,
            Resolved::Found(_) => true,
        };

        // replacing a mapped destination needs the explicit flag.
        if dst_exists {
            if !req.overwrite {
                return Err(StatusCode::PreconditionFailed.into());
            }
            self.fs.remove(dst).await?;
            if let Some(ls) = &self.ls {
                ls.delete(dst);
            }
        }

        match req.method {
            DavMethod::Copy => self.do_copy(&req.path, dst, &smeta).await?,
            _ => {
                // move = rename: the subtree changes name in one step, and
                // a failed rename leaves the source untouched.
                self.fs.rename(&req.path, dst).await?;
                if let Some(ls) = &self.ls {
                    ls.delete(&req.path);
                }
            }
        }

        // 201 for a fresh destination, 204 when it was replaced.
        if dst_exists {
            Ok(DavResponse::new(StatusCode::NoContent))
        } else {
            Ok(DavResponse::new(StatusCode::Created))
        }
    }

    // Single files copy directly; collections are walked with an explicit
    // stack, entry metadata coming from the listing itself.
    async fn do_copy(&self, from: &DavPath, to: &DavPath, meta: &ResourceMeta) -> DavResult<()> {
        if meta.is_file() {
            return Ok(self.fs.copy_file(from, to).await?);
        }
        self.fs.create_collection(to).await?;
        let mut todo = vec![(from.clone(), to.clone())];
        while let Some((src, dst)) = todo.pop() {
            let mut entries = self.fs.read_dir(&src).await?;
            while let Some(entry) = entries.next().await {
                let s = src.join(&entry.name);
                let d = dst.join(&entry.name);
                if entry.meta.is_collection {
                    self.fs.create_collection(&d).await?;
                    todo.push((s, d));
                } else {
                    self.fs.copy_file(&s, &d).await?;
                }
            }
        }
        Ok(())
    }
}
