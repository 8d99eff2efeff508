use futures_util::StreamExt;

use crate::davhandler::{DavRequest, DavResponse};
use crate::davpath::DavPath;
use crate::fs::{FsError, ResourceMeta};
use crate::multistatus::{DavProp, MsResponse, MultiStatus, PropStat};
use crate::resolver::{resolve, Resolved};
use crate::status::StatusCode;
use crate::util::Depth;
use crate::DavResult;

impl crate::DavHandler {
    pub(crate) async fn handle_propfind(&self, req: &DavRequest) -> DavResult<DavResponse> {
        let meta = match resolve(&*self.fs, &req.path).await? {
            Resolved::Found(meta) => meta,
            // an absent target is absent, whichever segment is missing.
            _ => return Err(StatusCode::NotFound.into()),
        };

        let mut ms = MultiStatus::default();
        self.push_entry(&mut ms, &req.path, &meta).await;

        if meta.is_collection && req.depth != Depth::Zero {
            let mut todo = vec![req.path.clone()];
            while let Some(dir) = todo.pop() {
                let mut entries = self.fs.read_dir(&dir).await?;
                while let Some(entry) = entries.next().await {
                    let child = dir.join(&entry.name);
                    self.push_entry(&mut ms, &child, &entry.meta).await;
                    if entry.meta.is_collection && req.depth == Depth::Infinity {
                        todo.push(child);
                    }
                }
            }
        }

        Ok(DavResponse::with_body(StatusCode::MultiStatus, ms))
    }

    async fn push_entry(&self, ms: &mut MultiStatus, path: &DavPath, meta: &ResourceMeta) {
        let mut path = path.clone();
        if meta.is_collection {
            path.add_slash();
        }
        let mut entry = MsResponse::from_meta(&path, meta);
        // dead properties ride along when the store keeps them.
        if let Ok(props) = self.fs.get_props(&path).await {
            entry.propstats[0].props.extend(
                props
                    .into_iter()
                    .map(|(name, value)| DavProp { name, value: Some(value) }),
            );
        }
        ms.responses.push(entry);
    }

    pub(crate) async fn handle_proppatch(&self, req: &DavRequest) -> DavResult<DavResponse> {
        // a propertyupdate body is required.
        if req.body.is_none() {
            return Err(StatusCode::LengthRequired.into());
        }
        match resolve(&*self.fs, &req.path).await? {
            Resolved::MissingAncestor => return Err(StatusCode::Conflict.into()),
            Resolved::MissingLeaf => return Err(StatusCode::NotFound.into()),
            Resolved::Found(_) => {}
        }

        let mut propstats = Vec::new();
        for update in &req.prop_updates {
            let status = match self
                .fs
                .patch_prop(&req.path, &update.name, update.value.as_deref())
                .await
            {
                Ok(()) => StatusCode::Ok,
                // stores without property support refuse the property,
                // they do not fail the request.
                Err(FsError::NotImplemented) => StatusCode::Forbidden,
                Err(e) => return Err(e.into()),
            };
            propstats.push(PropStat {
                status,
                props: vec![DavProp {
                    name: update.name.clone(),
                    value: None,
                }],
            });
        }
        if propstats.is_empty() {
            propstats.push(PropStat {
                status: StatusCode::Ok,
                props: Vec::new(),
            });
        }

        let mut ms = MultiStatus::default();
        ms.responses.push(MsResponse {
            href: req.path.as_url_string(),
            propstats,
        });
        Ok(DavResponse::with_body(StatusCode::MultiStatus, ms))
    }
}
