use crate::davhandler::{DavRequest, DavResponse};
use crate::resolver::{resolve, Resolved};
use crate::status::StatusCode;
use crate::DavResult;

impl crate::DavHandler {
    pub(crate) async fn handle_delete(&self, req: &DavRequest) -> DavResult<DavResponse> {
        match resolve(&*self.fs, &req.path).await? {
            Resolved::MissingAncestor => Err(StatusCode::Conflict.into()),
            Resolved::MissingLeaf => Err(StatusCode::NotFound.into()),
            Resolved::Found(_) => {
                // recursive for collections; the store owns the subtree.
                self.fs.remove(&req.path).await?;
                if let Some(ls) = &self.ls {
                    ls.delete(&req.path);
                }
                Ok(DavResponse::new(StatusCode::Ok))
            }
        }
    }
}
