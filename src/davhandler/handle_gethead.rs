use crate::davhandler::{DavRequest, DavResponse};
use crate::resolver::{resolve, Resolved};
use crate::status::StatusCode;
use crate::util::DavMethod;
use crate::DavResult;

impl crate::DavHandler {
    pub(crate) async fn handle_get(&self, req: &DavRequest) -> DavResult<DavResponse> {
        match resolve(&*self.fs, &req.path).await? {
            Resolved::MissingAncestor => Err(StatusCode::Conflict.into()),
            Resolved::MissingLeaf => Err(StatusCode::NotFound.into()),
            Resolved::Found(meta) => {
                if req.method == DavMethod::Head {
                    return Ok(DavResponse::new(StatusCode::Ok));
                }
                if meta.is_collection {
                    // listings are the transport's business (autoindex
                    // and the like); the collection itself has no bytes.
                    return Ok(DavResponse::new(StatusCode::Ok));
                }
                let content = self.fs.read(&req.path).await?;
                Ok(DavResponse::with_body(StatusCode::Ok, content))
            }
        }
    }
}
