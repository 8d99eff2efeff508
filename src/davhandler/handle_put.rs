use crate::davhandler::{DavRequest, DavResponse};
use crate::resolver::{resolve, Resolved};
use crate::status::StatusCode;
use crate::DavResult;

impl crate::DavHandler {
    pub(crate) async fn handle_put(&self, req: &DavRequest) -> DavResult<DavResponse> {
        // a PUT must carry a body (a zero-length one is fine).
        let body = match &req.body {
            Some(body) => body.clone(),
            None => return Err(StatusCode::LengthRequired.into()),
        };
        match resolve(&*self.fs, &req.path).await? {
            Resolved::MissingAncestor => Err(StatusCode::Conflict.into()),
            Resolved::Found(meta) if meta.is_collection => {
                Err(StatusCode::MethodNotAllowed.into())
            }
            // existing files are overwritten silently.
            Resolved::Found(_) | Resolved::MissingLeaf => {
                self.fs.write(&req.path, body).await?;
                Ok(DavResponse::new(StatusCode::Created))
            }
        }
    }
}
