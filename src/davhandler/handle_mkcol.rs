use crate::davhandler::{DavRequest, DavResponse};
use crate::resolver::{resolve, Resolved};
use crate::status::StatusCode;
use crate::DavResult;

impl crate::DavHandler {
    pub(crate) async fn handle_mkcol(&self, req: &DavRequest) -> DavResult<DavResponse> {
        match resolve(&*self.fs, &req.path).await? {
            Resolved::MissingAncestor => Err(StatusCode::Conflict.into()),
            // MKCOL on a mapped URL, collection or not.
            Resolved::Found(_) => Err(StatusCode::MethodNotAllowed.into()),
            Resolved::MissingLeaf => {
                self.fs.create_collection(&req.path).await?;
                Ok(DavResponse::new(StatusCode::Created))
            }
        }
    }
}
