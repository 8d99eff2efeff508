use crate::davhandler::{DavRequest, DavResponse};
use crate::status::StatusCode;
use crate::util::DavMethod;
use crate::DavResult;

impl crate::DavHandler {
    pub(crate) async fn handle_options(&self, req: &DavRequest) -> DavResult<DavResponse> {
        let mut res = DavResponse::new(StatusCode::Ok);

        // Class 2 needs a locksystem.
        res.dav = Some(if self.ls.is_some() { "1,2" } else { "1" });

        // Helper to add a method to the array if the method is in fact
        // allowed: it must be in the configured set, and LOCK/UNLOCK
        // additionally need a locksystem.
        let islock = |m| m == DavMethod::Lock || m == DavMethod::Unlock;
        let mm = |v: &mut Vec<&'static str>, y: DavMethod| {
            if (!islock(y) || self.ls.is_some()) && self.allow.covers(y) {
                v.push(y.name());
            }
        };

        let meta = self.fs.metadata(&req.path).await;
        let is_unmapped = meta.is_err();
        let is_file = meta.map(|m| m.is_file()).unwrap_or_default();

        let mut v = Vec::new();
        if is_unmapped {
            mm(&mut v, DavMethod::Options);
            mm(&mut v, DavMethod::MkCol);
            mm(&mut v, DavMethod::Put);
            mm(&mut v, DavMethod::Lock);
        } else {
            if is_file {
                mm(&mut v, DavMethod::Head);
                mm(&mut v, DavMethod::Get);
                mm(&mut v, DavMethod::Put);
            }
            mm(&mut v, DavMethod::Options);
            mm(&mut v, DavMethod::PropFind);
            mm(&mut v, DavMethod::PropPatch);
            mm(&mut v, DavMethod::Copy);
            if !req.path.is_root() {
                mm(&mut v, DavMethod::Move);
                mm(&mut v, DavMethod::Delete);
            }
            mm(&mut v, DavMethod::Lock);
            mm(&mut v, DavMethod::Unlock);
        }

        res.allow = Some(v);
        Ok(res)
    }
}
