//
// Scale scenarios: batches of create/delete cycles must succeed
// end-to-end and leave the store empty.
//

use davcore::{
    DavHandler, DavMethod, DavPath, DavRequest, Depth, FileSystem, LockSystem, StatusCode,
};

fn handler() -> DavHandler {
    let _ = env_logger::builder().is_test(true).try_init();
    DavHandler::builder(FileSystem::Mem)
        .locksystem(LockSystem::Mem)
        .build()
}

fn p(s: &str) -> DavPath {
    DavPath::new(s).unwrap()
}

async fn store_is_empty(dav: &DavHandler) -> bool {
    let resp = dav
        .handle(DavRequest::new(DavMethod::PropFind, DavPath::root()).depth(Depth::Infinity))
        .await;
    assert_eq!(resp.status, StatusCode::MultiStatus);
    // only the root itself remains.
    resp.body.as_multistatus().unwrap().responses.len() == 1
}

#[tokio::test]
async fn mkcol_and_delete_100_folders() {
    let dav = handler();
    for i in 0..100 {
        let path = p(&format!("/folder-{i:03}"));
        let st = dav
            .handle(DavRequest::new(DavMethod::PropFind, path.clone()).depth(Depth::Zero))
            .await
            .status;
        assert_eq!(st, StatusCode::NotFound);
        let st = dav
            .handle(DavRequest::new(DavMethod::MkCol, path.clone()))
            .await
            .status;
        assert_eq!(st, StatusCode::Created);
        let st = dav.handle(DavRequest::new(DavMethod::Delete, path)).await.status;
        assert_eq!(st, StatusCode::Ok);
    }
    assert!(store_is_empty(&dav).await);
}

#[tokio::test]
async fn put_and_delete_1000_files() {
    let dav = handler();
    for i in 0..1000 {
        let path = p(&format!("/file-{i:04}"));
        let st = dav
            .handle(DavRequest::new(DavMethod::Put, path.clone()).body(format!("content {i}")))
            .await
            .status;
        assert_eq!(st, StatusCode::Created);
        let st = dav.handle(DavRequest::new(DavMethod::Delete, path)).await.status;
        assert_eq!(st, StatusCode::Ok);
    }
    assert!(store_is_empty(&dav).await);
}
