//
// Black-box tests for the method dispatcher, driving the public
// handler API the way a webdav client would.
//

use bytes::Bytes;
use davcore::{
    DavBody, DavHandler, DavMethod, DavMethodSet, DavPath, DavRequest, Depth, FileSystem,
    LockSystem, StatusCode,
};

const LOCKINFO: &str = "<?xml version=\"1.0\" encoding=\"utf-8\" ?>\
    <d:lockinfo xmlns:d=\"DAV:\"><d:lockscope><d:exclusive/>\
    </d:lockscope><d:locktype><d:write/></d:locktype><d:owner>\
    <d:href>http://www.contoso.com/~user/contact.htm</d:href>\
    </d:owner></d:lockinfo>";

fn handler() -> DavHandler {
    let _ = env_logger::builder().is_test(true).try_init();
    DavHandler::builder(FileSystem::Mem)
        .locksystem(LockSystem::Mem)
        .principal("someuser")
        .build()
}

fn p(s: &str) -> DavPath {
    DavPath::new(s).unwrap()
}

async fn status(dav: &DavHandler, req: DavRequest) -> StatusCode {
    dav.handle(req).await.status
}

async fn put(dav: &DavHandler, path: &str, content: &str) {
    let st = status(
        dav,
        DavRequest::new(DavMethod::Put, p(path)).body(content.to_string()),
    )
    .await;
    assert_eq!(st, StatusCode::Created);
}

async fn get_body(dav: &DavHandler, path: &str) -> Bytes {
    let resp = dav.handle(DavRequest::new(DavMethod::Get, p(path))).await;
    assert_eq!(resp.status, StatusCode::Ok);
    resp.body.as_bytes().cloned().unwrap_or_default()
}

// ===== PROPFIND =====

#[tokio::test]
async fn propfind_collection_all_depths() {
    let dav = handler();
    assert_eq!(
        status(&dav, DavRequest::new(DavMethod::MkCol, p("/folder"))).await,
        StatusCode::Created
    );
    for depth in [Depth::Zero, Depth::One, Depth::Infinity] {
        let st = status(
            &dav,
            DavRequest::new(DavMethod::PropFind, p("/folder")).depth(depth),
        )
        .await;
        assert_eq!(st, StatusCode::MultiStatus);
    }
}

#[tokio::test]
async fn propfind_missing_is_not_found() {
    let dav = handler();
    let st = status(
        &dav,
        DavRequest::new(DavMethod::PropFind, p("/nonexistent")).depth(Depth::Zero),
    )
    .await;
    assert_eq!(st, StatusCode::NotFound);
}

#[tokio::test]
async fn propfind_depth_controls_traversal() {
    let dav = handler();
    assert_eq!(
        status(&dav, DavRequest::new(DavMethod::MkCol, p("/a"))).await,
        StatusCode::Created
    );
    put(&dav, "/a/f1", "one").await;
    assert_eq!(
        status(&dav, DavRequest::new(DavMethod::MkCol, p("/a/sub"))).await,
        StatusCode::Created
    );
    put(&dav, "/a/sub/f2", "two").await;

    let dav = &dav;
    let entries = |depth| async move {
        let resp = dav
            .handle(DavRequest::new(DavMethod::PropFind, p("/a")).depth(depth))
            .await;
        assert_eq!(resp.status, StatusCode::MultiStatus);
        resp.body.as_multistatus().unwrap().responses.len()
    };
    assert_eq!(entries(Depth::Zero).await, 1);
    assert_eq!(entries(Depth::One).await, 3);
    assert_eq!(entries(Depth::Infinity).await, 4);
}

// ===== MKCOL =====

#[tokio::test]
async fn mkcol_twice_is_not_allowed() {
    let dav = handler();
    assert_eq!(
        status(&dav, DavRequest::new(DavMethod::MkCol, p("/dir"))).await,
        StatusCode::Created
    );
    assert_eq!(
        status(&dav, DavRequest::new(DavMethod::MkCol, p("/dir"))).await,
        StatusCode::MethodNotAllowed
    );
}

#[tokio::test]
async fn mkcol_missing_intermediate_is_conflict() {
    let dav = handler();
    assert_eq!(
        status(&dav, DavRequest::new(DavMethod::MkCol, p("/no/dir"))).await,
        StatusCode::Conflict
    );
}

// ===== DELETE =====

#[tokio::test]
async fn delete_collection_is_ok_and_recursive() {
    let dav = handler();
    assert_eq!(
        status(&dav, DavRequest::new(DavMethod::MkCol, p("/dir"))).await,
        StatusCode::Created
    );
    put(&dav, "/dir/file", "x").await;
    assert_eq!(
        status(&dav, DavRequest::new(DavMethod::Delete, p("/dir"))).await,
        StatusCode::Ok
    );
    assert_eq!(
        status(&dav, DavRequest::new(DavMethod::Get, p("/dir"))).await,
        StatusCode::NotFound
    );
}

#[tokio::test]
async fn delete_missing_is_not_found() {
    let dav = handler();
    assert_eq!(
        status(&dav, DavRequest::new(DavMethod::Delete, p("/nothing"))).await,
        StatusCode::NotFound
    );
}

#[tokio::test]
async fn delete_missing_intermediate_is_conflict() {
    let dav = handler();
    assert_eq!(
        status(&dav, DavRequest::new(DavMethod::Delete, p("/no/file"))).await,
        StatusCode::Conflict
    );
}

// ===== PUT / GET / HEAD =====

#[tokio::test]
async fn put_then_get_roundtrips() {
    let dav = handler();
    put(&dav, "/file", "some content").await;
    assert_eq!(get_body(&dav, "/file").await, Bytes::from("some content"));
}

#[tokio::test]
async fn put_overwrites_silently() {
    let dav = handler();
    put(&dav, "/file", "first").await;
    put(&dav, "/file", "second").await;
    assert_eq!(get_body(&dav, "/file").await, Bytes::from("second"));
}

#[tokio::test]
async fn put_missing_intermediate_is_conflict() {
    let dav = handler();
    let st = status(
        &dav,
        DavRequest::new(DavMethod::Put, p("/no/file")).body("data"),
    )
    .await;
    assert_eq!(st, StatusCode::Conflict);
}

#[tokio::test]
async fn put_without_body_is_length_required() {
    let dav = handler();
    assert_eq!(
        status(&dav, DavRequest::new(DavMethod::Put, p("/file"))).await,
        StatusCode::LengthRequired
    );
}

#[tokio::test]
async fn get_missing_is_not_found() {
    let dav = handler();
    assert_eq!(
        status(&dav, DavRequest::new(DavMethod::Get, p("/nothing"))).await,
        StatusCode::NotFound
    );
}

#[tokio::test]
async fn get_missing_intermediate_is_conflict() {
    let dav = handler();
    assert_eq!(
        status(&dav, DavRequest::new(DavMethod::Get, p("/no/file"))).await,
        StatusCode::Conflict
    );
}

#[tokio::test]
async fn head_statuses() {
    let dav = handler();
    put(&dav, "/file", "x").await;
    assert_eq!(
        status(&dav, DavRequest::new(DavMethod::Head, p("/file"))).await,
        StatusCode::Ok
    );
    assert_eq!(
        status(&dav, DavRequest::new(DavMethod::Head, p("/nothing"))).await,
        StatusCode::NotFound
    );
    assert_eq!(
        status(&dav, DavRequest::new(DavMethod::Head, p("/no/file"))).await,
        StatusCode::Conflict
    );
}

// ===== COPY =====

#[tokio::test]
async fn copy_to_fresh_destination_is_created() {
    let dav = handler();
    put(&dav, "/src", "payload").await;
    let st = status(
        &dav,
        DavRequest::new(DavMethod::Copy, p("/src")).destination(p("/src-Copy")),
    )
    .await;
    assert_eq!(st, StatusCode::Created);
    assert_eq!(get_body(&dav, "/src-Copy").await, Bytes::from("payload"));
    // source is still there.
    assert_eq!(get_body(&dav, "/src").await, Bytes::from("payload"));
}

#[tokio::test]
async fn copy_overwrite_replaces_and_reports_no_content() {
    let dav = handler();
    put(&dav, "/src", "new").await;
    put(&dav, "/dst", "old").await;
    let st = status(
        &dav,
        DavRequest::new(DavMethod::Copy, p("/src"))
            .destination(p("/dst"))
            .overwrite(true),
    )
    .await;
    assert_eq!(st, StatusCode::NoContent);
    assert_eq!(get_body(&dav, "/dst").await, Bytes::from("new"));
}

#[tokio::test]
async fn copy_onto_itself_is_forbidden() {
    let dav = handler();
    put(&dav, "/src", "x").await;
    let st = status(
        &dav,
        DavRequest::new(DavMethod::Copy, p("/src")).destination(p("/src")),
    )
    .await;
    assert_eq!(st, StatusCode::Forbidden);
    // independent of existence state.
    let st = status(
        &dav,
        DavRequest::new(DavMethod::Copy, p("/ghost")).destination(p("/ghost")),
    )
    .await;
    assert_eq!(st, StatusCode::Forbidden);
}

#[tokio::test]
async fn copy_into_own_subtree_is_forbidden() {
    let dav = handler();
    assert_eq!(
        status(&dav, DavRequest::new(DavMethod::MkCol, p("/tree"))).await,
        StatusCode::Created
    );
    let st = status(
        &dav,
        DavRequest::new(DavMethod::Copy, p("/tree")).destination(p("/tree/inner")),
    )
    .await;
    assert_eq!(st, StatusCode::Forbidden);
    let st = status(
        &dav,
        DavRequest::new(DavMethod::Move, p("/tree")).destination(p("/tree/inner")),
    )
    .await;
    assert_eq!(st, StatusCode::Forbidden);
}

#[tokio::test]
async fn copy_to_missing_intermediate_is_conflict() {
    let dav = handler();
    put(&dav, "/src", "x").await;
    let st = status(
        &dav,
        DavRequest::new(DavMethod::Copy, p("/src")).destination(p("/no/dst")),
    )
    .await;
    assert_eq!(st, StatusCode::Conflict);
}

#[tokio::test]
async fn copy_missing_source_is_not_found() {
    let dav = handler();
    let st = status(
        &dav,
        DavRequest::new(DavMethod::Copy, p("/ghost")).destination(p("/dst")),
    )
    .await;
    assert_eq!(st, StatusCode::NotFound);
}

#[tokio::test]
async fn copy_without_overwrite_fails_and_leaves_destination() {
    let dav = handler();
    put(&dav, "/src", "new").await;
    put(&dav, "/dst", "old").await;
    for _ in 0..2 {
        // failure is idempotent.
        let st = status(
            &dav,
            DavRequest::new(DavMethod::Copy, p("/src")).destination(p("/dst")),
        )
        .await;
        assert_eq!(st, StatusCode::PreconditionFailed);
        assert_eq!(get_body(&dav, "/dst").await, Bytes::from("old"));
    }
}

#[tokio::test]
async fn copy_collection_copies_subtree() {
    let dav = handler();
    assert_eq!(
        status(&dav, DavRequest::new(DavMethod::MkCol, p("/tree"))).await,
        StatusCode::Created
    );
    assert_eq!(
        status(&dav, DavRequest::new(DavMethod::MkCol, p("/tree/sub"))).await,
        StatusCode::Created
    );
    put(&dav, "/tree/sub/leaf", "deep").await;
    let st = status(
        &dav,
        DavRequest::new(DavMethod::Copy, p("/tree")).destination(p("/tree2")),
    )
    .await;
    assert_eq!(st, StatusCode::Created);
    assert_eq!(get_body(&dav, "/tree2/sub/leaf").await, Bytes::from("deep"));
    assert_eq!(get_body(&dav, "/tree/sub/leaf").await, Bytes::from("deep"));
}

// ===== MOVE =====

#[tokio::test]
async fn move_to_fresh_destination_is_created_and_removes_source() {
    let dav = handler();
    put(&dav, "/src", "payload").await;
    let st = status(
        &dav,
        DavRequest::new(DavMethod::Move, p("/src")).destination(p("/src-Moved")),
    )
    .await;
    assert_eq!(st, StatusCode::Created);
    assert_eq!(get_body(&dav, "/src-Moved").await, Bytes::from("payload"));
    assert_eq!(
        status(&dav, DavRequest::new(DavMethod::Get, p("/src"))).await,
        StatusCode::NotFound
    );
}

#[tokio::test]
async fn move_overwrite_replaces_and_reports_no_content() {
    let dav = handler();
    put(&dav, "/src", "new").await;
    put(&dav, "/dst", "old").await;
    let st = status(
        &dav,
        DavRequest::new(DavMethod::Move, p("/src"))
            .destination(p("/dst"))
            .overwrite(true),
    )
    .await;
    assert_eq!(st, StatusCode::NoContent);
    assert_eq!(get_body(&dav, "/dst").await, Bytes::from("new"));
    assert_eq!(
        status(&dav, DavRequest::new(DavMethod::Get, p("/src"))).await,
        StatusCode::NotFound
    );
}

#[tokio::test]
async fn move_onto_itself_is_forbidden() {
    let dav = handler();
    put(&dav, "/src", "x").await;
    let st = status(
        &dav,
        DavRequest::new(DavMethod::Move, p("/src")).destination(p("/src")),
    )
    .await;
    assert_eq!(st, StatusCode::Forbidden);
}

#[tokio::test]
async fn move_to_missing_intermediate_is_conflict() {
    let dav = handler();
    put(&dav, "/src", "x").await;
    let st = status(
        &dav,
        DavRequest::new(DavMethod::Move, p("/src")).destination(p("/no/dst")),
    )
    .await;
    assert_eq!(st, StatusCode::Conflict);
    // and the source was not consumed.
    assert_eq!(get_body(&dav, "/src").await, Bytes::from("x"));
}

#[tokio::test]
async fn move_without_overwrite_fails_and_leaves_both() {
    let dav = handler();
    put(&dav, "/src", "new").await;
    put(&dav, "/dst", "old").await;
    let st = status(
        &dav,
        DavRequest::new(DavMethod::Move, p("/src")).destination(p("/dst")),
    )
    .await;
    assert_eq!(st, StatusCode::PreconditionFailed);
    assert_eq!(get_body(&dav, "/src").await, Bytes::from("new"));
    assert_eq!(get_body(&dav, "/dst").await, Bytes::from("old"));
}

#[tokio::test]
async fn move_collection_moves_subtree() {
    let dav = handler();
    assert_eq!(
        status(&dav, DavRequest::new(DavMethod::MkCol, p("/tree"))).await,
        StatusCode::Created
    );
    put(&dav, "/tree/leaf", "deep").await;
    let st = status(
        &dav,
        DavRequest::new(DavMethod::Move, p("/tree")).destination(p("/tree2")),
    )
    .await;
    assert_eq!(st, StatusCode::Created);
    assert_eq!(get_body(&dav, "/tree2/leaf").await, Bytes::from("deep"));
    assert_eq!(
        status(&dav, DavRequest::new(DavMethod::PropFind, p("/tree"))).await,
        StatusCode::NotFound
    );
}

// ===== LOCK / UNLOCK =====

#[tokio::test]
async fn lock_existing_resource_is_ok() {
    let dav = handler();
    put(&dav, "/file", "x").await;
    let resp = dav
        .handle(DavRequest::new(DavMethod::Lock, p("/file")).body(LOCKINFO))
        .await;
    assert_eq!(resp.status, StatusCode::Ok);
    let token = resp.lock_token.expect("lock token");
    assert!(token.starts_with("urn:uuid:"));
    assert!(matches!(resp.body, DavBody::LockDiscovery(_)));
}

#[tokio::test]
async fn lock_without_body_is_precondition_failed() {
    let dav = handler();
    put(&dav, "/file", "x").await;
    assert_eq!(
        status(&dav, DavRequest::new(DavMethod::Lock, p("/file"))).await,
        StatusCode::PreconditionFailed
    );
}

#[tokio::test]
async fn lock_missing_resource_creates_it() {
    let dav = handler();
    let resp = dav
        .handle(DavRequest::new(DavMethod::Lock, p("/fresh")).body(LOCKINFO))
        .await;
    assert_eq!(resp.status, StatusCode::Created);
    assert!(resp.lock_token.is_some());
    // the lock-null resource is now mapped.
    assert_eq!(
        status(&dav, DavRequest::new(DavMethod::PropFind, p("/fresh"))).await,
        StatusCode::MultiStatus
    );
}

#[tokio::test]
async fn lock_missing_intermediate_is_conflict() {
    let dav = handler();
    let st = status(
        &dav,
        DavRequest::new(DavMethod::Lock, p("/no/file")).body(LOCKINFO),
    )
    .await;
    assert_eq!(st, StatusCode::Conflict);
}

#[tokio::test]
async fn lock_held_by_other_is_precondition_failed() {
    let dav = handler();
    put(&dav, "/file", "x").await;
    let resp = dav
        .handle(DavRequest::new(DavMethod::Lock, p("/file")).body(LOCKINFO))
        .await;
    assert_eq!(resp.status, StatusCode::Ok);
    // no token submitted: refused.
    let st = status(
        &dav,
        DavRequest::new(DavMethod::Lock, p("/file")).body(LOCKINFO),
    )
    .await;
    assert_eq!(st, StatusCode::PreconditionFailed);
}

#[tokio::test]
async fn lock_refresh_with_token_keeps_lock() {
    let dav = handler();
    put(&dav, "/file", "x").await;
    let resp = dav
        .handle(DavRequest::new(DavMethod::Lock, p("/file")).body(LOCKINFO))
        .await;
    let token = resp.lock_token.unwrap();
    let resp = dav
        .handle(
            DavRequest::new(DavMethod::Lock, p("/file"))
                .body(LOCKINFO)
                .lock_token(format!("<{token}>")),
        )
        .await;
    assert_eq!(resp.status, StatusCode::Ok);
    assert_eq!(resp.lock_token.as_deref(), Some(token.as_str()));
}

#[tokio::test]
async fn unlock_after_lock_is_no_content() {
    let dav = handler();
    put(&dav, "/file", "x").await;
    let resp = dav
        .handle(DavRequest::new(DavMethod::Lock, p("/file")).body(LOCKINFO))
        .await;
    assert_eq!(resp.status, StatusCode::Ok);
    assert_eq!(
        status(&dav, DavRequest::new(DavMethod::Unlock, p("/file"))).await,
        StatusCode::NoContent
    );
    // releasing again fails deterministically instead of crashing.
    assert_eq!(
        status(&dav, DavRequest::new(DavMethod::Unlock, p("/file"))).await,
        StatusCode::Conflict
    );
}

#[tokio::test]
async fn unlock_with_coded_url_token() {
    let dav = handler();
    put(&dav, "/file", "x").await;
    let resp = dav
        .handle(DavRequest::new(DavMethod::Lock, p("/file")).body(LOCKINFO))
        .await;
    let token = resp.lock_token.unwrap();
    let st = status(
        &dav,
        DavRequest::new(DavMethod::Unlock, p("/file")).lock_token(format!("<{token}>")),
    )
    .await;
    assert_eq!(st, StatusCode::NoContent);
}

#[tokio::test]
async fn unlock_with_wrong_token_is_refused() {
    let dav = handler();
    put(&dav, "/file", "x").await;
    dav.handle(DavRequest::new(DavMethod::Lock, p("/file")).body(LOCKINFO))
        .await;
    let st = status(
        &dav,
        DavRequest::new(DavMethod::Unlock, p("/file")).lock_token("<urn:uuid:bogus>"),
    )
    .await;
    assert_eq!(st, StatusCode::Conflict);
}

#[tokio::test]
async fn delete_drops_the_lock() {
    let dav = handler();
    put(&dav, "/file", "x").await;
    dav.handle(DavRequest::new(DavMethod::Lock, p("/file")).body(LOCKINFO))
        .await;
    assert_eq!(
        status(&dav, DavRequest::new(DavMethod::Delete, p("/file"))).await,
        StatusCode::Ok
    );
    // the path can be locked again from scratch.
    let resp = dav
        .handle(DavRequest::new(DavMethod::Lock, p("/file")).body(LOCKINFO))
        .await;
    assert_eq!(resp.status, StatusCode::Created);
}

// ===== PROPPATCH =====

#[tokio::test]
async fn proppatch_is_multi_status() {
    let dav = handler();
    put(&dav, "/file", "x").await;
    let resp = dav
        .handle(
            DavRequest::new(DavMethod::PropPatch, p("/file"))
                .body("<propertyupdate/>")
                .prop_update("Z:Win32FileAttributes", Some("00000020".to_string())),
        )
        .await;
    assert_eq!(resp.status, StatusCode::MultiStatus);
    let ms = resp.body.as_multistatus().unwrap();
    assert_eq!(ms.responses.len(), 1);
    assert!(ms.responses[0]
        .propstats
        .iter()
        .all(|ps| ps.status == StatusCode::Ok));

    // the dead property shows up in a subsequent PROPFIND.
    let resp = dav
        .handle(DavRequest::new(DavMethod::PropFind, p("/file")).depth(Depth::Zero))
        .await;
    let ms = resp.body.as_multistatus().unwrap();
    assert!(ms.responses[0].propstats[0]
        .props
        .iter()
        .any(|p| p.name == "Z:Win32FileAttributes"));
}

#[tokio::test]
async fn proppatch_without_body_is_length_required() {
    let dav = handler();
    put(&dav, "/file", "x").await;
    assert_eq!(
        status(&dav, DavRequest::new(DavMethod::PropPatch, p("/file"))).await,
        StatusCode::LengthRequired
    );
}

// ===== OPTIONS =====

#[tokio::test]
async fn options_lists_methods() {
    let dav = handler();
    let resp = dav
        .handle(DavRequest::new(DavMethod::Options, DavPath::root()))
        .await;
    assert_eq!(resp.status, StatusCode::Ok);
    assert_eq!(resp.dav, Some("1,2"));
    let allow = resp.allow.unwrap();
    assert!(allow.contains(&"PROPFIND"));
    assert!(allow.contains(&"LOCK"));
    // the root itself cannot be moved or deleted.
    assert!(!allow.contains(&"MOVE"));
    assert!(!allow.contains(&"DELETE"));
}

#[tokio::test]
async fn options_on_unmapped_offers_creation() {
    let dav = handler();
    let resp = dav
        .handle(DavRequest::new(DavMethod::Options, p("/nothing")))
        .await;
    assert_eq!(resp.status, StatusCode::Ok);
    let allow = resp.allow.unwrap();
    assert!(allow.contains(&"MKCOL"));
    assert!(allow.contains(&"PUT"));
    assert!(!allow.contains(&"GET"));
}

// ===== dispatcher gates =====

#[tokio::test]
async fn disallowed_method_is_method_not_allowed() {
    let _ = env_logger::builder().is_test(true).try_init();
    let dav = DavHandler::builder(FileSystem::Mem)
        .methods(DavMethodSet::WEBDAV_RO)
        .build();
    assert_eq!(
        status(&dav, DavRequest::new(DavMethod::MkCol, p("/dir"))).await,
        StatusCode::MethodNotAllowed
    );
}

#[tokio::test]
async fn body_on_bodyless_method_is_unsupported_media_type() {
    let dav = handler();
    put(&dav, "/file", "x").await;
    let st = status(
        &dav,
        DavRequest::new(DavMethod::Delete, p("/file")).body("stray body"),
    )
    .await;
    assert_eq!(st, StatusCode::UnsupportedMediaType);
}

#[tokio::test]
async fn lock_without_locksystem_is_not_allowed() {
    let _ = env_logger::builder().is_test(true).try_init();
    let dav = DavHandler::builder(FileSystem::Mem).build();
    let st = status(
        &dav,
        DavRequest::new(DavMethod::Lock, p("/file")).body(LOCKINFO),
    )
    .await;
    assert_eq!(st, StatusCode::MethodNotAllowed);
}

// ===== concurrency =====

#[tokio::test(flavor = "multi_thread")]
async fn concurrent_writers_all_succeed() {
    let dav = handler();
    let mut tasks = Vec::new();
    for i in 0..32 {
        let dav = dav.clone();
        tasks.push(tokio::spawn(async move {
            let path = DavPath::new(&format!("/file-{i}")).unwrap();
            dav.handle(DavRequest::new(DavMethod::Put, path).body(format!("content {i}")))
                .await
                .status
        }));
    }
    for task in tasks {
        assert_eq!(task.await.unwrap(), StatusCode::Created);
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn swapped_copy_pairs_do_not_deadlock() {
    let dav = handler();
    put(&dav, "/a", "a").await;
    put(&dav, "/b", "b").await;
    for _ in 0..16 {
        let d1 = dav.clone();
        let t1 = tokio::spawn(async move {
            d1.handle(
                DavRequest::new(DavMethod::Copy, p("/a"))
                    .destination(p("/b"))
                    .overwrite(true),
            )
            .await
            .status
        });
        let d2 = dav.clone();
        let t2 = tokio::spawn(async move {
            d2.handle(
                DavRequest::new(DavMethod::Copy, p("/b"))
                    .destination(p("/a"))
                    .overwrite(true),
            )
            .await
            .status
        });
        // both must come back; replacement reports 204.
        assert_eq!(t1.await.unwrap(), StatusCode::NoContent);
        assert_eq!(t2.await.unwrap(), StatusCode::NoContent);
    }
}
