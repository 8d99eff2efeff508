//! Ancestor-aware path resolution.
//!
//! Every method has two distinct "not there" outcomes: the leaf is
//! missing while its ancestors exist (404 territory), or some ancestor is
//! missing or not a collection (409 territory). The three-way result
//! keeps that distinction explicit instead of burying it in a boolean.

use crate::davpath::DavPath;
use crate::fs::{FsError, ResourceMeta, ResourceStore};
use crate::DavResult;

#[derive(Debug)]
pub(crate) enum Resolved {
    Found(ResourceMeta),
    /// Ancestors are all present collections, the leaf is not there.
    MissingLeaf,
    /// Some ancestor is absent, or a file stands in the ancestor chain.
    MissingAncestor,
}

pub(crate) async fn resolve(fs: &dyn ResourceStore, path: &DavPath) -> DavResult<Resolved> {
    for ancestor in path.ancestors() {
        match fs.metadata(&ancestor).await {
            Ok(meta) if meta.is_collection => {}
            Ok(_) => return Ok(Resolved::MissingAncestor),
            Err(FsError::NotFound) | Err(FsError::NotACollection) => {
                return Ok(Resolved::MissingAncestor)
            }
            Err(e) => return Err(e.into()),
        }
    }
    match fs.metadata(path).await {
        Ok(meta) => Ok(Resolved::Found(meta)),
        Err(FsError::NotFound) => Ok(Resolved::MissingLeaf),
        // the leaf of an all-collection chain can still be unreachable
        // when a racing rename put a file in the way.
        Err(FsError::NotACollection) => Ok(Resolved::MissingAncestor),
        Err(e) => Err(e.into()),
    }
}

#[cfg(test)]
#[cfg(feature = "memfs")]
mod tests {
    use super::*;
    use crate::fs::memfs::MemFs;
    use bytes::Bytes;

    fn p(s: &str) -> DavPath {
        DavPath::new(s).unwrap()
    }

    #[tokio::test]
    async fn test_three_way() {
        let fs = MemFs::new();
        fs.create_collection(&p("/dir")).await.unwrap();
        fs.write(&p("/dir/file"), Bytes::from("x")).await.unwrap();

        assert!(matches!(
            resolve(&*fs, &p("/dir/file")).await.unwrap(),
            Resolved::Found(_)
        ));
        assert!(matches!(
            resolve(&*fs, &p("/dir/none")).await.unwrap(),
            Resolved::MissingLeaf
        ));
        assert!(matches!(
            resolve(&*fs, &p("/none/none")).await.unwrap(),
            Resolved::MissingAncestor
        ));
        // a file in the ancestor chain is as bad as a hole in it.
        assert!(matches!(
            resolve(&*fs, &p("/dir/file/deeper")).await.unwrap(),
            Resolved::MissingAncestor
        ));
    }

    #[tokio::test]
    async fn test_root_resolves() {
        let fs = MemFs::new();
        assert!(matches!(
            resolve(&*fs, &DavPath::root()).await.unwrap(),
            Resolved::Found(m) if m.is_collection
        ));
    }
}
