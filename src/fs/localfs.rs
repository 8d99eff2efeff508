//! Local filesystem access.
//!
//! This implementation is stateless. So the easiest way to use it
//! is to create a new instance when you need one.

use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use async_stream::stream;
use bytes::Bytes;
use futures_util::FutureExt;
use tokio::io::AsyncWriteExt;

use crate::davpath::DavPath;
use crate::fs::*;

/// Local filesystem implementation, serving a base directory.
pub(crate) struct LocalFs {
    pub basedir: PathBuf,
    pub public: bool,
}

impl LocalFs {
    /// Create a new LocalFs store, serving "base".
    ///
    /// If "public" is set to true, all files and directories created will be
    /// publically readable (mode 644/755), otherwise they will be private
    /// (mode 600/700). Umask still overrides this.
    pub fn new(base: PathBuf, public: bool) -> Arc<LocalFs> {
        Arc::new(Self {
            basedir: base,
            public,
        })
    }

    fn abs_path(&self, path: &DavPath) -> PathBuf {
        let mut pathbuf = self.basedir.clone();
        pathbuf.push(path.as_rel_ospath());
        pathbuf
    }
}

fn to_meta(meta: std::fs::Metadata) -> ResourceMeta {
    ResourceMeta {
        len: meta.len(),
        is_collection: meta.is_dir(),
        created: meta.created().ok(),
        modified: meta.modified().ok(),
    }
}

impl ResourceStore for LocalFs {
    fn metadata<'a>(&'a self, path: &'a DavPath) -> FsFuture<'a, ResourceMeta> {
        async move {
            let meta = tokio::fs::metadata(self.abs_path(path)).await?;
            Ok(to_meta(meta))
        }
        .boxed()
    }

    fn read<'a>(&'a self, path: &'a DavPath) -> FsFuture<'a, Bytes> {
        async move {
            let abs = self.abs_path(path);
            if tokio::fs::metadata(&abs).await?.is_dir() {
                return Err(FsError::Forbidden);
            }
            Ok(Bytes::from(tokio::fs::read(abs).await?))
        }
        .boxed()
    }

    fn write<'a>(&'a self, path: &'a DavPath, data: Bytes) -> FsFuture<'a, bool> {
        async move {
            trace!("FS: write {path}");
            let abs = self.abs_path(path);
            let existed = match tokio::fs::metadata(&abs).await {
                Ok(m) if m.is_dir() => return Err(FsError::Forbidden),
                Ok(_) => true,
                Err(e) if e.kind() == io::ErrorKind::NotFound => false,
                Err(e) => return Err(e.into()),
            };
            let mut opt = tokio::fs::OpenOptions::new();
            opt.write(true).truncate(true).create(true);
            #[cfg(unix)]
            if self.public {
                opt.mode(0o644);
            } else {
                opt.mode(0o600);
            }
            let mut file = opt.open(&abs).await?;
            file.write_all(&data).await?;
            Ok(!existed)
        }
        .boxed()
    }

    fn create_collection<'a>(&'a self, path: &'a DavPath) -> FsFuture<'a, ()> {
        async move {
            trace!("FS: create_collection {path}");
            let abs = self.abs_path(path);
            #[allow(unused_mut)]
            let mut dir = tokio::fs::DirBuilder::new();
            #[cfg(unix)]
            dir.mode(if self.public { 0o755 } else { 0o700 });
            match dir.create(abs).await {
                Ok(()) => Ok(()),
                // a file on the parent chain surfaces as ENOTDIR.
                Err(e) if e.raw_os_error() == Some(libc::ENOTDIR) => {
                    Err(FsError::NotACollection)
                }
                Err(e) => Err(e.into()),
            }
        }
        .boxed()
    }

    fn remove<'a>(&'a self, path: &'a DavPath) -> FsFuture<'a, ()> {
        async move {
            trace!("FS: remove {path}");
            let abs = self.abs_path(path);
            if tokio::fs::metadata(&abs).await?.is_dir() {
                Ok(tokio::fs::remove_dir_all(abs).await?)
            } else {
                Ok(tokio::fs::remove_file(abs).await?)
            }
        }
        .boxed()
    }

    fn read_dir<'a>(&'a self, path: &'a DavPath) -> FsFuture<'a, FsStream<FsDirEntry>> {
        async move {
            trace!("FS: read_dir {path}");
            let abs = self.abs_path(path);
            if !tokio::fs::metadata(&abs).await?.is_dir() {
                return Err(FsError::NotACollection);
            }
            let mut read_dir = tokio::fs::read_dir(&abs).await?;
            Ok(Box::pin(stream! {
                loop {
                    match read_dir.next_entry().await {
                        Ok(Some(entry)) => {
                            let name = match entry.file_name().into_string() {
                                Ok(name) => name,
                                Err(_) => continue,
                            };
                            match entry.metadata().await {
                                Ok(meta) => yield FsDirEntry { name, meta: to_meta(meta) },
                                Err(e) => {
                                    debug!("read_dir metadata failed {e}");
                                    break;
                                }
                            }
                        }
                        Ok(None) => break,
                        Err(e) => {
                            debug!("read_dir failed {e}");
                            break;
                        }
                    }
                }
            }) as _)
        }
        .boxed()
    }

    fn copy_file<'a>(&'a self, from: &'a DavPath, to: &'a DavPath) -> FsFuture<'a, ()> {
        async move {
            trace!("FS: copy_file {from} {to}");
            let p_from = self.abs_path(from);
            let p_to = self.abs_path(to);
            if let Err(e) = tokio::fs::copy(p_from, p_to).await {
                debug!("copy_file({from}, {to}) failed: {e}");
                Err(e.into())
            } else {
                Ok(())
            }
        }
        .boxed()
    }

    fn rename<'a>(&'a self, from: &'a DavPath, to: &'a DavPath) -> FsFuture<'a, ()> {
        async move {
            trace!("FS: rename {from} {to}");
            let p_from = self.abs_path(from);
            let p_to = self.abs_path(to);
            match tokio::fs::rename(&p_from, &p_to).await {
                Ok(v) => Ok(v),
                Err(e) => {
                    // webdav allows a rename from a directory to a file.
                    // note that this check is racy, and I'm not quite sure what
                    // we should do if the source is a symlink. anyway ...
                    if e.raw_os_error() == Some(libc::ENOTDIR) && p_from.is_dir() {
                        // remove and try again.
                        let _ = tokio::fs::remove_file(&p_to).await;
                        Ok(tokio::fs::rename(p_from, p_to).await?)
                    } else {
                        Err(e.into())
                    }
                }
            }
        }
        .boxed()
    }
}
