//
// This module contains the main entry point of the library,
// DavHandler.
//
use std::path::PathBuf;
use std::sync::Arc;

use bytes::Bytes;

use crate::body::DavBody;
use crate::davpath::DavPath;
use crate::fs::ResourceStore;
use crate::ls::memls::MemLs;
use crate::ls::DavLockSystem;
use crate::pathlock::PathLocks;
use crate::status::StatusCode;
use crate::util::{DavMethod, DavMethodSet, Depth};

use crate::errors::DavError;
use crate::DavResult;

pub mod handle_copymove;
pub mod handle_delete;
pub mod handle_gethead;
pub mod handle_lock;
pub mod handle_mkcol;
pub mod handle_options;
pub mod handle_props;
pub mod handle_put;

/// Configuration of the handler.
#[derive(Clone)]
pub struct DavBuilder {
    /// Filesystem backend.
    fs: FileSystem,
    /// Locksystem backend.
    ls: Option<LockSystem>,
    /// Set of allowed methods (Defaults to "all methods")
    allow: DavMethodSet,
    /// Principal is webdav speak for "user", used to give locks an owner (if a locksystem is
    /// active).
    principal: Option<String>,
}

/// File system backend.
#[derive(Clone)]
pub enum FileSystem {
    #[cfg(any(docsrs, feature = "memfs"))]
    Mem,
    #[cfg(any(docsrs, feature = "localfs"))]
    Local {
        /// Path to the root directory.
        base: PathBuf,
        public: bool,
    },
}

impl FileSystem {
    /// Serve a local directory
    #[cfg(any(docsrs, feature = "localfs"))]
    pub fn local(path: impl Into<PathBuf>, public: bool) -> Self {
        FileSystem::Local {
            base: path.into(),
            public,
        }
    }

    fn build(self) -> Arc<dyn ResourceStore> {
        match self {
            #[cfg(any(docsrs, feature = "memfs"))]
            FileSystem::Mem => crate::fs::memfs::MemFs::new(),
            #[cfg(any(docsrs, feature = "localfs"))]
            FileSystem::Local { base, public } => crate::fs::localfs::LocalFs::new(base, public),
        }
    }
}

#[derive(Default, Clone, Copy)]
pub enum LockSystem {
    #[default]
    Mem,
}

impl LockSystem {
    fn build(self) -> Arc<dyn DavLockSystem> {
        match self {
            LockSystem::Mem => MemLs::new(),
        }
    }
}

impl DavBuilder {
    /// Create a new configuration builder.
    pub fn new(fs: FileSystem) -> DavBuilder {
        Self {
            fs,
            ls: None,
            allow: DavMethodSet::all(),
            principal: None,
        }
    }

    /// Use the configuration that was built to generate a DavHandler.
    pub fn build(self) -> DavHandler {
        self.into()
    }

    /// Set the locksystem to use.
    pub fn locksystem(self, ls: LockSystem) -> Self {
        let mut this = self;
        this.ls = Some(ls);
        this
    }

    /// Which methods to allow (default is all methods).
    pub fn methods(self, allow: DavMethodSet) -> Self {
        let mut this = self;
        this.allow = allow;
        this
    }

    /// Set the name of the "webdav principal". This will be the owner of any created locks.
    pub fn principal(self, principal: impl Into<String>) -> Self {
        let mut this = self;
        this.principal = Some(principal.into());
        this
    }
}

/// The webdav handler struct.
///
/// This is the explicitly-owned server context: it is the single owner of
/// the resource store and the lock table, it is cheap to clone, and clones
/// share state, so one handler can serve any number of concurrent
/// requests.
#[derive(Clone)]
pub struct DavHandler {
    pub(crate) fs: Arc<dyn ResourceStore>,
    pub(crate) ls: Option<Arc<dyn DavLockSystem>>,
    pub(crate) allow: DavMethodSet,
    pub(crate) principal: Option<Arc<String>>,
    pub(crate) serial: Arc<PathLocks>,
}

impl From<DavBuilder> for DavHandler {
    fn from(cfg: DavBuilder) -> Self {
        Self {
            fs: cfg.fs.build(),
            ls: cfg.ls.map(|ls| ls.build()),
            allow: cfg.allow,
            principal: cfg.principal.map(Arc::new),
            serial: PathLocks::new(),
        }
    }
}

/// One parsed request, as handed over by the transport collaborator.
#[derive(Debug)]
pub struct DavRequest {
    pub method: DavMethod,
    pub path: DavPath,
    /// PROPFIND traversal scope.
    pub depth: Depth,
    /// May COPY/MOVE replace an existing destination? Defaults to false.
    pub overwrite: bool,
    /// Destination path for COPY/MOVE.
    pub destination: Option<DavPath>,
    /// Submitted lock token (UNLOCK, LOCK refresh). May be in
    /// `Coded-URL` form (`<urn:uuid:...>`).
    pub lock_token: Option<String>,
    /// Raw body. `None` models a request without a body or
    /// Content-Length at all.
    pub body: Option<Bytes>,
    /// Parsed property updates (PROPPATCH).
    pub prop_updates: Vec<PropUpdate>,
}

/// One PROPPATCH update; `value: None` removes the property.
#[derive(Debug, Clone)]
pub struct PropUpdate {
    pub name: String,
    pub value: Option<String>,
}

impl DavRequest {
    pub fn new(method: DavMethod, path: DavPath) -> DavRequest {
        DavRequest {
            method,
            path,
            depth: Depth::default(),
            overwrite: false,
            destination: None,
            lock_token: None,
            body: None,
            prop_updates: Vec::new(),
        }
    }

    pub fn depth(self, depth: Depth) -> Self {
        let mut this = self;
        this.depth = depth;
        this
    }

    pub fn overwrite(self, overwrite: bool) -> Self {
        let mut this = self;
        this.overwrite = overwrite;
        this
    }

    pub fn destination(self, destination: DavPath) -> Self {
        let mut this = self;
        this.destination = Some(destination);
        this
    }

    pub fn lock_token(self, token: impl Into<String>) -> Self {
        let mut this = self;
        this.lock_token = Some(token.into());
        this
    }

    pub fn body(self, body: impl Into<Bytes>) -> Self {
        let mut this = self;
        this.body = Some(body.into());
        this
    }

    pub fn prop_update(self, name: impl Into<String>, value: Option<String>) -> Self {
        let mut this = self;
        this.prop_updates.push(PropUpdate {
            name: name.into(),
            value,
        });
        this
    }
}

/// What goes back to the transport collaborator.
#[derive(Debug)]
pub struct DavResponse {
    pub status: StatusCode,
    /// `DAV:` capability level (OPTIONS).
    pub dav: Option<&'static str>,
    /// `Allow:` method list (OPTIONS).
    pub allow: Option<Vec<&'static str>>,
    /// `Lock-Token:` of a freshly taken lock (LOCK).
    pub lock_token: Option<String>,
    pub body: DavBody,
}

impl DavResponse {
    pub(crate) fn new(status: StatusCode) -> DavResponse {
        DavResponse {
            status,
            dav: None,
            allow: None,
            lock_token: None,
            body: DavBody::empty(),
        }
    }

    pub(crate) fn with_body(status: StatusCode, body: impl Into<DavBody>) -> DavResponse {
        DavResponse {
            body: body.into(),
            ..DavResponse::new(status)
        }
    }
}

impl DavHandler {
    /// Return a configuration builder.
    pub fn builder(fs: FileSystem) -> DavBuilder {
        DavBuilder::new(fs)
    }

    /// Handle a webdav request.
    pub async fn handle(&self, req: DavRequest) -> DavResponse {
        debug!("== START REQUEST {} {}", req.method.name(), req.path);
        // Turn any DavError results into a status-only response.
        match self.handle2(&req).await {
            Ok(resp) => {
                debug!("== END REQUEST result {}", resp.status);
                resp
            }
            Err(err) => {
                debug!("== END REQUEST result {:?}", err);
                DavResponse::new(err.statuscode())
            }
        }
    }

    // internal dispatcher.
    async fn handle2(&self, req: &DavRequest) -> DavResult<DavResponse> {
        // see if the method is allowed.
        if !self.allow.covers(req.method) {
            debug!(
                "method {} not allowed on request {}",
                req.method.name(),
                req.path
            );
            return Err(DavError::Status(StatusCode::MethodNotAllowed));
        }

        // Not all methods accept a body.
        if !DavMethodSet::WEBDAV_BODY.covers(req.method)
            && req.body.as_ref().map_or(false, |b| !b.is_empty())
        {
            return Err(StatusCode::UnsupportedMediaType.into());
        }

        // Serialize against concurrent work on the same paths. Readers
        // share; mutations are exclusive; COPY/MOVE claim both ends (the
        // claim itself orders the keys to dodge swapped-pair deadlocks).
        let write = !DavMethodSet::WEBDAV_RO.covers(req.method);
        let mut paths = vec![&req.path];
        if let (DavMethod::Copy | DavMethod::Move, Some(dst)) = (req.method, &req.destination) {
            if dst != &req.path {
                paths.push(dst);
            }
        }
        let _guard = self.serial.clone().claim(&paths, write).await?;

        match req.method {
            DavMethod::Options => self.handle_options(req).await,
            DavMethod::PropFind => self.handle_propfind(req).await,
            DavMethod::PropPatch => self.handle_proppatch(req).await,
            DavMethod::MkCol => self.handle_mkcol(req).await,
            DavMethod::Delete => self.handle_delete(req).await,
            DavMethod::Lock => self.handle_lock(req).await,
            DavMethod::Unlock => self.handle_unlock(req).await,
            DavMethod::Head | DavMethod::Get => self.handle_get(req).await,
            DavMethod::Copy | DavMethod::Move => self.handle_copymove(req).await,
            DavMethod::Put => self.handle_put(req).await,
        }
    }
}
