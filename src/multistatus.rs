//! Structured response fragments.
//!
//! PROPFIND, PROPPATCH and LOCK answers are sequences of per-resource
//! (or per-property) outcomes. The core materializes them here; the XML
//! collaborator renders them onto the wire.

use crate::davpath::DavPath;
use crate::fs::ResourceMeta;
use crate::status::StatusCode;
use crate::util;

/// The payload of a 207 Multi-Status answer.
#[derive(Debug, Default)]
pub struct MultiStatus {
    pub responses: Vec<MsResponse>,
}

/// Outcome for one resource.
#[derive(Debug)]
pub struct MsResponse {
    pub href: String,
    pub propstats: Vec<PropStat>,
}

/// A group of properties sharing one status.
#[derive(Debug)]
pub struct PropStat {
    pub status: StatusCode,
    pub props: Vec<DavProp>,
}

/// One property; `value: None` renders as an empty element.
#[derive(Debug, Clone)]
pub struct DavProp {
    pub name: String,
    pub value: Option<String>,
}

impl DavProp {
    pub fn new(name: &str, value: impl Into<Option<String>>) -> DavProp {
        DavProp {
            name: name.to_string(),
            value: value.into(),
        }
    }
}

impl MsResponse {
    /// The live-property entry for a resource.
    pub(crate) fn from_meta(path: &DavPath, meta: &ResourceMeta) -> MsResponse {
        let mut props = vec![
            DavProp::new(
                "D:displayname",
                path.file_name().map(|n| n.to_string()),
            ),
            DavProp::new(
                "D:resourcetype",
                meta.is_collection.then(|| "D:collection".to_string()),
            ),
        ];
        if meta.is_file() {
            props.push(DavProp::new(
                "D:getcontentlength",
                Some(meta.len.to_string()),
            ));
        }
        if let Some(t) = meta.created {
            props.push(DavProp::new(
                "D:creationdate",
                Some(util::systemtime_to_rfc3339(t)),
            ));
        }
        if let Some(t) = meta.modified {
            props.push(DavProp::new(
                "D:getlastmodified",
                Some(util::systemtime_to_httpdate(t)),
            ));
        }
        MsResponse {
            href: path.as_url_string(),
            propstats: vec![PropStat {
                status: StatusCode::Ok,
                props,
            }],
        }
    }
}

/// The payload of a LOCK answer (the lockdiscovery fragment).
#[derive(Debug, Clone)]
pub struct LockDiscovery {
    pub token: String,
    pub root: String,
    pub owner: Option<String>,
    /// Always "exclusive"; shared locks are not modeled.
    pub scope: &'static str,
}

impl LockDiscovery {
    pub(crate) fn new(lock: &crate::ls::DavLock) -> LockDiscovery {
        LockDiscovery {
            token: lock.token.clone(),
            root: lock.path.as_url_string(),
            owner: lock.owner.clone(),
            scope: "exclusive",
        }
    }
}
