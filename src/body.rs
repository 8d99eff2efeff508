//! Definitions for the response payload.

use bytes::Bytes;

use crate::multistatus::{LockDiscovery, MultiStatus};

/// Payload returned by the handler. Raw bytes go straight to the wire;
/// the structured variants are rendered by the XML collaborator.
#[derive(Debug)]
pub enum DavBody {
    Empty,
    Bytes(Bytes),
    MultiStatus(MultiStatus),
    LockDiscovery(LockDiscovery),
}

impl DavBody {
    /// Return an empty body.
    pub fn empty() -> DavBody {
        DavBody::Empty
    }

    pub fn is_empty(&self) -> bool {
        match self {
            DavBody::Empty => true,
            DavBody::Bytes(b) => b.is_empty(),
            _ => false,
        }
    }

    /// The raw content, for `Bytes` bodies.
    pub fn as_bytes(&self) -> Option<&Bytes> {
        match self {
            DavBody::Bytes(b) => Some(b),
            _ => None,
        }
    }

    /// The multi-status payload, if that is what this body is.
    pub fn as_multistatus(&self) -> Option<&MultiStatus> {
        match self {
            DavBody::MultiStatus(ms) => Some(ms),
            _ => None,
        }
    }
}

impl From<String> for DavBody {
    fn from(t: String) -> DavBody {
        DavBody::Bytes(Bytes::from(t))
    }
}

impl From<&str> for DavBody {
    fn from(t: &str) -> DavBody {
        DavBody::Bytes(Bytes::from(t.to_string()))
    }
}

impl From<Bytes> for DavBody {
    fn from(t: Bytes) -> DavBody {
        DavBody::Bytes(t)
    }
}

impl From<MultiStatus> for DavBody {
    fn from(t: MultiStatus) -> DavBody {
        DavBody::MultiStatus(t)
    }
}

impl From<LockDiscovery> for DavBody {
    fn from(t: LockDiscovery) -> DavBody {
        DavBody::LockDiscovery(t)
    }
}
