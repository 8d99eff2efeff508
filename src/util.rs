use std::str::FromStr;
use std::time::{SystemTime, UNIX_EPOCH};

use bitflags::bitflags;
use time::format_description::well_known::Rfc2822;
use time::format_description::well_known::Rfc3339;
use time::macros::offset;

use crate::errors::DavError;
use crate::DavResult;

/// Methods supported by the handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DavMethod {
    Head,
    Get,
    Put,
    Options,
    PropFind,
    PropPatch,
    MkCol,
    Copy,
    Move,
    Delete,
    Lock,
    Unlock,
}

bitflags! {
    /// A set of methods, for allow-lists.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct DavMethodSet: u32 {
        const HEAD = 0x0001;
        const GET = 0x0002;
        const PUT = 0x0004;
        const OPTIONS = 0x0010;
        const PROPFIND = 0x0020;
        const PROPPATCH = 0x0040;
        const MKCOL = 0x0080;
        const COPY = 0x0100;
        const MOVE = 0x0200;
        const DELETE = 0x0400;
        const LOCK = 0x0800;
        const UNLOCK = 0x1000;

        const HTTP_RO = Self::HEAD.bits() | Self::GET.bits() | Self::OPTIONS.bits();
        const HTTP_RW = Self::HTTP_RO.bits() | Self::PUT.bits();
        const WEBDAV_RO = Self::HTTP_RO.bits() | Self::PROPFIND.bits();
        const WEBDAV_BODY = Self::PUT.bits()
            | Self::PROPFIND.bits() | Self::PROPPATCH.bits() | Self::LOCK.bits();
    }
}
impl DavMethodSet {
    pub const WEBDAV_RW: Self = Self::all();

    pub fn covers(self, m: DavMethod) -> bool {
        self.contains(m.as_set())
    }
}

impl DavMethod {
    /// This method as a singleton set.
    pub fn as_set(self) -> DavMethodSet {
        match self {
            DavMethod::Head => DavMethodSet::HEAD,
            DavMethod::Get => DavMethodSet::GET,
            DavMethod::Put => DavMethodSet::PUT,
            DavMethod::Options => DavMethodSet::OPTIONS,
            DavMethod::PropFind => DavMethodSet::PROPFIND,
            DavMethod::PropPatch => DavMethodSet::PROPPATCH,
            DavMethod::MkCol => DavMethodSet::MKCOL,
            DavMethod::Copy => DavMethodSet::COPY,
            DavMethod::Move => DavMethodSet::MOVE,
            DavMethod::Delete => DavMethodSet::DELETE,
            DavMethod::Lock => DavMethodSet::LOCK,
            DavMethod::Unlock => DavMethodSet::UNLOCK,
        }
    }

    /// The wire-level method name.
    pub fn name(self) -> &'static str {
        match self {
            DavMethod::Head => "HEAD",
            DavMethod::Get => "GET",
            DavMethod::Put => "PUT",
            DavMethod::Options => "OPTIONS",
            DavMethod::PropFind => "PROPFIND",
            DavMethod::PropPatch => "PROPPATCH",
            DavMethod::MkCol => "MKCOL",
            DavMethod::Copy => "COPY",
            DavMethod::Move => "MOVE",
            DavMethod::Delete => "DELETE",
            DavMethod::Lock => "LOCK",
            DavMethod::Unlock => "UNLOCK",
        }
    }
}

// translate a wire method name into our own enum that has webdav methods as well.
pub fn dav_method(name: &str) -> DavResult<DavMethod> {
    let m = match name {
        "HEAD" => DavMethod::Head,
        "GET" => DavMethod::Get,
        "PUT" => DavMethod::Put,
        "DELETE" => DavMethod::Delete,
        "OPTIONS" => DavMethod::Options,
        "PROPFIND" => DavMethod::PropFind,
        "PROPPATCH" => DavMethod::PropPatch,
        "MKCOL" => DavMethod::MkCol,
        "COPY" => DavMethod::Copy,
        "MOVE" => DavMethod::Move,
        "LOCK" => DavMethod::Lock,
        "UNLOCK" => DavMethod::Unlock,
        _ => {
            return Err(DavError::UnknownDavMethod);
        }
    };
    Ok(m)
}

// for external use.
impl TryFrom<&http::Method> for DavMethod {
    type Error = DavError;

    fn try_from(value: &http::Method) -> Result<Self, Self::Error> {
        dav_method(value.as_str())
    }
}

/// PROPFIND traversal scope.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Depth {
    Zero,
    One,
    #[default]
    Infinity,
}

impl FromStr for Depth {
    type Err = DavError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "0" => Ok(Depth::Zero),
            "1" => Ok(Depth::One),
            s if s.eq_ignore_ascii_case("infinity") => Ok(Depth::Infinity),
            _ => Err(DavError::InvalidDepth),
        }
    }
}

pub fn systemtime_to_offsetdatetime(t: SystemTime) -> time::OffsetDateTime {
    match t.duration_since(UNIX_EPOCH) {
        Ok(t) => {
            let tm = time::OffsetDateTime::from_unix_timestamp(t.as_secs() as i64).unwrap();
            tm.to_offset(offset!(UTC))
        }
        Err(_) => time::OffsetDateTime::UNIX_EPOCH.to_offset(offset!(UTC)),
    }
}

pub fn systemtime_to_httpdate(t: SystemTime) -> String {
    // Sat, 27 Jul 2019 07:48:54 GMT
    systemtime_to_offsetdatetime(t)
        .format(&Rfc2822)
        .unwrap()
        .replace("+0000", "GMT")
}

pub fn systemtime_to_rfc3339(t: SystemTime) -> String {
    // 1996-12-19T16:39:57Z
    systemtime_to_offsetdatetime(t).format(&Rfc3339).unwrap()
}
