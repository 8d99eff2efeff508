//! Error type used internally by the handler, with a single mapping
//! point into the closed status-code set.

use std::error::Error;
use std::fmt;
use std::io;

use crate::fs::FsError;
use crate::status::StatusCode;

pub type DavResult<T> = Result<T, DavError>;

#[derive(Debug)]
pub enum DavError {
    /// The path contains segments that escape or would escape the root.
    ForbiddenPath,
    /// The path (or destination) could not be parsed.
    InvalidPath,
    /// The Depth parameter was not one of "0", "1", "infinity".
    InvalidDepth,
    /// The wire method is not a (supported) webdav method.
    UnknownDavMethod,
    /// Terminate with this status.
    Status(StatusCode),
    /// Error from the resource store.
    Fs(FsError),
    /// Unexpected I/O failure outside the store.
    Io(io::Error),
}

impl DavError {
    /// The status code reported to the transport collaborator.
    pub fn statuscode(&self) -> StatusCode {
        match self {
            DavError::ForbiddenPath => StatusCode::Forbidden,
            DavError::InvalidPath => StatusCode::Conflict,
            DavError::InvalidDepth => StatusCode::PreconditionFailed,
            DavError::UnknownDavMethod => StatusCode::NotImplemented,
            DavError::Status(c) => *c,
            DavError::Fs(e) => fs_to_status(*e),
            DavError::Io(_) => StatusCode::InternalServerError,
        }
    }
}

fn fs_to_status(e: FsError) -> StatusCode {
    match e {
        FsError::NotFound => StatusCode::NotFound,
        FsError::NotACollection => StatusCode::Conflict,
        FsError::Exists => StatusCode::MethodNotAllowed,
        FsError::Forbidden => StatusCode::Forbidden,
        FsError::NotImplemented => StatusCode::NotImplemented,
        FsError::GeneralFailure => StatusCode::InternalServerError,
    }
}

impl fmt::Display for DavError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DavError::ForbiddenPath => write!(f, "path escapes the root"),
            DavError::InvalidPath => write!(f, "invalid path"),
            DavError::InvalidDepth => write!(f, "invalid depth"),
            DavError::UnknownDavMethod => write!(f, "unknown method"),
            DavError::Status(c) => write!(f, "{c}"),
            DavError::Fs(e) => write!(f, "filesystem error: {e:?}"),
            DavError::Io(e) => write!(f, "io error: {e}"),
        }
    }
}

impl Error for DavError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            DavError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<StatusCode> for DavError {
    fn from(c: StatusCode) -> Self {
        DavError::Status(c)
    }
}

impl From<FsError> for DavError {
    fn from(e: FsError) -> Self {
        DavError::Fs(e)
    }
}

impl From<io::Error> for DavError {
    fn from(e: io::Error) -> Self {
        DavError::Io(e)
    }
}
