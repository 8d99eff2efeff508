//! The closed set of status codes the core can produce.
//!
//! Webdav extends the plain HTTP code space (207 Multi-Status), so the core
//! keeps a single enumeration for both and converts to wire-level numeric
//! codes only at the boundary.

use std::fmt;

/// Outcome of a request, as seen by the transport collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusCode {
    Ok,
    Created,
    NoContent,
    MultiStatus,
    Unauthorized,
    Forbidden,
    NotFound,
    MethodNotAllowed,
    Conflict,
    LengthRequired,
    PreconditionFailed,
    UnsupportedMediaType,
    InternalServerError,
    NotImplemented,
}

impl StatusCode {
    pub fn as_u16(self) -> u16 {
        match self {
            StatusCode::Ok => 200,
            StatusCode::Created => 201,
            StatusCode::NoContent => 204,
            StatusCode::MultiStatus => 207,
            StatusCode::Unauthorized => 401,
            StatusCode::Forbidden => 403,
            StatusCode::NotFound => 404,
            StatusCode::MethodNotAllowed => 405,
            StatusCode::Conflict => 409,
            StatusCode::LengthRequired => 411,
            StatusCode::PreconditionFailed => 412,
            StatusCode::UnsupportedMediaType => 415,
            StatusCode::InternalServerError => 500,
            StatusCode::NotImplemented => 501,
        }
    }

    pub fn canonical_reason(self) -> &'static str {
        match self {
            StatusCode::Ok => "OK",
            StatusCode::Created => "Created",
            StatusCode::NoContent => "No Content",
            StatusCode::MultiStatus => "Multi-Status",
            StatusCode::Unauthorized => "Unauthorized",
            StatusCode::Forbidden => "Forbidden",
            StatusCode::NotFound => "Not Found",
            StatusCode::MethodNotAllowed => "Method Not Allowed",
            StatusCode::Conflict => "Conflict",
            StatusCode::LengthRequired => "Length Required",
            StatusCode::PreconditionFailed => "Precondition Failed",
            StatusCode::UnsupportedMediaType => "Unsupported Media Type",
            StatusCode::InternalServerError => "Internal Server Error",
            StatusCode::NotImplemented => "Not Implemented",
        }
    }

    pub fn is_success(self) -> bool {
        matches!(
            self,
            StatusCode::Ok | StatusCode::Created | StatusCode::NoContent | StatusCode::MultiStatus
        )
    }
}

impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.as_u16(), self.canonical_reason())
    }
}

impl From<StatusCode> for http::StatusCode {
    fn from(code: StatusCode) -> http::StatusCode {
        match code {
            StatusCode::Ok => http::StatusCode::OK,
            StatusCode::Created => http::StatusCode::CREATED,
            StatusCode::NoContent => http::StatusCode::NO_CONTENT,
            StatusCode::MultiStatus => http::StatusCode::MULTI_STATUS,
            StatusCode::Unauthorized => http::StatusCode::UNAUTHORIZED,
            StatusCode::Forbidden => http::StatusCode::FORBIDDEN,
            StatusCode::NotFound => http::StatusCode::NOT_FOUND,
            StatusCode::MethodNotAllowed => http::StatusCode::METHOD_NOT_ALLOWED,
            StatusCode::Conflict => http::StatusCode::CONFLICT,
            StatusCode::LengthRequired => http::StatusCode::LENGTH_REQUIRED,
            StatusCode::PreconditionFailed => http::StatusCode::PRECONDITION_FAILED,
            StatusCode::UnsupportedMediaType => http::StatusCode::UNSUPPORTED_MEDIA_TYPE,
            StatusCode::InternalServerError => http::StatusCode::INTERNAL_SERVER_ERROR,
            StatusCode::NotImplemented => http::StatusCode::NOT_IMPLEMENTED,
        }
    }
}
