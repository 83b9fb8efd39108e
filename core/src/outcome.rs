//! The four ways an exchange can end.

use std::fmt;

use crate::error::TransportError;
use crate::http::{Request, Response};
use crate::validate::ValidationError;

/// Result of one exchange. Exactly one variant is produced per `execute`.
#[derive(Debug)]
pub enum Outcome<A> {
    /// The transport failed before any response was obtained.
    NoResponse {
        request: Request,
        error: TransportError,
    },
    /// A response arrived with a status other than the expected one. The body
    /// was not validated.
    WrongStatus {
        request: Request,
        response: Response<String>,
        actual_status: u16,
        expected_status: u16,
    },
    /// The status matched but the body failed validation.
    InvalidBody {
        request: Request,
        response: Response<String>,
        error: ValidationError,
    },
    /// The status matched and the body validated into `A`.
    Valid {
        request: Request,
        response: Response<A>,
    },
}

/// Discriminant of an `Outcome`, without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutcomeKind {
    NoResponse,
    WrongStatus,
    InvalidBody,
    Valid,
}

impl OutcomeKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            OutcomeKind::NoResponse => "NoResponse",
            OutcomeKind::WrongStatus => "WrongStatus",
            OutcomeKind::InvalidBody => "InvalidBody",
            OutcomeKind::Valid => "Valid",
        }
    }
}

impl fmt::Display for OutcomeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<A> Outcome<A> {
    pub fn kind(&self) -> OutcomeKind {
        match self {
            Outcome::NoResponse { .. } => OutcomeKind::NoResponse,
            Outcome::WrongStatus { .. } => OutcomeKind::WrongStatus,
            Outcome::InvalidBody { .. } => OutcomeKind::InvalidBody,
            Outcome::Valid { .. } => OutcomeKind::Valid,
        }
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, Outcome::Valid { .. })
    }

    pub fn request(&self) -> &Request {
        match self {
            Outcome::NoResponse { request, .. }
            | Outcome::WrongStatus { request, .. }
            | Outcome::InvalidBody { request, .. }
            | Outcome::Valid { request, .. } => request,
        }
    }

    /// The validated body, if any.
    pub fn body(&self) -> Option<&A> {
        match self {
            Outcome::Valid { response, .. } => Some(&response.body),
            _ => None,
        }
    }

    pub fn into_body(self) -> Option<A> {
        match self {
            Outcome::Valid { response, .. } => Some(response.body),
            _ => None,
        }
    }
}
