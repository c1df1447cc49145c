//! Failure classification
//!
//! Every transport or HTTP failure is mapped to one of a fixed set of semantic
//! categories before it is stored or shown. Classification is a pure, total
//! function over [`TransportFailure`]: every possible outcome maps to exactly
//! one [`ClassifiedError`].

use serde::Deserialize;
use thiserror::Error;

use crate::schema::ValidationFailure;

/// Semantic category of a failed request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// No response reached us, or the time budget was exceeded
    Network,
    /// A response arrived but its body could not be decoded as JSON
    Malformed,
    /// The credential was rejected (HTTP 401/403)
    Auth,
    /// The requested entity does not exist (HTTP 404)
    NotFound,
    /// The upstream asked us to slow down (HTTP 429)
    RateLimited,
    /// The request itself was rejected as invalid (HTTP 400/422)
    Validation,
    /// The upstream failed (HTTP 5xx)
    ServerError,
    /// The body parsed as JSON but failed schema validation
    SchemaInvalid,
    /// Anything the table does not cover
    Unknown,
}

impl ErrorKind {
    /// Default human-readable message for this category, used when the
    /// upstream body supplies none.
    pub fn default_message(self) -> &'static str {
        match self {
            Self::Network => "Could not reach the movie database",
            Self::Malformed => "The server response could not be read",
            Self::Auth => "The API credential was rejected",
            Self::NotFound => "The requested item was not found",
            Self::RateLimited => "Too many requests, please slow down",
            Self::Validation => "The request was rejected as invalid",
            Self::ServerError => "The movie database is having trouble",
            Self::SchemaInvalid => "The server response had an unexpected shape",
            Self::Unknown => "Something went wrong",
        }
    }

    /// Whether a retry of the same request can plausibly succeed
    pub fn retryable(self) -> bool {
        matches!(self, Self::Network | Self::RateLimited | Self::ServerError)
    }
}

/// The normalized, category-tagged representation of any request failure.
///
/// Never mutated after creation: a retry produces a new entry state with a
/// new error, not an edit of this one.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ClassifiedError {
    pub kind: ErrorKind,
    pub message: String,
    pub retryable: bool,
}

impl ClassifiedError {
    fn of_kind(kind: ErrorKind) -> Self {
        Self {
            kind,
            message: kind.default_message().to_string(),
            retryable: kind.retryable(),
        }
    }

    fn with_message(kind: ErrorKind, message: String) -> Self {
        Self {
            kind,
            message,
            retryable: kind.retryable(),
        }
    }
}

impl From<&ValidationFailure> for ClassifiedError {
    fn from(failure: &ValidationFailure) -> Self {
        Self::with_message(ErrorKind::SchemaInvalid, failure.to_string())
    }
}

/// Structured error body the upstream may attach to non-2xx responses
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct ApiErrorBody {
    pub status_code: Option<u32>,
    pub status_message: Option<String>,
}

/// A low-level failure as observed by the transport layer
#[derive(Debug, Clone, PartialEq)]
pub enum TransportFailure {
    /// Connection-level failure, no response obtained
    Connection(String),
    /// The request exceeded its time budget
    Timeout,
    /// The response body failed to decode as JSON
    Decode(String),
    /// An HTTP response with a non-success status
    Http {
        status: u16,
        body: Option<ApiErrorBody>,
    },
}

/// Maps a transport failure to its semantic category.
///
/// The rules are ordered and the first match wins:
/// connection failure and timeout are Network; an undecodable body is
/// Malformed; an upstream body carrying a known internal `status_code` decides
/// the kind directly; otherwise the HTTP status decides it. An upstream
/// `status_message` is passed through verbatim whichever rule fires.
pub fn classify(failure: &TransportFailure) -> ClassifiedError {
    match failure {
        TransportFailure::Connection(_) | TransportFailure::Timeout => {
            ClassifiedError::of_kind(ErrorKind::Network)
        }
        TransportFailure::Decode(_) => ClassifiedError::of_kind(ErrorKind::Malformed),
        TransportFailure::Http { status, body } => {
            let kind = body
                .as_ref()
                .and_then(|body| body.status_code)
                .and_then(kind_from_api_code)
                .unwrap_or_else(|| kind_from_status(*status));
            match body.as_ref().and_then(|body| body.status_message.clone()) {
                Some(message) => ClassifiedError::with_message(kind, message),
                None => ClassifiedError::of_kind(kind),
            }
        }
    }
}

/// Upstream-internal status codes, consulted before the HTTP status
fn kind_from_api_code(code: u32) -> Option<ErrorKind> {
    match code {
        3 | 7 => Some(ErrorKind::Auth),
        34 => Some(ErrorKind::NotFound),
        6 | 24 => Some(ErrorKind::Validation),
        25 | 26 => Some(ErrorKind::ServerError),
        _ => None,
    }
}

fn kind_from_status(status: u16) -> ErrorKind {
    match status {
        401 | 403 => ErrorKind::Auth,
        404 => ErrorKind::NotFound,
        429 => ErrorKind::RateLimited,
        400 | 422 => ErrorKind::Validation,
        500..=599 => ErrorKind::ServerError,
        _ => ErrorKind::Unknown,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn http(status: u16) -> TransportFailure {
        TransportFailure::Http { status, body: None }
    }

    #[test]
    fn test_connection_failure_is_network_and_retryable() {
        let err = classify(&TransportFailure::Connection("refused".to_string()));
        assert_eq!(err.kind, ErrorKind::Network);
        assert!(err.retryable);
    }

    #[test]
    fn test_timeout_is_network_and_retryable() {
        let err = classify(&TransportFailure::Timeout);
        assert_eq!(err.kind, ErrorKind::Network);
        assert!(err.retryable);
    }

    #[test]
    fn test_decode_failure_is_malformed_not_retryable() {
        let err = classify(&TransportFailure::Decode("bad json".to_string()));
        assert_eq!(err.kind, ErrorKind::Malformed);
        assert!(!err.retryable);
    }

    #[test]
    fn test_status_code_table() {
        assert_eq!(classify(&http(401)).kind, ErrorKind::Auth);
        assert_eq!(classify(&http(403)).kind, ErrorKind::Auth);
        assert_eq!(classify(&http(404)).kind, ErrorKind::NotFound);
        assert_eq!(classify(&http(429)).kind, ErrorKind::RateLimited);
        assert_eq!(classify(&http(400)).kind, ErrorKind::Validation);
        assert_eq!(classify(&http(422)).kind, ErrorKind::Validation);
        assert_eq!(classify(&http(500)).kind, ErrorKind::ServerError);
        assert_eq!(classify(&http(503)).kind, ErrorKind::ServerError);
    }

    #[test]
    fn test_unmapped_statuses_are_unknown() {
        for status in [100, 301, 302, 402, 405, 418] {
            let err = classify(&http(status));
            assert_eq!(err.kind, ErrorKind::Unknown, "status {status}");
            assert!(!err.retryable);
        }
    }

    #[test]
    fn test_retryable_matrix() {
        assert!(classify(&http(429)).retryable);
        assert!(classify(&http(500)).retryable);
        assert!(!classify(&http(401)).retryable);
        assert!(!classify(&http(404)).retryable);
        assert!(!classify(&http(422)).retryable);
    }

    #[test]
    fn test_upstream_message_passed_through_verbatim() {
        let failure = TransportFailure::Http {
            status: 429,
            body: Some(ApiErrorBody {
                status_code: None,
                status_message: Some("slow down".to_string()),
            }),
        };

        let err = classify(&failure);
        assert_eq!(err.kind, ErrorKind::RateLimited);
        assert_eq!(err.message, "slow down");
        assert!(err.retryable);
    }

    #[test]
    fn test_default_message_when_body_has_none() {
        let err = classify(&http(404));
        assert_eq!(err.message, ErrorKind::NotFound.default_message());
    }

    #[test]
    fn test_api_internal_codes_take_precedence() {
        // TMDB reports auth problems with code 7 under HTTP 401, but also
        // under statuses the plain table would misread.
        let failure = TransportFailure::Http {
            status: 404,
            body: Some(ApiErrorBody {
                status_code: Some(7),
                status_message: Some("Invalid API key".to_string()),
            }),
        };

        let err = classify(&failure);
        assert_eq!(err.kind, ErrorKind::Auth);
        assert_eq!(err.message, "Invalid API key");
    }

    #[test]
    fn test_unknown_api_code_falls_back_to_status() {
        let failure = TransportFailure::Http {
            status: 429,
            body: Some(ApiErrorBody {
                status_code: Some(999),
                status_message: None,
            }),
        };

        assert_eq!(classify(&failure).kind, ErrorKind::RateLimited);
    }

    #[test]
    fn test_schema_failure_converts_to_schema_invalid() {
        use crate::schema::{FieldIssue, SchemaId, ValidationFailure};

        let failure = ValidationFailure {
            schema: SchemaId::MovieList,
            issues: vec![FieldIssue {
                path: "page".to_string(),
                message: "required field is missing".to_string(),
                found: None,
            }],
        };

        let err = ClassifiedError::from(&failure);
        assert_eq!(err.kind, ErrorKind::SchemaInvalid);
        assert!(!err.retryable);
        assert!(err.message.contains("movie_list"));
    }
}
