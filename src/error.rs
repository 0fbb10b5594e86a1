//! Error types for the `sasonline-rs` crate.
//!
//! All fallible operations in this crate return [`Result<T>`], which is an
//! alias for `std::result::Result<T, SasError>`.
//!
//! Every [`SasError`] classifies into exactly one [`ErrorKind`], the closed
//! taxonomy the API reports through the `error_type` field of its error
//! envelope:
//!
//! | `error_type` | Kind |
//! |---|---|
//! | `TokenException` | [`ErrorKind::Token`] |
//! | `UserException`, `PermissionException` | [`ErrorKind::Permission`] |
//! | `OrderException` | [`ErrorKind::Order`] |
//! | `InputException` | [`ErrorKind::Input`] |
//! | `DataException` | [`ErrorKind::Data`] |
//! | `NetworkException` / transport failure | [`ErrorKind::Network`] |
//! | anything else, or missing | [`ErrorKind::General`] |

use std::fmt;

use reqwest::StatusCode;

/// Closed set of error categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Session expired or invalidated, or no access token set.
    Token,
    /// Missing or invalid request parameters.
    Input,
    /// Transport failure, or the API could not reach the exchange/OMS.
    Network,
    /// Unclassified error.
    General,
    /// Order placement or modification failed.
    Order,
    /// The user is not permitted to perform the action.
    Permission,
    /// The response could not be parsed, or the backend returned bad data.
    Data,
}

impl ErrorKind {
    /// Map a server-reported `error_type` string to a kind.
    pub fn from_error_type(error_type: Option<&str>) -> Self {
        match error_type {
            Some("TokenException") => Self::Token,
            Some("UserException") | Some("PermissionException") => Self::Permission,
            Some("OrderException") => Self::Order,
            Some("InputException") => Self::Input,
            Some("DataException") => Self::Data,
            Some("NetworkException") => Self::Network,
            _ => Self::General,
        }
    }

    /// Whether a caller may reasonably retry the failed call unchanged.
    ///
    /// Only transport-level failures qualify; token, input and permission
    /// errors are permanent until the caller changes something.
    pub fn is_retryable(self) -> bool {
        matches!(self, Self::Network)
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Token => "TokenError",
            Self::Input => "InputError",
            Self::Network => "NetworkError",
            Self::General => "GeneralError",
            Self::Order => "OrderError",
            Self::Permission => "PermissionError",
            Self::Data => "DataError",
        };
        f.write_str(name)
    }
}

/// All possible errors produced by the `sasonline-rs` client.
#[derive(Debug, thiserror::Error)]
pub enum SasError {
    /// An error classified by the API, or raised locally with the same meaning
    /// (e.g. a missing access token).
    #[error("{kind}: {message}")]
    Api {
        kind: ErrorKind,
        message: String,
        /// HTTP status of the response, `None` when raised before any request.
        status: Option<StatusCode>,
    },

    /// The server returned an error status without a parseable error envelope.
    #[error("HTTP {status}: {body}")]
    HttpStatus {
        /// The HTTP status code.
        status: StatusCode,
        /// The raw response body.
        body: String,
    },

    /// A network or transport-level error from `reqwest` (timeout, DNS,
    /// connection reset, TLS).
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// A successful response whose body could not be deserialized.
    #[error("JSON deserialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// An error building or parsing a URL.
    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),

    /// The caller provided an invalid argument.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl SasError {
    /// Build an [`SasError::Api`] error.
    pub fn api(kind: ErrorKind, message: impl Into<String>, status: Option<StatusCode>) -> Self {
        Self::Api {
            kind,
            message: message.into(),
            status,
        }
    }

    /// The error raised when an authenticated call is attempted without a token.
    pub(crate) fn missing_token() -> Self {
        Self::api(
            ErrorKind::Token,
            "access token is not set; call generate_session() or set_access_token() first",
            None,
        )
    }

    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Api { kind, .. } => *kind,
            Self::HttpStatus { .. } => ErrorKind::General,
            Self::Http(e) if e.is_builder() => ErrorKind::General,
            Self::Http(_) => ErrorKind::Network,
            Self::Json(_) => ErrorKind::Data,
            Self::Url(_) | Self::InvalidArgument(_) => ErrorKind::Input,
        }
    }

    /// The HTTP status of the failed response, if one was received.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Api { status, .. } => *status,
            Self::HttpStatus { status, .. } => Some(*status),
            Self::Http(e) => e.status(),
            _ => None,
        }
    }

    /// Human-readable message without the kind prefix.
    pub fn message(&self) -> String {
        match self {
            Self::Api { message, .. } => message.clone(),
            Self::HttpStatus { body, .. } => body.clone(),
            other => other.to_string(),
        }
    }
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, SasError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_every_known_error_type() {
        let cases = [
            ("TokenException", ErrorKind::Token),
            ("UserException", ErrorKind::Permission),
            ("PermissionException", ErrorKind::Permission),
            ("OrderException", ErrorKind::Order),
            ("InputException", ErrorKind::Input),
            ("DataException", ErrorKind::Data),
            ("NetworkException", ErrorKind::Network),
        ];
        for (error_type, kind) in cases {
            assert_eq!(ErrorKind::from_error_type(Some(error_type)), kind, "{error_type}");
        }
    }

    #[test]
    fn unknown_or_missing_error_type_is_general() {
        assert_eq!(ErrorKind::from_error_type(None), ErrorKind::General);
        assert_eq!(
            ErrorKind::from_error_type(Some("SomethingNew")),
            ErrorKind::General
        );
    }

    #[test]
    fn only_network_is_retryable() {
        assert!(ErrorKind::Network.is_retryable());
        assert!(!ErrorKind::Token.is_retryable());
        assert!(!ErrorKind::Permission.is_retryable());
        assert!(!ErrorKind::General.is_retryable());
    }

    #[test]
    fn missing_token_is_token_kind_without_status() {
        let err = SasError::missing_token();
        assert_eq!(err.kind(), ErrorKind::Token);
        assert_eq!(err.status(), None);
    }

    #[test]
    fn http_status_is_general_and_keeps_body() {
        let err = SasError::HttpStatus {
            status: StatusCode::BAD_GATEWAY,
            body: "<html>bad gateway</html>".into(),
        };
        assert_eq!(err.kind(), ErrorKind::General);
        assert_eq!(err.status(), Some(StatusCode::BAD_GATEWAY));
        assert_eq!(err.message(), "<html>bad gateway</html>");
    }

    #[test]
    fn display_includes_kind_and_message() {
        let err = SasError::api(ErrorKind::Input, "bad", Some(StatusCode::BAD_REQUEST));
        assert_eq!(err.to_string(), "InputError: bad");
        assert_eq!(err.message(), "bad");
    }
}
