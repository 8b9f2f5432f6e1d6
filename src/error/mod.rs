//! Error types for the Foxdeli SDK.

pub mod unified;

pub use unified::{ConnectionErrorKind, ErrorCategory, RecoverySuggestion};

use reqwest::header::HeaderMap;
use thiserror::Error;

/// Primary error type for all Foxdeli operations.
#[derive(Error, Debug)]
pub enum FoxdeliError {
    #[error("Invalid credentials: {0}")]
    InvalidCredentials(String),

    #[error("Authentication error: {message}")]
    Authentication {
        message: String,
        status: Option<u16>,
        body: Option<String>,
    },

    #[error("Connection error ({kind}): {message}")]
    Connection {
        kind: ConnectionErrorKind,
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Message: {message}\nHTTP response code: {status}\nHTTP response body: {body}\nHTTP response headers: {headers:?}")]
    Api {
        status: u16,
        message: String,
        headers: HeaderMap,
        body: String,
    },

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid state: {0}")]
    InvalidState(String),
}

impl FoxdeliError {
    /// Create an authentication error without upstream details.
    pub fn authentication(message: impl Into<String>) -> Self {
        Self::Authentication {
            message: message.into(),
            status: None,
            body: None,
        }
    }

    /// Create an authentication error carrying the upstream status and body.
    pub fn authentication_with_response(
        message: impl Into<String>,
        status: Option<u16>,
        body: impl Into<String>,
    ) -> Self {
        Self::Authentication {
            message: message.into(),
            status,
            body: Some(body.into()),
        }
    }

    /// Create a connection error of the given kind with its user-facing hint.
    pub fn connection(
        kind: ConnectionErrorKind,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self::Connection {
            kind,
            message: kind.hint().to_string(),
            source,
        }
    }

    /// Create an API error from a rejected business call.
    pub fn api(
        message: impl Into<String>,
        status: u16,
        headers: HeaderMap,
        body: impl Into<String>,
    ) -> Self {
        Self::Api {
            status,
            message: message.into(),
            headers,
            body: body.into(),
        }
    }

    /// Upstream HTTP status attached to this error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Authentication { status, .. } => *status,
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Upstream response body attached to this error, if any.
    pub fn response_body(&self) -> Option<&str> {
        match self {
            Self::Authentication { body, .. } => body.as_deref(),
            Self::Api { body, .. } => Some(body.as_str()),
            _ => None,
        }
    }

    /// Classify this error into a category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidCredentials(_) | Self::Authentication { .. } => {
                ErrorCategory::Authentication
            }
            Self::Connection {
                kind: ConnectionErrorKind::Timeout,
                ..
            } => ErrorCategory::Timeout,
            Self::Connection { .. } => ErrorCategory::Network,
            Self::Configuration(_) => ErrorCategory::Configuration,
            Self::Serialization(_) => ErrorCategory::Serialization,
            Self::InvalidArgument(_) => ErrorCategory::InvalidRequest,
            Self::Api { status, .. } => match status {
                401 | 403 => ErrorCategory::Authentication,
                400 | 404 | 409 | 422 => ErrorCategory::InvalidRequest,
                500..=599 => ErrorCategory::Server,
                _ => ErrorCategory::Api,
            },
            Self::InvalidState(_) => ErrorCategory::Unknown,
        }
    }

    /// Whether this error is potentially retryable by the caller.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self.category(),
            ErrorCategory::Network | ErrorCategory::Timeout | ErrorCategory::Server
        )
    }

    /// Suggest recovery actions.
    pub fn recovery_suggestion(&self) -> RecoverySuggestion {
        match self.category() {
            ErrorCategory::Authentication => RecoverySuggestion::CheckCredentials,
            ErrorCategory::Network => RecoverySuggestion::CheckConnection,
            ErrorCategory::Timeout => RecoverySuggestion::CheckConnection,
            ErrorCategory::Server => RecoverySuggestion::RetryLater,
            ErrorCategory::Configuration => RecoverySuggestion::CheckConfiguration,
            ErrorCategory::InvalidRequest => RecoverySuggestion::FixRequest,
            _ => RecoverySuggestion::ContactSupport,
        }
    }
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, FoxdeliError>;
