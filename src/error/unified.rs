//! Error classification and recovery hints.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Closed set of transport-level failures surfaced to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ConnectionErrorKind {
    /// The request did not complete in time.
    Timeout,
    /// The host name could not be resolved or reached.
    HostUnreachable,
    /// The connection was closed or reset mid-flight.
    ConnectionShutdown,
    /// Any other I/O failure.
    Unreachable,
}

impl ConnectionErrorKind {
    /// Human-readable, user-actionable message for this kind.
    pub fn hint(self) -> &'static str {
        match self {
            Self::Timeout => "Timeout - Please check your internet connection",
            Self::HostUnreachable => "Unable to make a connection. Please check your internet",
            Self::ConnectionShutdown => "Connection shutdown. Please check your internet",
            Self::Unreachable => "Server is unreachable, please try again later.",
        }
    }
}

/// Broad error category for routing recovery logic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Authentication,
    Network,
    Timeout,
    Server,
    Api,
    InvalidRequest,
    Configuration,
    Serialization,
    Unknown,
}

/// Suggested recovery action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecoverySuggestion {
    CheckCredentials,
    CheckConnection,
    RetryLater,
    CheckConfiguration,
    FixRequest,
    ContactSupport,
}
