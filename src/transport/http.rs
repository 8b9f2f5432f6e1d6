//! reqwest-backed transport and transport error translation.

use std::error::Error as StdError;
use std::io::ErrorKind;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Request, Response};

use super::{RequestTransport, TransportError};
use crate::error::{ConnectionErrorKind, FoxdeliError};

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// [`RequestTransport`] over a `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }

    /// Build a transport with its own client and the given request timeout.
    pub fn with_timeout(timeout: Duration) -> Result<Self, FoxdeliError> {
        Ok(Self::new(build_client(timeout)?))
    }

    pub fn client(&self) -> &reqwest::Client {
        &self.client
    }
}

#[async_trait]
impl RequestTransport for ReqwestTransport {
    async fn send(&self, request: Request) -> Result<Response, TransportError> {
        Ok(self.client.execute(request).await?)
    }
}

/// Build the HTTP client shared by the token API and the tracking API.
pub fn build_client(timeout: Duration) -> Result<reqwest::Client, FoxdeliError> {
    reqwest::Client::builder()
        .timeout(timeout)
        .pool_max_idle_per_host(10)
        .build()
        .map_err(|e| FoxdeliError::Configuration(format!("Failed to build HTTP client: {e}")))
}

/// Map a transport failure onto the closed set of connection error kinds by
/// walking its source chain.
pub fn classify_transport_error(error: &(dyn StdError + 'static)) -> ConnectionErrorKind {
    let mut current = Some(error);
    while let Some(err) = current {
        if let Some(e) = err.downcast_ref::<reqwest::Error>() {
            if e.is_timeout() {
                return ConnectionErrorKind::Timeout;
            }
        }
        if err.downcast_ref::<tokio::time::error::Elapsed>().is_some() {
            return ConnectionErrorKind::Timeout;
        }
        if let Some(e) = err.downcast_ref::<std::io::Error>() {
            match e.kind() {
                ErrorKind::TimedOut => return ConnectionErrorKind::Timeout,
                ErrorKind::ConnectionReset
                | ErrorKind::ConnectionAborted
                | ErrorKind::BrokenPipe
                | ErrorKind::NotConnected
                | ErrorKind::UnexpectedEof => return ConnectionErrorKind::ConnectionShutdown,
                _ => {}
            }
        }
        let text = err.to_string().to_ascii_lowercase();
        if text.contains("dns error")
            || text.contains("failed to lookup address")
            || text.contains("name or service not known")
        {
            return ConnectionErrorKind::HostUnreachable;
        }
        if text.contains("connection closed") || text.contains("connection reset") {
            return ConnectionErrorKind::ConnectionShutdown;
        }
        current = err.source();
    }
    ConnectionErrorKind::Unreachable
}

/// Translate a raw transport failure into [`FoxdeliError::Connection`].
pub fn translate_transport_error(error: TransportError) -> FoxdeliError {
    let kind = classify_transport_error(&*error);
    tracing::trace!(kind = %kind, error = %error, "Transport failure");
    FoxdeliError::connection(kind, Some(error))
}
