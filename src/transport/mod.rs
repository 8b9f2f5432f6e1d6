//! HTTP execution: the transport seam, error translation, and the
//! authenticating wrapper that every API call goes through.

pub mod client;
pub mod http;

pub use client::AuthenticatedClient;
pub use http::{classify_transport_error, ReqwestTransport};

use async_trait::async_trait;
use reqwest::{Request, Response};

/// Raw failure from a transport, before translation into
/// [`crate::error::FoxdeliError::Connection`].
pub type TransportError = Box<dyn std::error::Error + Send + Sync>;

/// Executes a single HTTP request. Implementations do not retry on
/// authentication failures; [`AuthenticatedClient`] owns that.
#[async_trait]
pub trait RequestTransport: Send + Sync {
    async fn send(&self, request: Request) -> Result<Response, TransportError>;
}
