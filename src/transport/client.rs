use std::sync::Arc;

use reqwest::header::{HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::{Body, Method, Request, Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, trace};

use super::http::translate_transport_error;
use super::RequestTransport;
use crate::auth::{AuthChallenge, AuthSession};
use crate::error::{FoxdeliError, Result};

/// Wraps a [`RequestTransport`] with token attachment, connection error
/// translation, and a single repair-and-retry on a 401 challenge.
///
/// # Example
/// ```no_run
/// use std::sync::Arc;
/// use foxdeli::auth::{AuthSession, HttpTokenIssuer};
/// use foxdeli::transport::{AuthenticatedClient, ReqwestTransport};
///
/// # async fn example() -> foxdeli::error::Result<()> {
/// let http = reqwest::Client::new();
/// let session = Arc::new(AuthSession::new(Arc::new(HttpTokenIssuer::new(
///     http.clone(),
///     "https://token.example.com",
/// ))));
/// let client = AuthenticatedClient::new(session, Arc::new(ReqwestTransport::new(http)));
/// let url = "https://tracking.example.com/v1/order/1".parse().unwrap();
/// let response = client.execute(reqwest::Request::new(reqwest::Method::GET, url)).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct AuthenticatedClient {
    session: Arc<AuthSession>,
    transport: Arc<dyn RequestTransport>,
}

impl std::fmt::Debug for AuthenticatedClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthenticatedClient")
            .field("session", &self.session)
            .field("transport", &"..")
            .finish()
    }
}

impl AuthenticatedClient {
    pub fn new(session: Arc<AuthSession>, transport: Arc<dyn RequestTransport>) -> Self {
        Self { session, transport }
    }

    pub fn session(&self) -> &Arc<AuthSession> {
        &self.session
    }

    async fn send(&self, request: Request) -> Result<Response> {
        self.transport
            .send(request)
            .await
            .map_err(translate_transport_error)
    }

    /// Send `request` with the current token. A 401 response triggers one
    /// repair through [`AuthSession::on_auth_challenge`] and one retry; a
    /// second 401 is returned as an authentication error.
    pub async fn execute(&self, mut request: Request) -> Result<Response> {
        self.session.prepare_request(&mut request);
        let replay = request.try_clone();

        let response = self.send(request).await?;
        if response.status() != StatusCode::UNAUTHORIZED {
            return Ok(response);
        }
        let Some(sent) = replay else {
            debug!("Challenged request has a streaming body, not retrying");
            return Err(rejected_retry(response).await);
        };

        let retry = self
            .session
            .on_auth_challenge(AuthChallenge::new(&sent, response.status()))
            .await?;
        trace!(url = %retry.url(), "Retrying request after auth repair");
        let response = self.send(retry).await?;
        if response.status() == StatusCode::UNAUTHORIZED {
            return Err(rejected_retry(response).await);
        }
        Ok(response)
    }

    /// Execute a JSON call and decode a JSON response. Non-2xx responses map
    /// to [`FoxdeliError::Api`] tagged with `operation`.
    pub async fn send_json<B, T>(
        &self,
        method: Method,
        url: Url,
        body: Option<&B>,
        operation: &str,
    ) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self.send_checked(method, url, body, operation).await?;
        let text = response
            .text()
            .await
            .map_err(|e| translate_transport_error(Box::new(e)))?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Execute a call whose response body is ignored.
    pub async fn send_empty<B>(
        &self,
        method: Method,
        url: Url,
        body: Option<&B>,
        operation: &str,
    ) -> Result<()>
    where
        B: Serialize + ?Sized,
    {
        self.send_checked(method, url, body, operation).await?;
        Ok(())
    }

    async fn send_checked<B>(
        &self,
        method: Method,
        url: Url,
        body: Option<&B>,
        operation: &str,
    ) -> Result<Response>
    where
        B: Serialize + ?Sized,
    {
        let request = build_request(method, url, body)?;
        let response = self.execute(request).await?;
        ensure_success(response, operation).await
    }
}

fn build_request<B>(method: Method, url: Url, body: Option<&B>) -> Result<Request>
where
    B: Serialize + ?Sized,
{
    let mut request = Request::new(method, url);
    request
        .headers_mut()
        .insert(ACCEPT, HeaderValue::from_static("application/json"));
    if let Some(body) = body {
        let bytes = serde_json::to_vec(body)?;
        request
            .headers_mut()
            .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        *request.body_mut() = Some(Body::from(bytes));
    }
    Ok(request)
}

async fn ensure_success(response: Response, operation: &str) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let headers = response.headers().clone();
    let body = response.text().await.unwrap_or_default();
    debug!(status = status.as_u16(), operation, "API call rejected");
    Err(FoxdeliError::api(
        format!("Foxdeli '{operation}' API call failed."),
        status.as_u16(),
        headers,
        body,
    ))
}

async fn rejected_retry(response: Response) -> FoxdeliError {
    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();
    FoxdeliError::authentication_with_response(
        "Request was rejected after re-authentication",
        Some(status),
        body,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{Credentials, IssuerError, TokenIssuer, TokenPair};
    use crate::error::ConnectionErrorKind;
    use crate::transport::TransportError;
    use async_trait::async_trait;

    struct NoIssuer;

    #[async_trait]
    impl TokenIssuer for NoIssuer {
        async fn authorize(&self, _: &Credentials) -> std::result::Result<TokenPair, IssuerError> {
            Err(IssuerError::new(None, "unused"))
        }

        async fn refresh(&self, _: &str) -> std::result::Result<TokenPair, IssuerError> {
            Err(IssuerError::new(None, "unused"))
        }
    }

    struct TimingOut;

    #[async_trait]
    impl RequestTransport for TimingOut {
        async fn send(&self, _request: Request) -> std::result::Result<Response, TransportError> {
            Err(Box::new(std::io::Error::new(
                std::io::ErrorKind::TimedOut,
                "operation timed out",
            )))
        }
    }

    #[tokio::test]
    async fn transport_timeout_surfaces_as_connection_error() {
        let session = Arc::new(AuthSession::new(Arc::new(NoIssuer)));
        let client = AuthenticatedClient::new(session, Arc::new(TimingOut));
        let request = Request::new(
            Method::GET,
            "https://tracking.example.com/v1/order/1".parse().unwrap(),
        );

        let err = client.execute(request).await.unwrap_err();

        match err {
            FoxdeliError::Connection { kind, message, .. } => {
                assert_eq!(kind, ConnectionErrorKind::Timeout);
                assert!(message.contains("check your internet connection"));
            }
            other => panic!("expected Connection, got {other:?}"),
        }
    }

    #[test]
    fn build_request_sets_json_headers() {
        let url: Url = "https://tracking.example.com/v1/order".parse().unwrap();
        let request = build_request(Method::POST, url, Some(&serde_json::json!({"a": 1}))).unwrap();
        assert_eq!(request.headers()[CONTENT_TYPE], "application/json");
        assert!(request.body().is_some());
    }
}
