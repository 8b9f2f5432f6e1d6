//! Token API client: exchanges credentials or a refresh token for a new pair.

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

use super::credentials::Credentials;
use super::token::TokenPair;

/// Rejection from the token API, or a transport failure reaching it.
#[derive(Debug, Error)]
#[error("token request failed with code {} and response body: {body}", display_status(.status))]
pub struct IssuerError {
    pub status: Option<u16>,
    pub body: String,
}

impl IssuerError {
    pub fn new(status: Option<u16>, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

fn display_status(status: &Option<u16>) -> String {
    status.map_or_else(|| "none".to_string(), |s| s.to_string())
}

impl From<reqwest::Error> for IssuerError {
    fn from(error: reqwest::Error) -> Self {
        Self {
            status: error.status().map(|s| s.as_u16()),
            body: error.to_string(),
        }
    }
}

/// Mints token pairs.
#[async_trait]
pub trait TokenIssuer: Send + Sync {
    /// Exchange credentials for a fresh pair.
    async fn authorize(&self, credentials: &Credentials) -> Result<TokenPair, IssuerError>;

    /// Exchange a refresh token for a rotated pair.
    async fn refresh(&self, refresh_token: &str) -> Result<TokenPair, IssuerError>;
}

#[derive(Serialize)]
struct AuthorizationBody<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RefreshBody<'a> {
    refresh_token: &'a str,
}

/// [`TokenIssuer`] backed by the Foxdeli token API.
///
/// # Example
/// ```no_run
/// use foxdeli::auth::HttpTokenIssuer;
///
/// let issuer = HttpTokenIssuer::new(reqwest::Client::new(), "https://token.example.com");
/// ```
#[derive(Debug, Clone)]
pub struct HttpTokenIssuer {
    client: reqwest::Client,
    base_url: String,
}

impl HttpTokenIssuer {
    pub fn new(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn post_for_pair<B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<TokenPair, IssuerError> {
        let url = format!("{}{path}", self.base_url);
        let resp = self
            .client
            .post(&url)
            .header("Accept", "application/json")
            .json(body)
            .send()
            .await?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(IssuerError::new(Some(status.as_u16()), body));
        }
        let text = resp.text().await?;
        serde_json::from_str(&text).map_err(|e| {
            IssuerError::new(
                Some(status.as_u16()),
                format!("invalid token response ({e}): {text}"),
            )
        })
    }
}

#[async_trait]
impl TokenIssuer for HttpTokenIssuer {
    async fn authorize(&self, credentials: &Credentials) -> Result<TokenPair, IssuerError> {
        let body = AuthorizationBody {
            email: credentials.username(),
            password: credentials.password(),
        };
        self.post_for_pair("/v1/token", &body).await
    }

    async fn refresh(&self, refresh_token: &str) -> Result<TokenPair, IssuerError> {
        self.post_for_pair("/v1/token/refresh", &RefreshBody { refresh_token })
            .await
    }
}
