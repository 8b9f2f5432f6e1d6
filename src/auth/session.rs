//! Token lifecycle: authorize, refresh, and repair after an auth challenge.

use std::fmt;
use std::sync::Arc;

use reqwest::header::{HeaderValue, AUTHORIZATION};
use reqwest::{Request, StatusCode};
use strum::Display;
use tokio::sync::Mutex;
use tracing::{debug, trace, warn};

use super::issuer::{IssuerError, TokenIssuer};
use super::store::TokenStore;
use super::token::TokenPair;
use crate::error::{FoxdeliError, Result};

/// Observable lifecycle state of an [`AuthSession`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "snake_case")]
pub enum AuthState {
    /// No usable refresh token: the next repair re-authorizes with credentials.
    Unauthenticated,
    /// Both tokens are present and unexpired.
    Authenticated,
    /// The access token expired; the refresh token is still good.
    AccessExpired,
}

/// A response rejected the credentials attached to `request`.
#[derive(Debug, Clone, Copy)]
pub struct AuthChallenge<'a> {
    pub request: &'a Request,
    pub status: StatusCode,
}

impl<'a> AuthChallenge<'a> {
    pub fn new(request: &'a Request, status: StatusCode) -> Self {
        Self { request, status }
    }
}

/// Shared authentication context for one set of credentials.
///
/// Owns the [`TokenStore`] and the [`TokenIssuer`]. Token reads are lock-free
/// with respect to each other; `authorize`, `refresh` and challenge repair run
/// one at a time.
///
/// # Example
/// ```no_run
/// use std::sync::Arc;
/// use foxdeli::auth::{AuthSession, HttpTokenIssuer};
///
/// # async fn example() -> foxdeli::error::Result<()> {
/// let issuer = HttpTokenIssuer::new(reqwest::Client::new(), "https://token.example.com");
/// let session = AuthSession::new(Arc::new(issuer));
/// session.set_credentials("shop@example.com", "secret")?;
/// session.authorize_now().await?;
/// assert!(session.current_access_token().is_some());
/// # Ok(())
/// # }
/// ```
///
/// The token store is private to the session:
/// ```compile_fail
/// use std::sync::Arc;
/// use foxdeli::auth::{AuthSession, HttpTokenIssuer, TokenPair};
///
/// let issuer = HttpTokenIssuer::new(reqwest::Client::new(), "https://token.example.com");
/// let session = AuthSession::new(Arc::new(issuer));
/// session.store().set_tokens(TokenPair::new("forged", "forged"));
/// ```
pub struct AuthSession {
    store: TokenStore,
    issuer: Arc<dyn TokenIssuer>,
    repair: Mutex<()>,
}

impl fmt::Debug for AuthSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthSession")
            .field("store", &self.store)
            .field("issuer", &"..")
            .finish()
    }
}

impl AuthSession {
    pub fn new(issuer: Arc<dyn TokenIssuer>) -> Self {
        Self {
            store: TokenStore::new(),
            issuer,
            repair: Mutex::new(()),
        }
    }

    pub(crate) fn store(&self) -> &TokenStore {
        &self.store
    }

    pub fn is_access_token_expired(&self) -> bool {
        self.store.is_access_token_expired()
    }

    pub fn is_refresh_token_expired(&self) -> bool {
        self.store.is_refresh_token_expired()
    }

    pub fn set_credentials(
        &self,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<()> {
        self.store.set_credentials(username, password)
    }

    /// The access token requests are currently sent with. May be stale; route
    /// calls through [`crate::transport::AuthenticatedClient`] instead of
    /// attaching it by hand.
    pub fn current_access_token(&self) -> Option<String> {
        self.store.access_token()
    }

    pub fn state(&self) -> AuthState {
        if self.store.tokens().is_none() || self.store.is_refresh_token_expired() {
            AuthState::Unauthenticated
        } else if self.store.is_access_token_expired() {
            AuthState::AccessExpired
        } else {
            AuthState::Authenticated
        }
    }

    /// Log in with the stored credentials and cache the resulting pair.
    pub async fn authorize_now(&self) -> Result<()> {
        let _guard = self.repair.lock().await;
        self.authorize_locked().await
    }

    /// Exchange the stored refresh token for a rotated pair.
    pub async fn refresh(&self) -> Result<()> {
        let _guard = self.repair.lock().await;
        self.refresh_locked().await
    }

    async fn authorize_locked(&self) -> Result<()> {
        let snapshot = self.store.snapshot();
        let credentials = snapshot.credentials.ok_or_else(|| {
            FoxdeliError::InvalidCredentials("Username and password must be set".to_string())
        })?;
        let generation = snapshot.generation;
        let pair = self
            .issuer
            .authorize(&credentials)
            .await
            .map_err(|e| issuer_failure("Authorization", e))?;
        debug!(username = credentials.username(), "Authorized");
        self.commit(generation, pair)
    }

    async fn refresh_locked(&self) -> Result<()> {
        let snapshot = self.store.snapshot();
        let refresh_token = snapshot
            .tokens
            .map(|pair| pair.refresh_token.clone())
            .ok_or_else(|| {
                FoxdeliError::authentication("No refresh token available, authorize first")
            })?;
        let generation = snapshot.generation;
        let pair = self
            .issuer
            .refresh(&refresh_token)
            .await
            .map_err(|e| issuer_failure("Refresh token", e))?;
        debug!("Refreshed token pair");
        self.commit(generation, pair)
    }

    /// Store `pair` unless the credentials changed while it was being minted.
    fn commit(&self, generation: u64, pair: TokenPair) -> Result<()> {
        if self.store.generation() != generation {
            return Err(FoxdeliError::InvalidState(
                "Credentials changed while a token request was in flight".to_string(),
            ));
        }
        self.store.set_tokens(pair);
        Ok(())
    }

    /// Attach the current access token to `request`. No expiry check happens
    /// here; expired tokens are repaired when the server challenges them.
    pub fn prepare_request(&self, request: &mut Request) {
        trace!(method = %request.method(), url = %request.url(), "Authenticating request");
        let Some(token) = self.store.access_token() else {
            return;
        };
        match HeaderValue::from_str(&token) {
            Ok(mut value) => {
                value.set_sensitive(true);
                request.headers_mut().insert(AUTHORIZATION, value);
            }
            Err(e) => warn!(error = %e, "Access token is not a valid header value"),
        }
    }

    /// Repair authentication after `challenge` and return the request to retry.
    ///
    /// Branch order: expired refresh token re-authorizes, expired access token
    /// refreshes, and a rejected request that already carried the current,
    /// unexpired token fails without any network call.
    pub async fn on_auth_challenge(&self, challenge: AuthChallenge<'_>) -> Result<Request> {
        let _guard = self.repair.lock().await;
        trace!(status = %challenge.status, url = %challenge.request.url(), "Auth challenge");

        let sent = challenge
            .request
            .headers()
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned);
        let refresh_expired = self.store.is_refresh_token_expired();
        let access_expired = self.store.is_access_token_expired();
        let current = self.store.access_token();

        // Narrows the has-header failure only: the request carried a token that
        // another task has since replaced with the current, unexpired one.
        if !refresh_expired && !access_expired && sent.is_some() && sent != current {
            trace!("Token was rotated while the request was in flight, retrying");
        } else if refresh_expired {
            trace!("Refresh token expired, authorizing with username + password");
            self.authorize_locked().await?;
        } else if access_expired {
            trace!("Access token expired, refreshing token");
            self.refresh_locked().await?;
        } else if sent.is_some() {
            return Err(FoxdeliError::authentication(
                "Authentication failed with valid token. Please try Foxdeli::init again.",
            ));
        }

        let mut retry = challenge.request.try_clone().ok_or_else(|| {
            FoxdeliError::InvalidState("Request body cannot be replayed".to_string())
        })?;
        self.prepare_request(&mut retry);
        Ok(retry)
    }
}

fn issuer_failure(action: &str, error: IssuerError) -> FoxdeliError {
    warn!(status = ?error.status, "{action} failed");
    FoxdeliError::authentication_with_response(
        format!(
            "{action} failed with code {} and response body: {}",
            error
                .status
                .map_or_else(|| "none".to_string(), |s| s.to_string()),
            error.body
        ),
        error.status,
        error.body,
    )
}
