use std::fmt;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::Utc;

use super::credentials::{validate_password, validate_username, Credentials};
use super::token::{is_expired_at, TokenPair};
use crate::error::FoxdeliError;

/// In-memory holder for credentials and the current token pair.
///
/// Reads take a shared lock and never block each other. Every write replaces
/// the token pair as a whole, so readers never observe a new access token
/// next to a stale refresh token.
///
/// # Example
/// ```
/// use foxdeli::auth::{TokenPair, TokenStore};
///
/// let store = TokenStore::new();
/// store.set_credentials("shop@example.com", "secret")?;
/// store.set_tokens(TokenPair::new("access", "refresh"));
/// assert_eq!(store.access_token().as_deref(), Some("access"));
///
/// // Changing the password drops the cached tokens.
/// store.set_password("rotated")?;
/// assert!(store.access_token().is_none());
/// # Ok::<(), foxdeli::error::FoxdeliError>(())
/// ```
#[derive(Debug, Default)]
pub struct TokenStore {
    state: RwLock<StoreState>,
}

#[derive(Default)]
struct StoreState {
    username: Option<String>,
    password: Option<String>,
    tokens: Option<Arc<TokenPair>>,
    generation: u64,
}

impl fmt::Debug for StoreState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StoreState")
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| ".."))
            .field("tokens", &self.tokens)
            .field("generation", &self.generation)
            .finish()
    }
}

/// Credentials, tokens and generation read under one lock.
#[derive(Debug, Clone)]
pub(crate) struct StoreSnapshot {
    pub credentials: Option<Credentials>,
    pub tokens: Option<Arc<TokenPair>>,
    pub generation: u64,
}

impl StoreState {
    fn credentials(&self) -> Option<Credentials> {
        match (&self.username, &self.password) {
            (Some(username), Some(password)) => Credentials::new(username, password).ok(),
            _ => None,
        }
    }

    fn invalidate(&mut self) {
        self.tokens = None;
        self.generation += 1;
    }

    fn replace_username(&mut self, username: String) {
        if self.username.as_deref() != Some(username.as_str()) {
            tracing::debug!("Username changed, invalidating cached tokens");
            self.invalidate();
        }
        self.username = Some(username);
    }

    fn replace_password(&mut self, password: String) {
        if self.password.as_deref() != Some(password.as_str()) {
            tracing::debug!("Password changed, invalidating cached tokens");
            self.invalidate();
        }
        self.password = Some(password);
    }
}

impl TokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> RwLockReadGuard<'_, StoreState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, StoreState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Store both credentials. Each field that differs from the stored value
    /// invalidates the cached tokens first. Nothing is stored if either value
    /// is empty.
    pub fn set_credentials(
        &self,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<(), FoxdeliError> {
        let username = validate_username(username.into())?;
        let password = validate_password(password.into())?;
        let mut state = self.write();
        state.replace_username(username);
        state.replace_password(password);
        Ok(())
    }

    pub fn set_username(&self, username: impl Into<String>) -> Result<(), FoxdeliError> {
        let username = validate_username(username.into())?;
        self.write().replace_username(username);
        Ok(())
    }

    pub fn set_password(&self, password: impl Into<String>) -> Result<(), FoxdeliError> {
        let password = validate_password(password.into())?;
        self.write().replace_password(password);
        Ok(())
    }

    /// Stored credentials, if both username and password have been set.
    pub fn credentials(&self) -> Option<Credentials> {
        self.read().credentials()
    }

    /// Consistent view for a token request; the generation is compared again
    /// before the minted pair is stored.
    pub(crate) fn snapshot(&self) -> StoreSnapshot {
        let state = self.read();
        StoreSnapshot {
            credentials: state.credentials(),
            tokens: state.tokens.clone(),
            generation: state.generation,
        }
    }

    pub fn tokens(&self) -> Option<Arc<TokenPair>> {
        self.read().tokens.clone()
    }

    pub fn access_token(&self) -> Option<String> {
        self.read().tokens.as_ref().map(|t| t.access_token.clone())
    }

    pub fn refresh_token(&self) -> Option<String> {
        self.read().tokens.as_ref().map(|t| t.refresh_token.clone())
    }

    /// Replace both tokens in a single write.
    pub fn set_tokens(&self, pair: TokenPair) {
        let mut state = self.write();
        state.tokens = Some(Arc::new(pair));
        state.generation += 1;
    }

    /// Drop both tokens; credentials are kept.
    pub fn invalidate(&self) {
        self.write().invalidate();
    }

    /// Number of token mutations (stores and invalidations) so far.
    pub fn generation(&self) -> u64 {
        self.read().generation
    }

    pub fn is_access_token_expired(&self) -> bool {
        let token = self.access_token();
        is_expired_at(token.as_deref(), Utc::now(), "access")
    }

    pub fn is_refresh_token_expired(&self) -> bool {
        let token = self.refresh_token();
        is_expired_at(token.as_deref(), Utc::now(), "refresh")
    }
}
