//! Shared test helpers: JWT minting and a mocked Foxdeli deployment.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use serde_json::{json, Value};
use uuid::Uuid;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use foxdeli::auth::{Credentials, IssuerError, TokenIssuer, TokenPair};
use foxdeli::config::FoxdeliConfig;
use foxdeli::Foxdeli;

pub const USERNAME: &str = "shop@example.com";
pub const PASSWORD: &str = "secret";

pub const TOKEN_PATH: &str = "/token/v1/token";
pub const REFRESH_PATH: &str = "/token/v1/token/refresh";

/// Unsigned JWT whose `exp` lies `expires_in` from now.
pub fn jwt(expires_in: chrono::Duration) -> String {
    let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"none","typ":"JWT"}"#);
    let exp = (chrono::Utc::now() + expires_in).timestamp();
    let payload =
        URL_SAFE_NO_PAD.encode(format!(r#"{{"exp":{exp},"jti":"{}"}}"#, Uuid::new_v4()));
    format!("{header}.{payload}.")
}

pub fn fresh_access() -> String {
    jwt(chrono::Duration::minutes(5))
}

pub fn expired_access() -> String {
    jwt(chrono::Duration::minutes(-1))
}

pub fn fresh_refresh() -> String {
    jwt(chrono::Duration::days(1))
}

pub fn pair_json(access: &str, refresh: &str) -> Value {
    json!({ "token": access, "refreshToken": refresh })
}

pub fn tracking_path(suffix: &str) -> String {
    format!("/tracking{suffix}")
}

pub fn config(server: &MockServer) -> FoxdeliConfig {
    FoxdeliConfig::new()
        .with_token_url(format!("{}/token", server.uri()))
        .with_tracking_url(format!("{}/tracking", server.uri()))
}

/// Answer the `USERNAME`/`PASSWORD` login with the given pair.
pub async fn mount_authorize(server: &MockServer, access: &str, refresh: &str) {
    Mock::given(method("POST"))
        .and(path(TOKEN_PATH))
        .and(body_json(json!({ "email": USERNAME, "password": PASSWORD })))
        .respond_with(ResponseTemplate::new(200).set_body_json(pair_json(access, refresh)))
        .mount(server)
        .await;
}

pub async fn connect(server: &MockServer) -> Foxdeli {
    Foxdeli::init(config(server), USERNAME, PASSWORD)
        .await
        .expect("init")
}

pub async fn connect_with_timeout(server: &MockServer, timeout: Duration) -> Foxdeli {
    Foxdeli::init(config(server).with_timeout(timeout), USERNAME, PASSWORD)
        .await
        .expect("init")
}

pub fn order_json(order_id: Uuid) -> Value {
    json!({
        "id": order_id,
        "orderNumber": "A-1",
        "orderState": "ACTIVE",
        "price": { "amount": 499.0, "currency": "CZK" },
        "parcels": []
    })
}

pub fn parcel_json(order_id: Uuid, parcel_id: Uuid, delivery: &str) -> Value {
    json!({
        "id": parcel_id,
        "orderId": order_id,
        "state": { "delivery": delivery },
        "products": ["sku-1"]
    })
}

/// In-process issuer that hands out queued pairs and counts calls.
#[derive(Default)]
pub struct ScriptedIssuer {
    pairs: Mutex<VecDeque<TokenPair>>,
    authorize_calls: AtomicUsize,
    refresh_calls: AtomicUsize,
}

impl ScriptedIssuer {
    pub fn new(pairs: impl IntoIterator<Item = TokenPair>) -> Self {
        Self {
            pairs: Mutex::new(pairs.into_iter().collect()),
            ..Default::default()
        }
    }

    pub fn authorize_calls(&self) -> usize {
        self.authorize_calls.load(Ordering::SeqCst)
    }

    pub fn refresh_calls(&self) -> usize {
        self.refresh_calls.load(Ordering::SeqCst)
    }

    fn next_pair(&self) -> Result<TokenPair, IssuerError> {
        self.pairs
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| IssuerError::new(Some(500), "script exhausted"))
    }
}

#[async_trait]
impl TokenIssuer for ScriptedIssuer {
    async fn authorize(&self, _credentials: &Credentials) -> Result<TokenPair, IssuerError> {
        self.authorize_calls.fetch_add(1, Ordering::SeqCst);
        self.next_pair()
    }

    async fn refresh(&self, _refresh_token: &str) -> Result<TokenPair, IssuerError> {
        self.refresh_calls.fetch_add(1, Ordering::SeqCst);
        self.next_pair()
    }
}
