use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Access/refresh token pair minted by the token API.
///
/// Both tokens are JWTs carrying an `exp` claim. The pair is always stored and
/// replaced as a unit.
///
/// # Example
/// ```
/// use foxdeli::auth::TokenPair;
///
/// let pair = TokenPair::new("access.jwt", "refresh.jwt");
/// assert_eq!(pair.access_token, "access.jwt");
/// ```
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    #[serde(rename = "token")]
    pub access_token: String,
    #[serde(rename = "refreshToken")]
    pub refresh_token: String,
}

impl TokenPair {
    pub fn new(access_token: impl Into<String>, refresh_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            refresh_token: refresh_token.into(),
        }
    }
}

impl std::fmt::Debug for TokenPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenPair")
            .field("access_token", &"..")
            .field("refresh_token", &"..")
            .finish()
    }
}

/// Reasons a JWT expiry claim could not be read.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TokenDecodeError {
    #[error("token is not a JWT (missing payload segment)")]
    MissingPayload,
    #[error("token payload is not valid base64url")]
    Encoding,
    #[error("token payload is not valid JSON")]
    Json,
    #[error("token has no numeric exp claim")]
    MissingExpiry,
    #[error("token exp claim is out of range")]
    ExpiryOutOfRange,
}

#[derive(Debug, Deserialize)]
struct ExpiryClaims {
    exp: Option<serde_json::Value>,
}

/// Read the `exp` claim of a JWT without verifying its signature.
pub fn decode_expiry(token: &str) -> Result<DateTime<Utc>, TokenDecodeError> {
    let mut parts = token.trim().split('.');
    let _header = parts.next();
    let payload = parts
        .next()
        .filter(|p| !p.is_empty())
        .ok_or(TokenDecodeError::MissingPayload)?;
    let decoded = URL_SAFE_NO_PAD
        .decode(payload.trim_end_matches('='))
        .map_err(|_| TokenDecodeError::Encoding)?;
    let claims: ExpiryClaims =
        serde_json::from_slice(&decoded).map_err(|_| TokenDecodeError::Json)?;
    let exp = claims
        .exp
        .as_ref()
        .and_then(|v| v.as_i64().or_else(|| v.as_f64().map(|f| f as i64)))
        .ok_or(TokenDecodeError::MissingExpiry)?;
    DateTime::<Utc>::from_timestamp(exp, 0).ok_or(TokenDecodeError::ExpiryOutOfRange)
}

/// Whether a token is expired at `now`. Absent or undecodable tokens count as
/// expired.
pub fn is_expired_at(token: Option<&str>, now: DateTime<Utc>, label: &str) -> bool {
    let Some(token) = token else {
        return true;
    };
    match decode_expiry(token) {
        Ok(expires_at) => expires_at <= now,
        Err(e) => {
            tracing::warn!(token = label, error = %e, "Failed to parse token expiry");
            true
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn jwt(claims: serde_json::Value) -> String {
        let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
        let payload = URL_SAFE_NO_PAD.encode(claims.to_string());
        format!("{header}.{payload}.sig")
    }

    #[test]
    fn decode_expiry_reads_exp_claim() {
        let token = jwt(serde_json::json!({ "sub": "a", "exp": 1_700_000_000 }));
        let exp = decode_expiry(&token).unwrap();
        assert_eq!(exp.timestamp(), 1_700_000_000);
    }

    #[test]
    fn decode_expiry_rejects_garbage() {
        assert_eq!(
            decode_expiry("not-a-jwt"),
            Err(TokenDecodeError::MissingPayload)
        );
        assert_eq!(decode_expiry("a.!!!.c"), Err(TokenDecodeError::Encoding));
        let not_json = format!("a.{}.c", URL_SAFE_NO_PAD.encode("plain"));
        assert_eq!(decode_expiry(&not_json), Err(TokenDecodeError::Json));
    }

    #[test]
    fn decode_expiry_requires_exp() {
        let token = jwt(serde_json::json!({ "sub": "a" }));
        assert_eq!(decode_expiry(&token), Err(TokenDecodeError::MissingExpiry));
    }

    #[test]
    fn absent_and_undecodable_tokens_are_expired() {
        let now = Utc::now();
        assert!(is_expired_at(None, now, "access"));
        assert!(is_expired_at(Some("garbage"), now, "access"));
    }

    #[test]
    fn future_expiry_is_not_expired() {
        let now = Utc::now();
        let token = jwt(serde_json::json!({ "exp": (now + Duration::hours(1)).timestamp() }));
        assert!(!is_expired_at(Some(&token), now, "access"));
        let stale = jwt(serde_json::json!({ "exp": (now - Duration::seconds(1)).timestamp() }));
        assert!(is_expired_at(Some(&stale), now, "access"));
    }

    #[test]
    fn token_pair_uses_wire_field_names() {
        let pair: TokenPair =
            serde_json::from_str(r#"{"token":"acc-secret","refreshToken":"ref-secret"}"#)
                .unwrap();
        assert_eq!(pair, TokenPair::new("acc-secret", "ref-secret"));
        assert!(!format!("{pair:?}").contains("secret"));
    }
}
