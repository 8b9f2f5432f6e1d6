//! Credential storage, token lifecycle, and the token API client.

pub mod credentials;
pub mod issuer;
pub mod session;
pub mod store;
pub mod token;

pub use credentials::Credentials;
pub use issuer::{HttpTokenIssuer, IssuerError, TokenIssuer};
pub use session::{AuthChallenge, AuthSession, AuthState};
pub use store::TokenStore;
pub use token::{decode_expiry, TokenDecodeError, TokenPair};
