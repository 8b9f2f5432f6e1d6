//! Convenience re-exports for common use.

pub use crate::auth::{AuthSession, AuthState, Credentials, TokenPair};
pub use crate::client::Foxdeli;
pub use crate::config::{Environment, FoxdeliConfig};
pub use crate::error::{FoxdeliError, Result};
pub use crate::models::{
    DeliveryState, Money, Order, OrderRequest, Parcel, ParcelRequest, ParcelTrackingConfig,
};
