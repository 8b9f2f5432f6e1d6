//! Rust SDK for the Foxdeli delivery tracking API.
//!
//! Registers orders and parcels with Foxdeli and keeps the access token for
//! those calls fresh. A request rejected with 401 is replayed once after the
//! token has been refreshed or re-issued.
//!
//! # Quick Start
//!
//! ```no_run
//! use foxdeli::prelude::*;
//!
//! # async fn example() -> foxdeli::error::Result<()> {
//! let config = FoxdeliConfig::from_env()?;
//! let foxdeli = Foxdeli::init(config, "shop@example.com", "secret").await?;
//! let order = foxdeli
//!     .create_order(&OrderRequest::builder().order_number("A-1".to_string()).build())
//!     .await?;
//! println!("{}", order.order_id);
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod prelude;
pub mod transport;

pub use client::Foxdeli;
