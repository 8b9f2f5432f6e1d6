use bon::Builder;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::common::{AdditionalCost, Customer, Destination, Money, PaymentInfo, Product, Snooze};
use super::parcel::{Parcel, ParcelRequest};

/// Order to create or update.
///
/// When `parcels` is non-empty, [`crate::Foxdeli::create_order`] creates each
/// parcel after the order and returns the re-fetched order.
///
/// # Example
/// ```
/// use foxdeli::models::{Customer, Money, OrderRequest};
///
/// let request = OrderRequest::builder()
///     .order_number("2024-0001".to_string())
///     .price(Money::new(499.0, "CZK"))
///     .customer(Customer {
///         email: Some("jan@example.com".to_string()),
///         ..Default::default()
///     })
///     .build();
/// assert!(request.parcels.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Builder, Default)]
#[serde(rename_all = "camelCase")]
pub struct OrderRequest {
    pub platform: Option<String>,
    pub order_number: Option<String>,
    pub external_identifier: Option<String>,
    pub price: Option<Money>,
    pub cash_on_delivery: Option<Money>,
    #[builder(default)]
    #[serde(default)]
    pub additional_costs: Vec<AdditionalCost>,
    pub payment: Option<PaymentInfo>,
    pub customer: Option<Customer>,
    pub destination: Option<Destination>,
    #[builder(default)]
    #[serde(default)]
    pub products: Vec<Product>,
    #[builder(default)]
    #[serde(default)]
    pub parcels: Vec<ParcelRequest>,
}

/// Order as returned by the tracking API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub order_id: Uuid,
    pub platform: Option<String>,
    pub order_number: Option<String>,
    pub order_state: Option<String>,
    pub market_id: Option<Uuid>,
    pub eshop_id: Option<Uuid>,
    pub external_identifier: Option<String>,
    pub destination: Option<Destination>,
    pub price: Option<Money>,
    pub additional_costs: Vec<AdditionalCost>,
    pub cash_on_delivery: Option<Money>,
    pub payment: Option<PaymentInfo>,
    pub customer: Option<Customer>,
    pub parcels: Vec<Parcel>,
    pub products: Vec<Product>,
    pub cancelled: Option<DateTime<Utc>>,
    pub in_important_state: Option<bool>,
    pub in_urgent_state: Option<bool>,
    pub snooze: Option<Snooze>,
}
