//! JSON bodies exchanged with the tracking API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::{
    AdditionalCost, Customer, DeliveryWindow, Destination, Dimensions, Money, ParcelState,
    ParcelTimeline, ParcelTracking, ParcelTrackingConfig, PaymentInfo, Product, Snooze,
};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderRegistration {
    pub market_id: Option<Uuid>,
    pub eshop_id: Option<Uuid>,
    #[serde(flatten)]
    pub order: OrderUpdate,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub platform: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_identifier: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cash_on_delivery: Option<Money>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub additional_costs: Vec<AdditionalCost>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment: Option<PaymentInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer: Option<Customer>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination: Option<Destination>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub products: Vec<Product>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParcelRegistration {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub products: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dimensions: Option<Dimensions>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tracking: Vec<ParcelTrackingConfig>,
}

/// Same shape as a registration; kept separate to mirror the API schema.
pub type ParcelUpdate = ParcelRegistration;

/// Delivery states a client may set. `EXPIRED` is reported by the service
/// only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InputDeliveryState {
    Waiting,
    InTransit,
    Delayed,
    ReadyToPickup,
    Delivered,
    Returning,
    Returned,
    Cancelled,
    Lost,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParcelStateUpdate {
    pub state: InputDeliveryState,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireOrder {
    pub id: Uuid,
    pub platform: Option<String>,
    pub order_number: Option<String>,
    pub order_state: Option<String>,
    pub market_id: Option<Uuid>,
    pub eshop_id: Option<Uuid>,
    pub external_identifier: Option<String>,
    pub destination: Option<Destination>,
    pub price: Option<Money>,
    pub additional_costs: Option<Vec<AdditionalCost>>,
    pub cash_on_delivery: Option<Money>,
    pub payment: Option<PaymentInfo>,
    pub customer: Option<Customer>,
    pub parcels: Option<Vec<WireParcel>>,
    pub products: Option<Vec<Product>>,
    pub cancelled: Option<DateTime<Utc>>,
    pub in_important_state: Option<bool>,
    pub in_urgent_state: Option<bool>,
    pub snooze: Option<Snooze>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireParcel {
    pub id: Uuid,
    pub order_id: Option<Uuid>,
    pub dimensions: Option<Dimensions>,
    pub state: Option<ParcelState>,
    pub tracking_state: Option<String>,
    pub max_store_date: Option<DateTime<Utc>>,
    pub delivery_window: Option<DeliveryWindow>,
    pub active_tracking: Option<ParcelTracking>,
    pub timeline: Option<Vec<ParcelTimeline>>,
    pub products: Option<Vec<String>>,
    pub carrier_tracking_url: Option<String>,
}
