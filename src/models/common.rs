//! Value records shared by orders and parcels.
//!
//! These serialize with the same camelCase field names the tracking API uses,
//! so they appear unchanged in both the public and the wire models.

use std::collections::HashMap;

use bon::Builder;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Builder, Default)]
#[serde(rename_all = "camelCase")]
pub struct Money {
    pub amount: Option<f64>,
    pub currency: Option<String>,
}

impl Money {
    pub fn new(amount: f64, currency: impl Into<String>) -> Self {
        Self {
            amount: Some(amount),
            currency: Some(currency.into()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Builder, Default)]
#[serde(rename_all = "camelCase")]
pub struct AdditionalCost {
    #[serde(rename = "type")]
    pub cost_type: Option<String>,
    pub price: Option<Money>,
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Builder, Default)]
#[serde(rename_all = "camelCase")]
pub struct PaymentInfo {
    pub method: Option<String>,
    pub service: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Builder, Default)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Builder, Default)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub line1: Option<String>,
    pub line2: Option<String>,
    pub city: Option<String>,
    pub postal_code: Option<String>,
    pub country_code: Option<String>,
    pub state: Option<String>,
    pub region: Option<String>,
    pub longitude: Option<f64>,
    pub latitude: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Builder, Default)]
#[serde(rename_all = "camelCase")]
pub struct ParcelShopData {
    pub carrier: Option<String>,
    pub country_code: Option<String>,
    pub parcel_shop_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Builder, Default)]
#[serde(rename_all = "camelCase")]
pub struct Destination {
    #[serde(rename = "type")]
    pub destination_type: Option<String>,
    pub address: Option<Address>,
    pub parcel_shop: Option<ParcelShopData>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Builder, Default)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[serde(rename = "type")]
    pub product_type: Option<String>,
    pub sku: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub url: Option<String>,
    pub image: Option<String>,
    pub price: Option<Money>,
    pub vat: Option<f64>,
    pub quantity: Option<i32>,
    pub referenced_sku: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Builder, Default)]
#[serde(rename_all = "camelCase")]
pub struct Dimensions {
    pub weight: Option<f64>,
    pub height: Option<i32>,
    pub length: Option<i32>,
    pub width: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Builder, Default)]
#[serde(rename_all = "camelCase")]
pub struct ParcelTrackingConfig {
    pub carrier: Option<String>,
    pub number: Option<String>,
    pub reference_id: Option<String>,
    pub carrier_configuration_id: Option<Uuid>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ParcelTracking {
    pub tracking_id: Option<Uuid>,
    pub carrier: Option<String>,
    pub number: Option<String>,
    pub url: Option<String>,
    pub reference_id: Option<String>,
    pub carrier_configuration_id: Option<Uuid>,
    pub courier_phone: Option<String>,
}

/// Delivery progress of a parcel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum DeliveryState {
    Waiting,
    InTransit,
    Delayed,
    ReadyToPickup,
    Delivered,
    Returning,
    Returned,
    Cancelled,
    Lost,
    /// Reported by the service only; never accepted as an update.
    Expired,
    /// A state this SDK version does not know about.
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ParcelState {
    pub delivery: Option<DeliveryState>,
    pub important: Option<String>,
    pub urgent: Option<String>,
    pub deliver_today: Option<bool>,
    pub returning: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ParcelTimeline {
    pub timeline_id: Option<Uuid>,
    #[serde(rename = "type")]
    pub timeline_type: Option<String>,
    pub text: Option<String>,
    pub created: Option<DateTime<Utc>>,
    pub author: Option<String>,
    pub additional_params: Option<HashMap<String, serde_json::Value>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryWindow {
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Snooze {
    pub until: Option<DateTime<Utc>>,
    pub author: Option<String>,
    pub note: Option<String>,
    pub snoozed: Option<bool>,
}
